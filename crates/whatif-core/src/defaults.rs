//! Response validator defaults shared by the engine and the config layer.

/// Characters inspected on each side of an unrelated threat's first mention.
pub const DEFAULT_CONTEXT_WINDOW: usize = 50;

/// Words that turn a bare mention of an unrelated threat into a claim that it is affected.
pub const DEFAULT_RISK_KEYWORDS: [&str; 6] = [
    "increase",
    "exposed",
    "vulnerable",
    "risk",
    "affected",
    "impact",
];
