//! Lexical scoring of a free-text analysis against an [`ExpectedImpact`].
//!
//! This is a heuristic classifier, not a semantic one. A name counts as
//! mentioned when it occurs in the case-folded text; nothing is tokenized,
//! stemmed or parsed. Known consequences:
//!
//! - in [`MatchMode::Substring`] (the default) a name inside a longer word
//!   still matches;
//! - negation is only approximated: an unrelated threat is flagged as a
//!   hallucination only when a risk keyword appears within the context window
//!   around its first occurrence, so "Phishing is not affected" is still
//!   flagged because "affected" is nearby;
//! - paraphrases ("DDoS amplification" for "DDoS Attack") are not mentions.
//!
//! Scores should be read with those limits in mind.

use regex::Regex;
use whatif_core::defaults::{DEFAULT_CONTEXT_WINDOW, DEFAULT_RISK_KEYWORDS};
use whatif_core::enums::MatchMode;
use whatif_core::reports::{ExpectedImpact, ValidationResult};

/// Configurable response validator. [`Validator::default`] reproduces
/// [`validate_response`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validator {
    match_mode: MatchMode,
    context_window: usize,
    risk_keywords: Vec<String>,
}

impl Default for Validator {
    fn default() -> Self {
        Self {
            match_mode: MatchMode::Substring,
            context_window: DEFAULT_CONTEXT_WINDOW,
            risk_keywords: DEFAULT_RISK_KEYWORDS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl Validator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_match_mode(mut self, match_mode: MatchMode) -> Self {
        self.match_mode = match_mode;
        self
    }

    #[must_use]
    pub const fn with_context_window(mut self, chars: usize) -> Self {
        self.context_window = chars;
        self
    }

    /// Replace the risk keywords. Keywords are case-folded and always matched
    /// as substrings, whatever the match mode.
    #[must_use]
    pub fn with_risk_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.risk_keywords = keywords
            .into_iter()
            .map(|keyword| keyword.as_ref().to_lowercase())
            .collect();
        self
    }

    #[must_use]
    pub const fn match_mode(&self) -> MatchMode {
        self.match_mode
    }

    #[must_use]
    pub const fn context_window(&self) -> usize {
        self.context_window
    }

    #[must_use]
    pub fn risk_keywords(&self) -> &[String] {
        &self.risk_keywords
    }

    /// Score `text` against `expected`. Accepts any string, including an empty one.
    #[must_use]
    pub fn validate(&self, text: &str, expected: &ExpectedImpact) -> ValidationResult {
        let haystack = text.to_lowercase();
        let mut result = ValidationResult::default();

        for threat in &expected.threats_should_mention {
            if self.find(&haystack, threat).is_some() {
                result.threats_mentioned.push(threat.clone());
            } else {
                result.threats_missed.push(threat.clone());
                result
                    .issues
                    .push(format!("OMISSION: Should have mentioned '{threat}' but didn't"));
            }
        }

        for threat in &expected.threats_should_not_mention {
            let Some((start, end)) = self.find(&haystack, threat) else {
                continue;
            };
            let context = context_window(&haystack, start, end, self.context_window);
            if self
                .risk_keywords
                .iter()
                .any(|keyword| context.contains(keyword.as_str()))
            {
                result.threats_hallucinated.push(threat.clone());
                result.issues.push(format!(
                    "HALLUCINATION: Mentioned '{threat}' as affected, but ontology shows no relationship"
                ));
            }
        }

        for asset in &expected.assets_should_mention {
            if self.find(&haystack, asset).is_some() {
                result.assets_mentioned.push(asset.clone());
            } else {
                result.assets_missed.push(asset.clone());
                result.issues.push(format!(
                    "OMISSION: Should have mentioned '{asset}' at risk but didn't"
                ));
            }
        }

        result.score = score(
            expected.total_expected(),
            result.threats_mentioned.len() + result.assets_mentioned.len(),
            result.threats_hallucinated.len(),
        );
        result
    }

    /// Byte range of the first match of `name` in the already case-folded `haystack`.
    fn find(&self, haystack: &str, name: &str) -> Option<(usize, usize)> {
        let needle = name.to_lowercase();
        match self.match_mode {
            MatchMode::Substring => haystack
                .find(&needle)
                .map(|start| (start, start + needle.len())),
            MatchMode::WordBoundary => word_boundary_pattern(&needle)?
                .find(haystack)
                .map(|found| (found.start(), found.end())),
        }
    }
}

/// Score `text` with the default substring matcher, 50-character window and
/// built-in risk keywords.
#[must_use]
pub fn validate_response(text: &str, expected: &ExpectedImpact) -> ValidationResult {
    Validator::default().validate(text, expected)
}

/// `(correct - errors) / expected * 100`, clamped to `[0, 100]`. Zero when
/// nothing is expected, since the ratio cannot be normalized.
#[allow(clippy::cast_precision_loss)]
fn score(total_expected: usize, total_correct: usize, total_errors: usize) -> f64 {
    if total_expected == 0 {
        return 0.0;
    }
    let raw = (total_correct as f64 - total_errors as f64) / total_expected as f64 * 100.0;
    raw.clamp(0.0, 100.0)
}

/// `\b` is only anchored on sides where the name starts or ends with a word
/// character; `\b` next to punctuation would never match after it.
fn word_boundary_pattern(needle: &str) -> Option<Regex> {
    let is_word = |ch: char| ch.is_alphanumeric() || ch == '_';
    let leading = if needle.chars().next().is_some_and(is_word) {
        r"\b"
    } else {
        ""
    };
    let trailing = if needle.chars().last().is_some_and(is_word) {
        r"\b"
    } else {
        ""
    };
    Regex::new(&format!("{leading}{}{trailing}", regex::escape(needle))).ok()
}

/// Slice of `text` from `chars` characters before `start` to `chars`
/// characters after `end`, clipped to the text.
fn context_window(text: &str, start: usize, end: usize, chars: usize) -> &str {
    let from = if chars == 0 {
        start
    } else {
        text[..start]
            .char_indices()
            .rev()
            .nth(chars - 1)
            .map_or(0, |(index, _)| index)
    };
    let to = text[end..]
        .char_indices()
        .nth(chars)
        .map_or(text.len(), |(index, _)| end + index);
    &text[from..to]
}
