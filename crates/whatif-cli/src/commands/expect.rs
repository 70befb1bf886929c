use serde::Serialize;
use whatif_core::reports::ExpectedImpact;
use whatif_engine::derive_expected_impact;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ExpectArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ExpectResponse<'a> {
    #[serde(flatten)]
    expected: &'a ExpectedImpact,
    /// Affected threats with no backup control left.
    unprotected_threats: Vec<&'a str>,
}

/// Handle `whatif expect`.
pub fn handle(args: &ExpectArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let expected = derive_expected_impact(&ctx.kb, &args.control)?;
    output(
        &ExpectResponse {
            expected: &expected,
            unprotected_threats: expected.unprotected_threats(),
        },
        flags.format,
    )
}
