use serde::Serialize;
use whatif_engine::derive_expected_impact;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct DemoSummary<'a> {
    control: &'a str,
    /// Validator score of the canned response; absent when the loaded
    /// knowledge base has no such control.
    score: Option<f64>,
    issues: usize,
    known_errors: &'a [String],
}

/// Handle `whatif demo`.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let summaries = ctx
        .demos
        .responses()
        .iter()
        .map(|demo| {
            let result = derive_expected_impact(&ctx.kb, &demo.control)
                .ok()
                .map(|expected| ctx.validator.validate(&demo.response, &expected));
            DemoSummary {
                control: &demo.control,
                score: result.as_ref().map(|result| result.score),
                issues: result.as_ref().map_or(0, |result| result.issues.len()),
                known_errors: &demo.known_errors,
            }
        })
        .collect::<Vec<_>>();

    output(&summaries, flags.format)
}
