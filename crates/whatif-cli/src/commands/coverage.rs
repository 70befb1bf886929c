use whatif_engine::{compute_coverage, coverage_delta};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::CoverageArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `whatif coverage`.
///
/// Without `--disable` prints the baseline per-threat coverage; with it, the
/// baseline and counterfactual counts side by side.
pub fn handle(args: &CoverageArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match &args.disable {
        None => output(&compute_coverage(&ctx.kb, None).threats, flags.format),
        Some(control) => {
            let changes = coverage_delta(&ctx.kb, control)?;
            for change in changes.iter().filter(|change| !change.mitigated) {
                tracing::info!(threat = %change.threat, "no remaining mitigation");
            }
            output(&changes, flags.format)
        }
    }
}
