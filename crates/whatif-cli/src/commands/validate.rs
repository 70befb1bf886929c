use anyhow::{Context, bail};
use serde::Serialize;
use whatif_core::reports::{ExpectedImpact, ValidationResult};
use whatif_engine::derive_expected_impact;
use whatif_llm::AnalysisClient;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{ResponseSource, ValidateArgs};
use crate::commands::analyze::request_analysis;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ValidateResponse<'a> {
    control: &'a str,
    source: &'static str,
    expected: ExpectedImpact,
    result: ValidationResult,
    /// Mistakes planted in a demo response; empty for other sources.
    known_errors: &'a [String],
    response: String,
}

/// Handle `whatif validate`.
pub async fn handle(args: &ValidateArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&validation(args, ctx).await?, flags.format)
}

async fn validation<'a>(
    args: &'a ValidateArgs,
    ctx: &'a AppContext,
) -> anyhow::Result<ValidateResponse<'a>> {
    let expected = derive_expected_impact(&ctx.kb, &args.control)?;
    let source = args.source();

    let mut known_errors: &[String] = &[];
    let response = match source {
        ResponseSource::Text => args.text.clone().unwrap_or_default(),
        ResponseSource::File => {
            let path = args.file.as_deref().context("--file requires a path")?;
            std::fs::read_to_string(path)
                .with_context(|| format!("failed to read response file {}", path.display()))?
        }
        ResponseSource::Demo => {
            let Some(demo) = ctx.demos.for_control(&args.control) else {
                bail!("no demo response for control '{}'", args.control);
            };
            known_errors = &demo.known_errors;
            demo.response.clone()
        }
        ResponseSource::Standard | ResponseSource::Challenge => {
            let mode = source
                .analysis_mode()
                .context("source does not call the text-generation service")?;
            let client = AnalysisClient::new(&ctx.config.llm)
                .context("cannot request an analysis; use --mode demo or --text")?;
            request_analysis(&client, ctx, &args.control, mode).await?
        }
    };

    let result = ctx.validator.validate(&response, &expected);
    tracing::debug!(
        control = %args.control,
        source = source.as_str(),
        score = result.score,
        issues = result.issues.len(),
        "validated response"
    );

    Ok(ValidateResponse {
        control: &args.control,
        source: source.as_str(),
        expected,
        result,
        known_errors,
        response,
    })
}
