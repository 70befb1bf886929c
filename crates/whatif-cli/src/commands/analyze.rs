use anyhow::Context;
use serde::Serialize;
use whatif_engine::derive_expected_impact;
use whatif_llm::{AnalysisClient, AnalysisMode};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::AnalyzeArgs;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

#[derive(Debug, Serialize)]
struct AnalyzeResponse<'a> {
    control: &'a str,
    mode: AnalysisMode,
    model: &'a str,
    response: String,
}

/// Handle `whatif analyze`.
pub async fn handle(args: &AnalyzeArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mode = AnalysisMode::from(args.mode);
    let client = AnalysisClient::new(&ctx.config.llm).context("cannot request an analysis")?;
    let response = request_analysis(&client, ctx, &args.control, mode).await?;

    output(
        &AnalyzeResponse {
            control: &args.control,
            mode,
            model: client.model(),
            response,
        },
        flags.format,
    )
}

/// Run one analysis request behind a spinner.
pub async fn request_analysis(
    client: &AnalysisClient,
    ctx: &AppContext,
    control: &str,
    mode: AnalysisMode,
) -> anyhow::Result<String> {
    let expected = derive_expected_impact(&ctx.kb, control)?;

    let progress = Progress::spinner(&format!("Analyzing '{control}' ({mode})..."));
    match client.analyze(&ctx.kb, &expected, mode).await {
        Ok(text) => {
            progress.finish_clear();
            Ok(text)
        }
        Err(error) => {
            progress.finish_err("analysis failed");
            Err(anyhow::Error::new(error).context(format!("analysis of '{control}' failed")))
        }
    }
}
