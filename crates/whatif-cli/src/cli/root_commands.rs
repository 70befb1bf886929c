use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use whatif_llm::AnalysisMode;

use crate::cli::subcommands::KbCommands;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Inspect the knowledge base.
    Kb {
        #[command(subcommand)]
        action: KbCommands,
    },
    /// Mitigation coverage per threat, optionally with one control disabled.
    Coverage(CoverageArgs),
    /// Facts a correct analysis of disabling a control must contain.
    Expect(ExpectArgs),
    /// Ask the configured text-generation service for an analysis.
    Analyze(AnalyzeArgs),
    /// Score an analysis against the expected facts.
    Validate(ValidateArgs),
    /// List the canned analyses and their planted mistakes.
    Demo,
    /// Dump JSON schema for a record type.
    Schema(SchemaArgs),
}

/// Arguments for `whatif coverage`.
#[derive(Clone, Debug, Args)]
pub struct CoverageArgs {
    /// Control to treat as disabled; prints baseline vs. counterfactual counts.
    #[arg(long)]
    pub disable: Option<String>,
}

/// Arguments for `whatif expect`.
#[derive(Clone, Debug, Args)]
pub struct ExpectArgs {
    /// Control to treat as disabled.
    pub control: String,
}

/// Arguments for `whatif analyze`.
#[derive(Clone, Debug, Args)]
pub struct AnalyzeArgs {
    /// Control to treat as disabled.
    pub control: String,
    /// Prompt style.
    #[arg(long, value_enum, default_value = "standard")]
    pub mode: AnalysisModeArg,
}

/// Arguments for `whatif validate`.
#[derive(Clone, Debug, Args)]
pub struct ValidateArgs {
    /// Control to treat as disabled.
    pub control: String,
    /// Where the analysis comes from when no text is given (default: demo).
    #[arg(long, value_enum, conflicts_with_all = ["text", "file"])]
    pub mode: Option<ResponseSource>,
    /// Analysis text to validate.
    #[arg(long, conflicts_with = "file")]
    pub text: Option<String>,
    /// File containing the analysis text to validate.
    #[arg(long)]
    pub file: Option<PathBuf>,
}

impl ValidateArgs {
    #[must_use]
    pub fn source(&self) -> ResponseSource {
        if self.text.is_some() {
            ResponseSource::Text
        } else if self.file.is_some() {
            ResponseSource::File
        } else {
            self.mode.unwrap_or(ResponseSource::Demo)
        }
    }
}

/// Arguments for `whatif schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    pub type_name: SchemaType,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum AnalysisModeArg {
    /// Ontology facts in the prompt, structured answer requested.
    Standard,
    /// Open-ended prompt that encourages speculation.
    Challenge,
}

impl From<AnalysisModeArg> for AnalysisMode {
    fn from(arg: AnalysisModeArg) -> Self {
        match arg {
            AnalysisModeArg::Standard => Self::Standard,
            AnalysisModeArg::Challenge => Self::Challenge,
        }
    }
}

/// Origin of the text handed to the validator.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ResponseSource {
    /// Canned analysis shipped with whatif.
    Demo,
    /// Live analysis with the standard prompt.
    Standard,
    /// Live analysis with the challenge prompt.
    Challenge,
    #[value(skip)]
    Text,
    #[value(skip)]
    File,
}

impl ResponseSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Demo => "demo",
            Self::Standard => "standard",
            Self::Challenge => "challenge",
            Self::Text => "text",
            Self::File => "file",
        }
    }

    /// The prompt style, for sources that call the text-generation service.
    #[must_use]
    pub const fn analysis_mode(self) -> Option<AnalysisMode> {
        match self {
            Self::Standard => Some(AnalysisMode::Standard),
            Self::Challenge => Some(AnalysisMode::Challenge),
            Self::Demo | Self::Text | Self::File => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SchemaType {
    KbDocument,
    CoverageReport,
    ExpectedImpact,
    ValidationResult,
}
