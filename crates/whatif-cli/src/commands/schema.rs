use schemars::schema_for;
use whatif_core::reports::{CoverageReport, ExpectedImpact, ValidationResult};
use whatif_engine::OntologyDocument;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{SchemaArgs, SchemaType};
use crate::output::output;

/// Handle `whatif schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&schema(args.type_name), flags.format)
}

fn schema(type_name: SchemaType) -> schemars::Schema {
    match type_name {
        SchemaType::KbDocument => schema_for!(OntologyDocument),
        SchemaType::CoverageReport => schema_for!(CoverageReport),
        SchemaType::ExpectedImpact => schema_for!(ExpectedImpact),
        SchemaType::ValidationResult => schema_for!(ValidationResult),
    }
}
