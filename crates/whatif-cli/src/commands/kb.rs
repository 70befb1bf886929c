use whatif_engine::coverage_matrix;

use crate::cli::subcommands::KbCommands;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::{output, table, table_options};

/// Handle `whatif kb`.
pub fn handle(action: &KbCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let kb = &ctx.kb;
    match action {
        KbCommands::Assets => output(&kb.assets(), flags.format),
        KbCommands::Threats => output(&kb.threats(), flags.format),
        KbCommands::Controls => output(&kb.controls(), flags.format),
        KbCommands::Asset { name } => output(kb.get_asset(name)?, flags.format),
        KbCommands::Threat { name } => output(kb.get_threat(name)?, flags.format),
        KbCommands::Control { name } => output(kb.get_control(name)?, flags.format),
        KbCommands::Edges { disable } => {
            if let Some(control) = disable {
                kb.get_control(control)?;
            }
            output(&kb.relationship_states(disable.as_deref()), flags.format)
        }
        KbCommands::Matrix => {
            let matrix = coverage_matrix(kb);
            if flags.format == OutputFormat::Table {
                println!("{}", render_matrix(&matrix));
                Ok(())
            } else {
                output(&matrix, flags.format)
            }
        }
        KbCommands::Export => output(&kb.document(), flags.format),
    }
}

/// One row per threat, one column per control, `✓` where the control mitigates it.
fn render_matrix(matrix: &whatif_core::reports::CoverageMatrix) -> String {
    let headers = std::iter::once("threat")
        .chain(matrix.controls.iter().map(String::as_str))
        .collect::<Vec<_>>();
    let rows = matrix
        .threats
        .iter()
        .zip(&matrix.cells)
        .map(|(threat, cells)| {
            std::iter::once(threat.clone())
                .chain(cells.iter().map(|&hit| String::from(if hit { "✓" } else { "" })))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    table::render_entity_table(&headers, &rows, table_options())
}
