use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Kb { action } => commands::kb::handle(&action, ctx, flags),
        Commands::Coverage(args) => commands::coverage::handle(&args, ctx, flags),
        Commands::Expect(args) => commands::expect::handle(&args, ctx, flags),
        Commands::Analyze(args) => commands::analyze::handle(&args, ctx, flags).await,
        Commands::Validate(args) => commands::validate::handle(&args, ctx, flags).await,
        Commands::Demo => commands::demo::handle(ctx, flags),
        Commands::Schema(_) => unreachable!("schema is pre-dispatched in main"),
    }
}
