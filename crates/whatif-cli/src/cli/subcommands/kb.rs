use clap::Subcommand;

/// Knowledge base inspection commands.
#[derive(Clone, Debug, Subcommand)]
pub enum KbCommands {
    /// List assets.
    Assets,
    /// List threats.
    Threats,
    /// List controls.
    Controls,
    /// Get an asset by name.
    Asset { name: String },
    /// Get a threat by name.
    Threat { name: String },
    /// Get a control by name.
    Control { name: String },
    /// Derived relationship edges.
    Edges {
        /// Mark edges touching this control as inactive.
        #[arg(long)]
        disable: Option<String>,
    },
    /// Threat × control mitigation grid.
    Matrix,
    /// Print the knowledge base as a loadable document.
    Export,
}
