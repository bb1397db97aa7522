//! CLI module for CodeOrbit.
//!
//! Subcommands:
//! - `view`: Open a graph in the 3D viewer
//! - `validate`: Report integrity issues of a graph file
//! - `layout`: Assign node positions and write the graph back
//! - `settings`: Inspect and edit persisted appearance settings

mod layout;
mod settings;
mod validate;
mod view;

use std::path::Path;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::AppError;
use crate::models::Graph;

pub use layout::LayoutCommand;
pub use settings::SettingsCommand;
pub use validate::ValidateCommand;
pub use view::ViewCommand;

/// CodeOrbit - 3D explorer for source-code dependency graphs
#[derive(Parser)]
#[command(name = "codeorbit")]
#[command(about = "Interactive 3D explorer for scanned source-code dependency graphs")]
#[command(version)]
pub struct App {
    /// Run in verbose mode
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Open a graph JSON file in the 3D viewer
    View(ViewCommand),

    /// Check a graph JSON file for dangling edges and duplicate ids
    Validate(ValidateCommand),

    /// Assign positions to nodes and write the graph JSON
    Layout(LayoutCommand),

    /// Inspect and edit persisted appearance settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommand,
    },
}

impl App {
    /// Run the CLI application.
    pub fn run(self) -> color_eyre::Result<()> {
        let config = Config::load()?;
        tracing::debug!(?config, "Loaded configuration");

        match self.command {
            Command::View(cmd) => cmd.run(&config),
            Command::Validate(cmd) => cmd.run(),
            Command::Layout(cmd) => cmd.run(&config),
            Command::Settings { command } => command.run(&config),
        }
    }
}

/// Read a graph payload from disk. Integrity is checked by the caller.
pub fn load_graph(path: &Path) -> Result<Graph, AppError> {
    let content = std::fs::read_to_string(path)?;
    let graph: Graph = serde_json::from_str(&content)?;
    tracing::debug!(
        path = %path.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "Read graph file"
    );
    Ok(graph)
}
