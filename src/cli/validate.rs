//! Validate subcommand - report integrity issues.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::eyre;

use super::load_graph;

/// Check a graph JSON file for dangling edges and duplicate node ids.
#[derive(Parser)]
pub struct ValidateCommand {
    /// Path to the graph JSON file.
    pub input: PathBuf,
}

impl ValidateCommand {
    pub fn run(self) -> color_eyre::Result<()> {
        let graph = load_graph(&self.input)?;
        let issues = graph.integrity_issues();

        if issues.is_empty() {
            println!(
                "{}: ok ({} nodes, {} edges)",
                self.input.display(),
                graph.node_count(),
                graph.edge_count()
            );
            return Ok(());
        }

        for issue in &issues {
            println!("{}: {}", self.input.display(), issue);
        }
        Err(eyre!("{} integrity issue(s) found", issues.len()))
    }
}
