//! Layout subcommand - assign positions and write the graph back.

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;

use super::load_graph;
use crate::config::Config;
use crate::layout::LayoutPolicy;

/// Assign positions to nodes and write the graph JSON.
#[derive(Parser)]
pub struct LayoutCommand {
    /// Path to the graph JSON file.
    pub input: PathBuf,

    /// Output file (defaults to stdout).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Placement policy.
    #[arg(short, long, value_enum)]
    pub layout: Option<LayoutPolicy>,

    /// Recompute every position, including ones already present.
    #[arg(long)]
    pub force: bool,
}

impl LayoutCommand {
    pub fn run(self, config: &Config) -> color_eyre::Result<()> {
        let mut graph = load_graph(&self.input)?;
        graph.validate()?;

        let mut layout_config = config.layout.clone();
        if let Some(policy) = self.layout {
            layout_config.policy = policy;
        }
        let layout = layout_config.build();
        if self.force {
            layout.relayout(&mut graph);
        } else {
            layout.arrange(&mut graph);
        }

        let json = serde_json::to_string_pretty(&graph)?;
        match &self.output {
            Some(path) => {
                std::fs::write(path, json)?;
                tracing::info!(
                    nodes = graph.node_count(),
                    policy = ?layout_config.policy,
                    "Wrote {}",
                    path.display()
                );
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(json.as_bytes())?;
                stdout.write_all(b"\n")?;
            }
        }
        Ok(())
    }
}
