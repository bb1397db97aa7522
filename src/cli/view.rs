//! View subcommand - open a graph file in the 3D viewer.

use std::path::PathBuf;

use clap::Parser;

use super::load_graph;
use crate::appearance::{AppearanceStore, FileStorage};
use crate::config::Config;
use crate::layout::LayoutPolicy;
use crate::store;
use crate::visualization::run_visualizer;

/// Open a graph JSON file in the 3D viewer.
#[derive(Parser)]
pub struct ViewCommand {
    /// Path to the graph JSON file.
    pub input: PathBuf,

    /// Placement policy for nodes without a position.
    #[arg(short, long, value_enum)]
    pub layout: Option<LayoutPolicy>,

    /// Node id to select once the graph is loaded.
    #[arg(short, long)]
    pub select: Option<String>,
}

impl ViewCommand {
    /// Run the view command.
    pub fn run(self, config: &Config) -> color_eyre::Result<()> {
        let mut layout_config = config.layout.clone();
        if let Some(policy) = self.layout {
            layout_config.policy = policy;
        }
        let layout = layout_config.build();

        // Parsing and layout happen off the render thread; the viewer opens
        // immediately and shows the placeholder until the graph arrives.
        let (producer, delivery) = store::channel();
        let input = self.input.clone();
        producer.spawn(move || {
            let mut graph = load_graph(&input)?;
            layout.arrange(&mut graph);
            Ok(graph)
        });

        let settings_dir = config.settings.resolved_dir();
        tracing::debug!(dir = %settings_dir.display(), "Appearance settings location");
        let appearance = AppearanceStore::open(FileStorage::new(settings_dir));

        tracing::info!("Opening {}", self.input.display());
        run_visualizer(config, appearance, delivery, self.select);
        Ok(())
    }
}
