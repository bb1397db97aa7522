//! Appearance settings commands.

use clap::Subcommand;
use color_eyre::Result;

use crate::appearance::{AppearanceStore, FileStorage};
use crate::config::Config;

/// Appearance settings subcommands.
#[derive(Subcommand)]
pub enum SettingsCommand {
    /// Print the persisted appearance record
    Show,

    /// Restore every appearance setting to its default
    Reset,

    /// Set the display color of a node type
    SetColor {
        /// Node type label, e.g. `class` or a custom label
        node_type: String,

        /// Color as `#rrggbb`
        color: String,
    },
}

impl SettingsCommand {
    /// Run the settings subcommand.
    pub fn run(&self, config: &Config) -> Result<()> {
        let storage = FileStorage::new(config.settings.resolved_dir());
        let path = storage.path_for(crate::appearance::SETTINGS_KEY);
        let mut store = AppearanceStore::open(storage);

        match self {
            SettingsCommand::Show => {
                println!("# {}", path.display());
                println!("{}", store.settings().encode()?);
            }
            SettingsCommand::Reset => {
                store.reset();
                println!("Appearance settings reset");
            }
            SettingsCommand::SetColor { node_type, color } => {
                store.set_node_color(node_type, color)?;
                println!("{node_type} = {}", store.color_for_label(node_type));
            }
        }

        store.close()?;
        Ok(())
    }
}
