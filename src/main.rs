//! CodeOrbit - Interactive 3D Code Graph Explorer

use clap::Parser;
use tracing_subscriber::EnvFilter;

use codeorbit::cli::App;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let app = App::parse();

    // Initialize logging; RUST_LOG wins over the verbosity flag
    let default_level = if app.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{default_level},wgpu=warn,naga=warn")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    app.run()
}
