mod codec;
mod config;
mod controller;
mod model;
mod view;

use anyhow::Context;
use clap::Parser;
use config::RcLoader;
use controller::EditorController;
use model::{Catalog, CatalogError, Session};
use std::fs::File;
use std::path::PathBuf;
use tracing::{Level, info, warn};
use tracing_subscriber::EnvFilter;

/// Terminal editor for combo_fx.toml effect configurations
#[derive(Parser, Debug)]
#[command(name = "combo-fx", version, about)]
struct Cli {
    /// Config file to import at startup
    file: Option<PathBuf>,

    /// Where :w writes the export (overrides the rc file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// TOML file listing `entries` and `types` to use instead of the built-in catalog
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Import FILE and print the normalized export to stdout, without the UI
    #[arg(long, requires = "file")]
    normalize: bool,

    /// Log file (the terminal is owned by the UI)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_path = cli
        .log_file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("combo-fx.log"));
    let log_file = File::create(&log_path)
        .with_context(|| format!("cannot open log file {}", log_path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .with_writer(log_file)
        .with_ansi(false)
        .init();

    info!("combo-fx v{} starting", env!("CARGO_PKG_VERSION"));

    // Load RC configuration, command line wins
    let mut config = RcLoader::load_config();
    if let Some(output) = cli.output {
        config.output_path = output;
    }
    if let Some(catalog) = cli.catalog {
        config.catalog_path = Some(catalog);
    }

    let catalog = match &config.catalog_path {
        Some(path) => match Catalog::load(path) {
            Ok(catalog) => catalog,
            Err(CatalogError::Io { source, .. }) => {
                warn!("catalog {} unreadable ({source}), using the built-in one", path.display());
                Catalog::builtin()
            }
            Err(e) => return Err(e).context("cannot use catalog"),
        },
        None => Catalog::builtin(),
    };
    let mut session = Session::new(catalog);

    if cli.normalize {
        if let Some(path) = &cli.file {
            session.import_file(path)?;
        }
        print!("{}", session.export_text());
        return Ok(());
    }

    let mut editor = EditorController::new(session, &config);
    if let Some(path) = &cli.file {
        editor.open_file(path);
    }

    editor.run()
}

/// `info` unless RUST_LOG says otherwise
fn log_filter(directives: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .parse_lossy(directives.unwrap_or_default())
}
