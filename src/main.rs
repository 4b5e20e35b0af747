use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use factcheck_results::config::Config;
use factcheck_results::render::render_text;
use factcheck_results::server::{run_server, AppState};
use factcheck_results::store::{load_display, DirStore, SessionStore};
use factcheck_results::{normalize_bytes, ResultsView};
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "factcheck-results", version, about = "View stored fact-check analysis results")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
    /// TOML config file
    #[arg(long, global = true)] config: Option<PathBuf>,
    /// Directory backing the session slots (overrides config)
    #[arg(long, global = true)] store_dir: Option<PathBuf>,
    /// Slot name (overrides config)
    #[arg(long, global = true)] key: Option<String>,
    /// Debug logging
    #[arg(short, long, global = true)] verbose: bool,
}

#[derive(Subcommand)]
enum Cmd {
    /// Render the stored analysis
    Show { #[arg(long)] no_color: bool },
    /// Normalize a payload file (or stdin) and print the view as JSON
    Normalize { #[arg(long)] file: Option<PathBuf> },
    /// Store a payload file in the slot
    Save { #[arg(long)] file: PathBuf },
    /// Empty the slot
    Clear,
    /// Serve the results over HTTP
    Serve { #[arg(long)] bind: Option<String> },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut cfg = Config::load(cli.config.as_deref())?;
    if let Some(dir) = cli.store_dir { cfg.store_dir = dir; }
    if let Some(key) = cli.key { cfg.key = key; }
    let store = DirStore::new(&cfg.store_dir);

    match cli.cmd {
        Cmd::Show { no_color } => {
            let model = load_display(&store, &cfg.key)?;
            print!("{}", render_text(&model, !no_color));
        }
        Cmd::Normalize { file } => {
            let raw = match file {
                Some(path) => std::fs::read(&path).with_context(|| format!("reading {}", path.display()))?,
                None => {
                    let mut buf = Vec::new();
                    std::io::stdin().read_to_end(&mut buf)?;
                    buf
                }
            };
            let view = ResultsView::from(normalize_bytes(Some(raw.as_slice())));
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        Cmd::Save { file } => {
            let raw = std::fs::read(&file).with_context(|| format!("reading {}", file.display()))?;
            store.set(&cfg.key, &raw)?;
        }
        Cmd::Clear => store.remove(&cfg.key)?,
        Cmd::Serve { bind } => {
            let addr = bind.unwrap_or(cfg.bind);
            let state = AppState { store: Arc::new(store), key: cfg.key };
            run_server(state, &addr).await?;
        }
    }
    Ok(())
}
