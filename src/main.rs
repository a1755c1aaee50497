//! gifgrid - Entry Point

use clap::Parser;
use gifgrid::catalog::{FetchWorker, GiphyClient};
use gifgrid::clipboard::SystemClipboard;
use gifgrid::config::ResolvedConfig;
use gifgrid::model::AppError;
use gifgrid::persistence::{FileStore, KeyValueStore, LastSearch, MemoryStore, StoreWatcher};
use gifgrid::state::Browser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};

/// gifgrid - browse GIPHY stickers in the terminal and copy their links
#[derive(Parser, Debug)]
#[command(name = "gifgrid")]
#[command(version)]
#[command(about = "Browse trending and searched GIPHY stickers in the terminal")]
pub struct Args {
    /// Start with this search instead of the last one
    #[arg(short, long)]
    pub query: Option<String>,

    /// GIPHY API key (overrides config file and GIFGRID_API_KEY)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Items requested per page (must be positive)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub page_size: Option<u64>,

    /// Keep the last search in memory only
    #[arg(long)]
    pub no_persist: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("gifgrid: {e}");
            ExitCode::FAILURE
        }
    }
}

fn resolve_config(args: &Args) -> Result<ResolvedConfig, AppError> {
    // Defaults → Config File → Env Vars → CLI Args
    let config_file = gifgrid::config::load_config_with_precedence(args.config.clone())?;
    let merged = gifgrid::config::merge_config(config_file);
    let with_env = gifgrid::config::apply_env_overrides(merged);
    let page_size = args.page_size.and_then(|n| usize::try_from(n).ok());

    Ok(gifgrid::config::apply_cli_overrides(
        with_env,
        args.api_key.clone(),
        page_size,
    ))
}

fn run(args: Args) -> Result<(), AppError> {
    let config = resolve_config(&args)?;
    config.validate()?;

    let _log_guard = gifgrid::logging::init(&config.log_file_path)?;

    info!(
        api_base_url = %config.api_base_url,
        page_size = config.page_size,
        debounce_ms = config.debounce.as_millis() as u64,
        storage = %config.storage_path.display(),
        persist = !args.no_persist,
        "Configuration loaded and resolved"
    );

    let api_key = config.api_key.clone().unwrap_or_default();
    let client = GiphyClient::new(api_key, config.api_base_url.clone(), config.request_timeout)?;
    let worker = FetchWorker::new(Arc::new(client));

    let (store, watcher): (Box<dyn KeyValueStore>, Option<StoreWatcher>) = if args.no_persist {
        (Box::new(MemoryStore::new()), None)
    } else {
        let watcher = match StoreWatcher::new(&config.storage_path) {
            Ok(watcher) => Some(watcher),
            Err(e) => {
                warn!(error = %e, "store watcher unavailable, changes from other instances will be missed");
                None
            }
        };
        (Box::new(FileStore::new(&config.storage_path)), watcher)
    };

    let last_search = LastSearch::new(store, config.storage_key.clone());
    let browser = Browser::new(last_search, config.browser_settings());

    gifgrid::view::run(
        browser,
        worker,
        watcher,
        Box::new(SystemClipboard::new()),
        args.query.as_deref(),
    )?;

    info!("gifgrid exited cleanly");
    Ok(())
}
