pub mod api;
pub mod commands;
pub mod config;
pub mod conversation;
pub mod error;
pub mod logging;
pub mod route;
pub mod search;
pub mod session;
pub mod sidebar;

use std::sync::Arc;

use api::ApiClient;
use config::ClientConfig;
use error::AppError;
use session::FileTokenStore;

/// Entry point of the terminal client.
pub fn run() {
    // Keep the logger alive until exit so buffered lines are flushed.
    let logger = match logging::init(&logging::default_log_dir()) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("logging disabled: {}", e);
            None
        }
    };

    if let Err(e) = start() {
        log::error!("{}", e);
        eprintln!("moktashif: {}", e);
        if let Some(handle) = &logger {
            handle.flush();
        }
        std::process::exit(1);
    }
}

fn start() -> Result<(), AppError> {
    let config = ClientConfig::load()?;
    let tokens = Arc::new(FileTokenStore::at_default_path());
    let client = Arc::new(ApiClient::new(&config, tokens.clone())?);

    log::info!(
        "Starting client: api={}, debounce={}ms",
        config.api_base_url,
        config.search_debounce_ms
    );

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    rt.block_on(commands::repl(client, tokens, &config))
}
