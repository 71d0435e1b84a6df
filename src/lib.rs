pub mod cli;
pub mod core;
pub mod providers;

use crate::cli::console::ConsoleView;
use crate::core::cache::RateCache;
use crate::core::config::AppConfig;
use crate::providers::bca::BcaKursProvider;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

/// The operations the binary can run once its command line is parsed.
pub enum AppCommand {
    Rate,
    Quote,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Kurs calculator starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    // Shared rate cache
    let rate_cache = Arc::new(RateCache::new());

    let provider = BcaKursProvider::new(
        &config.providers.proxy.base_url,
        &config.providers.kurs.page_url,
        Arc::clone(&rate_cache),
    );

    let mut view = ConsoleView::new();

    match command {
        AppCommand::Rate => cli::rate::run(&provider, &mut view).await,
        AppCommand::Quote => cli::quote::run(&config, &provider, &mut view).await,
    }
}
