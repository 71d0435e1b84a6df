use super::ui;
use crate::core::config::AppConfig;
use crate::core::rate::{RateProvider, RateState, settle};
use crate::core::view::View;
use crate::core::worksheet;
use anyhow::Result;
use chrono::{Datelike, Local};

/// Fetches the rate, then runs one calculator pass over the configured
/// worksheet and renders the projection table.
pub async fn run(
    config: &AppConfig,
    provider: &dyn RateProvider,
    view: &mut dyn View,
) -> Result<()> {
    worksheet::check_row_count(&config.worksheet)?;

    let mut state = RateState::new();

    let spinner = ui::new_spinner("Fetching exchange rate...");
    let fetched = provider.fetch_rate().await;
    spinner.finish_and_clear();

    settle(fetched, &mut state, view);

    let entries = worksheet::padded(&config.worksheet);
    worksheet::run_calculator(
        &entries,
        &state,
        Local::now().year(),
        config.display.partial_before_rate,
        view,
    );

    Ok(())
}
