use super::ui;
use crate::core::rate::{RateProvider, RateState, settle};
use crate::core::view::View;
use anyhow::Result;

/// Fetches the current rate and renders the raw and buffered displays.
/// Acquisition failures are reflected on the view, not returned.
pub async fn run(provider: &dyn RateProvider, view: &mut dyn View) -> Result<()> {
    let mut state = RateState::new();

    let spinner = ui::new_spinner("Fetching exchange rate...");
    let fetched = provider.fetch_rate().await;
    spinner.finish_and_clear();

    settle(fetched, &mut state, view);
    Ok(())
}
