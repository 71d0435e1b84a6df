//! Exchange rate acquisition: the provider seam, the typed failure modes,
//! and the controller-owned rate state.

use crate::core::rounding::round_to_nearest;
use crate::core::view::View;
use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

/// Added to the raw rate before rounding, as resale headroom.
pub const BUFFER_AMOUNT: f64 = 500.0;
/// The buffered rate is rounded to this unit.
pub const BUFFER_ROUND: f64 = 100.0;

/// Notification shown when acquisition fails, whatever the cause.
pub const RATE_FETCH_FAILED: &str = "Failed to fetch exchange rate.";

/// How rate acquisition can fail. Both kinds are absorbed by [`acquire`];
/// neither propagates past the acquisition boundary.
#[derive(Debug, Error)]
pub enum RateError {
    /// Transport failure, an HTTP error status, or a malformed proxy
    /// envelope.
    #[error("Rate page request failed: {0}")]
    Network(String),

    /// The page came back, but no row carried a parsable positive rate.
    #[error("No parsable USD rate found on the rate page")]
    RateNotFound,
}

impl From<reqwest::Error> for RateError {
    fn from(err: reqwest::Error) -> Self {
        RateError::Network(err.to_string())
    }
}

/// A source of the current USD selling rate in IDR.
#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn fetch_rate(&self) -> Result<f64, RateError>;
}

/// The two rate scalars shared by acquisition and the calculator.
///
/// Owned by the command runner and passed by reference into both routines.
/// `buffered` is always derived from `raw`; [`set`](Self::set) and
/// [`clear`](Self::clear) are the only mutators, so the two can never drift
/// apart.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RateState {
    raw: Option<f64>,
    buffered: Option<f64>,
}

impl RateState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The rate exactly as extracted from the page, unset until the first
    /// successful fetch.
    pub fn raw(&self) -> Option<f64> {
        self.raw
    }

    /// The resale rate used for every IDR conversion.
    pub fn buffered(&self) -> Option<f64> {
        self.buffered
    }

    /// Stores a freshly fetched rate and re-derives the buffered rate.
    pub fn set(&mut self, raw: f64) {
        self.raw = Some(raw);
        self.buffered = Some(round_to_nearest(raw + BUFFER_AMOUNT, BUFFER_ROUND));
    }

    /// Resets both rates to unset, as after a failed fetch.
    pub fn clear(&mut self) {
        self.raw = None;
        self.buffered = None;
    }
}

/// Runs one rate acquisition against `provider` and reflects the outcome in
/// `state` and on `view`. Failures reset both rate displays to the empty
/// marker and surface a single notification; they are never propagated.
pub async fn acquire(provider: &dyn RateProvider, state: &mut RateState, view: &mut dyn View) {
    let fetched = provider.fetch_rate().await;
    settle(fetched, state, view);
}

/// Applies a fetch outcome to the rate state and the rate displays.
/// Split from [`acquire`] so callers can run the fetch under a progress
/// indicator and settle once it is gone.
pub fn settle(fetched: Result<f64, RateError>, state: &mut RateState, view: &mut dyn View) {
    match fetched {
        Ok(raw) => {
            state.set(raw);
            debug!(
                "Fetched rate {raw}, buffered to {}",
                state.buffered.unwrap_or_default()
            );
            view.render_rates(state);
        }
        Err(e) => {
            state.clear();
            debug!("Rate acquisition failed: {e}");
            view.render_rates(state);
            view.notify(RATE_FETCH_FAILED);
        }
    }
}
