use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::core::cache::RateCache;
use crate::core::rate::{RateError, RateProvider};
use crate::providers::markup;

/// Scans rate page markup for currency table rows and returns the rate in
/// the 7th column of the last row whose text mentions `currency_marker`.
/// Rows with fewer than 7 cells are ignored; the last qualifying row fully
/// replaces earlier candidates, even when its cell does not parse.
fn extract_rate(html: &str, currency_marker: &str) -> Option<f64> {
    let mut rate = None;
    for row in markup::elements(html, "tr") {
        if !markup::text_content(row).contains(currency_marker) {
            continue;
        }
        let cells = markup::elements(row, "td");
        if cells.len() >= 7 {
            rate = normalize_rate_text(&markup::text_content(cells[6]));
        }
    }
    rate
}

/// Normalizes a scraped rate cell down to an integer amount: everything
/// except digits and separators is dropped, a trailing two-digit decimal
/// suffix is removed, and the remaining separators are stripped.
fn normalize_rate_text(text: &str) -> Option<f64> {
    let mut cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect();

    let bytes = cleaned.as_bytes();
    let n = bytes.len();
    if n >= 3
        && (bytes[n - 3] == b'.' || bytes[n - 3] == b',')
        && bytes[n - 2].is_ascii_digit()
        && bytes[n - 1].is_ascii_digit()
    {
        cleaned.truncate(n - 3);
    }

    cleaned.retain(|c| c.is_ascii_digit());
    cleaned.parse::<u64>().ok().map(|v| v as f64)
}

// BcaKursProvider implementation for RateProvider
pub struct BcaKursProvider {
    proxy_url: String,
    page_url: String,
    cache: Arc<RateCache>,
}

impl BcaKursProvider {
    pub fn new(proxy_url: &str, page_url: &str, cache: Arc<RateCache>) -> Self {
        BcaKursProvider {
            proxy_url: proxy_url.to_string(),
            page_url: page_url.to_string(),
            cache,
        }
    }
}

#[derive(Deserialize, Debug)]
struct ProxyEnvelope {
    contents: String,
}

#[async_trait]
impl RateProvider for BcaKursProvider {
    #[instrument(
        name = "KursRateFetch",
        skip(self),
        fields(page = %self.page_url)
    )]
    async fn fetch_rate(&self) -> Result<f64, RateError> {
        if let Some(cached) = self.cache.get(&self.page_url).await {
            return Ok(cached);
        }

        debug!("Requesting rate page via {}", self.proxy_url);

        let client = reqwest::Client::builder()
            .user_agent("kalkurs/1.0")
            .build()?;
        let response = client
            .get(&self.proxy_url)
            .query(&[("url", self.page_url.as_str())])
            .send()
            .await?;

        debug!(status = %response.status(), "Received proxy response");

        if !response.status().is_success() {
            return Err(RateError::Network(format!(
                "HTTP error: {} from rate proxy",
                response.status()
            )));
        }

        let envelope = response.json::<ProxyEnvelope>().await?;
        let rate = extract_rate(&envelope.contents, "USD")
            .filter(|rate| *rate > 0.0)
            .ok_or(RateError::RateNotFound)?;

        self.cache.put(&self.page_url, rate).await;
        Ok(rate)
    }
}
