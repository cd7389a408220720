pub mod bar;
pub mod interval;
pub mod time_series;

pub use bar::OhlcRow;
pub use finapis_shared::{FinapisError, Result};
pub use interval::Interval;

use bon::Builder;
use finapis_shared::fetch::redact_api_key;
use finapis_shared::{HttpFetcher, JsonFetcher};
use polars::prelude::DataFrame;
use tracing::debug;

pub const BASE_URL: &str = "https://www.alphavantage.co/query";

#[derive(Debug, Clone, Builder)]
#[builder(on(String, into))]
pub struct AlphaVantageConfig {
    #[builder(default = BASE_URL.to_string())]
    pub base_url: String,
    /// Make `fetch_intraday` request `TIME_SERIES_INTRADAY` at the given interval.
    /// Off by default: the interval is validated, then the daily request is issued.
    #[builder(default)]
    pub request_intraday: bool,
}

impl Default for AlphaVantageConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

pub struct AlphaVantageClient<F = HttpFetcher> {
    fetcher: F,
    config: AlphaVantageConfig,
}

impl AlphaVantageClient<HttpFetcher> {
    pub fn new() -> Result<Self> {
        Ok(Self::with_fetcher(HttpFetcher::new()?, AlphaVantageConfig::default()))
    }
}

impl<F: JsonFetcher> AlphaVantageClient<F> {
    pub fn with_fetcher(fetcher: F, config: AlphaVantageConfig) -> Self {
        Self { fetcher, config }
    }

    pub fn config(&self) -> &AlphaVantageConfig {
        &self.config
    }

    /// Daily adjusted OHLC bars for `symbol`, oldest first.
    pub async fn fetch_daily(&self, symbol: &str, api_key: &str) -> Result<DataFrame> {
        self.fetch(symbol, api_key, Interval::Daily).await
    }

    /// Intraday OHLC bars for `symbol`. `interval_minutes` must be one of 1, 5, 15, 30
    /// or 60. Unless [`AlphaVantageConfig::request_intraday`] is set, the request made
    /// is the same as [`Self::fetch_daily`].
    pub async fn fetch_intraday(
        &self,
        symbol: &str,
        api_key: &str,
        interval_minutes: u32,
    ) -> Result<DataFrame> {
        let interval = Interval::try_from(interval_minutes)
            .ok()
            .filter(|interval| interval.is_intraday())
            .ok_or_else(|| {
                FinapisError::InvalidArgument(format!(
                    "{interval_minutes} is invalid interval for intraday. Valid intervals: [1, 5, 15, 30, 60]"
                ))
            })?;

        if !self.config.request_intraday {
            return self.fetch(symbol, api_key, Interval::Daily).await;
        }

        self.fetch(symbol, api_key, interval).await
    }

    /// OHLC bars for any supported interval in minutes, 1440 being daily.
    pub async fn fetch_ohlc(
        &self,
        symbol: &str,
        api_key: &str,
        interval_minutes: u32,
    ) -> Result<DataFrame> {
        let interval = Interval::try_from(interval_minutes)?;

        self.fetch(symbol, api_key, interval).await
    }

    pub fn request_url(&self, symbol: &str, api_key: &str, interval: Interval) -> String {
        let base_url = &self.config.base_url;
        let function = interval.function();

        if interval.is_intraday() {
            format!(
                "{base_url}?function={function}&symbol={symbol}&interval={}min&outputsize=full&apikey={api_key}",
                interval.minutes()
            )
        } else {
            format!("{base_url}?function={function}&symbol={symbol}&outputsize=full&apikey={api_key}")
        }
    }

    async fn fetch(&self, symbol: &str, api_key: &str, interval: Interval) -> Result<DataFrame> {
        let url = self.request_url(symbol, api_key, interval);
        debug!(url = %redact_api_key(&url), "requesting AlphaVantage time series");

        let response = self.fetcher.get_json(&url).await?;
        let series = time_series::extract_series(response)?;

        time_series::normalize(&series, interval)
    }
}
