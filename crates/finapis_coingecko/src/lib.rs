pub mod history;
pub mod method;
pub mod simple_price;

pub use finapis_shared::{FinapisError, Pair, Result};
pub use history::PriceSnapshot;

use bon::Builder;
use finapis_shared::{HttpFetcher, JsonFetcher, join_as_list, parse_number, split_pairs};
use futures::future::try_join_all;
use history::{History, HistoryParams, price_history_frame};
use itertools::Itertools;
use polars::prelude::DataFrame;
use serde_json::Value;
use simple_price::{SimplePrice, SimplePriceParams};
use tracing::debug;

pub const BASE_URL: &str = "https://api.coingecko.com/api/v3";

#[derive(Debug, Clone, Builder)]
#[builder(on(String, into))]
pub struct CoinGeckoConfig {
    #[builder(default = BASE_URL.to_string())]
    pub base_url: String,
}

impl Default for CoinGeckoConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

pub struct CoinGeckoClient<F = HttpFetcher> {
    fetcher: F,
    config: CoinGeckoConfig,
}

impl CoinGeckoClient<HttpFetcher> {
    pub fn new() -> Result<Self> {
        Ok(Self::with_fetcher(HttpFetcher::new()?, CoinGeckoConfig::default()))
    }
}

impl<F: JsonFetcher> CoinGeckoClient<F> {
    pub fn with_fetcher(fetcher: F, config: CoinGeckoConfig) -> Self {
        Self { fetcher, config }
    }

    pub fn config(&self) -> &CoinGeckoConfig {
        &self.config
    }

    /// Price, market cap and volume of `pair` on `date` (`dd-mm-yyyy`).
    pub async fn historical_price(&self, pair: &Pair, date: &str) -> Result<PriceSnapshot> {
        let params = HistoryParams::builder()
            .coin(pair.base.as_str())
            .date(date)
            .build();
        let response = self.call::<History>(&params).await?;

        response
            .market_data
            .ok_or_else(|| FinapisError::MissingField("market_data".to_string()))?
            .snapshot(&pair.quote)
    }

    /// One row per date, in the order given. The history endpoint only serves one
    /// coin and one date per request, so this makes `dates.len()` sequential requests.
    pub async fn historical_prices<S: AsRef<str>>(
        &self,
        pair: &Pair,
        dates: &[S],
    ) -> Result<DataFrame> {
        let Some((first, rest)) = dates.split_first() else {
            return price_history_frame(dates, &PriceSnapshot::field_names(), &[]);
        };

        let first = self.historical_price(pair, first.as_ref()).await?;
        let columns = first.fields().map(|(name, _)| name);

        let mut snapshots = Vec::with_capacity(dates.len());
        snapshots.push(first);
        for date in rest {
            snapshots.push(self.historical_price(pair, date.as_ref()).await?);
        }

        price_history_frame(dates, &columns, &snapshots)
    }

    /// Same table as [`Self::historical_prices`], with all requests in flight at once.
    pub async fn historical_prices_concurrent<S: AsRef<str>>(
        &self,
        pair: &Pair,
        dates: &[S],
    ) -> Result<DataFrame> {
        let snapshots = try_join_all(
            dates
                .iter()
                .map(|date| self.historical_price(pair, date.as_ref())),
        )
        .await?;

        let columns = snapshots
            .first()
            .map_or(PriceSnapshot::field_names(), |first| {
                first.fields().map(|(name, _)| name)
            });

        price_history_frame(dates, &columns, &snapshots)
    }

    /// Current price of every pair, in input order, from a single request covering all
    /// coins and currencies involved.
    pub async fn current_prices(&self, pairs: &[Pair]) -> Result<Vec<f64>> {
        if pairs.is_empty() {
            return Ok(Vec::new());
        }

        let entries: Vec<[&str; 2]> = pairs.iter().map(Pair::as_array).collect();
        let (coins, currencies) = split_pairs(&entries)?;

        let coins: Vec<String> = coins.into_iter().sorted().dedup().collect();
        let currencies: Vec<String> = currencies.into_iter().sorted().dedup().collect();

        let params = SimplePriceParams::builder()
            .ids(join_as_list(&Value::from(coins))?)
            .vs_currencies(join_as_list(&Value::from(currencies))?)
            .build();
        let response = self.call::<SimplePrice>(&params).await?;

        pairs
            .iter()
            .map(|pair| {
                let path = || format!("{}.{}", pair.base, pair.quote);

                let value = response
                    .get(&pair.base)
                    .ok_or_else(|| FinapisError::MissingField(pair.base.clone()))?
                    .as_object()
                    .ok_or_else(|| {
                        FinapisError::Parse(format!("{} is not a JSON object", pair.base))
                    })?
                    .get(&pair.quote)
                    .ok_or_else(|| FinapisError::MissingField(path()))?;

                parse_number(value, path)?.ok_or_else(|| FinapisError::MissingField(path()))
            })
            .collect()
    }

    async fn call<M: method::Method>(&self, params: &M::Params) -> Result<M::Response> {
        let url = format!("{}{}", self.config.base_url, M::endpoint(params));
        debug!(url = %url, "requesting CoinGecko");

        let response = self.fetcher.get_json(&url).await?;
        if let Some(message) = M::provider_error(&response) {
            return Err(FinapisError::Provider(message));
        }

        Ok(serde_json::from_value(response)?)
    }
}
