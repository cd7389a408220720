use crate::method::Method;
use bon::Builder;
use finapis_shared::{FinapisError, Result, parse_number};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DATE: &str = "date";

#[derive(Debug, Clone, Builder)]
#[builder(on(String, into))]
pub struct HistoryParams {
    pub coin: String,
    /// `dd-mm-yyyy`
    pub date: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct HistoryResponse {
    pub id: Option<String>,
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub market_data: Option<MarketData>,
}

/// Each field maps quote currency to value. Values are kept raw and coerced on lookup.
#[derive(Serialize, Deserialize, Debug)]
pub struct MarketData {
    pub current_price: Option<Value>,
    pub market_cap: Option<Value>,
    pub total_volume: Option<Value>,
}

impl MarketData {
    pub fn snapshot(&self, currency: &str) -> Result<PriceSnapshot> {
        Ok(PriceSnapshot {
            current_price: lookup(&self.current_price, "current_price", currency)?,
            market_cap: lookup(&self.market_cap, "market_cap", currency)?,
            total_volume: lookup(&self.total_volume, "total_volume", currency)?,
        })
    }
}

fn lookup(values: &Option<Value>, field: &str, currency: &str) -> Result<f64> {
    let path = || format!("market_data.{field}.{currency}");

    let value = values
        .as_ref()
        .ok_or_else(|| FinapisError::MissingField(format!("market_data.{field}")))?
        .as_object()
        .ok_or_else(|| FinapisError::Parse(format!("market_data.{field} is not a JSON object")))?
        .get(currency)
        .ok_or_else(|| FinapisError::MissingField(path()))?;

    parse_number(value, path)?.ok_or_else(|| FinapisError::MissingField(path()))
}

/// Market data of one coin/currency pair on one date.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct PriceSnapshot {
    pub current_price: f64,
    pub market_cap: f64,
    pub total_volume: f64,
}

impl PriceSnapshot {
    pub fn fields(&self) -> [(&'static str, f64); 3] {
        [
            ("current_price", self.current_price),
            ("market_cap", self.market_cap),
            ("total_volume", self.total_volume),
        ]
    }

    pub fn get(&self, field: &str) -> Option<f64> {
        self.fields()
            .into_iter()
            .find(|(name, _)| *name == field)
            .map(|(_, value)| value)
    }

    pub fn field_names() -> [&'static str; 3] {
        ["current_price", "market_cap", "total_volume"]
    }
}

pub struct History;

impl Method for History {
    type Params = HistoryParams;
    type Response = HistoryResponse;

    fn endpoint(params: &Self::Params) -> String {
        format!("/coins/{}/history?date={}", params.coin, params.date)
    }

    fn provider_error(response: &Value) -> Option<String> {
        let (key, value) = response.as_object()?.iter().next()?;
        if key != "error" {
            return None;
        }

        Some(match value {
            Value::String(message) => message.clone(),
            other => other.to_string(),
        })
    }
}

/// Builds the price history table: a `date` column in the order given, then one column
/// per field of `columns`.
pub fn price_history_frame<S: AsRef<str>>(
    dates: &[S],
    columns: &[&str],
    snapshots: &[PriceSnapshot],
) -> Result<DataFrame> {
    let mut frame_columns = Vec::with_capacity(columns.len() + 1);
    frame_columns.push(Column::new(
        DATE.into(),
        dates.iter().map(|date| date.as_ref()).collect::<Vec<&str>>(),
    ));

    for name in columns {
        frame_columns.push(Column::new(
            (*name).into(),
            snapshots
                .iter()
                .map(|snapshot| snapshot.get(name))
                .collect::<Vec<Option<f64>>>(),
        ));
    }

    Ok(DataFrame::new(frame_columns)?)
}
