use crate::time_series::CREATED_AT;
use finapis_shared::{FinapisError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// One bar of an OHLC table.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OhlcRow {
    pub created_at: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub adjusted_close: Option<f64>,
    pub volume: f64,
}

impl OhlcRow {
    /// Reads the typed rows back out of a table built by [`crate::time_series::normalize`].
    /// `adjusted_close` is only present for daily data.
    pub fn from_frame(frame: &DataFrame) -> Result<Vec<Self>> {
        let created_at = frame
            .column(CREATED_AT)
            .map_err(|_| FinapisError::MissingField(CREATED_AT.to_string()))?
            .i64()?;
        let open = float_column(frame, "open")?;
        let high = float_column(frame, "high")?;
        let low = float_column(frame, "low")?;
        let close = float_column(frame, "close")?;
        let volume = float_column(frame, "volume")?;
        let adjusted_close = match frame.column("adjusted_close") {
            Ok(column) => Some(column.f64()?),
            Err(_) => None,
        };

        (0..frame.height())
            .map(|idx| {
                Ok(Self {
                    created_at: created_at
                        .get(idx)
                        .ok_or_else(|| missing_value(CREATED_AT, idx))?,
                    open: value(open, "open", idx)?,
                    high: value(high, "high", idx)?,
                    low: value(low, "low", idx)?,
                    close: value(close, "close", idx)?,
                    adjusted_close: adjusted_close.and_then(|column| column.get(idx)),
                    volume: value(volume, "volume", idx)?,
                })
            })
            .collect()
    }
}

fn float_column<'a>(frame: &'a DataFrame, name: &str) -> Result<&'a Float64Chunked> {
    let column = frame
        .column(name)
        .map_err(|_| FinapisError::MissingField(name.to_string()))?;

    Ok(column.f64()?)
}

fn value(column: &Float64Chunked, name: &str, idx: usize) -> Result<f64> {
    column.get(idx).ok_or_else(|| missing_value(name, idx))
}

fn missing_value(name: &str, idx: usize) -> FinapisError {
    FinapisError::MissingField(format!("{name} at row {idx}"))
}
