use crate::interval::Interval;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use finapis_shared::{FinapisError, Result, parse_number};
use itertools::Itertools;
use polars::prelude::*;
use serde_json::{Map, Value};
use tracing::{debug, warn};

pub const CREATED_AT: &str = "created_at";

const SERIES_KEY_PREFIX: &str = "Time Series";

/// Top-level key the provider uses to report a failed request instead of data.
const ERROR_MESSAGE: &str = "Error Message";
/// Rate-limit and premium notices, sent in place of the series.
const NOTICES: [&str; 2] = ["Note", "Information"];

/// Pulls the time series object out of a raw response.
///
/// The series key embeds request details (`"Time Series (5min)"`), so it is looked up
/// by prefix. Responses without such a key fall back to the second top-level entry,
/// the first one being the metadata block.
pub fn extract_series(response: Value) -> Result<Map<String, Value>> {
    let Value::Object(mut response) = response else {
        return Err(FinapisError::Parse(
            "response body is not a JSON object".to_string(),
        ));
    };

    if let Some(message) = envelope_text(&response, ERROR_MESSAGE) {
        return Err(FinapisError::Provider(message));
    }

    let key = match response.keys().find(|key| key.starts_with(SERIES_KEY_PREFIX)) {
        Some(key) => key.clone(),
        None => {
            if let Some(message) = NOTICES.iter().find_map(|key| envelope_text(&response, key)) {
                return Err(FinapisError::Provider(message));
            }

            let key = response
                .keys()
                .nth(1)
                .cloned()
                .ok_or_else(|| FinapisError::MissingField("time series".to_string()))?;
            warn!(key = %key, "no time series key found, using the second top-level entry");
            key
        }
    };

    match response.remove(&key) {
        Some(Value::Object(series)) => Ok(series),
        Some(_) => Err(FinapisError::Parse(format!("'{key}' is not a JSON object"))),
        None => Err(FinapisError::MissingField(key)),
    }
}

fn envelope_text(response: &Map<String, Value>, key: &str) -> Option<String> {
    response.get(key).map(|value| match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    })
}

/// `"5. adjusted close"` -> `"adjusted_close"`
pub fn column_name(raw: &str) -> String {
    raw.split_whitespace().skip(1).join("_")
}

/// Reshapes a provider time series into the canonical OHLC table: a leading
/// `created_at` epoch-seconds column sorted ascending, then one float column per field.
pub fn normalize(series: &Map<String, Value>, interval: Interval) -> Result<DataFrame> {
    if series.is_empty() {
        return empty_table(interval);
    }

    // (provider key, column name), in order of first appearance
    let mut fields: Vec<(&str, String)> = Vec::new();
    for (key, entry) in series {
        let entry = entry
            .as_object()
            .ok_or_else(|| FinapisError::Parse(format!("entry '{key}' is not a JSON object")))?;

        for raw in entry.keys() {
            if !fields.iter().any(|(known, _)| known == raw) {
                fields.push((raw.as_str(), column_name(raw)));
            }
        }
    }

    let mut rows = series
        .iter()
        .map(|(key, entry)| {
            let created_at = parse_timestamp(key, interval)?;
            let values = fields
                .iter()
                .map(|(raw, _)| {
                    entry
                        .get(*raw)
                        .map_or(Ok(None), |value| {
                            parse_number(value, || format!("'{raw}' of '{key}'"))
                        })
                })
                .collect::<Result<Vec<_>>>()?;

            Ok((created_at, values))
        })
        .collect::<Result<Vec<(i64, Vec<Option<f64>>)>>>()?;

    rows.sort_by_key(|(created_at, _)| *created_at);

    if let Some(pair) = rows.windows(2).find(|pair| pair[0].0 == pair[1].0) {
        return Err(FinapisError::Parse(format!(
            "duplicate timestamp {} in time series",
            pair[0].0
        )));
    }

    let mut columns = Vec::with_capacity(fields.len() + 1);
    columns.push(Column::new(
        CREATED_AT.into(),
        rows.iter().map(|(created_at, _)| *created_at).collect::<Vec<i64>>(),
    ));
    for (idx, (_, name)) in fields.iter().enumerate() {
        columns.push(Column::new(
            name.as_str().into(),
            rows.iter().map(|(_, values)| values[idx]).collect::<Vec<Option<f64>>>(),
        ));
    }

    let frame = DataFrame::new(columns)?;
    debug!(rows = frame.height(), columns = frame.width(), "normalized time series");

    Ok(frame)
}

fn empty_table(interval: Interval) -> Result<DataFrame> {
    let mut columns = vec![Column::new(CREATED_AT.into(), Vec::<i64>::new())];
    columns.extend(
        interval
            .default_columns()
            .iter()
            .map(|name| Column::new((*name).into(), Vec::<Option<f64>>::new())),
    );

    Ok(DataFrame::new(columns)?)
}

fn parse_timestamp(key: &str, interval: Interval) -> Result<i64> {
    let format = interval.timestamp_format();
    let parsed = if interval.is_intraday() {
        NaiveDateTime::parse_from_str(key, format)
    } else {
        NaiveDate::parse_from_str(key, format).map(|date| date.and_time(NaiveTime::MIN))
    };

    parsed
        .map(|datetime| datetime.and_utc().timestamp())
        .map_err(|e| FinapisError::Parse(format!("'{key}' does not match {format}: {e}")))
}
