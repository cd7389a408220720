use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FinapisError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Provider error: {0}")]
    Provider(String),
    #[error("Missing field in response: {0}")]
    MissingField(String),
    #[error("Error parsing value: {0}")]
    Parse(String),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Error decoding response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("DataFrame error: {0}")]
    Frame(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, FinapisError>;
