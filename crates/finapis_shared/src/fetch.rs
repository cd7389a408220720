use crate::error::Result;
use reqwest::{Client, ClientBuilder};
use serde_json::Value;
use std::borrow::Cow;
use std::future::Future;
use tracing::debug;

/// The only thing the adapters need from the network: `GET url` decoded as JSON.
pub trait JsonFetcher {
    fn get_json(&self, url: &str) -> impl Future<Output = Result<Value>> + Send;
}

pub struct HttpFetcher {
    reqwest: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let reqwest = ClientBuilder::new().build()?;

        Ok(Self { reqwest })
    }

    pub fn with_client(reqwest: Client) -> Self {
        Self { reqwest }
    }
}

impl JsonFetcher for HttpFetcher {
    async fn get_json(&self, url: &str) -> Result<Value> {
        let response = self.reqwest.get(url).send().await?;
        debug!(status = %response.status(), "received response");
        let response = response.error_for_status()?;

        Ok(response.json().await?)
    }
}

/// Masks the value of an `apikey` query parameter so URLs can be logged.
pub fn redact_api_key(url: &str) -> Cow<'_, str> {
    let Some(start) = url.find("apikey=").map(|idx| idx + "apikey=".len()) else {
        return Cow::Borrowed(url);
    };
    let end = url[start..].find('&').map_or(url.len(), |idx| start + idx);

    Cow::Owned(format!("{}***{}", &url[..start], &url[end..]))
}
