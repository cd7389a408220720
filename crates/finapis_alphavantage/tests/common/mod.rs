use finapis_shared::{JsonFetcher, Result};
use serde_json::Value;
use std::sync::Mutex;

/// Answers every request with the same canned body and remembers the URLs it saw.
pub struct RecordingFetcher {
    body: Value,
    requests: Mutex<Vec<String>>,
}

impl RecordingFetcher {
    pub fn new(body: Value) -> Self {
        Self {
            body,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl JsonFetcher for &RecordingFetcher {
    async fn get_json(&self, url: &str) -> Result<Value> {
        self.requests.lock().unwrap().push(url.to_string());

        Ok(self.body.clone())
    }
}
