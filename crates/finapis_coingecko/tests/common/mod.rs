use finapis_shared::{JsonFetcher, Result};
use serde_json::Value;
use std::sync::Mutex;

type Responder = Box<dyn Fn(&str) -> Value + Send + Sync>;

/// Answers each request from `respond(url)` and remembers the URLs it saw.
pub struct RecordingFetcher {
    respond: Responder,
    requests: Mutex<Vec<String>>,
}

impl RecordingFetcher {
    pub fn new(respond: impl Fn(&str) -> Value + Send + Sync + 'static) -> Self {
        Self {
            respond: Box::new(respond),
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

        Ok((self.respond)(url))
    }
}
