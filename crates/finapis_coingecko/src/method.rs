use serde::de::DeserializeOwned;
use serde_json::Value;

pub trait Method {
    type Params;
    type Response: DeserializeOwned;

    /// Path and query relative to the API base URL.
    fn endpoint(params: &Self::Params) -> String;

    /// Error text the endpoint reports in place of a regular payload, if any.
    fn provider_error(_response: &Value) -> Option<String> {
        None
    }
}
