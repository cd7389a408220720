use crate::method::Method;
use bon::Builder;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Builder)]
#[builder(on(String, into))]
pub struct SimplePriceParams {
    /// Comma separated coin ids.
    pub ids: String,
    /// Comma separated quote currencies.
    pub vs_currencies: String,
}

/// `{"bitcoin": {"usd": 67187.0, "eur": 61870.0}, ...}`, kept raw so only the
/// requested entries are coerced.
pub type SimplePriceResponse = Map<String, Value>;

pub struct SimplePrice;

impl Method for SimplePrice {
    type Params = SimplePriceParams;
    type Response = SimplePriceResponse;

    fn endpoint(params: &Self::Params) -> String {
        format!(
            "/simple/price?ids={}&vs_currencies={}",
            params.ids, params.vs_currencies
        )
    }
}
