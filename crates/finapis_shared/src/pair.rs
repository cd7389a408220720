use crate::error::FinapisError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A (base asset, quote currency) market, e.g. `bitcoin/usd`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pair {
    pub base: String,
    pub quote: String,
}

impl Pair {
    pub fn new(base: impl Into<String>, quote: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            quote: quote.into(),
        }
    }

    pub fn as_array(&self) -> [&str; 2] {
        [self.base.as_str(), self.quote.as_str()]
    }
}

impl From<(&str, &str)> for Pair {
    fn from((base, quote): (&str, &str)) -> Self {
        Self::new(base, quote)
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

/// Parses `base:quote` or `base/quote`.
impl FromStr for Pair {
    type Err = FinapisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split([':', '/']).map(str::trim).collect();

        match parts.as_slice() {
            [base, quote] if !base.is_empty() && !quote.is_empty() => Ok(Self::new(*base, *quote)),
            _ => Err(FinapisError::InvalidArgument(format!(
                "'{s}' is not a pair, expected <base>:<quote>"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_separators() {
        assert_eq!("bitcoin:usd".parse::<Pair>().unwrap(), Pair::new("bitcoin", "usd"));
        assert_eq!("ethereum/clp".parse::<Pair>().unwrap(), Pair::new("ethereum", "clp"));
    }

    #[test]
    fn rejects_malformed_pairs() {
        for input in ["bitcoin", "bitcoin:usd:eur", ":usd", "bitcoin:"] {
            assert!(matches!(
                input.parse::<Pair>(),
                Err(FinapisError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn displays_with_slash() {
        assert_eq!(Pair::from(("bitcoin", "usd")).to_string(), "bitcoin/usd");
    }
}
