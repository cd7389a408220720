use crate::error::{FinapisError, Result};
use serde_json::Value;

/// Splits a list of two-element entries into its first and second elements.
///
/// Every entry must hold exactly two elements, otherwise the shape of the input is
/// reported back as `InvalidArgument`.
pub fn split_pairs<P, S>(pairs: &[P]) -> Result<(Vec<String>, Vec<String>)>
where
    P: AsRef<[S]>,
    S: AsRef<str>,
{
    let mut firsts = Vec::with_capacity(pairs.len());
    let mut seconds = Vec::with_capacity(pairs.len());

    for pair in pairs {
        match pair.as_ref() {
            [first, second] => {
                firsts.push(first.as_ref().to_string());
                seconds.push(second.as_ref().to_string());
            }
            other => {
                return Err(FinapisError::InvalidArgument(format!(
                    "input has dimensions ({}, {}), but must be (?, 2)",
                    pairs.len(),
                    other.len()
                )));
            }
        }
    }

    Ok((firsts, seconds))
}

/// Formats a query parameter value: a string is kept as is, a list of strings is
/// joined with commas.
pub fn join_as_list(value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Array(items) => {
            let items = items
                .iter()
                .map(|item| item.as_str().ok_or_else(|| invalid_list_input(item)))
                .collect::<Result<Vec<_>>>()?;

            Ok(items.join(","))
        }
        other => Err(invalid_list_input(other)),
    }
}

/// Coerces a JSON leaf to a number. Numeric strings are accepted, `null` is a missing
/// value; `context` names the value in the `Parse` error.
pub fn parse_number(value: &Value, context: impl FnOnce() -> String) -> Result<Option<f64>> {
    let parsed = match value {
        Value::Null => return Ok(None),
        Value::Number(number) => number.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(number) => Ok(Some(number)),
        None => Err(FinapisError::Parse(format!(
            "{} is not numeric: {value}",
            context()
        ))),
    }
}

fn invalid_list_input(value: &Value) -> FinapisError {
    FinapisError::InvalidArgument(format!(
        "input must be either a string or a list of strings, instead received {}",
        type_name(value)
    ))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn splits_pairs_into_parallel_lists() {
        let (coins, currencies) = split_pairs(&[["bitcoin", "usd"], ["eth", "usd"]]).unwrap();

        assert_eq!(coins, vec!["bitcoin", "eth"]);
        assert_eq!(currencies, vec!["usd", "usd"]);
    }

    #[test]
    fn split_pairs_of_nothing_is_empty() {
        let empty: [[&str; 2]; 0] = [];
        let (coins, currencies) = split_pairs(&empty).unwrap();

        assert!(coins.is_empty());
        assert!(currencies.is_empty());
    }

    #[test]
    fn split_pairs_reports_the_wrong_shape() {
        let err = split_pairs(&[vec!["a", "b", "c"]]).unwrap_err();

        match err {
            FinapisError::InvalidArgument(message) => assert!(message.contains("(1, 3)")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn split_pairs_rejects_a_single_bad_entry() {
        let pairs = vec![vec!["bitcoin", "usd"], vec!["eth"]];

        assert!(matches!(
            split_pairs(&pairs),
            Err(FinapisError::InvalidArgument(_))
        ));
    }

    #[test]
    fn parses_numbers_and_numeric_strings() {
        assert_eq!(parse_number(&json!(1.5), String::new).unwrap(), Some(1.5));
        assert_eq!(parse_number(&json!(" 42 "), String::new).unwrap(), Some(42.0));
        assert_eq!(parse_number(&json!(null), String::new).unwrap(), None);
    }

    #[test]
    fn parse_number_rejects_other_values() {
        for value in [json!("n/a"), json!(true), json!([1.0]), json!({"usd": 1.0})] {
            match parse_number(&value, || "bitcoin.usd".to_string()) {
                Err(FinapisError::Parse(message)) => assert!(message.starts_with("bitcoin.usd")),
                other => panic!("unexpected result: {other:?}"),
            }
        }
    }

    #[test]
    fn joins_lists_with_commas() {
        assert_eq!(join_as_list(&json!(["a", "b", "c"])).unwrap(), "a,b,c");
    }

    #[test]
    fn keeps_single_strings() {
        assert_eq!(join_as_list(&json!("a")).unwrap(), "a");
    }

    #[test]
    fn rejects_other_types() {
        for value in [json!(5), json!(null), json!({"a": "b"}), json!(["a", 1])] {
            assert!(matches!(
                join_as_list(&value),
                Err(FinapisError::InvalidArgument(_))
            ));
        }
    }
}
