pub mod error;
pub mod fetch;
pub mod pair;
pub mod utils;

pub use error::{FinapisError, Result};
pub use fetch::{HttpFetcher, JsonFetcher};
pub use pair::Pair;
pub use utils::{join_as_list, parse_number, split_pairs};
