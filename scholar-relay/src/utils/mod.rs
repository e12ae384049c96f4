pub mod extract;

pub use extract::{FirstValueQuery, JsonBody};
