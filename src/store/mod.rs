mod error;
mod rules;
mod test_cases;

pub use error::StoreError;
pub use rules::{rules_from_json, rules_to_json};
pub use test_cases::{import_test_cases, TestCaseImport};
