//! Free-text filtering of stack statuses
//!
//! A record matches when any single field contains the query,
//! case-insensitively. Fields are checked one by one rather than on a
//! joined string, so a query can never match across a field boundary.

use stacks_api::StackStatus;

/// Case-insensitive substring query over all fields of a stack status
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackQuery {
    needle: String,
}

impl StackQuery {
    pub fn new(query: &str) -> Self {
        Self {
            needle: query.to_lowercase(),
        }
    }

    /// Whether the query matches everything
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// Evaluate the query against one record
    pub fn matches(&self, status: &StackStatus) -> bool {
        self.is_empty()
            || status
                .field_values()
                .iter()
                .any(|value| value.to_lowercase().contains(&self.needle))
    }
}

/// Records matching `query`, in input order
pub fn filter_statuses<'a>(records: &'a [StackStatus], query: &str) -> Vec<&'a StackStatus> {
    let query = StackQuery::new(query);
    records.iter().filter(|status| query.matches(status)).collect()
}
