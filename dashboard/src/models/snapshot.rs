//! Snapshot of stack statuses taken at one poll

use std::ops::Deref;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use stacks_api::StackStatus;

use crate::utils::sha256_hash;

/// An immutable, ordered set of stack statuses as of a single poll
///
/// Cloning is cheap: the records are shared.
#[derive(Debug, Clone)]
pub struct Snapshot {
    records: Arc<[StackStatus]>,
    fetched_at: DateTime<Utc>,
}

impl Snapshot {
    /// Create a snapshot stamped with the current time
    pub fn new(records: Vec<StackStatus>) -> Self {
        Self {
            records: records.into(),
            fetched_at: Utc::now(),
        }
    }

    /// An empty snapshot
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// The records in the order the source returned them
    pub fn records(&self) -> &[StackStatus] {
        &self.records
    }

    /// When this snapshot was fetched
    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    /// Records sorted by name (then by the remaining fields), without
    /// touching the snapshot itself
    pub fn canonical(&self) -> Vec<&StackStatus> {
        let mut sorted: Vec<&StackStatus> = self.records.iter().collect();
        sorted.sort();
        sorted
    }

    /// Content digest, independent of record order
    ///
    /// Two snapshots that compare equal have the same digest.
    pub fn digest(&self) -> String {
        // Serializing plain string fields cannot fail
        let canonical = serde_json::to_vec(&self.canonical()).unwrap_or_default();
        sha256_hash(&canonical)
    }

    /// Names that appear more than once
    pub fn duplicate_names(&self) -> Vec<&str> {
        let sorted = self.canonical();
        let mut duplicates: Vec<&str> = sorted
            .windows(2)
            .filter(|pair| pair[0].name == pair[1].name)
            .map(|pair| pair[0].name.as_str())
            .collect();
        duplicates.dedup();
        duplicates
    }
}

impl Deref for Snapshot {
    type Target = [StackStatus];

    fn deref(&self) -> &Self::Target {
        &self.records
    }
}

impl From<Vec<StackStatus>> for Snapshot {
    fn from(records: Vec<StackStatus>) -> Self {
        Self::new(records)
    }
}

impl Serialize for Snapshot {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.records.iter())
    }
}
