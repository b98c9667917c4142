//! Data models

pub mod snapshot;

pub use snapshot::Snapshot;
pub use stacks_api::StackStatus;
