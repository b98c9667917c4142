//! Stack status synchronization

pub mod compare;
pub mod controller;
pub mod fsm;
pub mod source;

pub use controller::Controller;
pub use fsm::{CheckOutcome, DashboardView, SyncPhase};
pub use source::StatusSource;
