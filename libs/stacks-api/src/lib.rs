//! Wire models shared between the SwarmCD status API and its consumers

pub mod models;

pub use models::StackStatus;
