//! HTTP access to the SwarmCD status server

pub mod client;
pub mod stacks;
