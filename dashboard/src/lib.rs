//! SwarmCD Dashboard Library
//!
//! Polls a SwarmCD server for the status of its managed stacks, stages
//! changes until they are explicitly applied, and filters the displayed
//! stacks by free-text search.

pub mod app;
pub mod errors;
pub mod filesys;
pub mod filter;
pub mod http;
pub mod logs;
pub mod models;
pub mod render;
pub mod server;
pub mod settings;
pub mod sync;
pub mod utils;
pub mod workers;
