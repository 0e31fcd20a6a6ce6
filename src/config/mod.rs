//! Configuration module
//!
//! Settings for the server endpoint, result display and the updates feed.

pub mod config;

pub use config::Config;
