pub mod api_client;
pub mod config;
pub mod data;
pub mod logging;
pub mod session;
pub mod updates;
