//! Data layer: wire models and the pure results projection.
//!
//! Nothing in here talks to the network or holds session state; the
//! projection derives a view from immutable inputs.

pub mod highlight;
pub mod models;
pub mod results_view;
