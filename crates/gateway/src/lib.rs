//! HTTP surface: `GET /analyze?url=` and `GET /health`.
//!
//! Thin routing and validation around the analyzer pipeline; no analysis
//! logic lives here.

pub mod analyze;
pub mod error;
pub mod server;

pub use server::{AppState, build_app, start_server};
