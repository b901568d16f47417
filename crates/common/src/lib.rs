//! Shared error definitions and utilities used across all sitelens crates.

pub mod error;
pub mod validate;

pub use {
    error::{Error, Result, SitelensError},
    validate::validate_analysis_url,
};
