//! Configuration loading, validation, and env substitution.
//!
//! Config files: `sitelens.toml`, `sitelens.yaml`, or `sitelens.json`
//! Searched in `./` then `~/.config/sitelens/`.
//!
//! Supports `${ENV_VAR}` substitution in all string values.

pub mod env_subst;
pub mod loader;
pub mod schema;

pub use {
    loader::{config_dir, discover_and_load, find_or_default_config_path, load_config},
    schema::{AnalysisConfig, BrowserConfig, BrowserEnvironment, ServerConfig, SitelensConfig},
};
