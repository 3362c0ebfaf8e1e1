//! Application configuration and constants.
//!
//! This module provides:
//! - Fixed upstream search parameters and timing constants
//! - CLI option types and the library `Config`
//! - Credential loading from the key-value config file

mod constants;
mod file;
mod types;

// Re-export all constants
pub use constants::*;
pub use file::{load_api_key, read_api_key};
pub use types::{
    Cli, Config, FilterMode, LogFormat, LogLevel, OutputLayout, RetryPolicy, WindowFormat,
};
