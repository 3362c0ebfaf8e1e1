//! Error handling.
//!
//! Errors are categorized by the stage that raises them:
//! - **Configuration**: arguments and credentials, raised before network I/O
//! - **Fetch**: one page request; malformed bodies are retried, the rest abort
//! - **Harvest**: anything that aborts a run, wrapping fetch and output failures
//! - **Output**: CSV file creation and writes

mod types;

// Re-export public API
pub use types::{ConfigError, FetchError, HarvestError, InitializationError, OutputError};
