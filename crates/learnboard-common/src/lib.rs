//! # Learnboard Common
//!
//! Shared data model, error type, logging bootstrap and time helpers used by
//! every crate in the learnboard workspace.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod macros;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

// Re-export commonly used types
pub use error::{LearnboardError, Result};
pub use logging::{init_default_logging, init_dev_logging, init_logging, init_prod_logging, LoggingConfig};
pub use types::*;
pub use utils::*;
