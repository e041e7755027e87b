//! # formlet-core
//!
//! Shared foundation for the formlet form-state engine: the error type
//! distinguishing configuration mistakes from user-input validation
//! failures, and tracing-based logging setup.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result alias
//! - [`logging`] - Tracing-based logging integration

pub mod error;
pub mod logging;

// Re-export the most commonly used types at the crate root.
pub use error::{FormError, FormResult};
