// Public modules
pub mod defaults;
pub mod error;
pub mod fixer;
pub mod local_files;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
