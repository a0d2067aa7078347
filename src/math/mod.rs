// src/math/mod.rs
pub mod error;
pub mod types;
pub mod utils;

// Re-exports für einfache Verwendung
pub use error::{GridError, GridResult};
pub use types::*;
