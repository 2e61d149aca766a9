//! Core runtime types
//!
//! This module provides the value union exchanged with generated code, the
//! error types, open options and the entity protocol.

pub mod config;
pub mod error;
pub mod object;
pub mod value;

// Re-export commonly used types
pub use config::{OpenMode, OpenOptions};
pub use error::{DatabaseError, Result};
pub use object::Object;
pub use value::{Value, ValueKind};
