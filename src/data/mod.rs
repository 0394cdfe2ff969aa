//! Data layer - Static tables
//!
//! This module contains the static data used by the formatters:
//! - Built-in unit vocabulary with optional replacement text

pub mod units;

// Re-export commonly used items
pub use units::{builtin_replacement, is_builtin_unit, BUILTIN_UNITS};
