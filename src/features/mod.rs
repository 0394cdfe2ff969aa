//! Feature modules - Host integration helpers
//!
//! This module contains helpers for editors and other hosts embedding the
//! converter:
//! - Locating the expression before a caret
//! - Detecting math context from document text
//! - Converting in place

pub mod span;

// Re-export commonly used types
pub use span::{convert_at, locate_conversion_span, DocumentMathProbe, SpanConversion};
