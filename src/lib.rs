//! # sciscript
//!
//! Typeset-ready sub/superscript markup for short scientific expressions:
//! chemical formulas and physical units, written in plain ASCII.
//!
//! ## Features
//!
//! - **Molecules**: `H2O` → `H$_2$O`, with isotope detection (`C18O` → `C$^{18}$O`)
//! - **Units**: `m2s-2` → `m$^2$ s$^{-2}$`, with exponential magnitudes
//! - **Classification**: automatic unit/molecule decision from a unit vocabulary
//! - **Math Mode**: a single `\mathrm{...}` run inside math regions
//! - **Editor Helpers**: locate and convert the expression before a caret
//! - **WASM Support**: Compiles to WebAssembly for browser editors
//!
//! ## Usage Examples
//!
//! ```rust
//! use sciscript::{convert, convert_with_options, detect_kind, ExpressionKind, Options};
//!
//! assert_eq!(convert("H2O"), "H$_2$O");
//! assert_eq!(convert("2.74e-13"), r"$2.74\times10^{-13}$");
//! assert_eq!(detect_kind("m2s-2"), ExpressionKind::Unit);
//!
//! let options = Options::mathrm();
//! assert_eq!(convert_with_options("H2O", &options), r"$\mathrm{H_2O}$");
//! ```
//!
//! ### Resolving Ambiguous Numbers
//!
//! A `.` after a number forces a subscript, a `.` before it forces a
//! superscript:
//!
//! ```rust
//! use sciscript::convert;
//!
//! assert_eq!(convert("C18.H"), "C$_{18}$H");
//! assert_eq!(convert("H2.18O"), "H$_2${}$^{18}$O");
//! ```

/// Core conversion modules
pub mod core;

/// Data layer - static tables
pub mod data;

/// Feature modules - host integration
pub mod features;

/// Utility modules
pub mod utils;

/// WASM bindings (feature-gated)
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export core conversion API
pub use crate::core::{
    adapt, classify, convert_with_diagnostics, format_molecule, format_unit, Conversion,
    ExpressionKind, MathContextProbe, MathOverride, ModeOverride, NoMathContext, Options,
    UnitSymbol,
};

// Re-export data modules
pub use data::units;

// Re-export feature modules
pub use features::span;
pub use features::{convert_at, locate_conversion_span, DocumentMathProbe, SpanConversion};

// Re-export utilities
pub use utils::diagnostics;
pub use utils::error::{ConversionError, ConversionOutput, ConversionResult, ConversionWarning};

/// Convert an expression with default options
///
/// # Arguments
/// * `input` - Molecule or unit expression
///
/// # Returns
/// Text with `$...$` escaped scripts
pub fn convert(input: &str) -> String {
    convert_with_options(input, &Options::default())
}

/// Convert an expression with custom options
///
/// The kind is chosen by the classifier and no math context is assumed
/// unless `options.use_mathrm` asks for a `\mathrm` run.
pub fn convert_with_options(input: &str, options: &Options) -> String {
    crate::core::convert(
        input,
        ModeOverride::Auto,
        MathOverride::Auto,
        options,
        &NoMathContext,
    )
    .0
}

/// Detect the kind of an expression with default options
pub fn detect_kind(input: &str) -> ExpressionKind {
    classify(input, &Options::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_basic() {
        assert_eq!(convert("H2O"), "H$_2$O");
        assert_eq!(convert("C18O"), "C$^{18}$O");
        assert_eq!(convert("m2s-2"), "m$^2$ s$^{-2}$");
    }

    #[test]
    fn test_convert_with_options() {
        let opts = Options::default().with_exception("NaCl", "Na$^+$Cl$^-$");
        assert_eq!(convert_with_options("NaCl", &opts), "Na$^+$Cl$^-$");

        let opts = Options::mathrm();
        assert_eq!(
            convert_with_options("m2s-2", &opts),
            "$\\mathrm{m^2\\,s^{-2}}$"
        );
    }

    #[test]
    fn test_detect_kind() {
        assert_eq!(detect_kind("H2O"), ExpressionKind::Molecule);
        assert_eq!(detect_kind("2.74e-13"), ExpressionKind::Unit);
        assert_eq!(detect_kind("erg.cm-2s-1"), ExpressionKind::Unit);
    }

    #[test]
    fn test_exception_with_mathrm() {
        let opts = Options::mathrm().with_exception("NaCl", "Na$^+$Cl$^-$");
        assert_eq!(
            convert_with_options("NaCl", &opts),
            "$\\mathrm{Na^+Cl^-}$"
        );
    }
}
