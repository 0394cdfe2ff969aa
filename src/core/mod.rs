//! Core conversion modules
//!
//! This module contains the conversion pipeline:
//! - `options`: tunables shared by every stage
//! - `classify`: unit vs. molecule decision
//! - `molecule`: chemical formula formatter
//! - `unit`: magnitude and unit formatter
//! - `math`: adaptation to math or text context
//!
//! # Example
//!
//! ```rust
//! use sciscript::core::{convert, MathOverride, ModeOverride, NoMathContext, Options};
//! use sciscript::ExpressionKind;
//!
//! let options = Options::default();
//! let (out, kind) = convert("H2O", ModeOverride::Auto, MathOverride::Auto, &options, &NoMathContext);
//! assert_eq!(out, "H$_2$O");
//! assert_eq!(kind, ExpressionKind::Molecule);
//! ```

pub mod classify;
pub mod math;
pub mod molecule;
pub mod options;
pub mod unit;

use log::debug;

pub use classify::{classify, ExpressionKind};
pub use math::adapt;
pub use molecule::{format_molecule, Token};
pub use options::{Options, UnitSymbol, DEFAULT_ISOTOPE_LIMIT};
pub use unit::{format_unit, parse_unit, SeparatorKind, UnitExpression, UnitTerm};

use crate::utils::error::{ConversionOutput, ConversionWarning};

/// How to choose the formatter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModeOverride {
    /// Let the classifier decide
    #[default]
    Auto,
    ForceMolecule,
    ForceUnit,
}

/// How to decide whether the result lands inside math
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MathOverride {
    /// Ask the host probe (when `Options::detect_math` is set)
    #[default]
    Auto,
    ForceMath,
}

/// Host predicate telling whether the insertion point is inside math
pub trait MathContextProbe {
    /// `None` when the host cannot tell; treated as `false`
    fn in_math_context(&self) -> Option<bool>;
}

/// Probe for hosts without math detection
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMathContext;

impl MathContextProbe for NoMathContext {
    fn in_math_context(&self) -> Option<bool> {
        None
    }
}

impl<F> MathContextProbe for F
where
    F: Fn() -> bool,
{
    fn in_math_context(&self) -> Option<bool> {
        Some(self())
    }
}

/// Result of a conversion, with the kind used and any warnings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub output: String,
    pub kind: ExpressionKind,
    pub in_math: bool,
    pub warnings: Vec<ConversionWarning>,
}

/// Convert an expression, returning the result and the kind used
pub fn convert(
    raw: &str,
    mode: ModeOverride,
    math: MathOverride,
    options: &Options,
    probe: &dyn MathContextProbe,
) -> (String, ExpressionKind) {
    let conversion = convert_with_diagnostics(raw, mode, math, options, probe);
    (conversion.output, conversion.kind)
}

/// Convert an expression, keeping the warnings produced along the way
pub fn convert_with_diagnostics(
    raw: &str,
    mode: ModeOverride,
    math: MathOverride,
    options: &Options,
    probe: &dyn MathContextProbe,
) -> Conversion {
    let kind = match mode {
        ModeOverride::ForceMolecule => ExpressionKind::Molecule,
        ModeOverride::ForceUnit => ExpressionKind::Unit,
        ModeOverride::Auto => classify(raw, options),
    };

    if raw.is_empty() {
        return Conversion {
            output: String::new(),
            kind,
            in_math: false,
            warnings: Vec::new(),
        };
    }

    let formatted = match kind {
        ExpressionKind::Unit => format_unit(raw, options),
        ExpressionKind::Molecule => ConversionOutput::new(format_molecule(raw, options)),
    };

    let in_math = match math {
        MathOverride::ForceMath => true,
        MathOverride::Auto if options.detect_math => probe.in_math_context().unwrap_or(false),
        MathOverride::Auto => false,
    };

    debug!(
        "converted '{}' as {} (mode {:?}, in_math {})",
        raw, kind, mode, in_math
    );

    Conversion {
        output: adapt(&formatted.content, in_math, options),
        kind,
        in_math,
        warnings: formatted.warnings,
    }
}
