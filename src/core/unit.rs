//! Unit formatting
//!
//! A unit expression is an optional leading magnitude followed by a run of
//! unit terms, each an optional separator, a symbol and an optional signed
//! exponent:
//!
//! ```text
//! 2.74e-13 erg . cm-2 s-1
//! ^^^^^^^^ ^^^ ^ ^^^^ ^^^
//! magnitude     term  term
//! ```
//!
//! Text that matches no term stops the scan. It is appended verbatim and
//! reported as a [`ConversionWarning`].

use lazy_static::lazy_static;
use log::warn;
use regex::Regex;

use super::molecule::{collapse_empty_math, script};
use super::options::Options;
use crate::utils::error::{ConversionOutput, ConversionWarning};

lazy_static! {
    /// Optional sign, digits, optional fraction, optional `e`/`x` exponent
    static ref MAGNITUDE_RE: Regex =
        Regex::new(r"^([+-]?[0-9]+(?:\.[0-9]+)?)(?:[ex]([+-]?[0-9]+))?").unwrap();

    /// Optional separator, symbol (optionally a control word, optional `*`), optional exponent
    static ref TERM_RE: Regex =
        Regex::new(r"^([./ ]?)(\\?[A-Za-z]+\*?)([+-]?[0-9]+)?").unwrap();
}

/// Separator preceding a unit term
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeparatorKind {
    None,
    Dot,
    Slash,
    Space,
}

impl SeparatorKind {
    fn from_capture(s: &str) -> Self {
        match s {
            "." => SeparatorKind::Dot,
            "/" => SeparatorKind::Slash,
            " " => SeparatorKind::Space,
            _ => SeparatorKind::None,
        }
    }
}

/// One unit symbol with its separator and exponent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitTerm {
    pub separator: SeparatorKind,
    pub symbol: String,
    pub exponent: Option<String>,
}

/// Leading numeric magnitude
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Magnitude {
    pub mantissa: String,
    pub exponent: Option<String>,
}

impl Magnitude {
    fn render(&self) -> String {
        match &self.exponent {
            Some(exp) => format!("${}\\times10^{{{}}}$", self.mantissa, exp),
            None => self.mantissa.clone(),
        }
    }
}

/// Parsed unit expression
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UnitExpression {
    pub magnitude: Option<Magnitude>,
    pub terms: Vec<UnitTerm>,
    /// Unconsumed trailing input and its byte offset
    pub remainder: Option<(usize, String)>,
}

/// Parse a unit expression into magnitude, terms and unconsumed remainder
pub fn parse_unit(raw: &str) -> UnitExpression {
    let mut expr = UnitExpression::default();
    let mut pos = 0;

    if let Some(caps) = MAGNITUDE_RE.captures(raw) {
        expr.magnitude = Some(Magnitude {
            mantissa: caps[1].to_string(),
            exponent: caps.get(2).map(|m| m.as_str().to_string()),
        });
        pos = caps[0].len();
    }

    // after a magnitude the first term behaves as if it followed a `.`
    let mut synthetic_dot = expr.magnitude.is_some()
        && !raw[pos..].starts_with(['.', '/', ' '])
        && !raw[pos..].is_empty();

    while let Some(caps) = TERM_RE.captures(&raw[pos..]) {
        let mut separator = SeparatorKind::from_capture(&caps[1]);
        if synthetic_dot {
            separator = SeparatorKind::Dot;
            synthetic_dot = false;
        }
        expr.terms.push(UnitTerm {
            separator,
            symbol: caps[2].to_string(),
            exponent: caps.get(3).map(|m| m.as_str().to_string()),
        });
        pos += caps[0].len();
    }

    if pos < raw.len() {
        expr.remainder = Some((pos, raw[pos..].to_string()));
    }

    expr
}

/// Format a unit expression into its `$`-escaped intermediate form
pub fn format_unit(raw: &str, options: &Options) -> ConversionOutput {
    let expr = parse_unit(raw);
    let mut out = String::new();
    let mut warnings = Vec::new();

    if let Some(magnitude) = &expr.magnitude {
        out.push_str(&magnitude.render());
    }

    for term in &expr.terms {
        if !out.is_empty() {
            match term.separator {
                SeparatorKind::Slash => out.push('/'),
                _ => out.push_str(&options.space),
            }
        }
        match options.unit_replacement(&term.symbol) {
            Some(replacement) => out.push_str(replacement),
            None => out.push_str(&term.symbol),
        }
        if let Some(exp) = &term.exponent {
            out.push_str(&script('^', exp));
        }
    }

    if let Some((offset, rest)) = expr.remainder {
        warn!("unit expression '{}' has unconsumed input '{}'", raw, rest);
        out.push_str(&rest);
        warnings.push(
            ConversionWarning::new(format!("unconsumed input '{}' left as-is", rest))
                .at(offset)
                .with_suggestion("check the expression or force molecule mode"),
        );
    }

    ConversionOutput::with_warnings(collapse_empty_math(&out), warnings)
}
