//! WASM bindings for sciscript
//!
//! This module provides JavaScript-accessible functions for browser editors.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "wasm")]
use crate::core::{MathOverride, ModeOverride, NoMathContext, Options, UnitSymbol};

/// Conversion options (exposed to WASM)
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsConvertOptions {
    /// "auto", "molecule" or "unit"
    #[serde(default)]
    pub mode: Option<String>,
    /// Caller knows the text lands inside math
    #[serde(default)]
    pub in_math: bool,
    /// Always render a `\mathrm{...}` run
    #[serde(default)]
    pub use_mathrm: bool,
    #[serde(default = "default_isotope_limit")]
    pub isotope_limit: u64,
    #[serde(default = "default_space")]
    pub space: String,
    #[serde(default = "default_true")]
    pub use_builtin_units: bool,
    /// Extra unit symbols, `SYM` or `SYM=REPLACEMENT`
    #[serde(default)]
    pub units: Vec<String>,
    /// Exact-match overrides
    #[serde(default)]
    pub exceptions: Vec<(String, String)>,
}

#[cfg(feature = "wasm")]
impl Default for JsConvertOptions {
    fn default() -> Self {
        Self {
            mode: None,
            in_math: false,
            use_mathrm: false,
            isotope_limit: default_isotope_limit(),
            space: default_space(),
            use_builtin_units: true,
            units: Vec::new(),
            exceptions: Vec::new(),
        }
    }
}

#[cfg(feature = "wasm")]
fn default_true() -> bool {
    true
}

#[cfg(feature = "wasm")]
fn default_isotope_limit() -> u64 {
    crate::core::DEFAULT_ISOTOPE_LIMIT
}

#[cfg(feature = "wasm")]
fn default_space() -> String {
    " ".to_string()
}

#[cfg(feature = "wasm")]
impl JsConvertOptions {
    fn to_options(&self) -> Result<Options, String> {
        let mut options = Options {
            isotope_limit: self.isotope_limit,
            use_builtin_units: self.use_builtin_units,
            space: self.space.clone(),
            use_mathrm: self.use_mathrm,
            // the page passes `inMath` explicitly
            detect_math: false,
            ..Options::default()
        };
        for spec in &self.units {
            let unit = UnitSymbol::parse(spec).map_err(|e| e.to_string())?;
            options.add_unit(unit).map_err(|e| e.to_string())?;
        }
        for (raw, output) in &self.exceptions {
            options.exceptions.insert(raw.clone(), output.clone());
        }
        options.validate().map_err(|e| e.to_string())?;
        Ok(options)
    }

    fn mode(&self) -> ModeOverride {
        match self.mode.as_deref() {
            Some("molecule") => ModeOverride::ForceMolecule,
            Some("unit") => ModeOverride::ForceUnit,
            _ => ModeOverride::Auto,
        }
    }
}

/// Conversion result with additional metadata
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize)]
pub struct ConvertResult {
    /// The converted output
    pub output: String,
    /// "unit" or "molecule"
    pub kind: String,
    /// Whether the conversion was successful
    pub success: bool,
    /// Error message if the options were rejected
    pub error: Option<String>,
    /// Warnings during conversion
    pub warnings: Vec<String>,
}

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Convert an expression with default options
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "convert")]
pub fn convert_wasm(input: &str) -> String {
    crate::convert(input)
}

/// Convert an expression with options
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "convertWithOptions")]
pub fn convert_with_options_wasm(input: &str, options: JsValue) -> JsValue {
    let opts: JsConvertOptions = serde_wasm_bindgen::from_value(options).unwrap_or_default();

    let result = match opts.to_options() {
        Ok(options) => {
            let math = if opts.in_math {
                MathOverride::ForceMath
            } else {
                MathOverride::Auto
            };
            let conversion = crate::core::convert_with_diagnostics(
                input,
                opts.mode(),
                math,
                &options,
                &NoMathContext,
            );
            ConvertResult {
                output: conversion.output,
                kind: conversion.kind.to_string(),
                success: true,
                error: None,
                warnings: conversion.warnings.iter().map(|w| w.to_string()).collect(),
            }
        }
        Err(error) => ConvertResult {
            output: String::new(),
            kind: String::new(),
            success: false,
            error: Some(error),
            warnings: vec![],
        },
    };

    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

/// Classify an expression ("unit" or "molecule")
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "classify")]
pub fn classify_wasm(input: &str) -> String {
    crate::detect_kind(input).to_string()
}

/// Get version information
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "getVersion")]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Check an expression for potential issues
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "checkExpression")]
pub fn check_expression_wasm(input: &str) -> JsValue {
    use crate::diagnostics::DiagnosticLevel;

    let result = crate::diagnostics::check_expression(input, &Options::default());

    // Group diagnostics by level
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut infos = Vec::new();

    for d in &result.diagnostics {
        match d.level {
            DiagnosticLevel::Error => errors.push(d.message.clone()),
            DiagnosticLevel::Warning => warnings.push(d.message.clone()),
            DiagnosticLevel::Info => infos.push(d.message.clone()),
        }
    }

    let summary = CheckSummary {
        kind: result.kind.to_string(),
        errors,
        warnings,
        infos,
        has_errors: result.has_errors(),
    };
    serde_wasm_bindgen::to_value(&summary).unwrap_or(JsValue::NULL)
}

/// Summary of expression check results
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize)]
pub struct CheckSummary {
    pub kind: String,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub infos: Vec<String>,
    pub has_errors: bool,
}
