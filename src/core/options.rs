//! Conversion options
//!
//! [`Options`] holds every tunable of a conversion: isotope threshold, unit
//! vocabulary, exception table, unit spacing, and math rendering
//! preferences. A conversion only ever reads it.

use indexmap::IndexMap;

#[cfg(feature = "config-file")]
use serde::{Deserialize, Serialize};

use super::classify::vocabulary_regex;
use crate::data::units::{builtin_replacement, BUILTIN_UNITS};
use crate::utils::error::{ConversionError, ConversionResult};

/// Default threshold at which a bare number becomes an isotope candidate
pub const DEFAULT_ISOTOPE_LIMIT: u64 = 10;

/// A configured unit symbol with optional replacement text
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
pub struct UnitSymbol {
    /// Symbol matched case-sensitively as a whole word
    pub symbol: String,
    /// Text emitted instead of the symbol by the unit formatter
    #[cfg_attr(
        feature = "config-file",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub replacement: Option<String>,
}

impl UnitSymbol {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            replacement: None,
        }
    }

    pub fn with_replacement(symbol: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            replacement: Some(replacement.into()),
        }
    }

    /// Parse `SYM` or `SYM=REPLACEMENT`
    pub fn parse(spec: &str) -> ConversionResult<Self> {
        let unit = match spec.split_once('=') {
            Some((symbol, replacement)) => Self::with_replacement(symbol, replacement),
            None => Self::new(spec),
        };
        if unit.symbol.is_empty() {
            return Err(ConversionError::config_key(
                "units",
                format!("empty unit symbol in '{}'", spec),
            ));
        }
        Ok(unit)
    }
}

/// Options for expression conversion
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(default))]
pub struct Options {
    /// Numbers at or above this value are isotope candidates
    /// Default: 10
    pub isotope_limit: u64,

    /// Union the built-in vocabulary with `units`
    /// Default: true
    pub use_builtin_units: bool,

    /// Text inserted between adjacent unit terms
    /// Default: a single space
    pub space: String,

    /// Render as `\mathrm{...}` even outside math context
    /// Default: false
    pub use_mathrm: bool,

    /// Consult the host's math-context probe
    /// Default: true
    pub detect_math: bool,

    /// Additional unit symbols, in order
    /// Default: empty
    pub units: Vec<UnitSymbol>,

    /// Exact-match overrides: raw expression to literal output
    /// Default: empty
    pub exceptions: IndexMap<String, String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            isotope_limit: DEFAULT_ISOTOPE_LIMIT,
            use_builtin_units: true,
            space: " ".to_string(),
            use_mathrm: false,
            detect_math: true,
            units: Vec::new(),
            exceptions: IndexMap::new(),
        }
    }
}

impl Options {
    /// Create new options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that always produce a single `\mathrm{...}` run
    pub fn mathrm() -> Self {
        Self {
            use_mathrm: true,
            ..Self::default()
        }
    }

    /// Options that never look at the surrounding math context
    pub fn text_only() -> Self {
        Self {
            detect_math: false,
            use_mathrm: false,
            ..Self::default()
        }
    }

    /// Options recognizing only explicitly configured unit symbols
    pub fn without_builtin_units() -> Self {
        Self {
            use_builtin_units: false,
            ..Self::default()
        }
    }

    pub fn with_isotope_limit(mut self, limit: u64) -> Self {
        self.isotope_limit = limit;
        self
    }

    pub fn with_space(mut self, space: impl Into<String>) -> Self {
        self.space = space.into();
        self
    }

    pub fn with_unit(mut self, unit: UnitSymbol) -> Self {
        self.units.push(unit);
        self
    }

    pub fn with_exception(mut self, raw: impl Into<String>, output: impl Into<String>) -> Self {
        self.exceptions.insert(raw.into(), output.into());
        self
    }

    /// Add a unit symbol, rejecting empty symbols
    pub fn add_unit(&mut self, unit: UnitSymbol) -> ConversionResult<()> {
        if unit.symbol.is_empty() {
            return Err(ConversionError::config_key("units", "unit symbol is empty"));
        }
        self.units.push(unit);
        Ok(())
    }

    /// Exact-match lookup in the exception table
    pub fn exception(&self, raw: &str) -> Option<&str> {
        self.exceptions.get(raw).map(String::as_str)
    }

    /// Effective vocabulary: built-ins (if enabled) overlaid by configured symbols.
    ///
    /// Configured replacements win over built-in ones; empty symbols are skipped.
    pub fn vocabulary(&self) -> IndexMap<&str, Option<&str>> {
        let mut vocab: IndexMap<&str, Option<&str>> = IndexMap::new();
        if self.use_builtin_units {
            for (symbol, replacement) in BUILTIN_UNITS.entries() {
                vocab.insert(*symbol, *replacement);
            }
        }
        for unit in self.units.iter().filter(|u| !u.symbol.is_empty()) {
            let entry = vocab.entry(unit.symbol.as_str()).or_insert(None);
            if unit.replacement.is_some() {
                *entry = unit.replacement.as_deref();
            }
        }
        vocab
    }

    /// Replacement text for a unit symbol, if the vocabulary defines one.
    ///
    /// Agrees with [`Options::vocabulary`]: the last configured replacement
    /// wins, then the built-in one.
    pub fn unit_replacement(&self, symbol: &str) -> Option<&str> {
        self.units
            .iter()
            .rev()
            .filter(|u| u.symbol == symbol)
            .find_map(|u| u.replacement.as_deref())
            .or_else(|| {
                self.use_builtin_units
                    .then(|| builtin_replacement(symbol))
                    .flatten()
            })
    }

    /// Check the invariants conversion relies on
    pub fn validate(&self) -> ConversionResult<()> {
        if self.isotope_limit == 0 {
            return Err(ConversionError::config_key(
                "isotope_limit",
                "must be at least 1",
            ));
        }
        if let Some(pos) = self.units.iter().position(|u| u.symbol.is_empty()) {
            return Err(ConversionError::config_key(
                "units",
                format!("entry {} has an empty symbol", pos + 1),
            ));
        }
        if self.exceptions.keys().any(|k| k.is_empty()) {
            return Err(ConversionError::config_key(
                "exceptions",
                "exception keys must not be empty",
            ));
        }
        if let Err(e) = vocabulary_regex(self) {
            return Err(ConversionError::config_key(
                "units",
                format!("unit vocabulary does not compile: {}", e),
            ));
        }
        Ok(())
    }
}

#[cfg(feature = "config-file")]
impl Options {
    /// Parse options from TOML, validating the result
    ///
    /// ```toml
    /// isotope_limit = 20
    /// space = "~"
    ///
    /// [[units]]
    /// symbol = "Msun"
    /// replacement = "M$_\\odot$"
    ///
    /// [exceptions]
    /// "NaCl" = "Na$^+$Cl$^-$"
    /// ```
    pub fn from_toml_str(source: &str) -> ConversionResult<Self> {
        let options: Options =
            toml::from_str(source).map_err(|e| ConversionError::config(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Serialize options to TOML
    pub fn to_toml_string(&self) -> ConversionResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConversionError::internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = Options::default();
        assert_eq!(opts.isotope_limit, 10);
        assert_eq!(opts.space, " ");
        assert!(opts.use_builtin_units);
        assert!(opts.detect_math);
        assert!(!opts.use_mathrm);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_presets() {
        assert!(Options::mathrm().use_mathrm);
        assert!(!Options::text_only().detect_math);
        assert!(!Options::without_builtin_units().use_builtin_units);
    }

    #[test]
    fn test_vocabulary_overlay() {
        let opts = Options::default()
            .with_unit(UnitSymbol::new("furlong"))
            .with_unit(UnitSymbol::with_replacement("m", "metre"));
        let vocab = opts.vocabulary();
        assert!(vocab.contains_key("furlong"));
        assert_eq!(vocab.get("m").copied().flatten(), Some("metre"));
        assert_eq!(opts.unit_replacement("furlong"), None);
    }

    #[test]
    fn test_configured_symbol_keeps_builtin_replacement() {
        let opts = Options::default().with_unit(UnitSymbol::new("Msun"));
        assert_eq!(opts.unit_replacement("Msun"), Some("M$_\\odot$"));
    }

    #[test]
    fn test_unit_replacement_matches_vocabulary() {
        let opts = Options::default()
            .with_unit(UnitSymbol::with_replacement("pc", "parsec"))
            .with_unit(UnitSymbol::new("pc"))
            .with_unit(UnitSymbol::with_replacement("Msun", "M$_\\star$"))
            .with_unit(UnitSymbol::new("Bq"));
        let vocab = opts.vocabulary();
        for symbol in ["pc", "Msun", "Bq", "um", "m", "furlong"] {
            assert_eq!(
                opts.unit_replacement(symbol),
                vocab.get(symbol).copied().flatten(),
                "replacement for '{}'",
                symbol
            );
        }
        assert_eq!(opts.unit_replacement("pc"), Some("parsec"));
        assert_eq!(opts.unit_replacement("Msun"), Some("M$_\\star$"));

        let opts = Options::without_builtin_units();
        assert_eq!(opts.unit_replacement("um"), None);
    }

    #[test]
    fn test_vocabulary_without_builtins() {
        let opts = Options::without_builtin_units().with_unit(UnitSymbol::new("Bq"));
        let vocab = opts.vocabulary();
        assert_eq!(vocab.len(), 1);
        assert!(vocab.contains_key("Bq"));
    }

    #[test]
    fn test_add_unit_rejects_empty() {
        let mut opts = Options::default();
        assert!(opts.add_unit(UnitSymbol::new("")).is_err());
        assert!(opts.add_unit(UnitSymbol::new("Bq")).is_ok());
    }

    #[test]
    fn test_validate() {
        assert!(Options::default().with_isotope_limit(0).validate().is_err());
        assert!(Options::default()
            .with_unit(UnitSymbol::new(""))
            .validate()
            .is_err());
        assert!(Options::default().with_exception("", "x").validate().is_err());
    }

    #[test]
    fn test_unit_symbol_parse() {
        assert_eq!(UnitSymbol::parse("Bq").unwrap(), UnitSymbol::new("Bq"));
        assert_eq!(
            UnitSymbol::parse("Msun=M$_\\odot$").unwrap(),
            UnitSymbol::with_replacement("Msun", "M$_\\odot$")
        );
        assert!(UnitSymbol::parse("=x").is_err());
    }

    #[cfg(feature = "config-file")]
    #[test]
    fn test_toml_round_trip() {
        let source = r#"
isotope_limit = 20
space = "~"

[[units]]
symbol = "furlong"

[exceptions]
"NaCl" = "Na$^+$Cl$^-$"
"#;
        let opts = Options::from_toml_str(source).unwrap();
        assert_eq!(opts.isotope_limit, 20);
        assert_eq!(opts.space, "~");
        assert_eq!(opts.units, vec![UnitSymbol::new("furlong")]);
        assert_eq!(opts.exception("NaCl"), Some("Na$^+$Cl$^-$"));
        assert!(opts.use_builtin_units);

        let again = Options::from_toml_str(&opts.to_toml_string().unwrap()).unwrap();
        assert_eq!(again, opts);
    }

    #[cfg(feature = "config-file")]
    #[test]
    fn test_toml_rejects_invalid() {
        assert!(Options::from_toml_str("isotope_limit = 0").is_err());
        assert!(Options::from_toml_str("isotope_limit = \"ten\"").is_err());
    }
}
