//! Expression classification
//!
//! Decides whether a raw expression is a physical-unit expression or a
//! molecule. First match wins:
//!
//! 1. an exact key of the exception table is a molecule
//! 2. a leading float or exponential magnitude (`2.5`, `3e8`, `1x-3`) is a unit
//! 3. any vocabulary symbol standing as an isolated alphabetic run is a unit
//! 4. everything else is a molecule

use std::fmt;
use std::sync::Mutex;

use lazy_static::lazy_static;
use log::warn;
use regex::Regex;

use super::options::Options;

lazy_static! {
    /// Digits followed by a decimal point or an exponent marker with digits
    static ref LEADING_MAGNITUDE_RE: Regex = Regex::new(r"^[0-9]+(?:\.|[ex][+-]?[0-9]+)").unwrap();

    /// Vocabulary matcher for the default options, built once
    static ref BUILTIN_VOCABULARY_RE: Option<Regex> = vocabulary_regex(&Options::default())
        .unwrap_or_else(|e| {
            warn!("built-in unit vocabulary did not compile: {}", e);
            None
        });

    /// Last custom vocabulary pattern and its compiled matcher
    static ref CUSTOM_VOCABULARY_RE: Mutex<Option<(String, Regex)>> = Mutex::new(None);
}

/// Result of classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExpressionKind {
    /// Physical-unit expression with optional leading magnitude
    Unit,
    /// Chemical formula
    #[default]
    Molecule,
}

impl ExpressionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpressionKind::Unit => "unit",
            ExpressionKind::Molecule => "molecule",
        }
    }
}

impl fmt::Display for ExpressionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a raw expression as a unit expression or a molecule
pub fn classify(raw: &str, options: &Options) -> ExpressionKind {
    if options.exception(raw).is_some() {
        return ExpressionKind::Molecule;
    }

    if LEADING_MAGNITUDE_RE.is_match(raw) {
        return ExpressionKind::Unit;
    }

    if contains_unit_symbol(raw, options) {
        return ExpressionKind::Unit;
    }

    ExpressionKind::Molecule
}

/// Check whether any vocabulary symbol occurs as a whole word in `raw`
pub fn contains_unit_symbol(raw: &str, options: &Options) -> bool {
    if options.use_builtin_units && options.units.is_empty() {
        return BUILTIN_VOCABULARY_RE
            .as_ref()
            .is_some_and(|re| re.is_match(raw));
    }

    let Some(pattern) = vocabulary_pattern(options) else {
        return false;
    };
    match cached_regex(pattern) {
        Ok(re) => re.is_match(raw),
        Err(e) => {
            warn!("unit vocabulary did not compile, '{}' treated as molecule: {}", raw, e);
            false
        }
    }
}

/// Compile `pattern`, reusing the previous matcher when the vocabulary is unchanged
fn cached_regex(pattern: String) -> Result<Regex, regex::Error> {
    let mut cache = CUSTOM_VOCABULARY_RE
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Some((cached, re)) = cache.as_ref() {
        if *cached == pattern {
            return Ok(re.clone());
        }
    }
    let re = Regex::new(&pattern)?;
    *cache = Some((pattern, re.clone()));
    Ok(re)
}

/// Whole-word alternation over the effective vocabulary.
///
/// Each symbol must be bounded by a non-letter or the edge of the input.
/// Returns `None` for an empty vocabulary.
fn vocabulary_pattern(options: &Options) -> Option<String> {
    let vocab = options.vocabulary();
    if vocab.is_empty() {
        return None;
    }

    let mut symbols: Vec<&str> = vocab.keys().copied().collect();
    // longest first so a longer symbol wins over its prefix at the same position
    symbols.sort_by(|a, b| b.len().cmp(&a.len()));
    let alternation = symbols
        .iter()
        .map(|s| regex::escape(s))
        .collect::<Vec<_>>()
        .join("|");

    Some(format!(r"(?:^|[^A-Za-z])(?:{})(?:[^A-Za-z]|$)", alternation))
}

/// Build the vocabulary matcher, `Ok(None)` for an empty vocabulary
pub(crate) fn vocabulary_regex(options: &Options) -> Result<Option<Regex>, regex::Error> {
    vocabulary_pattern(options)
        .map(|pattern| Regex::new(&pattern))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::options::UnitSymbol;

    #[test]
    fn test_molecules() {
        let opts = Options::default();
        assert_eq!(classify("H2O", &opts), ExpressionKind::Molecule);
        assert_eq!(classify("C18O", &opts), ExpressionKind::Molecule);
        assert_eq!(classify("CH3OH", &opts), ExpressionKind::Molecule);
        assert_eq!(classify("SO4--", &opts), ExpressionKind::Molecule);
        assert_eq!(classify("K2O", &opts), ExpressionKind::Molecule);
    }

    #[test]
    fn test_units_from_vocabulary() {
        let opts = Options::default();
        assert_eq!(classify("m2s-2", &opts), ExpressionKind::Unit);
        assert_eq!(classify("erg.cm-2s-1", &opts), ExpressionKind::Unit);
        assert_eq!(classify("10km/s", &opts), ExpressionKind::Unit);
    }

    #[test]
    fn test_leading_magnitude() {
        let opts = Options::without_builtin_units();
        assert_eq!(classify("2.74e-13", &opts), ExpressionKind::Unit);
        assert_eq!(classify("3e8", &opts), ExpressionKind::Unit);
        assert_eq!(classify("5x-3", &opts), ExpressionKind::Unit);
        assert_eq!(classify("1.5", &opts), ExpressionKind::Unit);
        // a bare integer is an isotope prefix, not a magnitude
        assert_eq!(classify("18O", &opts), ExpressionKind::Molecule);
    }

    #[test]
    fn test_whole_word_rule() {
        let opts = Options::default();
        // "s" inside a longer letter run does not count
        assert_eq!(classify("Os", &opts), ExpressionKind::Molecule);
        assert_eq!(classify("Mg", &opts), ExpressionKind::Molecule);
        assert_eq!(classify("Mgs", &opts), ExpressionKind::Molecule);
    }

    #[test]
    fn test_case_sensitive() {
        let opts = Options::default();
        assert_eq!(classify("m", &opts), ExpressionKind::Unit);
        assert_eq!(classify("M", &opts), ExpressionKind::Molecule);
    }

    #[test]
    fn test_exception_wins() {
        let opts = Options::default().with_exception("m2s-2", "m$_2$s$^{-2}$");
        assert_eq!(classify("m2s-2", &opts), ExpressionKind::Molecule);

        let opts = Options::default().with_exception("2.74e-13", "x");
        assert_eq!(classify("2.74e-13", &opts), ExpressionKind::Molecule);
    }

    #[test]
    fn test_configured_units() {
        let opts = Options::default().with_unit(UnitSymbol::new("Bq"));
        assert_eq!(classify("Bq.kg-1", &opts), ExpressionKind::Unit);

        let opts = Options::without_builtin_units();
        assert_eq!(classify("m2s-2", &opts), ExpressionKind::Molecule);
    }

    #[test]
    fn test_custom_vocabularies_alternate() {
        let bq = Options::default().with_unit(UnitSymbol::new("Bq"));
        let ohm = Options::without_builtin_units().with_unit(UnitSymbol::new("ohm"));
        for _ in 0..2 {
            assert!(contains_unit_symbol("Bq.kg-1", &bq));
            assert!(!contains_unit_symbol("Bq.kg-1", &ohm));
            assert!(contains_unit_symbol("ohm.m", &ohm));
            assert!(!contains_unit_symbol("ohm.m", &bq));
        }
    }

    /// Enough distinct long symbols to exceed the compiled regex size limit
    fn oversized_vocabulary() -> Options {
        let mut opts = Options::without_builtin_units();
        for i in 0..200_000u64 {
            let mut x = i;
            let symbol: String = (0..24)
                .map(|_| {
                    x = x
                        .wrapping_mul(6364136223846793005)
                        .wrapping_add(1442695040888963407);
                    (b'a' + ((x >> 33) % 26) as u8) as char
                })
                .collect();
            opts.units.push(UnitSymbol::new(symbol));
        }
        opts
    }

    #[test]
    fn test_oversized_vocabulary_is_reported() {
        let opts = oversized_vocabulary();
        assert!(vocabulary_regex(&opts).is_err());
        assert!(opts.validate().is_err());
        assert_eq!(classify("m2", &opts), ExpressionKind::Molecule);
    }

    #[test]
    fn test_empty_is_molecule() {
        assert_eq!(classify("", &Options::default()), ExpressionKind::Molecule);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ExpressionKind::Unit.to_string(), "unit");
        assert_eq!(ExpressionKind::Molecule.to_string(), "molecule");
    }
}
