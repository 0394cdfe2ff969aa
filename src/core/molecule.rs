//! Molecule formatting
//!
//! A molecule is scanned left to right into a flat [`Token`] sequence and
//! rendered with `$...$` escaped scripts. Numbers are the ambiguous part:
//! a number is either a stoichiometric count (subscript) or an isotope mass
//! number (superscript).
//!
//! | Situation                                   | Rendering   |
//! |---------------------------------------------|-------------|
//! | number opens the formula (`18O`)            | superscript |
//! | number directly followed by `.` (`C18.H`)   | subscript   |
//! | number directly after a `.` (`H2.18O`)      | superscript |
//! | number `>= isotope_limit` (`C18O`)          | superscript |
//! | anything else (`H2O`)                       | subscript   |

use super::options::Options;

/// Prefixes naming spin isomers, matched only at the start of a formula
const ISOMER_PREFIXES: &[&str] = &["ortho-", "Ortho-", "para-", "Para-", "o-", "p-"];

/// A molecule token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Run of letters (one or more element symbols), or a leading isomer prefix
    ElementRun(String),
    /// Run of `+`/`-` characters
    ChargeRun(String),
    /// Run of digits with its numeric value (saturating on overflow)
    NumberRun(String, u64),
    /// Literal space, never rendered
    Separator,
    /// Literal `.`: disambiguates the script of a neighbouring number
    Dot,
    /// Any other character, passed through
    Literal(char),
}

impl Token {
    fn is_script(&self) -> bool {
        matches!(self, Token::NumberRun(..) | Token::ChargeRun(_))
    }
}

/// Split a molecule into tokens.
///
/// Matchers are tried in a fixed priority order at each position; the
/// first one that applies consumes its longest match.
pub fn tokenize(raw: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut rest = raw;

    if let Some(prefix) = ISOMER_PREFIXES.iter().find(|p| raw.starts_with(**p)) {
        tokens.push(Token::ElementRun((*prefix).to_string()));
        rest = &raw[prefix.len()..];
    }

    while let Some(c) = rest.chars().next() {
        let (token, len) = if c.is_ascii_alphabetic() {
            let run = take_while(rest, |c| c.is_ascii_alphabetic());
            (Token::ElementRun(run.to_string()), run.len())
        } else if c == '+' || c == '-' {
            let run = take_while(rest, |c| c == '+' || c == '-');
            (Token::ChargeRun(run.to_string()), run.len())
        } else if c.is_ascii_digit() {
            let run = take_while(rest, |c| c.is_ascii_digit());
            let value = run.parse::<u64>().unwrap_or(u64::MAX);
            (Token::NumberRun(run.to_string(), value), run.len())
        } else if c == ' ' {
            (Token::Separator, 1)
        } else if c == '.' {
            (Token::Dot, 1)
        } else {
            (Token::Literal(c), c.len_utf8())
        };
        tokens.push(token);
        rest = &rest[len..];
    }

    tokens
}

fn take_while(s: &str, pred: impl Fn(char) -> bool) -> &str {
    let end = s.find(|c: char| !pred(c)).unwrap_or(s.len());
    &s[..end]
}

/// Format a molecule into its `$`-escaped intermediate form.
///
/// An exact key of the exception table returns the mapped text unchanged.
pub fn format_molecule(raw: &str, options: &Options) -> String {
    if let Some(output) = options.exception(raw) {
        return output.to_string();
    }

    let tokens = tokenize(raw);
    let mut out = String::with_capacity(raw.len() * 2);
    let mut emitted_any = false;
    let mut after_dot = false;

    for (i, token) in tokens.iter().enumerate() {
        let next = tokens.get(i + 1);
        match token {
            Token::ElementRun(text) => out.push_str(text),
            Token::ChargeRun(text) => out.push_str(&script('^', text)),
            Token::NumberRun(text, value) => {
                let before_dot = matches!(next, Some(Token::Dot));
                let superscript = !emitted_any
                    || (!before_dot && (after_dot || *value >= options.isotope_limit));
                let marker = if superscript { '^' } else { '_' };
                out.push_str(&script(marker, text));
            }
            Token::Separator => continue,
            Token::Dot => {
                if next.is_some_and(Token::is_script) {
                    out.push_str("{}");
                }
            }
            Token::Literal(c) => out.push(*c),
        }
        emitted_any = true;
        after_dot = matches!(token, Token::Dot);
    }

    collapse_empty_math(&out)
}

/// Render a script as `$^x$` / `$_x$`, brace-grouping multi-character content
pub(crate) fn script(marker: char, text: &str) -> String {
    if text.chars().count() > 1 {
        format!("${}{{{}}}$", marker, text)
    } else {
        format!("${}{}$", marker, text)
    }
}

/// Remove empty `$$` pairs so back-to-back scripts share one math region
pub(crate) fn collapse_empty_math(s: &str) -> String {
    s.replace("$$", "")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(raw: &str) -> String {
        format_molecule(raw, &Options::default())
    }

    #[test]
    fn test_stoichiometric_subscripts() {
        assert_eq!(fmt("H2O"), "H$_2$O");
        assert_eq!(fmt("CH3OH"), "CH$_3$OH");
        assert_eq!(fmt("C6H12O6"), "C$_6$H$^{12}$O$_6$");
    }

    #[test]
    fn test_isotope_superscripts() {
        assert_eq!(fmt("C18O"), "C$^{18}$O");
        assert_eq!(fmt("18O"), "$^{18}$O");
        assert_eq!(fmt("2H"), "$^2$H");
    }

    #[test]
    fn test_dot_disambiguation() {
        assert_eq!(fmt("H2.18O"), "H$_2${}$^{18}$O");
        assert_eq!(fmt("C18.H"), "C$_{18}$H");
        assert_eq!(fmt("C6H12.O6"), "C$_6$H$_{12}$O$_6$");
        assert_eq!(fmt("CH.3"), "CH{}$^3$");
    }

    #[test]
    fn test_isotope_limit_option() {
        let opts = Options::default().with_isotope_limit(13);
        assert_eq!(format_molecule("C12O", &opts), "C$_{12}$O");
        assert_eq!(format_molecule("C13O", &opts), "C$^{13}$O");
    }

    #[test]
    fn test_charges() {
        assert_eq!(fmt("Na+"), "Na$^+$");
        assert_eq!(fmt("Cl-"), "Cl$^-$");
        assert_eq!(fmt("SO4--"), "SO$_4^{--}$");
        assert_eq!(fmt("NH4+"), "NH$_4^+$");
    }

    #[test]
    fn test_isomer_prefix() {
        assert_eq!(fmt("o-H2"), "o-H$_2$");
        assert_eq!(fmt("para-H2"), "para-H$_2$");
        // only at the start
        assert_eq!(fmt("Ho-H"), "Ho$^-$H");
    }

    #[test]
    fn test_literals_and_spaces() {
        assert_eq!(fmt("Ca(OH)2"), "Ca(OH)$_2$");
        assert_eq!(fmt("H2 O"), "H$_2$O");
        assert_eq!(fmt(""), "");
    }

    #[test]
    fn test_exception_table() {
        let opts = Options::default().with_exception("H2O", "water");
        assert_eq!(format_molecule("H2O", &opts), "water");
        assert_eq!(format_molecule("H2O2", &opts), "H$_2$O$_2$");
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize("H2.18O+"),
            vec![
                Token::ElementRun("H".into()),
                Token::NumberRun("2".into(), 2),
                Token::Dot,
                Token::NumberRun("18".into(), 18),
                Token::ElementRun("O".into()),
                Token::ChargeRun("+".into()),
            ]
        );
        assert_eq!(
            tokenize("p-(x)"),
            vec![
                Token::ElementRun("p-".into()),
                Token::Literal('('),
                Token::ElementRun("x".into()),
                Token::Literal(')'),
            ]
        );
    }

    #[test]
    fn test_huge_number_saturates() {
        assert_eq!(
            fmt("C99999999999999999999999O"),
            "C$^{99999999999999999999999}$O"
        );
    }
}
