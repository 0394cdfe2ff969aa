//! Math-mode adaptation
//!
//! Formatters produce text with `$...$` escaped script segments, which reads
//! correctly in running text. Inside a math region (or when a single upright
//! run is preferred) the segments are dissolved into one `\mathrm{...}`.

use super::options::Options;

/// Thin space used for literal spaces inside `\mathrm`
pub const MATH_SPACE: &str = "\\,";

/// Adapt a formatted fragment to the surrounding context
pub fn adapt(formatted: &str, in_math: bool, options: &Options) -> String {
    if !in_math && !options.use_mathrm {
        return formatted.to_string();
    }

    let body = strip_math_delimiters(formatted).replace(' ', MATH_SPACE);
    let wrapped = format!("\\mathrm{{{}}}", body);

    if in_math {
        wrapped
    } else {
        format!("${}$", wrapped)
    }
}

/// Remove `$` delimiters from a formatted fragment.
///
/// The closing `$` of a segment that contains a control word becomes `{}`
/// so the control word cannot swallow the letters that follow it
/// (`M$_\odot$pc` must not become `M_\odotpc`). Every other `$` is dropped.
pub fn strip_math_delimiters(formatted: &str) -> String {
    let mut out = String::with_capacity(formatted.len());
    let mut in_segment = false;
    let mut segment_has_macro = false;
    let mut chars = formatted.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '$' => {
                if in_segment && segment_has_macro {
                    out.push_str("{}");
                }
                in_segment = !in_segment;
                segment_has_macro = false;
            }
            '\\' => {
                out.push(c);
                if chars.peek().is_some_and(|n| n.is_ascii_alphabetic()) {
                    segment_has_macro = true;
                }
            }
            _ => out.push(c),
        }
    }

    out
}
