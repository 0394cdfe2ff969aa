//! Conversion inside a host document
//!
//! Editors hand over a document and a caret position. The expression to
//! convert is the run of expression characters ending at the caret;
//! scanning stops at an enclosing `(` so that `see (H2O)` and `f(H2O` both
//! pick `H2O`.

use crate::core::{
    convert_with_diagnostics, Conversion, MathContextProbe, MathOverride, ModeOverride, Options,
};

/// Characters that may appear in an expression
pub fn is_expression_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '(' | ')' | '/' | '.' | '*' | '\\')
}

/// Locate the expression ending at `caret`.
///
/// Returns byte offsets `(start, end)` with `end == caret`. An empty span
/// (`start == end`) means there is nothing to convert. `caret` is clamped to
/// the text length and moved back to a character boundary.
pub fn locate_conversion_span(text: &str, caret: usize) -> (usize, usize) {
    let mut end = caret.min(text.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }

    let mut start = end;
    let mut depth = 0usize;
    for (offset, c) in text[..end].char_indices().rev() {
        if !is_expression_char(c) {
            break;
        }
        match c {
            ')' => depth += 1,
            '(' if depth == 0 => break,
            '(' => depth -= 1,
            _ => {}
        }
        start = offset;
    }

    (start, end)
}

/// Math-context probe that inspects the document text before a position.
///
/// Tracks unescaped `$` (inline) and `$$` (display) as separate toggles,
/// and counts `\(`/`\)` and `\[`/`\]` pairs.
#[derive(Debug, Clone, Copy)]
pub struct DocumentMathProbe<'a> {
    pub text: &'a str,
    pub position: usize,
}

impl<'a> DocumentMathProbe<'a> {
    pub fn new(text: &'a str, position: usize) -> Self {
        Self { text, position }
    }
}

impl MathContextProbe for DocumentMathProbe<'_> {
    fn in_math_context(&self) -> Option<bool> {
        let end = self.position.min(self.text.len());
        let head = self.text.get(..end)?;

        let mut dollar = false;
        let mut display = false;
        let mut bracketed = 0i32;
        let mut chars = head.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some('(') | Some('[') => bracketed += 1,
                    Some(')') | Some(']') => bracketed = (bracketed - 1).max(0),
                    _ => {}
                },
                '$' if chars.peek() == Some(&'$') => {
                    chars.next();
                    display = !display;
                }
                '$' => dollar = !dollar,
                _ => {}
            }
        }

        Some(dollar || display || bracketed > 0)
    }
}

/// A conversion located inside a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanConversion {
    pub start: usize,
    pub end: usize,
    pub conversion: Conversion,
}

impl SpanConversion {
    /// Splice the converted text into `text`
    pub fn apply(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len() + self.conversion.output.len());
        out.push_str(&text[..self.start]);
        out.push_str(&self.conversion.output);
        out.push_str(&text[self.end..]);
        out
    }
}

/// Convert the expression ending at `caret`.
///
/// Math context comes from a [`DocumentMathProbe`] at the start of the span.
/// Returns `None` when there is no expression before the caret.
pub fn convert_at(
    text: &str,
    caret: usize,
    mode: ModeOverride,
    math: MathOverride,
    options: &Options,
) -> Option<SpanConversion> {
    let (start, end) = locate_conversion_span(text, caret);
    if start == end {
        return None;
    }

    let probe = DocumentMathProbe::new(text, start);
    let conversion = convert_with_diagnostics(&text[start..end], mode, math, options, &probe);
    Some(SpanConversion {
        start,
        end,
        conversion,
    })
}
