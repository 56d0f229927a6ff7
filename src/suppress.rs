//! Trailing-zero suppression on composed strings.
//!
//! Zeros are stripped only when they sit at the very end of the string, after
//! the last decimal separator; a separator left dangling is removed as well.
//! `"100"` is untouched, `"100.50"` becomes `"100.5"` and `"100.00"` becomes
//! `"100"`. A string ending in a symbol or suffix is left as is.
//!
//! Both functions are idempotent.

/// Strips trailing fractional zeros, treating the last `.` or `,` as the
/// decimal separator.
///
/// The pass repeats until the text stops changing, so the result is stable
/// under a second call. On grouped text this also eats whole zero groups:
/// `"100,000.00"` becomes `"100"`, because once the fraction is gone the
/// group separator is the last `,`. Use [`suppress_with`] when the decimal
/// separator is known.
///
/// # Examples
///
/// ```rust
/// use cad_units::{suppress, suppress_with};
///
/// assert_eq!(suppress("100.50"), "100.5");
/// assert_eq!(suppress("100,00"), "100");
/// assert_eq!(suppress("100"), "100");
/// assert_eq!(suppress("100,000.00"), "100");
/// assert_eq!(suppress_with("100,000.00", '.'), "100,000");
/// ```
#[must_use]
pub fn suppress(text: &str) -> String {
    strip_to_fixpoint(text, |c| c == '.' || c == ',')
}

/// Strips trailing fractional zeros after the last `decimal_separator` only.
///
/// Unlike [`suppress`] this never mistakes a group separator for the decimal
/// point, so grouped integers survive.
///
/// # Examples
///
/// ```rust
/// use cad_units::suppress_with;
///
/// assert_eq!(suppress_with("1,000", '.'), "1,000");
/// assert_eq!(suppress_with("1,000.50", '.'), "1,000.5");
/// assert_eq!(suppress_with("1.000,00", ','), "1.000");
/// ```
#[must_use]
pub fn suppress_with(text: &str, decimal_separator: char) -> String {
    strip_to_fixpoint(text, |c| c == decimal_separator)
}

fn strip_to_fixpoint(text: &str, is_separator: impl Fn(char) -> bool) -> String {
    let mut current = text.to_string();
    loop {
        let next = strip_once(&current, &is_separator);
        if next.len() == current.len() {
            return current;
        }
        current = next;
    }
}

fn strip_once(text: &str, is_separator: &impl Fn(char) -> bool) -> String {
    let Some((at, separator)) = text.char_indices().rev().find(|(_, c)| is_separator(*c)) else {
        return text.to_string();
    };
    let head = &text[..at];
    let fraction = text[at + separator.len_utf8()..].trim_end_matches('0');
    if fraction.is_empty() {
        head.to_string()
    } else {
        format!("{head}{separator}{fraction}")
    }
}
