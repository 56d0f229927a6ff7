//! Template composition.

use crate::config::Template;

/// Returns `prefix + value + symbol + suffix`; absent parts are empty.
///
/// # Examples
///
/// ```rust
/// use cad_units::{template, Template};
///
/// let t = Template::new().with_prefix("R").with_symbol("\"");
/// assert_eq!(template::apply("42", &t), "R42\"");
/// ```
#[must_use]
pub fn apply(value: &str, template: &Template) -> String {
    let prefix = template.prefix.as_deref().unwrap_or_default();
    let symbol = template.symbol.as_deref().unwrap_or_default();
    let suffix = template.suffix.as_deref().unwrap_or_default();

    let mut out = String::with_capacity(prefix.len() + value.len() + symbol.len() + suffix.len());
    out.push_str(prefix);
    out.push_str(value);
    out.push_str(symbol);
    out.push_str(suffix);
    out
}
