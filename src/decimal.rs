//! Locale-aware decimal encoding and the formatter cache.
//!
//! A [`DecimalFormatter`] always renders exactly `precision` fraction digits
//! (padding with zeros, never "up to"), inserts group separators on request
//! and uses the separator characters of its locale.
//!
//! Formatter instances are shared through a [`FormatterCache`] keyed by
//! [`CacheKey`]. The cache is an optimization only: a cached formatter and a
//! freshly built one always produce identical output.
//!
//! ## Rounding
//!
//! Rounding works on the shortest decimal digits that read back as the same
//! `f64` and resolves ties half away from zero, the way ICU does: `1.005`
//! with two digits renders `1.01`, `0.125` renders `0.13`. The scientific
//! encoder uses the same digits.
//!
//! ## Locales
//!
//! Separator characters and the grouping strategy come from the CLDR data in
//! [`num_format::Locale`]. A tag without its own entry falls back to its
//! language, then to `en`.
//!
//! ## Examples
//!
//! ```rust
//! use cad_units::{encode_decimal, Precision};
//!
//! let p = Precision::new(2).unwrap();
//! assert_eq!(encode_decimal(1234.5, p, "en-US", true).unwrap(), "1,234.50");
//! assert_eq!(encode_decimal(1234.5, p, "el-GR", true).unwrap(), "1.234,50");
//! assert_eq!(encode_decimal(1234.5, p, "en-US", false).unwrap(), "1234.50");
//! ```


use crate::config::{Category, Precision};
use crate::error::{ensure_finite, Result};
use num_format::{Grouping, Locale, ToFormattedString};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace};

/// Looks up the CLDR number locale for a tag such as `"de-CH"` or `"el_GR"`.
///
/// The full tag is tried first, then its language subtag. Anything else
/// resolves to [`Locale::en`].
///
/// # Examples
///
/// ```rust
/// use cad_units::decimal::number_locale;
/// use num_format::Locale;
///
/// assert_eq!(number_locale("de-CH"), Locale::de_CH);
/// assert_eq!(number_locale("it-IT").decimal(), ",");
/// assert_eq!(number_locale("xx-YY"), Locale::en);
/// ```
#[must_use]
pub fn number_locale(tag: &str) -> Locale {
    let normalized = tag.replace('_', "-");
    if let Ok(locale) = Locale::from_name(&normalized) {
        return locale;
    }
    let language = normalized
        .split('-')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    Locale::from_name(&language).unwrap_or_else(|_| {
        trace!(locale = tag, "No number data for locale, using en");
        Locale::en
    })
}

/// Separator characters of a locale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NumberSymbols {
    pub decimal: char,
    pub group: &'static str,
}

impl NumberSymbols {
    pub const EN: NumberSymbols = NumberSymbols {
        decimal: '.',
        group: ",",
    };

    /// Looks up the symbols for a locale tag.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cad_units::NumberSymbols;
    ///
    /// assert_eq!(NumberSymbols::for_locale("el-GR").decimal, ',');
    /// assert_eq!(NumberSymbols::for_locale("it-IT").group, ".");
    /// assert_eq!(NumberSymbols::for_locale("xx-YY"), NumberSymbols::EN);
    /// ```
    #[must_use]
    pub fn for_locale(tag: &str) -> Self {
        Self::of(number_locale(tag))
    }

    fn of(locale: Locale) -> Self {
        NumberSymbols {
            decimal: locale.decimal().chars().next().unwrap_or('.'),
            group: locale.separator(),
        }
    }
}

/// A reusable fixed-precision decimal formatter bound to one locale.
#[derive(Clone, Debug, PartialEq)]
pub struct DecimalFormatter {
    locale: String,
    number_locale: Locale,
    symbols: NumberSymbols,
    precision: Precision,
    use_grouping: bool,
}

impl DecimalFormatter {
    #[must_use]
    pub fn new(locale: &str, precision: Precision, use_grouping: bool) -> Self {
        let number_locale = number_locale(locale);
        DecimalFormatter {
            locale: locale.to_string(),
            number_locale,
            symbols: NumberSymbols::of(number_locale),
            precision,
            use_grouping,
        }
    }

    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    #[must_use]
    pub fn symbols(&self) -> NumberSymbols {
        self.symbols
    }

    #[must_use]
    pub fn precision(&self) -> Precision {
        self.precision
    }

    #[must_use]
    pub fn use_grouping(&self) -> bool {
        self.use_grouping
    }

    /// Formats `value` with exactly `precision` fraction digits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNumericInput`](crate::Error::InvalidNumericInput)
    /// for `NaN` and infinite values.
    pub fn format(&self, value: f64) -> Result<String> {
        let value = ensure_finite(value)?;
        let (int, frac) = fixed_parts(value.abs(), self.precision.get());

        let mut out = String::with_capacity(int.len() + frac.len() + int.len() / 2 + 2);
        if value < 0.0 {
            out.push('-');
        }
        if self.use_grouping {
            out.push_str(&self.group(&int));
        } else {
            out.push_str(&int);
        }
        if !frac.is_empty() {
            out.push(self.symbols.decimal);
            out.push_str(&frac);
        }
        Ok(out)
    }

    fn group(&self, int: &str) -> String {
        match int.parse::<u128>() {
            Ok(n) => n.to_formatted_string(&self.number_locale),
            // past u128 only the digit string is left
            Err(_) => group_digits(
                int,
                self.number_locale.grouping(),
                self.number_locale.separator(),
            ),
        }
    }
}

/// Identity of a cached formatter.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub purpose: Category,
    pub locale: String,
    pub precision: Precision,
    pub use_grouping: bool,
}

/// Thread-safe cache of [`DecimalFormatter`] instances.
#[derive(Debug, Default)]
pub struct FormatterCache {
    entries: Mutex<HashMap<CacheKey, Arc<DecimalFormatter>>>,
}

impl FormatterCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the formatter for `key`, constructing and storing it on a miss.
    pub fn get_or_create(&self, key: CacheKey) -> Arc<DecimalFormatter> {
        let mut entries = self.entries.lock();
        if let Some(formatter) = entries.get(&key) {
            return Arc::clone(formatter);
        }
        debug!(
            purpose = %key.purpose,
            locale = %key.locale,
            precision = %key.precision,
            grouping = key.use_grouping,
            "Constructing decimal formatter"
        );
        let formatter = Arc::new(DecimalFormatter::new(
            &key.locale,
            key.precision,
            key.use_grouping,
        ));
        entries.insert(key, Arc::clone(&formatter));
        formatter
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

/// Formats `value` without going through a cache.
///
/// # Errors
///
/// Returns [`Error::InvalidNumericInput`](crate::Error::InvalidNumericInput)
/// for `NaN` and infinite values.
pub fn encode_decimal(
    value: f64,
    precision: Precision,
    locale: &str,
    use_grouping: bool,
) -> Result<String> {
    DecimalFormatter::new(locale, precision, use_grouping).format(value)
}

/// Plain fixed-point rendering with `.` and no grouping, the way unit
/// encoders print their numeric parts. `value` must be finite.
pub(crate) fn to_fixed(value: f64, precision: u32) -> String {
    let (int, frac) = fixed_parts(value.abs(), precision);
    let sign = if value < 0.0 { "-" } else { "" };
    if frac.is_empty() {
        format!("{sign}{int}")
    } else {
        format!("{sign}{int}.{frac}")
    }
}

/// Shortest round-trip significant digits of a non-negative finite value and
/// the decimal exponent of the first digit: `1234.5` gives `("12345", 3)`.
/// Zero gives `("0", 0)`.
pub(crate) fn shortest_digits(abs: f64) -> (String, i32) {
    let text = format!("{abs:e}");
    let (mantissa, exponent) = text.split_once('e').unwrap_or((text.as_str(), "0"));
    let digits = mantissa.replace('.', "");
    // `{:e}` always prints an integer exponent
    (digits, exponent.parse().unwrap_or_default())
}

/// Keeps the first `keep` digits, rounding half away from zero on the next
/// one. A carry out of the leading digit makes the result one digit longer.
pub(crate) fn round_digits(digits: &str, keep: usize) -> String {
    let bytes = digits.as_bytes();
    if keep >= bytes.len() {
        return format!("{digits:0<keep$}");
    }
    let mut kept = bytes[..keep].to_vec();
    if bytes[keep] >= b'5' {
        let mut carried = true;
        for digit in kept.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carried = false;
                break;
            }
        }
        if carried {
            kept.insert(0, b'1');
        }
    }
    kept.into_iter().map(char::from).collect()
}

/// Splits a non-negative finite value into its rounded integer and fraction
/// digit strings.
fn fixed_parts(abs: f64, precision: u32) -> (String, String) {
    let width = precision as usize;
    let (digits, exponent) = shortest_digits(abs);
    let keep = exponent + 1 + precision as i32;

    let mut scaled = if keep < 0 {
        String::new()
    } else {
        round_digits(&digits, keep as usize)
    };
    if scaled.is_empty() {
        scaled.push('0');
    }
    let scaled = format!("{scaled:0>w$}", w = width + 1);
    let (int, frac) = scaled.split_at(scaled.len() - width);
    (int.to_string(), frac.to_string())
}

fn group_digits(digits: &str, grouping: Grouping, separator: &str) -> String {
    let (first, rest) = match grouping {
        Grouping::Standard => (3, 3),
        Grouping::Indian => (3, 2),
        _ => return digits.to_string(),
    };
    let mut cuts = Vec::new();
    let mut end = digits.len();
    let mut size = first;
    while end > size {
        end -= size;
        cuts.push(end);
        size = rest;
    }

    let mut out = String::with_capacity(digits.len() + cuts.len() * separator.len());
    let mut start = 0;
    for cut in cuts.into_iter().rev() {
        out.push_str(&digits[start..cut]);
        out.push_str(separator);
        start = cut;
    }
    out.push_str(&digits[start..]);
    out
}
