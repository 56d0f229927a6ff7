//! Selection of the encoder for a linear or angular unit.
//!
//! Decimal units go through the cached, locale-aware [`DecimalFormatter`];
//! every other unit has its own encoder in [`crate::linear`] or
//! [`crate::angular`].
//!
//! [`DecimalFormatter`]: crate::DecimalFormatter

use crate::angular;
use crate::config::{AngularUnit, LinearUnit};
use crate::decimal::{CacheKey, FormatterCache, NumberSymbols};
use crate::error::Result;
use crate::linear;
use crate::resolve::EffectiveParams;

/// An encoded value together with the decimal separator it was written with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Encoded {
    pub text: String,
    pub decimal_separator: char,
}

impl Encoded {
    fn plain(text: String) -> Self {
        Encoded {
            text,
            decimal_separator: NumberSymbols::EN.decimal,
        }
    }
}

/// Encodes `value` through the decimal formatter cached for `params`.
///
/// # Errors
///
/// Returns [`Error::InvalidNumericInput`](crate::Error::InvalidNumericInput)
/// for non-finite values.
pub fn encode_decimal_cached(
    value: f64,
    params: &EffectiveParams,
    cache: &FormatterCache,
) -> Result<Encoded> {
    let formatter = cache.get_or_create(CacheKey {
        purpose: params.category,
        locale: params.locale.clone(),
        precision: params.precision,
        use_grouping: params.use_grouping,
    });
    Ok(Encoded {
        text: formatter.format(value)?,
        decimal_separator: formatter.symbols().decimal,
    })
}

/// Encodes a linear value in `params.linear_unit`.
///
/// # Errors
///
/// Returns [`Error::InvalidNumericInput`](crate::Error::InvalidNumericInput)
/// for non-finite values.
pub fn encode_linear(
    value: f64,
    params: &EffectiveParams,
    cache: &FormatterCache,
) -> Result<Encoded> {
    let precision = params.precision;
    let suppression = &params.zero_suppression;
    let text = match params.linear_unit {
        LinearUnit::Scientific => linear::scientific(value, precision)?,
        LinearUnit::Engineering => linear::engineering(value, precision, suppression)?,
        LinearUnit::Architectural => linear::architectural(value, precision, suppression)?,
        LinearUnit::Fractional => linear::fractional(value, precision)?,
        LinearUnit::Decimal => return encode_decimal_cached(value, params, cache),
    };
    Ok(Encoded::plain(text))
}

/// Encodes an angle (in degrees) in `params.angular_unit`.
///
/// # Errors
///
/// Returns [`Error::InvalidNumericInput`](crate::Error::InvalidNumericInput)
/// for non-finite values.
pub fn encode_angular(
    degrees: f64,
    params: &EffectiveParams,
    cache: &FormatterCache,
) -> Result<Encoded> {
    let precision = params.precision;
    let text = match params.angular_unit {
        AngularUnit::DegreesMinutesSeconds => angular::dms(degrees, precision)?,
        AngularUnit::Grads => angular::grads(degrees, precision)?,
        AngularUnit::Radians => angular::radians(degrees, precision)?,
        AngularUnit::Surveyor => angular::surveyor(degrees, precision)?,
        AngularUnit::DecimalDegrees => return encode_decimal_cached(degrees, params, cache),
    };
    Ok(Encoded::plain(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Category, FormattingContext, GlobalConfig};
    use crate::resolve::resolve;

    fn params(context: FormattingContext, category: Category) -> EffectiveParams {
        resolve(&GlobalConfig::new(), &context, category, "el").unwrap()
    }

    #[test]
    fn test_linear_dispatch() {
        let cache = FormatterCache::new();
        let decimal = encode_linear(1234.5, &params(FormattingContext::new(), Category::Linear), &cache)
            .unwrap();
        assert_eq!(decimal.text, "1.234,50");
        assert_eq!(decimal.decimal_separator, ',');
        assert_eq!(cache.len(), 1);

        let ctx = FormattingContext::new().with_linear_unit(LinearUnit::Engineering);
        let eng = encode_linear(15.5, &params(ctx, Category::Linear), &cache).unwrap();
        assert_eq!(eng.text, "1'-3.50\"");
        assert_eq!(eng.decimal_separator, '.');
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_angular_dispatch() {
        let cache = FormatterCache::new();
        let ctx = FormattingContext::new().with_locale("en-US");
        let deg = encode_angular(45.5, &params(ctx.clone(), Category::Angular), &cache).unwrap();
        assert_eq!(deg.text, "45.50");

        let ctx = ctx.with_angular_unit(AngularUnit::Surveyor).with_precision(0);
        let bearing = encode_angular(225.0, &params(ctx, Category::Angular), &cache).unwrap();
        assert_eq!(bearing.text, "S 45°0'0\" W");
    }

    #[test]
    fn test_unknown_code_falls_back_to_decimal() {
        let cache = FormatterCache::new();
        let ctx = FormattingContext::new()
            .with_locale("en-US")
            .with_linear_unit(LinearUnit::from_code(99));
        let encoded = encode_linear(2.0, &params(ctx, Category::Linear), &cache).unwrap();
        assert_eq!(encoded.text, "2.00");
    }
}
