//! Linear unit encoders.
//!
//! Engineering, Architectural and Fractional treat the input as inches. No
//! physical unit conversion happens here; only the textual representation
//! changes.

use crate::config::{Precision, ZeroSuppression};
use crate::decimal::{round_digits, shortest_digits, to_fixed};
use crate::error::{ensure_finite, Result};

/// Exponential notation with an upper-case exponent marker.
///
/// # Examples
///
/// ```rust
/// use cad_units::{linear, Precision};
///
/// let p = Precision::new(2).unwrap();
/// assert_eq!(linear::scientific(15.5, p).unwrap(), "1.55E+1");
/// assert_eq!(linear::scientific(-0.00042, p).unwrap(), "-4.20E-4");
/// ```
pub fn scientific(value: f64, precision: Precision) -> Result<String> {
    let value = ensure_finite(value)?;
    let p = precision.get() as usize;
    let sign = if value < 0.0 { "-" } else { "" };

    let (digits, mut exponent) = shortest_digits(value.abs());
    let mut mantissa = round_digits(&digits, p + 1);
    if mantissa.len() > p + 1 {
        // 9.99 -> 10.0: drop the extra digit and move the exponent
        mantissa.truncate(p + 1);
        exponent += 1;
    }

    let (lead, rest) = mantissa.split_at(1);
    let exp_sign = if exponent < 0 { '-' } else { '+' };
    if rest.is_empty() {
        Ok(format!("{sign}{lead}E{exp_sign}{}", exponent.unsigned_abs()))
    } else {
        Ok(format!("{sign}{lead}.{rest}E{exp_sign}{}", exponent.unsigned_abs()))
    }
}

/// Feet and decimal inches: `{feet}'-{inches}"`.
///
/// With zero-feet suppression a value under one foot renders only the inches
/// term; with zero-inches suppression a whole number of feet renders `{feet}'`.
///
/// # Examples
///
/// ```rust
/// use cad_units::{linear, Precision, ZeroSuppression};
///
/// let p = Precision::new(2).unwrap();
/// let none = ZeroSuppression::none();
/// assert_eq!(linear::engineering(15.5, p, &none).unwrap(), "1'-3.50\"");
/// ```
pub fn engineering(value: f64, precision: Precision, suppression: &ZeroSuppression) -> Result<String> {
    let value = ensure_finite(value)?;
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();
    let feet = (abs / 12.0).floor();
    let inches = abs % 12.0;
    let inches_text = to_fixed(inches, precision.get());

    if feet == 0.0 && suppression.zero_feet {
        return Ok(format!("{sign}{inches_text}\""));
    }
    if inches == 0.0 && suppression.zero_inches {
        return Ok(format!("{sign}{feet}'"));
    }
    Ok(format!("{sign}{feet}'-{inches_text}\""))
}

/// Feet, whole inches and a `2^precision` fraction: `{feet}'-{inches} {n}/{d}"`.
///
/// The fraction is not reduced, and is omitted when its numerator rounds to
/// zero.
///
/// # Examples
///
/// ```rust
/// use cad_units::{linear, Precision, ZeroSuppression};
///
/// let p = Precision::new(1).unwrap();
/// let none = ZeroSuppression::none();
/// assert_eq!(linear::architectural(15.5, p, &none).unwrap(), "1'-3 1/2\"");
/// ```
pub fn architectural(
    value: f64,
    precision: Precision,
    suppression: &ZeroSuppression,
) -> Result<String> {
    let value = ensure_finite(value)?;
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();
    let feet = (abs / 12.0).floor();
    let inches = (abs % 12.0).floor();
    let fraction = abs % 1.0;

    let denominator = 1_u64 << precision.get();
    let numerator = (fraction * denominator as f64).round() as u64;
    let fraction_text = if numerator > 0 {
        format!(" {numerator}/{denominator}")
    } else {
        String::new()
    };

    if feet == 0.0 && suppression.zero_feet {
        return Ok(format!("{sign}{inches}{fraction_text}\""));
    }
    if inches == 0.0 && fraction_text.is_empty() && suppression.zero_inches {
        return Ok(format!("{sign}{feet}'"));
    }
    Ok(format!("{sign}{feet}'-{inches}{fraction_text}\""))
}

/// Whole units plus a reduced fraction with denominator `2^max(1, precision)`.
///
/// # Examples
///
/// ```rust
/// use cad_units::{linear, Precision};
///
/// let p = Precision::new(3).unwrap();
/// assert_eq!(linear::fractional(2.75, p).unwrap(), "2 3/4");
/// assert_eq!(linear::fractional(0.125, p).unwrap(), "1/8");
/// assert_eq!(linear::fractional(-4.0, p).unwrap(), "-4");
/// ```
pub fn fractional(value: f64, precision: Precision) -> Result<String> {
    let value = ensure_finite(value)?;
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();
    let whole = abs.floor();
    let fraction = abs % 1.0;

    let denominator = 1_u64 << precision.get().max(1);
    let numerator = (fraction * denominator as f64).round() as u64;
    if numerator == 0 {
        return Ok(format!("{sign}{whole}"));
    }

    let divisor = gcd(numerator, denominator);
    let (numerator, denominator) = (numerator / divisor, denominator / divisor);
    if whole == 0.0 {
        Ok(format!("{sign}{numerator}/{denominator}"))
    } else {
        Ok(format!("{sign}{whole} {numerator}/{denominator}"))
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}
