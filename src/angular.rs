//! Angular unit encoders. Inputs are in degrees.

use crate::config::Precision;
use crate::decimal::to_fixed;
use crate::error::{ensure_finite, Result};

/// Degrees to radians.
#[must_use]
pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees.to_radians()
}

/// Degrees-minutes-seconds: `{d}°{m}'{s}"`, seconds with `precision`
/// fraction digits. The sign applies once to the whole expression.
///
/// # Examples
///
/// ```rust
/// use cad_units::{angular, Precision};
///
/// let p = Precision::new(2).unwrap();
/// assert_eq!(angular::dms(12.375, p).unwrap(), "12°22'30.00\"");
/// assert_eq!(angular::dms(-12.375, p).unwrap(), "-12°22'30.00\"");
/// ```
pub fn dms(degrees: f64, precision: Precision) -> Result<String> {
    let degrees = ensure_finite(degrees)?;
    let sign = if degrees < 0.0 { "-" } else { "" };
    Ok(format!("{sign}{}", dms_body(degrees.abs(), precision)))
}

/// Grads (400 per full circle) with a `g` marker.
///
/// # Examples
///
/// ```rust
/// use cad_units::{angular, Precision};
///
/// assert_eq!(angular::grads(90.0, Precision::new(2).unwrap()).unwrap(), "100.00g");
/// ```
pub fn grads(degrees: f64, precision: Precision) -> Result<String> {
    let degrees = ensure_finite(degrees)?;
    let grads = degrees * 400.0 / 360.0;
    Ok(format!("{}g", to_fixed(grads, precision.get())))
}

/// Radians with an `r` marker.
pub fn radians(degrees: f64, precision: Precision) -> Result<String> {
    let degrees = ensure_finite(degrees)?;
    Ok(format!("{}r", to_fixed(deg_to_rad(degrees), precision.get())))
}

/// Surveyor bearing: `{N|S} {d}°{m}'{s}" {E|W}` with the acute bearing in
/// `[0°, 90°]`.
///
/// # Examples
///
/// ```rust
/// use cad_units::{angular, Precision};
///
/// let p = Precision::new(0).unwrap();
/// assert_eq!(angular::surveyor(135.0, p).unwrap(), "S 45°0'0\" E");
/// assert_eq!(angular::surveyor(-45.0, p).unwrap(), "N 45°0'0\" W");
/// ```
pub fn surveyor(degrees: f64, precision: Precision) -> Result<String> {
    let degrees = ensure_finite(degrees)?;
    let (north_south, bearing, east_west) = quadrant(degrees);
    Ok(format!(
        "{north_south} {} {east_west}",
        dms_body(bearing, precision)
    ))
}

/// Normalizes to `[0, 360)` and splits into `(N|S, bearing, E|W)`.
/// Each branch includes its upper bound.
fn quadrant(degrees: f64) -> (char, f64, char) {
    let angle = ((degrees % 360.0) + 360.0) % 360.0;
    if angle <= 90.0 {
        ('N', angle, 'E')
    } else if angle <= 180.0 {
        ('S', 180.0 - angle, 'E')
    } else if angle <= 270.0 {
        ('S', angle - 180.0, 'W')
    } else {
        ('N', 360.0 - angle, 'W')
    }
}

fn dms_body(abs: f64, precision: Precision) -> String {
    let d = abs.floor();
    let minutes = (abs - d) * 60.0;
    let m = minutes.floor();
    let s = (minutes - m) * 60.0;
    format!("{d}°{m}'{}\"", to_fixed(s, precision.get()))
}
