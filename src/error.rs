//! Error types for numeric formatting.
//!
//! Every failure is a local contract violation that is detected before any
//! formatting work starts. Callers either receive a complete string or one of
//! these errors, never a partially formatted value such as `"NaNft"`.
//!
//! ## Error Categories
//!
//! - **Invalid precision**: negative, fractional or out-of-range precision
//! - **Invalid numeric input**: `NaN` or `±Infinity` handed to an encoder
//! - **Unknown formatter**: lookup of a custom formatter that was never registered
//! - **Invalid configuration**: a locale selector that is neither `"auto"` nor a language tag
//!
//! Missing context fields and unrecognized unit codes are *not* errors; they
//! resolve through the documented fallbacks.
//!
//! ## Examples
//!
//! ```rust
//! use cad_units::{Error, Precision};
//!
//! let err = Precision::try_from(-1_i64).unwrap_err();
//! assert!(matches!(err, Error::InvalidPrecision { .. }));
//! assert!(err.to_string().contains("-1"));
//! ```

use crate::config::Category;
use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised while formatting a value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Precision that is negative, not an integer, or above the supported maximum
    #[error("Invalid precision {value}: {reason}")]
    InvalidPrecision { value: String, reason: String },

    /// `NaN` or an infinite value supplied for formatting
    #[error("Invalid numeric input: {0} is not a finite number")]
    InvalidNumericInput(f64),

    /// Custom formatter lookup by a name that was never registered
    #[error("Unknown formatter '{name}' for category {category}")]
    UnknownFormatterName { name: String, category: Category },

    /// Configuration that cannot be applied
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Error raised by a pluggable formatter
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an invalid precision error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cad_units::Error;
    ///
    /// let err = Error::invalid_precision(2.5, "precision must be an integer");
    /// assert!(err.to_string().contains("2.5"));
    /// ```
    pub fn invalid_precision<V: fmt::Display>(value: V, reason: &str) -> Self {
        Error::InvalidPrecision {
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Creates an error for a non-finite input value.
    pub fn non_finite(value: f64) -> Self {
        Error::InvalidNumericInput(value)
    }

    /// Creates an error for a custom formatter that is not registered.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cad_units::{Category, Error};
    ///
    /// let err = Error::unknown_formatter("chainage", Category::Linear);
    /// assert!(err.to_string().contains("'chainage'"));
    /// ```
    pub fn unknown_formatter(name: &str, category: Category) -> Self {
        Error::UnknownFormatterName {
            name: name.to_string(),
            category,
        }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config<T: fmt::Display>(msg: T) -> Self {
        Error::InvalidConfig(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cad_units::Error;
    ///
    /// let err = Error::custom("station out of range");
    /// assert!(err.to_string().contains("station out of range"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

/// Rejects `NaN` and infinite values.
pub(crate) fn ensure_finite(value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::non_finite(value))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_finite() {
        assert_eq!(ensure_finite(1.5), Ok(1.5));
        assert_eq!(ensure_finite(-0.0), Ok(-0.0));
        assert!(matches!(
            ensure_finite(f64::INFINITY),
            Err(Error::InvalidNumericInput(_))
        ));
        assert!(ensure_finite(f64::NAN).is_err());
    }

    #[test]
    fn test_messages() {
        let err = Error::unknown_formatter("station", Category::Coordinate);
        assert_eq!(
            err.to_string(),
            "Unknown formatter 'station' for category coordinate"
        );

        let err = Error::non_finite(f64::NEG_INFINITY);
        assert_eq!(
            err.to_string(),
            "Invalid numeric input: -inf is not a finite number"
        );
    }
}
