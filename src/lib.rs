//! # cad_units
//!
//! CAD-style numeric formatting for lengths, angles, areas and coordinates,
//! following the AutoCAD `rtos()` / `angtos()` output conventions.
//!
//! ## What it does
//!
//! Raw measurements become locale- and unit-aware text. The magnitude never
//! changes; only its textual representation does:
//!
//! | Unit | Example |
//! |------|---------|
//! | Decimal | `1,234.50` / `1.234,50` |
//! | Scientific | `1.55E+1` |
//! | Engineering | `1'-3.50"` |
//! | Architectural | `1'-3 1/2"` |
//! | Fractional | `15 1/2` |
//! | Decimal degrees | `45.50` |
//! | Degrees-minutes-seconds | `45°30'0.00"` |
//! | Grads | `50.00g` |
//! | Radians | `0.79r` |
//! | Surveyor | `N 45°0'0.00" E` |
//!
//! ## Key Features
//!
//! - **Layered configuration**: per-call [`FormattingContext`] overrides on top
//!   of a [`GlobalConfig`]
//! - **Templates**: `prefix + value + symbol + suffix` per named slot
//! - **Zero suppression**: trailing fractional zeros, zero feet, zero inches
//! - **Cached formatters**: locale-aware decimal formatters are built once per
//!   configuration
//! - **Pluggable formatters**: register your own encoders by name
//! - **Thread safe**: a [`FormatRegistry`] can be shared across threads
//!
//! ## Quick Start
//!
//! ```rust
//! use cad_units::{FixedLanguage, FormatRegistry, FormattingContext, LinearUnit, AngularUnit};
//!
//! let registry = FormatRegistry::new().with_language_source(FixedLanguage::new("en"));
//!
//! assert_eq!(registry.format_distance(1234.5, None).unwrap(), "1,234.50");
//! assert_eq!(registry.format_diameter(40.0, Some(0)).unwrap(), "Ø40");
//!
//! let ctx = FormattingContext::new().with_linear_unit(LinearUnit::Engineering);
//! assert_eq!(registry.format_linear(15.5, &ctx).unwrap(), "1'-3.50\"");
//!
//! let ctx = FormattingContext::new()
//!     .with_angular_unit(AngularUnit::Surveyor)
//!     .with_precision(0);
//! assert_eq!(registry.format_angular(225.0, &ctx).unwrap(), "S 45°0'0\" W");
//! ```
//!
//! ### Updating the configuration
//!
//! ```rust
//! use cad_units::{FormatRegistry, PartialConfig};
//!
//! let registry = FormatRegistry::new();
//! let update: PartialConfig = serde_json::from_str(
//!     r#"{ "locale": "el-GR", "zeroSuppression": { "enabled": true } }"#,
//! ).unwrap();
//! registry.update_config(&update);
//!
//! assert_eq!(registry.format_distance(1234.5, None).unwrap(), "1.234,5");
//! ```
//!
//! ## Errors
//!
//! Non-finite input and out-of-range precision are rejected with an
//! [`Error`] before any formatting work happens. Unknown unit codes and
//! missing context fields are not errors; they fall back to the decimal
//! encoder and to the global configuration.
//!
//! ## Logging
//!
//! The crate emits `tracing` events (formatter construction, configuration
//! replacement, custom formatter registration). Install a subscriber to see
//! them.

pub mod angular;
pub mod config;
pub mod decimal;
pub mod dispatch;
pub mod error;
pub mod linear;
pub mod registry;
pub mod resolve;
pub mod suppress;
pub mod template;

pub use config::{
    AngularUnit, Category, FormattingContext, GlobalConfig, LinearUnit, PartialConfig,
    PartialPrecision, PartialTemplates, PartialZeroSuppression, Precision, PrecisionSet,
    Template, TemplateSet, TemplateSlot, ZeroSuppression, AUTO_LOCALE, MAX_PRECISION,
};
pub use decimal::{encode_decimal, CacheKey, DecimalFormatter, FormatterCache, NumberSymbols};
pub use dispatch::Encoded;
pub use error::{Error, Result};
pub use registry::{CustomFormatter, FixedLanguage, FormatRegistry, LanguageSource};
pub use resolve::{resolve, resolve_locale, EffectiveParams};
pub use suppress::{suppress, suppress_with};
