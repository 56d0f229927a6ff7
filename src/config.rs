//! Configuration types for CAD unit formatting.
//!
//! Settings come in three layers:
//!
//! - [`GlobalConfig`]: the complete, process-wide configuration owned by a
//!   [`FormatRegistry`](crate::FormatRegistry)
//! - [`PartialConfig`]: a sparse update merged over a `GlobalConfig`
//! - [`FormattingContext`]: per-call overrides, never persisted
//!
//! Unit systems are described by [`LinearUnit`] and [`AngularUnit`], and each
//! named output slot carries a [`Template`].
//!
//! ## Examples
//!
//! ```rust
//! use cad_units::{FormattingContext, GlobalConfig, LinearUnit, Template};
//!
//! let config = GlobalConfig::new()
//!     .with_locale("el-GR")
//!     .with_linear_unit(LinearUnit::Architectural);
//! assert_eq!(config.locale, "el-GR");
//!
//! let context = FormattingContext::new()
//!     .with_precision(3)
//!     .with_template(Template::new().with_prefix("R"));
//! assert_eq!(context.precision, Some(3));
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Locale selector that defers to the UI language.
pub const AUTO_LOCALE: &str = "auto";

/// Largest accepted precision (fraction digits, or power-of-two exponent for
/// fractional units).
pub const MAX_PRECISION: u32 = 20;

/// A validated precision.
///
/// Depending on the unit this is either the number of fraction digits or the
/// exponent `n` of a `2^n` fraction denominator.
///
/// # Examples
///
/// ```rust
/// use cad_units::Precision;
///
/// assert_eq!(Precision::new(4).unwrap().get(), 4);
/// assert!(Precision::new(21).is_err());
/// assert!(Precision::try_from(-2_i64).is_err());
/// assert!(Precision::try_from(1.5_f64).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Precision(u32);

impl Precision {
    /// Creates a precision, rejecting values above [`MAX_PRECISION`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPrecision`] when `value > MAX_PRECISION`.
    pub fn new(value: u32) -> Result<Self> {
        if value > MAX_PRECISION {
            return Err(Error::invalid_precision(
                value,
                &format!("precision must not exceed {MAX_PRECISION}"),
            ));
        }
        Ok(Precision(value))
    }

    /// Returns the raw precision value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    const fn of(value: u32) -> Self {
        Precision(value)
    }
}

impl TryFrom<i64> for Precision {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        if value < 0 {
            return Err(Error::invalid_precision(
                value,
                "precision must not be negative",
            ));
        }
        let value = u32::try_from(value).map_err(|_| {
            Error::invalid_precision(value, &format!("precision must not exceed {MAX_PRECISION}"))
        })?;
        Precision::new(value)
    }
}

impl TryFrom<f64> for Precision {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self> {
        if !value.is_finite() || value.fract() != 0.0 {
            return Err(Error::invalid_precision(
                value,
                "precision must be an integer",
            ));
        }
        Precision::try_from(value as i64)
    }
}

impl From<Precision> for i64 {
    fn from(precision: Precision) -> Self {
        i64::from(precision.0)
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kind of quantity being formatted. Selects the default precision and
/// tags cached formatter instances.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Linear,
    Angular,
    Area,
    Coordinate,
}

impl Category {
    /// Returns the lowercase name of this category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Linear => "linear",
            Category::Angular => "angular",
            Category::Area => "area",
            Category::Coordinate => "coordinate",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Linear unit representations, numbered like AutoCAD's `LUNITS`.
///
/// All variants render the same magnitude; Engineering, Architectural and
/// Fractional expect the value in inches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinearUnit {
    Scientific,
    #[default]
    Decimal,
    Engineering,
    Architectural,
    Fractional,
}

impl LinearUnit {
    /// Maps an AutoCAD `LUNITS` code. Unknown codes fall back to
    /// [`LinearUnit::Decimal`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cad_units::LinearUnit;
    ///
    /// assert_eq!(LinearUnit::from_code(4), LinearUnit::Architectural);
    /// assert_eq!(LinearUnit::from_code(42), LinearUnit::Decimal);
    /// ```
    #[must_use]
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => LinearUnit::Scientific,
            2 => LinearUnit::Decimal,
            3 => LinearUnit::Engineering,
            4 => LinearUnit::Architectural,
            5 => LinearUnit::Fractional,
            other => {
                tracing::trace!(code = other, "Unknown linear unit code, using decimal");
                LinearUnit::Decimal
            }
        }
    }

    /// Returns the AutoCAD `LUNITS` code.
    #[must_use]
    pub const fn code(&self) -> i64 {
        match self {
            LinearUnit::Scientific => 1,
            LinearUnit::Decimal => 2,
            LinearUnit::Engineering => 3,
            LinearUnit::Architectural => 4,
            LinearUnit::Fractional => 5,
        }
    }
}

/// Angular unit representations, numbered like AutoCAD's `AUNITS`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AngularUnit {
    #[default]
    DecimalDegrees,
    DegreesMinutesSeconds,
    Grads,
    Radians,
    Surveyor,
}

impl AngularUnit {
    /// Maps an AutoCAD `AUNITS` code. Unknown codes fall back to
    /// [`AngularUnit::DecimalDegrees`].
    #[must_use]
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => AngularUnit::DecimalDegrees,
            1 => AngularUnit::DegreesMinutesSeconds,
            2 => AngularUnit::Grads,
            3 => AngularUnit::Radians,
            4 => AngularUnit::Surveyor,
            other => {
                tracing::trace!(code = other, "Unknown angular unit code, using decimal degrees");
                AngularUnit::DecimalDegrees
            }
        }
    }

    /// Returns the AutoCAD `AUNITS` code.
    #[must_use]
    pub const fn code(&self) -> i64 {
        match self {
            AngularUnit::DecimalDegrees => 0,
            AngularUnit::DegreesMinutesSeconds => 1,
            AngularUnit::Grads => 2,
            AngularUnit::Radians => 3,
            AngularUnit::Surveyor => 4,
        }
    }
}

/// Text wrapped around an encoded value: `prefix + value + symbol + suffix`.
///
/// # Examples
///
/// ```rust
/// use cad_units::Template;
///
/// let template = Template::new().with_prefix("R").with_symbol("\"");
/// assert_eq!(template.apply("42"), "R42\"");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Template {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

impl Template {
    /// Creates an empty template that leaves values untouched.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    #[must_use]
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// Wraps `value` with this template. See [`crate::template::apply`].
    #[must_use]
    pub fn apply(&self, value: &str) -> String {
        crate::template::apply(value, self)
    }
}

/// Named template slots used by the convenience formatters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TemplateSlot {
    Distance,
    Radius,
    Diameter,
    Area,
    Angle,
    Coordinate,
}

/// One [`Template`] per named slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateSet {
    pub distance: Template,
    pub radius: Template,
    pub diameter: Template,
    pub area: Template,
    pub angle: Template,
    pub coordinate: Template,
}

impl Default for TemplateSet {
    fn default() -> Self {
        TemplateSet {
            distance: Template::new(),
            radius: Template::new().with_prefix("R"),
            diameter: Template::new().with_prefix("Ø"),
            area: Template::new().with_suffix(" m²"),
            angle: Template::new().with_symbol("°"),
            coordinate: Template::new(),
        }
    }
}

impl TemplateSet {
    /// Returns the template stored in `slot`.
    #[must_use]
    pub fn get(&self, slot: TemplateSlot) -> &Template {
        match slot {
            TemplateSlot::Distance => &self.distance,
            TemplateSlot::Radius => &self.radius,
            TemplateSlot::Diameter => &self.diameter,
            TemplateSlot::Area => &self.area,
            TemplateSlot::Angle => &self.angle,
            TemplateSlot::Coordinate => &self.coordinate,
        }
    }
}

/// Default precision per [`Category`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrecisionSet {
    pub linear: Precision,
    pub angular: Precision,
    pub area: Precision,
    pub coordinate: Precision,
}

impl Default for PrecisionSet {
    fn default() -> Self {
        PrecisionSet {
            linear: Precision::of(2),
            angular: Precision::of(2),
            area: Precision::of(2),
            coordinate: Precision::of(3),
        }
    }
}

impl PrecisionSet {
    /// Returns the default precision for `category`.
    #[must_use]
    pub const fn get(&self, category: Category) -> Precision {
        match category {
            Category::Linear => self.linear,
            Category::Angular => self.angular,
            Category::Area => self.area,
            Category::Coordinate => self.coordinate,
        }
    }
}

/// Zero-suppression policy.
///
/// The four flags are independent. `enabled` turns on the trailing-zero pass
/// over the composed string, which additionally needs `trailing_zeros`;
/// `zero_feet` and `zero_inches` steer the feet-inches encoders on their own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ZeroSuppression {
    pub enabled: bool,
    pub trailing_zeros: bool,
    pub zero_feet: bool,
    pub zero_inches: bool,
}

impl Default for ZeroSuppression {
    fn default() -> Self {
        ZeroSuppression {
            enabled: false,
            trailing_zeros: true,
            zero_feet: false,
            zero_inches: false,
        }
    }
}

impl ZeroSuppression {
    /// A policy with every flag off.
    #[must_use]
    pub const fn none() -> Self {
        ZeroSuppression {
            enabled: false,
            trailing_zeros: false,
            zero_feet: false,
            zero_inches: false,
        }
    }

    /// Whether the composed string loses its trailing fractional zeros.
    #[must_use]
    pub const fn suppresses_trailing_zeros(&self) -> bool {
        self.enabled && self.trailing_zeros
    }
}

/// The complete global configuration.
///
/// Deserializes from camelCase documents; missing fields take their defaults.
///
/// # Examples
///
/// ```rust
/// use cad_units::{AngularUnit, GlobalConfig};
///
/// let config = GlobalConfig::new();
/// assert_eq!(config.locale, "auto");
/// assert_eq!(config.angular_unit, AngularUnit::DecimalDegrees);
/// assert!(config.use_grouping);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GlobalConfig {
    pub locale: String,
    pub linear_unit: LinearUnit,
    pub angular_unit: AngularUnit,
    pub precision: PrecisionSet,
    pub templates: TemplateSet,
    pub use_grouping: bool,
    pub zero_suppression: ZeroSuppression,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        GlobalConfig {
            locale: AUTO_LOCALE.to_string(),
            linear_unit: LinearUnit::default(),
            angular_unit: AngularUnit::default(),
            precision: PrecisionSet::default(),
            templates: TemplateSet::default(),
            use_grouping: true,
            zero_suppression: ZeroSuppression::default(),
        }
    }
}

impl GlobalConfig {
    /// Creates the built-in default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    #[must_use]
    pub fn with_linear_unit(mut self, unit: LinearUnit) -> Self {
        self.linear_unit = unit;
        self
    }

    #[must_use]
    pub fn with_angular_unit(mut self, unit: AngularUnit) -> Self {
        self.angular_unit = unit;
        self
    }

    #[must_use]
    pub fn with_precision(mut self, category: Category, precision: Precision) -> Self {
        match category {
            Category::Linear => self.precision.linear = precision,
            Category::Angular => self.precision.angular = precision,
            Category::Area => self.precision.area = precision,
            Category::Coordinate => self.precision.coordinate = precision,
        }
        self
    }

    #[must_use]
    pub fn with_templates(mut self, templates: TemplateSet) -> Self {
        self.templates = templates;
        self
    }

    #[must_use]
    pub fn with_grouping(mut self, use_grouping: bool) -> Self {
        self.use_grouping = use_grouping;
        self
    }

    #[must_use]
    pub fn with_zero_suppression(mut self, zero_suppression: ZeroSuppression) -> Self {
        self.zero_suppression = zero_suppression;
        self
    }

    /// Returns a new configuration with `partial` laid over `self`.
    ///
    /// `self` is left untouched. Nested groups merge field by field; a
    /// template given in `partial` replaces the whole slot.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cad_units::{GlobalConfig, PartialConfig, LinearUnit};
    ///
    /// let base = GlobalConfig::new();
    /// let partial = PartialConfig {
    ///     linear_unit: Some(LinearUnit::Engineering),
    ///     ..Default::default()
    /// };
    /// let merged = base.merged(&partial);
    /// assert_eq!(merged.linear_unit, LinearUnit::Engineering);
    /// assert_eq!(merged.locale, base.locale);
    /// ```
    #[must_use]
    pub fn merged(&self, partial: &PartialConfig) -> GlobalConfig {
        let mut next = self.clone();
        if let Some(locale) = &partial.locale {
            next.locale = locale.clone();
        }
        if let Some(unit) = partial.linear_unit {
            next.linear_unit = unit;
        }
        if let Some(unit) = partial.angular_unit {
            next.angular_unit = unit;
        }
        if let Some(precision) = &partial.precision {
            let p = &mut next.precision;
            p.linear = precision.linear.unwrap_or(p.linear);
            p.angular = precision.angular.unwrap_or(p.angular);
            p.area = precision.area.unwrap_or(p.area);
            p.coordinate = precision.coordinate.unwrap_or(p.coordinate);
        }
        if let Some(templates) = &partial.templates {
            let t = &mut next.templates;
            let slots = [
                (&mut t.distance, &templates.distance),
                (&mut t.radius, &templates.radius),
                (&mut t.diameter, &templates.diameter),
                (&mut t.area, &templates.area),
                (&mut t.angle, &templates.angle),
                (&mut t.coordinate, &templates.coordinate),
            ];
            for (slot, replacement) in slots {
                if let Some(replacement) = replacement {
                    *slot = replacement.clone();
                }
            }
        }
        if let Some(use_grouping) = partial.use_grouping {
            next.use_grouping = use_grouping;
        }
        if let Some(zs) = &partial.zero_suppression {
            let z = &mut next.zero_suppression;
            z.enabled = zs.enabled.unwrap_or(z.enabled);
            z.trailing_zeros = zs.trailing_zeros.unwrap_or(z.trailing_zeros);
            z.zero_feet = zs.zero_feet.unwrap_or(z.zero_feet);
            z.zero_inches = zs.zero_inches.unwrap_or(z.zero_inches);
        }
        next
    }
}

/// Sparse precision update.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialPrecision {
    pub linear: Option<Precision>,
    pub angular: Option<Precision>,
    pub area: Option<Precision>,
    pub coordinate: Option<Precision>,
}

/// Sparse template update; each present slot is replaced wholesale.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialTemplates {
    pub distance: Option<Template>,
    pub radius: Option<Template>,
    pub diameter: Option<Template>,
    pub area: Option<Template>,
    pub angle: Option<Template>,
    pub coordinate: Option<Template>,
}

/// Sparse zero-suppression update.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PartialZeroSuppression {
    pub enabled: Option<bool>,
    pub trailing_zeros: Option<bool>,
    pub zero_feet: Option<bool>,
    pub zero_inches: Option<bool>,
}

/// A sparse configuration update. Absent fields keep their current value.
///
/// # Examples
///
/// ```rust
/// use cad_units::PartialConfig;
///
/// let partial: PartialConfig = serde_json::from_str(
///     r#"{ "locale": "el-GR", "precision": { "linear": 3 } }"#,
/// ).unwrap();
/// assert_eq!(partial.locale.as_deref(), Some("el-GR"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PartialConfig {
    pub locale: Option<String>,
    pub linear_unit: Option<LinearUnit>,
    pub angular_unit: Option<AngularUnit>,
    pub precision: Option<PartialPrecision>,
    pub templates: Option<PartialTemplates>,
    pub use_grouping: Option<bool>,
    pub zero_suppression: Option<PartialZeroSuppression>,
}

/// Per-call overrides. Every absent field falls back to the global
/// configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormattingContext {
    pub precision: Option<u32>,
    pub locale: Option<String>,
    pub template: Option<Template>,
    pub linear_unit: Option<LinearUnit>,
    pub angular_unit: Option<AngularUnit>,
    pub suppress_zeros: Option<bool>,
    pub use_grouping: Option<bool>,
}

impl FormattingContext {
    /// Creates an empty context (everything inherited).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = Some(precision);
        self
    }

    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    #[must_use]
    pub fn with_template(mut self, template: Template) -> Self {
        self.template = Some(template);
        self
    }

    #[must_use]
    pub fn with_linear_unit(mut self, unit: LinearUnit) -> Self {
        self.linear_unit = Some(unit);
        self
    }

    #[must_use]
    pub fn with_angular_unit(mut self, unit: AngularUnit) -> Self {
        self.angular_unit = Some(unit);
        self
    }

    #[must_use]
    pub fn with_suppress_zeros(mut self, suppress: bool) -> Self {
        self.suppress_zeros = Some(suppress);
        self
    }

    #[must_use]
    pub fn with_grouping(mut self, use_grouping: bool) -> Self {
        self.use_grouping = Some(use_grouping);
        self
    }
}
