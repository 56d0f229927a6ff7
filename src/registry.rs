//! The formatting service.
//!
//! [`FormatRegistry`] owns the global configuration and the formatter cache
//! and runs every public operation through the same pipeline:
//!
//! 1. resolve the effective parameters ([`crate::resolve`])
//! 2. encode with the dispatched unit encoder ([`crate::dispatch`])
//! 3. wrap with the template ([`crate::template`])
//! 4. strip trailing zeros when requested ([`crate::suppress`])
//!
//! The configuration and the cache live together in one immutable snapshot.
//! A format call works against the snapshot it picked up at the start, and
//! [`FormatRegistry::update_config`] swaps in a new snapshot with an empty
//! cache, so no call ever sees a new configuration with an old cache or the
//! reverse.
//!
//! ## Examples
//!
//! ```rust
//! use cad_units::{FixedLanguage, FormatRegistry, FormattingContext, LinearUnit};
//!
//! let registry = FormatRegistry::new().with_language_source(FixedLanguage::new("en"));
//! assert_eq!(registry.format_radius(12.5, None).unwrap(), "R12.50");
//!
//! let ctx = FormattingContext::new().with_linear_unit(LinearUnit::Architectural).with_precision(2);
//! assert_eq!(registry.format_linear(15.25, &ctx).unwrap(), "1'-3 1/4\"");
//! ```

use crate::config::{Category, FormattingContext, GlobalConfig, PartialConfig, TemplateSlot};
use crate::decimal::{CacheKey, DecimalFormatter, FormatterCache, NumberSymbols};
use crate::dispatch::{self, Encoded};
use crate::error::{ensure_finite, Error, Result};
use crate::resolve::{resolve, EffectiveParams};
use crate::suppress::suppress_with;
use crate::template;
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, trace};

/// Supplies the current UI language code (e.g. `"el"`, `"en"`).
pub trait LanguageSource: Send + Sync {
    fn language(&self) -> String;
}

impl<F> LanguageSource for F
where
    F: Fn() -> String + Send + Sync,
{
    fn language(&self) -> String {
        self()
    }
}

/// A language source that always reports the same language.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedLanguage(String);

impl FixedLanguage {
    #[must_use]
    pub fn new(language: impl Into<String>) -> Self {
        FixedLanguage(language.into())
    }
}

impl Default for FixedLanguage {
    fn default() -> Self {
        FixedLanguage::new("en")
    }
}

impl LanguageSource for FixedLanguage {
    fn language(&self) -> String {
        self.0.clone()
    }
}

/// A pluggable encoder registered under a name and a [`Category`].
///
/// Closures of the form `Fn(f64, &EffectiveParams) -> Result<String>`
/// implement this trait.
pub trait CustomFormatter: Send + Sync {
    /// Encodes `value` using the resolved parameters.
    ///
    /// # Errors
    ///
    /// Implementations report their own failures, typically as
    /// [`Error::Custom`].
    fn format(&self, value: f64, params: &EffectiveParams) -> Result<String>;
}

impl<F> CustomFormatter for F
where
    F: Fn(f64, &EffectiveParams) -> Result<String> + Send + Sync,
{
    fn format(&self, value: f64, params: &EffectiveParams) -> Result<String> {
        self(value, params)
    }
}

type FormatterKey = (String, Category);

struct Snapshot {
    config: Arc<GlobalConfig>,
    cache: FormatterCache,
}

impl Snapshot {
    fn new(config: GlobalConfig) -> Self {
        Snapshot {
            config: Arc::new(config),
            cache: FormatterCache::new(),
        }
    }
}

/// Owns the global configuration and the formatter cache, and exposes every
/// formatting operation.
///
/// Construct one per process or session and share it by reference or `Arc`;
/// it is `Send + Sync`.
pub struct FormatRegistry {
    state: RwLock<Arc<Snapshot>>,
    formatters: RwLock<IndexMap<FormatterKey, Arc<dyn CustomFormatter>>>,
    language: Arc<dyn LanguageSource>,
}

impl fmt::Debug for FormatRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.snapshot();
        f.debug_struct("FormatRegistry")
            .field("config", &snapshot.config)
            .field("cached_formatters", &snapshot.cache.len())
            .field("custom_formatters", &self.formatters.read().len())
            .finish()
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatRegistry {
    /// Creates a registry with the built-in default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&PartialConfig::default())
    }

    /// Creates a registry whose configuration is `partial` merged over the
    /// built-in defaults.
    #[must_use]
    pub fn with_config(partial: &PartialConfig) -> Self {
        FormatRegistry {
            state: RwLock::new(Arc::new(Snapshot::new(GlobalConfig::new().merged(partial)))),
            formatters: RwLock::new(IndexMap::new()),
            language: Arc::new(FixedLanguage::default()),
        }
    }

    /// Replaces the UI language source consulted for the `"auto"` locale.
    #[must_use]
    pub fn with_language_source<L: LanguageSource + 'static>(mut self, source: L) -> Self {
        self.language = Arc::new(source);
        self
    }

    fn snapshot(&self) -> Arc<Snapshot> {
        self.state.read().clone()
    }

    /// Returns a read-only snapshot of the current configuration.
    #[must_use]
    pub fn config(&self) -> Arc<GlobalConfig> {
        Arc::clone(&self.snapshot().config)
    }

    /// Merges `partial` into the configuration and starts a fresh formatter
    /// cache. The previous configuration object is never mutated.
    pub fn update_config(&self, partial: &PartialConfig) {
        let mut state = self.state.write();
        let next = state.config.merged(partial);
        debug!(
            locale = %next.locale,
            dropped_formatters = state.cache.len(),
            "Replacing formatting configuration"
        );
        *state = Arc::new(Snapshot::new(next));
    }

    /// Number of formatter instances in the current cache.
    #[must_use]
    pub fn cached_formatters(&self) -> usize {
        self.snapshot().cache.len()
    }

    /// Returns the shared decimal formatter the registry would use for
    /// `purpose` under `context`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPrecision`] for an out-of-range precision.
    pub fn decimal_formatter(
        &self,
        purpose: Category,
        context: &FormattingContext,
    ) -> Result<Arc<DecimalFormatter>> {
        let snapshot = self.snapshot();
        let params = resolve(&snapshot.config, context, purpose, &self.language.language())?;
        Ok(snapshot.cache.get_or_create(CacheKey {
            purpose,
            locale: params.locale,
            precision: params.precision,
            use_grouping: params.use_grouping,
        }))
    }

    /// Formats a length in the resolved linear unit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNumericInput`] for non-finite values and
    /// [`Error::InvalidPrecision`] for an out-of-range precision.
    pub fn format_linear(&self, value: f64, context: &FormattingContext) -> Result<String> {
        self.run(value, Category::Linear, context, None, dispatch::encode_linear)
    }

    /// Formats an angle (in degrees) in the resolved angular unit.
    ///
    /// # Errors
    ///
    /// Same as [`FormatRegistry::format_linear`].
    pub fn format_angular(&self, value: f64, context: &FormattingContext) -> Result<String> {
        self.run(value, Category::Angular, context, None, dispatch::encode_angular)
    }

    /// Formats a plain locale-aware decimal, ignoring unit settings.
    ///
    /// # Errors
    ///
    /// Same as [`FormatRegistry::format_linear`].
    pub fn format_decimal(&self, value: f64, context: &FormattingContext) -> Result<String> {
        self.run(value, Category::Linear, context, None, dispatch::encode_decimal_cached)
    }

    /// Formats a distance with the `distance` template.
    ///
    /// # Errors
    ///
    /// Same as [`FormatRegistry::format_linear`].
    pub fn format_distance(&self, value: f64, precision: Option<u32>) -> Result<String> {
        self.linear_slot(value, precision, TemplateSlot::Distance)
    }

    /// Formats a radius with the `radius` template.
    ///
    /// # Errors
    ///
    /// Same as [`FormatRegistry::format_linear`].
    pub fn format_radius(&self, value: f64, precision: Option<u32>) -> Result<String> {
        self.linear_slot(value, precision, TemplateSlot::Radius)
    }

    /// Formats a diameter with the `diameter` template.
    ///
    /// # Errors
    ///
    /// Same as [`FormatRegistry::format_linear`].
    pub fn format_diameter(&self, value: f64, precision: Option<u32>) -> Result<String> {
        self.linear_slot(value, precision, TemplateSlot::Diameter)
    }

    /// Formats an area as a decimal with the area precision and the `area`
    /// template. Area never uses feet-inches notation.
    ///
    /// # Errors
    ///
    /// Same as [`FormatRegistry::format_linear`].
    pub fn format_area(&self, value: f64, precision: Option<u32>) -> Result<String> {
        let context = precision_context(precision);
        self.run(
            value,
            Category::Area,
            &context,
            Some(TemplateSlot::Area),
            dispatch::encode_decimal_cached,
        )
    }

    /// Formats an angle with the `angle` template.
    ///
    /// # Errors
    ///
    /// Same as [`FormatRegistry::format_linear`].
    pub fn format_angle(&self, value: f64, precision: Option<u32>) -> Result<String> {
        let context = precision_context(precision);
        self.run(
            value,
            Category::Angular,
            &context,
            Some(TemplateSlot::Angle),
            dispatch::encode_angular,
        )
    }

    /// Formats a coordinate component with the coordinate precision and the
    /// `coordinate` template.
    ///
    /// # Errors
    ///
    /// Same as [`FormatRegistry::format_linear`].
    pub fn format_coordinate(&self, value: f64, precision: Option<u32>) -> Result<String> {
        let context = precision_context(precision);
        self.run(
            value,
            Category::Coordinate,
            &context,
            Some(TemplateSlot::Coordinate),
            dispatch::encode_linear,
        )
    }

    /// Formats a ratio as a whole percentage: `round(value * 100)`, with a
    /// `%` sign when `include_symbol` is set. Ties round towards positive
    /// infinity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNumericInput`] for non-finite values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cad_units::FormatRegistry;
    ///
    /// let registry = FormatRegistry::new();
    /// assert_eq!(registry.format_percent(0.125, true).unwrap(), "13%");
    /// assert_eq!(registry.format_percent(1.5, false).unwrap(), "150");
    /// ```
    pub fn format_percent(&self, value: f64, include_symbol: bool) -> Result<String> {
        let value = ensure_finite(value)?;
        let percent = (value * 100.0 + 0.5).floor() + 0.0;
        let percent = ensure_finite(percent)?;
        if include_symbol {
            Ok(format!("{percent}%"))
        } else {
            Ok(format!("{percent}"))
        }
    }

    /// Formats a view scale as a zoom percentage, e.g. `1.25` as `125%`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNumericInput`] for non-finite values.
    pub fn format_zoom(&self, scale: f64) -> Result<String> {
        self.format_percent(scale, true)
    }

    /// Registers `formatter` under `name` for `category`, replacing any
    /// previous registration. Custom formatters survive configuration
    /// updates.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cad_units::{Category, EffectiveParams, FormatRegistry, FormattingContext};
    ///
    /// let registry = FormatRegistry::new();
    /// registry.register_formatter(
    ///     "station",
    ///     Category::Linear,
    ///     |v: f64, _: &EffectiveParams| -> cad_units::Result<String> {
    ///         Ok(format!("{}+{:02}", (v / 100.0).floor(), v % 100.0))
    ///     },
    /// );
    /// let out = registry
    ///     .format_custom("station", Category::Linear, 1234.0, &FormattingContext::new())
    ///     .unwrap();
    /// assert_eq!(out, "12+34");
    /// ```
    pub fn register_formatter<F>(&self, name: &str, category: Category, formatter: F)
    where
        F: CustomFormatter + 'static,
    {
        info!(formatter = name, category = %category, "Registering custom formatter");
        self.formatters
            .write()
            .insert((name.to_string(), category), Arc::new(formatter));
    }

    /// Looks up a custom formatter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownFormatterName`] if nothing is registered under
    /// `name` for `category`.
    pub fn formatter(&self, name: &str, category: Category) -> Result<Arc<dyn CustomFormatter>> {
        trace!(formatter = name, category = %category, "Looking up custom formatter");
        self.formatters
            .read()
            .get(&(name.to_string(), category))
            .cloned()
            .ok_or_else(|| Error::unknown_formatter(name, category))
    }

    /// Registered custom formatters, in registration order.
    #[must_use]
    pub fn formatter_names(&self) -> Vec<(String, Category)> {
        self.formatters.read().keys().cloned().collect()
    }

    /// Formats `value` with a registered custom formatter, then applies the
    /// context template and zero suppression like every other operation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownFormatterName`] for an unregistered name, plus
    /// the errors of [`FormatRegistry::format_linear`] and of the formatter.
    pub fn format_custom(
        &self,
        name: &str,
        category: Category,
        value: f64,
        context: &FormattingContext,
    ) -> Result<String> {
        let formatter = self.formatter(name, category)?;
        self.run(value, category, context, None, |value, params, _| {
            Ok(Encoded {
                text: formatter.format(value, params)?,
                decimal_separator: NumberSymbols::for_locale(&params.locale).decimal,
            })
        })
    }

    fn linear_slot(&self, value: f64, precision: Option<u32>, slot: TemplateSlot) -> Result<String> {
        let context = precision_context(precision);
        self.run(value, Category::Linear, &context, Some(slot), dispatch::encode_linear)
    }

    fn run<E>(
        &self,
        value: f64,
        category: Category,
        context: &FormattingContext,
        slot: Option<TemplateSlot>,
        encode: E,
    ) -> Result<String>
    where
        E: FnOnce(f64, &EffectiveParams, &FormatterCache) -> Result<Encoded>,
    {
        let value = ensure_finite(value)?;
        let snapshot = self.snapshot();
        let mut params = resolve(&snapshot.config, context, category, &self.language.language())?;
        if params.template.is_none() {
            params.template = slot.map(|slot| snapshot.config.templates.get(slot).clone());
        }

        let encoded = encode(value, &params, &snapshot.cache)?;
        let composed = match &params.template {
            Some(t) => template::apply(&encoded.text, t),
            None => encoded.text,
        };
        if params.suppress_zeros {
            Ok(suppress_with(&composed, encoded.decimal_separator))
        } else {
            Ok(composed)
        }
    }
}

fn precision_context(precision: Option<u32>) -> FormattingContext {
    FormattingContext {
        precision,
        ..FormattingContext::default()
    }
}
