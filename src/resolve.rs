//! Resolution of the effective parameters for a single formatting call.
//!
//! Every field is taken from the [`FormattingContext`] when present and from
//! the [`GlobalConfig`] otherwise. Resolution never mutates the global
//! configuration.

use crate::config::{
    AngularUnit, Category, FormattingContext, GlobalConfig, LinearUnit, Precision, Template,
    ZeroSuppression, AUTO_LOCALE,
};
use crate::error::{Error, Result};

/// Locale used for Greek UI languages in `auto` mode.
pub const GREEK_LOCALE: &str = "el-GR";

/// Locale used for every other UI language in `auto` mode.
pub const DEFAULT_LOCALE: &str = "en-US";

/// Parameters in effect for one formatting call.
#[derive(Clone, Debug, PartialEq)]
pub struct EffectiveParams {
    pub category: Category,
    pub precision: Precision,
    /// Concrete locale tag; never `"auto"`.
    pub locale: String,
    pub linear_unit: LinearUnit,
    pub angular_unit: AngularUnit,
    pub template: Option<Template>,
    /// Whether trailing fractional zeros are stripped from the composed text.
    pub suppress_zeros: bool,
    pub use_grouping: bool,
    /// Global suppression policy; the feet-inches encoders read `zero_feet`
    /// and `zero_inches` from it.
    pub zero_suppression: ZeroSuppression,
}

/// Merges `context` over `global` for a value of the given `category`.
///
/// `ui_language` is only consulted when the selected locale is `"auto"`.
///
/// # Errors
///
/// Returns [`Error::InvalidPrecision`] when the context carries a precision
/// above [`MAX_PRECISION`](crate::MAX_PRECISION), and [`Error::InvalidConfig`]
/// when the selected locale is neither `"auto"` nor a language tag.
///
/// # Examples
///
/// ```rust
/// use cad_units::{resolve, Category, FormattingContext, GlobalConfig};
///
/// let global = GlobalConfig::new();
/// let context = FormattingContext::new().with_precision(4);
/// let params = resolve(&global, &context, Category::Area, "el").unwrap();
/// assert_eq!(params.precision.get(), 4);
/// assert_eq!(params.locale, "el-GR");
/// ```
pub fn resolve(
    global: &GlobalConfig,
    context: &FormattingContext,
    category: Category,
    ui_language: &str,
) -> Result<EffectiveParams> {
    let precision = match context.precision {
        Some(precision) => Precision::new(precision)?,
        None => global.precision.get(category),
    };
    let selector = checked_locale(context.locale.as_deref().unwrap_or(&global.locale))?;

    Ok(EffectiveParams {
        category,
        precision,
        locale: resolve_locale(selector, ui_language),
        linear_unit: context.linear_unit.unwrap_or(global.linear_unit),
        angular_unit: context.angular_unit.unwrap_or(global.angular_unit),
        template: context.template.clone(),
        suppress_zeros: context
            .suppress_zeros
            .unwrap_or_else(|| global.zero_suppression.suppresses_trailing_zeros()),
        use_grouping: context.use_grouping.unwrap_or(global.use_grouping),
        zero_suppression: global.zero_suppression,
    })
}

/// Maps a locale selector to a concrete tag.
///
/// Explicit tags pass through unchanged. For `"auto"`, `el` and `el-*` UI
/// languages map to `el-GR`; everything else maps to `en-US`.
///
/// # Examples
///
/// ```rust
/// use cad_units::resolve_locale;
///
/// assert_eq!(resolve_locale("auto", "el"), "el-GR");
/// assert_eq!(resolve_locale("auto", "el-CY"), "el-GR");
/// assert_eq!(resolve_locale("auto", "fr"), "en-US");
/// assert_eq!(resolve_locale("de-DE", "el"), "de-DE");
/// ```
#[must_use]
pub fn resolve_locale(selector: &str, ui_language: &str) -> String {
    if selector != AUTO_LOCALE {
        return selector.to_string();
    }
    let tag = if ui_language == "el" || ui_language.starts_with("el-") {
        GREEK_LOCALE
    } else {
        DEFAULT_LOCALE
    };
    tag.to_string()
}

/// Accepts `"auto"` and tags made of ASCII letters, digits, `-` and `_`
/// that start with a letter.
fn checked_locale(selector: &str) -> Result<&str> {
    let well_formed = selector.starts_with(|c: char| c.is_ascii_alphabetic())
        && selector
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if well_formed {
        Ok(selector)
    } else {
        Err(Error::invalid_config(format!(
            "locale '{selector}' is not a language tag"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PartialConfig;

    #[test]
    fn test_defaults_by_category() {
        let global = GlobalConfig::new();
        let context = FormattingContext::new();

        let linear = resolve(&global, &context, Category::Linear, "en").unwrap();
        assert_eq!(linear.precision.get(), 2);
        assert_eq!(linear.locale, "en-US");
        assert!(linear.use_grouping);
        assert!(!linear.suppress_zeros);
        assert_eq!(linear.template, None);

        let coordinate = resolve(&global, &context, Category::Coordinate, "en").unwrap();
        assert_eq!(coordinate.precision.get(), 3);
    }

    #[test]
    fn test_context_overrides() {
        let global = GlobalConfig::new();
        let context = FormattingContext::new()
            .with_locale("fr-FR")
            .with_linear_unit(LinearUnit::Fractional)
            .with_angular_unit(AngularUnit::Grads)
            .with_suppress_zeros(true)
            .with_grouping(false);

        let params = resolve(&global, &context, Category::Linear, "el").unwrap();
        assert_eq!(params.locale, "fr-FR");
        assert_eq!(params.linear_unit, LinearUnit::Fractional);
        assert_eq!(params.angular_unit, AngularUnit::Grads);
        assert!(params.suppress_zeros);
        assert!(!params.use_grouping);
    }

    #[test]
    fn test_global_suppression_flags() {
        let global = GlobalConfig::new().merged(&PartialConfig {
            zero_suppression: Some(crate::config::PartialZeroSuppression {
                enabled: Some(true),
                zero_feet: Some(true),
                ..Default::default()
            }),
            ..Default::default()
        });
        let params = resolve(&global, &FormattingContext::new(), Category::Linear, "en").unwrap();
        assert!(params.suppress_zeros);
        assert!(params.zero_suppression.zero_feet);

        let params = resolve(
            &global,
            &FormattingContext::new().with_suppress_zeros(false),
            Category::Linear,
            "en",
        )
        .unwrap();
        assert!(!params.suppress_zeros);
    }

    #[test]
    fn test_rejects_out_of_range_precision() {
        let context = FormattingContext::new().with_precision(99);
        assert!(resolve(&GlobalConfig::new(), &context, Category::Linear, "en").is_err());
    }

    #[test]
    fn test_rejects_malformed_locale() {
        for bad in ["", " en", "en US", "1de", "de/CH"] {
            let context = FormattingContext::new().with_locale(bad);
            assert!(
                matches!(
                    resolve(&GlobalConfig::new(), &context, Category::Linear, "en"),
                    Err(Error::InvalidConfig(_))
                ),
                "{bad:?}"
            );
        }
        let global = GlobalConfig::new().with_locale("el_GR");
        assert!(resolve(&global, &FormattingContext::new(), Category::Area, "en").is_ok());
    }

    #[test]
    fn test_locale_mapping() {
        assert_eq!(resolve_locale("auto", "en"), "en-US");
        assert_eq!(resolve_locale("auto", "ell"), "en-US");
        assert_eq!(resolve_locale("auto", ""), "en-US");
        assert_eq!(resolve_locale("el-GR", "en"), "el-GR");
    }
}
