//! Property-based tests for the numeric contracts of the encoders.
//!
//! Fixed-point inputs stay in magnitudes where `f64` still carries the
//! requested precision; the scientific encoder is exercised over every finite
//! `f64`, subnormals included.

use cad_units::{
    angular, encode_decimal, linear, suppress, suppress_with, FormatRegistry, FormattingContext,
    NumberSymbols, Precision,
};
use proptest::prelude::*;

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

fn parse_dms(text: &str) -> (f64, f64, f64) {
    let (d, rest) = text.split_once('°').unwrap();
    let (m, rest) = rest.split_once('\'').unwrap();
    let s = rest.trim_end_matches('"');
    (d.parse().unwrap(), m.parse().unwrap(), s.parse().unwrap())
}

proptest! {
    #[test]
    fn prop_decimal_has_exact_fraction_digits(
        value in -1.0e15f64..1.0e15,
        precision in 0u32..=6,
        locale in prop::sample::select(vec![
            "en-US", "en-GB", "en-IN", "el-GR", "de-DE", "de-CH", "it-IT",
            "es-ES", "pt-BR", "nl-NL", "fr-FR", "ru-RU",
        ]),
        grouping in any::<bool>(),
    ) {
        let symbols = NumberSymbols::for_locale(locale);
        let text = encode_decimal(value, Precision::new(precision).unwrap(), locale, grouping).unwrap();
        let int = match text.rsplit_once(symbols.decimal) {
            Some((int, fraction)) => {
                prop_assert_eq!(fraction.len(), precision as usize);
                prop_assert!(fraction.chars().all(|c| c.is_ascii_digit()));
                int
            }
            None => {
                prop_assert_eq!(precision, 0);
                text.as_str()
            }
        };
        let bare = int.trim_start_matches('-').replace(symbols.group, "");
        prop_assert!(bare.chars().all(|c| c.is_ascii_digit()), "{} -> {}", locale, text);
        if !grouping {
            prop_assert_eq!(int.trim_start_matches('-'), bare.as_str());
        }
    }

    #[test]
    fn prop_decimal_reads_back(value in -1.0e12f64..1.0e12, precision in 0u32..=6) {
        let text = encode_decimal(value, Precision::new(precision).unwrap(), "en-US", false).unwrap();
        let parsed: f64 = text.parse().unwrap();
        let tolerance = 0.5 * 10f64.powi(-(precision as i32)) + value.abs() * 1e-15;
        prop_assert!((parsed - value).abs() <= tolerance, "{} -> {}", value, text);
    }

    #[test]
    fn prop_scientific_reads_back(
        value in any::<f64>().prop_filter("finite", |v| v.is_finite()),
        precision in 0u32..=12,
    ) {
        let text = linear::scientific(value, Precision::new(precision).unwrap()).unwrap();
        let (mantissa, _) = text.trim_start_matches('-').split_once('E').unwrap();
        let lead = mantissa.chars().next().unwrap();
        prop_assert!(lead != '0' || value == 0.0, "{} -> {}", value, text);
        prop_assert_eq!(mantissa.len(), if precision == 0 { 1 } else { precision as usize + 2 });

        let parsed: f64 = text.replace('E', "e").parse().unwrap();
        if parsed.is_infinite() {
            // rounding the mantissa up past f64::MAX
            prop_assert!(value.abs() > 1.0e308);
        } else {
            let tolerance = value.abs() * 10f64.powi(-(precision as i32)) + 5e-324;
            prop_assert!((parsed - value).abs() <= tolerance, "{} -> {}", value, text);
        }
    }

    #[test]
    fn prop_dms_reconstructs_degrees(degrees in -720.0f64..720.0, precision in 0u32..=4) {
        let text = angular::dms(degrees, Precision::new(precision).unwrap()).unwrap();
        let (d, m, s) = parse_dms(text.trim_start_matches('-'));
        let rebuilt = d + m / 60.0 + s / 3600.0;
        let tolerance = 10f64.powi(-(precision as i32));
        prop_assert!((rebuilt - degrees.abs()).abs() <= tolerance, "{} -> {}", degrees, text);
    }

    #[test]
    fn prop_fraction_is_irreducible(value in -1.0e6f64..1.0e6, precision in 0u32..=8) {
        let text = linear::fractional(value, Precision::new(precision).unwrap()).unwrap();
        let last = text.trim_start_matches('-').rsplit(' ').next().unwrap();
        if let Some((num, den)) = last.split_once('/') {
            let num: u64 = num.parse().unwrap();
            let den: u64 = den.parse().unwrap();
            prop_assert!(num > 0);
            prop_assert!(den.is_power_of_two());
            prop_assert_eq!(gcd(num, den), 1);
        }
    }

    #[test]
    fn prop_surveyor_bearing_is_acute(degrees in -1.0e4f64..1.0e4) {
        let text = angular::surveyor(degrees, Precision::new(2).unwrap()).unwrap();
        let mut parts = text.split(' ');
        let north_south = parts.next().unwrap();
        let bearing = parts.next().unwrap();
        let east_west = parts.next().unwrap();
        prop_assert!(north_south == "N" || north_south == "S");
        prop_assert!(east_west == "E" || east_west == "W");

        let (d, m, s) = parse_dms(bearing);
        let value = d + m / 60.0 + s / 3600.0;
        prop_assert!((0.0..=90.0 + 0.01).contains(&value), "{} -> {}", degrees, text);
    }

    #[test]
    fn prop_suppress_is_idempotent(text in "[-R]?[0-9,.]{0,12}[\"°m]?") {
        let once = suppress(&text);
        prop_assert_eq!(suppress(&once), once.clone());
        let once = suppress_with(&text, ',');
        prop_assert_eq!(suppress_with(&once, ','), once);
    }

    #[test]
    fn prop_cache_never_changes_output(value in -1.0e6f64..1.0e6, precision in 0u32..=4) {
        let registry = FormatRegistry::new();
        let ctx = FormattingContext::new().with_precision(precision);
        let cached = registry.format_decimal(value, &ctx).unwrap();
        let uncached = encode_decimal(value, Precision::new(precision).unwrap(), "en-US", true).unwrap();
        prop_assert_eq!(&cached, &uncached);
        prop_assert_eq!(registry.format_decimal(value, &ctx).unwrap(), uncached);
    }
}
