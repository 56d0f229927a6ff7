use cad_units::{angular, linear, template, Precision, Template, ZeroSuppression};

fn p(value: u32) -> Precision {
    Precision::new(value).unwrap()
}

fn feet_only() -> ZeroSuppression {
    ZeroSuppression {
        enabled: true,
        trailing_zeros: false,
        zero_feet: true,
        zero_inches: false,
    }
}

#[test]
fn test_engineering_reference_values() {
    assert_eq!(
        linear::engineering(15.5, p(2), &ZeroSuppression::none()).unwrap(),
        "1'-3.50\""
    );
    assert_eq!(linear::engineering(5.25, p(2), &feet_only()).unwrap(), "5.25\"");
}

#[test]
fn test_architectural_reference_value() {
    assert_eq!(
        linear::architectural(15.5, p(1), &ZeroSuppression::none()).unwrap(),
        "1'-3 1/2\""
    );
}

#[test]
fn test_architectural_precision_zero_renders_whole_inches() {
    let none = ZeroSuppression::none();
    assert_eq!(linear::architectural(14.25, p(0), &none).unwrap(), "1'-2\"");
    assert_eq!(linear::architectural(14.0, p(0), &none).unwrap(), "1'-2\"");
}

#[test]
fn test_scientific_reference_value() {
    assert_eq!(linear::scientific(15.5, p(2)).unwrap(), "1.55E+1");
    assert_eq!(linear::scientific(0.015, p(1)).unwrap(), "1.5E-2");
}

#[test]
fn test_fractional_is_reduced() {
    assert_eq!(linear::fractional(7.75, p(4)).unwrap(), "7 3/4");
    assert_eq!(linear::fractional(0.0625, p(4)).unwrap(), "1/16");
}

#[test]
fn test_surveyor_reference_quadrants() {
    let cases = [
        (44.0, "N 44°0'0\" E"),
        (135.0, "S 45°0'0\" E"),
        (225.0, "S 45°0'0\" W"),
        (315.0, "N 45°0'0\" W"),
    ];
    for (degrees, expected) in cases {
        assert_eq!(angular::surveyor(degrees, p(0)).unwrap(), expected);
    }
}

#[test]
fn test_dms_sign_applies_once() {
    let text = angular::dms(-30.5, p(0)).unwrap();
    assert_eq!(text, "-30°30'0\"");
    assert_eq!(text.matches('-').count(), 1);
}

#[test]
fn test_template_reference_value() {
    let t = Template::new().with_prefix("R").with_symbol("\"");
    assert_eq!(template::apply("42", &t), "R42\"");
}

#[test]
fn test_encoders_reject_non_finite() {
    let none = ZeroSuppression::none();
    assert!(linear::scientific(f64::NAN, p(2)).is_err());
    assert!(linear::engineering(f64::INFINITY, p(2), &none).is_err());
    assert!(linear::architectural(f64::NEG_INFINITY, p(2), &none).is_err());
    assert!(linear::fractional(f64::NAN, p(2)).is_err());
    assert!(angular::dms(f64::NAN, p(2)).is_err());
    assert!(angular::grads(f64::INFINITY, p(2)).is_err());
    assert!(angular::radians(f64::NAN, p(2)).is_err());
    assert!(angular::surveyor(f64::NAN, p(2)).is_err());
}
