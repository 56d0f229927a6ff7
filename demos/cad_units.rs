//! A tour of the formatting registry.
//!
//! Run with: cargo run --example cad_units

use cad_units::{
    AngularUnit, Category, EffectiveParams, FixedLanguage, FormatRegistry, FormattingContext,
    LinearUnit, PartialConfig,
};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let registry = FormatRegistry::new().with_language_source(FixedLanguage::new("en"));

    // Named slots with the default templates
    println!("Distance:   {}", registry.format_distance(1234.5, None)?);
    println!("Radius:     {}", registry.format_radius(12.5, None)?);
    println!("Diameter:   {}", registry.format_diameter(40.0, Some(0))?);
    println!("Area:       {}", registry.format_area(86.25, None)?);
    println!("Angle:      {}", registry.format_angle(32.75, Some(1))?);
    println!("Coordinate: {}", registry.format_coordinate(-1532.1234, None)?);
    println!("Zoom:       {}\n", registry.format_zoom(1.25)?);

    println!("Linear units at 15.5:");
    for unit in [
        LinearUnit::Scientific,
        LinearUnit::Decimal,
        LinearUnit::Engineering,
        LinearUnit::Architectural,
        LinearUnit::Fractional,
    ] {
        let ctx = FormattingContext::new().with_linear_unit(unit);
        println!("  {:<14} {}", format!("{unit:?}"), registry.format_linear(15.5, &ctx)?);
    }

    println!("\nAngular units at 225.5:");
    for unit in [
        AngularUnit::DecimalDegrees,
        AngularUnit::DegreesMinutesSeconds,
        AngularUnit::Grads,
        AngularUnit::Radians,
        AngularUnit::Surveyor,
    ] {
        let ctx = FormattingContext::new().with_angular_unit(unit);
        println!("  {:<22} {}", format!("{unit:?}"), registry.format_angular(225.5, &ctx)?);
    }

    // Configuration documents merge over the current configuration
    let update: PartialConfig = serde_json::from_str(
        r#"{
            "locale": "el-GR",
            "zeroSuppression": { "enabled": true, "zeroFeet": true }
        }"#,
    )?;
    registry.update_config(&update);
    println!("\nAfter switching to el-GR with zero suppression:");
    println!("  Distance: {}", registry.format_distance(1234.5, None)?);
    println!("  Area:     {}", registry.format_area(1234.0, None)?);

    registry.register_formatter(
        "station",
        Category::Linear,
        |v: f64, _: &EffectiveParams| -> cad_units::Result<String> {
            Ok(format!("{}+{:05.2}", (v / 100.0).floor(), v % 100.0))
        },
    );
    let station = registry.format_custom("station", Category::Linear, 1234.5, &FormattingContext::new())?;
    println!("  Station:  {station}");

    Ok(())
}
