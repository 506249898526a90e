// File: crates/chart-core/tests/color.rs
// Purpose: Validate hex/name color parsing at the options boundary.

use chart_core::{ChartError, Rgba};

#[test]
fn parses_hex_with_and_without_hash() {
    let with_hash: Rgba = "#E8E8E8".parse().unwrap();
    let without: Rgba = "e8e8e8".parse().unwrap();
    assert_eq!(with_hash, without);
    assert_eq!(with_hash, Rgba::from_rgb8(232, 232, 232));
    assert_eq!(with_hash.a, 1.0);
}

#[test]
fn channels_are_normalized() {
    let c = Rgba::parse("#FF0080").unwrap();
    assert_eq!(c.r, 1.0);
    assert_eq!(c.g, 0.0);
    assert!((c.b - 128.0 / 255.0).abs() < 1e-6);
}

#[test]
fn known_names() {
    assert_eq!(Rgba::parse("black").unwrap(), Rgba::BLACK);
    assert_eq!(Rgba::parse("White").unwrap(), Rgba::WHITE);
}

#[test]
fn malformed_strings_are_rejected() {
    for bad in ["#12345", "#1234567", "zzzzzz", "rgb(1,2,3)", ""] {
        assert_eq!(Rgba::parse(bad), Err(ChartError::InvalidColor(bad.to_string())), "{bad}");
    }
}

#[test]
fn preconverted_colors_pass_through() {
    let c = Rgba::from([0.1, 0.2, 0.3, 0.4]);
    assert_eq!(c.to_array(), [0.1, 0.2, 0.3, 0.4]);
}
