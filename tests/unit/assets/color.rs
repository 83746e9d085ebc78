use super::*;
use serde_json::json;

#[test]
fn parses_hex_short_long_and_alpha() {
    let c: FillColor = "#f00".parse().unwrap();
    assert_eq!(c.rgba8(), Rgba8::opaque(255, 0, 0));

    let c: FillColor = "1E90FF".parse().unwrap();
    assert_eq!(c.rgba8(), Rgba8::opaque(0x1e, 0x90, 0xff));

    let c: FillColor = "#0000ff80".parse().unwrap();
    assert_eq!(c.rgba8(), Rgba8::new(0, 0, 255, 128));
}

#[test]
fn rejects_malformed_tokens() {
    for bad in ["", "#12", "#12345", "#gggggg", "red", "#ff00ffz0"] {
        let err = bad.parse::<FillColor>().unwrap_err();
        assert!(
            err.to_string().contains("invalid parameter:"),
            "{bad}: {err}"
        );
    }
}

#[test]
fn serde_uses_hex_and_accepts_rgba_object() {
    let c: FillColor = serde_json::from_value(json!("#336699")).unwrap();
    assert_eq!(serde_json::to_value(c).unwrap(), json!("#336699"));

    let c: FillColor = serde_json::from_value(json!({"r": 1, "g": 2, "b": 3})).unwrap();
    assert_eq!(c.rgba8(), Rgba8::opaque(1, 2, 3));

    let c: FillColor = serde_json::from_value(json!({"r": 1, "g": 2, "b": 3, "a": 4})).unwrap();
    assert_eq!(c.to_string(), "#01020304");

    assert!(serde_json::from_value::<FillColor>(json!("nope")).is_err());
}

#[test]
fn default_is_black() {
    assert_eq!(FillColor::default().to_hex(), "#000000");
}
