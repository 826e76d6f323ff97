//! Loading base configurations from TOML and rendering through them

use std::fs;

use pretty_assertions::assert_eq;

use textbox_catalog::{
    svg_manager, Color, ConfigFileError, Manager, Overrides, RenderConfig, SvgBackend,
    SvgOptions, Value,
};

const BASE_TOML: &str = r##"
font = "serif"
font_size = 10
font_color = "#333333"

[settings]
letter_spacing = 0
"##;

#[test]
fn test_manager_from_toml_config() {
    let base = RenderConfig::from_toml_str(BASE_TOML).expect("Should parse");
    let mut manager = svg_manager(base).expect("Should accept known settings");

    let artifact = manager.create("Hi", &Overrides::new()).unwrap();
    assert_eq!(artifact.config().font_color, Color::rgb(0x33, 0x33, 0x33));
    assert_eq!(artifact.config().setting("letter_spacing"), Some(&Value::Int(0)));

    insta::assert_snapshot!(artifact.surface().markup(), @r###"
    <svg xmlns="http://www.w3.org/2000/svg" width="12" height="12" viewBox="0 0 12 12">
      <text class="tb-text" x="0" y="6" dominant-baseline="middle" font-family="serif" font-size="10" fill="#333333" text-rendering="geometricPrecision">Hi</text>
    </svg>
    "###);
}

#[test]
fn test_config_file_round_trip_through_disk() {
    let path = std::env::temp_dir().join(format!("textbox-catalog-{}.toml", std::process::id()));
    fs::write(&path, BASE_TOML).unwrap();
    let loaded = RenderConfig::from_file(&path);
    fs::remove_file(&path).ok();

    assert_eq!(loaded.unwrap(), RenderConfig::from_toml_str(BASE_TOML).unwrap());
}

#[test]
fn test_missing_config_file() {
    let result = RenderConfig::from_file(std::path::Path::new("/nonexistent/base.toml"));
    assert!(matches!(result, Err(ConfigFileError::IoError(_))));
}

#[test]
fn test_unknown_setting_in_file_fails_at_construction() {
    let base = RenderConfig::from_toml_str(
        r#"
font = "serif"
font_size = 10

[settings]
glow = true
"#,
    )
    .expect("Unknown settings are the backend's to reject");

    let err = svg_manager(base).unwrap_err();
    assert_eq!(err.config_key(), Some("glow"));
}

#[test]
fn test_configure_then_create_with_standalone_output() {
    let backend = SvgBackend::with_options(SvgOptions::new().with_standalone(true));
    let mut manager = Manager::new(backend, RenderConfig::default()).unwrap();
    manager
        .configure(&Overrides::new().with("bold", true).unwrap())
        .unwrap();

    let artifact = manager.create("title", &Overrides::new()).unwrap();
    let markup = artifact.surface().markup();
    assert!(markup.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
    assert!(markup.contains(r#"font-weight="bold""#));
}

#[test]
fn test_family_lookup_display() {
    let mut manager = svg_manager(RenderConfig::new("mono", 12)).unwrap();
    manager.create("hp", &Overrides::new()).unwrap();
    manager
        .create("hp", &Overrides::new().with_font_color(Color::rgb(255, 0, 0)))
        .unwrap();
    manager.create("mp", &Overrides::new()).unwrap();

    insta::assert_snapshot!(manager.family("hp").to_string(), @r###"
    {
        "hp-(0)": "hp" (mono 12px, color (0, 0, 0, 255), background none),
        "hp-(1)": "hp" (mono 12px, color (255, 0, 0, 255), background none),
    }
    "###);
}
