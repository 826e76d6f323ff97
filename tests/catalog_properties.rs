//! Catalog identity, merge precedence, and selector behavior through the public API

use pretty_assertions::assert_eq;

use textbox_catalog::{
    svg_manager, Backend, Color, Error, Manager, Overrides, RenderConfig, Result, Surface,
    SvgBackend, Value,
};

fn manager() -> Manager<SvgBackend> {
    svg_manager(RenderConfig::new("serif", 20).with_font_color(Color::BLACK)).unwrap()
}

fn keys<B: Backend>(manager: &Manager<B>) -> Vec<String> {
    manager.keys().map(str::to_string).collect()
}

#[test]
fn test_same_text_keys_are_dense() {
    let mut m = manager();
    for _ in 0..5 {
        m.create("x", &Overrides::new()).unwrap();
    }
    assert_eq!(keys(&m), vec!["x-(0)", "x-(1)", "x-(2)", "x-(3)", "x-(4)"]);
}

#[test]
fn test_interleaved_texts_get_independent_suffixes() {
    let mut m = manager();
    for text in ["a", "b", "a", "c", "b", "a"] {
        m.create(text, &Overrides::new()).unwrap();
    }
    assert_eq!(
        keys(&m),
        vec!["a-(0)", "a-(1)", "a-(2)", "b-(0)", "b-(1)", "c-(0)"]
    );
}

#[test]
fn test_create_override_takes_precedence_over_base() {
    let mut m = manager();
    let artifact = m
        .create("hello", &Overrides::new().with_font_size(10))
        .unwrap();

    assert_eq!(artifact.config(), &RenderConfig::new("serif", 10));
    // The base itself is untouched
    assert_eq!(m.base_config().font_size, 20);
}

#[test]
fn test_flat_keyword_overrides() {
    let mut m = manager();
    let overrides = Overrides::from_pairs([
        ("font_size", Value::from(12)),
        ("underline", Value::from(true)),
        ("background", Value::from("#ffffff")),
    ])
    .unwrap();
    let artifact = m.create("hello", &overrides).unwrap();

    assert_eq!(artifact.config().font_size, 12);
    assert_eq!(artifact.config().setting("underline"), Some(&Value::Bool(true)));
    assert_eq!(artifact.config().background.color(), Some(Color::WHITE));
}

#[test]
fn test_round_trip_update_keeps_key() {
    let mut m = manager();
    m.create("same", &Overrides::new()).unwrap();
    m.create("same", &Overrides::new()).unwrap();

    let new_keys = m
        .update(Some("same-(1)"), false, &Overrides::new().with_text("same"))
        .unwrap();

    assert_eq!(new_keys, vec!["same-(1)"]);
    assert_eq!(keys(&m), vec!["same-(0)", "same-(1)"]);
}

#[test]
fn test_family_update_leaves_other_families() {
    let mut m = manager();
    m.create("a", &Overrides::new()).unwrap();
    m.create("a", &Overrides::new()).unwrap();
    m.create("b", &Overrides::new()).unwrap();

    let red = Color::rgb(255, 0, 0);
    m.update(Some("a-(0)"), true, &Overrides::new().with_font_color(red))
        .unwrap();

    assert_eq!(m.get("a-(0)").unwrap().config().font_color, red);
    assert_eq!(m.get("a-(1)").unwrap().config().font_color, red);
    assert_eq!(m.get("b-(0)").unwrap().config().font_color, Color::BLACK);
}

#[test]
fn test_single_key_update_leaves_siblings() {
    let mut m = manager();
    m.create("a", &Overrides::new()).unwrap();
    m.create("a", &Overrides::new()).unwrap();

    m.update(Some("a-(1)"), false, &Overrides::new().with_font_size(8))
        .unwrap();

    assert_eq!(m.get("a-(0)").unwrap().config().font_size, 20);
    assert_eq!(m.get("a-(1)").unwrap().config().font_size, 8);
}

#[test]
fn test_text_change_rekeys_whole_family() {
    let mut m = manager();
    m.create("draft", &Overrides::new()).unwrap();
    m.create("draft", &Overrides::new()).unwrap();
    m.create("final", &Overrides::new()).unwrap();

    let new_keys = m
        .update(Some("draft"), true, &Overrides::new().with_text("final"))
        .unwrap();

    assert_eq!(new_keys, vec!["final-(1)", "final-(2)"]);
    assert_eq!(keys(&m), vec!["final-(0)", "final-(1)", "final-(2)"]);
    assert!(m.family("draft").is_empty());
    assert_eq!(m.family("final").len(), 3);
}

#[test]
fn test_bare_name_without_match_all_updates_its_texts() {
    let mut m = manager();
    m.create("a", &Overrides::new()).unwrap();
    m.create("a", &Overrides::new()).unwrap();

    let red = Color::rgb(255, 0, 0);
    let new_keys = m
        .update(Some("a"), false, &Overrides::new().with_font_color(red))
        .unwrap();

    assert_eq!(new_keys, vec!["a-(0)", "a-(1)"]);
    assert_eq!(m.get("a-(0)").unwrap().config().font_color, red);
    assert_eq!(m.get("a-(1)").unwrap().config().font_color, red);
}

#[test]
fn test_family_update_strips_suffix_from_text_selector() {
    let mut m = manager();
    m.create("x", &Overrides::new()).unwrap();
    m.create("x-(5)", &Overrides::new()).unwrap();

    let new_keys = m
        .update(Some("x-(5)"), true, &Overrides::new().with_font_size(9))
        .unwrap();

    assert_eq!(new_keys, vec!["x-(0)"]);
    assert_eq!(m.get("x-(0)").unwrap().config().font_size, 9);
    assert_eq!(m.get("x-(5)-(0)").unwrap().config().font_size, 20);
}

#[test]
fn test_create_rejects_text_override() {
    let mut m = manager();
    let err = m
        .create("a", &Overrides::new().with_text("b"))
        .unwrap_err();
    assert_eq!(err.config_key(), Some("text"));
    assert!(m.is_empty());
}

#[test]
fn test_selector_validation() {
    let mut m = manager();
    m.create("a", &Overrides::new()).unwrap();

    assert!(matches!(
        m.update(None, false, &Overrides::new()),
        Err(Error::InvalidSelector { .. })
    ));
    assert!(matches!(
        m.update(Some("nonexistent"), false, &Overrides::new()),
        Err(Error::NameNotFound { .. })
    ));
    assert!(matches!(
        m.update(Some("nonexistent"), true, &Overrides::new()),
        Err(Error::NameNotFound { .. })
    ));
}

#[test]
fn test_update_all_on_empty_catalog_is_noop() {
    let mut m = manager();
    assert_eq!(m.update_all(&Overrides::new()).unwrap(), Vec::<String>::new());
}

#[test]
fn test_unrecognized_setting_in_update_changes_nothing() {
    let mut m = manager();
    m.create("keep", &Overrides::new()).unwrap();
    let before = m.get("keep-(0)").unwrap().clone();

    let err = m
        .update(
            Some("keep-(0)"),
            false,
            &Overrides::new().with_text("gone").with_setting("glow", 3),
        )
        .unwrap_err();

    assert_eq!(err.config_key(), Some("glow"));
    assert_eq!(keys(&m), vec!["keep-(0)"]);
    let after = m.get("keep-(0)").unwrap();
    assert_eq!(after.text(), before.text());
    assert_eq!(after.config(), before.config());
    assert_eq!(after.surface(), before.surface());
}

#[test]
fn test_unrecognized_base_setting_fails_construction() {
    let base = RenderConfig::new("serif", 20).with_setting("glow", 3);
    let err = svg_manager(base).unwrap_err();
    assert_eq!(err.config_key(), Some("glow"));
}

#[test]
fn test_attribute_delegation() {
    let mut m = manager();
    let artifact = m.create("four", &Overrides::new()).unwrap();

    assert_eq!(artifact.attribute("text").unwrap(), Value::from("four"));
    assert_eq!(artifact.attribute("width").unwrap(), Value::Float(48.0));
    assert!(matches!(
        artifact.attribute("blit"),
        Err(Error::InvalidCapability { .. })
    ));
}

/// Rejects any rendering wider than `max_width` (characters x font size)
struct NarrowBackend {
    max_width: u32,
}

#[derive(Debug, Clone, PartialEq)]
struct Extent(u32);

impl Surface for Extent {
    fn capabilities(&self) -> &[&'static str] {
        &["extent"]
    }

    fn capability(&self, name: &str) -> Option<Value> {
        (name == "extent").then(|| Value::from(self.0))
    }
}

impl Backend for NarrowBackend {
    type Surface = Extent;

    fn name(&self) -> &str {
        "narrow"
    }

    fn settings(&self) -> &[&'static str] {
        &[]
    }

    fn render(&self, text: &str, config: &RenderConfig) -> Result<Extent> {
        let extent = text.chars().count() as u32 * config.font_size;
        if extent > self.max_width {
            return Err(Error::invalid_config(
                "font_size",
                config.font_size,
                "rendering too wide",
            ));
        }
        Ok(Extent(extent))
    }
}

#[test]
fn test_partial_render_failure_rolls_back_every_entry() {
    let mut m = Manager::new(NarrowBackend { max_width: 200 }, RenderConfig::new("mono", 10))
        .unwrap();
    m.create("ab", &Overrides::new()).unwrap();
    m.create("abcdefgh", &Overrides::new()).unwrap();

    // "ab" fits at 30px, "abcdefgh" does not
    let err = m
        .update_all(&Overrides::new().with_font_size(30))
        .unwrap_err();
    assert_eq!(err.config_key(), Some("font_size"));

    assert_eq!(m.get("ab-(0)").unwrap().surface(), &Extent(20));
    assert_eq!(m.get("abcdefgh-(0)").unwrap().surface(), &Extent(80));

    m.update_all(&Overrides::new().with_font_size(20)).unwrap();
    assert_eq!(m.get("ab-(0)").unwrap().attribute("extent").unwrap(), Value::Int(40));
    assert_eq!(m.get("abcdefgh-(0)").unwrap().surface(), &Extent(160));
}
