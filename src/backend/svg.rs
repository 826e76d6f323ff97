//! SVG backend: renders a text artifact as a standalone SVG document
//!
//! Glyphs are not rasterized here. The document carries a `<text>` element
//! styled from the configuration, sized by estimated metrics so callers can
//! lay artifacts out without a font engine.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::color::Color;
use crate::config::{RenderConfig, Value};
use crate::error::{Error, Result};

use super::{Backend, Surface, SvgOptions};

/// Extra settings understood by [`SvgBackend`]
pub const SVG_SETTINGS: &[&str] = &[
    "bold",
    "italic",
    "underline",
    "strikethrough",
    "letter_spacing",
    "line_height",
];

/// Largest font size the backend accepts
pub const MAX_FONT_SIZE: u32 = 1024;

const SURFACE_CAPABILITIES: &[&str] = &["width", "height", "markup", "data_uri"];

/// Average glyph advance as a fraction of the font size
const ADVANCE_RATIO: f64 = 0.6;
const BOLD_ADVANCE_RATIO: f64 = 0.65;
const DEFAULT_LINE_HEIGHT: f64 = 1.2;

/// Renders text into [`SvgSurface`]s
#[derive(Debug, Clone, Default)]
pub struct SvgBackend {
    options: SvgOptions,
}

impl SvgBackend {
    /// Create a backend with default output options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend with custom output options
    pub fn with_options(options: SvgOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SvgOptions {
        &self.options
    }
}

impl Backend for SvgBackend {
    type Surface = SvgSurface;

    fn name(&self) -> &str {
        "svg"
    }

    fn settings(&self) -> &[&'static str] {
        SVG_SETTINGS
    }

    fn render(&self, text: &str, config: &RenderConfig) -> Result<SvgSurface> {
        config.validate()?;
        if config.font_size > MAX_FONT_SIZE {
            return Err(Error::invalid_config(
                "font_size",
                config.font_size,
                format!("exceeds the maximum of {}", MAX_FONT_SIZE),
            ));
        }
        let style = TextStyle::from_settings(config)?;

        let size = f64::from(config.font_size);
        let ratio = if style.bold {
            BOLD_ADVANCE_RATIO
        } else {
            ADVANCE_RATIO
        };
        let advance = (size * ratio + style.letter_spacing).max(0.0);
        let width = round2(advance * text.chars().count() as f64);
        let height = round2(size * style.line_height);

        log::trace!(
            "svg render {:?} at {}px -> {}x{}",
            text,
            config.font_size,
            width,
            height
        );

        let mut builder = SvgBuilder::new(&self.options);
        if let Some(color) = config.background.color() {
            builder.add_background(width, height, color, config.anti_alias);
        }
        builder.add_text(text, height / 2.0, config, &style);

        Ok(SvgSurface {
            markup: builder.build(width, height),
            width,
            height,
        })
    }
}

/// Settings resolved from `extra_settings`
#[derive(Debug, Default)]
struct TextStyle {
    bold: bool,
    italic: bool,
    underline: bool,
    strikethrough: bool,
    letter_spacing: f64,
    line_height: f64,
}

impl TextStyle {
    fn from_settings(config: &RenderConfig) -> Result<Self> {
        let mut style = TextStyle {
            line_height: DEFAULT_LINE_HEIGHT,
            ..TextStyle::default()
        };

        for (key, value) in &config.extra_settings {
            match key.as_str() {
                "bold" => style.bold = expect_bool(key, value)?,
                "italic" => style.italic = expect_bool(key, value)?,
                "underline" => style.underline = expect_bool(key, value)?,
                "strikethrough" => style.strikethrough = expect_bool(key, value)?,
                "letter_spacing" => {
                    style.letter_spacing = value
                        .as_f64()
                        .filter(|v| v.is_finite())
                        .ok_or_else(|| Error::invalid_config(key.as_str(), value, "expected a number"))?;
                }
                "line_height" => {
                    style.line_height = value
                        .as_f64()
                        .filter(|v| v.is_finite() && *v > 0.0)
                        .ok_or_else(|| {
                            Error::invalid_config(key.as_str(), value, "expected a positive number")
                        })?;
                }
                _ => {
                    return Err(Error::invalid_config(
                        key.as_str(),
                        value,
                        "not a setting of the svg backend",
                    ));
                }
            }
        }

        Ok(style)
    }

    fn decoration(&self) -> Option<&'static str> {
        match (self.underline, self.strikethrough) {
            (true, true) => Some("underline line-through"),
            (true, false) => Some("underline"),
            (false, true) => Some("line-through"),
            (false, false) => None,
        }
    }
}

fn expect_bool(key: &str, value: &Value) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| Error::invalid_config(key, value, "expected a bool"))
}

/// Build the SVG document incrementally
struct SvgBuilder<'a> {
    options: &'a SvgOptions,
    elements: Vec<String>,
}

impl<'a> SvgBuilder<'a> {
    fn new(options: &'a SvgOptions) -> Self {
        Self {
            options,
            elements: vec![],
        }
    }

    fn indent_str(&self) -> &str {
        if self.options.pretty_print {
            "  "
        } else {
            ""
        }
    }

    fn newline(&self) -> &str {
        if self.options.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    fn add_background(&mut self, width: f64, height: f64, color: Color, anti_alias: bool) {
        let rendering = if anti_alias {
            ""
        } else {
            r#" shape-rendering="crispEdges""#
        };
        self.elements.push(format!(
            r#"{}<rect class="{}background" width="{}" height="{}"{}{}/>"#,
            self.indent_str(),
            self.options.prefix(),
            width,
            height,
            format_fill(color),
            rendering
        ));
    }

    fn add_text(&mut self, text: &str, y: f64, config: &RenderConfig, style: &TextStyle) {
        let mut attrs = format!(
            r#" font-family="{}" font-size="{}"{}"#,
            escape_xml(&config.font),
            config.font_size,
            format_fill(config.font_color)
        );
        if style.bold {
            attrs.push_str(r#" font-weight="bold""#);
        }
        if style.italic {
            attrs.push_str(r#" font-style="italic""#);
        }
        if let Some(decoration) = style.decoration() {
            attrs.push_str(&format!(r#" text-decoration="{}""#, decoration));
        }
        if style.letter_spacing != 0.0 {
            attrs.push_str(&format!(r#" letter-spacing="{}""#, style.letter_spacing));
        }
        let rendering = if config.anti_alias {
            "geometricPrecision"
        } else {
            "optimizeSpeed"
        };

        self.elements.push(format!(
            r#"{}<text class="{}text" x="0" y="{}" dominant-baseline="middle"{} text-rendering="{}">{}</text>"#,
            self.indent_str(),
            self.options.prefix(),
            y,
            attrs,
            rendering,
            escape_xml(text)
        ));
    }

    fn build(self, width: f64, height: f64) -> String {
        let nl = self.newline();
        let mut svg = String::new();

        if self.options.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = width,
            h = height
        ));
        svg.push_str(nl);

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");
        svg
    }
}

/// Rendered SVG document plus its estimated pixel dimensions
#[derive(Debug, Clone, PartialEq)]
pub struct SvgSurface {
    markup: String,
    width: f64,
    height: f64,
}

impl SvgSurface {
    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// (width, height)
    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// The document as a base64 `data:` URI
    pub fn data_uri(&self) -> String {
        format!("data:image/svg+xml;base64,{}", STANDARD.encode(&self.markup))
    }
}

impl Surface for SvgSurface {
    fn capabilities(&self) -> &[&'static str] {
        SURFACE_CAPABILITIES
    }

    fn capability(&self, name: &str) -> Option<Value> {
        match name {
            "width" => Some(Value::Float(self.width)),
            "height" => Some(Value::Float(self.height)),
            "markup" => Some(Value::Text(self.markup.clone())),
            "data_uri" => Some(Value::Text(self.data_uri())),
            _ => None,
        }
    }
}

fn format_fill(color: Color) -> String {
    if color.is_opaque() {
        format!(r#" fill="{}""#, color.to_hex())
    } else {
        format!(
            r#" fill="{}" fill-opacity="{}""#,
            color.to_hex(),
            (color.opacity() * 1000.0).round() / 1000.0
        )
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Escape special XML characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
