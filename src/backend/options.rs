//! Output options for the SVG backend

/// Configuration options for SVG output
#[derive(Debug, Clone, PartialEq)]
pub struct SvgOptions {
    /// Whether to include the XML declaration
    pub standalone: bool,

    /// Whether to format output with newlines and indentation
    pub pretty_print: bool,

    /// Prefix for CSS class names (e.g., "tb-" for "tb-text")
    pub class_prefix: Option<String>,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            standalone: false,
            pretty_print: true,
            class_prefix: Some("tb-".to_string()),
        }
    }
}

impl SvgOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether output is standalone
    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    /// Set whether to pretty-print output
    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    /// Set the CSS class prefix
    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = Some(prefix.into());
        self
    }

    /// Remove the CSS class prefix
    pub fn without_class_prefix(mut self) -> Self {
        self.class_prefix = None;
        self
    }

    pub(crate) fn prefix(&self) -> &str {
        self.class_prefix.as_deref().unwrap_or_default()
    }
}
