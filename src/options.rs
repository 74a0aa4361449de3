//! Render configuration.
//!
//! [`Options`] holds every formatting knob: charset, per-format content-type
//! strings, indentation and prefix settings, the debug flag, and the template
//! sources (glob pattern and view directory). An `Options` value is read on
//! every render call and is never validated at construction; invalid
//! combinations (an empty JSONP callback, a missing template) surface as
//! errors at render time.
//!
//! Construct with [`Options::default`] and override fields, or use the setter
//! methods on [`Render`](crate::Render) before serving traffic.

use std::path::PathBuf;

/// Default charset appended to text-like content types.
pub const DEFAULT_CHARSET: &str = "UTF-8";

/// Content type for plain text responses.
pub const CONTENT_TEXT: &str = "text/plain";
/// Content type for JSON responses.
pub const CONTENT_JSON: &str = "application/json";
/// Content type for JSONP responses (the body is wrapped, the type is not).
pub const CONTENT_JSONP: &str = "application/json";
/// Content type for XML responses.
pub const CONTENT_XML: &str = "application/xml";
/// Content type for YAML responses.
pub const CONTENT_YAML: &str = "application/x-yaml";
/// Content type for HTML responses.
pub const CONTENT_HTML: &str = "text/html";
/// Content type for raw binary responses. Never gets a charset suffix.
pub const CONTENT_BINARY: &str = "application/octet-stream";

/// Default variable delimiters for templates.
pub const DEFAULT_LEFT_DELIM: &str = "{{";
/// Default variable delimiters for templates.
pub const DEFAULT_RIGHT_DELIM: &str = "}}";

/// Base layout name used by view mode when none is configured.
pub const DEFAULT_LAYOUT: &str = "base";

/// Formatting options for a [`Render`](crate::Render) instance.
///
/// All fields are public so the struct-update syntax works:
///
/// ```rust
/// use respond::Options;
///
/// let opts = Options {
///     json_indent: true,
///     debug: true,
///     ..Options::default()
/// };
/// ```
///
/// Not safe for concurrent mutation while renders are in flight; finish
/// configuration before sharing the renderer across threads.
#[derive(Debug, Clone)]
pub struct Options {
    /// Charset appended as `; charset=<value>` to text-like content types.
    pub charset: String,
    /// When true, no charset suffix is appended to any content type.
    pub disable_charset: bool,

    /// Content type for [`text`](crate::Render::text).
    pub content_text: String,
    /// Content type for [`json`](crate::Render::json).
    pub content_json: String,
    /// Content type for [`jsonp`](crate::Render::jsonp).
    pub content_jsonp: String,
    /// Content type for [`xml`](crate::Render::xml).
    pub content_xml: String,
    /// Content type for [`yaml`](crate::Render::yaml).
    pub content_yaml: String,
    /// Content type for HTML methods.
    pub content_html: String,
    /// Content type for [`binary`](crate::Render::binary).
    pub content_binary: String,

    /// Pretty-print JSON bodies.
    pub json_indent: bool,
    /// Indent XML bodies (two spaces per level).
    pub xml_indent: bool,
    /// String prepended to every JSON body (e.g. an XSSI guard like `)]}',`).
    pub json_prefix: String,
    /// String prepended to every XML body (e.g. an XML declaration).
    pub xml_prefix: String,
    /// When true, `<`, `>` and `&` in JSON bodies are emitted as `\u003c`,
    /// `\u003e` and `\u0026` so the payload is safe to embed in HTML.
    pub escape_html: bool,

    /// Re-parse template sources on every call instead of caching the parsed
    /// set. Enables live-reload of templates during development.
    pub debug: bool,
    /// Glob pattern selecting the template files for [`html`](crate::Render::html).
    pub glob_pattern: Option<String>,
    /// Directory holding the base layout and content fragments for
    /// [`view`](crate::Render::view).
    pub template_dir: Option<PathBuf>,
    /// File stem of the base layout inside `template_dir`.
    pub layout: String,

    /// Left delimiter for template expressions.
    pub left_delim: String,
    /// Right delimiter for template expressions.
    pub right_delim: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            charset: DEFAULT_CHARSET.to_string(),
            disable_charset: false,
            content_text: CONTENT_TEXT.to_string(),
            content_json: CONTENT_JSON.to_string(),
            content_jsonp: CONTENT_JSONP.to_string(),
            content_xml: CONTENT_XML.to_string(),
            content_yaml: CONTENT_YAML.to_string(),
            content_html: CONTENT_HTML.to_string(),
            content_binary: CONTENT_BINARY.to_string(),
            json_indent: false,
            xml_indent: false,
            json_prefix: String::new(),
            xml_prefix: String::new(),
            escape_html: false,
            debug: false,
            glob_pattern: None,
            template_dir: None,
            layout: DEFAULT_LAYOUT.to_string(),
            left_delim: DEFAULT_LEFT_DELIM.to_string(),
            right_delim: DEFAULT_RIGHT_DELIM.to_string(),
        }
    }
}

impl Options {
    /// Builds the final content-type header value for a text-like format.
    pub(crate) fn with_charset(&self, base: &str) -> String {
        if self.disable_charset {
            base.to_string()
        } else {
            format!("{}; charset={}", base, self.charset)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = Options::default();
        assert_eq!(opts.charset, "UTF-8");
        assert_eq!(opts.content_json, "application/json");
        assert_eq!(opts.content_yaml, "application/x-yaml");
        assert!(!opts.disable_charset);
        assert!(!opts.json_indent);
        assert!(opts.glob_pattern.is_none());
        assert_eq!(opts.layout, "base");
    }

    #[test]
    fn test_with_charset() {
        let opts = Options::default();
        assert_eq!(
            opts.with_charset(CONTENT_JSON),
            "application/json; charset=UTF-8"
        );
    }

    #[test]
    fn test_with_charset_disabled() {
        let opts = Options {
            disable_charset: true,
            ..Options::default()
        };
        assert_eq!(opts.with_charset(CONTENT_TEXT), "text/plain");
    }

    #[test]
    fn test_with_custom_charset() {
        let opts = Options {
            charset: "ISO-8859-1".to_string(),
            ..Options::default()
        };
        assert_eq!(opts.with_charset(CONTENT_HTML), "text/html; charset=ISO-8859-1");
    }
}
