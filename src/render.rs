//! The [`Render`] facade.
//!
//! One instance is constructed at application startup and shared by every
//! request handler; each handler picks the method matching the format it
//! wants to emit. Every method follows the same ordering: serialize (or
//! render) the body first, then write the status line and headers, then the
//! body. A failed serialization therefore leaves the sink untouched and the
//! handler is free to respond with an error page instead.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue, StatusCode};
use minijinja::Value;
use serde::Serialize;

use crate::error::RenderError;
use crate::options::Options;
use crate::sink::ResponseSink;
use crate::template::{template_name, EngineBuilder, TemplateSource, TemplateStore};

/// Chunk size for streaming binary/file bodies.
const STREAM_CHUNK: usize = 32 * 1024;

/// Multi-format response writer.
///
/// ```rust
/// use http::StatusCode;
/// use respond::{Options, Recorder, Render};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct User {
///     name: String,
///     age: u32,
/// }
///
/// let rnd = Render::new(Options::default());
/// let user = User { name: "John Doe".into(), age: 30 };
///
/// let mut rec = Recorder::new();
/// rnd.json(&mut rec, StatusCode::OK, &user).unwrap();
///
/// assert_eq!(rec.header("content-type"), "application/json; charset=UTF-8");
/// assert_eq!(rec.body_string(), r#"{"name":"John Doe","age":30}"#);
/// ```
///
/// Configuration happens before serving traffic, through [`Options`] or the
/// setter methods; render methods take `&self` and are safe to call from
/// multiple threads concurrently.
pub struct Render {
    opts: Options,
    engine: EngineBuilder,
    pages: TemplateStore,
    views: TemplateStore,
}

impl Default for Render {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

impl Render {
    /// Creates a renderer with the given options.
    pub fn new(opts: Options) -> Self {
        let engine = EngineBuilder::new(&opts.left_delim, &opts.right_delim);
        let pages = TemplateStore::new(match &opts.glob_pattern {
            Some(pattern) => TemplateSource::Glob(pattern.clone()),
            None => TemplateSource::Unset("glob_pattern"),
        });
        let views = TemplateStore::new(match &opts.template_dir {
            Some(root) => TemplateSource::Dir {
                root: root.clone(),
                layout: opts.layout.clone(),
            },
            None => TemplateSource::Unset("template_dir"),
        });
        Self {
            opts,
            engine,
            pages,
            views,
        }
    }

    /// The active options.
    pub fn options(&self) -> &Options {
        &self.opts
    }

    // ---- setters ---------------------------------------------------------

    /// Sets the charset appended to text-like content types.
    pub fn charset(&mut self, charset: &str) -> &mut Self {
        self.opts.charset = charset.to_string();
        self
    }

    /// Enables or disables the charset suffix entirely.
    pub fn disable_charset(&mut self, disable: bool) -> &mut Self {
        self.opts.disable_charset = disable;
        self
    }

    /// Enables or disables pretty-printed JSON bodies.
    pub fn json_indent(&mut self, indent: bool) -> &mut Self {
        self.opts.json_indent = indent;
        self
    }

    /// Enables or disables indented XML bodies.
    pub fn xml_indent(&mut self, indent: bool) -> &mut Self {
        self.opts.xml_indent = indent;
        self
    }

    /// Enables or disables unicode-escaping of `<`, `>` and `&` in JSON
    /// bodies (`<` becomes `\u003c`, and so on).
    pub fn escape_html(&mut self, escape: bool) -> &mut Self {
        self.opts.escape_html = escape;
        self
    }

    /// Changes the template expression delimiters. Any cached template sets
    /// are re-parsed on next use.
    pub fn delims(&mut self, left: &str, right: &str) -> &mut Self {
        self.opts.left_delim = left.to_string();
        self.opts.right_delim = right.to_string();
        self.engine.set_delims(left, right);
        self.pages.invalidate();
        self.views.invalidate();
        self
    }

    /// Registers a helper function usable from templates as a filter:
    /// `{{ name | shout }}`. Any cached template sets are re-parsed on next
    /// use, so the helper is available everywhere.
    ///
    /// ```rust
    /// use respond::{Render, TemplateValue};
    ///
    /// let mut rnd = Render::default();
    /// rnd.add_helper("shout", |value: TemplateValue| {
    ///     Ok(TemplateValue::from(
    ///         value.as_str().unwrap_or_default().to_uppercase(),
    ///     ))
    /// });
    /// ```
    pub fn add_helper<F>(&mut self, name: &str, helper: F) -> &mut Self
    where
        F: Fn(Value) -> Result<Value, minijinja::Error> + Send + Sync + 'static,
    {
        self.engine.add_helper(name.to_string(), Arc::new(helper));
        self.pages.invalidate();
        self.views.invalidate();
        self
    }

    // ---- format methods --------------------------------------------------

    /// Writes a `204 No Content` response: no body, no content type.
    pub fn no_content<W: ResponseSink>(&self, w: &mut W) -> Result<(), RenderError> {
        w.write_head(StatusCode::NO_CONTENT, &HeaderMap::new())?;
        Ok(())
    }

    /// Writes raw bytes without setting any header. Headers the caller has
    /// already placed on the sink are preserved.
    pub fn raw<W: ResponseSink>(
        &self,
        w: &mut W,
        status: StatusCode,
        body: &[u8],
    ) -> Result<(), RenderError> {
        w.write_head(status, &HeaderMap::new())?;
        w.write_body(body)?;
        Ok(())
    }

    /// Writes a plain-text response.
    pub fn text<W: ResponseSink>(
        &self,
        w: &mut W,
        status: StatusCode,
        body: &str,
    ) -> Result<(), RenderError> {
        let content_type = self.opts.with_charset(&self.opts.content_text);
        self.send(w, status, &content_type, body.as_bytes())
    }

    /// Serializes `value` as JSON and writes it.
    ///
    /// Honors the `json_indent`, `json_prefix` and `escape_html` options.
    pub fn json<W: ResponseSink, T: Serialize>(
        &self,
        w: &mut W,
        status: StatusCode,
        value: &T,
    ) -> Result<(), RenderError> {
        let payload = self.json_payload(value)?;
        let body = format!("{}{}", self.opts.json_prefix, payload);
        let content_type = self.opts.with_charset(&self.opts.content_json);
        self.send(w, status, &content_type, body.as_bytes())
    }

    /// Serializes `value` as JSON wrapped in `callback(...);`.
    ///
    /// Errors with [`RenderError::EmptyCallback`] when the callback name is
    /// empty; nothing is written in that case.
    pub fn jsonp<W: ResponseSink, T: Serialize>(
        &self,
        w: &mut W,
        status: StatusCode,
        callback: &str,
        value: &T,
    ) -> Result<(), RenderError> {
        if callback.is_empty() {
            return Err(RenderError::EmptyCallback);
        }
        let body = format!("{}({});", callback, self.json_payload(value)?);
        let content_type = self.opts.with_charset(&self.opts.content_jsonp);
        self.send(w, status, &content_type, body.as_bytes())
    }

    /// Serializes `value` as XML and writes it.
    ///
    /// Honors the `xml_indent` and `xml_prefix` options.
    pub fn xml<W: ResponseSink, T: Serialize>(
        &self,
        w: &mut W,
        status: StatusCode,
        value: &T,
    ) -> Result<(), RenderError> {
        let mut payload = String::new();
        let mut ser = quick_xml::se::Serializer::new(&mut payload);
        if self.opts.xml_indent {
            ser.indent(' ', 2);
        }
        value.serialize(ser)?;

        let body = format!("{}{}", self.opts.xml_prefix, payload);
        let content_type = self.opts.with_charset(&self.opts.content_xml);
        self.send(w, status, &content_type, body.as_bytes())
    }

    /// Serializes `value` as YAML and writes it.
    pub fn yaml<W: ResponseSink, T: Serialize>(
        &self,
        w: &mut W,
        status: StatusCode,
        value: &T,
    ) -> Result<(), RenderError> {
        let body = serde_yaml::to_string(value)?;
        let content_type = self.opts.with_charset(&self.opts.content_yaml);
        self.send(w, status, &content_type, body.as_bytes())
    }

    /// Writes a pre-rendered HTML string.
    pub fn html_string<W: ResponseSink>(
        &self,
        w: &mut W,
        status: StatusCode,
        body: &str,
    ) -> Result<(), RenderError> {
        let content_type = self.opts.with_charset(&self.opts.content_html);
        self.send(w, status, &content_type, body.as_bytes())
    }

    /// Renders the named template from the configured glob set.
    ///
    /// Unknown (or empty) names error with [`RenderError::TemplateNotFound`];
    /// nothing is written on any error. With the `debug` option set, the
    /// glob is re-expanded and re-parsed on every call.
    pub fn html<W: ResponseSink, T: Serialize>(
        &self,
        w: &mut W,
        status: StatusCode,
        name: &str,
        data: &T,
    ) -> Result<(), RenderError> {
        let env = self.pages.environment(&self.engine, self.opts.debug)?;
        let body = env.get_template(name)?.render(Value::from_serialize(data))?;
        let content_type = self.opts.with_charset(&self.opts.content_html);
        self.send(w, status, &content_type, body.as_bytes())
    }

    /// Renders from an explicit, ordered list of template files parsed for
    /// this call only.
    ///
    /// The last file's stem names the entry template; earlier files (layouts,
    /// shared fragments) are available to it via `include`/`extends`. The
    /// per-call set never consults or touches the cached glob set.
    pub fn template<W: ResponseSink, T: Serialize, P: AsRef<Path>>(
        &self,
        w: &mut W,
        status: StatusCode,
        files: &[P],
        data: &T,
    ) -> Result<(), RenderError> {
        let entry = files
            .last()
            .map(|file| template_name(file.as_ref()))
            .ok_or(RenderError::EmptyTemplateList)?;
        let env = self.engine.build_with_files(files)?;
        let body = env
            .get_template(&entry)?
            .render(Value::from_serialize(data))?;
        let content_type = self.opts.with_charset(&self.opts.content_html);
        self.send(w, status, &content_type, body.as_bytes())
    }

    /// Renders a named content template from the configured view directory,
    /// composed with the base layout it extends.
    pub fn view<W: ResponseSink, T: Serialize>(
        &self,
        w: &mut W,
        status: StatusCode,
        name: &str,
        data: &T,
    ) -> Result<(), RenderError> {
        let env = self.views.environment(&self.engine, self.opts.debug)?;
        let body = env.get_template(name)?.render(Value::from_serialize(data))?;
        let content_type = self.opts.with_charset(&self.opts.content_html);
        self.send(w, status, &content_type, body.as_bytes())
    }

    /// Streams `reader` as a binary response.
    ///
    /// Sets `Content-Disposition: inline` when `inline` is true, otherwise
    /// `attachment; filename="<filename>"`. The content type is the
    /// configured binary type, never charset-suffixed.
    pub fn binary<W: ResponseSink, R: Read>(
        &self,
        w: &mut W,
        status: StatusCode,
        reader: R,
        filename: &str,
        inline: bool,
    ) -> Result<(), RenderError> {
        self.stream(w, status, &self.opts.content_binary, reader, filename, inline)
    }

    /// Streams `reader` as a file response with a plain-text content type.
    pub fn file<W: ResponseSink, R: Read>(
        &self,
        w: &mut W,
        status: StatusCode,
        reader: R,
        filename: &str,
        inline: bool,
    ) -> Result<(), RenderError> {
        let content_type = self.opts.with_charset(&self.opts.content_text);
        self.stream(w, status, &content_type, reader, filename, inline)
    }

    /// Opens the file at `path` and serves it inline (rendered in the
    /// browser). Errors before writing anything if the file cannot be
    /// opened.
    pub fn file_view<W: ResponseSink>(
        &self,
        w: &mut W,
        status: StatusCode,
        path: impl AsRef<Path>,
        filename: &str,
    ) -> Result<(), RenderError> {
        let file = File::open(path)?;
        self.file(w, status, file, filename, true)
    }

    /// Opens the file at `path` and serves it as a download attachment.
    pub fn file_download<W: ResponseSink>(
        &self,
        w: &mut W,
        status: StatusCode,
        path: impl AsRef<Path>,
        filename: &str,
    ) -> Result<(), RenderError> {
        let file = File::open(path)?;
        self.file(w, status, file, filename, false)
    }

    // ---- internals -------------------------------------------------------

    /// JSON body without the configured prefix (which JSONP must not carry).
    fn json_payload<T: Serialize>(&self, value: &T) -> Result<String, RenderError> {
        let mut payload = if self.opts.json_indent {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        if self.opts.escape_html {
            payload = escape_html_json(&payload);
        }
        Ok(payload)
    }

    fn send<W: ResponseSink>(
        &self,
        w: &mut W,
        status: StatusCode,
        content_type: &str,
        body: &[u8],
    ) -> Result<(), RenderError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_str(content_type)?);
        w.write_head(status, &headers)?;
        w.write_body(body)?;
        Ok(())
    }

    fn stream<W: ResponseSink, R: Read>(
        &self,
        w: &mut W,
        status: StatusCode,
        content_type: &str,
        mut reader: R,
        filename: &str,
        inline: bool,
    ) -> Result<(), RenderError> {
        let disposition = if inline {
            "inline".to_string()
        } else {
            format!("attachment; filename=\"{}\"", filename)
        };
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_str(content_type)?);
        headers.insert(CONTENT_DISPOSITION, HeaderValue::from_str(&disposition)?);
        w.write_head(status, &headers)?;

        let mut buf = vec![0u8; STREAM_CHUNK];
        loop {
            let n = reader.read(&mut buf)?;
            if n == 0 {
                break;
            }
            w.write_body(&buf[..n])?;
        }
        Ok(())
    }
}

/// Escapes `<`, `>` and `&` in serialized JSON as `\uXXXX` sequences so the
/// payload can be embedded in HTML without closing a script tag.
fn escape_html_json(payload: &str) -> String {
    payload
        .replace('&', "\\u0026")
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::Recorder;

    #[derive(Serialize)]
    struct User {
        name: String,
        age: u32,
    }

    fn user() -> User {
        User {
            name: "John Doe".to_string(),
            age: 30,
        }
    }

    #[test]
    fn test_json_payload_compact() {
        let rnd = Render::default();
        let payload = rnd.json_payload(&user()).unwrap();
        assert_eq!(payload, r#"{"name":"John Doe","age":30}"#);
    }

    #[test]
    fn test_json_payload_indent() {
        let rnd = Render::new(Options {
            json_indent: true,
            ..Options::default()
        });
        let payload = rnd.json_payload(&user()).unwrap();
        assert_eq!(payload, "{\n  \"name\": \"John Doe\",\n  \"age\": 30\n}");
    }

    #[test]
    fn test_json_payload_escape_html() {
        let rnd = Render::new(Options {
            escape_html: true,
            ..Options::default()
        });
        #[derive(Serialize)]
        struct Page {
            body: String,
        }
        let payload = rnd
            .json_payload(&Page {
                body: "<b>hi & bye</b>".to_string(),
            })
            .unwrap();
        assert_eq!(payload, r#"{"body":"\u003cb\u003ehi \u0026 bye\u003c/b\u003e"}"#);
    }

    #[test]
    fn test_setters() {
        let mut rnd = Render::default();
        rnd.charset("ISO-8859-1")
            .disable_charset(true)
            .json_indent(true)
            .xml_indent(true)
            .escape_html(true);
        assert_eq!(rnd.options().charset, "ISO-8859-1");
        assert!(rnd.options().disable_charset);
        assert!(rnd.options().json_indent);
        assert!(rnd.options().xml_indent);
        assert!(rnd.options().escape_html);
    }

    #[test]
    fn test_delims_setter() {
        let mut rnd = Render::default();
        rnd.delims("[[", "]]");
        assert_eq!(rnd.options().left_delim, "[[");
        assert_eq!(rnd.options().right_delim, "]]");
    }

    #[test]
    fn test_jsonp_empty_callback_writes_nothing() {
        let rnd = Render::default();
        let mut rec = Recorder::new();
        let result = rnd.jsonp(&mut rec, StatusCode::OK, "", &user());
        assert!(matches!(result, Err(RenderError::EmptyCallback)));
        assert!(!rec.head_written());
        assert!(rec.body().is_empty());
    }

    #[test]
    fn test_html_without_glob_pattern_errors() {
        let rnd = Render::default();
        let mut rec = Recorder::new();
        let result = rnd.html(&mut rec, StatusCode::OK, "home", &());
        assert!(matches!(result, Err(RenderError::NotConfigured("glob_pattern"))));
        assert!(!rec.head_written());
    }

    #[test]
    fn test_view_without_template_dir_errors() {
        let rnd = Render::default();
        let mut rec = Recorder::new();
        let result = rnd.view(&mut rec, StatusCode::OK, "home", &());
        assert!(matches!(result, Err(RenderError::NotConfigured("template_dir"))));
        assert!(!rec.head_written());
    }

    #[test]
    fn test_template_empty_file_list_errors() {
        let rnd = Render::default();
        let mut rec = Recorder::new();
        let files: [&Path; 0] = [];
        let result = rnd.template(&mut rec, StatusCode::OK, &files, &());
        assert!(matches!(result, Err(RenderError::EmptyTemplateList)));
        assert!(!rec.head_written());
    }

    #[test]
    fn test_escape_html_json() {
        assert_eq!(escape_html_json("a<b"), "a\\u003cb");
        assert_eq!(escape_html_json("plain"), "plain");
    }
}
