//! Error type for response rendering.
//!
//! All render methods return [`RenderError`]. Serialization backends and the
//! template engine each contribute a variant via `From`, so `?` works
//! throughout the crate; the embedding handler decides how to surface a
//! failure (log it, send an error page, or ignore it). The library never
//! retries.

use thiserror::Error;

/// Errors that can occur while rendering a response.
#[derive(Debug, Error)]
pub enum RenderError {
    /// JSON serialization of the response value failed.
    #[error("json serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization of the response value failed.
    #[error("yaml serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// XML serialization of the response value failed.
    #[error("xml serialization failed: {0}")]
    Xml(#[from] quick_xml::DeError),

    /// No template with the requested name exists in the parsed set.
    #[error("template not found: {0:?}")]
    TemplateNotFound(String),

    /// Template syntax or rendering failure.
    #[error("template error: {0}")]
    Template(minijinja::Error),

    /// A template method was called without its source being configured
    /// (e.g. `html` without a glob pattern, `view` without a directory).
    #[error("no template source configured: set {0}")]
    NotConfigured(&'static str),

    /// `template` was called with an empty file list.
    #[error("no template files given")]
    EmptyTemplateList,

    /// JSONP requires a non-empty callback name.
    #[error("jsonp callback name is empty")]
    EmptyCallback,

    /// The configured template glob pattern is malformed.
    #[error("invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// A configured content-type or charset produced an invalid header.
    #[error("invalid header value: {0}")]
    Header(#[from] http::header::InvalidHeaderValue),

    /// I/O failure: reading a template file, opening a served file, or
    /// writing to the response sink.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<minijinja::Error> for RenderError {
    fn from(err: minijinja::Error) -> Self {
        match err.kind() {
            minijinja::ErrorKind::TemplateNotFound => {
                RenderError::TemplateNotFound(err.name().unwrap_or_default().to_string())
            }
            _ => RenderError::Template(err),
        }
    }
}
