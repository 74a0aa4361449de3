//! # respond — multi-format HTTP response writing
//!
//! `respond` writes HTTP responses in plain text, JSON, JSONP, XML, YAML,
//! HTML (via templates), and raw binary/file streams, with correct
//! `Content-Type` headers, optional indentation and prefixing, and optional
//! HTML-escaping of JSON bodies. It is a library: it has no server of its
//! own, and is called synchronously from request handlers of whatever web
//! framework embeds it, through the [`ResponseSink`] trait.
//!
//! ## Core Concepts
//!
//! - [`Options`]: all formatting knobs, read on every render call
//! - [`Render`]: the facade, one method per output format
//! - [`ResponseSink`]: where rendered responses go; implement it once for
//!   your framework ([`Recorder`] is the in-memory one for tests)
//! - Template modes: glob set, explicit per-call file list, and a view
//!   directory with a base layout — see the [`Render::html`],
//!   [`Render::template`] and [`Render::view`] docs
//!
//! ## Quick Start
//!
//! ```rust
//! use http::StatusCode;
//! use respond::{Options, Recorder, Render};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct User {
//!     name: String,
//!     age: u32,
//! }
//!
//! let rnd = Render::new(Options::default());
//! let user = User { name: "John Doe".into(), age: 30 };
//!
//! // In a real handler `rec` is your framework's response, adapted
//! // through the ResponseSink trait.
//! let mut rec = Recorder::new();
//! rnd.json(&mut rec, StatusCode::OK, &user)?;
//!
//! assert_eq!(rec.header("content-type"), "application/json; charset=UTF-8");
//! assert_eq!(rec.body_string(), r#"{"name":"John Doe","age":30}"#);
//! # Ok::<(), respond::RenderError>(())
//! ```
//!
//! ## HTML Templates
//!
//! Templates are MiniJinja files resolved by file stem. Point a renderer at
//! a glob pattern and every matching file becomes addressable by name;
//! templates reference each other with `{% include %}` and `{% extends %}`:
//!
//! ```rust,ignore
//! let rnd = Render::new(Options {
//!     glob_pattern: Some("templates/*.html".into()),
//!     ..Options::default()
//! });
//! rnd.html(&mut w, StatusCode::OK, "home", &data)?;
//! ```
//!
//! With `debug: true` the template set is re-parsed on every call, so edits
//! to template files show up without restarting.
//!
//! ## Errors
//!
//! Every method returns [`RenderError`]. Bodies are serialized before the
//! status line is written, so a failed render leaves the sink untouched and
//! the handler decides what to send instead.

mod error;
mod options;
mod render;
mod sink;
mod template;

pub use error::RenderError;
pub use options::{
    Options, CONTENT_BINARY, CONTENT_HTML, CONTENT_JSON, CONTENT_JSONP, CONTENT_TEXT, CONTENT_XML,
    CONTENT_YAML, DEFAULT_CHARSET, DEFAULT_LAYOUT, DEFAULT_LEFT_DELIM, DEFAULT_RIGHT_DELIM,
};
pub use render::Render;
pub use sink::{Recorder, ResponseSink};

// Helper functions registered via `Render::add_helper` use the template
// engine's value and error types directly.
pub use minijinja::{Error as TemplateError, Value as TemplateValue};

// Status and header types come from the `http` crate; re-exported so
// embedders don't need a direct dependency for the common case.
pub use http::{HeaderMap, StatusCode};
