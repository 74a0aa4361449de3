//! HTML template support.
//!
//! Three ways to resolve templates, mirroring the three template methods on
//! [`Render`](crate::Render):
//!
//! - Glob set ([`html`](crate::Render::html)): every file matching the
//!   configured pattern is parsed once; templates are looked up by file
//!   stem and can reference each other with `{% include %}` /
//!   `{% extends %}`.
//! - Explicit list ([`template`](crate::Render::template)): the given files
//!   are parsed for that call only, never touching the cached sets; the
//!   last file's stem is the entry template.
//! - View directory ([`view`](crate::Render::view)): a flat directory of
//!   content fragments plus one base layout; content templates extend the
//!   layout by its configured stem (`base` by default).
//!
//! With the debug option set, cached sets are re-parsed on every call so
//! template edits show up live during development.

mod engine;
mod store;

pub(crate) use engine::{template_name, EngineBuilder, HelperFn};
pub(crate) use store::{TemplateSource, TemplateStore};
