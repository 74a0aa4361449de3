//! Template discovery and caching.
//!
//! A [`TemplateStore`] owns one parsed template set: either the files
//! matching a glob pattern (backing [`Render::html`](crate::Render::html))
//! or a view directory with a base layout (backing
//! [`Render::view`](crate::Render::view)). The parsed set is built lazily on
//! first use and shared read-only afterwards; with the debug option on, it
//! is rebuilt on every call so edited template files are picked up without
//! restarting the application.
//!
//! The cache is an explicitly owned slot on the store, not a global:
//! rebuild-and-swap under an `RwLock`, so concurrent renders keep reading
//! the previous set while a rebuild is in progress.

use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

use minijinja::Environment;

use super::engine::{template_name, EngineBuilder};
use crate::error::RenderError;

/// Where a store's templates come from.
pub(crate) enum TemplateSource {
    /// Not configured; parsing errors with [`RenderError::NotConfigured`]
    /// naming the option that should have been set.
    Unset(&'static str),
    /// All files matching a glob pattern.
    Glob(String),
    /// All files directly inside a directory; `layout` is the stem of the
    /// base layout that content templates extend.
    Dir { root: PathBuf, layout: String },
}

pub(crate) struct TemplateStore {
    source: TemplateSource,
    cache: RwLock<Option<Arc<Environment<'static>>>>,
}

impl TemplateStore {
    pub(crate) fn new(source: TemplateSource) -> Self {
        Self {
            source,
            cache: RwLock::new(None),
        }
    }

    /// Drops the cached set so the next call re-parses. Called when
    /// configuration that affects parsing changes (delimiters, helpers).
    pub(crate) fn invalidate(&self) {
        let mut slot = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        *slot = None;
    }

    /// Returns the parsed template set, building it if needed.
    ///
    /// With `reparse` set (debug mode) the sources are read and parsed fresh
    /// on every call and the cache is left alone.
    pub(crate) fn environment(
        &self,
        engine: &EngineBuilder,
        reparse: bool,
    ) -> Result<Arc<Environment<'static>>, RenderError> {
        if !reparse {
            let slot = self.cache.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(env) = slot.as_ref() {
                return Ok(Arc::clone(env));
            }
        }

        let env = Arc::new(self.parse(engine)?);
        if !reparse {
            let mut slot = self.cache.write().unwrap_or_else(PoisonError::into_inner);
            *slot = Some(Arc::clone(&env));
        }
        Ok(env)
    }

    fn parse(&self, engine: &EngineBuilder) -> Result<Environment<'static>, RenderError> {
        match &self.source {
            TemplateSource::Unset(option) => Err(RenderError::NotConfigured(option)),
            TemplateSource::Glob(pattern) => {
                let mut env = engine.build()?;
                let mut count = 0usize;
                for entry in glob::glob(pattern)? {
                    let path = entry.map_err(|err| RenderError::Io(err.into_error()))?;
                    if !path.is_file() {
                        continue;
                    }
                    let source = fs::read_to_string(&path)?;
                    env.add_template_owned(template_name(&path), source)?;
                    count += 1;
                }
                log::debug!("parsed {} template(s) matching {:?}", count, pattern);
                Ok(env)
            }
            TemplateSource::Dir { root, layout } => {
                let mut files: Vec<PathBuf> = fs::read_dir(root)?
                    .collect::<Result<Vec<_>, _>>()?
                    .into_iter()
                    .map(|entry| entry.path())
                    .filter(|path| path.is_file())
                    .collect();
                files.sort();

                let mut env = engine.build()?;
                let mut has_layout = false;
                for path in &files {
                    let name = template_name(path);
                    has_layout = has_layout || name == *layout;
                    let source = fs::read_to_string(path)?;
                    env.add_template_owned(name, source)?;
                }
                if !has_layout {
                    return Err(RenderError::TemplateNotFound(layout.clone()));
                }
                log::debug!(
                    "parsed {} view template(s) from {:?} (layout {:?})",
                    files.len(),
                    root,
                    layout
                );
                Ok(env)
            }
        }
    }
}
