//! Template environment construction.
//!
//! [`EngineBuilder`] captures everything that goes into a MiniJinja
//! environment — custom expression delimiters and registered helper
//! functions — so the same configuration can be replayed whenever the
//! template set is (re)parsed. Debug-mode reloads rebuild the environment
//! from scratch, and helpers registered after construction must survive
//! that rebuild; keeping them here instead of on a live `Environment`
//! makes the rebuild trivial.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use minijinja::syntax::SyntaxConfig;
use minijinja::{Environment, Value};

use crate::error::RenderError;
use crate::options::{DEFAULT_LEFT_DELIM, DEFAULT_RIGHT_DELIM};

/// A helper function callable from templates as a filter:
/// `{{ name | shout }}`.
pub(crate) type HelperFn = Arc<dyn Fn(Value) -> Result<Value, minijinja::Error> + Send + Sync>;

/// Recorded environment configuration, replayed on every (re)build.
pub(crate) struct EngineBuilder {
    left_delim: String,
    right_delim: String,
    helpers: HashMap<String, HelperFn>,
}

impl EngineBuilder {
    pub(crate) fn new(left_delim: &str, right_delim: &str) -> Self {
        Self {
            left_delim: left_delim.to_string(),
            right_delim: right_delim.to_string(),
            helpers: HashMap::new(),
        }
    }

    /// Changes the expression delimiters used by subsequent builds.
    pub(crate) fn set_delims(&mut self, left: &str, right: &str) {
        self.left_delim = left.to_string();
        self.right_delim = right.to_string();
    }

    /// Registers a helper under `name`. Replaces any previous helper with
    /// the same name.
    pub(crate) fn add_helper(&mut self, name: String, helper: HelperFn) {
        self.helpers.insert(name, helper);
    }

    /// Builds a fresh environment with the recorded configuration applied.
    ///
    /// Malformed delimiters surface here, at parse time, not when they were
    /// configured.
    pub(crate) fn build(&self) -> Result<Environment<'static>, RenderError> {
        let mut env = Environment::new();
        if self.left_delim != DEFAULT_LEFT_DELIM || self.right_delim != DEFAULT_RIGHT_DELIM {
            let syntax = SyntaxConfig::builder()
                .variable_delimiters(self.left_delim.clone(), self.right_delim.clone())
                .build()?;
            env.set_syntax(syntax);
        }
        for (name, helper) in &self.helpers {
            let helper = Arc::clone(helper);
            env.add_filter(name.clone(), move |value: Value| helper(value));
        }
        Ok(env)
    }

    /// Builds an environment containing exactly the given files, each
    /// registered under its file stem. Order matters only for readability;
    /// every file can reference every other via `include`/`extends`.
    pub(crate) fn build_with_files<P: AsRef<Path>>(
        &self,
        files: &[P],
    ) -> Result<Environment<'static>, RenderError> {
        let mut env = self.build()?;
        for file in files {
            let path = file.as_ref();
            let source = fs::read_to_string(path)?;
            env.add_template_owned(template_name(path), source)?;
        }
        Ok(env)
    }
}

/// The name a file is registered under: its stem, without extension.
/// `view/home.html` renders as `"home"`.
pub(crate) fn template_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
