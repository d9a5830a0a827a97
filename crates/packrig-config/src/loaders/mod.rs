//! Transform rules ("loaders") telling the bundler how to process source files.

mod defaults;
mod discovery;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::collection::{NamedCollection, Placement};
use crate::context::BuildContext;
use crate::error::{ConfigError, Result};

pub use defaults::default_loaders;
pub use discovery::discover_rules;

/// A module rule: which files it applies to and the loader chain to run.
///
/// `test` and `exclude` are regular expression sources; they are emitted as
/// strings and compiled by the consumer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub test: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enforce: Option<Enforce>,

    /// Loaders applied right to left, as the bundler does
    #[serde(rename = "use", default)]
    pub uses: Vec<UseEntry>,
}

/// Rule phase relative to normal rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Enforce {
    Pre,
    Post,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UseEntry {
    pub loader: String,

    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub options: Value,
}

impl Rule {
    pub fn new(test: impl Into<String>) -> Self {
        Self {
            test: test.into(),
            exclude: None,
            enforce: None,
            uses: Vec::new(),
        }
    }

    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude = Some(pattern.into());
        self
    }

    pub fn enforce(mut self, enforce: Enforce) -> Self {
        self.enforce = Some(enforce);
        self
    }

    /// Append a loader without options.
    pub fn loader(self, loader: impl Into<String>) -> Self {
        self.loader_with(loader, Value::Null)
    }

    pub fn loader_with(mut self, loader: impl Into<String>, options: Value) -> Self {
        self.uses.push(UseEntry {
            loader: loader.into(),
            options,
        });
        self
    }

    /// Check that `test` and `exclude` compile.
    pub fn validate(&self) -> Result<()> {
        compile(&self.test)?;
        if let Some(exclude) = &self.exclude {
            compile(exclude)?;
        }
        Ok(())
    }

    /// Whether this rule applies to `path`.
    pub fn applies_to(&self, path: &str) -> Result<bool> {
        if !compile(&self.test)?.is_match(path) {
            return Ok(false);
        }
        match &self.exclude {
            Some(exclude) => Ok(!compile(exclude)?.is_match(path)),
            None => Ok(true),
        }
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|err| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        message: err.to_string(),
    })
}

/// Built-in rules followed by the rule files in `settings.loaders_path`.
///
/// A rule file named like a built-in rule replaces it in place.
pub fn build_loaders(ctx: &BuildContext) -> Result<NamedCollection<Rule>> {
    let mut loaders = default_loaders(ctx);

    if let Some(dir) = &ctx.settings().loaders_path {
        for (name, rule) in discover_rules(&ctx.resolve(dir))? {
            loaders.set(name, rule, Placement::Bottom);
        }
    }

    Ok(loaders)
}
