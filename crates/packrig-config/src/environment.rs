//! The configuration builder.
//!
//! An [`Environment`] owns three mutable pieces (loaders, plugins and base
//! properties) and projects them into a [`BundlerConfig`] when finalized.
//! Profiles mutate an environment between construction and finalization; see
//! [`crate::profile`].

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::collection::{Entry, NamedCollection, Placement};
use crate::context::BuildContext;
use crate::entries::discover_entries;
use crate::error::Result;
use crate::loaders::{build_loaders, Rule};
use crate::plugins::{base_plugins, Plugin};

/// Base properties: `entry`, `output`, `resolve`, `resolveLoader`, plus any
/// key set by a profile.
pub type Properties = IndexMap<String, Value>;

#[derive(Debug, Clone, Default)]
pub struct Environment {
    loaders: NamedCollection<Rule>,
    plugins: NamedCollection<Plugin>,
    properties: Properties,
}

impl Environment {
    /// Run the base construction: validate settings, then populate loaders,
    /// plugins and properties from the context.
    ///
    /// # Errors
    ///
    /// Fails with [`ConfigError::NoExtensions`](crate::ConfigError::NoExtensions)
    /// before touching the filesystem when no extension is configured. Entry
    /// and rule file discovery errors propagate unchanged.
    pub fn new(ctx: &BuildContext) -> Result<Self> {
        ctx.settings().validate()?;

        let loaders = build_loaders(ctx)?;
        let plugins = base_plugins(ctx);
        let properties = base_properties(ctx)?;

        debug!(
            loaders = loaders.len(),
            plugins = plugins.len(),
            root = %ctx.root().display(),
            "constructed environment"
        );

        Ok(Self {
            loaders,
            plugins,
            properties,
        })
    }

    /// Assemble an environment from already-built pieces.
    pub fn from_parts(
        loaders: NamedCollection<Rule>,
        plugins: NamedCollection<Plugin>,
        properties: Properties,
    ) -> Self {
        Self {
            loaders,
            plugins,
            properties,
        }
    }

    pub fn loaders(&self) -> &NamedCollection<Rule> {
        &self.loaders
    }

    pub fn loaders_mut(&mut self) -> &mut NamedCollection<Rule> {
        &mut self.loaders
    }

    pub fn plugins(&self) -> &NamedCollection<Plugin> {
        &self.plugins
    }

    pub fn plugins_mut(&mut self) -> &mut NamedCollection<Plugin> {
        &mut self.plugins
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub fn properties_mut(&mut self) -> &mut Properties {
        &mut self.properties
    }

    pub fn get_loader(&self, name: &str) -> Option<&Rule> {
        self.loaders.get(name)
    }

    pub fn set_loader(&mut self, name: impl Into<String>, rule: Rule, placement: Placement) {
        self.loaders.set(name, rule, placement);
    }

    pub fn add_loader(&mut self, name: impl Into<String>, rule: Rule, placement: Placement) {
        self.loaders.add(Entry::new(name, rule), placement);
    }

    pub fn remove_loader(&mut self, name: &str) -> Option<Entry<Rule>> {
        self.loaders.remove(name)
    }

    pub fn get_plugin(&self, name: &str) -> Option<&Plugin> {
        self.plugins.get(name)
    }

    pub fn set_plugin(&mut self, name: impl Into<String>, plugin: Plugin, placement: Placement) {
        self.plugins.set(name, plugin, placement);
    }

    pub fn add_plugin(&mut self, name: impl Into<String>, plugin: Plugin, placement: Placement) {
        self.plugins.add(Entry::new(name, plugin), placement);
    }

    pub fn remove_plugin(&mut self, name: &str) -> Option<Entry<Plugin>> {
        self.plugins.remove(name)
    }

    pub fn get_prop(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// Insert or replace a property, returning the previous value.
    ///
    /// A new key goes after the existing ones; a replaced key keeps its slot.
    pub fn set_prop(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.properties.insert(name.into(), value)
    }

    pub fn remove_prop(&mut self, name: &str) -> Option<Value> {
        self.properties.shift_remove(name)
    }

    /// Project the collections into a bundler configuration.
    ///
    /// Loaders become `module.rules` and plugins become `plugins`, both in
    /// collection order, written over any property of the same name. This
    /// does not change the environment, so repeated calls agree.
    pub fn to_config(&self) -> Result<BundlerConfig> {
        let rules = self
            .loaders
            .values()
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let plugins = self
            .plugins
            .values()
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut config = BundlerConfig(self.properties.clone());
        config.insert("module", json!({ "rules": rules }));
        config.insert("plugins", Value::Array(plugins));
        Ok(config)
    }

    /// Produce the final configuration, consuming the environment.
    pub fn finalize(self) -> Result<BundlerConfig> {
        let config = self.to_config()?;
        let entries = config
            .get("entry")
            .and_then(serde_json::Value::as_object)
            .map_or(0, |map| map.len());
        info!(
            entries,
            rules = self.loaders.len(),
            plugins = self.plugins.len(),
            "finalized bundler configuration"
        );
        Ok(config)
    }
}

fn base_properties(ctx: &BuildContext) -> Result<Properties> {
    let settings = ctx.settings();
    let asset_host = ctx.asset_host();
    let entries = discover_entries(ctx)?;

    let mut modules = vec![
        Value::String(ctx.resolve(&settings.source_path).to_string_lossy().into_owned()),
        Value::from("node_modules"),
    ];
    for path in &settings.resolved_paths {
        modules.push(serde_json::to_value(path)?);
    }

    let mut properties = Properties::new();
    properties.insert("entry".to_string(), serde_json::to_value(&entries)?);
    properties.insert(
        "output".to_string(),
        json!({
            "filename": "[name]-[chunkhash].js",
            "chunkFilename": "[name]-[chunkhash].chunk.js",
            "path": asset_host.path.to_string_lossy(),
            "publicPath": asset_host.public_path,
        }),
    );
    properties.insert(
        "resolve".to_string(),
        json!({
            "extensions": settings.extensions,
            "modules": modules,
        }),
    );
    properties.insert(
        "resolveLoader".to_string(),
        json!({ "modules": ["node_modules"] }),
    );
    Ok(properties)
}

/// The finalized configuration handed to the bundler.
///
/// Top-level keys keep their insertion order when serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BundlerConfig(IndexMap<String, Value>);

impl BundlerConfig {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// JSON pointer lookup (RFC 6901), e.g. `/output/publicPath`.
    pub fn pointer(&self, pointer: &str) -> Option<&Value> {
        let rest = pointer.strip_prefix('/')?;
        let (head, tail) = match rest.split_once('/') {
            Some((head, tail)) => (head, Some(tail)),
            None => (rest, None),
        };
        let value = self.0.get(&head.replace("~1", "/").replace("~0", "~"))?;
        match tail {
            Some(tail) => value.pointer(&format!("/{tail}")),
            None => Some(value),
        }
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0.into_iter().collect())
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
