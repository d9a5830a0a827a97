//! Plugin descriptors.
//!
//! A plugin is emitted as `{"plugin": <kind>, "options": {...}}`; the consumer
//! maps the kind to a constructor and passes the options through. Plugins
//! without options omit the `options` key.

use std::collections::BTreeMap;

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::collection::{Entry, NamedCollection, Placement};
use crate::context::BuildContext;

#[derive(Debug, Clone, PartialEq)]
pub enum Plugin {
    /// Injects the captured environment variables into the build
    Environment(BTreeMap<String, String>),
    ExtractText {
        filename: String,
    },
    Manifest(ManifestOptions),
    ModuleConcatenation,
    UglifyJs(UglifyJsOptions),
    Compression(CompressionOptions),
    NamedModules,
    HotModuleReplacement,
    /// Any other plugin, by constructor name; `arguments` become its options
    Custom {
        constructor: String,
        arguments: Value,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestOptions {
    pub public_path: String,
    pub write_to_file_emit: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UglifyJsOptions {
    pub source_map: bool,
    pub compress: UglifyCompress,
    pub output: UglifyOutput,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UglifyCompress {
    pub warnings: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UglifyOutput {
    pub comments: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressionOptions {
    pub asset: String,
    pub algorithm: String,
    /// Regex source for the files to compress
    pub test: String,
}

impl Default for UglifyJsOptions {
    fn default() -> Self {
        Self {
            source_map: true,
            compress: UglifyCompress { warnings: false },
            output: UglifyOutput { comments: false },
        }
    }
}

impl Default for CompressionOptions {
    fn default() -> Self {
        Self {
            asset: "[path].gz[query]".to_string(),
            algorithm: "gzip".to_string(),
            test: r"\.(js|css|html|json|ico|svg|eot|otf|ttf)$".to_string(),
        }
    }
}

impl Plugin {
    pub fn custom(constructor: impl Into<String>, arguments: Value) -> Self {
        Plugin::Custom {
            constructor: constructor.into(),
            arguments,
        }
    }

    /// Constructor name the consumer instantiates.
    pub fn kind(&self) -> &str {
        match self {
            Plugin::Environment(_) => "Environment",
            Plugin::ExtractText { .. } => "ExtractText",
            Plugin::Manifest(_) => "Manifest",
            Plugin::ModuleConcatenation => "ModuleConcatenation",
            Plugin::UglifyJs(_) => "UglifyJs",
            Plugin::Compression(_) => "Compression",
            Plugin::NamedModules => "NamedModules",
            Plugin::HotModuleReplacement => "HotModuleReplacement",
            Plugin::Custom { constructor, .. } => constructor.as_str(),
        }
    }
}

#[derive(Serialize)]
struct ExtractTextOptions<'a> {
    filename: &'a str,
}

impl Serialize for Plugin {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("plugin", self.kind())?;
        match self {
            Plugin::Environment(vars) => map.serialize_entry("options", vars)?,
            Plugin::ExtractText { filename } => map.serialize_entry(
                "options",
                &ExtractTextOptions {
                    filename: filename.as_str(),
                },
            )?,
            Plugin::Manifest(options) => map.serialize_entry("options", options)?,
            Plugin::UglifyJs(options) => map.serialize_entry("options", options)?,
            Plugin::Compression(options) => map.serialize_entry("options", options)?,
            Plugin::Custom { arguments, .. } if !arguments.is_null() => {
                map.serialize_entry("options", arguments)?
            }
            Plugin::ModuleConcatenation
            | Plugin::NamedModules
            | Plugin::HotModuleReplacement
            | Plugin::Custom { .. } => {}
        }
        map.end()
    }
}

/// `Environment`, `ExtractText` and `Manifest`, in that order.
pub fn base_plugins(ctx: &BuildContext) -> NamedCollection<Plugin> {
    let plugins = [
        Plugin::Environment(ctx.env().clone()),
        Plugin::ExtractText {
            filename: "[name]-[contenthash].css".to_string(),
        },
        Plugin::Manifest(ManifestOptions {
            public_path: ctx.asset_host().public_path.clone(),
            write_to_file_emit: true,
        }),
    ];

    let mut collection = NamedCollection::new();
    for plugin in plugins {
        let name = plugin.kind().to_string();
        collection.add(Entry::new(name, plugin), Placement::Bottom);
    }
    collection
}
