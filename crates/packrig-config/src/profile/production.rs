use serde_json::Value;

use super::Profile;
use crate::collection::Placement;
use crate::context::BuildContext;
use crate::environment::{BundlerConfig, Environment};
use crate::error::Result;
use crate::plugins::{CompressionOptions, Plugin, UglifyJsOptions};

/// Minified, gzipped output with full source maps.
///
/// Appends `ModuleConcatenation`, `UglifyJs` and `Compression` after the base
/// plugins and sets `devtool: "source-map"`, `stats: "normal"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Production;

impl Profile for Production {
    fn name(&self) -> &str {
        "production"
    }

    fn extend(&self, env: &mut Environment, _ctx: &BuildContext) -> Result<()> {
        env.add_plugin(
            "ModuleConcatenation",
            Plugin::ModuleConcatenation,
            Placement::Bottom,
        );
        env.add_plugin(
            "UglifyJs",
            Plugin::UglifyJs(UglifyJsOptions::default()),
            Placement::Bottom,
        );
        env.add_plugin(
            "Compression",
            Plugin::Compression(CompressionOptions::default()),
            Placement::Bottom,
        );
        Ok(())
    }

    fn finalize(&self, config: &mut BundlerConfig) -> Result<()> {
        config.insert("devtool", Value::from("source-map"));
        config.insert("stats", Value::from("normal"));
        Ok(())
    }
}
