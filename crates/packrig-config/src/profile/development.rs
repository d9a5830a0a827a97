use serde_json::{json, Value};

use super::Profile;
use crate::collection::Placement;
use crate::context::BuildContext;
use crate::environment::{BundlerConfig, Environment};
use crate::error::Result;
use crate::plugins::Plugin;

/// Readable output for local work.
///
/// Adds `NamedModules` (and `HotModuleReplacement` when the dev server has
/// HMR on), turns on `output.pathinfo`, derives `devServer` from the
/// `dev_server` settings, and sets a fast eval source map.
#[derive(Debug, Clone, Copy, Default)]
pub struct Development;

impl Profile for Development {
    fn name(&self) -> &str {
        "development"
    }

    fn extend(&self, env: &mut Environment, ctx: &BuildContext) -> Result<()> {
        env.set_plugin("NamedModules", Plugin::NamedModules, Placement::Bottom);

        if let Some(output) = env
            .properties_mut()
            .get_mut("output")
            .and_then(Value::as_object_mut)
        {
            output.insert("pathinfo".to_string(), Value::Bool(true));
        }

        let Some(dev_server) = &ctx.settings().dev_server else {
            return Ok(());
        };

        if dev_server.hmr {
            env.set_plugin(
                "HotModuleReplacement",
                Plugin::HotModuleReplacement,
                Placement::Bottom,
            );
        }

        let asset_host = ctx.asset_host();
        env.set_prop(
            "devServer",
            json!({
                "host": dev_server.host,
                "port": dev_server.port,
                "https": dev_server.https,
                "hot": dev_server.hmr,
                "compress": dev_server.compress,
                "headers": dev_server.headers,
                "contentBase": asset_host.path.to_string_lossy(),
                "publicPath": asset_host.public_path,
                "historyApiFallback": true,
                "overlay": true,
            }),
        );
        Ok(())
    }

    fn finalize(&self, config: &mut BundlerConfig) -> Result<()> {
        config.insert("devtool", Value::from("cheap-eval-source-map"));
        config.insert("stats", json!({ "errorDetails": true }));
        Ok(())
    }
}
