use serde_json::json;

use super::{Enforce, Rule};
use crate::collection::{Entry, NamedCollection, Placement};
use crate::context::BuildContext;

const NODE_MODULES: &str = "node_modules";

/// The built-in rule set, in application order:
/// `babel`, `coffee`, `erb`, `file`, `style`.
pub fn default_loaders(ctx: &BuildContext) -> NamedCollection<Rule> {
    let settings = ctx.settings();
    let babel_cache = ctx.resolve(settings.cache_path.join("babel-loader"));
    let source_root = ctx.resolve(&settings.source_path);

    let rules = [
        (
            "babel",
            Rule::new(r"\.(js|jsx)?(\.erb)?$")
                .exclude(NODE_MODULES)
                .loader_with(
                    "babel-loader",
                    json!({ "cacheDirectory": babel_cache.to_string_lossy() }),
                ),
        ),
        (
            "coffee",
            Rule::new(r"\.coffee(\.erb)?$").loader("coffee-loader"),
        ),
        (
            "erb",
            Rule::new(r"\.erb$")
                .enforce(Enforce::Pre)
                .exclude(NODE_MODULES)
                .loader_with("rails-erb-loader", json!({ "runner": "bin/rails runner" })),
        ),
        (
            "file",
            Rule::new(r"\.(jpg|jpeg|png|gif|tiff|ico|svg|eot|otf|ttf|woff|woff2)$").loader_with(
                "file-loader",
                json!({
                    "name": "[path][name]-[hash].[ext]",
                    "context": source_root.to_string_lossy(),
                }),
            ),
        ),
        (
            "style",
            Rule::new(r"\.(scss|sass|css)$")
                .loader("style-loader")
                .loader_with(
                    "css-loader",
                    json!({ "minimize": false, "sourceMap": true, "importLoaders": 2 }),
                )
                .loader_with("postcss-loader", json!({ "sourceMap": true }))
                .loader_with("sass-loader", json!({ "sourceMap": true })),
        ),
    ];

    let mut loaders = NamedCollection::new();
    for (name, rule) in rules {
        loaders.add(Entry::new(name, rule), Placement::Bottom);
    }
    loaders
}
