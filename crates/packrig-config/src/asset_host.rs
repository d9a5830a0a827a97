//! Output directory and public URL prefix for emitted assets.

use std::path::{Path, PathBuf};

use path_clean::PathClean;
use serde::Serialize;

use crate::settings::Settings;

/// Variable naming a CDN or asset server in the environment snapshot.
pub const ASSET_HOST_VAR: &str = "ASSET_HOST";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetHost {
    /// Absolute directory the bundler writes into
    pub path: PathBuf,
    /// URL prefix under which the emitted files are served, always ending in `/`
    pub public_path: String,
}

impl AssetHost {
    /// Resolve against an absolute project `root`.
    ///
    /// `host` is the value of [`ASSET_HOST_VAR`], if set.
    pub fn resolve(root: &Path, settings: &Settings, host: Option<&str>) -> Self {
        let path = root
            .join(&settings.public_root_path)
            .join(&settings.public_output_path)
            .clean();
        let public_path = format_public_path(host.unwrap_or_default(), &settings.public_output_path);
        Self { path, public_path }
    }
}

/// Join an optional host and an output path into a public path.
///
/// Outer slashes are dropped from both parts and an empty path serves from
/// the root. A host without an `http(s)` scheme becomes protocol-relative.
pub fn format_public_path(host: &str, path: &str) -> String {
    let host = host.trim_matches('/');
    let path = path.trim_matches('/');
    let path = if path.is_empty() {
        String::from("/")
    } else {
        format!("/{path}/")
    };

    if host.is_empty() {
        path
    } else if host.get(..4).is_some_and(|scheme| scheme.eq_ignore_ascii_case("http")) {
        format!("{host}{path}")
    } else {
        format!("//{host}{path}")
    }
}
