//! Point-in-time inputs for building an environment.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use path_clean::PathClean;

use crate::asset_host::{AssetHost, ASSET_HOST_VAR};
use crate::error::Result;
use crate::settings::Settings;

/// Everything construction reads from the outside world, captured once.
///
/// Environment variables are snapshotted here; nothing downstream reads the
/// process environment again.
#[derive(Debug, Clone)]
pub struct BuildContext {
    root: PathBuf,
    settings: Settings,
    env: BTreeMap<String, String>,
    asset_host: AssetHost,
}

impl BuildContext {
    /// Create a context from explicit inputs.
    ///
    /// A relative `root` is resolved against the current directory.
    pub fn new(
        root: impl AsRef<Path>,
        settings: Settings,
        env: BTreeMap<String, String>,
    ) -> Result<Self> {
        let root = absolute_root(root.as_ref())?;

        let asset_host = AssetHost::resolve(
            &root,
            &settings,
            env.get(ASSET_HOST_VAR).map(String::as_str),
        );

        Ok(Self {
            root,
            settings,
            env,
            asset_host,
        })
    }

    /// Snapshot the process environment and load settings for `profile`.
    ///
    /// This is the only place the process environment is read: the snapshot
    /// and the `PACKRIG_*` settings overrides are taken here, at startup.
    /// Variables whose name or value is not valid UTF-8 are left out of the
    /// snapshot.
    pub fn from_process(root: impl AsRef<Path>, profile: &str) -> Result<Self> {
        let root = absolute_root(root.as_ref())?;
        let env = std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect();
        let settings = Settings::load(&root, profile)?;
        Self::new(root, settings, env)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn env(&self) -> &BTreeMap<String, String> {
        &self.env
    }

    pub fn asset_host(&self) -> &AssetHost {
        &self.asset_host
    }

    /// `path` resolved against the project root and lexically cleaned.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path).clean()
    }
}

fn absolute_root(root: &Path) -> Result<PathBuf> {
    if root.is_absolute() {
        Ok(root.clean())
    } else {
        Ok(std::env::current_dir()?.join(root).clean())
    }
}
