//! Project settings shared by every profile.
//!
//! Settings live in `config/packrig.yml`, one top-level section per profile:
//!
//! ```yaml
//! default:
//!   source_path: app/javascript
//!   source_entry_path: packs
//!   extensions: [.js, .coffee]
//!
//! production:
//!   public_output_path: assets
//! ```
//!
//! Values under `default` apply to every profile and the selected profile's
//! section overrides them. `PACKRIG_*` environment variables override both
//! (nested keys use a double underscore, e.g. `PACKRIG_DEV_SERVER__PORT`).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use figment::providers::{Env, Format as _, Serialized, Yaml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Settings file location, relative to the project root.
pub const SETTINGS_FILE: &str = "config/packrig.yml";

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "PACKRIG_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Extensions compiled as entry points and tried during resolution
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Root of the front-end sources
    #[serde(default = "default_source_path")]
    pub source_path: PathBuf,

    /// Entry point directory, relative to `source_path`
    #[serde(default = "default_source_entry_path")]
    pub source_entry_path: PathBuf,

    /// Extra module resolution roots
    #[serde(default)]
    pub resolved_paths: Vec<PathBuf>,

    /// Directory served as the web root
    #[serde(default = "default_public_root_path")]
    pub public_root_path: PathBuf,

    /// Output directory under `public_root_path`, also the public URL segment
    #[serde(default = "default_public_output_path")]
    pub public_output_path: String,

    #[serde(default = "default_cache_path")]
    pub cache_path: PathBuf,

    /// Directory of `*.json` / `*.toml` rule files merged over the built-in loaders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loaders_path: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev_server: Option<DevServerSettings>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DevServerSettings {
    #[serde(default = "default_dev_host")]
    pub host: String,

    #[serde(default = "default_dev_port")]
    pub port: u16,

    #[serde(default)]
    pub https: bool,

    /// Hot module replacement
    #[serde(default)]
    pub hmr: bool,

    #[serde(default = "default_true")]
    pub compress: bool,

    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            source_path: default_source_path(),
            source_entry_path: default_source_entry_path(),
            resolved_paths: Vec::new(),
            public_root_path: default_public_root_path(),
            public_output_path: default_public_output_path(),
            cache_path: default_cache_path(),
            loaders_path: None,
            dev_server: None,
        }
    }
}

impl Default for DevServerSettings {
    fn default() -> Self {
        Self {
            host: default_dev_host(),
            port: default_dev_port(),
            https: false,
            hmr: false,
            compress: true,
            headers: BTreeMap::new(),
        }
    }
}

impl Settings {
    /// Load `config/packrig.yml` under `root` for `profile`, with `PACKRIG_*`
    /// overrides from the process environment.
    ///
    /// A missing settings file is not an error; defaults apply.
    pub fn load(root: impl AsRef<Path>, profile: &str) -> Result<Self> {
        let path = root.as_ref().join(SETTINGS_FILE);
        let settings: Settings = Self::file_figment(&path, profile)
            .merge(Env::prefixed(ENV_PREFIX).split("__").global())
            .extract()?;
        tracing::debug!(path = %path.display(), profile, "loaded settings");
        Ok(settings)
    }

    /// Load a settings file for `profile` without consulting the environment.
    pub fn load_file(path: impl AsRef<Path>, profile: &str) -> Result<Self> {
        Ok(Self::file_figment(path.as_ref(), profile).extract()?)
    }

    fn file_figment(path: &Path, profile: &str) -> Figment {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Yaml::file(path).nested())
            .select(profile)
    }

    /// Check the invariants construction relies on.
    pub fn validate(&self) -> Result<()> {
        if self.extensions.is_empty() {
            return Err(ConfigError::NoExtensions);
        }

        if let Some(blank) = self.extensions.iter().find(|ext| ext.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "extensions".to_string(),
                hint: format!("extension {blank:?} is blank; remove it or name a suffix like .js"),
            });
        }

        Ok(())
    }

    /// Entry point directory relative to the project root.
    pub fn entry_root(&self) -> PathBuf {
        self.source_path.join(&self.source_entry_path)
    }
}

fn default_extensions() -> Vec<String> {
    [".js", ".jsx", ".coffee", ".erb", ".css", ".scss", ".sass"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_source_path() -> PathBuf {
    PathBuf::from("app/javascript")
}

fn default_source_entry_path() -> PathBuf {
    PathBuf::from("packs")
}

fn default_public_root_path() -> PathBuf {
    PathBuf::from("public")
}

fn default_public_output_path() -> String {
    "packs".to_string()
}

fn default_cache_path() -> PathBuf {
    PathBuf::from("tmp/cache/packrig")
}

fn default_dev_host() -> String {
    "localhost".to_string()
}

fn default_dev_port() -> u16 {
    3035
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass_validation() {
        let settings = Settings::default();
        settings.validate().unwrap();
        assert_eq!(settings.entry_root(), PathBuf::from("app/javascript/packs"));
    }

    #[test]
    fn empty_extensions_fail_fast() {
        let settings = Settings {
            extensions: vec![],
            ..Settings::default()
        };
        assert!(matches!(settings.validate(), Err(ConfigError::NoExtensions)));
    }

    #[test]
    fn blank_extension_is_rejected() {
        let settings = Settings {
            extensions: vec![".js".to_string(), "  ".to_string()],
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn env_overrides_file_and_nested_keys() {
        figment::Jail::expect_with(|jail| {
            std::fs::create_dir_all(jail.directory().join("config")).map_err(|e| e.to_string())?;
            jail.create_file(
                SETTINGS_FILE,
                "default:\n  public_output_path: assets\ndevelopment:\n  dev_server:\n    host: 0.0.0.0\n",
            )?;
            jail.set_env("PACKRIG_PUBLIC_OUTPUT_PATH", "static");
            jail.set_env("PACKRIG_DEV_SERVER__PORT", "4000");

            let settings =
                Settings::load(jail.directory(), "development").map_err(|e| e.to_string())?;
            assert_eq!(settings.public_output_path, "static");

            let dev_server = settings.dev_server.expect("dev_server from file and env");
            assert_eq!(dev_server.host, "0.0.0.0");
            assert_eq!(dev_server.port, 4000);
            assert!(dev_server.compress);
            Ok(())
        });
    }

    #[test]
    fn load_file_ignores_env() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("packrig.yml", "default:\n  public_output_path: assets\n")?;
            jail.set_env("PACKRIG_PUBLIC_OUTPUT_PATH", "static");

            let settings = Settings::load_file(jail.directory().join("packrig.yml"), "production")
                .map_err(|e| e.to_string())?;
            assert_eq!(settings.public_output_path, "assets");
            Ok(())
        });
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let settings = Settings::load_file(dir.path().join("absent.yml"), "production").unwrap();
        assert_eq!(settings, Settings::default());
    }
}
