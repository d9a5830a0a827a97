//! Composable bundler configuration.
//!
//! An [`Environment`] gathers transform rules, plugins and base properties
//! from a [`BuildContext`]; a [`Profile`] adjusts it, and finalization
//! produces the [`BundlerConfig`] the bundler consumes.

pub mod asset_host;
pub mod collection;
pub mod context;
pub mod entries;
pub mod environment;
pub mod error;
pub mod loaders;
pub mod plugins;
pub mod profile;
pub mod settings;

// Re-export main types
pub use asset_host::AssetHost;
pub use collection::{Entry, NamedCollection, Placement};
pub use context::BuildContext;
pub use environment::{BundlerConfig, Environment, Properties};
pub use error::*;
pub use loaders::{Enforce, Rule, UseEntry};
pub use plugins::Plugin;
pub use profile::{build, profile_for, Development, Production, Profile, ProfiledEnvironment, Test};
pub use settings::{DevServerSettings, Settings};
