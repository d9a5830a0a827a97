//! Environment profiles.
//!
//! A profile specializes the base [`Environment`] in two steps:
//!
//! 1. [`Profile::extend`] runs right after base construction and may add, set
//!    or remove loaders, plugins and properties.
//! 2. [`Profile::finalize`] runs after the base projection and may only edit
//!    the returned [`BundlerConfig`]; the collections are gone by then.
//!
//! # Example
//!
//! ```no_run
//! use packrig_config::{profile_for, BuildContext, ProfiledEnvironment};
//!
//! let ctx = BuildContext::from_process(".", "production").unwrap();
//! let env = ProfiledEnvironment::new(&ctx, profile_for("production").unwrap()).unwrap();
//! let config = env.finalize().unwrap();
//! assert_eq!(config.get("devtool").unwrap(), "source-map");
//! ```

mod development;
mod production;

use std::fmt;
use std::ops::{Deref, DerefMut};

use tracing::debug;

use crate::context::BuildContext;
use crate::environment::{BundlerConfig, Environment};
use crate::error::{ConfigError, Result};

pub use development::Development;
pub use production::Production;

pub trait Profile: fmt::Debug {
    fn name(&self) -> &str;

    /// Mutate the freshly constructed environment.
    fn extend(&self, env: &mut Environment, ctx: &BuildContext) -> Result<()> {
        let _ = (env, ctx);
        Ok(())
    }

    /// Post-process the projected configuration.
    fn finalize(&self, config: &mut BundlerConfig) -> Result<()> {
        let _ = config;
        Ok(())
    }
}

/// Profile for test runs; identical to the base environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct Test;

impl Profile for Test {
    fn name(&self) -> &str {
        "test"
    }
}

/// Select a built-in profile by name.
pub fn profile_for(name: &str) -> Result<Box<dyn Profile>> {
    match name {
        "production" => Ok(Box::new(Production)),
        "development" => Ok(Box::new(Development)),
        "test" => Ok(Box::new(Test)),
        other => Err(ConfigError::UnknownProfile(other.to_string())),
    }
}

/// An environment paired with the profile that extended it.
///
/// Dereferences to [`Environment`] so callers can keep mutating it before
/// finalization.
#[derive(Debug)]
pub struct ProfiledEnvironment {
    environment: Environment,
    profile: Box<dyn Profile>,
}

impl ProfiledEnvironment {
    /// Base construction followed by the profile's `extend` step.
    pub fn new(ctx: &BuildContext, profile: Box<dyn Profile>) -> Result<Self> {
        let mut environment = Environment::new(ctx)?;
        profile.extend(&mut environment, ctx)?;
        debug!(profile = profile.name(), "extended environment");
        Ok(Self {
            environment,
            profile,
        })
    }

    pub fn profile(&self) -> &dyn Profile {
        self.profile.as_ref()
    }

    /// Base projection followed by the profile's `finalize` step.
    pub fn to_config(&self) -> Result<BundlerConfig> {
        let mut config = self.environment.to_config()?;
        self.profile.finalize(&mut config)?;
        Ok(config)
    }

    pub fn finalize(self) -> Result<BundlerConfig> {
        let mut config = self.environment.finalize()?;
        self.profile.finalize(&mut config)?;
        Ok(config)
    }
}

impl Deref for ProfiledEnvironment {
    type Target = Environment;

    fn deref(&self) -> &Environment {
        &self.environment
    }
}

impl DerefMut for ProfiledEnvironment {
    fn deref_mut(&mut self) -> &mut Environment {
        &mut self.environment
    }
}

/// Build the finalized configuration for the profile called `name`.
pub fn build(ctx: &BuildContext, name: &str) -> Result<BundlerConfig> {
    ProfiledEnvironment::new(ctx, profile_for(name)?)?.finalize()
}
