//! Environment lookups used by path resolution.
//!
//! Reading process-wide state directly makes resolution depend on whatever
//! host the tests run on. Resolution goes through the [`Environment`] trait
//! instead; [`SystemEnvironment`] is the live implementation and
//! [`MapEnvironment`] simulates arbitrary hosts.

use std::collections::HashMap;
use std::path::PathBuf;

/// Source of environment variables and the current user's home directory.
pub trait Environment {
    /// Value of the variable `key`, if present.
    fn var(&self, key: &str) -> Option<String>;

    /// Home directory of the current user, if it can be determined.
    fn home_dir(&self) -> Option<PathBuf>;
}

/// Returns the value of `key` only if it is set to a non-empty string.
pub fn non_empty_var<E: Environment + ?Sized>(env: &E, key: &str) -> Option<String> {
    env.var(key).filter(|value| !value.is_empty())
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }
}

/// A fixed, in-memory environment.
#[derive(Debug, Clone, Default)]
pub struct MapEnvironment {
    vars: HashMap<String, String>,
    home: Option<PathBuf>,
}

impl MapEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn with_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = Some(home.into());
        self
    }
}

impl Environment for MapEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.home.clone()
    }
}

impl<E: Environment + ?Sized> Environment for &E {
    fn var(&self, key: &str) -> Option<String> {
        (**self).var(key)
    }

    fn home_dir(&self) -> Option<PathBuf> {
        (**self).home_dir()
    }
}
