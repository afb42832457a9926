//! License store location.
//!
//! The store lives at `<config home>/soupnazi/licenses`, where the config
//! home depends on the platform family. `SOUPNAZI_CONFIG_FILE` replaces the
//! whole path when set to a non-empty value.
//!
//! Use [`license_file`] to resolve against the live process environment, or
//! [`PathResolver`] to resolve against an injected one.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::env::{non_empty_var, Environment, SystemEnvironment};
use crate::platform::Platform;

/// Environment variable holding the full path of the license file.
pub const CONFIG_FILE_ENV: &str = "SOUPNAZI_CONFIG_FILE";

/// Roaming application data directory on Windows.
pub const APPDATA_ENV: &str = "APPDATA";

/// XDG configuration home on Linux.
pub const XDG_CONFIG_HOME_ENV: &str = "XDG_CONFIG_HOME";

/// Directory created under the config home.
pub const APP_DIR_NAME: &str = "soupnazi";

/// Name of the license file inside [`APP_DIR_NAME`].
pub const LICENSE_FILE_NAME: &str = "licenses";

/// Base configuration directory for `platform`.
///
/// | platform | base                                          |
/// |----------|-----------------------------------------------|
/// | windows  | `%APPDATA%`, else `<home>/.config`            |
/// | linux    | `$XDG_CONFIG_HOME`, else `<home>/.config`     |
/// | darwin   | `<home>/Library/Preferences`                  |
/// | other    | empty (the result is relative)                |
///
/// An empty `home` yields relative paths rather than an error.
pub fn resolve_base<E>(platform: &Platform, env: &E, home: &Path) -> PathBuf
where
    E: Environment + ?Sized,
{
    match platform {
        Platform::Windows => non_empty_var(env, APPDATA_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| home.join(".config")),
        Platform::Linux => non_empty_var(env, XDG_CONFIG_HOME_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| home.join(".config")),
        Platform::Darwin => home.join("Library").join("Preferences"),
        Platform::Unknown(id) => {
            warn!(platform = %id, "Unknown platform, license file path will be relative");
            PathBuf::new()
        }
    }
}

/// Computes the license file path from an environment and a platform.
#[derive(Debug, Clone)]
pub struct PathResolver<E> {
    env: E,
    platform: Platform,
}

impl PathResolver<SystemEnvironment> {
    /// Resolver over the process environment and the compile-time platform.
    pub fn system() -> Self {
        Self::new(SystemEnvironment, Platform::current())
    }
}

impl<E: Environment> PathResolver<E> {
    pub fn new(env: E, platform: Platform) -> Self {
        Self { env, platform }
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    /// Resolve the license file path. Never fails; see [`resolve_base`] for
    /// the degraded cases.
    pub fn resolve(&self) -> PathBuf {
        if let Some(path) = non_empty_var(&self.env, CONFIG_FILE_ENV) {
            info!(path = %path, "Using license file from {}", CONFIG_FILE_ENV);
            return PathBuf::from(path);
        }

        let home = self.env.home_dir().unwrap_or_else(|| {
            debug!("Home directory unavailable, resolving relative to the working directory");
            PathBuf::new()
        });

        let path = resolve_base(&self.platform, &self.env, &home)
            .join(APP_DIR_NAME)
            .join(LICENSE_FILE_NAME);
        debug!(platform = %self.platform, path = %path.display(), "Resolved license file");
        path
    }
}

/// Path of the license file for the current process environment.
pub fn license_file() -> PathBuf {
    PathResolver::system().resolve()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MapEnvironment;
    use serial_test::serial;

    fn home() -> PathBuf {
        PathBuf::from("/home/u")
    }

    #[test]
    fn test_linux_defaults_to_dot_config() {
        let env = MapEnvironment::new();
        assert_eq!(
            resolve_base(&Platform::Linux, &env, &home()),
            home().join(".config")
        );
    }

    #[test]
    fn test_linux_prefers_xdg_config_home() {
        let env = MapEnvironment::new().with_var(XDG_CONFIG_HOME_ENV, "/xdg");
        assert_eq!(
            resolve_base(&Platform::Linux, &env, &home()),
            PathBuf::from("/xdg")
        );
    }

    #[test]
    fn test_linux_empty_xdg_is_ignored() {
        let env = MapEnvironment::new().with_var(XDG_CONFIG_HOME_ENV, "");
        assert_eq!(
            resolve_base(&Platform::Linux, &env, &home()),
            home().join(".config")
        );
    }

    #[test]
    fn test_windows_prefers_appdata() {
        let env = MapEnvironment::new().with_var(APPDATA_ENV, "C:/Users/u/AppData/Roaming");
        assert_eq!(
            resolve_base(&Platform::Windows, &env, &home()),
            PathBuf::from("C:/Users/u/AppData/Roaming")
        );

        let env = MapEnvironment::new().with_var(APPDATA_ENV, "");
        assert_eq!(
            resolve_base(&Platform::Windows, &env, &home()),
            home().join(".config")
        );
    }

    #[test]
    fn test_darwin_ignores_xdg() {
        let env = MapEnvironment::new().with_var(XDG_CONFIG_HOME_ENV, "/xdg");
        assert_eq!(
            resolve_base(&Platform::Darwin, &env, &home()),
            home().join("Library").join("Preferences")
        );
    }

    #[test]
    fn test_unknown_platform_is_relative() {
        let env = MapEnvironment::new().with_home("/home/u");
        let resolver = PathResolver::new(env, Platform::from_id("plan9"));
        assert_eq!(
            resolver.resolve(),
            PathBuf::from(APP_DIR_NAME).join(LICENSE_FILE_NAME)
        );
    }

    #[test]
    fn test_missing_home_is_relative() {
        let resolver = PathResolver::new(MapEnvironment::new(), Platform::Linux);
        assert_eq!(
            resolver.resolve(),
            PathBuf::from(".config").join(APP_DIR_NAME).join(LICENSE_FILE_NAME)
        );
    }

    #[test]
    fn test_override_wins_on_every_platform() {
        for id in ["linux", "windows", "darwin", "plan9"] {
            let env = MapEnvironment::new()
                .with_home("/home/u")
                .with_var(CONFIG_FILE_ENV, "/tmp/x")
                .with_var(XDG_CONFIG_HOME_ENV, "/xdg");
            let resolver = PathResolver::new(env, Platform::from_id(id));
            assert_eq!(resolver.resolve(), PathBuf::from("/tmp/x"));
        }
    }

    #[test]
    fn test_empty_override_is_ignored() {
        let env = MapEnvironment::new()
            .with_home("/home/u")
            .with_var(CONFIG_FILE_ENV, "");
        let resolver = PathResolver::new(env, Platform::Linux);
        assert_eq!(
            resolver.resolve(),
            PathBuf::from("/home/u/.config/soupnazi/licenses")
        );
    }

    #[test]
    #[serial]
    fn test_license_file_respects_process_override() {
        temp_env::with_var(CONFIG_FILE_ENV, Some("/tmp/test-soupnazi/licenses"), || {
            assert_eq!(
                license_file(),
                PathBuf::from("/tmp/test-soupnazi/licenses")
            );
        });
    }
}
