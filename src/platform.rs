//! Host platform identification.
//!
//! The store location depends on the platform family, so the platform is
//! passed around as a value instead of being branched on with `cfg`. That
//! keeps path resolution testable for every family from any host.

use std::fmt;

/// Platform family used to pick the configuration base directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Platform {
    Windows,
    Linux,
    Darwin,
    /// Any identifier without a known configuration layout.
    Unknown(String),
}

impl Platform {
    /// The platform this binary was compiled for.
    pub fn current() -> Self {
        Self::from_id(std::env::consts::OS)
    }

    /// Map a platform identifier (`windows`, `linux`, `darwin`/`macos`) to a family.
    pub fn from_id(id: &str) -> Self {
        match id {
            "windows" => Platform::Windows,
            "linux" => Platform::Linux,
            "darwin" | "macos" => Platform::Darwin,
            other => Platform::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Platform::Windows => "windows",
            Platform::Linux => "linux",
            Platform::Darwin => "darwin",
            Platform::Unknown(id) => id,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_id_known_families() {
        assert_eq!(Platform::from_id("windows"), Platform::Windows);
        assert_eq!(Platform::from_id("linux"), Platform::Linux);
        assert_eq!(Platform::from_id("darwin"), Platform::Darwin);
        assert_eq!(Platform::from_id("macos"), Platform::Darwin);
    }

    #[test]
    fn test_from_id_unknown_keeps_identifier() {
        let platform = Platform::from_id("plan9");
        assert_eq!(platform, Platform::Unknown("plan9".to_string()));
        assert_eq!(platform.to_string(), "plan9");
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn test_current_on_linux() {
        assert_eq!(Platform::current(), Platform::Linux);
    }

    #[test]
    #[cfg(target_os = "macos")]
    fn test_current_on_macos() {
        assert_eq!(Platform::current(), Platform::Darwin);
    }
}
