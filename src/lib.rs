//! `soupnazi` — Per-user license store.
//!
//! Provides:
//! - `paths` — Locate the license file (`SOUPNAZI_CONFIG_FILE` or the platform config home)
//! - `store` — Strict line parser and idempotent append for the license file
//! - `validate` — Token checks applied before anything is written
//! - `env` / `platform` — Injectable environment and platform used by path resolution

pub mod env;
pub mod error;
pub mod paths;
pub mod platform;
pub mod store;
pub mod validate;

pub use env::{Environment, MapEnvironment, SystemEnvironment};
pub use error::{LicenseError, Result};
pub use paths::{license_file, resolve_base, PathResolver, CONFIG_FILE_ENV};
pub use platform::Platform;
pub use store::{add_license, ensure_license_file, parse_licenses, AddOutcome, LicenseStore};
pub use validate::{JwtSyntax, TokenValidator};
