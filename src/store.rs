//! Line-oriented license store.
//!
//! The file holds one token per line, each terminated by `\n`. Blank lines
//! are skipped. A file whose last line has no terminator is corrupt and is
//! never repaired. New tokens are appended at the end; existing lines are
//! never rewritten, reordered or truncated.
//!
//! There is no locking. Two processes adding at the same time can both pass
//! the duplicate check and append the same token twice.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{LicenseError, Result};
use crate::paths::PathResolver;
use crate::validate::{is_storable, JwtSyntax, TokenValidator};

/// Result of a successful [`add_license`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The token was appended.
    Added,
    /// The token was already stored; nothing was written.
    AlreadyPresent,
}

/// One step of the line reader.
#[derive(Debug, PartialEq, Eq)]
enum Step {
    /// A full line with its terminator stripped.
    Line(String),
    /// End of input on a line boundary.
    CleanEof,
    /// End of input in the middle of a line.
    DirtyEof(String),
}

fn next_step<R: BufRead>(reader: &mut R, buf: &mut String) -> io::Result<Step> {
    buf.clear();
    if reader.read_line(buf)? == 0 {
        return Ok(Step::CleanEof);
    }
    debug!("  Raw line: '{}'", buf.escape_debug());
    match buf.strip_suffix('\n') {
        Some(line) => Ok(Step::Line(line.to_string())),
        None => Ok(Step::DirtyEof(buf.clone())),
    }
}

/// Collect the entries from `reader`. A zero-byte input is a valid empty store.
fn read_entries<R: BufRead>(reader: &mut R, path: &Path) -> Result<Vec<String>> {
    let mut entries = Vec::new();
    let mut buf = String::new();

    loop {
        let step = next_step(reader, &mut buf).map_err(|source| LicenseError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        match step {
            Step::Line(line) if line.is_empty() => continue,
            Step::Line(line) => {
                debug!("  Trimmed line: '{line}'");
                entries.push(line);
            }
            Step::CleanEof => return Ok(entries),
            Step::DirtyEof(last_line) => {
                return Err(LicenseError::Corrupt {
                    path: path.to_path_buf(),
                    last_line,
                })
            }
        }
    }
}

/// Read every license in the file at `path`, in file order.
///
/// A missing file is an [`LicenseError::Open`] error, not an empty store.
pub fn parse_licenses(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|source| LicenseError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    info!("Extracting licenses from {}", path.display());
    read_entries(&mut BufReader::new(file), path)
}

/// Create the license file and its parent directories if the file is absent.
///
/// Returns `true` if a new, empty file was created. An existing file is left
/// untouched.
pub fn ensure_license_file(path: &Path) -> Result<bool> {
    if path.as_os_str().is_empty() {
        return Err(LicenseError::UnresolvedPath);
    }
    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        info!("  Creating parent directories");
        fs::create_dir_all(parent).map_err(|source| LicenseError::Create {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    info!("  Creating license file");
    OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .map_err(|source| LicenseError::Create {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(true)
}

/// Append `token` to the store at `path` unless it is already there.
///
/// Steps: validate, create the file if absent, parse, dedup, append. Any
/// failure aborts the call; a corrupt file is reported, not repaired.
pub fn add_license<V>(token: &str, path: &Path, validator: &V) -> Result<AddOutcome>
where
    V: TokenValidator + ?Sized,
{
    if !is_storable(token) || !validator.is_valid(token) {
        return Err(LicenseError::InvalidToken {
            token: token.to_string(),
        });
    }
    debug!("License passed syntax checking");

    if path.as_os_str().is_empty() {
        return Err(LicenseError::UnresolvedPath);
    }
    info!("License file location: {}", path.display());

    ensure_license_file(path)?;

    let existing = parse_licenses(path)?;
    if existing.iter().any(|entry| entry == token) {
        info!("  Not adding '{token}' because it is a duplicate of an existing entry");
        return Ok(AddOutcome::AlreadyPresent);
    }

    append_line(path, token).map_err(|source| LicenseError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!("  Added license to {}", path.display());

    Ok(AddOutcome::Added)
}

fn append_line(path: &Path, token: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().read(true).write(true).open(path)?;
    file.seek(SeekFrom::End(0))?;
    file.write_all(format!("{token}\n").as_bytes())
}

/// A license file paired with the validator that guards it.
///
/// Not safe for concurrent writers across processes; see the module docs.
#[derive(Debug, Clone)]
pub struct LicenseStore<V> {
    path: PathBuf,
    validator: V,
}

impl LicenseStore<JwtSyntax> {
    /// Store at the location resolved from the process environment, accepting
    /// JWT-shaped tokens.
    pub fn open_default() -> Self {
        Self::new(PathResolver::system().resolve(), JwtSyntax)
    }
}

impl<V: TokenValidator> LicenseStore<V> {
    pub fn new(path: impl Into<PathBuf>, validator: V) -> Self {
        Self {
            path: path.into(),
            validator,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create an empty store if none exists. Returns `true` if one was created.
    pub fn init(&self) -> Result<bool> {
        ensure_license_file(&self.path)
    }

    pub fn list(&self) -> Result<Vec<String>> {
        parse_licenses(&self.path)
    }

    pub fn add(&self, token: &str) -> Result<AddOutcome> {
        add_license(token, &self.path, &self.validator)
    }

    pub fn contains(&self, token: &str) -> Result<bool> {
        Ok(self.list()?.iter().any(|entry| entry == token))
    }
}
