//! Validation of the source-tree argument.

use std::path::{Path, PathBuf};

use crate::error::Error;

/// Absolute-path conventions, one per supported host family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathConvention {
  /// Leading `/`.
  Unix,
  /// Drive letter, colon, separator (`C:\...` or `C:/...`).
  Windows,
}

/// The convention the running binary validates against.
pub fn active_convention() -> PathConvention {
  if cfg!(windows) { PathConvention::Windows } else { PathConvention::Unix }
}

/// Whether `path` is absolute under the given convention.
pub fn is_absolute(convention: PathConvention, path: &str) -> bool {
  match convention {
    PathConvention::Unix => path.starts_with('/'),
    PathConvention::Windows => {
      let bytes = path.as_bytes();
      bytes.len() >= 3
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && (bytes[2] == b'\\' || bytes[2] == b'/')
    }
  }
}

/// Validate the source-path argument and resolve it to a canonical form.
///
/// The path must be absolute for the active platform convention and must
/// name an existing directory. Canonicalization is best-effort: if it fails
/// the validated path passes through unchanged.
pub fn resolve(raw: &str) -> Result<PathBuf, Error> {
  if !is_absolute(active_convention(), raw) {
    return Err(Error::NotAbsolute { path: raw.to_string() });
  }
  let path = PathBuf::from(raw);
  if !path.is_dir() {
    return Err(Error::NotADirectory { path: raw.to_string() });
  }
  Ok(canonicalize_lossy(&path))
}

fn canonicalize_lossy(path: &Path) -> PathBuf {
  dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn unix_convention_requires_leading_slash() {
    assert!(is_absolute(PathConvention::Unix, "/Users/dev/perfetto"));
    assert!(!is_absolute(PathConvention::Unix, "perfetto"));
    assert!(!is_absolute(PathConvention::Unix, "./perfetto"));
    assert!(!is_absolute(PathConvention::Unix, "C:\\work\\perfetto"));
  }

  #[test]
  fn windows_convention_requires_drive_prefix() {
    assert!(is_absolute(PathConvention::Windows, "C:\\work\\perfetto"));
    assert!(is_absolute(PathConvention::Windows, "c:/work/perfetto"));
    assert!(!is_absolute(PathConvention::Windows, "/c/work/perfetto"));
    assert!(!is_absolute(PathConvention::Windows, "work\\perfetto"));
    assert!(!is_absolute(PathConvention::Windows, "C:"));
  }

  #[test]
  fn resolve_rejects_relative_paths() {
    let err = resolve("some/relative/dir").unwrap_err();
    assert!(matches!(err, Error::NotAbsolute { .. }));
  }

  #[test]
  #[cfg(unix)]
  fn resolve_rejects_missing_directories() {
    let err = resolve("/definitely/not/a/real/dir").unwrap_err();
    assert!(matches!(err, Error::NotADirectory { .. }));
  }

  #[test]
  #[cfg(unix)]
  fn resolve_canonicalizes_existing_directories() {
    let temp = tempfile::TempDir::new().unwrap();
    let nested = temp.path().join("a");
    std::fs::create_dir(&nested).unwrap();
    let raw = format!("{}/a/..", temp.path().display());

    let resolved = resolve(&raw).unwrap();
    assert!(resolved.is_dir());
    assert!(!resolved.to_string_lossy().contains(".."));
  }
}
