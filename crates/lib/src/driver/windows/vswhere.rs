//! Locating the Visual Studio installer-locator utility.
//!
//! vswhere.exe ships with the Visual Studio installer at a fixed location
//! under the installer directory; it is not on PATH, so a small list of
//! well-known roots is probed instead.

use std::path::{Path, PathBuf};

fn candidate(root: &Path) -> PathBuf {
  root.join("Microsoft Visual Studio").join("Installer").join("vswhere.exe")
}

/// Probe the given Program Files roots, in order, for vswhere.exe.
pub fn locate_in(roots: &[PathBuf]) -> Option<PathBuf> {
  roots.iter().map(|root| candidate(root)).find(|path| path.is_file())
}

/// Probe the well-known install locations for vswhere.exe.
///
/// The installer is a 32-bit application, so `%ProgramFiles(x86)%` comes
/// first; the fixed fallbacks cover shells that do not export the variables.
pub fn locate() -> Option<PathBuf> {
  let mut roots: Vec<PathBuf> = ["ProgramFiles(x86)", "ProgramFiles"]
    .iter()
    .filter_map(|var| std::env::var_os(var))
    .map(PathBuf::from)
    .collect();
  roots.push(PathBuf::from(r"C:\Program Files (x86)"));
  roots.push(PathBuf::from(r"C:\Program Files"));
  locate_in(&roots)
}
