use std::fmt;
use std::process::Command;

use crate::error::Error;

/// Host operating systems the build drivers support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostOs {
  MacOs,
  Windows,
}

impl HostOs {
  /// Returns the lowercase identifier for this OS.
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::MacOs => "darwin",
      Self::Windows => "windows",
    }
  }
}

impl fmt::Display for HostOs {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Kernel-name substrings that mark a Windows compatibility shell.
const WINDOWS_MARKERS: &[&str] = &["msys", "mingw", "cygwin", "windows_nt"];

/// Classify a `uname -s` kernel name.
///
/// macOS is an exact match on `Darwin`; the Windows compatibility shells
/// (MSYS2, Git Bash, Cygwin) are a case-insensitive substring match.
/// Anything else is unsupported.
pub fn classify_kernel(kernel: &str) -> Option<HostOs> {
  if kernel == "Darwin" {
    return Some(HostOs::MacOs);
  }
  let lowered = kernel.to_ascii_lowercase();
  if WINDOWS_MARKERS.iter().any(|m| lowered.contains(m)) {
    return Some(HostOs::Windows);
  }
  None
}

/// Detect the host OS.
///
/// Native macOS and Windows binaries are recognized directly; otherwise the
/// kernel name reported by `uname -s` is classified. Detection is
/// deterministic and free of side effects, so repeated calls within one run
/// always yield the same branch.
pub fn detect() -> Result<HostOs, Error> {
  match std::env::consts::OS {
    "macos" => return Ok(HostOs::MacOs),
    "windows" => return Ok(HostOs::Windows),
    _ => {}
  }

  let kernel = uname_kernel().unwrap_or_else(|| std::env::consts::OS.to_string());
  classify_kernel(&kernel).ok_or(Error::UnsupportedOs { kernel })
}

fn uname_kernel() -> Option<String> {
  let output = Command::new("uname").arg("-s").output().ok()?;
  if !output.status.success() {
    return None;
  }
  let kernel = String::from_utf8_lossy(&output.stdout).trim().to_string();
  if kernel.is_empty() { None } else { Some(kernel) }
}
