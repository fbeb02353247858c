//! Environment probes: command presence and interpreter discovery.

use std::path::PathBuf;

use tracing::debug;

use crate::consts::PYTHON_CANDIDATES;
use crate::error::Error;

/// Locate a command on the executable search path.
pub fn find_command(name: &str) -> Option<PathBuf> {
  which::which(name).ok()
}

/// Require a command to be present, failing fast with an environment error.
///
/// Called before any build step runs, so a missing tool is reported up front
/// rather than mid-build.
pub fn require_command(name: &str) -> Result<PathBuf, Error> {
  find_command(name).ok_or_else(|| Error::MissingCommand { name: name.to_string() })
}

/// Return the first candidate for which `is_available` holds.
///
/// Candidates are tried strictly in order; the choice is a pure function of
/// the available set.
pub fn first_available<'a>(
  candidates: &'a [&'a str],
  is_available: impl Fn(&str) -> bool,
) -> Option<&'a str> {
  candidates.iter().copied().find(|name| is_available(name))
}

/// Discover a Python interpreter, preferring `python3` over `python` over
/// the `py` launcher.
pub fn discover_python() -> Result<PathBuf, Error> {
  let chosen = first_available(PYTHON_CANDIDATES, |name| find_command(name).is_some());
  match chosen {
    Some(name) => {
      let path = require_command(name)?;
      debug!(interpreter = %path.display(), "discovered python");
      Ok(path)
    }
    None => Err(Error::NoPython { tried: PYTHON_CANDIDATES.join(", ") }),
  }
}
