//! Platform build drivers.
//!
//! Exactly one driver executes per invocation; the host classification in
//! [`crate::platform`] selects which.

mod macos;
pub mod windows;

use std::path::PathBuf;

pub use macos::MacosDriver;
pub use windows::WindowsDriver;

/// What a driver built and where.
#[derive(Debug, Clone)]
pub struct BuildSummary {
  /// Output directory the meta-build generator was pointed at.
  pub out_dir: PathBuf,

  /// The targets requested from the build executor.
  pub targets: &'static [&'static str],

  /// True when only the query-shell subset was built (Windows).
  pub partial: bool,
}
