//! Error types for perfetto-build.

use thiserror::Error;

/// Exit status used for usage, path, and environment failures.
///
/// Build-step failures instead propagate the failing tool's own exit code so
/// callers can tell "my environment is broken" apart from "the build failed".
pub const ENV_EXIT_CODE: i32 = 2;

/// Errors that can occur while orchestrating a build.
#[derive(Debug, Error)]
pub enum Error {
  /// The source path argument is not absolute for this platform.
  #[error("source path is not absolute: {path}")]
  NotAbsolute { path: String },

  /// The source path does not exist or is not a directory.
  #[error("source path is not an existing directory: {path}")]
  NotADirectory { path: String },

  /// A required command could not be located on PATH.
  #[error("required command not found on PATH: {name}")]
  MissingCommand { name: String },

  /// No usable Python 3 interpreter was found.
  #[error("no Python interpreter found (tried: {tried})")]
  NoPython { tried: String },

  /// The macOS command-line developer tools are not installed.
  #[error("command-line developer tools are missing; run `xcode-select --install` and retry")]
  MissingDeveloperTools,

  /// vswhere.exe was not found in any well-known installer location.
  #[error(
    "vswhere.exe not found; install Visual Studio with the \"Desktop development with C++\" workload"
  )]
  MissingVsLocator,

  /// The host OS is neither macOS nor a Windows compatibility shell.
  #[error("unsupported host OS: {kernel} (supported: macOS, Windows)")]
  UnsupportedOs { kernel: String },

  /// An external build step exited non-zero.
  #[error("step '{step}' failed with exit code {code}")]
  StepFailed { step: &'static str, code: i32 },

  /// An external command could not be spawned at all.
  #[error("failed to spawn {program}")]
  Spawn {
    program: String,
    #[source]
    source: std::io::Error,
  },

  /// I/O error while preparing the build (directories, generated scripts).
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

impl Error {
  /// The process exit status this error maps to.
  pub fn exit_code(&self) -> i32 {
    match self {
      Error::StepFailed { code, .. } => *code,
      _ => ENV_EXIT_CODE,
    }
  }
}
