//! perfetto-build: host-platform build orchestration for the Perfetto
//! native tools.
//!
//! The library validates the source-path argument, classifies the host,
//! and dispatches to exactly one platform driver. Drivers run the external
//! toolchain (GN, Ninja, depot_tools, the dependency installer) strictly
//! sequentially, aborting on the first failed strict step and propagating
//! its exit code.

pub mod consts;
pub mod driver;
pub mod error;
pub mod platform;
pub mod probe;
pub mod process;
pub mod source;

use tracing::info;

pub use crate::driver::{BuildSummary, MacosDriver, WindowsDriver};
pub use crate::error::Error;
pub use crate::platform::HostOs;

/// Validate the source path, detect the host, and run its build driver.
pub fn run(raw_source: &str) -> Result<BuildSummary, Error> {
  let source = source::resolve(raw_source)?;
  let os = platform::detect()?;
  info!(os = %os, source = %source.display(), "starting build");

  let mut runner = process::SystemRunner;
  match os {
    HostOs::MacOs => MacosDriver::preflight(&source)?.run(&mut runner),
    HostOs::Windows => WindowsDriver::preflight(&source)?.run(&mut runner),
  }
}
