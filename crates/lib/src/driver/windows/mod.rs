//! Windows build driver and toolchain bootstrapper.
//!
//! The MSVC toolchain cannot be invoked as a single command: an installation
//! must be discovered via vswhere and its environment-setup script sourced
//! from inside a batch script. The driver therefore clones depot_tools (once),
//! generates a batch script plus a PowerShell wrapper under `<source>/.deps`,
//! and runs the wrapper, forwarding the batch script's exit code.

pub mod scripts;
pub mod vswhere;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::consts::{BATCH_SCRIPT, DEPOT_TOOLS_DIR, DEPOT_TOOLS_URL, DEPS_DIR, WIN_OUT_DIR, WIN_TARGETS, WRAPPER_SCRIPT};
use crate::driver::BuildSummary;
use crate::error::Error;
use crate::probe;
use crate::process::{self, Invocation, Runner, checked};

pub struct WindowsDriver {
  source: PathBuf,
  vswhere: PathBuf,
}

impl WindowsDriver {
  /// Verify every environment precondition before any build step runs.
  pub fn preflight(source: &Path) -> Result<Self, Error> {
    probe::require_command("git")?;
    probe::require_command("cygpath")?;
    probe::require_command("powershell")?;
    let vswhere = vswhere::locate().ok_or(Error::MissingVsLocator)?;
    Ok(Self::new(source, vswhere))
  }

  pub fn new(source: impl Into<PathBuf>, vswhere: impl Into<PathBuf>) -> Self {
    Self { source: source.into(), vswhere: vswhere.into() }
  }

  pub fn run(&self, runner: &mut dyn Runner) -> Result<BuildSummary, Error> {
    let env = process::inherited();

    let deps_dir = self.source.join(DEPS_DIR);
    fs::create_dir_all(&deps_dir)?;

    let depot_tools = deps_dir.join(DEPOT_TOOLS_DIR);
    if depot_tools.is_dir() {
      debug!(path = %depot_tools.display(), "depot_tools checkout present; skipping clone");
    } else {
      info!(url = DEPOT_TOOLS_URL, "cloning depot_tools");
      let clone = Invocation::new("clone-depot-tools", "git")
        .args(["clone", DEPOT_TOOLS_URL])
        .arg(depot_tools.to_string_lossy())
        .env(env.clone());
      checked(runner, &clone)?;
    }

    // The activated MSVC tooling expects native drive-letter paths.
    let source_native = self.to_native(runner, &self.source, env.clone())?;
    let depot_native = self.to_native(runner, &depot_tools, env.clone())?;
    let vswhere_native = self.to_native(runner, &self.vswhere, env.clone())?;
    let deps_native = self.to_native(runner, &deps_dir, env.clone())?;

    let batch = scripts::batch_script(&source_native, &depot_native, &vswhere_native);
    fs::write(deps_dir.join(BATCH_SCRIPT), batch)?;
    fs::write(deps_dir.join(WRAPPER_SCRIPT), scripts::wrapper_script())?;

    info!(out_dir = WIN_OUT_DIR, "running build script");
    let build = Invocation::new("build-script", "powershell")
      .args(["-NoProfile", "-NonInteractive", "-ExecutionPolicy", "Bypass", "-File"])
      .arg(format!(r"{deps_native}\{WRAPPER_SCRIPT}"))
      .arg(format!(r"{deps_native}\{BATCH_SCRIPT}"))
      .cwd(&self.source)
      .env(env);
    checked(runner, &build)?;

    Ok(BuildSummary {
      out_dir: self.source.join(WIN_OUT_DIR),
      targets: WIN_TARGETS,
      partial: true,
    })
  }

  /// Translate a path to native drive-letter form via `cygpath -w`.
  fn to_native(
    &self,
    runner: &mut dyn Runner,
    path: &Path,
    env: process::EnvMap,
  ) -> Result<String, Error> {
    let inv = Invocation::new("cygpath", "cygpath")
      .arg("-w")
      .arg(path.to_string_lossy())
      .env(env);
    let (code, stdout) = runner.run_capture(&inv)?;
    if code != 0 {
      return Err(Error::StepFailed { step: inv.step, code });
    }
    Ok(stdout)
  }
}
