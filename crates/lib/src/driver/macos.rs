//! macOS build driver.
//!
//! Runs the dependency installer, GN, and Ninja against the source tree.
//! GN and Ninja are invoked through the source tree's `tools/` wrappers,
//! which resolve the pinned binaries fetched by `install-build-deps`; only
//! git, curl, and a Python interpreter need to be on PATH up front.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{info, warn};

use crate::consts::{HOST_GN_ARGS, HOST_OUT_DIR, HOST_TARGETS, INSTALL_BUILD_DEPS};
use crate::driver::BuildSummary;
use crate::error::Error;
use crate::probe;
use crate::process::{self, Invocation, Runner, checked};

pub struct MacosDriver {
  source: PathBuf,
  python: PathBuf,
}

impl MacosDriver {
  /// Verify every environment precondition before any build step runs.
  pub fn preflight(source: &Path) -> Result<Self, Error> {
    probe::require_command("git")?;
    probe::require_command("curl")?;
    let python = probe::discover_python()?;
    if !developer_tools_present() {
      return Err(Error::MissingDeveloperTools);
    }
    Ok(Self::new(source, python))
  }

  pub fn new(source: impl Into<PathBuf>, python: impl Into<PathBuf>) -> Self {
    Self { source: source.into(), python: python.into() }
  }

  /// Run the build sequence. Any strict step's non-zero exit aborts with
  /// that step's code; the dependency installer alone is best-effort.
  pub fn run(&self, runner: &mut dyn Runner) -> Result<BuildSummary, Error> {
    let python = self.python.to_string_lossy().into_owned();
    let env = process::inherited();

    info!(path = INSTALL_BUILD_DEPS, "installing build deps");
    let install = Invocation::new("install-build-deps", python.as_str())
      .arg(INSTALL_BUILD_DEPS)
      .cwd(&self.source)
      .env(env.clone());
    match runner.run(&install)? {
      0 => {}
      code => warn!(code, "install-build-deps failed; continuing"),
    }

    info!(out_dir = HOST_OUT_DIR, "generating build configuration");
    let gn = Invocation::new("gn-gen", python.as_str())
      .args(["tools/gn", "gen", HOST_OUT_DIR])
      .arg(format!("--args={HOST_GN_ARGS}"))
      .cwd(&self.source)
      .env(env.clone());
    checked(runner, &gn)?;

    info!(targets = ?HOST_TARGETS, "building");
    let ninja = Invocation::new("ninja", python.as_str())
      .args(["tools/ninja", "-C", HOST_OUT_DIR])
      .args(HOST_TARGETS.iter().copied())
      .cwd(&self.source)
      .env(env);
    checked(runner, &ninja)?;

    Ok(BuildSummary {
      out_dir: self.source.join(HOST_OUT_DIR),
      targets: HOST_TARGETS,
      partial: false,
    })
  }
}

/// Whether the command-line developer tools are installed.
///
/// `xcode-select -p` prints the active developer directory and exits 0 only
/// when one is configured.
fn developer_tools_present() -> bool {
  Command::new("xcode-select")
    .arg("-p")
    .stdout(Stdio::null())
    .stderr(Stdio::null())
    .status()
    .map(|status| status.success())
    .unwrap_or(false)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::process::testutil::FakeRunner;

  fn driver() -> MacosDriver {
    MacosDriver::new("/Users/dev/perfetto", "/usr/bin/python3")
  }

  #[test]
  fn runs_install_gn_ninja_in_order() {
    let mut runner = FakeRunner::new();
    let summary = driver().run(&mut runner).unwrap();

    assert_eq!(runner.steps(), vec!["install-build-deps", "gn-gen", "ninja"]);
    assert_eq!(summary.out_dir, PathBuf::from("/Users/dev/perfetto/out/host_release"));
    assert!(!summary.partial);
  }

  #[test]
  fn ninja_requests_all_five_targets() {
    let mut runner = FakeRunner::new();
    driver().run(&mut runner).unwrap();

    let ninja = runner.invocations.last().unwrap();
    for target in ["traced", "traced_probes", "perfetto", "trace_processor_shell", "trace_to_text"]
    {
      assert!(ninja.args.iter().any(|a| a == target), "missing target {target}");
    }
  }

  #[test]
  fn gn_gen_disables_debug_and_demotes_deprecations() {
    let mut runner = FakeRunner::new();
    driver().run(&mut runner).unwrap();

    let gn = &runner.invocations[1];
    let args_flag = gn.args.iter().find(|a| a.starts_with("--args=")).unwrap();
    assert!(args_flag.contains("is_debug=false"));
    assert!(args_flag.contains("-Wno-error=deprecated-declarations"));
  }

  #[test]
  fn install_failure_does_not_abort() {
    let mut runner = FakeRunner::new().fail_step("install-build-deps", 1);
    driver().run(&mut runner).unwrap();

    assert_eq!(runner.steps(), vec!["install-build-deps", "gn-gen", "ninja"]);
  }

  #[test]
  fn gn_failure_aborts_before_ninja() {
    let mut runner = FakeRunner::new().fail_step("gn-gen", 5);
    let err = driver().run(&mut runner).unwrap_err();

    assert!(matches!(err, Error::StepFailed { step: "gn-gen", code: 5 }));
    assert_eq!(runner.steps(), vec!["install-build-deps", "gn-gen"]);
  }

  #[test]
  fn ninja_failure_propagates_its_code() {
    let mut runner = FakeRunner::new().fail_step("ninja", 17);
    let err = driver().run(&mut runner).unwrap_err();

    assert_eq!(err.exit_code(), 17);
  }

  #[test]
  fn every_step_runs_in_the_source_tree() {
    let mut runner = FakeRunner::new();
    driver().run(&mut runner).unwrap();

    for inv in &runner.invocations {
      assert_eq!(inv.cwd.as_deref(), Some(Path::new("/Users/dev/perfetto")));
    }
  }
}
