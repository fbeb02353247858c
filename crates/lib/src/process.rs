//! External process invocations with explicit environments.
//!
//! Every spawned command carries its own environment map instead of relying
//! on ambient process state; the child is started with a cleared environment
//! plus that map.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::Error;

/// Environment passed to a spawned process.
pub type EnvMap = BTreeMap<String, String>;

/// Snapshot of the parent environment as an explicit map.
///
/// Variables with non-UTF-8 names or values are dropped.
pub fn inherited() -> EnvMap {
  std::env::vars().collect()
}

/// A single external command: program, arguments, working directory, and
/// the exact environment it runs with.
#[derive(Debug, Clone)]
pub struct Invocation {
  /// Short step name used in logs and step-failure errors.
  pub step: &'static str,
  pub program: String,
  pub args: Vec<String>,
  pub cwd: Option<PathBuf>,
  pub env: EnvMap,
}

impl Invocation {
  pub fn new(step: &'static str, program: impl Into<String>) -> Self {
    Self {
      step,
      program: program.into(),
      args: Vec::new(),
      cwd: None,
      env: EnvMap::new(),
    }
  }

  pub fn arg(mut self, arg: impl Into<String>) -> Self {
    self.args.push(arg.into());
    self
  }

  pub fn args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.args.extend(args.into_iter().map(Into::into));
    self
  }

  pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
    self.cwd = Some(dir.into());
    self
  }

  pub fn env(mut self, env: EnvMap) -> Self {
    self.env = env;
    self
  }
}

/// Seam between the drivers and the real toolchain.
///
/// Drivers only ever see exit codes; deciding whether a non-zero code aborts
/// the run (strict step) or is merely logged (best-effort step) stays with
/// the caller.
pub trait Runner {
  /// Spawn and wait, streaming the child's stdio through. Returns the exit
  /// code.
  fn run(&mut self, inv: &Invocation) -> Result<i32, Error>;

  /// Spawn and wait, capturing stdout. Returns the exit code and the
  /// trimmed stdout.
  fn run_capture(&mut self, inv: &Invocation) -> Result<(i32, String), Error>;
}

/// Runner backed by `std::process::Command`.
pub struct SystemRunner;

impl SystemRunner {
  fn command(inv: &Invocation) -> Command {
    let mut command = Command::new(&inv.program);
    command.args(&inv.args).env_clear().envs(&inv.env);
    if let Some(dir) = &inv.cwd {
      command.current_dir(dir);
    }
    command
  }
}

impl Runner for SystemRunner {
  fn run(&mut self, inv: &Invocation) -> Result<i32, Error> {
    debug!(step = inv.step, program = %inv.program, args = ?inv.args, "spawning");
    let status = Self::command(inv).status().map_err(|source| Error::Spawn {
      program: inv.program.clone(),
      source,
    })?;
    Ok(status.code().unwrap_or(1))
  }

  fn run_capture(&mut self, inv: &Invocation) -> Result<(i32, String), Error> {
    debug!(step = inv.step, program = %inv.program, args = ?inv.args, "spawning (capture)");
    let output = Self::command(inv)
      .stdin(Stdio::null())
      .output()
      .map_err(|source| Error::Spawn { program: inv.program.clone(), source })?;
    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    Ok((output.status.code().unwrap_or(1), stdout))
  }
}

/// Run a strict step: any non-zero exit aborts with that step's code.
pub fn checked(runner: &mut dyn Runner, inv: &Invocation) -> Result<(), Error> {
  match runner.run(inv)? {
    0 => Ok(()),
    code => Err(Error::StepFailed { step: inv.step, code }),
  }
}
