//! Generators for the transient Windows build scripts.
//!
//! Both files are written under `<source>/.deps` and overwritten
//! unconditionally on every run; they are a mechanism for executing the
//! build inside an activated MSVC environment, not persistent state.

use crate::consts::{WIN_GN_ARGS, WIN_OUT_DIR, WIN_TARGETS};

/// Visual Studio component the installation must provide.
pub const VS_CPP_COMPONENT: &str = "Microsoft.VisualStudio.Component.VC.Tools.x86.x64";

/// Batch script that activates the MSVC environment and runs the build.
///
/// `vcvars64.bat` only exports variables into its own process and its
/// children, so the whole sequence lives in one script: locate the
/// installation via vswhere, source the compiler environment, put
/// depot_tools first on PATH, bootstrap its pinned gn/ninja/vpython3, then
/// generate and build. Environment failures exit 2; GN/Ninja failures
/// propagate their own code.
pub fn batch_script(source_native: &str, depot_tools_native: &str, vswhere_native: &str) -> String {
  let out_dir = WIN_OUT_DIR.replace('/', "\\");
  let target = WIN_TARGETS.join(" ");
  let script = format!(
    r#"@echo off
rem Generated by build-perfetto; overwritten on every run.
setlocal

set "VSWHERE={vswhere_native}"
set "VSINSTALL="
for /f "usebackq tokens=*" %%i in (`"%VSWHERE%" -latest -products * -requires {VS_CPP_COMPONENT} -property installationPath`) do set "VSINSTALL=%%i"
if not defined VSINSTALL (
  echo error: no Visual Studio installation provides the C++ desktop toolchain>&2
  exit /b 2
)

call "%VSINSTALL%\VC\Auxiliary\Build\vcvars64.bat" >nul
if not "%ERRORLEVEL%"=="0" exit /b 2

set "PATH={depot_tools_native};%PATH%"

rem First gclient run bootstraps the pinned gn/ninja/vpython3. Safe to re-run.
call gclient >nul 2>&1

where gn >nul 2>&1 || (echo error: gn not found after depot_tools bootstrap>&2 & exit /b 2)
where ninja >nul 2>&1 || (echo error: ninja not found after depot_tools bootstrap>&2 & exit /b 2)
where vpython3 >nul 2>&1 || (echo error: vpython3 not found after depot_tools bootstrap>&2 & exit /b 2)

cd /d "{source_native}"

call vpython3 tools\install-build-deps
if not "%ERRORLEVEL%"=="0" echo warning: install-build-deps failed; continuing>&2

call gn gen {out_dir} "--args={WIN_GN_ARGS}"
if not "%ERRORLEVEL%"=="0" exit /b %ERRORLEVEL%

call ninja -C {out_dir} {target}
exit /b %ERRORLEVEL%
"#
  );
  // cmd.exe parses LF-only batch files unreliably in some constructs.
  script.replace('\n', "\r\n")
}

/// PowerShell wrapper that runs the batch script and forwards its exit code.
///
/// Invoking a `.bat` directly does not reliably surface the batch exit code
/// through every host; routing through `cmd.exe /c` and re-exiting with
/// `$LASTEXITCODE` guarantees the propagation.
pub fn wrapper_script() -> String {
  r#"param([Parameter(Mandatory = $true)][string]$BatchScript)

& cmd.exe /c "`"$BatchScript`""
exit $LASTEXITCODE
"#
  .to_string()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn script() -> String {
    batch_script(
      r"C:\work\perfetto",
      r"C:\work\perfetto\.deps\depot_tools",
      r"C:\Program Files (x86)\Microsoft Visual Studio\Installer\vswhere.exe",
    )
  }

  #[test]
  fn batch_requires_cpp_desktop_toolchain() {
    let s = script();
    assert!(s.contains("Microsoft.VisualStudio.Component.VC.Tools.x86.x64"));
    assert!(s.contains("vcvars64.bat"));
  }

  #[test]
  fn batch_prepends_depot_tools_to_path() {
    let s = script();
    assert!(s.contains(r#"set "PATH=C:\work\perfetto\.deps\depot_tools;%PATH%""#));
  }

  #[test]
  fn batch_verifies_each_bootstrapped_tool() {
    let s = script();
    for tool in ["gn", "ninja", "vpython3"] {
      assert!(s.contains(&format!("where {tool} ")), "no check for {tool}");
      assert!(s.contains(&format!("{tool} not found")), "no message naming {tool}");
    }
  }

  #[test]
  fn batch_builds_the_single_windows_target() {
    let s = script();
    assert!(s.contains(r"call ninja -C out\win_release trace_processor_shell"));
    assert!(!s.contains("traced_probes"));
  }

  #[test]
  fn batch_demotes_msvc_deprecation_warning() {
    let s = script();
    assert!(s.contains("is_debug=false"));
    assert!(s.contains("/wd4996"));
    assert!(s.contains(r#"target_os=\"win\""#));
  }

  #[test]
  fn batch_treats_install_deps_as_best_effort() {
    let s = script();
    let install_pos = s.find(r"tools\install-build-deps").unwrap();
    let warn_pos = s.find("warning: install-build-deps failed").unwrap();
    let gn_pos = s.find("call gn gen").unwrap();
    // The install step warns instead of exiting, and gn still runs after it.
    assert!(install_pos < warn_pos && warn_pos < gn_pos);
    assert!(!s[install_pos..gn_pos].contains("exit /b"));
  }

  #[test]
  fn batch_propagates_build_exit_codes() {
    let s = script();
    assert!(s.ends_with("exit /b %ERRORLEVEL%\r\n"));
  }

  #[test]
  fn batch_uses_crlf_line_endings() {
    let s = script();
    assert!(s.contains("\r\n"));
    assert!(!s.replace("\r\n", "").contains('\n'));
  }

  #[test]
  #[cfg(windows)]
  fn wrapper_exit_status_matches_batch_exit_status() {
    let temp = tempfile::TempDir::new().unwrap();
    let batch = temp.path().join("exit7.bat");
    std::fs::write(&batch, "@echo off\r\nexit /b 7\r\n").unwrap();
    let wrapper = temp.path().join("run_build.ps1");
    std::fs::write(&wrapper, wrapper_script()).unwrap();

    let status = std::process::Command::new("powershell")
      .args(["-NoProfile", "-NonInteractive", "-ExecutionPolicy", "Bypass", "-File"])
      .arg(&wrapper)
      .arg(&batch)
      .status()
      .unwrap();
    assert_eq!(status.code(), Some(7));
  }

  #[test]
  fn wrapper_forwards_the_batch_exit_code() {
    let s = wrapper_script();
    assert!(s.contains("cmd.exe /c"));
    assert!(s.contains("exit $LASTEXITCODE"));
    assert!(s.contains("[string]$BatchScript"));
  }
}
