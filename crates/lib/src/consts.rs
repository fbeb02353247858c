//! Fixed names shared across the build drivers.

/// GN output directory for the macOS host build.
pub const HOST_OUT_DIR: &str = "out/host_release";

/// GN output directory for the Windows subset build.
pub const WIN_OUT_DIR: &str = "out/win_release";

/// Dependency directory under the source tree. Holds the depot_tools
/// checkout and the generated transient scripts.
pub const DEPS_DIR: &str = ".deps";

/// Name of the depot_tools checkout inside [`DEPS_DIR`].
pub const DEPOT_TOOLS_DIR: &str = "depot_tools";

/// Canonical upstream of the depot_tools checkout.
pub const DEPOT_TOOLS_URL: &str = "https://chromium.googlesource.com/chromium/tools/depot_tools.git";

/// The dependency-installation entry point inside the source tree.
pub const INSTALL_BUILD_DEPS: &str = "tools/install-build-deps";

/// Targets built on macOS: the core service, the two trace-collection
/// daemons, the query shell, and the trace converter.
pub const HOST_TARGETS: &[&str] = &[
  "traced",
  "traced_probes",
  "perfetto",
  "trace_processor_shell",
  "trace_to_text",
];

/// The only target portable enough to build unassisted on Windows.
pub const WIN_TARGETS: &[&str] = &["trace_processor_shell"];

/// GN args for the macOS host build. Release mode, with deprecation
/// warnings demoted from error to warning so an otherwise-fatal
/// deprecation does not abort compilation.
pub const HOST_GN_ARGS: &str =
  r#"is_debug=false extra_cflags="-Wno-error=deprecated-declarations""#;

/// GN args for the Windows build. C4996 is MSVC's deprecation warning.
pub const WIN_GN_ARGS: &str = r#"is_debug=false target_os=\"win\" extra_cflags=\"/wd4996\""#;

/// Python interpreter candidates, tried in priority order.
pub const PYTHON_CANDIDATES: &[&str] = &["python3", "python", "py"];

/// File name of the generated batch script (under [`DEPS_DIR`]).
pub const BATCH_SCRIPT: &str = "build_perfetto.bat";

/// File name of the generated PowerShell wrapper (under [`DEPS_DIR`]).
pub const WRAPPER_SCRIPT: &str = "run_build.ps1";
