//! build-perfetto: build the Perfetto native tools for the host platform.
//!
//! Exit codes: 0 on success; 2 for usage, path, or environment errors; any
//! other non-zero code is passed through from the failing build step.

mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Build the Perfetto native tools for the host platform (macOS or Windows).
#[derive(Parser)]
#[command(name = "build-perfetto", version, about, long_about = None)]
struct Cli {
  /// Absolute path to the Perfetto source checkout.
  source: String,
}

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .without_time()
    .init();

  let cli = Cli::parse();

  match perfetto_build::run(&cli.source) {
    Ok(summary) => {
      output::print_info(&format!("targets: {}", summary.targets.join(" ")));
      output::print_success(&format!("build complete: {}", summary.out_dir.display()));
      if summary.partial {
        output::print_warning(
          "only the trace_processor_shell subset was built on this platform",
        );
      }
    }
    Err(err) => {
      output::print_error(&err.to_string());
      std::process::exit(err.exit_code());
    }
  }
}
