//! Command-line argument definitions.

use clap::Parser;
use std::path::PathBuf;

use crate::issues::Priority;

/// Help text for configuration file options, shown at the bottom of --help.
const CONFIG_HELP: &str = "\
CONFIGURATION FILE (.sharpaudit.toml):
  Create this file in your repository root to set defaults.

  [sharpaudit]
  # Duplicate detection
  window = 5                 # Sliding-window size (lines)

  # File thresholds
  max_file_loc = 400         # Max lines per file
  max_file_methods = 25      # Max methods per file
  min_doc_ratio = 0.05       # Min doc-comment ratio for non-trivial files

  # Method thresholds
  max_complexity = 10        # Cyclomatic complexity warning
  severe_complexity = 20     # Cyclomatic complexity severe
  max_method_lines = 60      # Method length warning
  severe_method_lines = 120  # Method length severe
  max_parameters = 5         # Max method parameters

  # Coupling
  max_fan_out = 8            # Max outgoing namespace dependencies
  max_fan_in = 8             # Max incoming namespace dependencies
  std_prefixes = [\"System\"]  # Namespaces left out of the graph

  # Path filters
  exclude_folders = [\"Generated\"]
  include_folders = [\"packages\"]  # Force-include these
";

/// Command line interface configuration using `clap`.
/// This struct defines the arguments and flags accepted by the program.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "sharpaudit - Deterministic C# repository audit: metrics, dependency cycles, duplicate code",
    long_about = None,
    after_help = CONFIG_HELP
)]
#[allow(clippy::struct_excessive_bools)] // CLI flags are legitimately booleans
pub struct Cli {
    /// Root of the source tree to audit.
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Directory for the Markdown report and JSON sidecar.
    #[arg(short, long, default_value = "reports")]
    pub output: PathBuf,

    /// Print the JSON document to stdout instead of the console summary.
    #[arg(long)]
    pub json: bool,

    /// Skip writing report files to the output directory.
    #[arg(long)]
    pub no_report: bool,

    /// Folders to exclude from the scan.
    #[arg(long, alias = "exclude-folder")]
    pub exclude_folders: Vec<String>,

    /// Folders to force-include in the scan (overrides default exclusions).
    #[arg(long, alias = "include-folder")]
    pub include_folders: Vec<String>,

    /// Sliding-window size for duplicate detection (overrides config).
    #[arg(long)]
    pub window: Option<usize>,

    /// Maximum allowed lines per file (overrides config).
    #[arg(long)]
    pub max_file_loc: Option<usize>,

    /// Set maximum allowed cyclomatic complexity (overrides config).
    /// Methods with complexity > N will be reported.
    #[arg(long)]
    pub max_complexity: Option<usize>,

    /// Set maximum allowed method lines (overrides config).
    #[arg(long)]
    pub max_method_lines: Option<usize>,

    /// Set maximum allowed method parameters (overrides config).
    #[arg(long)]
    pub max_parameters: Option<usize>,

    /// Set minimum allowed doc-comment ratio, 0.0-1.0 (overrides config).
    #[arg(long)]
    pub min_doc_ratio: Option<f64>,

    /// Namespace prefixes treated as platform imports (overrides config).
    #[arg(long = "std-prefix")]
    pub std_prefixes: Vec<String>,

    /// Exit with code 1 if any issue at or above this priority exists.
    /// For CI/CD integration: --fail-on P1 fails on P0 and P1 findings.
    #[arg(long)]
    pub fail_on: Option<Priority>,

    /// Suppress the console summary and progress bar.
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable verbose logging to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}
