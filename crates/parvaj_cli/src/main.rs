//! Parvaj CLI, the command-line interface for VHDL project scaffolding and
//! simulation.
//!
//! Provides `parvaj create-entity` for generating entity files, `parvaj
//! simulate` for analyzing, running and viewing a test bench, `parvaj deps` for
//! inspecting the resolved analysis order, and `parvaj config` / `parvaj cache`
//! for managing persistent state.

#![warn(missing_docs)]

mod cache;
mod config;
mod create_entity;
mod deps;
mod project;
mod simulate;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

/// Parvaj: scaffold and simulate VHDL projects with GHDL and GTKWave.
#[derive(Parser, Debug)]
#[command(name = "parvaj", version, about = "Parvaj VHDL project tool")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project root directory (default: the current directory).
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a VHDL entity file from a template.
    CreateEntity(CreateEntityArgs),
    /// Analyze, elaborate and run a test bench, then view its waveform.
    Simulate(SimulateArgs),
    /// Print the files a unit needs, in analysis order.
    Deps(DepsArgs),
    /// Get or set a global configuration option.
    Config(ConfigArgs),
    /// Inspect or reset this project's unit location cache.
    Cache {
        /// The cache action.
        #[command(subcommand)]
        action: CacheAction,
    },
}

/// Arguments for `parvaj create-entity`.
#[derive(Parser, Debug)]
pub struct CreateEntityArgs {
    /// Entity type: `source` or `unit-test`.
    pub entity_type: String,

    /// Entity name, preferably snake_case. For unit tests, the name of the
    /// source entity under test.
    pub entity_name: String,

    /// Group (subdirectory) the entity belongs to.
    pub group_name: String,

    /// Architecture name.
    #[arg(default_value = "structural")]
    pub architecture_name: String,
}

/// Arguments for `parvaj simulate`.
#[derive(Parser, Debug)]
pub struct SimulateArgs {
    /// Name of the test-bench entity.
    pub test_bench: String,

    /// Work directory for GHDL objects and waveforms.
    #[arg(long, default_value = "build/")]
    pub workdir: PathBuf,

    /// Waveform file format, `vcd` or `ghw` (case-insensitive).
    #[arg(long, default_value = "vcd")]
    pub waveform: String,

    /// Simulation option passed to the run step as `key=value`, without
    /// leading dashes (e.g. `-o stop-time=3ns`). Repeatable.
    #[arg(short = 'o', long = "option")]
    pub options: Vec<String>,

    /// Do not open the waveform viewer.
    #[arg(long)]
    pub no_view: bool,
}

/// Arguments for `parvaj deps`.
#[derive(Parser, Debug)]
pub struct DepsArgs {
    /// Unit whose dependencies to resolve.
    pub unit: String,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Arguments for `parvaj config`.
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Dotted option name, e.g. `ghdl.version`.
    pub name: String,

    /// New value. Prints the current value when omitted.
    pub value: Option<String>,
}

/// Cache subcommands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum CacheAction {
    /// Print the cache file path.
    Path,
    /// List cached units and the files declaring them.
    List {
        /// Rescan the whole project first.
        #[arg(long)]
        scan: bool,
    },
    /// Delete all cached records for this project.
    Clear,
}

/// Output format for listings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// One path per line.
    Text,
    /// A JSON document.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Explicit project root.
    pub root: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        root: cli.root,
    };
    init_logging(&global);

    let result = match cli.command {
        Command::CreateEntity(ref args) => create_entity::run(args, &global),
        Command::Simulate(ref args) => simulate::run(args, &global),
        Command::Deps(ref args) => deps::run(args, &global),
        Command::Config(ref args) => config::run(args, &global),
        Command::Cache { ref action } => cache::run(action, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Installs the process-wide stderr log subscriber; called once from `main`.
/// `RUST_LOG` overrides the level chosen by `--verbose` / `--quiet`.
fn init_logging(global: &GlobalArgs) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_level(global)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn default_log_level(global: &GlobalArgs) -> &'static str {
    if global.verbose {
        "debug"
    } else if global.quiet {
        "error"
    } else {
        "warn"
    }
}
