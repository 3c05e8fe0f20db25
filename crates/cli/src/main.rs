// sffcheck CLI - headless validation of SFF product-hierarchy files

mod check;
mod exit_codes;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use exit_codes::EXIT_SUCCESS;

#[derive(Parser)]
#[command(name = "sffcheck")]
#[command(about = "Flag inconsistent and unfinished rows in SFF reference data")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    /// More log output on stderr (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a CSV file with explicitly chosen role columns
    #[command(after_help = "\
Examples:
  sffcheck check sff.csv --manufacturer MANUFACTURER --brand BRAND --subbrand SUBBRAND
  sffcheck check sff.csv -m 'mfr name' -b 'brand name' -s 'sub brand' --out-dir results
  sffcheck check sff.csv -m MFR -b BRAND -s SUB --json > report.json
  sffcheck check sff.csv -m MFR -b BRAND -s SUB --strict-exit -q")]
    Check {
        /// CSV file to validate (first row is the header)
        file: PathBuf,

        /// Column holding the manufacturer
        #[arg(long, short = 'm')]
        manufacturer: String,

        /// Column holding the brand
        #[arg(long, short = 'b')]
        brand: String,

        /// Column holding the subbrand
        #[arg(long, short = 's')]
        subbrand: String,

        /// Directory for inconsistent_rows.csv / bad_value_rows.csv
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        /// Print the JSON report to stdout
        #[arg(long)]
        json: bool,

        /// Write the JSON report to a file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Exit 1 when any row is flagged
        #[arg(long)]
        strict_exit: bool,

        /// Suppress the stderr summary
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Run a saved .sff.toml config
    #[command(after_help = "\
Examples:
  sffcheck run weekly.sff.toml
  sffcheck run weekly.sff.toml --json
  sffcheck run weekly.sff.toml --output report.json --strict-exit")]
    Run {
        /// Path to the .sff.toml config file
        config: PathBuf,

        /// Print the JSON report to stdout
        #[arg(long)]
        json: bool,

        /// Write the JSON report to a file (overrides output.json)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Exit 1 when any row is flagged
        #[arg(long)]
        strict_exit: bool,

        /// Suppress the stderr summary
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// List a file's normalized column names
    #[command(after_help = "\
Examples:
  sffcheck columns sff.csv
  sffcheck columns sff.csv --json")]
    Columns {
        /// CSV file to inspect
        file: PathBuf,

        /// Output JSON instead of one name per line
        #[arg(long)]
        json: bool,
    },

    /// Validate a .sff.toml config without running it
    Validate {
        /// Path to the .sff.toml config file
        config: PathBuf,
    },
}

fn long_version() -> &'static str {
    if cfg!(debug_assertions) {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nengine:  sffcheck ", env!("CARGO_PKG_VERSION"),
            "\nbuild:   debug",
            "\ntarget:  ", env!("TARGET"),
        )
    } else {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nengine:  sffcheck ", env!("CARGO_PKG_VERSION"),
            "\nbuild:   release",
            "\ntarget:  ", env!("TARGET"),
        )
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "sffcheck=debug,sffcheck_cli=debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Check {
            file,
            manufacturer,
            brand,
            subbrand,
            out_dir,
            json,
            output,
            strict_exit,
            quiet,
        } => check::cmd_check(
            file,
            manufacturer,
            brand,
            subbrand,
            check::ReportOptions { out_dir, json, output, strict_exit, quiet },
        ),
        Commands::Run { config, json, output, strict_exit, quiet } => {
            check::cmd_run(config, json, output, strict_exit, quiet)
        }
        Commands::Columns { file, json } => check::cmd_columns(file, json),
        Commands::Validate { config } => check::cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}
