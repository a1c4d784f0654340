mod commands;

use std::path::PathBuf;
use std::process;

use carousel_core::Dialect;
use clap::{Parser, ValueEnum};
use tracing_subscriber::{fmt, EnvFilter};

/// Exit status for a malformed argument list or an unreadable input file.
pub(crate) const EXIT_USAGE: i32 = 1;
/// Exit status for a lexical, syntax or semantic error in the program.
pub(crate) const EXIT_INVALID: i32 = 2;

/// Environment variable holding the `tracing` filter directives.
const LOG_ENV: &str = "CAROUSEL_LOG";

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Reserved-word spelling of the source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DialectArg {
    English,
    Spanish,
}

impl From<DialectArg> for Dialect {
    fn from(arg: DialectArg) -> Self {
        match arg {
            DialectArg::English => Dialect::English,
            DialectArg::Spanish => Dialect::Spanish,
        }
    }
}

/// Carousel inventory language validator.
#[derive(Parser)]
#[command(
    name = "carousel",
    version,
    about = "Carousel inventory language validator"
)]
struct Cli {
    /// Path to the carousel source file
    file: PathBuf,

    /// Reserved-word dialect the source is written in
    #[arg(long, default_value = "english", value_enum)]
    dialect: DialectArg,

    /// Output format (text or json)
    #[arg(long, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress all output; only the exit code reports the result
    #[arg(long)]
    quiet: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn main() {
    init_tracing();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version go to stdout and exit 0
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            process::exit(EXIT_USAGE);
        }
    };
    tracing::trace!(file = %cli.file.display(), dialect = ?cli.dialect, "arguments parsed");

    commands::validate::cmd_validate(&cli.file, cli.dialect.into(), cli.output, cli.quiet);
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            let err_json = serde_json::json!({
                "status": "error",
                "error": { "message": msg },
            });
            eprintln!("{}", err_json);
        }
    }
}
