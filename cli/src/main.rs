//! sqlreview CLI - Main entry point

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use sqlreview_cli::commands::check::{self, CheckOptions};
use sqlreview_cli::commands::init;
use sqlreview_cli::config::{CONFIG_FILE, Config};
use sqlreview_cli::output::{self, Format};
use sqlreview_types::Dialect;

/// Environment variable holding the log filter
const LOG_ENV: &str = "SQLREVIEW_LOG";

const EXIT_REJECTED: u8 = 1;
const EXIT_FAILURE: u8 = 2;

/// sqlreview - Schema-integrity review for SQL change batches
#[derive(Parser, Debug)]
#[command(name = "sqlreview")]
#[command(author, version, about = "Schema-integrity review for SQL change batches", long_about = None)]
struct Cli {
    /// Path to config file (default: sqlreview.toml)
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log catalog mutations (repeat for more detail)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a new sqlreview.toml configuration file
    Init {
        /// Database dialect (mysql, tidb, mariadb)
        #[arg(short, long, default_value = "mysql", value_parser = parse_dialect)]
        dialect: Dialect,

        /// Name of the reviewed database
        #[arg(long, default_value = "")]
        database: String,
    },

    /// Review a JSON statement batch
    Check {
        /// Statements file (JSON array)
        statements: PathBuf,

        /// Seed snapshot; overrides the config
        #[arg(long, value_name = "PATH")]
        snapshot: Option<PathBuf>,

        /// Treat seeded tables as incomplete
        #[arg(long)]
        lenient: bool,

        /// Compare table names case-sensitively
        #[arg(long)]
        case_sensitive: bool,

        /// Write the catalog after replay to this file
        #[arg(long, value_name = "PATH")]
        save_snapshot: Option<PathBuf>,

        /// Report format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

fn parse_dialect(s: &str) -> Result<Dialect, String> {
    Dialect::parse(s).ok_or_else(|| format!("unknown dialect: {s}"))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}", output::err_line(&format!("{e:#}")));
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

/// `SQLREVIEW_LOG` wins unless `-v` was given; logs go to stderr
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Command::Init { dialect, database } => {
            let path = cli.config.unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
            init::run(&path, dialect, &database)?;
            println!("{}", output::success(&format!("Created {}", path.display())));
            println!();
            println!("Next steps:");
            println!("  1. Set `database` and `snapshot` in {}", path.display());
            println!(
                "  2. Run {} to review a batch",
                output::heading("sqlreview check <statements.json>")
            );
            Ok(ExitCode::SUCCESS)
        }
        Command::Check {
            statements,
            snapshot,
            lenient,
            case_sensitive,
            save_snapshot,
            format,
        } => {
            let config = Config::discover(cli.config.as_deref())?;
            let opts = CheckOptions {
                statements,
                snapshot,
                lenient,
                case_sensitive,
                save_snapshot,
            };
            let advice = check::run(&config, &opts)?;

            match format {
                Format::Text => println!("{}", output::render_text(&advice)),
                Format::Json => println!("{}", output::render_json(&advice)?),
            }

            if output::has_errors(&advice) {
                Ok(ExitCode::from(EXIT_REJECTED))
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}
