//! ipport: patent portfolio scoring, ranking and grouped summaries.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use ipport::{
    cli::{self, ScoreArgs},
    pipeline::exit_codes,
    reports::ReportFormat,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "ipport")]
#[command(version)]
#[command(about = "Patent portfolio scoring, ranking and summary tool", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    1  No patent reached --min-consensus
    3  Error occurred

EXAMPLES:
    # Score a portfolio with the built-in profiles
    ipport score portfolio.json

    # Top 25 as an aligned table
    ipport score portfolio.json -o table --top 25

    # Full results for further processing
    ipport score portfolio.json -o json -O results.json

    # How closely does the licensing view track the consensus?
    ipport compare portfolio.json licensing consensus")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = "IPPORT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score, rank and summarize a patent record set
    Score {
        /// JSON array of patent records
        records: PathBuf,

        /// Output format (auto: summary on a terminal, json otherwise)
        #[arg(short, long, default_value = "auto")]
        output: ReportFormat,

        /// Output file path (stdout if not specified)
        #[arg(short = 'O', long)]
        output_file: Option<PathBuf>,

        /// Limit ranking rows in the report
        #[arg(long)]
        top: Option<usize>,

        /// Write JSON on a single line
        #[arg(long)]
        compact: bool,

        /// JSON: summaries, comparisons and distributions only
        #[arg(long)]
        summary_only: bool,

        /// Exit with code 1 unless at least one patent reaches this consensus score
        #[arg(long)]
        min_consensus: Option<f64>,
    },

    /// Compare two rankings (`consensus` or a profile name)
    Compare {
        /// JSON array of patent records
        records: PathBuf,

        /// Left ranking column
        left: String,

        /// Right ranking column
        #[arg(default_value = "consensus")]
        right: String,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,

        /// Output file path (stdout if not specified)
        #[arg(short = 'O', long)]
        output_file: Option<PathBuf>,
    },

    /// Show the super-sector for each sector label
    Classify {
        /// Sector labels
        #[arg(required = true)]
        sectors: Vec<String>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show, initialize or describe configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration (file or defaults) and validation problems
    Show,
    /// Write an example .ipport.yaml in the current directory
    Init,
    /// Print the JSON Schema for the config file format
    Schema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    let code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            exit_codes::ERROR
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Score {
            records,
            output,
            output_file,
            top,
            compact,
            summary_only,
            min_consensus,
        } => {
            let config = cli::resolve_config(cli.config.as_deref())?;
            cli::run_score(
                ScoreArgs {
                    records,
                    output,
                    output_file,
                    top,
                    compact,
                    summary_only,
                    min_consensus,
                    config_path: cli.config,
                    no_color: cli.no_color,
                    quiet: cli.quiet,
                },
                &config,
            )
        }

        Commands::Compare {
            records,
            left,
            right,
            json,
            output_file,
        } => {
            let config = cli::resolve_config(cli.config.as_deref())?;
            cli::run_compare(records, left, right, json, output_file, &config, cli.quiet)
        }

        Commands::Classify { sectors, json } => cli::run_classify(&sectors, json, cli.quiet),

        Commands::Config { action } => match action {
            ConfigAction::Show => cli::run_config_show(cli.config.as_deref()),
            ConfigAction::Init => {
                let dir = std::env::current_dir().context("cannot determine current directory")?;
                let path = cli::run_config_init(&dir)?;
                eprintln!("Created {}", path.display());
                Ok(exit_codes::SUCCESS)
            }
            ConfigAction::Schema { output } => cli::run_config_schema(output),
        },

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "ipport", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }
    }
}
