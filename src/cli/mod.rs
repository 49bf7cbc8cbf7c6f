//! CLI tools for stageline
//!
//! - `check`: Build a pipeline from a document and print it
//! - `variants`: List registered variant names
//! - `completions`: Generate shell completions

pub mod check;
pub mod completions;
pub mod variants;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use stageline::{Config, init_logging};
use std::path::PathBuf;

/// CLI arguments for stageline
#[derive(Parser, Debug)]
#[command(name = "stageline")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Log level (overridden by RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a pipeline from a document and print its structure
    Check {
        /// Pipeline document (YAML)
        file: PathBuf,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = FormatArg::Text)]
        format: FormatArg,
        /// Deepest allowed run_after nesting
        #[arg(long)]
        max_depth: Option<usize>,
    },

    /// List registered stage and messenger types
    Variants,

    /// Generate shell completions
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: ShellArg,
        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ShellArg {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Build the CLI command for completion generation
pub fn build_cli() -> clap::Command {
    Args::command()
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Ok(Config::load(path)?),
        None => Ok(Config::default()),
    }
}

/// Parse and execute CLI arguments
pub fn run() -> Result<()> {
    let args = Args::parse();
    let mut config = load_config(args.config.as_ref())?;

    if let Some(level) = args.log_level {
        config.log_level = level;
        init_logging(&config.log_level);
    } else if std::env::var("STAGELINE_DEBUG").is_ok() {
        init_logging("debug");
    }

    match args.command {
        Command::Check {
            file,
            format,
            max_depth,
        } => {
            if let Some(max_depth) = max_depth {
                config.max_depth = max_depth;
            }
            let format = match format {
                FormatArg::Text => check::OutputFormat::Text,
                FormatArg::Json => check::OutputFormat::Json,
            };
            println!("{}", check::check_document(&file, &config, format)?);
        }
        Command::Variants => {
            print!("{}", variants::list_variants(&stageline::Registry::with_defaults()));
        }
        Command::Completions { shell, output } => {
            use clap_complete::Shell;

            let shell_enum = match shell {
                ShellArg::Bash => Shell::Bash,
                ShellArg::Zsh => Shell::Zsh,
                ShellArg::Fish => Shell::Fish,
                ShellArg::PowerShell => Shell::PowerShell,
            };

            let completions = completions::generate_completions(shell_enum)?;

            if let Some(output_path) = output {
                completions::save_completions(&completions, &output_path)?;
            } else {
                println!("{completions}");
            }
        }
    }

    Ok(())
}
