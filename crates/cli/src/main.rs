//! rankprep CLI — the main entry point.
//!
//! Commands:
//! - `compose`     — Build ranker inputs for a JSON dialogue batch
//! - `components`  — List registered components
//! - `config`      — Print the default pipeline config

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "rankprep",
    about = "rankprep — dialogue context preparation for ranking models",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose queries and context windows for a dialogue batch
    Compose {
        /// JSON batch file (`-` reads stdin)
        #[arg(short, long, default_value = "-")]
        input: String,

        /// Pipeline config file [default: $RANKPREP_CONFIG or ~/.rankprep/pipeline.toml]
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Component id or class name to run
        #[arg(long)]
        component: Option<String>,

        /// Override the component's context_depth option
        #[arg(long)]
        context_depth: Option<u64>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// List registered components
    Components,

    /// Print the default pipeline config
    Config,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing; stdout is reserved for command output.
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Compose {
            input,
            config,
            component,
            context_depth,
            pretty,
        } => commands::compose::run(commands::compose::ComposeArgs {
            input,
            config,
            component,
            context_depth,
            pretty,
        })?,
        Commands::Components => commands::components::run()?,
        Commands::Config => commands::config_cmd::run()?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_leaves_config_unset_without_flag() {
        // An empty override must reach PipelineConfig::load, not fail parsing.
        // SAFETY: no other test in this binary reads or writes the environment.
        unsafe { std::env::set_var(rankprep_config::CONFIG_ENV, "") };
        let cli = Cli::try_parse_from(["rankprep", "compose"]).unwrap();
        unsafe { std::env::remove_var(rankprep_config::CONFIG_ENV) };

        match cli.command {
            Commands::Compose { config, input, .. } => {
                assert!(config.is_none());
                assert_eq!(input, "-");
            }
            _ => panic!("expected compose"),
        }
    }

    #[test]
    fn compose_accepts_explicit_config_path() {
        let cli =
            Cli::try_parse_from(["rankprep", "compose", "--config", "/tmp/pipeline.toml"]).unwrap();
        match cli.command {
            Commands::Compose { config, .. } => {
                assert_eq!(config, Some(PathBuf::from("/tmp/pipeline.toml")));
            }
            _ => panic!("expected compose"),
        }
    }
}
