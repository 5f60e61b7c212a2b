//! lipcue CLI entry point

mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use lipcue::cli::{Cli, Commands, ConfigCommands};
use lipcue::Config;

fn init_tracing(verbose: bool) {
    let default = if verbose { "lipcue=debug" } else { "lipcue=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    Ok(config)
}

#[cfg(not(tarpaulin_include))]
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    tracing::debug!(
        "lipcue {} ({} built {})",
        env!("CARGO_PKG_VERSION"),
        option_env!("VERGEN_GIT_SHA").unwrap_or("unknown"),
        option_env!("VERGEN_BUILD_DATE").unwrap_or("unknown"),
    );

    match &cli.command {
        Commands::Cues { file } => commands::cues::handle(file),
        Commands::Nearest {
            file,
            time,
            threshold,
        } => {
            let config = load_config(&cli)?;
            commands::query::handle_nearest(&config, file, *time, *threshold)
        }
        Commands::Active { file, time } => {
            let config = load_config(&cli)?;
            commands::query::handle_active(&config, file, *time)
        }
        Commands::Click(args) => {
            let config = load_config(&cli)?;
            commands::query::handle_click(&config, args)
        }
        Commands::Replay(args) => {
            let config = load_config(&cli)?;
            commands::replay::handle(config, args)
        }
        Commands::Config(ConfigCommands::Show) => {
            let config = load_config(&cli)?;
            commands::config::handle_show(&config)
        }
        Commands::Config(ConfigCommands::Init { force }) => {
            commands::config::handle_init(cli.config.as_deref(), *force)
        }
        Commands::Completions { shell } => commands::completions::handle(*shell),
    }
}
