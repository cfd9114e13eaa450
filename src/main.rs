use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use connectiq::config::Config;

mod cli;

/// Log to stderr so stdout carries only command output.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let args = cli::Args::parse();

    let config = Config::load().context("failed to load config")?;

    match args.command {
        cli::Command::Recommend {
            intent,
            profiles,
            limit,
        } => cli::handle_recommend(&config, intent, profiles, limit),

        cli::Command::Profiles { profiles, limit } => {
            cli::handle_profiles(&config, profiles, limit)
        }

        cli::Command::Config {} => cli::handle_config(&config),
    }
}
