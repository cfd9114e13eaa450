use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod errors;
mod handlers;
mod validation;

pub use handlers::*;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rank profiles against an intent and print the report as JSON
    Recommend {
        /// What you are looking for, e.g. "rust backend engineer"
        #[clap(short, long)]
        intent: String,

        /// JSON file with an array of profiles.
        /// Falls back to the built-in profiles when the file holds none.
        #[clap(short, long, env = "CONNECTIQ_PROFILES")]
        profiles: Option<PathBuf>,

        /// Maximum profiles taken from each source
        #[clap(short, long)]
        limit: Option<usize>,
    },
    /// Print the profile pool and its data sources
    Profiles {
        /// JSON file with an array of profiles
        #[clap(short, long, env = "CONNECTIQ_PROFILES")]
        profiles: Option<PathBuf>,

        /// Maximum profiles taken from each source
        #[clap(short, long)]
        limit: Option<usize>,
    },
    /// Print the effective configuration
    Config {},
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_recommend() {
        let args = Args::try_parse_from([
            "connectiq",
            "recommend",
            "--intent",
            "machine learning research",
            "--limit",
            "3",
        ])
        .unwrap();

        match args.command {
            Command::Recommend { intent, limit, .. } => {
                assert_eq!(intent, "machine learning research");
                assert_eq!(limit, Some(3));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_recommend_requires_intent() {
        assert!(Args::try_parse_from(["connectiq", "recommend"]).is_err());
    }
}
