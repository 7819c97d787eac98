//! Command line arguments.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "Roll dice and flip coins", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Print results as JSON lines
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Roll a die
    Roll {
        /// Number of faces, e.g. "20" or "d20" (defaults to KNUCKLEBONES_DEFAULT_DIE)
        die: Option<String>,

        /// How many times to roll
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        times: u32,
    },
    /// Flip a coin
    Flip {
        /// How many times to flip
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        times: u32,
    },
    /// Roll one of each standard die (d4 through d100)
    Standard,
}
