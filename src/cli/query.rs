use crate::*;
use clap::Parser;
use clap::Subcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Expected value and genie pricing for the progressive nit button game",
    long_about = None
)]
pub struct Args {
    #[command(subcommand)]
    pub query: Query,
    /// JSON file with any of `players`, `buttons`, `value`
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Players at the table, including you
    #[arg(long, global = true)]
    pub players: Option<Count>,
    /// Buttons handed out over the game
    #[arg(long, global = true)]
    pub buttons: Option<Count>,
    /// What each buttonless player pays per button at the end
    #[arg(long, global = true)]
    pub value: Option<Utility>,
    /// Log evaluation details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Query {
    #[command(about = "Expected value of a state", alias = "e")]
    Ev {
        #[arg(required = true, allow_negative_numbers = true)]
        owned: Count,
        #[arg(required = true, allow_negative_numbers = true)]
        remaining: Count,
        #[arg(required = true, allow_negative_numbers = true)]
        losers: Count,
        #[arg(long, value_enum, default_value_t = Method::Closed)]
        method: Method,
    },
    #[command(about = "Most you should pay to win the next button", alias = "g")]
    Genie {
        #[arg(required = true, allow_negative_numbers = true)]
        owned: Count,
        #[arg(required = true, allow_negative_numbers = true)]
        remaining: Count,
        #[arg(required = true, allow_negative_numbers = true)]
        losers: Count,
    },
    #[command(
        about = "EV and genie tables for a number of buttons remaining",
        alias = "m"
    )]
    Matrix {
        #[arg(required = true, allow_negative_numbers = true)]
        remaining: Count,
        #[arg(long, value_enum, default_value_t = Method::Closed)]
        method: Method,
        /// Print JSON instead of tables
        #[arg(long)]
        json: bool,
    },
    #[command(about = "Monte Carlo estimate of a state", alias = "s")]
    Simulate {
        #[arg(required = true, allow_negative_numbers = true)]
        owned: Count,
        #[arg(required = true, allow_negative_numbers = true)]
        remaining: Count,
        #[arg(required = true, allow_negative_numbers = true)]
        losers: Count,
        #[arg(long, default_value_t = SIMULATION_TRIALS)]
        trials: usize,
        #[arg(long, default_value_t = SIMULATION_SEED)]
        seed: u64,
    },
}
