//! Nit Button Calculator
//!
//! Expected value, genie prices, and EV tables for the progressive nit game.
//!
//! Commands: ev, genie, matrix, simulate

use clap::Parser;
use nitbutton::cli::Args;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    nitbutton::log(args.level());
    args.run()
}
