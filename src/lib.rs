//! Expected value engine for the progressive nit button game.
//!
//! Every player at the table is dealt into a sequence of button draws. Each
//! draw awards one button to one of the players, uniformly at random. When
//! the last button is gone, players holding zero buttons pay every button
//! holder per button held. This crate computes what a seat is worth at any
//! point along the way, and what it should pay to buy the next button
//! outright.
//!
//! # Module Structure
//!
//! - `game` — configuration, state triples, draw outcomes, reachability
//! - `engine` — recurrence, closed form, genie pricing, simulation
//! - `report` — EV and genie matrices for a fixed number of buttons remaining
//! - `cli` — command line surface for the `nit` binary
#![allow(dead_code)]

pub mod engine;
pub mod game;
pub mod report;

#[cfg(feature = "cli")]
pub mod cli;

pub use engine::*;
pub use game::*;
pub use report::*;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Players, buttons, and the three state coordinates. Signed so that raw
/// user input can be rejected rather than wrapped.
pub type Count = i16;
/// Expected values, payoffs, and genie prices.
pub type Utility = f64;
/// Draw probabilities and survival probabilities.
pub type Probability = f64;

// ============================================================================
// TRAITS
// ============================================================================
/// Random instance generation for testing and Monte Carlo sampling.
pub trait Arbitrary {
    /// Generate a uniformly random instance.
    fn random() -> Self;
}

/// Allows `x.pipe(f)` in place of `f(x)` at the end of method chains.
pub trait Pipe: Sized {
    fn pipe<F, R>(self, f: F) -> R
    where
        F: FnOnce(Self) -> R,
    {
        f(self)
    }
}
impl<T> Pipe for T {}

// ============================================================================
// GAME PARAMETERS
// ============================================================================
/// Number of players at the table.
pub const PLAYERS: Count = 7;
/// Number of buttons handed out over the course of the game.
pub const BUTTONS: Count = 10;
/// Amount each button collects from each buttonless player at resolution.
pub const BUTTON_VALUE: Utility = 4.0;
/// Largest table a configuration may describe.
pub const MAX_PLAYERS: Count = 64;
/// Largest button count a configuration may describe. Bounds recursion depth.
pub const MAX_BUTTONS: Count = 512;

// ============================================================================
// NUMERICS
// ============================================================================
/// Maximum disagreement tolerated between recurrence and closed form.
pub const EQUIVALENCE_TOLERANCE: Utility = 1e-6;
/// Genie prices beyond this multiple of `V·(N + P − 1)`, the most one
/// button can move a final payoff, are logged as suspicious.
pub const GENIE_SUSPICION: Utility = 2.0;

// ============================================================================
// MONTE CARLO SIMULATION
// ============================================================================
/// Default number of simulated playouts.
pub const SIMULATION_TRIALS: usize = 1 << 18;
/// Playouts per rayon task. Each chunk owns one seeded RNG.
pub const SIMULATION_CHUNK: usize = 1 << 12;
/// Default RNG seed so repeated runs agree.
pub const SIMULATION_SEED: u64 = 0x6E6974;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize terminal logging at the given level.
#[cfg(feature = "cli")]
pub fn log(level: log::LevelFilter) {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    simplelog::TermLogger::init(
        level,
        config,
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )
    .expect("initialize logger");
}
