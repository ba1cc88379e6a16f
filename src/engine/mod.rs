pub mod calculator;
pub use calculator::*;

pub mod closed;
pub use closed::*;

pub mod evaluator;
pub use evaluator::*;

pub mod genie;
pub use genie::*;

pub mod recurrence;
pub use recurrence::*;

pub mod simulation;
pub use simulation::*;
