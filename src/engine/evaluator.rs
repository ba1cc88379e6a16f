use crate::*;
use serde::Serialize;

/// Anything that can price a state of a fixed [`Game`].
///
/// Implementors assume the state is reachable; validation belongs to the
/// caller (see [`Calculator`]). Results for unreachable states are
/// unspecified.
pub trait Evaluator: Sync {
    fn game(&self) -> &Game;
    fn ev(&self, state: State) -> Utility;
}

/// Which evaluator a caller wants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Method {
    /// Analytic formula.
    #[default]
    Closed,
    /// Memoized backward induction.
    Recurrence,
    /// Monte Carlo playouts.
    Simulation,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Closed => write!(f, "closed"),
            Self::Recurrence => write!(f, "recurrence"),
            Self::Simulation => write!(f, "simulation"),
        }
    }
}
