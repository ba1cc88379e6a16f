use super::*;
use crate::Count;
use thiserror::Error;

/// Requests the engine refuses to evaluate.
///
/// Numeric disagreement between evaluators is not represented here; that is
/// a defect caught by tests, not something callers can recover from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("state {0} is not reachable from the start of the game")]
    Unreachable(State),
    #[error("state {0} has no buttons left to buy from the genie")]
    Exhausted(State),
    #[error("buttons remaining must lie in [0, {buttons}], got {remaining}")]
    Remaining { remaining: Count, buttons: Count },
    #[error("invalid game configuration: {0}")]
    Config(String),
}
