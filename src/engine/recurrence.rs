use crate::*;
use std::collections::HashMap;
use std::sync::PoisonError;
use std::sync::RwLock;

/// Backward induction over the button draws, memoized per state.
///
/// Many draw orders reach the same state, so the recursion is a DAG. Each
/// state is computed once and kept for the lifetime of the evaluator; the
/// reachable domain is at most `O(N² · P)` states so nothing is evicted.
///
/// Misses are computed without holding the lock. Two threads racing on the
/// same state both compute it and write the same value.
pub struct Recurrence {
    game: Game,
    cache: RwLock<HashMap<State, Utility>>,
}

impl Recurrence {
    pub fn new(game: Game) -> Self {
        Self {
            game,
            cache: RwLock::new(HashMap::new()),
        }
    }
    /// Number of states materialized so far.
    pub fn len(&self) -> usize {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup(&self, state: &State) -> Option<Utility> {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(state)
            .copied()
    }
    fn store(&self, state: State, value: Utility) -> Utility {
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(state, value);
        value
    }
    fn expand(&self, state: State) -> Utility {
        if state.is_terminal() {
            state.payoff(&self.game)
        } else {
            state
                .draws(&self.game)
                .map(|(_, p, next)| p * self.ev(next))
                .sum()
        }
    }
}

impl Evaluator for Recurrence {
    fn game(&self) -> &Game {
        &self.game
    }
    fn ev(&self, state: State) -> Utility {
        match self.lookup(&state) {
            Some(value) => value,
            None => self.store(state, self.expand(state)),
        }
    }
}

impl From<Game> for Recurrence {
    fn from(game: Game) -> Self {
        Self::new(game)
    }
}
