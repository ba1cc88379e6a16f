use crate::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rayon::prelude::*;

/// Monte Carlo estimate of a state's value: play the remaining draws out
/// at random many times and average the payoffs.
///
/// Independent of both exact evaluators, so it serves as a sanity check on
/// the game model itself. Playouts are split into fixed-size chunks, each
/// with its own RNG seeded from `seed` and the chunk index, so the estimate
/// depends only on `(seed, trials)` and not on the thread count.
pub struct Simulation {
    game: Game,
    trials: usize,
    seed: u64,
}

/// Sample mean of simulated payoffs with its standard error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub mean: Utility,
    pub error: Utility,
    pub trials: usize,
}

/// Running sums over one chunk of playouts.
#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    n: usize,
    sum: Utility,
    squares: Utility,
}

impl Tally {
    fn add(self, x: Utility) -> Self {
        Self {
            n: self.n + 1,
            sum: self.sum + x,
            squares: self.squares + x * x,
        }
    }
    fn merge(self, other: Self) -> Self {
        Self {
            n: self.n + other.n,
            sum: self.sum + other.sum,
            squares: self.squares + other.squares,
        }
    }
}

impl From<Tally> for Estimate {
    fn from(tally: Tally) -> Self {
        let n = tally.n.max(1) as Utility;
        let mean = tally.sum / n;
        let variance = (tally.squares / n - mean * mean).max(0.0);
        Self {
            mean,
            error: (variance / n).sqrt(),
            trials: tally.n,
        }
    }
}

impl Simulation {
    pub fn new(game: Game, trials: usize, seed: u64) -> Self {
        Self { game, trials, seed }
    }
    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Estimates the value of a reachable state.
    pub fn estimate(&self, state: State) -> Estimate {
        let chunks = self.trials.div_ceil(SIMULATION_CHUNK);
        let tally = (0..chunks)
            .into_par_iter()
            .map(|chunk| self.chunk(state, chunk))
            .collect::<Vec<Tally>>()
            .into_iter()
            .fold(Tally::default(), Tally::merge);
        log::debug!("simulated {} playouts from {}", tally.n, state);
        Estimate::from(tally)
    }
    fn chunk(&self, state: State, chunk: usize) -> Tally {
        let size = SIMULATION_CHUNK.min(self.trials - chunk * SIMULATION_CHUNK);
        let seed = self
            .seed
            .wrapping_add(chunk as u64)
            .wrapping_mul(0x9E3779B97F4A7C15);
        let ref mut rng = SmallRng::seed_from_u64(seed);
        (0..size)
            .map(|_| self.playout(state, rng))
            .fold(Tally::default(), Tally::add)
    }
    fn playout(&self, mut state: State, rng: &mut SmallRng) -> Utility {
        while !state.is_terminal() {
            state = state.play(&self.game, rng).1;
        }
        state.payoff(&self.game)
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(Game::default(), SIMULATION_TRIALS, SIMULATION_SEED)
    }
}

impl Evaluator for Simulation {
    fn game(&self) -> &Game {
        &self.game
    }
    fn ev(&self, state: State) -> Utility {
        self.estimate(state).mean
    }
}

impl std::fmt::Display for Estimate {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{:.2} ± {:.2} over {} playouts",
            self.mean, self.error, self.trials
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states_are_exact() {
        let simulation = Simulation::new(Game::default(), 100, 1);
        let estimate = simulation.estimate(State::new(3, 0, 5));
        assert_eq!(estimate.mean, 60.0);
        assert_eq!(estimate.error, 0.0);
        assert_eq!(estimate.trials, 100);
    }

    #[test]
    fn same_seed_same_estimate() {
        let game = Game::default();
        let a = Simulation::new(game, 10_000, 7).estimate(game.start());
        let b = Simulation::new(game, 10_000, 7).estimate(game.start());
        assert_eq!(a, b);
    }

    #[test]
    fn converges_to_recurrence() {
        let game = Game::default();
        let ref recurrence = Recurrence::new(game);
        let simulation = Simulation::new(game, 1 << 16, SIMULATION_SEED);
        for state in [
            game.start(),
            State::new(1, 9, 6),
            State::new(0, 5, 3),
            State::new(2, 4, 2),
            State::new(0, 1, 1),
        ] {
            let exact = recurrence.ev(state);
            let estimate = simulation.estimate(state);
            assert!(
                (estimate.mean - exact).abs() < 6.0 * estimate.error + 1e-9,
                "{}: {} vs {:.4}",
                state,
                estimate,
                exact
            );
        }
    }

    #[test]
    fn partial_chunks_are_counted() {
        let game = Game::default();
        let trials = SIMULATION_CHUNK * 2 + 17;
        let estimate = Simulation::new(game, trials, 3).estimate(game.start());
        assert_eq!(estimate.trials, trials);
    }
}
