use super::*;
use crate::*;

/// A position in the game from the evaluated seat's point of view.
///
/// - `owned` — buttons the evaluated seat holds
/// - `remaining` — buttons not yet handed out
/// - `losers` — other players still holding zero buttons
///
/// How the remaining opponents' buttons are spread among themselves does
/// not affect anyone's payoff, so these three numbers are the full state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct State {
    owned: Count,
    remaining: Count,
    losers: Count,
}

impl State {
    pub const fn new(owned: Count, remaining: Count, losers: Count) -> Self {
        Self {
            owned,
            remaining,
            losers,
        }
    }
    pub fn owned(&self) -> Count {
        self.owned
    }
    pub fn remaining(&self) -> Count {
        self.remaining
    }
    pub fn losers(&self) -> Count {
        self.losers
    }
    /// No buttons left to draw.
    pub fn is_terminal(&self) -> bool {
        self.remaining <= 0
    }

    /// Whether this state can arise from `game.start()` through single
    /// button draws.
    pub fn is_valid(&self, game: &Game) -> bool {
        if self.owned < 0 || self.remaining < 0 || self.losers < 0 {
            return false;
        }
        if self.losers > game.players() - 1 {
            return false;
        }
        if self.remaining > game.buttons() || self.owned > game.buttons() {
            return false;
        }
        let given = game.buttons() - self.remaining;
        let others = given - self.owned;
        let winners = game.players() - 1 - self.losers;
        if others < 0 {
            return false;
        }
        if winners > others {
            return false;
        }
        if others > 0 && winners == 0 {
            return false;
        }
        true
    }
    /// Passes reachable states through, rejects the rest.
    pub fn validate(self, game: &Game) -> Result<Self, Rejection> {
        if self.is_valid(game) {
            Ok(self)
        } else {
            Err(Rejection::Unreachable(self))
        }
    }

    /// The state after the next button goes to `draw`.
    pub fn next(&self, draw: Draw) -> Self {
        match draw {
            Draw::Mine => Self::new(
                self.owned.saturating_add(1),
                self.remaining.saturating_sub(1),
                self.losers,
            ),
            Draw::Loser => Self::new(
                self.owned,
                self.remaining.saturating_sub(1),
                self.losers.saturating_sub(1),
            ),
            Draw::Holder => Self::new(self.owned, self.remaining.saturating_sub(1), self.losers),
        }
    }
    /// Outcomes of the next draw that can actually happen, with their
    /// probabilities and successor states. Empty once no buttons remain.
    pub fn draws(&self, game: &Game) -> impl Iterator<Item = (Draw, Probability, Self)> + '_ {
        let players = game.players();
        let live = !self.is_terminal();
        Draw::ALL
            .into_iter()
            .filter(move |_| live)
            .map(move |draw| (draw, draw.seats(players, self.losers)))
            .filter(|(_, seats)| *seats > 0)
            .map(move |(draw, seats)| {
                (
                    draw,
                    seats as Probability / players as Probability,
                    self.next(draw),
                )
            })
    }
    /// Hands the next button to a uniformly chosen seat.
    pub fn play<R: rand::Rng>(&self, game: &Game, rng: &mut R) -> (Draw, Self) {
        let seat = rng.random_range(0..game.players());
        let draw = match seat {
            0 => Draw::Mine,
            s if s <= self.losers => Draw::Loser,
            _ => Draw::Holder,
        };
        (draw, self.next(draw))
    }
    /// What the evaluated seat collects once no buttons remain.
    pub fn payoff(&self, game: &Game) -> Utility {
        match self.owned {
            0 => game.penalty(),
            n => n as Utility * game.value() * self.losers as Utility,
        }
    }
}

impl From<(Count, Count, Count)> for State {
    fn from((owned, remaining, losers): (Count, Count, Count)) -> Self {
        Self::new(owned, remaining, losers)
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "(owned={}, remaining={}, losers={})",
            self.owned, self.remaining, self.losers
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_start_is_valid() {
        let game = Game::default();
        assert!(State::new(0, 10, 6).is_valid(&game));
        assert!(game.start().is_valid(&game));
    }

    #[test]
    fn draw_without_new_holder_is_invalid() {
        let game = Game::default();
        assert!(!State::new(0, 9, 6).is_valid(&game));
        for players in 2..=8 {
            let game = Game::new(players, 10, 4.0).unwrap();
            let state = State::new(0, game.buttons() - 1, game.players() - 1);
            assert!(!state.is_valid(&game), "{} in {}", state, game);
        }
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        let game = Game::default();
        assert!(!State::new(-1, 10, 6).is_valid(&game));
        assert!(!State::new(0, -1, 6).is_valid(&game));
        assert!(!State::new(0, 10, -1).is_valid(&game));
        assert!(!State::new(0, 11, 6).is_valid(&game));
        assert!(!State::new(0, 10, 7).is_valid(&game));
        assert!(!State::new(5, 6, 6).is_valid(&game));
    }

    #[test]
    fn extreme_coordinates_are_invalid() {
        let game = Game::default();
        assert!(!State::new(Count::MAX, Count::MAX, 0).is_valid(&game));
        assert!(!State::new(Count::MAX, 0, 0).is_valid(&game));
        assert!(!State::new(0, Count::MAX, 6).is_valid(&game));
        assert!(!State::new(11, 0, 6).is_valid(&game));
        assert!(!State::new(Count::MAX, Count::MAX, Count::MAX).is_valid(&game));
    }

    #[test]
    fn next_saturates_at_the_edges() {
        let state = State::new(Count::MAX, 1, 0).next(Draw::Mine);
        assert_eq!(state, State::new(Count::MAX, 0, 0));
    }

    #[test]
    fn more_winners_than_buttons_is_invalid() {
        let game = Game::default();
        // 2 buttons to others cannot make 3 other winners
        assert!(!State::new(0, 8, 3).is_valid(&game));
        assert!(State::new(0, 8, 4).is_valid(&game));
        assert!(State::new(0, 8, 5).is_valid(&game));
        assert!(State::new(2, 8, 6).is_valid(&game));
        assert!(!State::new(1, 8, 6).is_valid(&game));
    }

    #[test]
    fn validate_reports_the_state() {
        let game = Game::default();
        let state = State::new(0, 9, 6);
        assert_eq!(state.validate(&game), Err(Rejection::Unreachable(state)));
        assert_eq!(game.start().validate(&game), Ok(game.start()));
    }

    #[test]
    fn draw_probabilities_sum_to_one() {
        let game = Game::default();
        for state in game.states().filter(|s| !s.is_terminal()) {
            let total = state.draws(&game).map(|(_, p, _)| p).sum::<Probability>();
            assert!((total - 1.0).abs() < 1e-12, "{}: {}", state, total);
        }
    }

    #[test]
    fn zero_probability_draws_are_skipped() {
        let game = Game::default();
        let draws = State::new(2, 3, 0)
            .draws(&game)
            .map(|(d, _, _)| d)
            .collect::<Vec<_>>();
        assert_eq!(draws, vec![Draw::Mine, Draw::Holder]);
        assert_eq!(State::new(2, 0, 3).draws(&game).count(), 0);
    }

    #[test]
    fn terminal_payoffs() {
        let game = Game::default();
        assert_eq!(State::new(0, 0, 6).payoff(&game), -40.0);
        assert_eq!(State::new(3, 0, 5).payoff(&game), 60.0);
        assert_eq!(State::new(4, 0, 0).payoff(&game), 0.0);
    }
}
