use crate::*;

/// Closed-form expected value, equal to [`Recurrence`] on every state.
///
/// With `r` draws left, `L` losers, `q = (P-1)/P` the chance one player
/// misses one draw, and `X` the buttons won from here on, the terminal
/// payoff is `V · ((owned + X) · L_final − N · [owned + X = 0])`. Taking
/// expectations term by term:
///
/// - `E[owned · L_final] = owned · L · q^r`
/// - `E[X · L_final] = (r/P) · L · q^(r-1)`, since each button we win
///   leaves a loser only the other `r-1` draws to dodge
/// - `P(owned + X = 0) = [owned = 0] · q^r`
pub struct ClosedForm {
    game: Game,
}

impl ClosedForm {
    pub fn new(game: Game) -> Self {
        Self { game }
    }
    /// Chance one loser dodges all `r` remaining draws.
    fn dodge_all(&self, state: &State) -> Probability {
        self.game.miss().powi(state.remaining() as i32)
    }
    /// Expected buttons won times chance one loser dodges the other draws.
    /// Zero with no draws left; never evaluates `q^-1`.
    fn expected_gains(&self, state: &State) -> Probability {
        match state.remaining() {
            0 => 0.0,
            r => {
                let share = r as Probability / self.game.players() as Probability;
                share * self.game.miss().powi(r as i32 - 1)
            }
        }
    }
}

impl Evaluator for ClosedForm {
    fn game(&self) -> &Game {
        &self.game
    }
    fn ev(&self, state: State) -> Utility {
        let losers = state.losers() as Utility;
        let buttons = self.game.buttons() as Utility;
        let dodge_all = self.dodge_all(&state);
        let gains = self.expected_gains(&state) * losers;
        match state.owned() {
            0 => self.game.value() * (gains - buttons * dodge_all),
            n => self.game.value() * (n as Utility * losers * dodge_all + gains),
        }
    }
}

impl From<Game> for ClosedForm {
    fn from(game: Game) -> Self {
        Self::new(game)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every owned/losers pair in each matrix, reachable or not.
    fn grid(game: &Game) -> impl Iterator<Item = State> + '_ {
        (0..=game.buttons()).flat_map(move |remaining| {
            game.owned(remaining).flat_map(move |owned| {
                game.losers(remaining)
                    .map(move |losers| State::new(owned, remaining, losers))
            })
        })
    }

    fn equivalent(game: Game) {
        let closed = ClosedForm::new(game);
        let recurrence = Recurrence::new(game);
        for state in grid(&game) {
            let a = recurrence.ev(state);
            let b = closed.ev(state);
            assert!(
                (a - b).abs() < EQUIVALENCE_TOLERANCE,
                "{} in {}: recurrence {:.9} ≠ closed {:.9}",
                state,
                game,
                a,
                b
            );
        }
    }

    #[test]
    fn matches_recurrence_on_default_game() {
        equivalent(Game::default());
    }

    #[test]
    fn matches_recurrence_on_other_tables() {
        for players in 1..=9 {
            for buttons in [0, 1, 2, 5, 12] {
                equivalent(Game::new(players, buttons, 2.5).unwrap());
            }
        }
    }

    #[test]
    fn matches_recurrence_on_random_tables() {
        for _ in 0..16 {
            equivalent(Game::random());
        }
    }

    #[test]
    fn single_player_table_is_finite() {
        // q = 0: the lone player wins every button, nobody is left to pay
        let game = Game::new(1, 3, 4.0).unwrap();
        let closed = ClosedForm::new(game);
        for state in grid(&game) {
            assert!(closed.ev(state).is_finite(), "{}", state);
        }
        assert_eq!(closed.ev(State::new(0, 0, 0)), -12.0);
        assert_eq!(closed.ev(game.start()), 0.0);
    }

    #[test]
    fn terminal_values() {
        let closed = ClosedForm::new(Game::default());
        assert_eq!(closed.ev(State::new(0, 0, 6)), -40.0);
        assert_eq!(closed.ev(State::new(3, 0, 5)), 60.0);
    }
}
