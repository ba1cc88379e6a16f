use crate::*;

/// Entry points over integer triples.
///
/// Owns one memoized [`Recurrence`] per game, so repeated queries against
/// the same calculator share cached states. The `ev_*` and `genie_price`
/// functions trust their input like the evaluators they wrap; [`Self::ev`]
/// and [`Self::genie`] check reachability first and reject states that
/// cannot occur. `genie_price` alone returns a `Result`: with no buttons
/// left there is no next button to buy, and that is a misuse of the
/// domain rather than an unreachable input the caller forgot to check.
pub struct Calculator {
    recurrence: Recurrence,
    closed: ClosedForm,
    simulation: Simulation,
}

impl Calculator {
    pub fn new(game: Game) -> Self {
        Self {
            recurrence: Recurrence::new(game),
            closed: ClosedForm::new(game),
            simulation: Simulation::new(game, SIMULATION_TRIALS, SIMULATION_SEED),
        }
    }
    /// Replaces the playout budget and seed used by [`Method::Simulation`].
    pub fn with_simulation(self, trials: usize, seed: u64) -> Self {
        let game = *self.game();
        Self {
            simulation: Simulation::new(game, trials, seed),
            ..self
        }
    }
    pub fn game(&self) -> &Game {
        self.recurrence.game()
    }
    pub fn recurrence(&self) -> &Recurrence {
        &self.recurrence
    }
    pub fn closed(&self) -> &ClosedForm {
        &self.closed
    }
    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    pub fn is_valid(&self, owned: Count, remaining: Count, losers: Count) -> bool {
        State::new(owned, remaining, losers).is_valid(self.game())
    }
    /// Raw recurrence value. The caller checks [`Self::is_valid`] first.
    pub fn ev_recurrence(&self, owned: Count, remaining: Count, losers: Count) -> Utility {
        self.recurrence.ev(State::new(owned, remaining, losers))
    }
    /// Raw closed-form value. The caller checks [`Self::is_valid`] first.
    pub fn ev_closed_form(&self, owned: Count, remaining: Count, losers: Count) -> Utility {
        self.closed.ev(State::new(owned, remaining, losers))
    }
    /// Raw genie price. Fails only when no buttons remain.
    pub fn genie_price(
        &self,
        owned: Count,
        remaining: Count,
        losers: Count,
    ) -> Result<Utility, Rejection> {
        Genie::new(&self.recurrence).price(State::new(owned, remaining, losers))
    }

    /// Value of a reachable state by the chosen method.
    pub fn ev(&self, method: Method, state: State) -> Result<Utility, Rejection> {
        let state = state.validate(self.game())?;
        let value = match method {
            Method::Closed => self.closed.ev(state),
            Method::Recurrence => self.recurrence.ev(state),
            Method::Simulation => self.simulation.ev(state),
        };
        log::debug!("{} ev {} = {:.6}", method, state, value);
        Ok(value)
    }
    /// Genie price of a reachable state with at least one button left.
    pub fn genie(&self, state: State) -> Result<Utility, Rejection> {
        let state = state.validate(self.game())?;
        let price = Genie::new(&self.recurrence).price(state)?;
        log::debug!(
            "genie {} = {:.6} ({} states cached)",
            state,
            price,
            self.recurrence.len()
        );
        Ok(price)
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new(Game::default())
    }
}

impl From<Game> for Calculator {
    fn from(game: Game) -> Self {
        Self::new(game)
    }
}
