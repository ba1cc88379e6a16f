pub mod query;
pub use query::*;

use crate::*;
use anyhow::Context;

impl Args {
    /// Logging level implied by `--verbose`.
    pub fn level(&self) -> log::LevelFilter {
        if self.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        }
    }

    /// Defaults, then the config file, then individual flags.
    pub fn game(&self) -> anyhow::Result<Game> {
        let base = match self.config {
            Some(ref path) => Game::load(path)?,
            None => Game::default(),
        };
        let game = base
            .with(self.players, self.buttons, self.value)
            .context("apply command line overrides")?;
        log::debug!("playing {}", game);
        Ok(game)
    }

    /// Runs the query and returns what should be printed.
    pub fn execute(&self) -> anyhow::Result<String> {
        let calculator = Calculator::new(self.game()?);
        match self.query {
            Query::Ev {
                owned,
                remaining,
                losers,
                method,
            } => State::new(owned, remaining, losers)
                .pipe(|state| calculator.ev(method, state).map(|ev| (state, ev)))
                .map(|(state, ev)| format!("ev {} = {:.2}", state, ev))
                .map_err(anyhow::Error::from),
            Query::Genie {
                owned,
                remaining,
                losers,
            } => State::new(owned, remaining, losers)
                .pipe(|state| calculator.genie(state).map(|price| (state, price)))
                .map(|(state, price)| format!("genie {} = {:.2}", state, price))
                .map_err(anyhow::Error::from),
            Query::Matrix {
                remaining,
                method,
                json,
            } => {
                let matrix = Matrix::new(&calculator, remaining, method)?;
                match json {
                    true => serde_json::to_string_pretty(&matrix).context("serialize matrix"),
                    false => Ok(matrix.to_string()),
                }
            }
            Query::Simulate {
                owned,
                remaining,
                losers,
                trials,
                seed,
            } => {
                let state = State::new(owned, remaining, losers).validate(calculator.game())?;
                let estimate = Simulation::new(*calculator.game(), trials, seed).estimate(state);
                let exact = calculator.recurrence().ev(state);
                Ok(format!(
                    "simulated {} = {}\nexact     {} = {:.2}",
                    state, estimate, state, exact
                ))
            }
        }
    }

    pub fn run(&self) -> anyhow::Result<()> {
        println!("{}", self.execute()?);
        Ok(())
    }
}
