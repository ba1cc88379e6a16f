use super::*;
use crate::*;
use anyhow::Context;
use serde::Deserialize;
use serde::Serialize;
use std::ops::RangeInclusive;
use std::path::Path;

/// Fixed parameters of one game: table size, button supply, button value.
///
/// Every evaluator is built from a `Game` rather than from global constants,
/// so independent configurations can be evaluated side by side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Game {
    players: Count,
    buttons: Count,
    value: Utility,
}

impl Default for Game {
    fn default() -> Self {
        Self {
            players: PLAYERS,
            buttons: BUTTONS,
            value: BUTTON_VALUE,
        }
    }
}

impl Game {
    /// Builds and validates a configuration.
    pub fn new(players: Count, buttons: Count, value: Utility) -> Result<Self, Rejection> {
        Self {
            players,
            buttons,
            value,
        }
        .validated()
    }
    /// Total participants, including the evaluated seat.
    pub fn players(&self) -> Count {
        self.players
    }
    /// Total buttons handed out over the game.
    pub fn buttons(&self) -> Count {
        self.buttons
    }
    /// Payment per button per buttonless player at resolution.
    pub fn value(&self) -> Utility {
        self.value
    }
    /// Penalty for finishing with no buttons.
    pub fn penalty(&self) -> Utility {
        -self.value * self.buttons as Utility
    }
    /// Probability that one specific player misses one specific draw.
    pub fn miss(&self) -> Probability {
        (self.players - 1) as Probability / self.players as Probability
    }
    /// The canonical starting position.
    pub fn start(&self) -> State {
        State::new(0, self.buttons, self.players - 1)
    }

    /// Replaces whichever parameters are given.
    pub fn with(
        self,
        players: Option<Count>,
        buttons: Option<Count>,
        value: Option<Utility>,
    ) -> Result<Self, Rejection> {
        Self {
            players: players.unwrap_or(self.players),
            buttons: buttons.unwrap_or(self.buttons),
            value: value.unwrap_or(self.value),
        }
        .validated()
    }
    fn validated(self) -> Result<Self, Rejection> {
        if !(1..=MAX_PLAYERS).contains(&self.players) {
            Err(Rejection::Config(format!(
                "players must lie in [1, {}], got {}",
                MAX_PLAYERS, self.players
            )))
        } else if !(0..=MAX_BUTTONS).contains(&self.buttons) {
            Err(Rejection::Config(format!(
                "buttons must lie in [0, {}], got {}",
                MAX_BUTTONS, self.buttons
            )))
        } else if !self.value.is_finite() {
            Err(Rejection::Config(format!(
                "button value must be finite, got {}",
                self.value
            )))
        } else {
            Ok(self)
        }
    }

    /// Reads a JSON configuration. Missing fields fall back to the defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read game config {}", path.display()))?;
        let game = serde_json::from_str::<Self>(&text)
            .with_context(|| format!("parse game config {}", path.display()))?
            .validated()?;
        log::debug!("loaded {} from {}", game, path.display());
        Ok(game)
    }

    /// Checks the remaining count of a matrix-style request.
    pub fn check(&self, remaining: Count) -> Result<Count, Rejection> {
        if (0..=self.buttons).contains(&remaining) {
            Ok(remaining)
        } else {
            Err(Rejection::Remaining {
                remaining,
                buttons: self.buttons,
            })
        }
    }
    /// Row range: how many buttons the evaluated seat could hold.
    pub fn owned(&self, remaining: Count) -> RangeInclusive<Count> {
        0..=(self.buttons - remaining)
    }
    /// Column range: how many other players could still be buttonless.
    /// At most one other player leaves the losers per button handed out.
    pub fn losers(&self, remaining: Count) -> RangeInclusive<Count> {
        let given = self.buttons - remaining;
        (self.players - 1 - given).max(0)..=(self.players - 1)
    }
    /// Every reachable state, by decreasing buttons remaining.
    pub fn states(&self) -> impl Iterator<Item = State> + '_ {
        (0..=self.buttons).rev().flat_map(move |remaining| {
            self.owned(remaining).flat_map(move |owned| {
                self.losers(remaining)
                    .map(move |losers| State::new(owned, remaining, losers))
                    .filter(move |state| state.is_valid(self))
            })
        })
    }

    /// A reachable state found by playing a random prefix of the game.
    pub fn sample<R: rand::Rng>(&self, rng: &mut R) -> State {
        let steps = rng.random_range(0..=self.buttons);
        (0..steps).fold(self.start(), |state, _| state.play(self, rng).1)
    }
}

impl Arbitrary for Game {
    fn random() -> Self {
        use rand::Rng;
        let ref mut rng = rand::rng();
        Self {
            players: rng.random_range(1..=9),
            buttons: rng.random_range(0..=12),
            value: rng.random_range(1..=8) as Utility,
        }
    }
}

impl std::fmt::Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} players, {} buttons @ {}",
            self.players, self.buttons, self.value
        )
    }
}
