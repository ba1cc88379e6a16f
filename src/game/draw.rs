use crate::Count;

/// Who receives the next button, from the evaluated seat's point of view.
///
/// Only the count of buttonless opponents matters for payoffs, so the
/// other players collapse into two classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Draw {
    /// The evaluated seat wins the button.
    Mine,
    /// A buttonless opponent wins it and stops being a loser.
    Loser,
    /// An opponent who already holds a button wins another.
    Holder,
}

impl Draw {
    pub const ALL: [Self; 3] = [Self::Mine, Self::Loser, Self::Holder];

    /// How many of the table's seats produce this outcome.
    pub fn seats(&self, players: Count, losers: Count) -> Count {
        match self {
            Self::Mine => 1,
            Self::Loser => losers,
            Self::Holder => players - 1 - losers,
        }
    }
}
