use crate::*;

/// Prices a guaranteed win of the next button.
///
/// The most a seat should pay for certainty is the value of the state where
/// it already holds the next button minus the value of the state where that
/// button is still up for grabs. Backed by an exact evaluator; pass a
/// [`Recurrence`] or a [`ClosedForm`], never a sampled estimate.
pub struct Genie<'a, E: Evaluator> {
    evaluator: &'a E,
}

impl<'a, E: Evaluator> Genie<'a, E> {
    pub fn new(evaluator: &'a E) -> Self {
        Self { evaluator }
    }
    /// Genie price of a reachable state. Fails when no buttons remain.
    pub fn price(&self, state: State) -> Result<Utility, Rejection> {
        if state.is_terminal() {
            return Err(Rejection::Exhausted(state));
        }
        let bought = self.evaluator.ev(state.next(Draw::Mine));
        let current = self.evaluator.ev(state);
        let price = bought - current;
        if self.suspicious(price) {
            log::warn!("genie price {:.2} at {} looks out of scale", price, state);
        }
        Ok(price)
    }
    /// Far beyond anything one button can swing.
    fn suspicious(&self, price: Utility) -> bool {
        let game = self.evaluator.game();
        let reach = (game.buttons() + game.players() - 1).max(1) as Utility;
        price.abs() > GENIE_SUSPICION * game.value().abs() * reach
    }
}
