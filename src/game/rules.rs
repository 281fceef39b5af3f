use super::*;
use crate::Utility;

/// One utility per seat, indexed by [`Seat::index`].
pub type Payoff = Vec<Utility>;

/// The rules of a finite, deterministic, round-robin game.
///
/// Implementors describe legal moves, termination and payoffs over a
/// [`History`]; solvers never see any other game state.
///
/// # Required Methods
///
/// - `seats()`: number of players
/// - `choices(seat)`: legal actions of a seat
/// - `is_terminal(history)`: whether play has ended
/// - `payoff(history)`: utilities at a terminal history (zeros elsewhere)
///
/// # Provided Methods
///
/// - `turn(history)`: round-robin seat or [`Turn::Terminal`]
/// - `info(history)`: perfect-recall information set by default
/// - `consensus(history)`: the agreed action, for games that have one
/// - `negotiates()`: whether play is meant to end in such an agreement
/// - `label(edge)`: human-readable action name for transcripts
pub trait Game: Send + Sync {
    type E: Edge;

    fn seats(&self) -> usize;
    fn choices(&self, seat: Seat) -> Vec<Self::E>;
    fn is_terminal(&self, history: &History<Self::E>) -> bool;
    fn payoff(&self, history: &History<Self::E>) -> Payoff;

    fn turn(&self, history: &History<Self::E>) -> Turn {
        if self.is_terminal(history) {
            Turn::Terminal
        } else {
            Turn::Seat(Seat::from(history.len() % self.seats()))
        }
    }
    fn info(&self, history: &History<Self::E>) -> Info<Self::E> {
        Info::from((Seat::from(history.len() % self.seats()), history.clone()))
    }
    fn consensus(&self, _: &History<Self::E>) -> Option<Self::E> {
        None
    }
    fn negotiates(&self) -> bool {
        false
    }
    fn label(&self, edge: &Self::E) -> String {
        edge.to_string()
    }
}
