use crate::*;
use std::collections::BTreeMap;

/// A one-shot two-player game given by its payoff matrix.
///
/// Seat 1 moves, then seat 2 moves without seeing seat 1's choice, and the
/// game ends. Every seat has a single information set.
#[derive(Debug, Clone)]
pub struct Bimatrix<E> {
    actions: Vec<E>,
    matrix: BTreeMap<(E, E), (Utility, Utility)>,
}

impl<E> Bimatrix<E>
where
    E: Edge,
{
    /// Builds a game, requiring an outcome for every pair of actions.
    pub fn new(actions: Vec<E>, matrix: BTreeMap<(E, E), (Utility, Utility)>) -> anyhow::Result<Self> {
        anyhow::ensure!(!actions.is_empty(), "a matrix game needs at least one action");
        for a in actions.iter() {
            for b in actions.iter() {
                anyhow::ensure!(matrix.contains_key(&(*a, *b)), "missing outcome for ({}, {})", a, b);
            }
        }
        Ok(Self { actions, matrix })
    }
    pub fn actions(&self) -> &[E] {
        &self.actions
    }
    pub fn matrix(&self) -> &BTreeMap<(E, E), (Utility, Utility)> {
        &self.matrix
    }
    /// Payoffs of both seats for one pair of actions.
    pub fn outcome(&self, first: E, second: E) -> (Utility, Utility) {
        self.matrix
            .get(&(first, second))
            .copied()
            .unwrap_or_default()
    }
    /// The payoff of one seat for one pair of actions.
    pub fn utility(&self, seat: Seat, first: E, second: E) -> Utility {
        let (u1, u2) = self.outcome(first, second);
        match seat.index() {
            0 => u1,
            _ => u2,
        }
    }
    /// Payoffs of a finished game.
    pub fn settle(&self, history: &History<E>) -> anyhow::Result<(Utility, Utility)> {
        match history.moves() {
            [(_, first), (_, second)] => Ok(self.outcome(*first, *second)),
            moves => Err(anyhow::anyhow!(
                "history must contain exactly two actions, found {}",
                moves.len()
            )),
        }
    }
}

impl Bimatrix<Move> {
    /// The classical dilemma: defecting strictly dominates cooperating.
    pub fn prisoners_dilemma() -> Self {
        Self {
            actions: vec![Move::C, Move::D],
            matrix: BTreeMap::from([
                ((Move::C, Move::C), (3., 3.)),
                ((Move::C, Move::D), (0., 5.)),
                ((Move::D, Move::C), (5., 0.)),
                ((Move::D, Move::D), (1., 1.)),
            ]),
        }
    }
}

impl Bimatrix<Venue> {
    /// The classical coordination game with opposed preferences.
    pub fn battle_of_the_sexes() -> Self {
        Self {
            actions: vec![Venue::O, Venue::F],
            matrix: BTreeMap::from([
                ((Venue::O, Venue::O), (3., 2.)),
                ((Venue::O, Venue::F), (0., 0.)),
                ((Venue::F, Venue::O), (0., 0.)),
                ((Venue::F, Venue::F), (2., 3.)),
            ]),
        }
    }
}

impl<E> Game for Bimatrix<E>
where
    E: Edge,
{
    type E = E;
    fn seats(&self) -> usize {
        2
    }
    fn choices(&self, _: Seat) -> Vec<Self::E> {
        self.actions.clone()
    }
    fn is_terminal(&self, history: &History<Self::E>) -> bool {
        history.len() >= 2
    }
    fn payoff(&self, history: &History<Self::E>) -> Payoff {
        self.settle(history)
            .map(|(u1, u2)| vec![u1, u2])
            .unwrap_or_else(|_| vec![0.; 2])
    }
    fn info(&self, history: &History<Self::E>) -> Info<Self::E> {
        Info::from((Seat::from(history.len() % 2), History::default()))
    }
}
