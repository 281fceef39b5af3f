//! Iterated elimination of strictly dominated strategies.
use crate::*;

/// What survives iterated strict dominance in a two-seat matrix game.
#[derive(Debug, Clone, PartialEq)]
pub struct Dominance<E> {
    remaining: [Vec<E>; 2],
    eliminated: Vec<(Seat, E)>,
}

impl<E> Dominance<E>
where
    E: Edge,
{
    /// Alternates passes over both seats until a full pass removes nothing.
    pub fn solve(game: &Bimatrix<E>) -> Self {
        let mut remaining = [game.actions().to_vec(), game.actions().to_vec()];
        let mut eliminated = Vec::new();
        loop {
            let before = eliminated.len();
            for index in 0..2 {
                let seat = Seat::from(index);
                let ref opponents = remaining[1 - index].clone();
                let ref mine = remaining[index];
                let dominated = mine
                    .iter()
                    .filter(|s| mine.iter().any(|t| t != *s && Self::dominates(game, seat, *t, **s, opponents)))
                    .copied()
                    .collect::<Vec<_>>();
                for s in dominated {
                    log::debug!("{} eliminates {}", seat, s);
                    remaining[index].retain(|e| *e != s);
                    eliminated.push((seat, s));
                }
            }
            if eliminated.len() == before {
                break;
            }
        }
        Self { remaining, eliminated }
    }

    /// Whether `t` pays `seat` strictly more than `s` against every opponent choice.
    fn dominates(game: &Bimatrix<E>, seat: Seat, t: E, s: E, opponents: &[E]) -> bool {
        let utility = |mine: E, theirs: E| match seat.index() {
            0 => game.utility(seat, mine, theirs),
            _ => game.utility(seat, theirs, mine),
        };
        !opponents.is_empty() && opponents.iter().all(|o| utility(t, *o) > utility(s, *o))
    }

    pub fn remaining(&self, seat: Seat) -> &[E] {
        &self.remaining[seat.index()]
    }
    /// Removed strategies in the order they were removed.
    pub fn eliminated(&self) -> &[(Seat, E)] {
        &self.eliminated
    }
}
