//! Solver suggestions injected into each turn's prompt.
//!
//! - [`Silent`]: no suggestion
//! - [`Dominance`]: the seat's undominated strategies
//! - [`Sampler`]: one action drawn from a trained average strategy
//! - [`Plan`]: the seat's move along a searched line of play
use crate::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Turns solver output into per-turn suggestions.
pub trait Advisor<G>: Send
where
    G: Game,
{
    /// Suggested actions for `seat` after `history`, best first. May be empty.
    fn advise(&mut self, game: &G, seat: Seat, history: &History<G::E>) -> Vec<G::E>;
}

/// Offers no guidance.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl<G> Advisor<G> for Silent
where
    G: Game,
{
    fn advise(&mut self, _: &G, _: Seat, _: &History<G::E>) -> Vec<G::E> {
        Vec::new()
    }
}

impl<E> Advisor<Bimatrix<E>> for Dominance<E>
where
    E: Edge,
{
    fn advise(&mut self, _: &Bimatrix<E>, seat: Seat, _: &History<E>) -> Vec<E> {
        self.remaining(seat).to_vec()
    }
}

impl<G> Advisor<G> for Plan<G::E>
where
    G: Game,
{
    fn advise(&mut self, _: &G, seat: Seat, _: &History<G::E>) -> Vec<G::E> {
        self.advice(seat).into_iter().collect()
    }
}

/// Samples a suggestion from an average strategy, uniform where untrained.
pub struct Sampler<E> {
    strategy: Strategy<E>,
    rng: SmallRng,
}

impl<E> Sampler<E>
where
    E: Edge,
{
    pub fn new(strategy: Strategy<E>, seed: u64) -> Self {
        Self {
            strategy,
            rng: SmallRng::seed_from_u64(seed),
        }
    }
    pub fn strategy(&self) -> &Strategy<E> {
        &self.strategy
    }
}

impl<G> Advisor<G> for Sampler<G::E>
where
    G: Game,
{
    fn advise(&mut self, game: &G, seat: Seat, history: &History<G::E>) -> Vec<G::E> {
        let ref info = game.info(history);
        let ref policy = self.strategy.policy(info, &game.choices(seat));
        sample(policy, &mut self.rng).into_iter().collect()
    }
}

impl<G, A> Advisor<G> for Box<A>
where
    G: Game,
    A: Advisor<G> + ?Sized,
{
    fn advise(&mut self, game: &G, seat: Seat, history: &History<G::E>) -> Vec<G::E> {
        self.as_mut().advise(game, seat, history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn dominance_suggests_survivors() {
        let ref game = Bimatrix::prisoners_dilemma();
        let mut advisor = Dominance::solve(game);
        assert_eq!(advisor.advise(game, Seat::from(0), &History::default()), vec![Move::D]);
    }

    #[test]
    fn sampler_follows_the_strategy() {
        let ref game = Bimatrix::prisoners_dilemma();
        let info = Info::from((Seat::from(0), History::default()));
        let strategy = Strategy::from(BTreeMap::from([(info, vec![(Move::C, 0.), (Move::D, 1.)])]));
        let mut advisor = Sampler::new(strategy, 1);
        for _ in 0..20 {
            assert_eq!(advisor.advise(game, Seat::from(0), &History::default()), vec![Move::D]);
        }
        let unseen = advisor.advise(game, Seat::from(1), &History::from(vec![(Seat::from(0), Move::D)]));
        assert_eq!(unseen.len(), 1);
    }

    #[test]
    fn silence_and_plans() {
        let ref game = Scenario::classic().build().unwrap();
        assert!(Advisor::<Meeting>::advise(&mut Silent, game, Seat::from(0), &History::default()).is_empty());
        let mut plan = Plan {
            path: History::from(vec![(Seat::from(0), Slot::from(2)), (Seat::from(1), Slot::from(2))]),
            payoff: vec![3., 2.],
        };
        assert_eq!(plan.advise(game, Seat::from(1), &History::default()), vec![Slot::from(2)]);
    }
}
