//! Exact exploitability of a strategy profile by full tree enumeration.
//!
//! Only practical for small games; [`tree_size`] tells callers whether a
//! game is small enough before they commit to an evaluation.
use crate::*;
use rayon::prelude::*;
use std::collections::BTreeMap;

/// Counts histories in the game tree, giving up past `limit`.
pub fn tree_size<G: Game>(game: &G, limit: usize) -> Option<usize> {
    fn count<G: Game>(game: &G, history: &History<G::E>, budget: &mut usize) -> bool {
        if *budget == 0 {
            return false;
        }
        *budget -= 1;
        match game.turn(history) {
            Turn::Terminal => true,
            Turn::Seat(seat) => game
                .choices(seat)
                .into_iter()
                .all(|edge| count(game, &history.with(seat, edge), budget)),
        }
    }
    let mut budget = limit;
    count(game, &History::default(), &mut budget).then(|| limit - budget)
}

/// Expected payoff of every seat when all seats follow `strategy`.
pub fn value<G: Game>(game: &G, strategy: &Strategy<G::E>) -> Payoff {
    expectation(game, strategy, &History::default(), None, &BTreeMap::new())
}

/// Evaluates `history`, letting `hero` follow `fixed` where it has a choice.
fn expectation<G: Game>(
    game: &G,
    strategy: &Strategy<G::E>,
    history: &History<G::E>,
    hero: Option<Seat>,
    fixed: &BTreeMap<Info<G::E>, G::E>,
) -> Payoff {
    let seat = match game.turn(history) {
        Turn::Terminal => return game.payoff(history),
        Turn::Seat(seat) => seat,
    };
    let ref info = game.info(history);
    if hero == Some(seat) {
        if let Some(edge) = fixed.get(info) {
            return expectation(game, strategy, &history.with(seat, *edge), hero, fixed);
        }
    }
    let ref choices = game.choices(seat);
    let mut total = vec![0.; game.seats()];
    for (edge, p) in strategy.policy(info, choices) {
        if p > 0. {
            let child = expectation(game, strategy, &history.with(seat, edge), hero, fixed);
            for (t, c) in total.iter_mut().zip(child) {
                *t += p * c;
            }
        }
    }
    total
}

/// The best pure counter-strategy of one seat against everyone else's strategy.
#[derive(Debug, Clone)]
pub struct BestResponse<E> {
    pub seat: Seat,
    pub value: Utility,
    pub actions: BTreeMap<Info<E>, E>,
}

impl<E> BestResponse<E>
where
    E: Edge,
{
    /// Decides the hero's information sets deepest first. With perfect
    /// recall every deeper choice is already fixed when a shallower
    /// information set weighs its actions by the other seats' reach.
    pub fn solve<G: Game<E = E>>(game: &G, strategy: &Strategy<E>, seat: Seat) -> Self {
        let mut nodes = BTreeMap::<Info<E>, Vec<(History<E>, Probability)>>::new();
        Self::collect(game, strategy, seat, &History::default(), 1., &mut nodes);
        let mut infos = nodes.keys().cloned().collect::<Vec<_>>();
        infos.sort_by_key(|info| {
            std::cmp::Reverse(nodes[info].iter().map(|(h, _)| h.len()).max().unwrap_or(0))
        });
        let mut actions = BTreeMap::new();
        for info in infos {
            let ref members = nodes[&info];
            let best = game
                .choices(seat)
                .into_iter()
                .map(|edge| {
                    let q = members
                        .iter()
                        .map(|(h, reach)| {
                            reach * expectation(game, strategy, &h.with(seat, edge), Some(seat), &actions)[seat.index()]
                        })
                        .sum::<Utility>();
                    (edge, q)
                })
                .fold(None, |best: Option<(E, Utility)>, (edge, q)| match best {
                    Some((_, b)) if b >= q => best,
                    _ => Some((edge, q)),
                });
            if let Some((edge, _)) = best {
                actions.insert(info, edge);
            }
        }
        let value = expectation(game, strategy, &History::default(), Some(seat), &actions)[seat.index()];
        Self { seat, value, actions }
    }

    /// Hero nodes grouped by information set, with the other seats' reach.
    fn collect<G: Game<E = E>>(
        game: &G,
        strategy: &Strategy<E>,
        seat: Seat,
        history: &History<E>,
        reach: Probability,
        nodes: &mut BTreeMap<Info<E>, Vec<(History<E>, Probability)>>,
    ) {
        let actor = match game.turn(history) {
            Turn::Terminal => return,
            Turn::Seat(actor) => actor,
        };
        let ref info = game.info(history);
        let ref choices = game.choices(actor);
        if actor == seat {
            nodes
                .entry(info.clone())
                .or_default()
                .push((history.clone(), reach));
            for edge in choices.iter() {
                Self::collect(game, strategy, seat, &history.with(actor, *edge), reach, nodes);
            }
        } else {
            for (edge, p) in strategy.policy(info, choices) {
                if p > 0. {
                    Self::collect(game, strategy, seat, &history.with(actor, edge), reach * p, nodes);
                }
            }
        }
    }
}

/// Sum over seats of what a best response gains against `strategy`.
pub fn nash_conv<G: Game>(game: &G, strategy: &Strategy<G::E>) -> Utility {
    let ref baseline = value(game, strategy);
    Seat::all(game.seats())
        .collect::<Vec<_>>()
        .into_par_iter()
        .map(|seat| BestResponse::solve(game, strategy, seat).value - baseline[seat.index()])
        .map(|gain| gain.max(0.))
        .sum()
}

/// NashConv averaged over seats.
pub fn exploitability<G: Game>(game: &G, strategy: &Strategy<G::E>) -> Utility {
    nash_conv(game, strategy) / game.seats() as Utility
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_dilemma() {
        let ref game = Bimatrix::prisoners_dilemma();
        let ref uniform = Strategy::default();
        assert_eq!(value(game, uniform), vec![2.25, 2.25]);
        let response = BestResponse::solve(game, uniform, Seat::from(1));
        assert_eq!(response.value, 3.);
        assert_eq!(response.actions.values().copied().collect::<Vec<_>>(), vec![Move::D]);
        assert!((nash_conv(game, uniform) - 1.5).abs() < 1e-6);
        assert!((exploitability(game, uniform) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn trained_dilemma_is_unexploitable() {
        let mut cfr = VanillaCfr::new(Bimatrix::prisoners_dilemma(), 0);
        cfr.train(CFR_ITERATIONS / 10);
        assert!(nash_conv(cfr.game(), &cfr.strategy()) < 0.05);
    }

    #[test]
    fn trained_meeting_is_less_exploitable() {
        let game = Scenario::classic().build().unwrap();
        let before = nash_conv(&game, &Strategy::default());
        let mut cfr = VanillaCfr::new(game, 0);
        cfr.train(CFR_ITERATIONS / 5);
        let after = nash_conv(cfr.game(), &cfr.strategy());
        assert!(after < before);
    }

    #[test]
    fn tree_sizes() {
        assert_eq!(tree_size(&Bimatrix::prisoners_dilemma(), 100), Some(7));
        assert_eq!(tree_size(&Bimatrix::prisoners_dilemma(), 5), None);
    }
}
