//! Action distributions and the schedules that weight them into averages.
use crate::*;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;

/// A distribution over actions.
pub type Policy<E> = Vec<(E, Probability)>;

/// Equal weight on every choice.
pub fn uniform<E: Edge>(choices: &[E]) -> Policy<E> {
    let n = choices.len().max(1) as Probability;
    choices.iter().map(|e| (*e, 1. / n)).collect()
}

/// Positive parts normalized to one, or uniform when nothing is positive.
pub fn normalize<E: Edge>(weights: Vec<(E, Utility)>) -> Policy<E> {
    let total = weights.iter().map(|(_, w)| w.max(0.)).sum::<Utility>();
    if total > 0. {
        weights.into_iter().map(|(e, w)| (e, w.max(0.) / total)).collect()
    } else {
        uniform(&weights.into_iter().map(|(e, _)| e).collect::<Vec<_>>())
    }
}

/// Draws one action. `None` only for an empty policy.
pub fn sample<E: Edge>(policy: &Policy<E>, rng: &mut impl rand::Rng) -> Option<E> {
    let weights = policy.iter().map(|(_, p)| p.max(Probability::MIN_POSITIVE));
    WeightedIndex::new(weights)
        .ok()
        .map(|dist| dist.sample(rng))
        .map(|i| policy[i].0)
}

/// The most likely action, earliest on ties.
pub fn greedy<E: Edge>(policy: &Policy<E>) -> Option<E> {
    policy
        .iter()
        .fold(None, |best: Option<&(E, Probability)>, next| match best {
            Some(b) if b.1 >= next.1 => Some(b),
            _ => Some(next),
        })
        .map(|(e, _)| *e)
}

/// Trait for strategy weighting schemes in CFR.
pub trait PolicySchedule {
    /// Updates accumulated strategy weight with this epoch's contribution.
    fn learn(accumulated: Probability, immediate: Probability, epoch: usize) -> Probability;
}

/// Every epoch counts the same.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstantWeight;

impl PolicySchedule for ConstantWeight {
    fn learn(accumulated: Probability, immediate: Probability, _: usize) -> Probability {
        accumulated + immediate
    }
}

/// Epoch `t` counts `t + 1` times, discounting early play.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearWeight;

impl PolicySchedule for LinearWeight {
    fn learn(accumulated: Probability, immediate: Probability, epoch: usize) -> Probability {
        accumulated + immediate * (epoch + 1) as Probability
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn normalize_drops_negative_mass() {
        let policy = normalize(vec![(Move::C, -2.), (Move::D, 3.)]);
        assert_eq!(policy, vec![(Move::C, 0.), (Move::D, 1.)]);
        let policy = normalize(vec![(Move::C, -2.), (Move::D, 0.)]);
        assert_eq!(policy, vec![(Move::C, 0.5), (Move::D, 0.5)]);
    }

    #[test]
    fn sampling_respects_support() {
        let ref mut rng = rand::rngs::SmallRng::seed_from_u64(7);
        let policy = vec![(Move::C, 0.), (Move::D, 1.)];
        assert!((0..100).all(|_| sample(&policy, rng) == Some(Move::D)));
        assert_eq!(sample(&Policy::<Move>::new(), rng), None);
    }

    #[test]
    fn greedy_prefers_earliest_tie() {
        assert_eq!(greedy(&vec![(Move::C, 0.5), (Move::D, 0.5)]), Some(Move::C));
        assert_eq!(greedy(&vec![(Move::C, 0.2), (Move::D, 0.8)]), Some(Move::D));
    }

    #[test]
    fn linear_weight_grows() {
        assert_eq!(LinearWeight::learn(1., 0.5, 3), 3.);
        assert_eq!(ConstantWeight::learn(1., 0.5, 3), 1.5);
    }
}
