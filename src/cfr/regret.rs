//! Regret accumulation schedules.
use crate::*;

/// Trait for regret update strategies in CFR variants.
pub trait RegretSchedule {
    /// Updates accumulated regret with this epoch's instantaneous regret.
    fn gain(accumulated: Utility, immediate: Utility, epoch: usize) -> Utility;
}

/// Vanilla CFR: regrets simply add up.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummedRegret;

impl RegretSchedule for SummedRegret {
    fn gain(accumulated: Utility, immediate: Utility, _: usize) -> Utility {
        accumulated + immediate
    }
}

/// CFR+ regret update strategy.
///
/// Floors regrets at zero after each update, so an action that was bad for
/// a long time can recover as soon as it starts paying off.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlooredRegret;

impl RegretSchedule for FlooredRegret {
    fn gain(accumulated: Utility, immediate: Utility, _: usize) -> Utility {
        (accumulated + immediate).max(0.)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floored_never_negative() {
        assert_eq!(SummedRegret::gain(1., -3., 0), -2.);
        assert_eq!(FlooredRegret::gain(1., -3., 0), 0.);
        assert_eq!(FlooredRegret::gain(1., 2., 0), 3.);
    }
}
