//! Sampling schemes deciding which branches a traversal explores.
use crate::*;

/// Decides which seat a traversal updates and how far it looks.
///
/// Every action at the traverser's nodes gets a value estimate. Every other
/// seat is either expanded too (vanilla) or sampled once from its current
/// policy.
pub trait SamplingScheme {
    /// The single seat updated this epoch, or `None` to update every seat.
    fn walker(epoch: usize, seats: usize) -> Option<Seat>;
    /// Whether the traverser recurses into one sampled action only and
    /// values its other actions by a single sampled playout each.
    fn rollouts() -> bool {
        false
    }
}

/// Full-width traversal updating every seat.
#[derive(Debug, Clone, Copy, Default)]
pub struct VanillaSampling;

impl SamplingScheme for VanillaSampling {
    fn walker(_: usize, _: usize) -> Option<Seat> {
        None
    }
}

/// External sampling strategy.
///
/// - Fully explores all actions at the traverser's decision nodes
/// - Samples a single action at other seats' nodes according to the strategy
/// - Traversers alternate round-robin across epochs
#[derive(Debug, Clone, Copy, Default)]
pub struct ExternalSampling;

impl SamplingScheme for ExternalSampling {
    fn walker(epoch: usize, seats: usize) -> Option<Seat> {
        Some(Seat::from(epoch % seats.max(1)))
    }
}

/// External sampling with one recursive branch per traverser node.
///
/// - Samples the traverser's continuation from its current policy
/// - Values the remaining actions by one sampled playout each
/// - Visits one line of play per epoch, so memory grows by at most
///   one information set per traverser decision
///
/// Used for games too large to expand every traverser action.
#[derive(Debug, Clone, Copy, Default)]
pub struct RolloutSampling;

impl SamplingScheme for RolloutSampling {
    fn walker(epoch: usize, seats: usize) -> Option<Seat> {
        ExternalSampling::walker(epoch, seats)
    }
    fn rollouts() -> bool {
        true
    }
}
