//! Counterfactual regret minimization over any [`crate::Game`].
//!
//! # Module Structure
//!
//! - `policy`: policy vectors and strategy weighting schemes
//! - `regret`: regret update schemes
//! - `sampling`: which branches a traversal explores
//! - `profile`: accumulated regrets and weights per information set
//! - `strategy`: the average strategy extracted from a profile
//! - `solver`: the training loop
//!
//! The solver is parameterized by three zero-sized schedule types, so
//! vanilla CFR, external-sampling MCCFR, rollout MCCFR, and CFR+ share one
//! traversal.

mod policy;
mod profile;
mod regret;
mod sampling;
mod solver;
mod strategy;

pub use policy::*;
pub use profile::*;
pub use regret::*;
pub use sampling::*;
pub use solver::*;
pub use strategy::*;
