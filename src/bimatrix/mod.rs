//! One-shot two-player matrix games.
//!
//! Both seats choose without observing each other, which is modeled as a
//! sequential game whose second seat cannot see the first move.
//!
//! - [`Move`]: Prisoner's Dilemma actions (cooperate / defect)
//! - [`Venue`]: Battle of the Sexes actions (opera / football)
//! - [`Bimatrix`]: payoff matrix game over any action type

mod dialogue;
mod game;
mod moves;

pub use game::*;
pub use moves::*;
