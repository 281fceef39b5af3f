//! Game-agnostic primitives shared by every solver.
//!
//! # Module Structure
//!
//! - [`Edge`]: an action a seat can take
//! - [`Seat`] / [`Turn`]: who acts next
//! - [`History`]: the ordered moves so far
//! - [`Info`]: what the acting seat knows (information set key)
//! - [`Game`]: rules: legal moves, termination, payoffs

mod edge;
mod history;
mod info;
mod rules;
mod seat;
mod turn;

pub use edge::*;
pub use history::*;
pub use info::*;
pub use rules::*;
pub use seat::*;
pub use turn::*;
