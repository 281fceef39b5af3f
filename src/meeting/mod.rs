//! The Meeting Game: seats take turns proposing a calendar slot until the
//! last round of proposals agrees or the proposal budget runs out.
//!
//! - [`Slot`] / [`Calendar`]: slot indices and their human-readable labels
//! - [`Meeting`]: the game rules, generic over seat count
//! - [`Scenario`]: JSON-backed description of a meeting, plus built-ins
//! - [`Protocol`]: which prompt format the chat model sees

mod calendar;
mod dialogue;
mod game;
mod scenario;
mod slot;

pub use calendar::*;
pub use game::*;
pub use scenario::*;
pub use slot::*;
