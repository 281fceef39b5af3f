//! Prompt rendering and reply parsing for language-model players.
//!
//! A [`Dialogue`] game knows how to describe a decision point to a chat
//! model in plain text, and how to read the model's answer back into one of
//! its own actions. The marker constants below are shared between the
//! renderers, the parsers, and the offline [`crate::Mimic`] oracle.
use crate::*;

/// Prefix of the solver suggestion line in proposal prompts.
pub const GUIDANCE: &str = "Solver guidance: propose ";
/// Prefix of the suggested action line in letter prompts.
pub const ACTION: &str = "Action: Propose ";
/// Required prefix of a proposal reply.
pub const PROPOSAL: &str = "Proposed-Date:";
/// Required prefix of a matrix-game reply.
pub const DECISION: &str = "Decision:";
/// Separator between a seat label and its strategies in matrix-game prompts.
pub const STRATEGIES: &str = "available strategies: ";
/// Prefix of the line naming the prompted seat in public prompts.
pub const IDENTITY: &str = "You are ";

/// The two halves of a chat request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

impl std::fmt::Display for Prompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "[system] {}", self.system)?;
        write!(f, "{}", self.user)
    }
}

/// Reasons a model reply could not be read as an action.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReplyError {
    #[error("reply is empty")]
    Empty,
    #[error("first line is not a decision: {0:?}")]
    MissingDecision(String),
    #[error("unknown decision: {0:?}")]
    UnknownDecision(String),
    #[error("no line starts with \"Proposed-Date:\"")]
    MissingProposal,
    #[error("not a calendar slot: {0:?}")]
    UnknownSlot(String),
    #[error("reply names no calendar slot")]
    NoSlotMentioned,
}

/// A game that can be played by a chat model.
pub trait Dialogue: Game {
    /// Describes the decision facing `seat` after `history`.
    /// `advice` holds the solver's suggestions, possibly none.
    fn prompt(&self, seat: Seat, history: &History<Self::E>, advice: &[Self::E]) -> Prompt;
    /// Reads a reply back into an action.
    fn parse(&self, reply: &str) -> Result<Self::E, ReplyError>;
}

/// The first non-blank line of a reply.
pub fn headline(reply: &str) -> Result<&str, ReplyError> {
    reply
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .ok_or(ReplyError::Empty)
}

/// The value after a case-insensitive `prefix` on `line`, trimmed.
pub fn after<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    line.get(..prefix.len())
        .filter(|head| head.eq_ignore_ascii_case(prefix))
        .map(|_| line[prefix.len()..].trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headline_skips_blank_lines() {
        assert_eq!(headline("\n  \n Decision: C \nwhy").unwrap(), "Decision: C");
        assert_eq!(headline("   \n"), Err(ReplyError::Empty));
    }

    #[test]
    fn prefixes_ignore_case() {
        assert_eq!(after("decision:  d", DECISION), Some("d"));
        assert_eq!(after("PROPOSED-DATE: Mon", PROPOSAL), Some("Mon"));
        assert_eq!(after("Dec", DECISION), None);
        assert_eq!(after("Choice: C", DECISION), None);
    }
}
