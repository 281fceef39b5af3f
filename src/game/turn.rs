use super::*;

/// Whose move it is, or whether the game is over.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Turn {
    Seat(Seat),
    Terminal,
}

impl std::fmt::Display for Turn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Seat(seat) => write!(f, "{}", seat),
            Self::Terminal => write!(f, "Terminal"),
        }
    }
}
