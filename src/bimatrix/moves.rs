use crate::*;

/// Prisoner's Dilemma actions.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum Move {
    /// Cooperate.
    C,
    /// Defect.
    D,
}

impl Edge for Move {}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::C => write!(f, "C"),
            Self::D => write!(f, "D"),
        }
    }
}

impl std::str::FromStr for Move {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "C" | "COOPERATE" => Ok(Self::C),
            "D" | "DEFECT" => Ok(Self::D),
            other => Err(anyhow::anyhow!("not a dilemma move: {}", other)),
        }
    }
}

/// Battle of the Sexes actions.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum Venue {
    /// Opera, preferred by the first seat.
    O,
    /// Football, preferred by the second seat.
    F,
}

impl Edge for Venue {}

impl std::fmt::Display for Venue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::O => write!(f, "O"),
            Self::F => write!(f, "F"),
        }
    }
}

impl std::str::FromStr for Venue {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "O" | "OPERA" => Ok(Self::O),
            "F" | "FOOTBALL" => Ok(Self::F),
            other => Err(anyhow::anyhow!("not a venue: {}", other)),
        }
    }
}
