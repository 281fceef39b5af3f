/// Zero-based player index.
///
/// Displayed one-based, so `Seat(0)` reads as "Player 1" in prompts and logs.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct Seat(usize);

impl Seat {
    pub fn index(&self) -> usize {
        self.0
    }
    /// The seat acting after this one in round-robin order.
    pub fn next(&self, seats: usize) -> Self {
        Self((self.0 + 1) % seats)
    }
    /// All seats of an n-player game in acting order.
    pub fn all(seats: usize) -> impl Iterator<Item = Self> {
        (0..seats).map(Self)
    }
}

impl From<usize> for Seat {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0 + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_one_based() {
        assert_eq!(Seat::from(0).to_string(), "Player 1");
        assert_eq!(Seat::from(2).to_string(), "Player 3");
    }

    #[test]
    fn rotates() {
        assert_eq!(Seat::from(2).next(3), Seat::from(0));
        assert_eq!(Seat::all(3).collect::<Vec<_>>().len(), 3);
    }
}
