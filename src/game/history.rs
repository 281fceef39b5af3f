use super::*;

/// The ordered moves played so far.
///
/// Seats act round-robin, so the length of the history alone determines
/// who moves next. Histories double as node identities in solver trees.
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct History<E>(Vec<(Seat, E)>);

impl<E> Default for History<E> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<E> History<E>
where
    E: Edge,
{
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn push(&mut self, seat: Seat, edge: E) {
        self.0.push((seat, edge));
    }
    /// A copy of this history extended by one move.
    pub fn with(&self, seat: Seat, edge: E) -> Self {
        let mut next = self.clone();
        next.push(seat, edge);
        next
    }
    pub fn moves(&self) -> &[(Seat, E)] {
        &self.0
    }
    pub fn last(&self) -> Option<&(Seat, E)> {
        self.0.last()
    }
    /// The last `n` moves, or fewer if the history is shorter.
    pub fn tail(&self, n: usize) -> &[(Seat, E)] {
        &self.0[self.0.len().saturating_sub(n)..]
    }
    /// Whether anybody has already played this edge.
    pub fn contains(&self, edge: &E) -> bool {
        self.0.iter().any(|(_, e)| e == edge)
    }
}

impl<E> From<Vec<(Seat, E)>> for History<E> {
    fn from(moves: Vec<(Seat, E)>) -> Self {
        Self(moves)
    }
}

impl<E> std::fmt::Display for History<E>
where
    E: Edge,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let moves = self
            .0
            .iter()
            .map(|(seat, edge)| format!("({}, {})", seat.index() + 1, edge))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "[{}]", moves)
    }
}
