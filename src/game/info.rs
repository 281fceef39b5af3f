use super::*;

/// Information set key: the acting seat and the part of the history it can see.
///
/// Sequential games expose the full history. Simultaneous games expose
/// nothing, so every node of a seat collapses into one information set.
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct Info<E> {
    seat: Seat,
    seen: History<E>,
}

impl<E> Info<E>
where
    E: Edge,
{
    pub fn seat(&self) -> Seat {
        self.seat
    }
}

impl<E> From<(Seat, History<E>)> for Info<E> {
    fn from((seat, seen): (Seat, History<E>)) -> Self {
        Self { seat, seen }
    }
}

impl<E> std::fmt::Display for Info<E>
where
    E: Edge,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.seat, self.seen)
    }
}
