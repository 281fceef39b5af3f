/// An action a seat can take.
///
/// Edges are used as keys in strategy tables, so they must be cheap to copy,
/// totally ordered for deterministic iteration, and serializable so trained
/// profiles can be written to disk.
pub trait Edge:
    Copy
    + Clone
    + PartialEq
    + Eq
    + PartialOrd
    + Ord
    + Send
    + Sync
    + std::hash::Hash
    + std::fmt::Debug
    + std::fmt::Display
    + serde::Serialize
    + serde::de::DeserializeOwned
{
}
