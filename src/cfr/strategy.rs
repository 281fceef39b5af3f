use crate::*;
use std::collections::BTreeMap;

/// A frozen average strategy: one policy per information set.
///
/// Unlisted information sets are played uniformly, so the empty strategy
/// is the uniform profile.
#[derive(Debug, Clone, PartialEq)]
pub struct Strategy<E>(BTreeMap<Info<E>, Policy<E>>);

impl<E> Default for Strategy<E> {
    fn default() -> Self {
        Self(BTreeMap::new())
    }
}

impl<E> Strategy<E>
where
    E: Edge,
{
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn get(&self, info: &Info<E>) -> Option<&Policy<E>> {
        self.0.get(info)
    }
    /// The stored policy, or uniform over `choices` when unseen.
    pub fn policy(&self, info: &Info<E>, choices: &[E]) -> Policy<E> {
        self.0.get(info).cloned().unwrap_or_else(|| uniform(choices))
    }
    /// Probability of one action at one information set.
    pub fn probability(&self, info: &Info<E>, choices: &[E], edge: &E) -> Probability {
        self.policy(info, choices)
            .iter()
            .find(|(e, _)| e == edge)
            .map(|(_, p)| *p)
            .unwrap_or(0.)
    }
    pub fn iter(&self) -> impl Iterator<Item = (&Info<E>, &Policy<E>)> {
        self.0.iter()
    }
}

impl<E> From<BTreeMap<Info<E>, Policy<E>>> for Strategy<E> {
    fn from(policies: BTreeMap<Info<E>, Policy<E>>) -> Self {
        Self(policies)
    }
}

impl<E> std::fmt::Display for Strategy<E>
where
    E: Edge,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (info, policy) in self.0.iter() {
            let policy = policy
                .iter()
                .map(|(e, p)| format!("{} {:.2}", e, p))
                .collect::<Vec<_>>()
                .join("  ");
            writeln!(f, "{:<32} {}", info.to_string(), policy)?;
        }
        Ok(())
    }
}
