use crate::*;

/// Index of a slot in a [`Calendar`].
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct Slot(usize);

impl Slot {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl Edge for Slot {}

impl From<usize> for Slot {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
