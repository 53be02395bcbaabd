//! Strongly-typed identifiers.

use std::fmt;

/// Index of an arm inside an `ArmArena`.
///
/// Arm ids are only meaningful for the arena that handed them out and only
/// until that arena is reset for the next molecule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArmId(pub u32);

impl ArmId {
    /// The id as a slice index.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ArmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ArmId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}
