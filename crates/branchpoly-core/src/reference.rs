//! Tagged arm references.
//!
//! Arms meet at junctions. Each arm has two ends and each end has two
//! neighbour slots. A slot holds an [`ArmRef`] naming the neighbour *and*
//! which of the neighbour's ends touches the shared junction:
//!
//! ```text
//!            Forward(b)                 Backward(c)
//!   a ──────▶ [L] b ──────▶ [R]     [L] c ──────▶ [R] ◀── a
//! ```
//!
//! - `Forward(b)`: `b`'s **left** end sits on the junction, so walking on
//!   from the junction traverses `b` left→right.
//! - `Backward(c)`: `c`'s **right** end sits on the junction, so walking on
//!   traverses `c` right→left.
//! - `None`: the slot is empty. When both slots of an end are empty the end
//!   is a free chain end.

use crate::id::ArmId;

/// One of the two ends of an arm.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum End {
    /// The end an arm started growing from.
    Left,
    /// The end an arm grew towards.
    Right,
}

impl End {
    /// The other end of the same arm.
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// A directed reference to a neighbouring arm, or an empty slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ArmRef {
    /// Empty slot.
    #[default]
    None,
    /// The neighbour's left end touches the junction.
    Forward(ArmId),
    /// The neighbour's right end touches the junction.
    Backward(ArmId),
}

impl ArmRef {
    /// Reference to `arm` entered through `end`.
    #[inline]
    pub fn entering(arm: ArmId, end: End) -> Self {
        match end {
            End::Left => Self::Forward(arm),
            End::Right => Self::Backward(arm),
        }
    }

    /// The referenced arm, if any.
    #[inline]
    pub fn arm(self) -> Option<ArmId> {
        match self {
            Self::None => None,
            Self::Forward(id) | Self::Backward(id) => Some(id),
        }
    }

    /// The end of the referenced arm that touches the junction.
    #[inline]
    pub fn near_end(self) -> Option<End> {
        match self {
            Self::None => None,
            Self::Forward(_) => Some(End::Left),
            Self::Backward(_) => Some(End::Right),
        }
    }

    /// The end of the referenced arm away from the junction, i.e. where a
    /// walk through this reference arrives.
    #[inline]
    pub fn far_end(self) -> Option<End> {
        self.near_end().map(End::opposite)
    }

    /// `(arm, near_end)` for an occupied slot.
    #[inline]
    pub fn target(self) -> Option<(ArmId, End)> {
        match self {
            Self::None => None,
            Self::Forward(id) => Some((id, End::Left)),
            Self::Backward(id) => Some((id, End::Right)),
        }
    }

    /// Whether the slot is empty.
    #[inline]
    pub fn is_none(self) -> bool {
        matches!(self, Self::None)
    }

    /// Whether the slot is occupied.
    #[inline]
    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_slot_has_no_target() {
        assert!(ArmRef::None.is_none());
        assert_eq!(ArmRef::None.arm(), None);
        assert_eq!(ArmRef::None.near_end(), None);
        assert_eq!(ArmRef::None.far_end(), None);
    }

    #[test]
    fn forward_enters_left_and_leaves_right() {
        let r = ArmRef::Forward(ArmId(7));
        assert_eq!(r.target(), Some((ArmId(7), End::Left)));
        assert_eq!(r.far_end(), Some(End::Right));
    }

    #[test]
    fn backward_enters_right_and_leaves_left() {
        let r = ArmRef::Backward(ArmId(3));
        assert_eq!(r.target(), Some((ArmId(3), End::Right)));
        assert_eq!(r.far_end(), Some(End::Left));
    }

    #[test]
    fn entering_matches_near_end() {
        for end in [End::Left, End::Right] {
            let r = ArmRef::entering(ArmId(1), end);
            assert_eq!(r.near_end(), Some(end));
        }
    }

    #[test]
    fn default_is_empty() {
        assert_eq!(ArmRef::default(), ArmRef::None);
    }
}
