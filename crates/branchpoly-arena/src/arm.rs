//! The arm record.

use branchpoly_core::{ArmId, ArmRef, End};

/// A chain segment between two topological events.
///
/// Each end carries two neighbour slots (`left[0..2]`, `right[0..2]`).
/// Both slots empty means a free chain end; both occupied means the end
/// sits on a three-way branch point. Exactly one occupied slot is a
/// pass-through junction that cleanup removes.
///
/// `up`/`down` link every arm of a molecule into one closed ring used for
/// enumeration. They say nothing about branch topology.
#[derive(Clone, Debug, PartialEq)]
pub struct Arm {
    /// Contour length in monomer units.
    pub length: f64,
    /// Birth coordinate of the primary chain this arm belongs to
    /// (conversion for a batch reactor, age for a CSTR).
    pub conversion: f64,
    /// Previous arm on the ring.
    pub up: ArmId,
    /// Next arm on the ring.
    pub down: ArmId,
    /// Neighbour slots at the left end.
    pub left: [ArmRef; 2],
    /// Neighbour slots at the right end.
    pub right: [ArmRef; 2],
    /// Position along the ring, written by renumbering.
    pub sequence_index: Option<u32>,
}

impl Arm {
    /// A fresh, unlinked arm whose ring links point at itself.
    pub fn detached(id: ArmId) -> Self {
        Self {
            length: 0.0,
            conversion: 0.0,
            up: id,
            down: id,
            left: [ArmRef::None; 2],
            right: [ArmRef::None; 2],
            sequence_index: None,
        }
    }

    /// Neighbour slots at `end`.
    #[inline]
    pub fn slots(&self, end: End) -> &[ArmRef; 2] {
        match end {
            End::Left => &self.left,
            End::Right => &self.right,
        }
    }

    /// Mutable neighbour slots at `end`.
    #[inline]
    pub fn slots_mut(&mut self, end: End) -> &mut [ArmRef; 2] {
        match end {
            End::Left => &mut self.left,
            End::Right => &mut self.right,
        }
    }

    /// Number of occupied slots at `end` (0, 1 or 2).
    #[inline]
    pub fn degree_at(&self, end: End) -> usize {
        self.slots(end).iter().filter(|r| r.is_some()).count()
    }

    /// Whether `end` is a free chain end.
    #[inline]
    pub fn is_free(&self, end: End) -> bool {
        self.degree_at(end) == 0
    }

    /// Whether `end` sits on a three-way branch point.
    #[inline]
    pub fn is_branched(&self, end: End) -> bool {
        self.degree_at(end) == 2
    }

    /// The single neighbour at a pass-through end, if `end` is one.
    pub fn pass_through(&self, end: End) -> Option<ArmRef> {
        match *self.slots(end) {
            [r, ArmRef::None] | [ArmRef::None, r] if r.is_some() => Some(r),
            _ => None,
        }
    }
}
