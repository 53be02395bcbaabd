//! Error types for growth and topology operations.
//!
//! Two classes of failure exist once parameters have been validated:
//!
//! - [`GrowthError::ArenaExhausted`] is an expected outcome. The molecule
//!   ran out of material; the caller discards it and moves on.
//! - [`TopologyError`] means the arm graph broke one of its structural
//!   invariants. That is a defect in the growth code and is never
//!   corrected silently.

use thiserror::Error;

use crate::id::ArmId;
use crate::reference::End;
use crate::state::MoleculeState;

/// Structural invariant violations in an arm graph.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum TopologyError {
    /// `arm` references `neighbour` at `end`, but the neighbour does not
    /// reference `arm` back from the touching end.
    #[error("asymmetric reference: arm {arm} ({end:?} end) -> arm {neighbour} has no matching back-reference")]
    AsymmetricReference {
        /// Arm holding the one-sided reference.
        arm: ArmId,
        /// End of `arm` holding it.
        end: End,
        /// The referenced arm.
        neighbour: ArmId,
    },
    /// A reference points outside the allocated part of the arena.
    #[error("dangling reference: arm {arm} -> arm {target} beyond {allocated} allocated arms")]
    DanglingReference {
        /// Arm holding the reference.
        arm: ArmId,
        /// Out-of-range target.
        target: ArmId,
        /// Number of arms allocated at the time.
        allocated: usize,
    },
    /// The up/down ring does not return to its starting arm.
    #[error("arm ring starting at {start} does not close within {limit} steps")]
    RingNotClosed {
        /// Ring entry point.
        start: ArmId,
        /// Step budget that was exceeded.
        limit: usize,
    },
    /// `up` and `down` links of neighbouring ring members disagree.
    #[error("ring links broken at arm {arm}")]
    RingLinkMismatch {
        /// Arm whose successor does not point back.
        arm: ArmId,
    },
    /// The ring and the branch tree do not cover the same arms.
    #[error("ring visits {ring} arms but the branch tree reaches {tree}")]
    RingArmCountMismatch {
        /// Arms on the ring.
        ring: usize,
        /// Arms reachable through junction links.
        tree: usize,
    },
    /// A degree-2 junction survived cleanup.
    #[error("degree-2 junction at arm {arm} ({end:?} end) in a cleaned molecule")]
    UncleanedJunction {
        /// Arm carrying the pass-through end.
        arm: ArmId,
        /// The pass-through end.
        end: End,
    },
    /// The junction graph contains a cycle.
    #[error("arm graph is not a tree: {arms} arms but {nodes} junctions and free ends")]
    NotATree {
        /// Arms on the ring.
        arms: usize,
        /// Junctions plus free chain ends.
        nodes: usize,
    },
    /// A tree walk came back to an arm it had already visited.
    #[error("cycle detected at arm {arm}")]
    CycleDetected {
        /// Arm reached twice.
        arm: ArmId,
    },
    /// Ring-traversal length and tree-recursion length disagree.
    #[error("total length mismatch: ring {ring}, tree {tree}")]
    LengthMismatch {
        /// Length summed along the ring.
        ring: f64,
        /// Length accumulated by the moment recursion.
        tree: f64,
    },
    /// Operation called on a molecule in the wrong lifecycle state.
    #[error("{operation} requires a {expected} molecule, found {found}")]
    InvalidState {
        /// Name of the rejected operation.
        operation: &'static str,
        /// State the operation requires.
        expected: MoleculeState,
        /// State the molecule was in.
        found: MoleculeState,
    },
}

/// Errors from growing one molecule.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum GrowthError {
    /// The arena ran out of arms before growth finished. Recoverable at the
    /// batch level: discard the molecule.
    #[error("arena exhausted after {capacity} arms")]
    ArenaExhausted {
        /// Arena capacity at the time of exhaustion.
        capacity: usize,
    },
    /// Growth produced an inconsistent graph.
    #[error(transparent)]
    Topology(#[from] TopologyError),
}

impl GrowthError {
    /// Whether this error only means "ran out of material".
    pub fn is_exhaustion(&self) -> bool {
        matches!(self, Self::ArenaExhausted { .. })
    }
}
