//! Contour length, radius of gyration and g-factor.
//!
//! Arms are treated as Gaussian sub-chains, so the mean-square distance
//! between two monomers equals their contour separation (in units of the
//! statistical segment). For a directed subtree entered at a point `P`
//! we carry three numbers:
//!
//! - `length` `L`: total contour length;
//! - `first` `S = ∫ d(x, P) dx`: first moment about the entry point;
//! - `pair` `D = ½ ∫∫ d(x, y) dx dy`: pair moment over the subtree.
//!
//! Prepending an arm of length `a` to a child set `(Lc, Sc, Dc)` attached
//! at its far end gives
//!
//! ```text
//! L = a + Lc
//! S = a²/2 + Sc + a·Lc
//! D = a³/6 + Dc + a·Sc + Lc·a²/2
//! ```
//!
//! and two subtrees hanging from the same point merge as
//! `D = D1 + D2 + S1·L2 + S2·L1`. At the root, `J = 2D/L²` (twice the
//! mean-square radius of gyration) and `g = 3J/L`, which is exactly 1
//! for a linear chain.

use branchpoly_arena::ArmArena;
use branchpoly_core::{ArmRef, MoleculeState, TopologyError};
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::polymer::BranchedPolymer;
use crate::validate::validate_topology;

/// Relative tolerance between ring and tree length sums.
const LENGTH_TOLERANCE: f64 = 1e-9;

/// Moment triple of a directed subtree.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Moments {
    /// Total contour length.
    pub length: f64,
    /// First moment of contour distance from the entry point.
    pub first: f64,
    /// Pair moment, half the double integral of contour distance.
    pub pair: f64,
}

impl Moments {
    /// The empty subtree behind a free chain end.
    pub const ZERO: Self = Self {
        length: 0.0,
        first: 0.0,
        pair: 0.0,
    };

    /// A single rod of length `a` entered at one end.
    pub fn rod(a: f64) -> Self {
        Self::ZERO.behind_arm(a)
    }

    /// Two subtrees hanging from the same point.
    pub fn merge(self, other: Self) -> Self {
        Self {
            length: self.length + other.length,
            first: self.first + other.first,
            pair: self.pair + other.pair + self.first * other.length + other.first * self.length,
        }
    }

    /// This subtree seen from the near end of an arm of length `a` whose
    /// far end it hangs from.
    pub fn behind_arm(self, a: f64) -> Self {
        let a2 = a * a;
        Self {
            length: a + self.length,
            first: 0.5 * a2 + self.first + a * self.length,
            pair: a2 * a / 6.0 + self.pair + a * self.first + 0.5 * a2 * self.length,
        }
    }

    /// `J = 2D/L²`, the mean contour distance between two monomers.
    pub fn mean_pair_distance(&self) -> f64 {
        if self.length > 0.0 {
            2.0 * self.pair / (self.length * self.length)
        } else {
            0.0
        }
    }

    /// Mean-square radius of gyration, `D/L²`.
    pub fn mean_square_radius(&self) -> f64 {
        0.5 * self.mean_pair_distance()
    }

    /// Contraction factor `3J/L` relative to a linear chain of the same
    /// length.
    pub fn g_factor(&self) -> f64 {
        if self.length > 0.0 {
            3.0 * self.mean_pair_distance() / self.length
        } else {
            1.0
        }
    }
}

enum Frame {
    Enter(ArmRef),
    Combine { length: f64 },
}

/// Moments of the subtree reached through `entry`, measured from the
/// junction `entry` leaves.
///
/// Uses an explicit stack, so depth is bounded by memory rather than the
/// call stack. The topology must already have passed
/// [`validate_topology`].
pub(crate) fn subtree_moments(arena: &ArmArena, entry: ArmRef) -> Moments {
    let mut frames = vec![Frame::Enter(entry)];
    let mut results: Vec<Moments> = Vec::new();
    while let Some(frame) = frames.pop() {
        match frame {
            Frame::Enter(ArmRef::None) => results.push(Moments::ZERO),
            Frame::Enter(r) => {
                let Some((id, near)) = r.target() else {
                    continue;
                };
                let arm = arena.arm(id);
                frames.push(Frame::Combine { length: arm.length });
                for &child in arm.slots(near.opposite()) {
                    frames.push(Frame::Enter(child));
                }
            }
            Frame::Combine { length } => {
                let second = results.pop().unwrap_or_default();
                let first = results.pop().unwrap_or_default();
                results.push(first.merge(second).behind_arm(length));
            }
        }
    }
    results.pop().unwrap_or_default()
}

/// Moments of a whole molecule, measured from the left end of its root.
///
/// Validates the topology first, so a cyclic or dangling graph is
/// reported as an error rather than walked. Works on any molecule that
/// has started growing; use [`measure`] to record the observables.
pub fn molecule_moments(arena: &ArmArena, polymer: &BranchedPolymer) -> Result<Moments, TopologyError> {
    validate_topology(arena, polymer)?;
    root_moments(arena, polymer)
}

/// Root-level merge of the subtrees around the root's left end. Caller
/// has validated the topology.
fn root_moments(arena: &ArmArena, polymer: &BranchedPolymer) -> Result<Moments, TopologyError> {
    let root = polymer.root("molecule_moments")?;
    let mut parts: SmallVec<[ArmRef; 3]> = SmallVec::new();
    parts.push(ArmRef::Forward(root));
    parts.extend(arena.arm(root).left.iter().copied().filter(|r| r.is_some()));
    Ok(parts
        .into_iter()
        .map(|r| subtree_moments(arena, r))
        .fold(Moments::ZERO, Moments::merge))
}

/// Compute the observables of a cleaned molecule.
///
/// Validates the topology, counts branch points along the ring, runs the
/// moment recursion and cross-checks both length sums. On success the
/// molecule becomes `Measured` with `total_length`, `branch_count`,
/// `mean_square_radius` and `g_factor` populated.
pub fn measure(arena: &ArmArena, polymer: &mut BranchedPolymer) -> Result<Moments, TopologyError> {
    polymer.require("measure", &[MoleculeState::Cleaned])?;
    let census = validate_topology(arena, polymer)?;
    if let Some((arm, end)) = census.first_pass_through {
        warn!(arm = arm.0, ?end, "pass-through junction survived cleanup");
        return Err(TopologyError::UncleanedJunction { arm, end });
    }

    let moments = root_moments(arena, polymer)?;
    let scale = census.total_length.abs().max(moments.length.abs()).max(1.0);
    if (census.total_length - moments.length).abs() > LENGTH_TOLERANCE * scale {
        warn!(
            ring = census.total_length,
            tree = moments.length,
            "ring and tree lengths disagree"
        );
        return Err(TopologyError::LengthMismatch {
            ring: census.total_length,
            tree: moments.length,
        });
    }

    polymer.arm_count = census.arm_count;
    polymer.branch_count = census.branch_points;
    polymer.total_length = census.total_length;
    polymer.mean_square_radius = Some(moments.mean_square_radius());
    polymer.g_factor = Some(if census.branch_points == 0 {
        1.0
    } else {
        moments.g_factor()
    });
    polymer.set_state(MoleculeState::Measured);
    debug!(
        arms = polymer.arm_count,
        branches = polymer.branch_count,
        length = polymer.total_length,
        g = ?polymer.g_factor,
        "molecule measured"
    );
    Ok(moments)
}
