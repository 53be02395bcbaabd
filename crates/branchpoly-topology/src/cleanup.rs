//! Removal of degree-2 pass-through junctions.
//!
//! Growth starts every molecule from a random monomer and grows two arms
//! apart from it. The point where they meet is a junction with only two
//! arms, which carries no topological information. [`cleanup`] walks the
//! tree from the root and absorbs the arm on the far side of every such
//! junction into the arm on the near side:
//!
//! ```text
//!   before:   ●──── a ────○──── b ────┬── c        ○ = pass-through
//!                                      └── d
//!   after:    ●───────── a ───────────┬── c        b orphaned
//!                                      └── d
//! ```
//!
//! The absorbed arm is spliced out of the ring and left unlinked in the
//! arena; the arena is never compacted.

use branchpoly_arena::ArmArena;
use branchpoly_core::{ArmId, ArmRef, End, MoleculeState, TopologyError};
use tracing::{debug, trace};

use crate::link;
use crate::polymer::BranchedPolymer;

/// Outcome of a cleanup pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CleanupReport {
    /// Pass-through junctions removed (one arm orphaned per junction).
    pub merged: usize,
}

/// Remove every degree-2 junction from a grown molecule.
///
/// Accepts `Complete` molecules and, as a no-op re-run, `Cleaned` ones.
/// Leaves the molecule `Cleaned`.
pub fn cleanup(
    arena: &mut ArmArena,
    polymer: &mut BranchedPolymer,
) -> Result<CleanupReport, TopologyError> {
    polymer.require("cleanup", &[MoleculeState::Complete, MoleculeState::Cleaned])?;
    let root = polymer.root("cleanup")?;
    let allocated = arena.allocated();
    if !arena.contains(root) {
        return Err(TopologyError::DanglingReference {
            arm: root,
            target: root,
            allocated,
        });
    }

    let mut report = CleanupReport::default();
    let mut visited = vec![false; allocated];
    visited[root.index()] = true;
    let mut stack = vec![(root, End::Right), (root, End::Left)];

    while let Some((arm, end)) = stack.pop() {
        while let Some(through) = arena.arm(arm).pass_through(end) {
            let absorbed = checked_target(through, arm, allocated)?;
            if visited[absorbed.index()] {
                return Err(TopologyError::CycleDetected { arm: absorbed });
            }
            absorb(arena, arm, end, through)?;
            trace!(arm = arm.0, absorbed = absorbed.0, ?end, "absorbed pass-through arm");
            report.merged += 1;
        }

        for slot in *arena.arm(arm).slots(end) {
            let Some((next, near)) = slot.target() else {
                continue;
            };
            checked_target(slot, arm, allocated)?;
            if visited[next.index()] {
                return Err(TopologyError::CycleDetected { arm: next });
            }
            visited[next.index()] = true;
            stack.push((next, near.opposite()));
        }
    }

    polymer.arm_count = polymer.arm_count.saturating_sub(report.merged);
    polymer.set_state(MoleculeState::Cleaned);
    debug!(
        merged = report.merged,
        arms = polymer.arm_count,
        "cleanup finished"
    );
    Ok(report)
}

fn checked_target(slot: ArmRef, from: ArmId, allocated: usize) -> Result<ArmId, TopologyError> {
    match slot.arm() {
        Some(id) if id.index() < allocated => Ok(id),
        Some(id) => Err(TopologyError::DanglingReference {
            arm: from,
            target: id,
            allocated,
        }),
        None => Err(TopologyError::DanglingReference {
            arm: from,
            target: from,
            allocated,
        }),
    }
}

/// Fold the arm behind the pass-through at `keep`'s `end` into `keep`.
fn absorb(
    arena: &mut ArmArena,
    keep: ArmId,
    end: End,
    through: ArmRef,
) -> Result<(), TopologyError> {
    let Some((gone, near)) = through.target() else {
        return Ok(());
    };
    if gone == keep {
        return Err(TopologyError::CycleDetected { arm: keep });
    }
    let far = near.opposite();
    let allocated = arena.allocated();
    let absorbed = arena.arm(gone).clone();

    let back = ArmRef::entering(keep, end);
    if absorbed.pass_through(near) != Some(back) {
        return Err(TopologyError::AsymmetricReference {
            arm: keep,
            end,
            neighbour: gone,
        });
    }

    let inherited = *absorbed.slots(far);
    let old = ArmRef::entering(gone, far);
    let new = ArmRef::entering(keep, end);
    for slot in inherited {
        let Some((neighbour, neighbour_end)) = slot.target() else {
            continue;
        };
        if neighbour == keep {
            return Err(TopologyError::CycleDetected { arm: keep });
        }
        let slots = arena
            .get_mut(neighbour)
            .ok_or(TopologyError::DanglingReference {
                arm: gone,
                target: neighbour,
                allocated,
            })?
            .slots_mut(neighbour_end);
        let position = slots.iter().position(|&r| r == old).ok_or(
            TopologyError::AsymmetricReference {
                arm: gone,
                end: far,
                neighbour,
            },
        )?;
        slots[position] = new;
    }

    {
        let arm = arena.arm_mut(keep);
        arm.length += absorbed.length;
        *arm.slots_mut(end) = inherited;
    }
    link::unlink_from_ring(arena, gone);
    let orphan = arena.arm_mut(gone);
    orphan.length = 0.0;
    orphan.left = [ArmRef::None; 2];
    orphan.right = [ArmRef::None; 2];
    Ok(())
}
