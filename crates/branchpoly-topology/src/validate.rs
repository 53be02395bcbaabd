//! Structural invariant checks.
//!
//! [`validate_topology`] walks a molecule twice, once along the ring and
//! once through junction links, and reports the first broken invariant:
//!
//! - every occupied slot points at an allocated arm and is answered by a
//!   matching back-reference;
//! - the ring closes and its `up`/`down` links agree;
//! - ring and junction walk reach the same arms;
//! - the junction graph is a tree (nodes = arms + 1).
//!
//! Any failure here is a defect in whatever built the topology.

use branchpoly_arena::ArmArena;
use branchpoly_core::{ArmId, ArmRef, End, TopologyError};

use crate::polymer::BranchedPolymer;

/// Counts gathered while validating a molecule.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TopologyCensus {
    /// Arms on the ring.
    pub arm_count: usize,
    /// Three-way junctions.
    pub branch_points: usize,
    /// Two-arm pass-through junctions.
    pub pass_through: usize,
    /// Free chain ends.
    pub free_ends: usize,
    /// Sum of arm lengths along the ring.
    pub total_length: f64,
    /// First pass-through end found, for error reporting.
    pub first_pass_through: Option<(ArmId, End)>,
}

/// Check every structural invariant of `polymer` and count its features.
pub fn validate_topology(
    arena: &ArmArena,
    polymer: &BranchedPolymer,
) -> Result<TopologyCensus, TopologyError> {
    let root = polymer.root("validate_topology")?;
    let allocated = arena.allocated();
    let arm_at = |id: ArmId, from: ArmId| {
        arena.get(id).ok_or(TopologyError::DanglingReference {
            arm: from,
            target: id,
            allocated,
        })
    };
    arm_at(root, root)?;

    let mut census = TopologyCensus::default();
    let mut branched_ends = 0usize;
    let mut single_ends = 0usize;
    let mut on_ring = vec![false; allocated];

    let mut current = root;
    loop {
        if census.arm_count >= allocated || on_ring[current.index()] {
            return Err(TopologyError::RingNotClosed {
                start: root,
                limit: allocated,
            });
        }
        on_ring[current.index()] = true;
        census.arm_count += 1;

        let arm = arm_at(current, current)?;
        census.total_length += arm.length;
        let down = arm_at(arm.down, current)?;
        if down.up != current {
            return Err(TopologyError::RingLinkMismatch { arm: current });
        }

        for end in [End::Left, End::Right] {
            match arm.degree_at(end) {
                0 => census.free_ends += 1,
                1 => {
                    single_ends += 1;
                    census.first_pass_through.get_or_insert((current, end));
                }
                _ => branched_ends += 1,
            }
            for &slot in arm.slots(end) {
                let Some((neighbour, near)) = slot.target() else {
                    continue;
                };
                let other = arm_at(neighbour, current)?;
                let back = ArmRef::entering(current, end);
                let reciprocal = neighbour != current && other.slots(near).contains(&back);
                if !reciprocal {
                    return Err(TopologyError::AsymmetricReference {
                        arm: current,
                        end,
                        neighbour,
                    });
                }
            }
        }

        current = arm.down;
        if current == root {
            break;
        }
    }

    census.branch_points = branched_ends / 3;
    census.pass_through = single_ends / 2;

    let reached = reachable_arms(arena, root, allocated)?;
    if reached != census.arm_count {
        return Err(TopologyError::RingArmCountMismatch {
            ring: census.arm_count,
            tree: reached,
        });
    }

    // A connected graph whose edges are arms is a tree iff it has one more
    // node (junction or free end) than it has edges.
    let nodes = census.branch_points + census.pass_through + census.free_ends;
    if nodes != census.arm_count + 1 {
        return Err(TopologyError::NotATree {
            arms: census.arm_count,
            nodes,
        });
    }

    Ok(census)
}

/// Number of arms reachable from `root` through junction links.
fn reachable_arms(
    arena: &ArmArena,
    root: ArmId,
    allocated: usize,
) -> Result<usize, TopologyError> {
    let mut seen = vec![false; allocated];
    let mut stack = vec![root];
    seen[root.index()] = true;
    let mut count = 0;
    while let Some(id) = stack.pop() {
        count += 1;
        let arm = arena.get(id).ok_or(TopologyError::DanglingReference {
            arm: root,
            target: id,
            allocated,
        })?;
        for slot in arm.left.iter().chain(arm.right.iter()) {
            let Some(next) = slot.arm() else {
                continue;
            };
            if next.index() >= allocated {
                return Err(TopologyError::DanglingReference {
                    arm: id,
                    target: next,
                    allocated,
                });
            }
            if !seen[next.index()] {
                seen[next.index()] = true;
                stack.push(next);
            }
        }
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link;

    /// parent ─┬─ y
    ///         └─ z
    fn branched() -> (ArmArena, BranchedPolymer) {
        let mut arena = ArmArena::with_capacity(3);
        let ids: Vec<ArmId> = (0..3).map(|_| arena.request_arm().unwrap()).collect();
        link::start_ring(&mut arena, ids[0], ids[0]);
        link::attach_branch(&mut arena, ids[0], ids[1], ids[2]);
        for (i, &id) in ids.iter().enumerate() {
            arena.arm_mut(id).length = (i + 1) as f64;
        }
        let mut polymer = BranchedPolymer::new();
        polymer.begin_growth(ids[0]).unwrap();
        polymer.mark_complete(3).unwrap();
        (arena, polymer)
    }

    #[test]
    fn census_of_single_branch_point() {
        let (arena, polymer) = branched();
        let census = validate_topology(&arena, &polymer).unwrap();
        assert_eq!(census.arm_count, 3);
        assert_eq!(census.branch_points, 1);
        assert_eq!(census.pass_through, 0);
        assert_eq!(census.free_ends, 3);
        assert_eq!(census.total_length, 6.0);
        assert_eq!(census.first_pass_through, None);
    }

    #[test]
    fn origin_pair_counts_one_pass_through() {
        let mut arena = ArmArena::with_capacity(2);
        let a = arena.request_arm().unwrap();
        let b = arena.request_arm().unwrap();
        link::join_origin(&mut arena, a, b);
        let mut polymer = BranchedPolymer::new();
        polymer.begin_growth(a).unwrap();
        polymer.mark_complete(2).unwrap();
        let census = validate_topology(&arena, &polymer).unwrap();
        assert_eq!(census.pass_through, 1);
        assert_eq!(census.free_ends, 2);
        assert_eq!(census.first_pass_through, Some((a, End::Left)));
    }

    #[test]
    fn one_sided_reference_is_reported() {
        let (mut arena, polymer) = branched();
        arena.arm_mut(ArmId(2)).left[0] = ArmRef::None;
        let err = validate_topology(&arena, &polymer).unwrap_err();
        assert_eq!(
            err,
            TopologyError::AsymmetricReference {
                arm: ArmId(0),
                end: End::Right,
                neighbour: ArmId(2),
            }
        );
    }

    #[test]
    fn wrong_direction_is_asymmetric() {
        let (mut arena, polymer) = branched();
        arena.arm_mut(ArmId(1)).left[0] = ArmRef::Forward(ArmId(0));
        assert!(matches!(
            validate_topology(&arena, &polymer),
            Err(TopologyError::AsymmetricReference { .. })
        ));
    }

    #[test]
    fn broken_ring_is_reported() {
        let (mut arena, polymer) = branched();
        arena.arm_mut(ArmId(1)).down = ArmId(1);
        let err = validate_topology(&arena, &polymer).unwrap_err();
        assert!(matches!(
            err,
            TopologyError::RingLinkMismatch { .. } | TopologyError::RingNotClosed { .. }
        ));
    }

    #[test]
    fn arm_missing_from_ring_is_reported() {
        let (mut arena, polymer) = branched();
        link::unlink_from_ring(&mut arena, ArmId(2));
        let err = validate_topology(&arena, &polymer).unwrap_err();
        assert_eq!(err, TopologyError::RingArmCountMismatch { ring: 2, tree: 3 });
    }

    #[test]
    fn unstarted_molecule_is_invalid_state() {
        let arena = ArmArena::with_capacity(1);
        let polymer = BranchedPolymer::new();
        assert!(matches!(
            validate_topology(&arena, &polymer),
            Err(TopologyError::InvalidState { .. })
        ));
    }
}
