//! Junction linking and ring maintenance.
//!
//! These are the only functions that write `left`/`right` slots or
//! `up`/`down` links during growth. They keep references reciprocal by
//! construction; [`validate`](crate::validate) checks the result.

use branchpoly_arena::ArmArena;
use branchpoly_core::{ArmId, ArmRef, End};

/// Join two or three arm ends into one junction.
///
/// Every end receives a reference to each of the others, so the result is
/// reciprocal. Two ends make a pass-through junction; three make a branch
/// point. The participating ends must be free.
///
/// # Panics
///
/// Panics if `ends` does not hold two or three entries.
pub fn link_ends(arena: &mut ArmArena, ends: &[(ArmId, End)]) {
    assert!(
        (2..=3).contains(&ends.len()),
        "a junction joins 2 or 3 arm ends, got {}",
        ends.len()
    );
    for (i, &(arm, end)) in ends.iter().enumerate() {
        let mut slots = [ArmRef::None; 2];
        let others = ends
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != i)
            .map(|(_, &(other, other_end))| ArmRef::entering(other, other_end));
        for (slot, r) in slots.iter_mut().zip(others) {
            *slot = r;
        }
        let target = arena.arm_mut(arm).slots_mut(end);
        debug_assert!(
            target.iter().all(|r| r.is_none()),
            "arm {arm} {end:?} end is already linked"
        );
        *target = slots;
    }
}

/// Make `a` and `b` a two-arm ring.
pub fn start_ring(arena: &mut ArmArena, a: ArmId, b: ArmId) {
    {
        let arm = arena.arm_mut(a);
        arm.up = b;
        arm.down = b;
    }
    let arm = arena.arm_mut(b);
    arm.up = a;
    arm.down = a;
}

/// Insert `new` into the ring directly after `anchor`.
pub fn splice_after(arena: &mut ArmArena, anchor: ArmId, new: ArmId) {
    let next = arena.arm(anchor).down;
    arena.arm_mut(anchor).down = new;
    {
        let arm = arena.arm_mut(new);
        arm.up = anchor;
        arm.down = next;
    }
    arena.arm_mut(next).up = new;
}

/// Remove `id` from its ring, leaving it as a one-arm ring.
pub fn unlink_from_ring(arena: &mut ArmArena, id: ArmId) {
    let (up, down) = {
        let arm = arena.arm(id);
        (arm.up, arm.down)
    };
    arena.arm_mut(up).down = down;
    arena.arm_mut(down).up = up;
    let arm = arena.arm_mut(id);
    arm.up = id;
    arm.down = id;
}

/// Root pair: `a` and `b` both start at the same point and grow apart.
///
/// Their left ends form a pass-through junction and the pair forms the
/// initial ring.
pub fn join_origin(arena: &mut ArmArena, a: ArmId, b: ArmId) {
    start_ring(arena, a, b);
    link_ends(arena, &[(a, End::Left), (b, End::Left)]);
}

/// Branch the right end of `parent` into the left ends of `y` and `z`,
/// splicing both into the ring after `parent`.
pub fn attach_branch(arena: &mut ArmArena, parent: ArmId, y: ArmId, z: ArmId) {
    link_ends(arena, &[(parent, End::Right), (y, End::Left), (z, End::Left)]);
    splice_after(arena, parent, y);
    splice_after(arena, y, z);
}
