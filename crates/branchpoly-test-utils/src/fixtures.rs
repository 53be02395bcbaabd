//! Reusable molecule fixtures.
//!
//! Every builder reserves the arena it is given, links the arms through
//! [`branchpoly_topology::link`] and returns a `Complete` molecule:
//!
//! - [`origin_pair`]: two arms meeting at a pass-through, as growth
//!   produces before any branching;
//! - [`linear_chain`]: arms end to end, every joint a pass-through;
//! - [`regular_star`]: `f` equal arms, built from three-way junctions
//!   joined by zero-length connectors when `f > 3`;
//! - [`comb`]: a backbone with evenly spaced teeth.

use branchpoly_arena::ArmArena;
use branchpoly_core::{ArmId, End};
use branchpoly_topology::{link, BranchedPolymer};

fn request(arena: &mut ArmArena) -> ArmId {
    arena
        .request_arm()
        .expect("fixture reserved too few arms")
}

fn with_length(arena: &mut ArmArena, length: f64) -> ArmId {
    let id = request(arena);
    arena.arm_mut(id).length = length;
    id
}

fn complete(arena: &ArmArena, first: ArmId) -> BranchedPolymer {
    let mut polymer = BranchedPolymer::new();
    polymer.begin_growth(first).expect("fresh molecule");
    polymer
        .mark_complete(arena.allocated())
        .expect("molecule is growing");
    polymer
}

/// Two arms of lengths `a` and `b` meeting at a pass-through junction.
pub fn origin_pair(arena: &mut ArmArena, a: f64, b: f64) -> BranchedPolymer {
    arena.reserve(2);
    let first = with_length(arena, a);
    let second = with_length(arena, b);
    link::join_origin(arena, first, second);
    complete(arena, first)
}

/// Arms of the given lengths joined end to end.
///
/// # Panics
///
/// Panics if `lengths` is empty.
pub fn linear_chain(arena: &mut ArmArena, lengths: &[f64]) -> BranchedPolymer {
    assert!(!lengths.is_empty(), "a chain needs at least one arm");
    arena.reserve(lengths.len());
    let first = with_length(arena, lengths[0]);
    let mut prev = first;
    for &len in &lengths[1..] {
        let next = with_length(arena, len);
        link::splice_after(arena, prev, next);
        link::link_ends(arena, &[(prev, End::Right), (next, End::Left)]);
        prev = next;
    }
    complete(arena, first)
}

/// A star of `f` arms of length `arm_length`.
///
/// # Panics
///
/// Panics if `f < 3`.
pub fn regular_star(arena: &mut ArmArena, f: usize, arm_length: f64) -> BranchedPolymer {
    assert!(f >= 3, "a star needs at least three arms, got {f}");
    arena.reserve(2 * f - 3);
    let first = with_length(arena, arm_length);
    let mut hub = first;
    for placed in 1..f - 1 {
        let arm = with_length(arena, arm_length);
        let last_junction = placed == f - 2;
        let onward = with_length(arena, if last_junction { arm_length } else { 0.0 });
        link::attach_branch(arena, hub, arm, onward);
        hub = onward;
    }
    complete(arena, first)
}

/// Closed-form g-factor of a regular `f`-arm star, `(3f - 2) / f²`.
pub fn regular_star_g(f: usize) -> f64 {
    let f = f as f64;
    (3.0 * f - 2.0) / (f * f)
}

/// A backbone of `teeth + 1` segments of length `spacing`, with a tooth of
/// length `tooth` at each of the `teeth` interior junctions.
pub fn comb(arena: &mut ArmArena, teeth: usize, spacing: f64, tooth: f64) -> BranchedPolymer {
    arena.reserve(2 * teeth + 1);
    let first = with_length(arena, spacing);
    let mut segment = first;
    for _ in 0..teeth {
        let next = with_length(arena, spacing);
        let branch = with_length(arena, tooth);
        link::attach_branch(arena, segment, next, branch);
        segment = next;
    }
    complete(arena, first)
}
