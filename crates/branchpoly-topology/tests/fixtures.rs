//! Cleanup and moment calculation on hand-built molecules.
//!
//! Every fixture here has a known answer: closed-form g-factors for
//! regular stars, g = 1 for linear chains, and exact total lengths.

use branchpoly_arena::ArmArena;
use branchpoly_core::{ArmId, End, MoleculeState};
use branchpoly_test_utils::{
    assert_close, comb, linear_chain, origin_pair, regular_star, regular_star_g,
};
use branchpoly_topology::moments::molecule_moments;
use branchpoly_topology::{cleanup, link, measure, renumber, validate_topology, BranchedPolymer};

fn clean_and_measure(arena: &mut ArmArena, polymer: &mut BranchedPolymer) {
    cleanup(arena, polymer).unwrap();
    measure(arena, polymer).unwrap();
}

// ── Stars ───────────────────────────────────────────────────────

#[test]
fn three_arm_star_g_factor() {
    let mut arena = ArmArena::default();
    let mut star = regular_star(&mut arena, 3, 10.0);
    clean_and_measure(&mut arena, &mut star);
    assert_eq!(star.branch_count, 1);
    assert_close(star.g_factor.unwrap(), 0.7778, 1e-3);
    assert_close(star.g_factor.unwrap(), 7.0 / 9.0, 1e-12);
}

#[test]
fn larger_stars_match_closed_form() {
    for f in 4..=8 {
        let mut arena = ArmArena::default();
        let mut star = regular_star(&mut arena, f, 3.5);
        clean_and_measure(&mut arena, &mut star);
        assert_eq!(star.branch_count, f - 2);
        assert_close(star.total_length, 3.5 * f as f64, 1e-12);
        assert_close(star.g_factor.unwrap(), regular_star_g(f), 1e-12);
    }
}

#[test]
fn star_g_factor_does_not_depend_on_arm_length() {
    let mut g = Vec::new();
    for len in [0.5, 7.0, 1200.0] {
        let mut arena = ArmArena::default();
        let mut star = regular_star(&mut arena, 3, len);
        clean_and_measure(&mut arena, &mut star);
        g.push(star.g_factor.unwrap());
    }
    assert_close(g[0], g[1], 1e-12);
    assert_close(g[1], g[2], 1e-12);
}

// ── Linear chains ───────────────────────────────────────────────

#[test]
fn linear_chain_collapses_to_one_arm() {
    let mut arena = ArmArena::default();
    let mut chain = linear_chain(&mut arena, &[1.0, 2.0, 3.0, 4.0, 5.0]);
    let report = cleanup(&mut arena, &mut chain).unwrap();
    assert_eq!(report.merged, 4);
    measure(&arena, &mut chain).unwrap();
    assert_eq!(chain.arm_count, 1);
    assert_eq!(chain.branch_count, 0);
    assert_eq!(chain.total_length, 15.0);
    assert_eq!(chain.g_factor, Some(1.0));
    assert_close(chain.mean_square_radius.unwrap(), 15.0 / 6.0, 1e-12);
}

#[test]
fn single_arm_needs_no_cleanup() {
    let mut arena = ArmArena::default();
    let mut chain = linear_chain(&mut arena, &[42.0]);
    assert_eq!(cleanup(&mut arena, &mut chain).unwrap().merged, 0);
    measure(&arena, &mut chain).unwrap();
    assert_eq!(chain.g_factor, Some(1.0));
}

#[test]
fn origin_pair_is_linear() {
    let mut arena = ArmArena::default();
    let mut pair = origin_pair(&mut arena, 2.5, 0.5);
    clean_and_measure(&mut arena, &mut pair);
    assert_eq!(pair.arm_count, 1);
    assert_eq!(pair.total_length, 3.0);
    assert_eq!(pair.g_factor, Some(1.0));
}

// ── Combs ───────────────────────────────────────────────────────

#[test]
fn comb_lengths_agree_and_contract() {
    let mut arena = ArmArena::default();
    let mut c = comb(&mut arena, 5, 4.0, 2.0);
    clean_and_measure(&mut arena, &mut c);
    assert_eq!(c.branch_count, 5);
    assert_eq!(c.arm_count, 11);
    assert_close(c.total_length, 6.0 * 4.0 + 5.0 * 2.0, 1e-12);
    let g = c.g_factor.unwrap();
    assert!(g > 0.0 && g < 1.0, "g = {g}");
}

#[test]
fn moments_do_not_depend_on_root_choice() {
    let mut arena = ArmArena::default();
    let c = comb(&mut arena, 3, 1.0, 5.0);
    let from_first = molecule_moments(&arena, &c).unwrap();

    // Re-root the same arms at the last tooth.
    let mut rerooted = BranchedPolymer::new();
    rerooted.begin_growth(ArmId(6)).unwrap();
    rerooted.mark_complete(7).unwrap();
    let from_tooth = molecule_moments(&arena, &rerooted).unwrap();

    assert_close(from_first.length, from_tooth.length, 1e-12);
    assert_close(from_first.pair, from_tooth.pair, 1e-9);
}

// ── Lifecycle ───────────────────────────────────────────────────

#[test]
fn full_lifecycle_then_renumber() {
    let mut arena = ArmArena::default();
    let mut star = regular_star(&mut arena, 3, 1.0);
    assert_eq!(star.state(), MoleculeState::Complete);
    cleanup(&mut arena, &mut star).unwrap();
    assert_eq!(star.state(), MoleculeState::Cleaned);
    measure(&arena, &mut star).unwrap();
    assert_eq!(star.state(), MoleculeState::Measured);
    assert!(measure(&arena, &mut star).is_err());

    assert_eq!(renumber(&mut arena, &star).unwrap(), 3);
    let mut seq: Vec<u32> = star
        .arms(&arena)
        .map(|(_, arm)| arm.sequence_index.unwrap())
        .collect();
    seq.sort_unstable();
    assert_eq!(seq, vec![0, 1, 2]);
}

// ── Random trees ────────────────────────────────────────────────

#[cfg(not(miri))]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Grow a random tree from an origin pair by repeatedly branching a
    /// free right end chosen by `picks`.
    fn random_tree(arena: &mut ArmArena, lengths: &[f64], picks: &[usize]) -> BranchedPolymer {
        let branches = picks.len();
        arena.reserve(2 + 2 * branches);
        let a = arena.request_arm().unwrap();
        let b = arena.request_arm().unwrap();
        link::join_origin(arena, a, b);
        let mut tips = vec![a, b];
        for &pick in picks {
            let parent = tips.swap_remove(pick % tips.len());
            let y = arena.request_arm().unwrap();
            let z = arena.request_arm().unwrap();
            link::attach_branch(arena, parent, y, z);
            tips.push(y);
            tips.push(z);
        }
        for (i, arm) in (0..arena.allocated()).map(|i| ArmId(i as u32)).enumerate() {
            arena.arm_mut(arm).length = lengths[i % lengths.len()];
        }
        let mut polymer = BranchedPolymer::new();
        polymer.begin_growth(a).unwrap();
        polymer.mark_complete(arena.allocated()).unwrap();
        polymer
    }

    proptest! {
        #[test]
        fn cleaned_trees_hold_invariants(
            lengths in proptest::collection::vec(0.1f64..100.0, 1..16),
            picks in proptest::collection::vec(0usize..64, 0..40),
        ) {
            let mut arena = ArmArena::default();
            let mut polymer = random_tree(&mut arena, &lengths, &picks);
            let expected_length: f64 = arena.allocated_arms().iter().map(|a| a.length).sum();

            cleanup(&mut arena, &mut polymer).unwrap();
            let census = validate_topology(&arena, &polymer).unwrap();
            prop_assert_eq!(census.pass_through, 0);
            prop_assert_eq!(census.branch_points, picks.len());

            let snapshot = arena.allocated_arms().to_vec();
            prop_assert_eq!(cleanup(&mut arena, &mut polymer).unwrap().merged, 0);
            prop_assert_eq!(arena.allocated_arms(), snapshot.as_slice());

            let moments = measure(&arena, &mut polymer).unwrap();
            let scale = expected_length.max(1.0);
            prop_assert!((polymer.total_length - expected_length).abs() <= 1e-9 * scale);
            prop_assert!((moments.length - polymer.total_length).abs() <= 1e-9 * scale);
            let g = polymer.g_factor.unwrap();
            prop_assert!(g > 0.0 && g <= 1.0 + 1e-12, "g = {}", g);
            if picks.is_empty() {
                prop_assert_eq!(g, 1.0);
            }
        }
    }

    #[test]
    fn root_left_end_is_not_a_pass_through_after_cleanup() {
        let mut arena = ArmArena::default();
        let mut polymer = random_tree(&mut arena, &[1.0], &[0]);
        cleanup(&mut arena, &mut polymer).unwrap();
        let root = polymer.first_arm().unwrap();
        assert!(arena.arm(root).degree_at(End::Left) != 1);
    }
}
