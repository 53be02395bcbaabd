//! Integration test: ensemble trends follow the kinetics.
//!
//! Each comparison uses a few hundred molecules from a fixed seed; the
//! effects checked are several times larger than the sampling noise.

use branchpoly_engine::{GrowthConfig, KineticParams, ReactorKind, Simulator};
use branchpoly_topology::BranchedPolymer;

const MOLECULES: usize = 300;

fn sample(kinetics: KineticParams, reactor: ReactorKind) -> Vec<BranchedPolymer> {
    let mut sim = Simulator::new(GrowthConfig {
        kinetics,
        reactor,
        arena_capacity: 100_000,
        seed: -7,
    })
    .unwrap();
    (0..MOLECULES)
        .map(|_| sim.next_molecule().unwrap().unwrap())
        .collect()
}

fn batch() -> ReactorKind {
    ReactorKind::Batch {
        final_conversion: 0.7,
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    sum / n as f64
}

fn mean_branches(molecules: &[BranchedPolymer]) -> f64 {
    mean(molecules.iter().map(|p| p.branch_count as f64))
}

fn mean_length(molecules: &[BranchedPolymer]) -> f64 {
    mean(molecules.iter().map(|p| p.total_length))
}

#[test]
fn more_transfer_more_branches() {
    let low = sample(
        KineticParams {
            tau: 1e-3,
            branching: 1e-4,
            scission: 0.0,
        },
        batch(),
    );
    let high = sample(
        KineticParams {
            tau: 1e-3,
            branching: 1e-3,
            scission: 0.0,
        },
        batch(),
    );
    assert!(mean_branches(&high) > 3.0 * mean_branches(&low));
}

#[test]
fn scission_shortens_molecules() {
    let intact = sample(
        KineticParams {
            tau: 1e-3,
            branching: 0.0,
            scission: 0.0,
        },
        batch(),
    );
    let cut = sample(
        KineticParams {
            tau: 1e-3,
            branching: 0.0,
            scission: 2e-3,
        },
        batch(),
    );
    assert!(mean_length(&cut) < 0.6 * mean_length(&intact));
    assert!(cut.iter().all(|p| p.branch_count == 0));
}

#[test]
fn g_factor_bounds_hold_for_both_reactors() {
    let kinetics = KineticParams {
        tau: 1e-3,
        branching: 3e-4,
        scission: 0.0,
    };
    for reactor in [batch(), ReactorKind::Cstr { conversion: 0.5 }] {
        let molecules = sample(kinetics, reactor);
        assert!(molecules.iter().any(|p| p.branch_count > 0));
        for p in &molecules {
            let g = p.g_factor.unwrap();
            assert!(g > 0.0 && g <= 1.0 + 1e-12, "g = {g}");
            if p.branch_count == 0 {
                assert_eq!(g, 1.0);
            } else {
                assert!(g < 1.0, "branched molecule with g = {g}");
            }
            assert!(p.mean_square_radius.unwrap() > 0.0);
        }
    }
}

#[test]
fn branched_molecules_are_more_compact() {
    // Within one sample, molecules with many branch points should on
    // average be more contracted than those with one.
    let molecules = sample(
        KineticParams {
            tau: 1e-3,
            branching: 1e-3,
            scission: 0.0,
        },
        batch(),
    );
    let lightly = mean(
        molecules
            .iter()
            .filter(|p| p.branch_count == 1)
            .filter_map(|p| p.g_factor),
    );
    let heavily = mean(
        molecules
            .iter()
            .filter(|p| p.branch_count >= 5)
            .filter_map(|p| p.g_factor),
    );
    assert!(heavily < lightly, "heavy {heavily} vs light {lightly}");
}
