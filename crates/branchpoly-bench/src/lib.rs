//! Benchmark profiles for the branchpoly simulator.
//!
//! Provides pre-built [`GrowthConfig`] profiles for benchmarks and
//! examples:
//!
//! - [`reference_profile`]: batch reactor, moderate long-chain branching
//! - [`cstr_profile`]: steady-state CSTR at the same rate ratios
//! - [`linear_profile`]: no branching, for baseline timings

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use branchpoly_engine::{EnsembleConfig, GrowthConfig, KineticParams, ReactorKind};

/// Rate ratios shared by the branched profiles.
fn branched_kinetics() -> KineticParams {
    KineticParams {
        tau: 1e-3,
        branching: 4e-4,
        scission: 0.0,
    }
}

/// Batch reactor to 70% conversion, ~1 branch point per 1000 units.
pub fn reference_profile(seed: i64) -> GrowthConfig {
    GrowthConfig {
        kinetics: branched_kinetics(),
        reactor: ReactorKind::Batch {
            final_conversion: 0.7,
        },
        arena_capacity: 100_000,
        seed,
    }
}

/// CSTR at 50% conversion. Broader distribution than the batch profile.
pub fn cstr_profile(seed: i64) -> GrowthConfig {
    GrowthConfig {
        kinetics: branched_kinetics(),
        reactor: ReactorKind::Cstr { conversion: 0.5 },
        arena_capacity: 100_000,
        seed,
    }
}

/// Linear chains only.
pub fn linear_profile(seed: i64) -> GrowthConfig {
    GrowthConfig {
        kinetics: KineticParams {
            branching: 0.0,
            ..branched_kinetics()
        },
        ..reference_profile(seed)
    }
}

/// Ensemble of `molecules` reference-profile molecules.
pub fn reference_ensemble(molecules: usize, workers: Option<usize>) -> EnsembleConfig {
    EnsembleConfig {
        growth: reference_profile(-1),
        molecules,
        workers,
        base_seed: 42,
    }
}
