//! branchpoly: Monte Carlo generation of branched polymer molecules.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all branchpoly sub-crates. For most users, adding `branchpoly` as a
//! single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use branchpoly::prelude::*;
//!
//! let config = GrowthConfig {
//!     kinetics: KineticParams {
//!         tau: 1e-3,
//!         branching: 4e-4,
//!         scission: 0.0,
//!     },
//!     reactor: ReactorKind::Batch { final_conversion: 0.7 },
//!     arena_capacity: 100_000,
//!     seed: -42,
//! };
//! let mut sim = Simulator::new(config).unwrap();
//!
//! let mut measured = Vec::new();
//! while measured.len() < 10 {
//!     if let Some(polymer) = sim.next_molecule().unwrap() {
//!         measured.push(polymer);
//!     }
//! }
//! for polymer in &measured {
//!     assert_eq!(polymer.state(), MoleculeState::Measured);
//!     assert!(polymer.g_factor.is_some());
//! }
//! ```
//!
//! Molecules can also be built by hand and measured with the same code:
//!
//! ```rust
//! use branchpoly::prelude::*;
//! use branchpoly::topology::link;
//!
//! // Three arms of length 1 meeting at one junction.
//! let mut arena = ArmArena::with_capacity(3);
//! let ids: Vec<ArmId> = (0..3).map(|_| arena.request_arm().unwrap()).collect();
//! link::attach_branch(&mut arena, ids[0], ids[1], ids[2]);
//! for &id in &ids {
//!     arena.arm_mut(id).length = 1.0;
//! }
//!
//! let mut star = BranchedPolymer::new();
//! star.begin_growth(ids[0]).unwrap();
//! star.mark_complete(3).unwrap();
//! cleanup(&mut arena, &mut star).unwrap();
//! measure(&arena, &mut star).unwrap();
//! assert!((star.g_factor.unwrap() - 7.0 / 9.0).abs() < 1e-12);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `branchpoly-core` | IDs, arm references, lifecycle states, errors |
//! | [`rng`] | `branchpoly-rng` | Subtractive generator and per-molecule seed stream |
//! | [`arena`] | `branchpoly-arena` | Arm storage |
//! | [`topology`] | `branchpoly-topology` | Linking, validation, cleanup, moments |
//! | [`engine`] | `branchpoly-engine` | Reactor kinetics, growth, simulator, ensembles |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and errors (`branchpoly-core`).
pub use branchpoly_core as types;

/// Deterministic random numbers (`branchpoly-rng`).
///
/// [`rng::SubtractiveRng`] drives growth; [`rng::SeedStream`] derives
/// per-molecule seeds for ensembles.
pub use branchpoly_rng as rng;

/// Fixed-capacity arm storage (`branchpoly-arena`).
pub use branchpoly_arena as arena;

/// Molecule structure and observables (`branchpoly-topology`).
///
/// Use [`topology::link`] to build molecules by hand,
/// [`topology::validate_topology`] to check them.
pub use branchpoly_topology as topology;

/// Growth, simulation and ensembles (`branchpoly-engine`).
pub use branchpoly_engine as engine;

/// Common imports for typical branchpoly usage.
///
/// ```rust
/// use branchpoly::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use branchpoly_core::{ArmId, ArmRef, End, MoleculeState};

    // Errors
    pub use branchpoly_core::{GrowthError, TopologyError};
    pub use branchpoly_engine::{ConfigError, SimulationError};

    // Storage and randomness
    pub use branchpoly_arena::{Arm, ArmArena};
    pub use branchpoly_rng::{SeedStream, SubtractiveRng};

    // Topology
    pub use branchpoly_topology::{cleanup, measure, renumber, BranchedPolymer, Moments};

    // Engine
    pub use branchpoly_engine::{
        run_ensemble, EnsembleConfig, EnsembleReport, GrowthConfig, GrowthEngine, KineticParams,
        ReactorKind, Simulator,
    };
}
