//! Kinetic growth engine for branched polymers.
//!
//! Molecules are grown one at a time by a Monte Carlo walk over the
//! reaction history of a free-radical polymerisation with transfer to
//! polymer. Each chain's birth coordinate fixes how much branching it
//! carries and how likely its start is to sit on an older chain.
//!
//! # Layers
//!
//! - [`GrowthEngine`] grows one molecule into an
//!   [`ArmArena`](branchpoly_arena::ArmArena) from a
//!   [`SubtractiveRng`](branchpoly_rng::SubtractiveRng).
//! - [`Simulator`] owns an arena, a generator and the configuration and
//!   runs grow, cleanup and measurement for each molecule.
//! - [`run_ensemble`] spreads many molecules across worker threads with
//!   results that do not depend on the worker count.
//!
//! Reactor kinetics sit behind the [`Reactor`] trait, with
//! [`BatchReactor`] and [`CstrReactor`] provided.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod ensemble;
pub mod growth;
pub mod reactor;
pub mod simulator;

pub use config::{ConfigError, EnsembleConfig, GrowthConfig, KineticParams, ReactorKind};
pub use ensemble::{run_ensemble, EnsembleReport, MoleculeRecord};
pub use growth::{EventRates, GrowthEngine, Heading};
pub use reactor::{BatchReactor, CstrReactor, Reactor};
pub use simulator::{SimulationError, Simulator, SimulatorStats};
