//! Single-threaded molecule pipeline: grow, clean up, measure.

use branchpoly_arena::ArmArena;
use branchpoly_core::{GrowthError, TopologyError};
use branchpoly_rng::SubtractiveRng;
use branchpoly_topology::{cleanup, measure, BranchedPolymer};
use thiserror::Error;
use tracing::debug;

use crate::config::{ConfigError, GrowthConfig};
use crate::growth::GrowthEngine;

/// Failures that end a simulation run.
///
/// Running out of arena space is not one of them: an exhausted molecule
/// is reported as `Ok(None)` and the next one can be grown.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SimulationError {
    /// Configuration rejected before any growth.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    /// A structural invariant broke. Not recoverable.
    #[error("topology error: {0}")]
    Topology(#[from] TopologyError),
}

/// Running totals for one [`Simulator`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SimulatorStats {
    /// Molecules grown and measured.
    pub completed: u64,
    /// Molecules discarded because the arena ran out.
    pub aborted: u64,
    /// Junctions removed by cleanup, summed over completed molecules.
    pub merged_junctions: u64,
}

/// Owns one arena, one generator and the validated configuration.
///
/// The arena is reused across molecules: each call to
/// [`next_molecule`](Self::next_molecule) overwrites the arms of the
/// previous one. Inspect them through [`arena`](Self::arena) before
/// growing the next molecule.
#[derive(Debug)]
pub struct Simulator {
    config: GrowthConfig,
    engine: GrowthEngine,
    arena: ArmArena,
    rng: SubtractiveRng,
    stats: SimulatorStats,
}

impl Simulator {
    /// Validate `config` and allocate the arena.
    pub fn new(config: GrowthConfig) -> Result<Self, SimulationError> {
        let engine = GrowthEngine::from_config(&config)?;
        let arena = ArmArena::with_capacity(config.arena_capacity);
        let rng = SubtractiveRng::from_seed(config.seed);
        Ok(Self {
            config,
            engine,
            arena,
            rng,
            stats: SimulatorStats::default(),
        })
    }

    /// Grow, clean up and measure the next molecule.
    ///
    /// Returns `Ok(None)` when the molecule needed more arms than the
    /// arena holds.
    pub fn next_molecule(&mut self) -> Result<Option<BranchedPolymer>, SimulationError> {
        let mut polymer = match self.engine.grow(&mut self.arena, &mut self.rng) {
            Ok(polymer) => polymer,
            Err(GrowthError::ArenaExhausted { capacity }) => {
                self.stats.aborted += 1;
                debug!(capacity, "molecule discarded");
                return Ok(None);
            }
            Err(GrowthError::Topology(err)) => return Err(err.into()),
        };
        let report = cleanup(&mut self.arena, &mut polymer)?;
        measure(&self.arena, &mut polymer)?;
        self.stats.completed += 1;
        self.stats.merged_junctions += report.merged as u64;
        Ok(Some(polymer))
    }

    /// Reseed the generator with `seed`, then grow the next molecule.
    pub fn grow_with_seed(
        &mut self,
        seed: i64,
    ) -> Result<Option<BranchedPolymer>, SimulationError> {
        self.rng.seed(seed);
        self.next_molecule()
    }

    /// Arms of the most recent molecule.
    pub fn arena(&self) -> &ArmArena {
        &self.arena
    }

    /// Validated configuration.
    pub fn config(&self) -> &GrowthConfig {
        &self.config
    }

    /// Running totals.
    pub fn stats(&self) -> SimulatorStats {
        self.stats
    }
}
