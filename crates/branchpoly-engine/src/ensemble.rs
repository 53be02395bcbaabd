//! Parallel ensemble runner.
//!
//! Molecule indices are handed to a pool of scoped worker threads over a
//! crossbeam channel. Each worker owns a [`Simulator`] and reseeds it per
//! molecule from a [`SeedStream`], so molecule `i` is the same whichever
//! worker grows it. Results are reassembled in index order.

use std::thread;

use branchpoly_rng::SeedStream;
use branchpoly_topology::BranchedPolymer;
use tracing::{debug, info};

use crate::config::EnsembleConfig;
use crate::simulator::{SimulationError, Simulator};

/// A measured molecule and its position in the ensemble.
#[derive(Clone, Debug, PartialEq)]
pub struct MoleculeRecord {
    /// Ensemble index; also the seed-stream index.
    pub index: u64,
    /// The measured molecule.
    pub polymer: BranchedPolymer,
}

/// Outcome of [`run_ensemble`].
#[derive(Clone, Debug, PartialEq)]
pub struct EnsembleReport {
    /// Completed molecules in index order.
    pub molecules: Vec<MoleculeRecord>,
    /// Number of molecules discarded for arena exhaustion.
    pub aborted: usize,
    /// Worker threads used.
    pub workers: usize,
}

impl EnsembleReport {
    /// Molecules attempted.
    pub fn requested(&self) -> usize {
        self.molecules.len() + self.aborted
    }

    /// Fraction of attempts discarded.
    pub fn abort_fraction(&self) -> f64 {
        match self.requested() {
            0 => 0.0,
            n => self.aborted as f64 / n as f64,
        }
    }

    /// Iterate the completed molecules.
    pub fn polymers(&self) -> impl Iterator<Item = &BranchedPolymer> {
        self.molecules.iter().map(|record| &record.polymer)
    }
}

type Outcome = (u64, Result<Option<BranchedPolymer>, SimulationError>);

/// Grow, clean up and measure `config.molecules` molecules in parallel.
///
/// Fails with the error of the lowest-indexed molecule that hit a fatal
/// error. Molecules that exhaust the arena are counted in
/// [`EnsembleReport::aborted`].
pub fn run_ensemble(config: &EnsembleConfig) -> Result<EnsembleReport, SimulationError> {
    config.validate()?;
    let workers = config.resolved_worker_count();
    let stream = SeedStream::new(config.base_seed);

    let simulators = (0..workers)
        .map(|_| Simulator::new(config.growth.clone()))
        .collect::<Result<Vec<_>, _>>()?;

    let (task_tx, task_rx) = crossbeam_channel::unbounded::<u64>();
    let (result_tx, result_rx) = crossbeam_channel::unbounded::<Outcome>();
    for index in 0..config.molecules as u64 {
        // Receiver is alive until the end of this function.
        let _ = task_tx.send(index);
    }
    drop(task_tx);

    thread::scope(|scope| {
        for (worker, mut sim) in simulators.into_iter().enumerate() {
            let task_rx = task_rx.clone();
            let result_tx = result_tx.clone();
            let stream = &stream;
            scope.spawn(move || {
                let mut grown = 0usize;
                while let Ok(index) = task_rx.recv() {
                    let outcome = sim.grow_with_seed(stream.seed_for(index));
                    grown += 1;
                    if result_tx.send((index, outcome)).is_err() {
                        break;
                    }
                }
                debug!(worker, grown, "ensemble worker finished");
            });
        }
    });
    drop(result_tx);

    let mut outcomes: Vec<Outcome> = result_rx.iter().collect();
    outcomes.sort_by_key(|(index, _)| *index);

    let mut molecules = Vec::with_capacity(outcomes.len());
    let mut aborted = 0;
    for (index, outcome) in outcomes {
        match outcome? {
            Some(polymer) => molecules.push(MoleculeRecord { index, polymer }),
            None => aborted += 1,
        }
    }

    let report = EnsembleReport {
        molecules,
        aborted,
        workers,
    };
    info!(
        requested = report.requested(),
        completed = report.molecules.len(),
        aborted = report.aborted,
        workers,
        "ensemble finished"
    );
    Ok(report)
}
