//! Stochastic growth of one molecule.
//!
//! A molecule is grown from a randomly chosen monomer unit outward. Each
//! arm is a stretch of one primary chain between two events; at its far
//! end the chain either stops, is cut, or meets a branch point where two
//! new arms are requested and pushed onto the work stack. The stack is
//! explicit so molecules of any depth grow without touching the call
//! stack.

use branchpoly_arena::ArmArena;
use branchpoly_core::{ArmId, GrowthError};
use branchpoly_rng::SubtractiveRng;
use branchpoly_topology::{link, BranchedPolymer};
use tracing::{debug, trace};

use crate::config::{ConfigError, GrowthConfig, KineticParams};
use crate::reactor::Reactor;

/// Direction a chain is being followed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Heading {
    /// Toward the end the radical was still adding monomer at.
    TowardEnd,
    /// Back toward where the chain was initiated.
    TowardStart,
}

/// Per-unit event rates along a chain with a given birth coordinate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EventRates {
    /// Rate of events that stop a chain.
    pub stop: f64,
    /// Density of branch points carried by the chain.
    pub branch: f64,
    /// Density of scission cuts.
    pub scission: f64,
    /// Probability that a chain start sits on an older host chain.
    pub attach_probability: f64,
}

impl EventRates {
    /// Sum of all event rates.
    pub fn total(&self) -> f64 {
        self.stop + self.branch + self.scission
    }
}

#[derive(Clone, Copy, Debug)]
struct GrowthTask {
    arm: ArmId,
    birth: f64,
    heading: Heading,
}

/// What happened at the far end of a grown arm.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ArmEnd {
    Branch,
    Scission,
    HostAttach,
    Free,
}

/// Grows molecules from kinetic parameters and a reactor model.
///
/// The engine keeps its work stack between molecules so repeated growth
/// does not reallocate.
#[derive(Debug)]
pub struct GrowthEngine {
    kinetics: KineticParams,
    reactor: Box<dyn Reactor>,
    stack: Vec<GrowthTask>,
}

impl GrowthEngine {
    /// Create an engine. Parameters are assumed valid; use
    /// [`GrowthEngine::from_config`] to validate first.
    pub fn new(kinetics: KineticParams, reactor: Box<dyn Reactor>) -> Self {
        Self {
            kinetics,
            reactor,
            stack: Vec::new(),
        }
    }

    /// Validate `config` and build an engine for it.
    pub fn from_config(config: &GrowthConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config.kinetics, config.reactor.build()))
    }

    /// Kinetic parameters.
    pub fn kinetics(&self) -> &KineticParams {
        &self.kinetics
    }

    /// Reactor model.
    pub fn reactor(&self) -> &dyn Reactor {
        self.reactor.as_ref()
    }

    /// Event rates for a chain born at `birth`.
    pub fn rates(&self, birth: f64) -> EventRates {
        let exposure = self.reactor.exposure(birth);
        let transfer = self.kinetics.branching * self.reactor.polymer_ratio(birth);
        let stop = self.kinetics.tau + transfer;
        EventRates {
            stop,
            branch: self.kinetics.branching * exposure,
            scission: self.kinetics.scission * exposure,
            attach_probability: transfer / stop,
        }
    }

    /// Grow one molecule into `arena`, which is reset first.
    ///
    /// Returns a `Complete` molecule, or
    /// [`GrowthError::ArenaExhausted`] if it needed more arms than the
    /// arena holds. An aborted molecule is discarded; the arena keeps its
    /// arms until the next reset but nothing refers to them.
    pub fn grow(
        &mut self,
        arena: &mut ArmArena,
        rng: &mut SubtractiveRng,
    ) -> Result<BranchedPolymer, GrowthError> {
        arena.reset();
        self.stack.clear();
        let mut polymer = BranchedPolymer::new();

        let origin = self.reactor.sample_origin(rng.next_f64());
        let (first, second) = request_pair(arena)?;
        link::join_origin(arena, first, second);
        arena.arm_mut(first).conversion = origin;
        arena.arm_mut(second).conversion = origin;
        polymer.begin_growth(first)?;

        self.stack.push(GrowthTask {
            arm: second,
            birth: origin,
            heading: Heading::TowardStart,
        });
        self.stack.push(GrowthTask {
            arm: first,
            birth: origin,
            heading: Heading::TowardEnd,
        });

        while let Some(task) = self.stack.pop() {
            if let Err(err) = self.grow_arm(arena, rng, task) {
                self.stack.clear();
                polymer.mark_aborted()?;
                debug!(
                    capacity = arena.capacity(),
                    allocated = arena.allocated(),
                    "molecule aborted"
                );
                return Err(err);
            }
        }

        polymer.mark_complete(arena.allocated())?;
        debug!(arms = polymer.arm_count, origin, "molecule grown");
        Ok(polymer)
    }

    fn grow_arm(
        &mut self,
        arena: &mut ArmArena,
        rng: &mut SubtractiveRng,
        task: GrowthTask,
    ) -> Result<(), GrowthError> {
        let rates = self.rates(task.birth);
        let total = rates.total();
        let length = -(1.0 - rng.next_f64()).ln() / total;
        arena.arm_mut(task.arm).length = length;

        let pick = rng.next_f64() * total;
        let event = if pick < rates.branch {
            ArmEnd::Branch
        } else if pick < rates.branch + rates.scission {
            ArmEnd::Scission
        } else if task.heading == Heading::TowardStart
            && rng.next_f64() < rates.attach_probability
        {
            ArmEnd::HostAttach
        } else {
            ArmEnd::Free
        };
        trace!(arm = task.arm.0, length, ?event, heading = ?task.heading, "arm grown");

        match event {
            ArmEnd::Branch => {
                let younger = self.reactor.sample_younger(task.birth, rng.next_f64());
                let (continuation, fresh) = request_pair(arena)?;
                link::attach_branch(arena, task.arm, continuation, fresh);
                arena.arm_mut(continuation).conversion = task.birth;
                arena.arm_mut(fresh).conversion = younger;
                self.stack.push(GrowthTask {
                    arm: continuation,
                    ..task
                });
                self.stack.push(GrowthTask {
                    arm: fresh,
                    birth: younger,
                    heading: Heading::TowardEnd,
                });
            }
            ArmEnd::HostAttach => {
                let host = self.reactor.sample_older(task.birth, rng.next_f64());
                let (toward_end, toward_start) = request_pair(arena)?;
                link::attach_branch(arena, task.arm, toward_end, toward_start);
                arena.arm_mut(toward_end).conversion = host;
                arena.arm_mut(toward_start).conversion = host;
                self.stack.push(GrowthTask {
                    arm: toward_start,
                    birth: host,
                    heading: Heading::TowardStart,
                });
                self.stack.push(GrowthTask {
                    arm: toward_end,
                    birth: host,
                    heading: Heading::TowardEnd,
                });
            }
            ArmEnd::Scission | ArmEnd::Free => {}
        }
        Ok(())
    }
}

/// Request both arms of a junction before linking either.
fn request_pair(arena: &mut ArmArena) -> Result<(ArmId, ArmId), GrowthError> {
    match (arena.request_arm(), arena.request_arm()) {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => Err(GrowthError::ArenaExhausted {
            capacity: arena.capacity(),
        }),
    }
}
