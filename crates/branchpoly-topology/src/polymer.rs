//! Per-molecule record and lifecycle.

use branchpoly_arena::{Arm, ArmArena};
use branchpoly_core::{ArmId, MoleculeState, TopologyError};

/// One simulated molecule.
///
/// The arms themselves live in an [`ArmArena`]; this record holds the
/// entry point into them and the scalar observables. It stays meaningful
/// after the arena is reset, but [`first_arm`](Self::first_arm) and
/// [`arms`](Self::arms) do not.
#[derive(Clone, Debug, PartialEq)]
pub struct BranchedPolymer {
    first_arm: Option<ArmId>,
    /// Live arms (orphaned arms excluded).
    pub arm_count: usize,
    /// Three-way junctions in the cleaned tree.
    pub branch_count: usize,
    /// Sum of arm lengths.
    pub total_length: f64,
    /// Mean-square radius of gyration in units of the squared segment
    /// length. Set by measurement.
    pub mean_square_radius: Option<f64>,
    /// Contraction factor relative to a linear chain of equal mass. Set by
    /// measurement.
    pub g_factor: Option<f64>,
    state: MoleculeState,
}

impl BranchedPolymer {
    /// A molecule with no arms.
    pub fn new() -> Self {
        Self {
            first_arm: None,
            arm_count: 0,
            branch_count: 0,
            total_length: 0.0,
            mean_square_radius: None,
            g_factor: None,
            state: MoleculeState::Empty,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> MoleculeState {
        self.state
    }

    /// Entry point into the arm tree, once growth has started.
    pub fn first_arm(&self) -> Option<ArmId> {
        self.first_arm
    }

    /// Whether measurement has completed.
    pub fn is_measured(&self) -> bool {
        self.state == MoleculeState::Measured
    }

    /// `Empty → Growing`, rooting the molecule at `first`.
    pub fn begin_growth(&mut self, first: ArmId) -> Result<(), TopologyError> {
        self.require("begin_growth", &[MoleculeState::Empty])?;
        self.first_arm = Some(first);
        self.state = MoleculeState::Growing;
        Ok(())
    }

    /// `Growing → Complete` with `arm_count` arms linked.
    pub fn mark_complete(&mut self, arm_count: usize) -> Result<(), TopologyError> {
        self.require("mark_complete", &[MoleculeState::Growing])?;
        self.arm_count = arm_count;
        self.state = MoleculeState::Complete;
        Ok(())
    }

    /// `Growing → Aborted`.
    pub fn mark_aborted(&mut self) -> Result<(), TopologyError> {
        self.require("mark_aborted", &[MoleculeState::Growing])?;
        self.state = MoleculeState::Aborted;
        Ok(())
    }

    /// Root arm, or `InvalidState` for a molecule that never started.
    pub(crate) fn root(&self, operation: &'static str) -> Result<ArmId, TopologyError> {
        self.first_arm.ok_or(TopologyError::InvalidState {
            operation,
            expected: MoleculeState::Growing,
            found: self.state,
        })
    }

    pub(crate) fn require(
        &self,
        operation: &'static str,
        allowed: &[MoleculeState],
    ) -> Result<(), TopologyError> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(TopologyError::InvalidState {
                operation,
                expected: allowed[0],
                found: self.state,
            })
        }
    }

    pub(crate) fn set_state(&mut self, state: MoleculeState) {
        self.state = state;
    }

    /// Iterate the molecule's arms along the `up`/`down` ring, starting at
    /// the root.
    pub fn arms<'a>(&self, arena: &'a ArmArena) -> RingIter<'a> {
        RingIter::new(arena, self.first_arm)
    }
}

impl Default for BranchedPolymer {
    fn default() -> Self {
        Self::new()
    }
}

/// Walks the `down` links of an arm ring once.
///
/// Stops after returning to the start, or after as many steps as the
/// arena has allocated arms so a broken ring cannot loop forever.
pub struct RingIter<'a> {
    arena: &'a ArmArena,
    start: Option<ArmId>,
    next: Option<ArmId>,
    budget: usize,
}

impl<'a> RingIter<'a> {
    /// A ring walk from `start`.
    pub fn new(arena: &'a ArmArena, start: Option<ArmId>) -> Self {
        let start = start.filter(|&id| arena.contains(id));
        Self {
            arena,
            start,
            next: start,
            budget: arena.allocated(),
        }
    }
}

impl<'a> Iterator for RingIter<'a> {
    type Item = (ArmId, &'a Arm);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        if self.budget == 0 {
            self.next = None;
            return None;
        }
        self.budget -= 1;
        let arm = self.arena.get(id)?;
        let start = self.start;
        self.next = Some(arm.down).filter(|&down| Some(down) != start);
        Some((id, arm))
    }
}

/// Write `sequence_index` for every arm in ring order, starting at 0 on
/// the root. Returns the number of arms numbered.
pub fn renumber(arena: &mut ArmArena, polymer: &BranchedPolymer) -> Result<usize, TopologyError> {
    polymer.require(
        "renumber",
        &[MoleculeState::Cleaned, MoleculeState::Measured],
    )?;
    let order: Vec<ArmId> = polymer.arms(arena).map(|(id, _)| id).collect();
    for (seq, &id) in order.iter().enumerate() {
        arena.arm_mut(id).sequence_index = Some(seq as u32);
    }
    Ok(order.len())
}
