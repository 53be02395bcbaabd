//! Molecule lifecycle.

use std::fmt;

/// Lifecycle of a single simulated molecule.
///
/// ```text
/// Empty → Growing → Complete → Cleaned → Measured
///                 ↘ Aborted
/// ```
///
/// No transition skips a state. `Aborted` is terminal: the molecule ran out
/// of arena capacity and is excluded from any statistics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoleculeState {
    /// Created, no arms yet.
    Empty,
    /// Arms are being allocated and linked.
    Growing,
    /// Growth finished without exhausting the arena.
    Complete,
    /// Growth hit arena exhaustion.
    Aborted,
    /// Degree-2 junctions have been removed.
    Cleaned,
    /// Observables have been computed.
    Measured,
}

impl fmt::Display for MoleculeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Empty => "empty",
            Self::Growing => "growing",
            Self::Complete => "complete",
            Self::Aborted => "aborted",
            Self::Cleaned => "cleaned",
            Self::Measured => "measured",
        };
        f.write_str(name)
    }
}
