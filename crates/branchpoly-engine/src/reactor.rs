//! Reactor kinetics: how exposure to branching and chain-start times are
//! distributed in each reactor type.
//!
//! Every chain carries a *birth coordinate*: the conversion at which it
//! was started in a batch reactor, or its age in mean residence times in
//! a CSTR. A [`Reactor`] turns birth coordinates into the quantities the
//! growth loop needs and samples new birth coordinates for the chains a
//! branching event links to.

use std::fmt;

use crate::config::ReactorKind;

/// Birth-coordinate kinetics of one reactor type.
///
/// All sampling methods take a uniform deviate in `[0, 1)` so the caller
/// controls the order of draws from the generator.
pub trait Reactor: Send + Sync + fmt::Debug {
    /// Human-readable name, used in logs.
    fn name(&self) -> &str;

    /// Integrated polymer exposure after birth, per unit of transfer
    /// constant. Scales the branch and scission densities along a chain
    /// born at `birth`.
    fn exposure(&self, birth: f64) -> f64;

    /// Polymer-to-monomer ratio seen by a chain while it grows.
    fn polymer_ratio(&self, birth: f64) -> f64;

    /// Birth coordinate of a randomly chosen chain.
    fn sample_origin(&self, u: f64) -> f64;

    /// Birth of a chain started on an existing chain born at `birth`.
    fn sample_younger(&self, birth: f64, u: f64) -> f64;

    /// Birth of the older chain a growing chain born at `birth` started on.
    fn sample_older(&self, birth: f64, u: f64) -> f64;
}

// ── Batch ──────────────────────────────────────────────────────────

/// Batch reactor run to a final conversion. Birth is the conversion at
/// which the chain grew.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BatchReactor {
    final_conversion: f64,
}

impl BatchReactor {
    /// Create a batch reactor. `final_conversion` must lie in (0, 1).
    pub fn new(final_conversion: f64) -> Self {
        Self { final_conversion }
    }

    /// Final conversion.
    pub fn final_conversion(&self) -> f64 {
        self.final_conversion
    }
}

impl Reactor for BatchReactor {
    fn name(&self) -> &str {
        "batch"
    }

    fn exposure(&self, birth: f64) -> f64 {
        ((1.0 - birth) / (1.0 - self.final_conversion)).ln().max(0.0)
    }

    fn polymer_ratio(&self, birth: f64) -> f64 {
        birth / (1.0 - birth)
    }

    fn sample_origin(&self, u: f64) -> f64 {
        self.final_conversion * u
    }

    fn sample_younger(&self, birth: f64, u: f64) -> f64 {
        // Uniform in ln(1 - x) between birth and final conversion.
        let log_remaining = (1.0 - u) * (1.0 - birth).ln() + u * (1.0 - self.final_conversion).ln();
        1.0 - log_remaining.exp()
    }

    fn sample_older(&self, birth: f64, u: f64) -> f64 {
        birth * u
    }
}

// ── CSTR ───────────────────────────────────────────────────────────

/// Continuous stirred-tank reactor at steady state. Birth is the chain's
/// age in mean residence times.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CstrReactor {
    conversion: f64,
}

impl CstrReactor {
    /// Create a CSTR. `conversion` must lie in (0, 1).
    pub fn new(conversion: f64) -> Self {
        Self { conversion }
    }

    /// Steady-state conversion.
    pub fn conversion(&self) -> f64 {
        self.conversion
    }

    fn ratio(&self) -> f64 {
        self.conversion / (1.0 - self.conversion)
    }
}

impl Reactor for CstrReactor {
    fn name(&self) -> &str {
        "cstr"
    }

    fn exposure(&self, birth: f64) -> f64 {
        birth * self.ratio()
    }

    fn polymer_ratio(&self, _birth: f64) -> f64 {
        self.ratio()
    }

    fn sample_origin(&self, u: f64) -> f64 {
        -(1.0 - u).ln()
    }

    fn sample_younger(&self, birth: f64, u: f64) -> f64 {
        birth * u
    }

    fn sample_older(&self, birth: f64, u: f64) -> f64 {
        birth - (1.0 - u).ln()
    }
}

impl ReactorKind {
    /// Build the kinetics object for this reactor.
    pub fn build(&self) -> Box<dyn Reactor> {
        match *self {
            ReactorKind::Batch { final_conversion } => Box::new(BatchReactor::new(final_conversion)),
            ReactorKind::Cstr { conversion } => Box::new(CstrReactor::new(conversion)),
        }
    }
}
