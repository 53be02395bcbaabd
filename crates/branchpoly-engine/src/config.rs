//! Growth and ensemble configuration, validation, and error types.
//!
//! All parameters are checked by `validate()` before any arm is
//! allocated. Invalid input never reaches the growth loop.

use branchpoly_arena::ArmArena;
use thiserror::Error;

// ── KineticParams ──────────────────────────────────────────────────

/// Dimensionless rate ratios, each relative to the propagation rate.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct KineticParams {
    /// Chain-stopping events per propagation step that leave a free end:
    /// transfer to monomer or solvent plus termination by
    /// disproportionation. Must be positive. Default: 1e-3.
    pub tau: f64,
    /// Transfer-to-polymer constant. Each event starts a new chain on an
    /// existing one, creating a long-chain branch. Default: 1e-4.
    pub branching: f64,
    /// Radical-induced scission constant. Default: 0.
    pub scission: f64,
}

impl Default for KineticParams {
    fn default() -> Self {
        Self {
            tau: 1e-3,
            branching: 1e-4,
            scission: 0.0,
        }
    }
}

impl KineticParams {
    /// Check every ratio is finite, non-negative, and that chains can end.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("tau", self.tau),
            ("branching", self.branching),
            ("scission", self.scission),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
            if value < 0.0 {
                return Err(ConfigError::NegativeRate { field, value });
            }
        }
        if self.tau <= 0.0 {
            return Err(ConfigError::NonPositiveStopRate { value: self.tau });
        }
        Ok(())
    }
}

// ── ReactorKind ────────────────────────────────────────────────────

/// Reactor type and its operating point.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReactorKind {
    /// Batch reactor run to `final_conversion`.
    Batch {
        /// Fraction of monomer converted at the end of the run, in (0, 1).
        final_conversion: f64,
    },
    /// Continuous stirred-tank reactor at steady state.
    Cstr {
        /// Steady-state conversion, in (0, 1).
        conversion: f64,
    },
}

impl Default for ReactorKind {
    fn default() -> Self {
        Self::Batch {
            final_conversion: 0.5,
        }
    }
}

impl ReactorKind {
    /// The operating conversion.
    pub fn conversion(&self) -> f64 {
        match *self {
            Self::Batch { final_conversion } => final_conversion,
            Self::Cstr { conversion } => conversion,
        }
    }

    /// Check the conversion lies strictly inside (0, 1).
    pub fn validate(&self) -> Result<(), ConfigError> {
        let value = self.conversion();
        if !value.is_finite() {
            return Err(ConfigError::NonFinite {
                field: "conversion",
                value,
            });
        }
        if value <= 0.0 || value >= 1.0 {
            return Err(ConfigError::ConversionOutOfRange { value });
        }
        Ok(())
    }
}

// ── GrowthConfig ───────────────────────────────────────────────────

/// Everything needed to grow molecules with one [`Simulator`].
///
/// [`Simulator`]: crate::Simulator
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GrowthConfig {
    /// Rate ratios.
    pub kinetics: KineticParams,
    /// Reactor and operating conversion.
    pub reactor: ReactorKind,
    /// Maximum arms per molecule. Molecules that need more are aborted.
    /// At most [`ArmArena::MAX_CAPACITY`]. Default: 100_000.
    pub arena_capacity: usize,
    /// Generator seed. Non-positive values rebuild the generator state.
    /// Default: -1.
    pub seed: i64,
}

impl GrowthConfig {
    /// Default arena capacity.
    pub const DEFAULT_ARENA_CAPACITY: usize = 100_000;

    /// Validate kinetics, reactor and capacity.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.kinetics.validate()?;
        self.reactor.validate()?;
        if self.arena_capacity == 0 {
            return Err(ConfigError::NonPositiveCapacity);
        }
        if self.arena_capacity > ArmArena::MAX_CAPACITY {
            return Err(ConfigError::CapacityTooLarge {
                value: self.arena_capacity,
                max: ArmArena::MAX_CAPACITY,
            });
        }
        Ok(())
    }
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            kinetics: KineticParams::default(),
            reactor: ReactorKind::default(),
            arena_capacity: Self::DEFAULT_ARENA_CAPACITY,
            seed: -1,
        }
    }
}

// ── EnsembleConfig ─────────────────────────────────────────────────

/// Configuration for [`run_ensemble`](crate::run_ensemble).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnsembleConfig {
    /// Per-molecule growth settings. `growth.seed` is ignored; molecule
    /// `i` is seeded from `base_seed` and `i`.
    pub growth: GrowthConfig,
    /// Number of molecules to attempt.
    pub molecules: usize,
    /// Worker threads. `None` = `available_parallelism`, clamped to
    /// `[1, 64]`.
    pub workers: Option<usize>,
    /// Key for the per-molecule seed stream.
    pub base_seed: u64,
}

impl EnsembleConfig {
    /// Validate growth settings and molecule count.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.growth.validate()?;
        if self.molecules == 0 {
            return Err(ConfigError::NoMolecules);
        }
        Ok(())
    }

    /// Resolve the worker count, never more than there are molecules.
    pub fn resolved_worker_count(&self) -> usize {
        let requested = match self.workers {
            Some(n) => n.clamp(1, 64),
            None => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
                .clamp(1, 64),
        };
        requested.min(self.molecules.max(1))
    }
}

impl Default for EnsembleConfig {
    fn default() -> Self {
        Self {
            growth: GrowthConfig::default(),
            molecules: 1000,
            workers: None,
            base_seed: 0,
        }
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Parameters outside their valid domain.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// A parameter is NaN or infinite.
    #[error("{field} must be finite, got {value}")]
    NonFinite {
        /// Offending field.
        field: &'static str,
        /// Its value.
        value: f64,
    },
    /// A rate ratio is negative.
    #[error("{field} must be >= 0, got {value}")]
    NegativeRate {
        /// Offending field.
        field: &'static str,
        /// Its value.
        value: f64,
    },
    /// `tau` is zero, so linear chains would never end.
    #[error("tau must be > 0, got {value}")]
    NonPositiveStopRate {
        /// The configured tau.
        value: f64,
    },
    /// Conversion outside (0, 1).
    #[error("conversion must lie in (0, 1), got {value}")]
    ConversionOutOfRange {
        /// The configured conversion.
        value: f64,
    },
    /// Arena capacity of zero.
    #[error("arena capacity must be > 0")]
    NonPositiveCapacity,
    /// Arena capacity beyond the range of arm ids.
    #[error("arena capacity {value} exceeds the maximum of {max}")]
    CapacityTooLarge {
        /// The configured capacity.
        value: usize,
        /// Largest accepted capacity.
        max: usize,
    },
    /// Ensemble of zero molecules.
    #[error("ensemble must request at least one molecule")]
    NoMolecules,
}
