//! Deterministic random numbers for branchpoly.
//!
//! Growth decisions are driven by [`SubtractiveRng`], a portable
//! lagged-Fibonacci generator whose output is a pure function of its seed.
//! Identical seeds reproduce identical arm topologies bit for bit, which
//! is what fixed-seed regression baselines rely on.
//!
//! Ensembles that run molecules on several workers draw per-molecule
//! seeds from a [`SeedStream`] so the result does not depend on how
//! molecules were scheduled.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod stream;
pub mod subtractive;

pub use stream::SeedStream;
pub use subtractive::SubtractiveRng;
