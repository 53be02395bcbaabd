//! Branched-polymer topologies built from arena arms.
//!
//! A molecule is a tree of arms joined at three-way junctions, plus an
//! independent `up`/`down` ring that visits every arm once. This crate
//! owns everything that reads or rewrites that structure:
//!
//! - [`link`]: joining arm ends into junctions and splicing the ring;
//! - [`validate`]: structural invariant checks (reciprocity, ring
//!   closure, tree shape);
//! - [`cleanup`]: removal of degree-2 pass-through junctions;
//! - [`moments`]: total length, radius of gyration and g-factor.
//!
//! [`BranchedPolymer`] carries the per-molecule scalars and enforces the
//! lifecycle `Empty → Growing → Complete → Cleaned → Measured`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cleanup;
pub mod link;
pub mod moments;
pub mod polymer;
pub mod validate;

pub use cleanup::{cleanup, CleanupReport};
pub use moments::{measure, Moments};
pub use polymer::{renumber, BranchedPolymer, RingIter};
pub use validate::{validate_topology, TopologyCensus};
