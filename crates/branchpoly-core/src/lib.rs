//! Core types for the branchpoly topology engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by every other crate in the workspace: arm
//! identifiers, the tagged [`ArmRef`] used to link arms at junctions,
//! and the error taxonomy for growth and topology failures.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod reference;
pub mod state;

pub use error::{GrowthError, TopologyError};
pub use id::ArmId;
pub use reference::{ArmRef, End};
pub use state::MoleculeState;
