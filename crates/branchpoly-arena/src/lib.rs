//! Arm storage for branchpoly molecules.
//!
//! Every arm of a molecule lives in an [`ArmArena`]: a fixed-capacity
//! pool with a bump cursor. Arms are never freed individually. Between
//! molecules the arena is [`reset`](ArmArena::reset) and its storage is
//! reused, so growing many molecules does not touch the heap once the
//! pool has been reserved.
//!
//! ```text
//! ArmArena
//! ├── arms: Vec<Arm>      (capacity slots, reused across molecules)
//! ├── cursor              (next free slot)
//! └── arms_available      (false once a request has failed)
//! ```
//!
//! Running out of arms is not an error at this level. [`request_arm`]
//! returns `None` and the caller decides what "ran out of material"
//! means for the molecule in progress.
//!
//! [`request_arm`]: ArmArena::request_arm

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arena;
pub mod arm;

pub use arena::ArmArena;
pub use arm::Arm;
