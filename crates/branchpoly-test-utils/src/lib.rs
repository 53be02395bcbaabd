//! Test utilities for branchpoly development.
//!
//! Provides hand-built molecules with known observables, for checking the
//! cleanup and moment code independently of stochastic growth. See
//! [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{comb, linear_chain, origin_pair, regular_star, regular_star_g};

/// Assert `actual` is within `tol` of `expected`.
#[track_caller]
pub fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "expected {expected} ± {tol}, got {actual}"
    );
}
