//! # bounded-dispatch
//!
//! Bounds-clipped 2D kernel dispatch with output-region verification.
//!
//! A kernel is dispatched over an active sub-rectangle of a 2D domain. The
//! verifier then scans the whole output buffer: active cells must hold the
//! reference value `x + y * dim_x` and every clipped cell must still hold
//! the zero sentinel. A non-zero clipped cell is an out-of-bounds write.
//!
//! ## Modules
//!
//! - [`domain`] — Domain, active region, and launch-option clipping
//! - [`buffer`] — Zero-initialised row-major output grid
//! - [`kernel`] — Per-cell kernels and the [`kernel::CellKernel`] trait
//! - [`runtime`] — Allocation, clipped dispatch, read-back; CPU backends
//! - [`verifier`] — The configure/dispatch/verify state machine
//! - [`report`] — Structured mismatch reports
//! - [`reporter`] — Pass/fail signalling to the harness
//! - [`case`] — YAML dispatch-case files

pub mod buffer;
pub mod case;
pub mod domain;
pub mod error;
pub mod kernel;
pub mod report;
pub mod reporter;
pub mod runtime;
pub mod verifier;

pub use error::DispatchError;
pub use verifier::{BoundedDispatchVerifier, VerifierState};
