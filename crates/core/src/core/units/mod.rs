//! Pure compute units.
//!
//! Stateless helpers the execution modules dispatch into:
//! - [`alu`]: integer arithmetic, logic, and shifts (I and M extensions).
//! - [`amo`]: read-modify-write arithmetic for atomic memory operations.
//! - [`fpu`]: NaN handling and conversion helpers for the F and D extensions.

/// Integer arithmetic-logic unit.
pub mod alu;

/// Atomic memory operation ALU.
pub mod amo;

/// Floating-point helpers.
pub mod fpu;
