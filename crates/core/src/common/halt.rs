//! Simulation stop signal.
//!
//! This module defines the halt mechanism of the engine. It provides:
//! 1. **Halt Representation:** The reasons an instruction can terminate simulation.
//! 2. **Error Handling:** Integration with standard Rust error traits so hosts
//!    can propagate the signal with `?`.
//!
//! A `Halt` is not a failure of the engine: ECALL and EBREAK are the normal
//! way a guest program ends. The host stops calling `step` once it sees one.

use std::fmt;

/// Reasons the engine stops the simulation.
///
/// Returned as the `Err` arm of [`crate::core::Cpu::step`]. Arithmetic edge
/// cases (divide by zero, signed overflow) never halt; they produce the
/// ISA-defined result values instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Halt {
    /// Environment call (`ECALL`): the guest requested host services.
    EnvironmentCall,

    /// Breakpoint (`EBREAK`): the guest hit a debugger trap.
    Breakpoint,

    /// Square root of a negative operand.
    ///
    /// The invalid-operation flag is raised before the halt is reported.
    /// The associated value is the raw bit pattern of the offending operand.
    InvalidSquareRoot(u64),
}

impl fmt::Display for Halt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Halt::EnvironmentCall => write!(f, "EnvironmentCall"),
            Halt::Breakpoint => write!(f, "Breakpoint"),
            Halt::InvalidSquareRoot(bits) => write!(f, "InvalidSquareRoot({:#x})", bits),
        }
    }
}

impl std::error::Error for Halt {}
