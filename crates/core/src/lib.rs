//! RV32 functional instruction-set simulator core.
//!
//! This crate implements the execution engine of an RV32IMAFD+V functional
//! simulator with the following:
//! 1. **Architectural state:** GPR, FPR, vector, and CSR register files plus the program counter.
//! 2. **Semantics:** Bit-exact per-instruction behavior for the I, M, A, F, D, Zicsr, and V extensions.
//! 3. **Control:** Branch/jump logic under a pre-incremented-PC convention, and the halt signal.
//! 4. **Collaborator contracts:** The byte-addressable `Memory` trait and the decoded-operand bundle.
//!
//! Fetch, decode, and program loading belong to the host: it decodes each
//! instruction into an [`isa::Instr`] and drives [`core::Cpu::step`] until
//! the engine reports a [`common::halt::Halt`].

/// Common types and constants (halt signal, architectural widths).
pub mod common;
/// Simulator configuration (defaults and deserializable structure).
pub mod config;
/// Architectural register files (integer, floating-point, vector, CSR).
pub mod arch;
/// Instruction set (opcode enumeration, decoded operand fields).
pub mod isa;
/// Execution engine (CPU state, dispatcher, per-extension semantics, compute units).
pub mod core;
/// Byte-addressable memory collaborator contract and a flat RAM implementation.
pub mod mem;
/// Retired-instruction statistics collection.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Main CPU type; holds the architectural state and the memory collaborator.
pub use crate::core::Cpu;
/// Decoded instruction handed to the engine by the host decoder.
pub use crate::isa::Instr;
