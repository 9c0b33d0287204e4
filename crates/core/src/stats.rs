//! Retired-instruction statistics.
//!
//! This module tracks what the engine has executed. It provides:
//! 1. **Retired count:** Total instructions committed, also backing the
//!    counter pseudo-instructions (RDCYCLE and friends).
//! 2. **Instruction mix:** Counts by coarse class (ALU, load, store,
//!    branch, system, atomic, FP, vector).

use crate::isa::InstrClass;

/// Simulation statistics.
///
/// One instruction retires per `step`, so in this functional model the
/// retired count doubles as the cycle count.
#[derive(Clone, Debug, Default)]
pub struct SimStats {
    /// Number of instructions committed (retired).
    pub instructions_retired: u64,

    /// Count of integer ALU instructions retired.
    pub inst_alu: u64,
    /// Count of integer load instructions retired.
    pub inst_load: u64,
    /// Count of integer store instructions retired.
    pub inst_store: u64,
    /// Count of branch/jump instructions retired.
    pub inst_branch: u64,
    /// Count of system (CSR, fence, counter, environment) instructions retired.
    pub inst_system: u64,
    /// Count of atomic memory operations retired.
    pub inst_atomic: u64,
    /// Count of floating-point load instructions retired.
    pub inst_fp_load: u64,
    /// Count of floating-point store instructions retired.
    pub inst_fp_store: u64,
    /// Count of floating-point compute/move instructions retired.
    pub inst_fp: u64,
    /// Count of vector instructions retired.
    pub inst_vector: u64,
}

impl SimStats {
    /// Creates a zeroed statistics block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one retired instruction of the given class.
    pub fn record(&mut self, class: InstrClass) {
        self.instructions_retired += 1;
        match class {
            InstrClass::Alu => self.inst_alu += 1,
            InstrClass::Load => self.inst_load += 1,
            InstrClass::Store => self.inst_store += 1,
            InstrClass::Branch => self.inst_branch += 1,
            InstrClass::System => self.inst_system += 1,
            InstrClass::Atomic => self.inst_atomic += 1,
            InstrClass::FpLoad => self.inst_fp_load += 1,
            InstrClass::FpStore => self.inst_fp_store += 1,
            InstrClass::Fp => self.inst_fp += 1,
            InstrClass::Vector => self.inst_vector += 1,
        }
    }
}
