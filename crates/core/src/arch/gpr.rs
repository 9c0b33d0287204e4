//! General-Purpose Register File.
//!
//! This module implements the RV32 integer register file. It performs the
//! following:
//! 1. **Storage:** Maintains 32 integer registers (`x0`-`x31`).
//! 2. **Invariant Enforcement:** Ensures that register `x0` is hardwired to zero.
//! 3. **Debugging:** Provides a utility for dumping the complete register state.

use crate::common::constants::NUM_REGS;

/// General-Purpose Register file.
///
/// Contains 32 general-purpose registers used for integer operations.
/// Register `x0` is hardwired to zero and cannot be modified.
pub struct Gpr {
    regs: [u32; NUM_REGS],
}

impl Default for Gpr {
    fn default() -> Self {
        Self::new()
    }
}

impl Gpr {
    /// Creates a new register file with all registers initialized to zero.
    pub fn new() -> Self {
        Self {
            regs: [0; NUM_REGS],
        }
    }

    /// Reads a general-purpose register value.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31). Register `x0` always returns 0.
    ///
    /// # Returns
    ///
    /// The 32-bit value stored in the specified register.
    pub fn read(&self, idx: usize) -> u32 {
        if idx == 0 { 0 } else { self.regs[idx] }
    }

    /// Writes a value to a general-purpose register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31). Writes to `x0` are ignored.
    /// * `val` - The 32-bit value to write.
    pub fn write(&mut self, idx: usize, val: u32) {
        if idx != 0 {
            self.regs[idx] = val;
        }
    }

    /// Forces `x0` back to zero.
    ///
    /// The dispatcher calls this after every retired instruction so the
    /// hardwired-zero invariant holds even if a semantic body wrote the
    /// slot directly.
    pub fn reset_zero(&mut self) {
        self.regs[0] = 0;
    }

    /// Dumps the contents of all general-purpose registers to stdout.
    pub fn dump(&self) {
        for i in (0..NUM_REGS).step_by(2) {
            println!(
                "x{:<2}={:#010x} x{:<2}={:#010x}",
                i,
                self.regs[i],
                i + 1,
                self.regs[i + 1]
            );
        }
    }
}
