//! A-extension semantics (weakly modeled atomics).
//!
//! A single hart is simulated, so atomics reduce to plain
//! load/modify/store: LR.W is an ordinary word load, SC.W is an ordinary
//! word store that always reports success, and the AMO family is a
//! read-modify-write against the [`atomic_alu`] unit. Every AMO writes
//! the value read from memory (the pre-op value) to `rd`.

use crate::core::units::amo::{atomic_alu, AmoOp};
use crate::core::Cpu;
use crate::isa::Operands;

impl Cpu {
    /// LR.W: load the word at `[rs1]` into `rd`.
    ///
    /// No reservation is tracked; the pairing SC.W always succeeds.
    pub(crate) fn lr_w(&mut self, f: &Operands) {
        let addr = self.regs.read(f.rs1);
        let val = self.mem.read(addr);
        self.regs.write(f.rd, val);
    }

    /// SC.W: store `rs2` to `[rs1]` and report success (0) in `rd`.
    pub(crate) fn sc_w(&mut self, f: &Operands) {
        let addr = self.regs.read(f.rs1);
        let val = self.regs.read(f.rs2);
        self.mem.write(addr, val);
        self.regs.write(f.rd, 0);
    }

    /// AMO*.W: atomically load `[rs1]`, combine with `rs2`, store the
    /// result back, and write the pre-op memory value to `rd`.
    pub(crate) fn amo(&mut self, f: &Operands, op: AmoOp) {
        let addr = self.regs.read(f.rs1);
        let old = self.mem.read(addr);
        let new = atomic_alu(op, old, self.regs.read(f.rs2));
        self.mem.write(addr, new);
        self.regs.write(f.rd, old);
    }
}
