//! RV32I base integer semantics.
//!
//! Implements the register, immediate, upper-immediate, jump, branch,
//! load/store, and system instructions of the base ISA, plus the
//! counter pseudo-instructions. The register and immediate ALU forms
//! also serve the M extension: the dispatcher routes its opcodes through
//! [`Cpu::op_reg`] with the multiply/divide [`AluOp`] variants.
//!
//! PC convention: the dispatcher has already added 4 when these bodies
//! run, so `self.pc` is the address of the *next* instruction. Bodies
//! that need the address of the instruction itself (AUIPC, JAL,
//! branches) compute `self.pc - 4`.

use log::debug;

use crate::common::Halt;
use crate::core::units::alu::{Alu, AluOp};
use crate::core::Cpu;
use crate::isa::Operands;

impl Cpu {
    /// Register-register ALU form: `rd <- op(rs1, rs2)`.
    pub(crate) fn op_reg(&mut self, f: &Operands, op: AluOp) {
        let a = self.regs.read(f.rs1);
        let b = self.regs.read(f.rs2);
        self.regs.write(f.rd, Alu::execute(op, a, b));
    }

    /// Register-immediate ALU form: `rd <- op(rs1, sext(imm))`.
    ///
    /// SLTIU also comes through here: the immediate is sign-extended
    /// first and the comparison then treats it as unsigned.
    pub(crate) fn op_imm(&mut self, f: &Operands, op: AluOp) {
        let a = self.regs.read(f.rs1);
        self.regs.write(f.rd, Alu::execute(op, a, f.imm_i() as u32));
    }

    /// Shift-immediate form: `rd <- op(rs1, shamt)` with shamt in 0..32.
    pub(crate) fn op_shamt(&mut self, f: &Operands, op: AluOp) {
        let a = self.regs.read(f.rs1);
        self.regs.write(f.rd, Alu::execute(op, a, f.shamt()));
    }

    /// LUI: `rd <- imm << 12`.
    pub(crate) fn lui(&mut self, f: &Operands) {
        self.regs.write(f.rd, f.imm_u());
    }

    /// AUIPC: `rd <- pc_of_instruction + (imm << 12)`.
    pub(crate) fn auipc(&mut self, f: &Operands) {
        let base = self.pc.wrapping_sub(4);
        self.regs.write(f.rd, base.wrapping_add(f.imm_u()));
    }

    /// JAL: link the incremented PC, then jump relative to the
    /// instruction's own address.
    pub(crate) fn jal(&mut self, f: &Operands) {
        let target = self.pc.wrapping_sub(4).wrapping_add(f.imm_j() as u32);
        if f.rd != 0 {
            self.regs.write(f.rd, self.pc);
        }
        self.pc = target;
    }

    /// JALR: link the incremented PC, then jump to `(rs1 + imm) & !1`.
    pub(crate) fn jalr(&mut self, f: &Operands) {
        let target = self.regs.read(f.rs1).wrapping_add(f.imm_i() as u32) & !1;
        if f.rd != 0 {
            self.regs.write(f.rd, self.pc);
        }
        self.pc = target;
    }

    /// Redirects the PC to the branch target when `taken` holds.
    fn branch(&mut self, f: &Operands, taken: bool) {
        if taken {
            self.pc = self.pc.wrapping_sub(4).wrapping_add(f.imm_b() as u32);
            debug!("branch taken to {:#010x}", self.pc);
        }
    }

    /// BEQ: branch if `rs1 == rs2`.
    pub(crate) fn beq(&mut self, f: &Operands) {
        let taken = self.regs.read(f.rs1) == self.regs.read(f.rs2);
        self.branch(f, taken);
    }

    /// BNE: branch if `rs1 != rs2`.
    pub(crate) fn bne(&mut self, f: &Operands) {
        let taken = self.regs.read(f.rs1) != self.regs.read(f.rs2);
        self.branch(f, taken);
    }

    /// BLT: branch if `rs1 < rs2` (signed).
    pub(crate) fn blt(&mut self, f: &Operands) {
        let taken = (self.regs.read(f.rs1) as i32) < (self.regs.read(f.rs2) as i32);
        self.branch(f, taken);
    }

    /// BGE: branch if `rs1 >= rs2` (signed).
    pub(crate) fn bge(&mut self, f: &Operands) {
        let taken = (self.regs.read(f.rs1) as i32) >= (self.regs.read(f.rs2) as i32);
        self.branch(f, taken);
    }

    /// BLTU: branch if `rs1 < rs2` (unsigned).
    pub(crate) fn bltu(&mut self, f: &Operands) {
        let taken = self.regs.read(f.rs1) < self.regs.read(f.rs2);
        self.branch(f, taken);
    }

    /// BGEU: branch if `rs1 >= rs2` (unsigned).
    pub(crate) fn bgeu(&mut self, f: &Operands) {
        let taken = self.regs.read(f.rs1) >= self.regs.read(f.rs2);
        self.branch(f, taken);
    }

    /// Effective address of the I-type memory forms: `rs1 + sext(imm)`.
    pub(crate) fn ea_load(&self, f: &Operands) -> u32 {
        self.regs.read(f.rs1).wrapping_add(f.imm_i() as u32)
    }

    /// Effective address of the S-type memory forms: `rs1 + sext(imm)`.
    pub(crate) fn ea_store(&self, f: &Operands) -> u32 {
        self.regs.read(f.rs1).wrapping_add(f.imm_s() as u32)
    }

    /// LB: load byte, sign-extended.
    pub(crate) fn lb(&mut self, f: &Operands) {
        let addr = self.ea_load(f);
        let byte = self.mem.read_byte(addr);
        self.regs.write(f.rd, byte as i8 as i32 as u32);
    }

    /// LH: load half-word, sign-extended.
    pub(crate) fn lh(&mut self, f: &Operands) {
        let addr = self.ea_load(f);
        let half = self.mem.read_half(addr);
        self.regs.write(f.rd, half as i16 as i32 as u32);
    }

    /// LW: load word.
    pub(crate) fn lw(&mut self, f: &Operands) {
        let addr = self.ea_load(f);
        let word = self.mem.read(addr);
        self.regs.write(f.rd, word);
    }

    /// LBU: load byte, zero-extended.
    pub(crate) fn lbu(&mut self, f: &Operands) {
        let addr = self.ea_load(f);
        let byte = self.mem.read_byte(addr);
        self.regs.write(f.rd, byte as u32);
    }

    /// LHU: load half-word, zero-extended.
    pub(crate) fn lhu(&mut self, f: &Operands) {
        let addr = self.ea_load(f);
        let half = self.mem.read_half(addr);
        self.regs.write(f.rd, half as u32);
    }

    /// SB: store the low byte of `rs2`.
    pub(crate) fn sb(&mut self, f: &Operands) {
        let addr = self.ea_store(f);
        let val = self.regs.read(f.rs2) as u8;
        self.mem.write_byte(addr, val);
    }

    /// SH: store the low half-word of `rs2`.
    pub(crate) fn sh(&mut self, f: &Operands) {
        let addr = self.ea_store(f);
        let val = self.regs.read(f.rs2) as u16;
        self.mem.write_half(addr, val);
    }

    /// SW: store `rs2`.
    pub(crate) fn sw(&mut self, f: &Operands) {
        let addr = self.ea_store(f);
        let val = self.regs.read(f.rs2);
        self.mem.write(addr, val);
    }

    /// FENCE / FENCE.I: no-ops in this single-hart, in-order model.
    pub(crate) fn fence(&mut self) {}

    /// ECALL: report the environment-call halt to the host.
    pub(crate) fn ecall(&mut self) -> Result<(), Halt> {
        debug!("environment call at {:#010x}", self.pc.wrapping_sub(4));
        Err(Halt::EnvironmentCall)
    }

    /// EBREAK: report the breakpoint halt to the host.
    pub(crate) fn ebreak(&mut self) -> Result<(), Halt> {
        debug!("breakpoint at {:#010x}", self.pc.wrapping_sub(4));
        Err(Halt::Breakpoint)
    }

    /// RDCYCLE / RDTIME / RDINSTRET: read the retired-instruction count.
    ///
    /// A functional model retires one instruction per cycle, so all three
    /// counters alias the same value.
    pub(crate) fn read_counter(&mut self, f: &Operands) {
        self.regs.write(f.rd, self.stats.instructions_retired as u32);
    }

    /// RDCYCLEH / RDTIMEH / RDINSTRETH: high counter words read zero.
    pub(crate) fn read_counter_high(&mut self, f: &Operands) {
        self.regs.write(f.rd, 0);
    }
}
