//! D-extension semantics (double precision).
//!
//! Doubles occupy the full 64 bits of an FP register. FLD and FSD move
//! the value as two adjacent 32-bit memory words, low word first, which
//! matches the little-endian memory collaborator. NaN, comparison, and
//! square-root policies mirror the single-precision module.

use log::debug;

use crate::arch::csr::FFLAG_NV;
use crate::common::Halt;
use crate::core::units::fpu::nan_handling::{canonicalize_f32, canonicalize_f64, fmax_f64, fmin_f64};
use crate::core::units::fpu::{cvt_w_d, cvt_wu_d};
use crate::core::Cpu;
use crate::isa::Operands;

/// Bit mask for the sign bit in a 64-bit IEEE 754 float.
const F64_SIGN_BIT: u64 = 0x8000_0000_0000_0000;

impl Cpu {
    /// FLD: load a 64-bit pattern as two adjacent words, low word first.
    pub(crate) fn fld(&mut self, f: &Operands) {
        let addr = self.ea_load(f);
        let lo = self.mem.read(addr) as u64;
        let hi = self.mem.read(addr.wrapping_add(4)) as u64;
        self.fregs.write(f.rd, (hi << 32) | lo);
    }

    /// FSD: store a 64-bit pattern as two adjacent words, low word first.
    pub(crate) fn fsd(&mut self, f: &Operands) {
        let addr = self.ea_store(f);
        let bits = self.fregs.read(f.rs2);
        self.mem.write(addr, bits as u32);
        self.mem.write(addr.wrapping_add(4), (bits >> 32) as u32);
    }

    /// Two-operand double-precision arithmetic: `rd <- op(rs1, rs2)`.
    pub(crate) fn fp_bin_d(&mut self, f: &Operands, op: fn(f64, f64) -> f64) {
        let a = self.fregs.read_f64(f.rs1);
        let b = self.fregs.read_f64(f.rs2);
        self.fregs.write_f64(f.rd, canonicalize_f64(op(a, b)));
    }

    /// Fused multiply-add family: `rd <- op(rs1, rs2, rs3)`.
    pub(crate) fn fp_fma_d(&mut self, f: &Operands, op: fn(f64, f64, f64) -> f64) {
        let a = self.fregs.read_f64(f.rs1);
        let b = self.fregs.read_f64(f.rs2);
        let c = self.fregs.read_f64(f.rs3);
        self.fregs.write_f64(f.rd, canonicalize_f64(op(a, b, c)));
    }

    /// FSQRT.D: square root; a negative operand raises invalid and halts.
    pub(crate) fn fsqrt_d(&mut self, f: &Operands) -> Result<(), Halt> {
        let a = self.fregs.read_f64(f.rs1);
        if a < 0.0 {
            debug!("invalid operation: FSQRT.D of {}", a);
            self.csrs.raise_fflags(FFLAG_NV);
            return Err(Halt::InvalidSquareRoot(a.to_bits()));
        }
        self.fregs.write_f64(f.rd, canonicalize_f64(a.sqrt()));
        Ok(())
    }

    /// FMIN.D: IEEE 754-2008 minNum.
    pub(crate) fn fmin_d(&mut self, f: &Operands) {
        let a = self.fregs.read_f64(f.rs1);
        let b = self.fregs.read_f64(f.rs2);
        self.fregs.write_f64(f.rd, fmin_f64(a, b));
    }

    /// FMAX.D: IEEE 754-2008 maxNum.
    pub(crate) fn fmax_d(&mut self, f: &Operands) {
        let a = self.fregs.read_f64(f.rs1);
        let b = self.fregs.read_f64(f.rs2);
        self.fregs.write_f64(f.rd, fmax_f64(a, b));
    }

    /// FSGNJ.D: magnitude of `rs1`, sign of `rs2`.
    pub(crate) fn fsgnj_d(&mut self, f: &Operands) {
        let a = self.fregs.read(f.rs1);
        let b = self.fregs.read(f.rs2);
        self.fregs
            .write(f.rd, (a & !F64_SIGN_BIT) | (b & F64_SIGN_BIT));
    }

    /// FSGNJN.D: magnitude of `rs1`, negated sign of `rs2`.
    pub(crate) fn fsgnjn_d(&mut self, f: &Operands) {
        let a = self.fregs.read(f.rs1);
        let b = self.fregs.read(f.rs2);
        self.fregs
            .write(f.rd, (a & !F64_SIGN_BIT) | (!b & F64_SIGN_BIT));
    }

    /// FSGNJX.D: magnitude of `rs1`, sign `rs1.sign XOR rs2.sign`.
    pub(crate) fn fsgnjx_d(&mut self, f: &Operands) {
        let a = self.fregs.read(f.rs1);
        let b = self.fregs.read(f.rs2);
        self.fregs.write(f.rd, a ^ (b & F64_SIGN_BIT));
    }

    /// FEQ.D / FLT.D / FLE.D: 0/1 result; a NaN operand yields 0 and
    /// raises the invalid-operation flag.
    pub(crate) fn fp_cmp_d(&mut self, f: &Operands, op: fn(f64, f64) -> bool) {
        let a = self.fregs.read_f64(f.rs1);
        let b = self.fregs.read_f64(f.rs2);
        if a.is_nan() || b.is_nan() {
            debug!("invalid operation: NaN comparison");
            self.csrs.raise_fflags(FFLAG_NV);
            self.regs.write(f.rd, 0);
        } else {
            self.regs.write(f.rd, op(a, b) as u32);
        }
    }

    /// FCVT.W.D: double to signed word, rounded to nearest.
    pub(crate) fn fcvt_w_d(&mut self, f: &Operands) {
        let a = self.fregs.read_f64(f.rs1);
        self.regs.write(f.rd, cvt_w_d(a) as u32);
    }

    /// FCVT.WU.D: double to unsigned word, truncated.
    pub(crate) fn fcvt_wu_d(&mut self, f: &Operands) {
        let a = self.fregs.read_f64(f.rs1);
        self.regs.write(f.rd, cvt_wu_d(a));
    }

    /// FCVT.D.W: signed word to double.
    pub(crate) fn fcvt_d_w(&mut self, f: &Operands) {
        let a = self.regs.read(f.rs1) as i32;
        self.fregs.write_f64(f.rd, a as f64);
    }

    /// FCVT.D.WU: unsigned word to double.
    pub(crate) fn fcvt_d_wu(&mut self, f: &Operands) {
        let a = self.regs.read(f.rs1);
        self.fregs.write_f64(f.rd, a as f64);
    }

    /// FCVT.S.D: narrow a double to single.
    pub(crate) fn fcvt_s_d(&mut self, f: &Operands) {
        let a = self.fregs.read_f64(f.rs1);
        self.fregs.write_f32(f.rd, canonicalize_f32(a as f32));
    }

    /// FCVT.D.S: widen a single to double.
    pub(crate) fn fcvt_d_s(&mut self, f: &Operands) {
        let a = self.fregs.read_f32(f.rs1);
        self.fregs.write_f64(f.rd, canonicalize_f64(a as f64));
    }

    /// FMV.D: copy a double between FP registers.
    pub(crate) fn fmv_d(&mut self, f: &Operands) {
        let bits = self.fregs.read(f.rs1);
        self.fregs.write(f.rd, bits);
    }
}
