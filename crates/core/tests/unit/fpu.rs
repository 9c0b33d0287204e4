//! F and D extension tests.
//!
//! Covers NaN canonicalization and minNum/maxNum at the unit level, then
//! drives the instruction semantics: NaN boxing, arithmetic, fused ops,
//! sign injection, comparisons with the invalid-operation flag,
//! conversions, bit-level moves, and the FSQRT halt rule.

use crate::common::harness::TestContext;
use rv32_core::arch::csr;
use rv32_core::common::Halt;
use rv32_core::core::units::fpu::nan_handling::{
    canonicalize_f32, fmax_f32, fmin_f32, fmin_f64, CANONICAL_NAN_F32, CANONICAL_NAN_F64,
};
use rv32_core::isa::{Opcode, Operands};

/// Writes an f32 into an FP register through the FMV.S.X path.
fn set_f32(ctx: &mut TestContext, reg: usize, val: f32) {
    ctx.set_reg(31, val.to_bits());
    ctx.exec(Opcode::FmvSX, Operands::r_type(reg, 31, 0));
}

/// Reads an FP register as f32 through the FMV.X.S path.
fn get_f32(ctx: &mut TestContext, reg: usize) -> f32 {
    ctx.exec(Opcode::FmvXS, Operands::r_type(30, reg, 0));
    f32::from_bits(ctx.get_reg(30))
}

/// Writes an f64 into an FP register directly.
fn set_f64(ctx: &mut TestContext, reg: usize, val: f64) {
    ctx.cpu.fregs.write_f64(reg, val);
}

fn get_f64(ctx: &TestContext, reg: usize) -> f64 {
    ctx.cpu.fregs.read_f64(reg)
}

// ─── NaN handling unit ───────────────────────────────────────────────────────

#[test]
fn canonicalize_passes_numbers_through() {
    assert_eq!(canonicalize_f32(1.5), 1.5);
    assert_eq!(canonicalize_f32(-0.0).to_bits(), (-0.0f32).to_bits());
}

#[test]
fn canonicalize_rewrites_any_nan() {
    let payload_nan = f32::from_bits(0x7fc0_1234);
    assert_eq!(canonicalize_f32(payload_nan).to_bits(), CANONICAL_NAN_F32);
}

/// minNum: one NaN operand is treated as missing.
#[test]
fn fmin_one_nan_returns_other() {
    assert_eq!(fmin_f32(f32::NAN, 2.0), 2.0);
    assert_eq!(fmin_f32(2.0, f32::NAN), 2.0);
    assert_eq!(fmin_f64(f64::NAN, -3.5), -3.5);
}

#[test]
fn fmin_both_nan_returns_canonical() {
    assert_eq!(fmin_f32(f32::NAN, f32::NAN).to_bits(), CANONICAL_NAN_F32);
    assert_eq!(fmin_f64(f64::NAN, f64::NAN).to_bits(), CANONICAL_NAN_F64);
}

/// IEEE 754-2008 zero ordering: -0.0 < +0.0 for min, reversed for max.
#[test]
fn fmin_fmax_signed_zeros() {
    assert_eq!(fmin_f32(-0.0, 0.0).to_bits(), (-0.0f32).to_bits());
    assert_eq!(fmax_f32(-0.0, 0.0).to_bits(), (0.0f32).to_bits());
}

// ─── NaN boxing and moves ────────────────────────────────────────────────────

/// A single written to an FP register is NaN-boxed: upper half all ones.
#[test]
fn single_writes_are_nan_boxed() {
    let mut ctx = TestContext::new();
    set_f32(&mut ctx, 1, 1.0);
    let raw = ctx.cpu.fregs.read(1);
    assert_eq!(raw >> 32, 0xFFFF_FFFF);
    assert_eq!(raw as u32, 1.0f32.to_bits());
}

/// FMV.S.X then FMV.X.S round-trips an arbitrary bit pattern exactly.
#[test]
fn fmv_roundtrip_is_bit_exact() {
    let mut ctx = TestContext::new();
    let patterns = [0u32, 0x8000_0000, 0x7fc0_0001, 0xDEAD_BEEF, u32::MAX];
    for &bits in &patterns {
        ctx.set_reg(1, bits);
        ctx.exec(Opcode::FmvSX, Operands::r_type(2, 1, 0));
        ctx.exec(Opcode::FmvXS, Operands::r_type(3, 2, 0));
        assert_eq!(ctx.get_reg(3), bits, "pattern {:#x}", bits);
    }
}

#[test]
fn fmv_s_copies_within_fp_file() {
    let mut ctx = TestContext::new();
    set_f32(&mut ctx, 1, 2.75);
    ctx.exec(Opcode::FmvS, Operands::r_type(2, 1, 0));
    assert_eq!(get_f32(&mut ctx, 2), 2.75);
}

// ─── Loads and stores ────────────────────────────────────────────────────────

#[test]
fn flw_fsw_roundtrip_through_memory() {
    let mut ctx = TestContext::new();
    ctx.store_word(0x100, 3.5f32.to_bits());
    ctx.set_reg(1, 0x100);
    ctx.exec(Opcode::Flw, Operands::i_type(2, 1, 0));
    assert_eq!(get_f32(&mut ctx, 2), 3.5);

    ctx.exec(Opcode::Fsw, Operands::s_type(1, 2, 8));
    assert_eq!(ctx.load_word(0x108), 3.5f32.to_bits());
}

/// FLD composes the double from two adjacent words, low word first; FSD
/// is symmetric.
#[test]
fn fld_fsd_two_word_layout() {
    let mut ctx = TestContext::new();
    let bits = (-123.456f64).to_bits();
    ctx.store_word(0x200, bits as u32);
    ctx.store_word(0x204, (bits >> 32) as u32);
    ctx.set_reg(1, 0x200);
    ctx.exec(Opcode::Fld, Operands::i_type(2, 1, 0));
    assert_eq!(get_f64(&ctx, 2), -123.456);

    ctx.exec(Opcode::Fsd, Operands::s_type(1, 2, 16));
    assert_eq!(ctx.load_word(0x210), bits as u32);
    assert_eq!(ctx.load_word(0x214), (bits >> 32) as u32);
}

// ─── Arithmetic ──────────────────────────────────────────────────────────────

#[test]
fn fadd_s_basic() {
    let mut ctx = TestContext::new();
    set_f32(&mut ctx, 1, 2.5);
    set_f32(&mut ctx, 2, 3.25);
    ctx.exec(Opcode::FaddS, Operands::r_type(3, 1, 2));
    assert_eq!(get_f32(&mut ctx, 3), 5.75);
}

#[test]
fn fdiv_s_by_zero_is_infinite() {
    let mut ctx = TestContext::new();
    set_f32(&mut ctx, 1, 1.0);
    set_f32(&mut ctx, 2, 0.0);
    ctx.exec(Opcode::FdivS, Operands::r_type(3, 1, 2));
    assert!(get_f32(&mut ctx, 3).is_infinite());
}

/// NaN results of arithmetic come out canonical regardless of payload.
#[test]
fn arithmetic_nan_result_is_canonical() {
    let mut ctx = TestContext::new();
    set_f32(&mut ctx, 1, f32::INFINITY);
    set_f32(&mut ctx, 2, f32::NEG_INFINITY);
    ctx.exec(Opcode::FaddS, Operands::r_type(3, 1, 2));
    assert_eq!(get_f32(&mut ctx, 3).to_bits(), CANONICAL_NAN_F32);
}

#[test]
fn fadd_d_basic() {
    let mut ctx = TestContext::new();
    set_f64(&mut ctx, 1, 1.5);
    set_f64(&mut ctx, 2, 2.25);
    ctx.exec(Opcode::FaddD, Operands::r_type(3, 1, 2));
    assert_eq!(get_f64(&ctx, 3), 3.75);
}

#[test]
fn fmul_fsub_d() {
    let mut ctx = TestContext::new();
    set_f64(&mut ctx, 1, 3.0);
    set_f64(&mut ctx, 2, 0.5);
    ctx.exec(Opcode::FmulD, Operands::r_type(3, 1, 2));
    assert_eq!(get_f64(&ctx, 3), 1.5);
    ctx.exec(Opcode::FsubD, Operands::r_type(4, 1, 2));
    assert_eq!(get_f64(&ctx, 4), 2.5);
}

// ─── Fused multiply-add sign conventions ─────────────────────────────────────

#[test]
fn fma_family_signs_single() {
    let mut ctx = TestContext::new();
    set_f32(&mut ctx, 1, 2.0);
    set_f32(&mut ctx, 2, 3.0);
    set_f32(&mut ctx, 3, 1.0);

    ctx.exec(Opcode::FmaddS, Operands::r4_type(4, 1, 2, 3));
    assert_eq!(get_f32(&mut ctx, 4), 7.0); // 2*3 + 1

    ctx.exec(Opcode::FmsubS, Operands::r4_type(4, 1, 2, 3));
    assert_eq!(get_f32(&mut ctx, 4), 5.0); // 2*3 - 1

    ctx.exec(Opcode::FnmaddS, Operands::r4_type(4, 1, 2, 3));
    assert_eq!(get_f32(&mut ctx, 4), -7.0); // -(2*3) - 1

    ctx.exec(Opcode::FnmsubS, Operands::r4_type(4, 1, 2, 3));
    assert_eq!(get_f32(&mut ctx, 4), -5.0); // -(2*3) + 1
}

#[test]
fn fma_family_signs_double() {
    let mut ctx = TestContext::new();
    set_f64(&mut ctx, 1, 4.0);
    set_f64(&mut ctx, 2, 0.25);
    set_f64(&mut ctx, 3, 2.0);

    ctx.exec(Opcode::FmaddD, Operands::r4_type(4, 1, 2, 3));
    assert_eq!(get_f64(&ctx, 4), 3.0);

    ctx.exec(Opcode::FnmaddD, Operands::r4_type(4, 1, 2, 3));
    assert_eq!(get_f64(&ctx, 4), -3.0);
}

// ─── Sign injection ──────────────────────────────────────────────────────────

#[test]
fn fsgnj_takes_sign_of_rs2() {
    let mut ctx = TestContext::new();
    set_f32(&mut ctx, 1, 1.5);
    set_f32(&mut ctx, 2, -7.0);
    ctx.exec(Opcode::FsgnjS, Operands::r_type(3, 1, 2));
    assert_eq!(get_f32(&mut ctx, 3), -1.5);
}

#[test]
fn fsgnjn_negates_sign_of_rs2() {
    let mut ctx = TestContext::new();
    set_f32(&mut ctx, 1, 1.5);
    set_f32(&mut ctx, 2, -7.0);
    ctx.exec(Opcode::FsgnjnS, Operands::r_type(3, 1, 2));
    assert_eq!(get_f32(&mut ctx, 3), 1.5);
}

#[test]
fn fsgnjx_xors_signs() {
    let mut ctx = TestContext::new();
    set_f32(&mut ctx, 1, -1.5);
    set_f32(&mut ctx, 2, -7.0);
    ctx.exec(Opcode::FsgnjxS, Operands::r_type(3, 1, 2));
    assert_eq!(get_f32(&mut ctx, 3), 1.5);
}

/// FSGNJ(FSGNJ(a, b), a) restores a's bit pattern when a is not NaN.
#[test]
fn fsgnj_roundtrip_restores_bits() {
    let mut ctx = TestContext::new();
    let cases: [(f32, f32); 4] = [(1.5, -2.0), (-1.5, 2.0), (0.0, -1.0), (-0.0, 1.0)];
    for &(a, b) in &cases {
        set_f32(&mut ctx, 1, a);
        set_f32(&mut ctx, 2, b);
        ctx.exec(Opcode::FsgnjS, Operands::r_type(3, 1, 2));
        ctx.exec(Opcode::FsgnjS, Operands::r_type(4, 3, 1));
        assert_eq!(
            get_f32(&mut ctx, 4).to_bits(),
            a.to_bits(),
            "roundtrip failed for a={}, b={}",
            a,
            b
        );
    }
}

#[test]
fn fsgnj_d_works_on_full_width() {
    let mut ctx = TestContext::new();
    set_f64(&mut ctx, 1, 2.5);
    set_f64(&mut ctx, 2, -1.0);
    ctx.exec(Opcode::FsgnjD, Operands::r_type(3, 1, 2));
    assert_eq!(get_f64(&ctx, 3), -2.5);
}

// ─── Comparisons ─────────────────────────────────────────────────────────────

#[test]
fn feq_flt_fle_ordered() {
    let mut ctx = TestContext::new();
    set_f32(&mut ctx, 1, 1.0);
    set_f32(&mut ctx, 2, 2.0);

    ctx.exec(Opcode::FeqS, Operands::r_type(3, 1, 2));
    assert_eq!(ctx.get_reg(3), 0);
    ctx.exec(Opcode::FltS, Operands::r_type(3, 1, 2));
    assert_eq!(ctx.get_reg(3), 1);
    ctx.exec(Opcode::FleS, Operands::r_type(3, 1, 1));
    assert_eq!(ctx.get_reg(3), 1);
}

/// A NaN operand makes the comparison 0 and raises the invalid flag in
/// both fflags and the mirrored fcsr field.
#[test]
fn nan_compare_raises_invalid_flag() {
    let mut ctx = TestContext::new();
    set_f32(&mut ctx, 1, f32::NAN);
    set_f32(&mut ctx, 2, 1.0);
    ctx.set_reg(3, 7);
    ctx.exec(Opcode::FltS, Operands::r_type(3, 1, 2));
    assert_eq!(ctx.get_reg(3), 0);
    assert_eq!(ctx.cpu.csrs.fflags & csr::FFLAG_NV, csr::FFLAG_NV);
    assert_eq!(ctx.cpu.csrs.fcsr & csr::FFLAG_NV, csr::FFLAG_NV);
}

#[test]
fn nan_compare_double_also_flags() {
    let mut ctx = TestContext::new();
    set_f64(&mut ctx, 1, f64::NAN);
    set_f64(&mut ctx, 2, 0.0);
    ctx.exec(Opcode::FeqD, Operands::r_type(3, 1, 2));
    assert_eq!(ctx.get_reg(3), 0);
    assert_eq!(ctx.cpu.csrs.fflags & csr::FFLAG_NV, csr::FFLAG_NV);
}

// ─── Min / Max instructions ──────────────────────────────────────────────────

#[test]
fn fmin_fmax_instructions() {
    let mut ctx = TestContext::new();
    set_f32(&mut ctx, 1, -3.0);
    set_f32(&mut ctx, 2, 2.0);
    ctx.exec(Opcode::FminS, Operands::r_type(3, 1, 2));
    assert_eq!(get_f32(&mut ctx, 3), -3.0);
    ctx.exec(Opcode::FmaxS, Operands::r_type(3, 1, 2));
    assert_eq!(get_f32(&mut ctx, 3), 2.0);
}

#[test]
fn fmin_instruction_ignores_nan_operand() {
    let mut ctx = TestContext::new();
    set_f32(&mut ctx, 1, f32::NAN);
    set_f32(&mut ctx, 2, 4.0);
    ctx.exec(Opcode::FminS, Operands::r_type(3, 1, 2));
    assert_eq!(get_f32(&mut ctx, 3), 4.0);
}

// ─── Conversions ─────────────────────────────────────────────────────────────

/// FCVT.S.W then FCVT.W.S round-trips an integer value.
#[test]
fn int_float_roundtrip() {
    let mut ctx = TestContext::new();
    ctx.set_reg(1, -7i32 as u32);
    ctx.exec(Opcode::FcvtSW, Operands::r_type(1, 1, 0));
    ctx.exec(Opcode::FcvtWS, Operands::r_type(2, 1, 0));
    assert_eq!(ctx.get_reg(2) as i32, -7);
}

/// FCVT.W.S rounds to nearest; FCVT.WU.S truncates.
#[test]
fn fcvt_rounding_conventions() {
    let mut ctx = TestContext::new();
    set_f32(&mut ctx, 1, 2.7);
    ctx.exec(Opcode::FcvtWS, Operands::r_type(2, 1, 0));
    assert_eq!(ctx.get_reg(2), 3);

    ctx.exec(Opcode::FcvtWuS, Operands::r_type(2, 1, 0));
    assert_eq!(ctx.get_reg(2), 2);

    set_f32(&mut ctx, 1, -2.7);
    ctx.exec(Opcode::FcvtWS, Operands::r_type(2, 1, 0));
    assert_eq!(ctx.get_reg(2) as i32, -3);
}

#[test]
fn fcvt_s_wu_is_unsigned() {
    let mut ctx = TestContext::new();
    ctx.set_reg(1, 0xFFFF_FFFF);
    ctx.exec(Opcode::FcvtSWu, Operands::r_type(1, 1, 0));
    assert_eq!(get_f32(&mut ctx, 1), 4294967295.0f32);
}

#[test]
fn fcvt_double_conversions() {
    let mut ctx = TestContext::new();
    ctx.set_reg(1, -9i32 as u32);
    ctx.exec(Opcode::FcvtDW, Operands::r_type(1, 1, 0));
    assert_eq!(get_f64(&ctx, 1), -9.0);
    ctx.exec(Opcode::FcvtWD, Operands::r_type(2, 1, 0));
    assert_eq!(ctx.get_reg(2) as i32, -9);

    ctx.set_reg(1, 3_000_000_000);
    ctx.exec(Opcode::FcvtDWu, Operands::r_type(1, 1, 0));
    assert_eq!(get_f64(&ctx, 1), 3_000_000_000.0);
    ctx.exec(Opcode::FcvtWuD, Operands::r_type(2, 1, 0));
    assert_eq!(ctx.get_reg(2), 3_000_000_000);
}

/// FCVT.D.S widens losslessly; FCVT.S.D narrows with rounding.
#[test]
fn precision_conversions() {
    let mut ctx = TestContext::new();
    set_f32(&mut ctx, 1, 1.25);
    ctx.exec(Opcode::FcvtDS, Operands::r_type(2, 1, 0));
    assert_eq!(get_f64(&ctx, 2), 1.25);

    set_f64(&mut ctx, 3, 2.5);
    ctx.exec(Opcode::FcvtSD, Operands::r_type(4, 3, 0));
    assert_eq!(get_f32(&mut ctx, 4), 2.5);
}

#[test]
fn fmv_d_copies_full_pattern() {
    let mut ctx = TestContext::new();
    ctx.cpu.fregs.write(1, 0x0123_4567_89AB_CDEF);
    ctx.exec(Opcode::FmvD, Operands::r_type(2, 1, 0));
    assert_eq!(ctx.cpu.fregs.read(2), 0x0123_4567_89AB_CDEF);
}

// ─── Square root ─────────────────────────────────────────────────────────────

#[test]
fn fsqrt_s_basic() {
    let mut ctx = TestContext::new();
    set_f32(&mut ctx, 1, 9.0);
    ctx.exec(Opcode::FsqrtS, Operands::r_type(2, 1, 0));
    assert_eq!(get_f32(&mut ctx, 2), 3.0);
}

/// FSQRT of a negative raises the invalid flag and halts the simulation.
#[test]
fn fsqrt_negative_halts() {
    let mut ctx = TestContext::new();
    set_f32(&mut ctx, 1, -4.0);
    let halt = ctx.step(Opcode::FsqrtS, Operands::r_type(2, 1, 0));
    assert_eq!(
        halt,
        Err(Halt::InvalidSquareRoot((-4.0f32).to_bits() as u64))
    );
    assert_eq!(ctx.cpu.csrs.fflags & csr::FFLAG_NV, csr::FFLAG_NV);
}

#[test]
fn fsqrt_d_negative_halts() {
    let mut ctx = TestContext::new();
    set_f64(&mut ctx, 1, -1.0);
    let halt = ctx.step(Opcode::FsqrtD, Operands::r_type(2, 1, 0));
    assert_eq!(halt, Err(Halt::InvalidSquareRoot((-1.0f64).to_bits())));
}
