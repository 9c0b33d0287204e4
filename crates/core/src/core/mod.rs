//! Execution engine.
//!
//! This module defines the central `Cpu` structure and the instruction
//! dispatcher. It owns:
//! 1. **State Management:** The integer, floating-point, vector, and CSR
//!    register files plus the program counter.
//! 2. **Dispatch:** The pre-increment/execute/reset-x0 step cycle that maps
//!    each decoded opcode onto one semantic method.
//! 3. **Memory Integration:** The host-supplied `Memory` collaborator.
//!
//! The per-extension semantic methods live in [`exec`]; the stateless
//! compute helpers live in [`units`].

/// Per-extension instruction semantics (impl blocks on `Cpu`).
pub mod exec;

/// Stateless compute units (ALU, AMO ALU, FPU helpers).
pub mod units;

use log::trace;

use crate::arch::{Csrs, Fpr, Gpr, Vpr};
use crate::common::Halt;
use crate::config::Config;
use crate::core::units::alu::AluOp;
use crate::core::units::amo::AmoOp;
use crate::isa::{Instr, Opcode};
use crate::mem::Memory;
use crate::stats::SimStats;

/// CPU architectural state and the memory collaborator.
///
/// One instruction retires in full per [`Cpu::step`] call; there is no
/// pipeline and no observable out-of-order effect.
pub struct Cpu {
    /// General-purpose registers (`x0`-`x31`).
    pub regs: Gpr,
    /// Floating-point registers (`f0`-`f31`).
    pub fregs: Fpr,
    /// Vector registers (`v0`-`v31`).
    pub vregs: Vpr,
    /// Control and status registers.
    pub csrs: Csrs,
    /// Program counter.
    pub pc: u32,
    /// Host-supplied byte-addressable memory.
    pub mem: Box<dyn Memory>,
    /// Retired-instruction statistics.
    pub stats: SimStats,
}

impl Cpu {
    /// Creates a CPU in its reset state over the given memory.
    ///
    /// All register files start zeroed (`vlenb` excepted) and the program
    /// counter takes the configured reset value; the loader normally
    /// overwrites it with the guest entry point.
    ///
    /// # Arguments
    ///
    /// * `mem`    - The memory collaborator the semantics read and write.
    /// * `config` - Simulator configuration.
    pub fn new(mem: Box<dyn Memory>, config: &Config) -> Self {
        Self {
            regs: Gpr::new(),
            fregs: Fpr::new(),
            vregs: Vpr::new(),
            csrs: Csrs::new(),
            pc: config.reset_pc,
            mem,
            stats: SimStats::new(),
        }
    }

    /// Executes one decoded instruction.
    ///
    /// The program counter is incremented by 4 before the semantic body
    /// runs; branch and jump bodies that need the instruction's own
    /// address recover it as `pc - 4`. After the body retires, `x0` is
    /// forced back to zero and the statistics are updated.
    ///
    /// # Arguments
    ///
    /// * `inst` - The decoded instruction from the host decoder.
    ///
    /// # Returns
    ///
    /// `Ok(())` to continue, or the [`Halt`] stop signal (ECALL, EBREAK,
    /// or square root of a negative operand).
    pub fn step(&mut self, inst: &Instr) -> Result<(), Halt> {
        trace!(
            "pc={:#010x} #{} {:?}",
            self.pc,
            self.stats.instructions_retired,
            inst.op
        );
        self.pc = self.pc.wrapping_add(4);
        let result = self.execute(inst);
        self.regs.reset_zero();
        self.stats.record(inst.op.class());
        result
    }

    /// Maps the decoded opcode onto its semantic method.
    fn execute(&mut self, inst: &Instr) -> Result<(), Halt> {
        let f = &inst.f;
        match inst.op {
            // --- RV32I register-register ---
            Opcode::Add => self.op_reg(f, AluOp::Add),
            Opcode::Sub => self.op_reg(f, AluOp::Sub),
            Opcode::Sll => self.op_reg(f, AluOp::Sll),
            Opcode::Slt => self.op_reg(f, AluOp::Slt),
            Opcode::Sltu => self.op_reg(f, AluOp::Sltu),
            Opcode::Xor => self.op_reg(f, AluOp::Xor),
            Opcode::Srl => self.op_reg(f, AluOp::Srl),
            Opcode::Sra => self.op_reg(f, AluOp::Sra),
            Opcode::Or => self.op_reg(f, AluOp::Or),
            Opcode::And => self.op_reg(f, AluOp::And),

            // --- RV32I register-immediate ---
            Opcode::Addi => self.op_imm(f, AluOp::Add),
            Opcode::Slti => self.op_imm(f, AluOp::Slt),
            Opcode::Sltiu => self.op_imm(f, AluOp::Sltu),
            Opcode::Xori => self.op_imm(f, AluOp::Xor),
            Opcode::Ori => self.op_imm(f, AluOp::Or),
            Opcode::Andi => self.op_imm(f, AluOp::And),
            Opcode::Slli => self.op_shamt(f, AluOp::Sll),
            Opcode::Srli => self.op_shamt(f, AluOp::Srl),
            Opcode::Srai => self.op_shamt(f, AluOp::Sra),

            // --- RV32I upper-immediate, jumps, branches ---
            Opcode::Lui => self.lui(f),
            Opcode::Auipc => self.auipc(f),
            Opcode::Jal => self.jal(f),
            Opcode::Jalr => self.jalr(f),
            Opcode::Beq => self.beq(f),
            Opcode::Bne => self.bne(f),
            Opcode::Blt => self.blt(f),
            Opcode::Bge => self.bge(f),
            Opcode::Bltu => self.bltu(f),
            Opcode::Bgeu => self.bgeu(f),

            // --- RV32I loads and stores ---
            Opcode::Lb => self.lb(f),
            Opcode::Lh => self.lh(f),
            Opcode::Lw => self.lw(f),
            Opcode::Lbu => self.lbu(f),
            Opcode::Lhu => self.lhu(f),
            Opcode::Sb => self.sb(f),
            Opcode::Sh => self.sh(f),
            Opcode::Sw => self.sw(f),

            // --- RV32I system ---
            Opcode::Fence | Opcode::FenceI => self.fence(),
            Opcode::Ecall => return self.ecall(),
            Opcode::Ebreak => return self.ebreak(),
            Opcode::RdCycle | Opcode::RdTime | Opcode::RdInstret => self.read_counter(f),
            Opcode::RdCycleH | Opcode::RdTimeH | Opcode::RdInstretH => self.read_counter_high(f),

            // --- M extension ---
            Opcode::Mul => self.op_reg(f, AluOp::Mul),
            Opcode::Mulh => self.op_reg(f, AluOp::Mulh),
            Opcode::Mulhsu => self.op_reg(f, AluOp::Mulhsu),
            Opcode::Mulhu => self.op_reg(f, AluOp::Mulhu),
            Opcode::Div => self.op_reg(f, AluOp::Div),
            Opcode::Divu => self.op_reg(f, AluOp::Divu),
            Opcode::Rem => self.op_reg(f, AluOp::Rem),
            Opcode::Remu => self.op_reg(f, AluOp::Remu),

            // --- A extension ---
            Opcode::LrW => self.lr_w(f),
            Opcode::ScW => self.sc_w(f),
            Opcode::AmoswapW => self.amo(f, AmoOp::Swap),
            Opcode::AmoaddW => self.amo(f, AmoOp::Add),
            Opcode::AmoxorW => self.amo(f, AmoOp::Xor),
            Opcode::AmoandW => self.amo(f, AmoOp::And),
            Opcode::AmoorW => self.amo(f, AmoOp::Or),
            Opcode::AmominW => self.amo(f, AmoOp::Min),
            Opcode::AmomaxW => self.amo(f, AmoOp::Max),
            Opcode::AmominuW => self.amo(f, AmoOp::Minu),
            Opcode::AmomaxuW => self.amo(f, AmoOp::Maxu),

            // --- F extension ---
            Opcode::Flw => self.flw(f),
            Opcode::Fsw => self.fsw(f),
            Opcode::FaddS => self.fp_bin_s(f, |a, b| a + b),
            Opcode::FsubS => self.fp_bin_s(f, |a, b| a - b),
            Opcode::FmulS => self.fp_bin_s(f, |a, b| a * b),
            Opcode::FdivS => self.fp_bin_s(f, |a, b| a / b),
            Opcode::FsqrtS => return self.fsqrt_s(f),
            Opcode::FminS => self.fmin_s(f),
            Opcode::FmaxS => self.fmax_s(f),
            Opcode::FmaddS => self.fp_fma_s(f, |a, b, c| a.mul_add(b, c)),
            Opcode::FmsubS => self.fp_fma_s(f, |a, b, c| a.mul_add(b, -c)),
            Opcode::FnmaddS => self.fp_fma_s(f, |a, b, c| (-a).mul_add(b, -c)),
            Opcode::FnmsubS => self.fp_fma_s(f, |a, b, c| (-a).mul_add(b, c)),
            Opcode::FsgnjS => self.fsgnj_s(f),
            Opcode::FsgnjnS => self.fsgnjn_s(f),
            Opcode::FsgnjxS => self.fsgnjx_s(f),
            Opcode::FeqS => self.fp_cmp_s(f, |a, b| a == b),
            Opcode::FltS => self.fp_cmp_s(f, |a, b| a < b),
            Opcode::FleS => self.fp_cmp_s(f, |a, b| a <= b),
            Opcode::FcvtWS => self.fcvt_w_s(f),
            Opcode::FcvtWuS => self.fcvt_wu_s(f),
            Opcode::FcvtSW => self.fcvt_s_w(f),
            Opcode::FcvtSWu => self.fcvt_s_wu(f),
            Opcode::FmvXS => self.fmv_x_s(f),
            Opcode::FmvSX => self.fmv_s_x(f),
            Opcode::FmvS => self.fmv_s(f),

            // --- D extension ---
            Opcode::Fld => self.fld(f),
            Opcode::Fsd => self.fsd(f),
            Opcode::FaddD => self.fp_bin_d(f, |a, b| a + b),
            Opcode::FsubD => self.fp_bin_d(f, |a, b| a - b),
            Opcode::FmulD => self.fp_bin_d(f, |a, b| a * b),
            Opcode::FdivD => self.fp_bin_d(f, |a, b| a / b),
            Opcode::FsqrtD => return self.fsqrt_d(f),
            Opcode::FminD => self.fmin_d(f),
            Opcode::FmaxD => self.fmax_d(f),
            Opcode::FmaddD => self.fp_fma_d(f, |a, b, c| a.mul_add(b, c)),
            Opcode::FmsubD => self.fp_fma_d(f, |a, b, c| a.mul_add(b, -c)),
            Opcode::FnmaddD => self.fp_fma_d(f, |a, b, c| (-a).mul_add(b, -c)),
            Opcode::FnmsubD => self.fp_fma_d(f, |a, b, c| (-a).mul_add(b, c)),
            Opcode::FsgnjD => self.fsgnj_d(f),
            Opcode::FsgnjnD => self.fsgnjn_d(f),
            Opcode::FsgnjxD => self.fsgnjx_d(f),
            Opcode::FeqD => self.fp_cmp_d(f, |a, b| a == b),
            Opcode::FltD => self.fp_cmp_d(f, |a, b| a < b),
            Opcode::FleD => self.fp_cmp_d(f, |a, b| a <= b),
            Opcode::FcvtWD => self.fcvt_w_d(f),
            Opcode::FcvtWuD => self.fcvt_wu_d(f),
            Opcode::FcvtDW => self.fcvt_d_w(f),
            Opcode::FcvtDWu => self.fcvt_d_wu(f),
            Opcode::FcvtSD => self.fcvt_s_d(f),
            Opcode::FcvtDS => self.fcvt_d_s(f),
            Opcode::FmvD => self.fmv_d(f),

            // --- Zicsr ---
            Opcode::Csrrw => self.csrrw(f),
            Opcode::Csrrs => self.csrrs(f),
            Opcode::Csrrc => self.csrrc(f),

            // --- V extension ---
            Opcode::Vsetvli => self.vsetvli(f),
            Opcode::Vle => self.vle(f),
            Opcode::Vlse => self.vlse(f),
            Opcode::Vse => self.vse(f),
            Opcode::Vsse => self.vsse(f),
            Opcode::VaddVv => self.v_binop_vv(f, exec::rv32v::vadd),
            Opcode::VaddVx => self.v_binop_vx(f, exec::rv32v::vadd),
            Opcode::VaddVi => self.v_binop_vi(f, exec::rv32v::vadd),
            Opcode::VsubVv => self.v_binop_vv(f, exec::rv32v::vsub),
            Opcode::VsubVx => self.v_binop_vx(f, exec::rv32v::vsub),
            Opcode::VmulVv => self.v_binop_vv(f, exec::rv32v::vmul),
            Opcode::VandVv => self.v_binop_vv(f, exec::rv32v::vand),
            Opcode::VandVx => self.v_binop_vx(f, exec::rv32v::vand),
            Opcode::VandVi => self.v_binop_vi(f, exec::rv32v::vand),
            Opcode::VorVv => self.v_binop_vv(f, exec::rv32v::vor),
            Opcode::VorVx => self.v_binop_vx(f, exec::rv32v::vor),
            Opcode::VorVi => self.v_binop_vi(f, exec::rv32v::vor),
            Opcode::VxorVv => self.v_binop_vv(f, exec::rv32v::vxor),
            Opcode::VxorVx => self.v_binop_vx(f, exec::rv32v::vxor),
            Opcode::VxorVi => self.v_binop_vi(f, exec::rv32v::vxor),
            Opcode::VminuVv => self.v_binop_vv(f, exec::rv32v::vminu),
            Opcode::VminuVx => self.v_binop_vx(f, exec::rv32v::vminu),
            Opcode::VmaxuVv => self.v_binop_vv(f, exec::rv32v::vmaxu),
            Opcode::VmaxuVx => self.v_binop_vx(f, exec::rv32v::vmaxu),
            Opcode::VsllVv => self.v_binop_vv(f, exec::rv32v::vsll),
            Opcode::VsllVx => self.v_binop_vx(f, exec::rv32v::vsll),
            Opcode::VsllVi => self.v_shift_vi(f, exec::rv32v::vsll),
            Opcode::VsrlVv => self.v_binop_vv(f, exec::rv32v::vsrl),
            Opcode::VsrlVx => self.v_binop_vx(f, exec::rv32v::vsrl),
            Opcode::VsrlVi => self.v_shift_vi(f, exec::rv32v::vsrl),
            Opcode::VmseqVv => self.v_binop_vv(f, exec::rv32v::vmseq),
            Opcode::VmseqVx => self.v_binop_vx(f, exec::rv32v::vmseq),
            Opcode::VmseqVi => self.v_binop_vi(f, exec::rv32v::vmseq),
            Opcode::VmsneVv => self.v_binop_vv(f, exec::rv32v::vmsne),
            Opcode::VmsneVx => self.v_binop_vx(f, exec::rv32v::vmsne),
            Opcode::VmsneVi => self.v_binop_vi(f, exec::rv32v::vmsne),
            Opcode::VmsltVv => self.v_binop_vv(f, exec::rv32v::vmslt),
            Opcode::VmsltVx => self.v_binop_vx(f, exec::rv32v::vmslt),
            Opcode::VmsleVv => self.v_binop_vv(f, exec::rv32v::vmsle),
            Opcode::VmsleVx => self.v_binop_vx(f, exec::rv32v::vmsle),
            Opcode::VmsleVi => self.v_binop_vi(f, exec::rv32v::vmsle),
            Opcode::VmsgtVx => self.v_binop_vx(f, exec::rv32v::vmsgt),
            Opcode::VmsgtVi => self.v_binop_vi(f, exec::rv32v::vmsgt),
            Opcode::VmvXS => self.vmv_x_s(f),
            Opcode::VmvSX => self.vmv_s_x(f),
            Opcode::VredsumVs => self.vredsum_vs(f),
            Opcode::VwredsumuVs => self.vwredsumu_vs(f),
        }
        Ok(())
    }
}
