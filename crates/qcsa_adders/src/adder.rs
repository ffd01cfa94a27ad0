//! Adder abstraction
//!
//! Gantree: L2_Adders → AdderTraits
//!
//! Adders are built in two phases. `build` allocates the registers and emits
//! the fixed gate template, returning an immutable [`AdderSkeleton`].
//! `initialize` is a pure function of a skeleton and operand strings: it
//! loads the operands with X gates into a fresh circuit over the same
//! registers and merges the template on top.

use qcsa_core::{
    Circuit, CircuitBuilder, OperandBits, QcsaError, QcsaResult, QuantumRegister, Qubit,
    RegisterAllocator,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Smallest operand width an adder accepts
pub const MIN_WIDTH: usize = 2;

// ============================================================================
// Register Names
// ============================================================================

/// Labels for the carry-in, operand and carry-out registers
/// Gantree: RegisterNames // 레지스터 이름
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegisterNames {
    /// Carry-in register (ignored by no-carry adders)
    pub c: String,
    /// First operand
    pub a: String,
    /// Second operand, overwritten with the sum
    pub b: String,
    /// Carry-out
    pub z: String,
}

impl RegisterNames {
    /// Explicit labels
    pub fn new(
        c: impl Into<String>,
        a: impl Into<String>,
        b: impl Into<String>,
        z: impl Into<String>,
    ) -> Self {
        Self {
            c: c.into(),
            a: a.into(),
            b: b.into(),
            z: z.into(),
        }
    }

    /// Labels suffixed with a block index: `c3`, `a3`, `b3`, `z3`
    pub fn block(block: usize) -> Self {
        Self::suffixed(&block.to_string())
    }

    /// Labels suffixed with block and branch: `c3_1`, `a3_1`, `b3_1`, `z3_1`
    pub fn branch(block: usize, branch: usize) -> Self {
        Self::suffixed(&format!("{}_{}", block, branch))
    }

    fn suffixed(suffix: &str) -> Self {
        Self::new(
            format!("c{}", suffix),
            format!("a{}", suffix),
            format!("b{}", suffix),
            format!("z{}", suffix),
        )
    }
}

impl Default for RegisterNames {
    fn default() -> Self {
        Self::new("c", "a", "b", "z")
    }
}

// ============================================================================
// Adder Skeleton
// ============================================================================

/// Registers owned by one adder instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdderRegisters {
    /// Carry-in qubit, present only for with-carry adders
    pub carry_in: Option<QuantumRegister>,
    /// First operand (restored after the addition)
    pub a: QuantumRegister,
    /// Second operand, holds the sum afterwards
    pub b: QuantumRegister,
    /// Carry-out qubit
    pub z: QuantumRegister,
}

impl AdderRegisters {
    /// Registers in layout order (`c`, `a`, `b`, `z`)
    pub fn iter(&self) -> impl Iterator<Item = &QuantumRegister> {
        self.carry_in
            .iter()
            .chain([&self.a, &self.b, &self.z])
    }
}

/// Built adder: registers plus the fixed gate template
/// Gantree: AdderSkeleton // 빌드 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdderSkeleton {
    adder: String,
    width: usize,
    registers: AdderRegisters,
    template: Circuit,
}

impl AdderSkeleton {
    /// Assemble a skeleton; the template must be built over `registers`
    pub fn new(
        adder: impl Into<String>,
        width: usize,
        registers: AdderRegisters,
        template: Circuit,
    ) -> QcsaResult<Self> {
        for register in registers.iter() {
            if !template.has_register(register.id()) {
                return Err(QcsaError::UnregisteredQubit {
                    register: register.label().to_string(),
                });
            }
        }
        Ok(Self {
            adder: adder.into(),
            width,
            registers,
            template,
        })
    }

    /// Name of the adder that produced this skeleton
    pub fn adder(&self) -> &str {
        &self.adder
    }

    /// Operand width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Owned registers
    pub fn registers(&self) -> &AdderRegisters {
        &self.registers
    }

    /// Fixed gate sequence, without operand loading
    pub fn template(&self) -> &Circuit {
        &self.template
    }

    /// Total qubit count (`2n+1` without carry-in, `2n+2` with)
    pub fn num_qubits(&self) -> usize {
        self.registers.iter().map(|r| r.size()).sum()
    }

    /// Qubits holding the sum, least significant first
    pub fn sum_qubits(&self) -> Vec<Qubit> {
        self.registers.b.qubits()
    }

    /// Carry-out qubit
    pub fn carry_out(&self) -> Qubit {
        self.registers.z.qubit(0)
    }

    /// Carry-in qubit, if any
    pub fn carry_in(&self) -> Option<Qubit> {
        self.registers.carry_in.as_ref().map(|r| r.qubit(0))
    }
}

impl fmt::Display for AdderSkeleton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<String> = self.registers.iter().map(|r| r.to_string()).collect();
        write!(
            f,
            "{}(width={}, registers=[{}], gates={})",
            self.adder,
            self.width,
            labels.join(", "),
            self.template.gate_count()
        )
    }
}

// ============================================================================
// Capability Traits
// ============================================================================

/// Common adder identity plus capability queries
///
/// The carry-select composer asks an adder which capability it offers and
/// rejects adders offering neither.
/// Gantree: Adder // 공통 트레이트
pub trait Adder {
    /// Adder name
    fn name(&self) -> &str;

    /// No-carry capability
    fn as_no_carry(&self) -> Option<&dyn NoCarryAdder> {
        None
    }

    /// With-carry capability
    fn as_with_carry(&self) -> Option<&dyn WithCarryAdder> {
        None
    }
}

/// Adder computing `b <- a + b`, carry-out in `z`
/// Gantree: NoCarryAdder // 캐리 입력 없음
pub trait NoCarryAdder: Adder {
    /// Allocate `a`, `b`, `z` and emit the gate template
    fn build(
        &self,
        alloc: &mut RegisterAllocator,
        width: usize,
        names: &RegisterNames,
    ) -> QcsaResult<AdderSkeleton>;

    /// Load operands `a` and `b` (most significant bit first) and append the template
    fn initialize(&self, skeleton: &AdderSkeleton, a: &str, b: &str) -> QcsaResult<Circuit> {
        load_operands(skeleton, None, a, b)
    }
}

/// Adder computing `b <- a + b + c`, carry-out in `z`
/// Gantree: WithCarryAdder // 캐리 입력 있음
pub trait WithCarryAdder: Adder {
    /// Allocate `c`, `a`, `b`, `z` and emit the gate template
    fn build(
        &self,
        alloc: &mut RegisterAllocator,
        width: usize,
        names: &RegisterNames,
    ) -> QcsaResult<AdderSkeleton>;

    /// Load carry `c` (one character) and operands, then append the template
    fn initialize(
        &self,
        skeleton: &AdderSkeleton,
        c: &str,
        a: &str,
        b: &str,
    ) -> QcsaResult<Circuit> {
        load_operands(skeleton, Some(c), a, b)
    }
}

// ============================================================================
// Shared Helpers
// ============================================================================

/// Reject widths below [`MIN_WIDTH`]
pub fn check_width(width: usize) -> QcsaResult<()> {
    if width < MIN_WIDTH {
        return Err(QcsaError::IllegalOperandsSize { size: width });
    }
    Ok(())
}

fn parse_operand(name: &str, text: &str, width: usize) -> QcsaResult<OperandBits> {
    let bits = OperandBits::parse(text)?;
    if bits.width() != width {
        return Err(QcsaError::IllegalStringFormat(format!(
            "operand {} = '{}' has {} bits, expected {}",
            name,
            text,
            bits.width(),
            width
        )));
    }
    Ok(bits)
}

/// Fresh circuit over the skeleton's registers with X-loaded operands,
/// followed by the skeleton's template
/// Gantree: load_operands(skel, c, a, b) -> Result<Circuit> // 초기화
pub fn load_operands(
    skeleton: &AdderSkeleton,
    carry: Option<&str>,
    a: &str,
    b: &str,
) -> QcsaResult<Circuit> {
    let width = skeleton.width();
    let a_bits = parse_operand("a", a, width)?;
    let b_bits = parse_operand("b", b, width)?;
    let carry_bit = match (carry, skeleton.carry_in()) {
        (Some(text), Some(_)) => parse_operand("c", text, 1)?.bit(0).unwrap_or(false),
        (Some(_), None) => {
            return Err(QcsaError::IllegalAdder(format!(
                "{} has no carry-in register",
                skeleton.adder()
            )))
        }
        (None, _) => false,
    };

    let regs = skeleton.registers();
    let mut builder =
        CircuitBuilder::with_name(skeleton.adder()).registers(regs.iter());
    if let (true, Some(c)) = (carry_bit, skeleton.carry_in()) {
        builder = builder.x(c);
    }
    for (i, bit) in a_bits.lsb_first().into_iter().enumerate() {
        if bit {
            builder = builder.x(regs.a.qubit(i));
        }
    }
    for (i, bit) in b_bits.lsb_first().into_iter().enumerate() {
        if bit {
            builder = builder.x(regs.b.qubit(i));
        }
    }

    let mut circuit = builder.build()?;
    circuit.merge(skeleton.template())?;
    Ok(circuit)
}

// ============================================================================
// Tests
// ============================================================================
