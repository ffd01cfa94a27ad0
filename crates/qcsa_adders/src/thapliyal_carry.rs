//! Thapliyal-Ranganathan ripple-carry adder with carry-in
//!
//! Gantree: L2_Adders → ThapliyalWithCarry
//!
//! Registers `c[0]`, `a[0..n)`, `b[0..n)` and `z[0]`. After the circuit
//! runs, `b` holds `a + b + c mod 2^n`, `z` holds the carry-out, and both
//! `a` and `c` are restored.

use crate::adder::{
    check_width, Adder, AdderRegisters, AdderSkeleton, RegisterNames, WithCarryAdder,
};
use qcsa_core::{Circuit, CircuitBuilder, QcsaResult, QuantumRegister, RegisterAllocator};

/// Adder with carry-in
/// Gantree: ThapliyalWithCarry // 캐리 입력 가산기
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThapliyalWithCarry;

impl ThapliyalWithCarry {
    /// Create the adder
    pub fn new() -> Self {
        Self
    }
}

impl Adder for ThapliyalWithCarry {
    fn name(&self) -> &str {
        "ThapliyalWithCarry"
    }

    fn as_with_carry(&self) -> Option<&dyn WithCarryAdder> {
        Some(self)
    }
}

impl WithCarryAdder for ThapliyalWithCarry {
    fn build(
        &self,
        alloc: &mut RegisterAllocator,
        width: usize,
        names: &RegisterNames,
    ) -> QcsaResult<AdderSkeleton> {
        check_width(width)?;

        let c = alloc.allocate(&names.c, 1)?;
        let a = alloc.allocate(&names.a, width)?;
        let b = alloc.allocate(&names.b, width)?;
        let z = alloc.allocate(&names.z, 1)?;
        let template = template(width, &c, &a, &b, &z)?;

        log::debug!(
            "built {} adder of width {} over {}, {}, {}, {}",
            self.name(),
            width,
            c,
            a,
            b,
            z
        );

        let registers = AdderRegisters {
            carry_in: Some(c),
            a,
            b,
            z,
        };
        AdderSkeleton::new(self.name(), width, registers, template)
    }
}

/// Six-step gate sequence for width `n >= 2`
fn template(
    n: usize,
    c_reg: &QuantumRegister,
    a_reg: &QuantumRegister,
    b_reg: &QuantumRegister,
    z_reg: &QuantumRegister,
) -> QcsaResult<Circuit> {
    let a = |i| a_reg.qubit(i);
    let b = |i| b_reg.qubit(i);
    let c = c_reg.qubit(0);
    let z = z_reg.qubit(0);

    let mut g =
        CircuitBuilder::with_name("ThapliyalWithCarry").registers([c_reg, a_reg, b_reg, z_reg]);

    // Step 1
    for i in 0..n {
        g = g.cx(a(i), b(i));
    }

    // Step 2
    g = g.cx(a(0), c);
    for i in 1..n {
        g = g.cx(a(i), a(i - 1));
    }
    g = g.cx(a(n - 1), z);

    // Step 3: carries ripple up, b[0..n-1) flipped for the TR pass
    g = g.ccx(c, b(0), a(0));
    for i in 0..n - 2 {
        g = g.ccx(a(i), b(i + 1), a(i + 1));
    }
    g = g.peres(a(n - 2), b(n - 1), z);
    g = g.x_all((0..n - 1).map(b));

    // Step 4: uncompute the carries, undo the flips
    for i in (0..n.saturating_sub(2)).rev() {
        g = g.tr(a(i), b(i + 1), a(i + 1));
    }
    g = g.tr(c, b(0), a(0));
    g = g.x_all((0..n - 1).map(b));

    // Step 5
    for i in (1..n).rev() {
        g = g.cx(a(i), a(i - 1));
    }
    g = g.cx(a(0), c);

    // Step 6
    for i in 0..n {
        g = g.cx(a(i), b(i));
    }

    g.build()
}

// ============================================================================
// Tests
// ============================================================================
