//! Thapliyal-Ranganathan ripple-carry adder without carry-in
//!
//! Gantree: L2_Adders → Thapliyal
//!
//! Registers `a[0..n)`, `b[0..n)` and `z[0]`. After the circuit runs, `b`
//! holds `a + b mod 2^n`, `z` holds the carry-out and `a` is restored.
//! No ancilla besides `z` is needed.

use crate::adder::{
    check_width, Adder, AdderRegisters, AdderSkeleton, NoCarryAdder, RegisterNames,
};
use qcsa_core::{Circuit, CircuitBuilder, QcsaResult, QuantumRegister, RegisterAllocator};

/// Adder without carry-in
/// Gantree: Thapliyal // 캐리 입력 없는 가산기
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thapliyal;

impl Thapliyal {
    /// Create the adder
    pub fn new() -> Self {
        Self
    }
}

impl Adder for Thapliyal {
    fn name(&self) -> &str {
        "Thapliyal"
    }

    fn as_no_carry(&self) -> Option<&dyn NoCarryAdder> {
        Some(self)
    }
}

impl NoCarryAdder for Thapliyal {
    fn build(
        &self,
        alloc: &mut RegisterAllocator,
        width: usize,
        names: &RegisterNames,
    ) -> QcsaResult<AdderSkeleton> {
        check_width(width)?;

        let a = alloc.allocate(&names.a, width)?;
        let b = alloc.allocate(&names.b, width)?;
        let z = alloc.allocate(&names.z, 1)?;
        let template = template(width, &a, &b, &z)?;

        log::debug!(
            "built {} adder of width {} over {}, {}, {}",
            self.name(),
            width,
            a,
            b,
            z
        );

        let registers = AdderRegisters {
            carry_in: None,
            a,
            b,
            z,
        };
        AdderSkeleton::new(self.name(), width, registers, template)
    }
}

/// Six-step gate sequence for width `n >= 2`
/// Gantree: template(n, a, b, z) -> Result<Circuit> // 게이트 순서
fn template(
    n: usize,
    a_reg: &QuantumRegister,
    b_reg: &QuantumRegister,
    z_reg: &QuantumRegister,
) -> QcsaResult<Circuit> {
    let a = |i| a_reg.qubit(i);
    let b = |i| b_reg.qubit(i);
    let z = z_reg.qubit(0);

    let mut c = CircuitBuilder::with_name("Thapliyal").registers([a_reg, b_reg, z_reg]);

    // Step 1
    for i in 1..n {
        c = c.cx(a(i), b(i));
    }

    // Step 2
    c = c.cx(a(n - 1), z);
    for i in (1..n - 1).rev() {
        c = c.cx(a(i), a(i + 1));
    }

    // Step 3
    for i in 1..n {
        c = c.ccx(a(i - 1), b(i - 1), a(i));
    }

    // Step 4
    c = c.peres(a(n - 1), b(n - 1), z);
    for i in (0..n - 1).rev() {
        c = c.peres(a(i), b(i), a(i + 1));
    }

    // Step 5
    for i in 1..n - 1 {
        c = c.cx(a(i), a(i + 1));
    }

    // Step 6
    for i in 1..n {
        c = c.cx(a(i), b(i));
    }

    c.build()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use qcsa_backend::SimulatorBackend;
    use qcsa_core::{OperandBits, QcsaError};

    fn build(width: usize) -> AdderSkeleton {
        let mut alloc = RegisterAllocator::new();
        Thapliyal
            .build(&mut alloc, width, &RegisterNames::default())
            .unwrap()
    }

    /// Simulate `a + b` and return (sum, carry, a after)
    fn run(width: usize, a: u128, b: u128) -> (u128, u128, u128) {
        let skeleton = build(width);
        let circuit = Thapliyal
            .initialize(
                &skeleton,
                OperandBits::from_value(a, width).as_str(),
                OperandBits::from_value(b, width).as_str(),
            )
            .unwrap();
        let measured = SimulatorBackend::ideal(32).run_basis(&circuit).unwrap();
        (
            circuit.extract(&measured, &skeleton.sum_qubits()).unwrap(),
            circuit.extract(&measured, &[skeleton.carry_out()]).unwrap(),
            circuit
                .extract(&measured, &skeleton.registers().a.qubits())
                .unwrap(),
        )
    }

    #[test]
    fn test_build_rejects_narrow_width() {
        let mut alloc = RegisterAllocator::new();
        for width in [0, 1] {
            assert_eq!(
                Thapliyal
                    .build(&mut alloc, width, &RegisterNames::default())
                    .unwrap_err(),
                QcsaError::IllegalOperandsSize { size: width }
            );
        }
    }

    #[test]
    fn test_qubit_count() {
        for width in 2..7 {
            assert_eq!(build(width).num_qubits(), 2 * width + 1);
        }
    }

    #[test]
    fn test_template_gate_counts() {
        let skeleton = build(4);
        let template = skeleton.template();
        assert_eq!(template.count_named("cx"), 11);
        assert_eq!(template.count_named("ccx"), 3);
        assert_eq!(template.count_named("peres"), 4);
        assert_eq!(template.count_named("x"), 0);
    }

    #[test]
    fn test_capabilities() {
        assert!(Thapliyal.as_no_carry().is_some());
        assert!(Thapliyal.as_with_carry().is_none());
    }

    #[test]
    fn test_initialize_length_mismatch() {
        let skeleton = build(3);
        assert!(matches!(
            Thapliyal.initialize(&skeleton, "101", "11"),
            Err(QcsaError::IllegalStringFormat(_))
        ));
    }

    #[test]
    fn test_custom_register_names() {
        let mut alloc = RegisterAllocator::new();
        let names = RegisterNames::branch(2, 0);
        let skeleton = Thapliyal.build(&mut alloc, 2, &names).unwrap();
        assert_eq!(skeleton.registers().a.label(), "a2_0");
        assert_eq!(skeleton.registers().z.label(), "z2_0");
        assert!(skeleton.template().register_by_label("b2_0").is_some());
    }

    #[test]
    fn test_register_names_must_be_identifiers() {
        let mut alloc = RegisterAllocator::new();
        let names = RegisterNames::new("c", "a b", "b", "z");
        assert!(matches!(
            Thapliyal.build(&mut alloc, 2, &names),
            Err(QcsaError::IllegalArgument(_))
        ));
    }

    #[test]
    fn test_same_inputs_same_circuit() {
        let first = build(5);
        let second = build(5);
        assert_ne!(first.registers().a.id(), second.registers().a.id());
        assert_eq!(first.template().to_qasm(), second.template().to_qasm());
        assert_eq!(
            Thapliyal.initialize(&first, "10110", "00111").unwrap().to_qasm(),
            Thapliyal.initialize(&second, "10110", "00111").unwrap().to_qasm()
        );
    }

    #[test]
    fn test_four_bit_example() {
        let skeleton = build(4);
        let circuit = Thapliyal.initialize(&skeleton, "0011", "0001").unwrap();
        let measured = SimulatorBackend::ideal(16).run_basis(&circuit).unwrap();

        let sum = circuit.extract(&measured, &skeleton.sum_qubits()).unwrap();
        assert_eq!(OperandBits::from_value(sum, 4).as_str(), "0100");
        assert_eq!(circuit.extract(&measured, &[skeleton.carry_out()]).unwrap(), 0);
    }

    #[test]
    fn test_exhaustive_small_widths() {
        for width in 2..=3 {
            for a in 0..(1u128 << width) {
                for b in 0..(1u128 << width) {
                    let total = a + b;
                    assert_eq!(
                        run(width, a, b),
                        (total % (1 << width), total >> width, a),
                        "width={} a={} b={}",
                        width,
                        a,
                        b
                    );
                }
            }
        }
    }

    proptest::proptest! {
        #[test]
        fn prop_sum_matches_integer_addition(width in 2usize..8, a in 0u128..256, b in 0u128..256) {
            let mask = (1u128 << width) - 1;
            let (a, b) = (a & mask, b & mask);
            let (sum, carry, a_after) = run(width, a, b);
            proptest::prop_assert_eq!(sum, (a + b) & mask);
            proptest::prop_assert_eq!(carry, (a + b) >> width);
            proptest::prop_assert_eq!(a_after, a);
        }
    }
}
