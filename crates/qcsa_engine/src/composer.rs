//! Quantum Carry-Select Adder composer
//!
//! Gantree: L4_Integration → Qcsa
//!
//! Splits an `n`-bit addition into `n / k` blocks of `k` bits. Block 0 is a
//! single adder. Every later block is computed twice over disjoint
//! registers, once assuming carry-in 0 (default branch) and once assuming
//! carry-in 1, and a chain of controlled swaps keyed on the previous block's
//! carry-out moves the right branch's sum and carry-out into the default
//! branch registers.
//!
//! ```text
//! block 0      block 1                     block 2
//! a0,b0 ─┐     a1_0,b1_0 ─┐  (carry 0)     ...
//!        z0 ──●───────────┼── cswap ── z1_0 ──●── ...
//!             a1_1,b1_1 ─┘  (carry 1)
//! ```

use crate::config::QcsaConfig;
use qcsa_adders::{Adder, AdderSkeleton, RegisterNames, Thapliyal, ThapliyalWithCarry};
use qcsa_core::{
    Circuit, Gate, OperandBits, QcsaError, QcsaResult, QuantumRegister, Qubit, RegisterAllocator,
};
use std::fmt;

/// Name of the composed circuit
pub const CIRCUIT_NAME: &str = "Quantum Carry Select Adder";

// ============================================================================
// Output
// ============================================================================

/// Where the result of a composed adder lives
/// Gantree: QcsaLayout // 결과 위치
#[derive(Debug, Clone, PartialEq)]
pub struct QcsaLayout {
    /// Selected sum register of every block, least significant block first
    pub sum_registers: Vec<QuantumRegister>,

    /// Carry-out of the whole addition
    pub carry_out: Qubit,
}

impl QcsaLayout {
    /// Sum qubits, least significant first
    pub fn sum_qubits(&self) -> Vec<Qubit> {
        self.sum_registers.iter().flat_map(|r| r.qubits()).collect()
    }

    /// Operand width
    pub fn width(&self) -> usize {
        self.sum_registers.iter().map(|r| r.size()).sum()
    }

    /// Decode a measured bitstring of `circuit` into `(sum, carry)`
    /// Gantree: decode(circuit, bitstring) -> Result<(u128, u128)> // 결과 해독
    pub fn decode(&self, circuit: &Circuit, bitstring: &str) -> QcsaResult<(u128, u128)> {
        let sum = circuit.extract(bitstring, &self.sum_qubits())?;
        let carry = circuit.extract(bitstring, &[self.carry_out])?;
        Ok((sum, carry))
    }
}

/// Composed circuit plus its result layout
/// Gantree: QcsaCircuit // 빌드 결과
#[derive(Debug, Clone, PartialEq)]
pub struct QcsaCircuit {
    /// Global circuit
    pub circuit: Circuit,

    /// Result layout
    pub layout: QcsaLayout,
}

impl QcsaCircuit {
    /// Decode a measured bitstring into `(sum, carry)`
    pub fn decode(&self, bitstring: &str) -> QcsaResult<(u128, u128)> {
        self.layout.decode(&self.circuit, bitstring)
    }

    /// Decode a measured bitstring into the sum bits and the carry flag
    pub fn decode_bits(&self, bitstring: &str) -> QcsaResult<(OperandBits, bool)> {
        let (sum, carry) = self.decode(bitstring)?;
        Ok((OperandBits::from_value(sum, self.layout.width()), carry == 1))
    }

    /// Number of qubits
    pub fn num_qubits(&self) -> usize {
        self.circuit.num_qubits()
    }
}

// ============================================================================
// Composer
// ============================================================================

/// Carry-select adder over `n`-bit operands split into `k`-bit blocks
/// Gantree: Qcsa // 캐리 선택 가산기
pub struct Qcsa {
    n: usize,
    k: usize,
    first: Box<dyn Adder>,
    second: Box<dyn Adder>,
    a: OperandBits,
    b: OperandBits,
    carry_in: bool,
}

/// One initialized adder ready to be spliced into the global circuit
struct BlockAdder {
    skeleton: AdderSkeleton,
    circuit: Circuit,
}

impl Qcsa {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Adder for `n`-bit operands in `k`-bit blocks, zero operands
    ///
    /// Uses [`Thapliyal`] for block 0 and the default branches and
    /// [`ThapliyalWithCarry`] for the carry-in-1 branches.
    pub fn new(n: usize, k: usize) -> QcsaResult<Self> {
        if k == 0 || n == 0 || n % k != 0 {
            return Err(QcsaError::IllegalArgument(format!(
                "block size {} must divide operand width {}",
                k, n
            )));
        }
        Ok(Self {
            n,
            k,
            first: Box::new(Thapliyal),
            second: Box::new(ThapliyalWithCarry),
            a: OperandBits::zeros(n),
            b: OperandBits::zeros(n),
            carry_in: false,
        })
    }

    /// Validated composer for a configuration
    pub fn from_config(config: &QcsaConfig) -> QcsaResult<Self> {
        config.validate()?;
        Ok(Self::new(config.n, config.k)?
            .with_adders(config.first_adder.to_adder(), config.second_adder.to_adder()))
    }

    /// Replace the adders: `first` for block 0 and the default branches,
    /// `second` for the carry-in-1 branches
    pub fn with_adders(mut self, first: Box<dyn Adder>, second: Box<dyn Adder>) -> Self {
        self.first = first;
        self.second = second;
        self
    }

    // ========================================================================
    // Operands
    // ========================================================================

    /// Load operands `a`, `b` (`n` bits, most significant first) and the carry-in
    /// Gantree: initialize(a, b, c_in) -> Result<()> // 피연산자 설정
    pub fn initialize(&mut self, a: &str, b: &str, c_in: &str) -> QcsaResult<()> {
        let a = self.parse_operand("a", a)?;
        let b = self.parse_operand("b", b)?;
        let c = OperandBits::parse(c_in)?;
        if c.width() != 1 {
            return Err(QcsaError::IllegalStringFormat(format!(
                "carry-in must be a single bit, got '{}'",
                c_in
            )));
        }

        self.a = a;
        self.b = b;
        self.carry_in = c.bit(0) == Some(true);
        Ok(())
    }

    fn parse_operand(&self, name: &str, text: &str) -> QcsaResult<OperandBits> {
        let bits = OperandBits::parse(text)?;
        if bits.width() != self.n {
            return Err(QcsaError::IllegalStringFormat(format!(
                "operand {} has {} bits, expected {}",
                name,
                bits.width(),
                self.n
            )));
        }
        Ok(bits)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Operand width
    pub fn n(&self) -> usize {
        self.n
    }

    /// Block width
    pub fn k(&self) -> usize {
        self.k
    }

    /// Number of blocks
    pub fn num_blocks(&self) -> usize {
        self.n / self.k
    }

    /// Operand `a`
    pub fn a(&self) -> &OperandBits {
        &self.a
    }

    /// Operand `b`
    pub fn b(&self) -> &OperandBits {
        &self.b
    }

    /// Carry-in
    pub fn carry_in(&self) -> bool {
        self.carry_in
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Compose the carry-select circuit for the loaded operands
    ///
    /// Block 0 uses the first adder when the carry-in is 0 and the second
    /// adder when it is 1, so register `c0` exists only for `c_in = 1`.
    /// Gantree: build() -> Result<QcsaCircuit> // 회로 합성
    pub fn build(&self) -> QcsaResult<QcsaCircuit> {
        self.check_adders()?;

        let k = self.k;
        let mut alloc = RegisterAllocator::new();
        let mut circuit = Circuit::with_name(CIRCUIT_NAME);

        // Block 0 takes the real carry-in; only a with-carry adder can hold a 1
        let head: &dyn Adder = if self.carry_in {
            self.second.as_ref()
        } else {
            self.first.as_ref()
        };
        let block0 = instantiate(
            head,
            &mut alloc,
            &RegisterNames::block(0),
            self.carry_in,
            &self.a.slice_block(0, k)?,
            &self.b.slice_block(0, k)?,
        )?;
        splice(&mut circuit, &block0)?;

        let mut select = block0.skeleton.carry_out();
        let mut sum_registers = vec![block0.skeleton.registers().b.clone()];

        for block in 1..self.num_blocks() {
            let a = self.a.slice_block(block, k)?;
            let b = self.b.slice_block(block, k)?;

            let default = instantiate(
                self.first.as_ref(),
                &mut alloc,
                &RegisterNames::branch(block, 0),
                false,
                &a,
                &b,
            )?;
            let one = instantiate(
                self.second.as_ref(),
                &mut alloc,
                &RegisterNames::branch(block, 1),
                true,
                &a,
                &b,
            )?;
            splice(&mut circuit, &default)?;
            splice(&mut circuit, &one)?;

            let (d, o) = (default.skeleton.registers(), one.skeleton.registers());
            for j in 0..k {
                circuit.add_gate(Gate::Cswap(select, d.b.qubit(j), o.b.qubit(j)))?;
            }
            circuit.add_gate(Gate::Cswap(select, d.z.qubit(0), o.z.qubit(0)))?;

            log::debug!(
                "block {}: branches {} / {} selected by {}",
                block,
                d.b.label(),
                o.b.label(),
                circuit.qubit_label(select)
            );

            select = default.skeleton.carry_out();
            sum_registers.push(d.b.clone());
        }

        log::info!(
            "built {}-bit carry-select adder in {} blocks: {} qubits, {} gates",
            self.n,
            self.num_blocks(),
            circuit.num_qubits(),
            circuit.gate_count()
        );

        Ok(QcsaCircuit {
            circuit,
            layout: QcsaLayout {
                sum_registers,
                carry_out: select,
            },
        })
    }

    fn check_adders(&self) -> QcsaResult<()> {
        if self.first.as_no_carry().is_none() && self.first.as_with_carry().is_none() {
            return Err(QcsaError::IllegalAdder(format!(
                "{} offers neither the no-carry nor the with-carry capability",
                self.first.name()
            )));
        }
        if self.second.as_with_carry().is_none() {
            return Err(QcsaError::IllegalAdder(format!(
                "{} cannot take a carry-in",
                self.second.name()
            )));
        }
        Ok(())
    }
}

impl fmt::Debug for Qcsa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Qcsa")
            .field("n", &self.n)
            .field("k", &self.k)
            .field("first", &self.first.name())
            .field("second", &self.second.name())
            .field("a", &self.a.as_str())
            .field("b", &self.b.as_str())
            .field("carry_in", &self.carry_in)
            .finish()
    }
}

impl fmt::Display for Qcsa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Qcsa(n={}, k={}, {}/{})",
            self.n,
            self.k,
            self.first.name(),
            self.second.name()
        )
    }
}

// ============================================================================
// Block Helpers
// ============================================================================

/// Build and initialize one adder of width `a.width()`
///
/// A zero carry prefers the no-carry capability. A carry of one needs the
/// with-carry capability.
fn instantiate(
    adder: &dyn Adder,
    alloc: &mut RegisterAllocator,
    names: &RegisterNames,
    carry: bool,
    a: &OperandBits,
    b: &OperandBits,
) -> QcsaResult<BlockAdder> {
    let width = a.width();

    if !carry {
        if let Some(no_carry) = adder.as_no_carry() {
            let skeleton = no_carry.build(alloc, width, names)?;
            let circuit = no_carry.initialize(&skeleton, a.as_str(), b.as_str())?;
            return Ok(BlockAdder { skeleton, circuit });
        }
    }

    match adder.as_with_carry() {
        Some(with_carry) => {
            let skeleton = with_carry.build(alloc, width, names)?;
            let c = if carry { "1" } else { "0" };
            let circuit = with_carry.initialize(&skeleton, c, a.as_str(), b.as_str())?;
            Ok(BlockAdder { skeleton, circuit })
        }
        None => Err(QcsaError::IllegalAdder(format!(
            "{} cannot be instantiated with carry-in {}",
            adder.name(),
            u8::from(carry)
        ))),
    }
}

/// Share the block's registers with the global circuit, then merge it
fn splice(circuit: &mut Circuit, block: &BlockAdder) -> QcsaResult<()> {
    circuit.add_registers(block.circuit.registers())?;
    circuit.merge(&block.circuit)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use qcsa_adders::WithCarryAdder;
    use qcsa_backend::SimulatorBackend;

    fn simulate(qcsa: &QcsaCircuit) -> (u128, u128) {
        let bits = SimulatorBackend::ideal(128)
            .run_basis(&qcsa.circuit)
            .unwrap();
        qcsa.decode(&bits).unwrap()
    }

    fn add(n: usize, k: usize, a: u128, b: u128, c: u128) -> (u128, u128) {
        let mut qcsa = Qcsa::new(n, k).unwrap();
        qcsa.initialize(
            OperandBits::from_value(a, n).as_str(),
            OperandBits::from_value(b, n).as_str(),
            if c == 1 { "1" } else { "0" },
        )
        .unwrap();
        simulate(&qcsa.build().unwrap())
    }

    /// Reference result from a single with-carry adder over the full width
    fn monolithic(n: usize, a: u128, b: u128, c: u128) -> (u128, u128) {
        let mut alloc = RegisterAllocator::new();
        let skeleton = ThapliyalWithCarry
            .build(&mut alloc, n, &RegisterNames::default())
            .unwrap();
        let circuit = ThapliyalWithCarry
            .initialize(
                &skeleton,
                if c == 1 { "1" } else { "0" },
                OperandBits::from_value(a, n).as_str(),
                OperandBits::from_value(b, n).as_str(),
            )
            .unwrap();
        let bits = SimulatorBackend::ideal(128).run_basis(&circuit).unwrap();
        (
            circuit.extract(&bits, &skeleton.sum_qubits()).unwrap(),
            circuit.extract(&bits, &[skeleton.carry_out()]).unwrap(),
        )
    }

    /// Adder offering no capability at all
    struct Opaque;

    impl Adder for Opaque {
        fn name(&self) -> &str {
            "Opaque"
        }
    }

    #[test]
    fn test_block_size_must_divide_width() {
        assert!(matches!(
            Qcsa::new(8, 3),
            Err(QcsaError::IllegalArgument(_))
        ));
        assert!(matches!(
            Qcsa::new(8, 0),
            Err(QcsaError::IllegalArgument(_))
        ));
    }

    #[test]
    fn test_single_block_has_no_cswaps() {
        let qcsa = Qcsa::new(4, 4).unwrap().build().unwrap();
        assert_eq!(qcsa.circuit.count_named("cswap"), 0);
        assert_eq!(qcsa.num_qubits(), 9);
        assert_eq!(qcsa.layout.sum_registers.len(), 1);
        assert_eq!(qcsa.layout.sum_registers[0].label(), "b0");
    }

    #[test]
    fn test_cswap_chain_length() {
        for (n, k) in [(4, 2), (6, 2), (6, 3), (8, 2), (8, 4)] {
            let qcsa = Qcsa::new(n, k).unwrap().build().unwrap();
            assert_eq!(
                qcsa.circuit.count_named("cswap"),
                (n / k - 1) * (k + 1),
                "n={} k={}",
                n,
                k
            );
        }
    }

    #[test]
    fn test_register_layout() {
        let qcsa = Qcsa::new(6, 2).unwrap().build().unwrap();
        let labels: Vec<&str> = qcsa
            .circuit
            .registers()
            .iter()
            .map(|r| r.label())
            .collect();

        assert_eq!(
            labels,
            vec![
                "a0", "b0", "z0", "a1_0", "b1_0", "z1_0", "c1_1", "a1_1", "b1_1", "z1_1", "a2_0",
                "b2_0", "z2_0", "c2_1", "a2_1", "b2_1", "z2_1",
            ]
        );
        // block 0: 2k+1, each later block: (2k+1) + (2k+2)
        assert_eq!(qcsa.num_qubits(), 5 + 2 * 11);
        assert_eq!(qcsa.circuit.name(), Some(CIRCUIT_NAME));
    }

    #[test]
    fn test_sum_lives_in_default_branches() {
        let qcsa = Qcsa::new(6, 2).unwrap().build().unwrap();
        let labels: Vec<&str> = qcsa
            .layout
            .sum_registers
            .iter()
            .map(|r| r.label())
            .collect();
        assert_eq!(labels, vec!["b0", "b1_0", "b2_0"]);
        assert_eq!(qcsa.circuit.qubit_label(qcsa.layout.carry_out), "z2_0[0]");
    }

    #[test]
    fn test_carry_in_uses_with_carry_head() {
        let mut qcsa = Qcsa::new(4, 2).unwrap();
        qcsa.initialize("0000", "0000", "1").unwrap();
        let built = qcsa.build().unwrap();

        assert!(built.circuit.register_by_label("c0").is_some());
        assert_eq!(simulate(&built), (1, 0));

        qcsa.initialize("0000", "0000", "0").unwrap();
        let built = qcsa.build().unwrap();
        assert!(built.circuit.register_by_label("c0").is_none());
        assert_eq!(simulate(&built), (0, 0));
    }

    #[test]
    fn test_initialize_validates_operands() {
        let mut qcsa = Qcsa::new(4, 2).unwrap();
        for (a, b, c) in [
            ("001", "0001", "0"),
            ("0001", "00011", "0"),
            ("0002", "0001", "0"),
            ("0001", "0001", "01"),
            ("0001", "0001", ""),
        ] {
            assert!(matches!(
                qcsa.initialize(a, b, c),
                Err(QcsaError::IllegalStringFormat(_))
            ));
        }
        // failed calls leave the operands untouched
        assert_eq!(qcsa.a().as_str(), "0000");
        assert!(!qcsa.carry_in());
    }

    #[test]
    fn test_uninitialized_adds_zeros() {
        let qcsa = Qcsa::new(4, 2).unwrap().build().unwrap();
        assert_eq!(simulate(&qcsa), (0, 0));
    }

    #[test]
    fn test_concrete_addition() {
        let mut qcsa = Qcsa::new(4, 2).unwrap();
        qcsa.initialize("0111", "0011", "0").unwrap();
        let built = qcsa.build().unwrap();

        let bits = SimulatorBackend::ideal(64).run_basis(&built.circuit).unwrap();
        let (sum, carry) = built.decode_bits(&bits).unwrap();
        assert_eq!(sum.as_str(), "1010");
        assert!(!carry);
    }

    #[test]
    fn test_overflow_sets_carry() {
        assert_eq!(add(6, 3, 0b111111, 0b000001, 0), (0, 1));
        assert_eq!(add(6, 2, 0b101010, 0b010101, 1), (0, 1));
    }

    #[test]
    fn test_exhaustive_four_bits_in_two_blocks() {
        for a in 0..16 {
            for b in 0..16 {
                for c in 0..2 {
                    let total = a + b + c;
                    assert_eq!(
                        add(4, 2, a, b, c),
                        (total % 16, total >> 4),
                        "a={} b={} c={}",
                        a,
                        b,
                        c
                    );
                }
            }
        }
    }

    #[test]
    fn test_opaque_adder_rejected() {
        let qcsa = Qcsa::new(4, 2)
            .unwrap()
            .with_adders(Box::new(Opaque), Box::new(ThapliyalWithCarry));
        assert!(matches!(qcsa.build(), Err(QcsaError::IllegalAdder(_))));

        let qcsa = Qcsa::new(4, 2)
            .unwrap()
            .with_adders(Box::new(Thapliyal), Box::new(Thapliyal));
        assert!(matches!(qcsa.build(), Err(QcsaError::IllegalAdder(_))));
    }

    #[test]
    fn test_with_carry_default_branches() {
        let mut qcsa = Qcsa::new(4, 2)
            .unwrap()
            .with_adders(Box::new(ThapliyalWithCarry), Box::new(ThapliyalWithCarry));
        qcsa.initialize("0110", "0111", "0").unwrap();
        assert_eq!(simulate(&qcsa.build().unwrap()), (13, 0));
    }

    #[test]
    fn test_block_size_below_two_fails_in_adder() {
        assert_eq!(
            Qcsa::new(4, 1).unwrap().build().unwrap_err(),
            QcsaError::IllegalOperandsSize { size: 1 }
        );
    }

    #[test]
    fn test_from_config() {
        let config = QcsaConfig::new(8, 4);
        let qcsa = Qcsa::from_config(&config).unwrap();
        assert_eq!((qcsa.n(), qcsa.k(), qcsa.num_blocks()), (8, 4, 2));

        assert!(Qcsa::from_config(&QcsaConfig::new(8, 3)).is_err());
    }

    #[test]
    fn test_build_is_deterministic() {
        let mut qcsa = Qcsa::new(6, 3).unwrap();
        qcsa.initialize("101101", "011011", "1").unwrap();
        let (first, second) = (qcsa.build().unwrap(), qcsa.build().unwrap());
        assert_eq!(first.circuit.to_qasm(), second.circuit.to_qasm());
        assert_eq!(
            first.circuit.qubit_label(first.layout.carry_out),
            second.circuit.qubit_label(second.layout.carry_out)
        );
    }

    proptest::proptest! {
        #[test]
        fn prop_matches_monolithic_adder(
            shape in proptest::sample::select(vec![(4usize, 2usize), (6, 2), (6, 3), (8, 2), (8, 4)]),
            a in 0u128..256,
            b in 0u128..256,
            c in 0u128..2,
        ) {
            let (n, k) = shape;
            let mask = (1u128 << n) - 1;
            let (a, b) = (a & mask, b & mask);
            proptest::prop_assert_eq!(add(n, k, a, b, c), monolithic(n, a, b, c));
        }
    }
}
