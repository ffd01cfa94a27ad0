//! Circuit builder for QCSA
//!
//! Gantree: L1_Circuit → CircuitBuilder
//!
//! Fluent builder for gate sequences over already-allocated registers.
//! The first invalid gate is remembered and reported by [`CircuitBuilder::build`],
//! so long chains stay readable without dropping errors.

use crate::circuit::Circuit;
use crate::error::{QcsaError, QcsaResult};
use crate::gate::Gate;
use crate::register::{QuantumRegister, Qubit};

/// Fluent circuit builder (consuming self pattern)
/// Gantree: CircuitBuilder // 빌더 패턴
pub struct CircuitBuilder {
    /// Internal circuit being built
    circuit: Circuit,

    /// First error encountered, reported by `build`
    error: Option<QcsaError>,
}

impl CircuitBuilder {
    // ========================================================================
    // Constructor
    // ========================================================================

    /// Create a new circuit builder
    pub fn new() -> Self {
        Self {
            circuit: Circuit::new(),
            error: None,
        }
    }

    /// Create with circuit name
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            circuit: Circuit::with_name(name),
            error: None,
        }
    }

    /// Register a qubit register
    pub fn register(mut self, register: &QuantumRegister) -> Self {
        let result = self.circuit.add_register(register);
        self.record(result);
        self
    }

    /// Register several qubit registers
    pub fn registers<'a>(mut self, registers: impl IntoIterator<Item = &'a QuantumRegister>) -> Self {
        let result = self.circuit.add_registers(registers);
        self.record(result);
        self
    }

    // ========================================================================
    // Gates
    // ========================================================================

    /// Append an arbitrary gate
    pub fn gate(mut self, gate: Gate) -> Self {
        if self.error.is_none() {
            let result = self.circuit.add_gate(gate);
            self.record(result);
        }
        self
    }

    /// Add Pauli-X gate
    /// Gantree: x(self, q) -> Self // X 추가
    pub fn x(self, qubit: Qubit) -> Self {
        self.gate(Gate::X(qubit))
    }

    /// Add CNOT gate
    /// Gantree: cx(self, c, t) -> Self // CNOT 추가
    pub fn cx(self, control: Qubit, target: Qubit) -> Self {
        self.gate(Gate::Cnot(control, target))
    }

    /// Add controlled-SX gate
    pub fn csx(self, control: Qubit, target: Qubit) -> Self {
        self.gate(Gate::Csx(control, target))
    }

    /// Add controlled-SX-dagger gate
    pub fn csxdg(self, control: Qubit, target: Qubit) -> Self {
        self.gate(Gate::Csxdg(control, target))
    }

    /// Add SWAP gate
    pub fn swap(self, q1: Qubit, q2: Qubit) -> Self {
        self.gate(Gate::Swap(q1, q2))
    }

    /// Add Toffoli (CCX) gate
    pub fn ccx(self, c1: Qubit, c2: Qubit, target: Qubit) -> Self {
        self.gate(Gate::Ccx(c1, c2, target))
    }

    /// Add Fredkin (CSWAP) gate
    /// Gantree: cswap(self, c, t1, t2) -> Self // CSWAP 추가
    pub fn cswap(self, control: Qubit, t1: Qubit, t2: Qubit) -> Self {
        self.gate(Gate::Cswap(control, t1, t2))
    }

    /// Add Peres gate
    pub fn peres(self, a: Qubit, b: Qubit, c: Qubit) -> Self {
        self.gate(Gate::Peres(a, b, c))
    }

    /// Add TR gate
    pub fn tr(self, a: Qubit, b: Qubit, c: Qubit) -> Self {
        self.gate(Gate::Tr(a, b, c))
    }

    /// Add X on every listed qubit
    pub fn x_all(self, qubits: impl IntoIterator<Item = Qubit>) -> Self {
        qubits.into_iter().fold(self, |builder, q| builder.x(q))
    }

    /// Add barrier over all registered qubits
    pub fn barrier(self) -> Self {
        let qubits: Vec<Qubit> = self
            .circuit
            .registers()
            .iter()
            .flat_map(|r| r.qubits())
            .collect();
        self.gate(Gate::Barrier(qubits))
    }

    /// Add measurement on all qubits
    pub fn measure_all(self) -> Self {
        self.gate(Gate::MeasureAll)
    }

    /// Append a fragment produced by a closure (loops inside a chain)
    pub fn apply<F>(self, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        f(self)
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Build and return the circuit, or the first error met while building
    /// Gantree: build(self) -> Result<Circuit> // 빌드
    pub fn build(self) -> QcsaResult<Circuit> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.circuit),
        }
    }

    /// Get reference to current circuit state
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    fn record(&mut self, result: QcsaResult<()>) {
        if let Err(err) = result {
            self.error.get_or_insert(err);
        }
    }
}

impl Default for CircuitBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::register::RegisterAllocator;

    #[test]
    fn test_builder_basic() {
        let mut alloc = RegisterAllocator::new();
        let a = alloc.allocate("a", 2).unwrap();
        let z = alloc.allocate("z", 1).unwrap();

        let circuit = CircuitBuilder::with_name("demo")
            .registers([&a, &z])
            .x(a.qubit(0))
            .cx(a.qubit(0), a.qubit(1))
            .peres(a.qubit(0), a.qubit(1), z.qubit(0))
            .measure_all()
            .build()
            .unwrap();

        assert_eq!(circuit.num_qubits(), 3);
        assert_eq!(circuit.gate_count(), 4);
        assert_eq!(circuit.count_composite(), 1);
    }

    #[test]
    fn test_builder_loops() {
        let mut alloc = RegisterAllocator::new();
        let a = alloc.allocate("a", 4).unwrap();

        let circuit = CircuitBuilder::new()
            .register(&a)
            .apply(|mut b| {
                for i in 1..4 {
                    b = b.cx(a.qubit(i - 1), a.qubit(i));
                }
                b
            })
            .x_all(a.qubits())
            .build()
            .unwrap();

        assert_eq!(circuit.count_2q(), 3);
        assert_eq!(circuit.count_1q(), 4);
    }

    #[test]
    fn test_builder_reports_first_error() {
        let mut alloc = RegisterAllocator::new();
        let a = alloc.allocate("a", 2).unwrap();
        let stray = alloc.allocate("stray", 1).unwrap();

        let result = CircuitBuilder::new()
            .register(&a)
            .x(stray.qubit(0))
            .x(a.qubit(5))
            .build();

        assert!(matches!(result, Err(QcsaError::UnregisteredQubit { .. })));
    }
}
