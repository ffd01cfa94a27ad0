//! Quantum circuit structure for QCSA
//!
//! Gantree: L1_Circuit → Circuit
//!
//! A circuit is an ordered list of registers plus an append-only list of
//! gates over those registers. Global qubit numbering is little-endian in
//! register insertion order: the first register occupies indices
//! `0..size`, the next one follows, and so on.

use crate::composite::CompositeGate;
use crate::error::{QcsaError, QcsaResult};
use crate::gate::Gate;
use crate::register::{QuantumRegister, Qubit, RegisterId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Quantum circuit
/// Gantree: Circuit // 회로 구조체
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Circuit {
    /// Optional circuit name
    name: Option<String>,

    /// Registers in layout order
    /// Gantree: registers: Vec<QuantumRegister> // 레지스터 목록
    registers: Vec<QuantumRegister>,

    /// Gate sequence
    /// Gantree: gates: Vec<Gate> // 게이트 목록
    gates: Vec<Gate>,
}

impl Circuit {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create a new empty circuit
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a circuit with a name
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Create an empty circuit over the given registers
    pub fn from_registers<'a>(
        registers: impl IntoIterator<Item = &'a QuantumRegister>,
    ) -> QcsaResult<Self> {
        let mut circuit = Self::new();
        circuit.add_registers(registers)?;
        Ok(circuit)
    }

    // ========================================================================
    // Registers
    // ========================================================================

    /// Add a register
    ///
    /// Adding a register that is already present is a no-op. A different
    /// register reusing an existing handle or label is rejected.
    /// Gantree: add_register(&mut, QuantumRegister) -> Result // 레지스터 추가
    pub fn add_register(&mut self, register: &QuantumRegister) -> QcsaResult<()> {
        match self.register(register.id()) {
            Some(existing) if existing == register => return Ok(()),
            Some(_) => return Err(QcsaError::DuplicateRegister(register.label().to_string())),
            None => {}
        }
        if self.registers.iter().any(|r| r.label() == register.label()) {
            return Err(QcsaError::DuplicateRegister(register.label().to_string()));
        }
        self.registers.push(register.clone());
        Ok(())
    }

    /// Add several registers
    pub fn add_registers<'a>(
        &mut self,
        registers: impl IntoIterator<Item = &'a QuantumRegister>,
    ) -> QcsaResult<()> {
        for register in registers {
            self.add_register(register)?;
        }
        Ok(())
    }

    /// Check if the circuit contains a register
    pub fn has_register(&self, id: RegisterId) -> bool {
        self.registers.iter().any(|r| r.id() == id)
    }

    /// Look up a register by handle
    pub fn register(&self, id: RegisterId) -> Option<&QuantumRegister> {
        self.registers.iter().find(|r| r.id() == id)
    }

    /// Look up a register by label
    pub fn register_by_label(&self, label: &str) -> Option<&QuantumRegister> {
        self.registers.iter().find(|r| r.label() == label)
    }

    /// Get registers in layout order
    pub fn registers(&self) -> &[QuantumRegister] {
        &self.registers
    }

    /// Total number of qubits over all registers
    pub fn num_qubits(&self) -> usize {
        self.registers.iter().map(|r| r.size()).sum()
    }

    /// Global (little-endian) index of a qubit
    /// Gantree: qubit_index(&self, Qubit) -> Option<usize> // 전역 인덱스
    pub fn qubit_index(&self, qubit: Qubit) -> Option<usize> {
        let mut offset = 0;
        for register in &self.registers {
            if register.id() == qubit.register {
                return (qubit.index < register.size()).then_some(offset + qubit.index);
            }
            offset += register.size();
        }
        None
    }

    /// Human-readable name of a qubit, e.g. `a0_1[2]`
    pub fn qubit_label(&self, qubit: Qubit) -> String {
        match self.register(qubit.register) {
            Some(register) => format!("{}[{}]", register.label(), qubit.index),
            None => format!("{}[{}]", qubit.register, qubit.index),
        }
    }

    // ========================================================================
    // Basic Operations
    // ========================================================================

    /// Add a gate to the circuit
    /// Gantree: add_gate(&mut, Gate) -> Result // 게이트 추가
    pub fn add_gate(&mut self, gate: Gate) -> QcsaResult<()> {
        self.check_gate(&gate, |id| id.to_string())?;
        self.gates.push(gate);
        Ok(())
    }

    /// Add multiple gates
    pub fn add_gates(&mut self, gates: impl IntoIterator<Item = Gate>) -> QcsaResult<()> {
        for gate in gates {
            self.add_gate(gate)?;
        }
        Ok(())
    }

    /// Append every operation of `source`, in order
    ///
    /// Every register referenced by `source` must already be part of this
    /// circuit, with the same handle, label and size. Nothing is appended
    /// unless all operations validate.
    /// Gantree: merge(&mut, &Circuit) -> Result // 회로 병합
    pub fn merge(&mut self, source: &Circuit) -> QcsaResult<()> {
        let source_label = |id: RegisterId| {
            source
                .register(id)
                .map(|r| r.label().to_string())
                .unwrap_or_else(|| id.to_string())
        };
        for register in &source.registers {
            if matches!(self.register(register.id()), Some(own) if own != register) {
                return Err(QcsaError::UnregisteredQubit {
                    register: register.label().to_string(),
                });
            }
        }
        for gate in &source.gates {
            self.check_gate(gate, source_label)?;
        }
        log::trace!(
            "merging {} gates into circuit with {} registers",
            source.gates.len(),
            self.registers.len()
        );
        self.gates.extend(source.gates.iter().cloned());
        Ok(())
    }

    /// Get gates
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Get circuit name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Set circuit name
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Check if circuit is empty
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Copy of the circuit with every composite gate expanded
    pub fn decompose(&self) -> Circuit {
        Circuit {
            name: self.name.clone(),
            registers: self.registers.clone(),
            gates: self.gates.iter().flat_map(Gate::decompose).collect(),
        }
    }

    // ========================================================================
    // Circuit Analysis
    // ========================================================================

    /// Calculate circuit depth (longest path)
    /// Gantree: depth(&self) -> usize // 깊이 계산
    pub fn depth(&self) -> usize {
        let mut qubit_depths = vec![0usize; self.num_qubits()];

        for gate in &self.gates {
            let indices: Vec<usize> = gate
                .qubits()
                .into_iter()
                .filter_map(|q| self.qubit_index(q))
                .collect();

            if indices.is_empty() {
                // MeasureAll or global barrier
                let max_depth = qubit_depths.iter().max().copied().unwrap_or(0);
                for d in &mut qubit_depths {
                    *d = max_depth + 1;
                }
            } else {
                let max_depth = indices
                    .iter()
                    .map(|&i| qubit_depths[i])
                    .max()
                    .unwrap_or(0);
                for &i in &indices {
                    qubit_depths[i] = max_depth + 1;
                }
            }
        }

        qubit_depths.into_iter().max().unwrap_or(0)
    }

    /// Get total gate count
    pub fn gate_count(&self) -> usize {
        self.gates.len()
    }

    /// Count single-qubit gates
    pub fn count_1q(&self) -> usize {
        self.gates.iter().filter(|g| g.is_single_qubit()).count()
    }

    /// Count two-qubit gates
    pub fn count_2q(&self) -> usize {
        self.gates.iter().filter(|g| g.is_two_qubit()).count()
    }

    /// Count three-qubit gates (composites included)
    pub fn count_3q(&self) -> usize {
        self.gates.iter().filter(|g| g.is_three_qubit()).count()
    }

    /// Count Peres and TR insertions
    pub fn count_composite(&self) -> usize {
        self.gates.iter().filter(|g| g.is_composite()).count()
    }

    /// Count gates with the given OpenQASM name
    pub fn count_named(&self, name: &str) -> usize {
        self.gates.iter().filter(|g| g.name() == name).count()
    }

    // ========================================================================
    // Result Decoding
    // ========================================================================

    /// Read `qubits` (least significant first) out of a measured bitstring
    ///
    /// The bitstring is printed most significant global qubit first, as the
    /// simulator reports it.
    /// Gantree: extract(&self, bitstring, qubits) -> Result<u128> // 결과 해독
    pub fn extract(&self, bitstring: &str, qubits: &[Qubit]) -> QcsaResult<u128> {
        let width = self.num_qubits();
        let bytes = bitstring.as_bytes();
        if bytes.len() != width || bytes.iter().any(|&b| b != b'0' && b != b'1') {
            return Err(QcsaError::IllegalStringFormat(format!(
                "expected a {}-bit measurement, got '{}'",
                width, bitstring
            )));
        }
        if qubits.len() > 128 {
            return Err(QcsaError::IllegalArgument(format!(
                "cannot decode {} qubits into a 128-bit value",
                qubits.len()
            )));
        }

        let mut value = 0u128;
        for (bit, &qubit) in qubits.iter().enumerate() {
            let index = self.qubit_index(qubit).ok_or_else(|| QcsaError::UnregisteredQubit {
                register: qubit.register.to_string(),
            })?;
            if bytes[width - 1 - index] == b'1' {
                value |= 1u128 << bit;
            }
        }
        Ok(value)
    }

    // ========================================================================
    // Validation
    // ========================================================================

    fn check_gate<F>(&self, gate: &Gate, label: F) -> QcsaResult<()>
    where
        F: Fn(RegisterId) -> String,
    {
        for qubit in gate.qubits() {
            let register = self
                .register(qubit.register)
                .ok_or_else(|| QcsaError::UnregisteredQubit {
                    register: label(qubit.register),
                })?;
            if qubit.index >= register.size() {
                return Err(QcsaError::QubitOutOfRange {
                    register: register.label().to_string(),
                    index: qubit.index,
                    size: register.size(),
                });
            }
        }
        Ok(())
    }

    // ========================================================================
    // QASM Conversion
    // ========================================================================

    /// Convert to OpenQASM 2.0 string
    ///
    /// Each register becomes a named `qreg`. `csxdg`, Peres and TR are
    /// emitted as gate definitions when used.
    /// Gantree: to_qasm(&self) -> String // QASM2 출력
    pub fn to_qasm(&self) -> String {
        let mut lines = vec![
            "OPENQASM 2.0;".to_string(),
            "include \"qelib1.inc\";".to_string(),
        ];

        let uses = |name: &str| {
            self.gates
                .iter()
                .flat_map(Gate::decompose)
                .any(|g| g.name() == name)
        };
        if uses("csxdg") {
            lines.push("gate csxdg a,b { h b; cu1(-pi/2) a,b; h b; }".to_string());
        }
        for kind in CompositeGate::ALL {
            if self.count_named(kind.name()) > 0 {
                lines.push(kind.qasm_definition());
            }
        }
        lines.push(String::new());

        for register in &self.registers {
            lines.push(format!("qreg {}[{}];", register.label(), register.size()));
        }
        let creg = self.classical_register_name();
        lines.push(format!("creg {}[{}];", creg, self.num_qubits()));
        lines.push(String::new());

        for gate in &self.gates {
            match gate {
                Gate::MeasureAll => {
                    for register in &self.registers {
                        for qubit in register.qubits() {
                            if let Some(index) = self.qubit_index(qubit) {
                                lines.push(format!(
                                    "measure {} -> {}[{}];",
                                    self.qubit_label(qubit),
                                    creg,
                                    index
                                ));
                            }
                        }
                    }
                }
                _ => lines.push(gate.to_qasm_with(|q| self.qubit_label(q))),
            }
        }

        lines.join("\n")
    }

    /// `meas`, padded with underscores until it clashes with no `qreg`
    fn classical_register_name(&self) -> String {
        let mut name = String::from("meas");
        while self.register_by_label(&name).is_some() {
            name.push('_');
        }
        name
    }
}

/// Append all operations of `source` onto `target`
///
/// See [`Circuit::merge`]; fails with [`QcsaError::UnregisteredQubit`] when
/// `source` touches a register `target` does not contain.
pub fn merge_circuit(target: &mut Circuit, source: &Circuit) -> QcsaResult<()> {
    target.merge(source)
}

// ============================================================================
// Display
// ============================================================================

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}({} qubits, {} registers, {} gates)",
            self.name().unwrap_or("Circuit"),
            self.num_qubits(),
            self.registers.len(),
            self.gates.len()
        )?;
        writeln!(f, "  Depth: {}", self.depth())?;
        writeln!(f, "  1Q gates: {}", self.count_1q())?;
        writeln!(f, "  2Q gates: {}", self.count_2q())?;
        writeln!(f, "  3Q gates: {} ({} Peres/TR)", self.count_3q(), self.count_composite())?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
