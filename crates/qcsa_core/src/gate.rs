//! Reversible gate definitions for QCSA
//!
//! Gantree: L1_Circuit → Gate
//!
//! The gate set needed by ripple-carry and carry-select adders: NOT, CNOT,
//! Toffoli, controlled square roots of NOT, (controlled) swaps and the two
//! composite 3-qubit gates Peres and TR.

use crate::composite::CompositeGate;
use crate::register::Qubit;
use serde::{Deserialize, Serialize};

/// Quantum gate enumeration
/// Gantree: Gate // 게이트 enum
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gate {
    // ========================================================================
    // Single-Qubit Gates
    // ========================================================================
    /// Pauli-X gate (NOT)
    /// Gantree: X(Qubit) // 파울리 X
    X(Qubit),

    /// SX gate (sqrt(X))
    Sx(Qubit),

    /// SX-dagger gate
    Sxdg(Qubit),

    // ========================================================================
    // Two-Qubit Gates
    // ========================================================================
    /// CNOT (control, target)
    /// Gantree: Cnot(Qubit, Qubit) // CNOT
    Cnot(Qubit, Qubit),

    /// Controlled-SX (control, target)
    Csx(Qubit, Qubit),

    /// Controlled-SX-dagger (control, target)
    Csxdg(Qubit, Qubit),

    /// SWAP
    Swap(Qubit, Qubit),

    // ========================================================================
    // Three-Qubit Gates
    // ========================================================================
    /// Toffoli (CCX)
    Ccx(Qubit, Qubit, Qubit),

    /// Controlled-SWAP (Fredkin): control, then the swapped pair
    /// Gantree: Cswap(c, t1, t2) // 선택 스왑
    Cswap(Qubit, Qubit, Qubit),

    /// Peres gate (A, B, C)
    Peres(Qubit, Qubit, Qubit),

    /// TR gate (A, B, C)
    Tr(Qubit, Qubit, Qubit),

    // ========================================================================
    // Control
    // ========================================================================
    /// Barrier (visualization only)
    Barrier(Vec<Qubit>),

    /// Measure all qubits (convenience)
    MeasureAll,
}

impl Gate {
    // ========================================================================
    // Gate Properties
    // ========================================================================

    /// Get qubits involved in this gate
    /// Gantree: qubits(&self) -> Vec<Qubit> // 관련 큐비트
    pub fn qubits(&self) -> Vec<Qubit> {
        match self {
            Gate::X(q) | Gate::Sx(q) | Gate::Sxdg(q) => vec![*q],

            Gate::Cnot(c, t) | Gate::Csx(c, t) | Gate::Csxdg(c, t) | Gate::Swap(c, t) => {
                vec![*c, *t]
            }

            Gate::Ccx(a, b, c)
            | Gate::Cswap(a, b, c)
            | Gate::Peres(a, b, c)
            | Gate::Tr(a, b, c) => vec![*a, *b, *c],

            Gate::Barrier(qs) => qs.clone(),
            Gate::MeasureAll => vec![],
        }
    }

    /// Check if gate is single-qubit
    pub fn is_single_qubit(&self) -> bool {
        matches!(self, Gate::X(_) | Gate::Sx(_) | Gate::Sxdg(_))
    }

    /// Check if gate is two-qubit
    pub fn is_two_qubit(&self) -> bool {
        matches!(
            self,
            Gate::Cnot(_, _) | Gate::Csx(_, _) | Gate::Csxdg(_, _) | Gate::Swap(_, _)
        )
    }

    /// Check if gate is three-qubit
    pub fn is_three_qubit(&self) -> bool {
        matches!(
            self,
            Gate::Ccx(_, _, _) | Gate::Cswap(_, _, _) | Gate::Peres(_, _, _) | Gate::Tr(_, _, _)
        )
    }

    /// Check if gate is a composite (Peres or TR)
    pub fn is_composite(&self) -> bool {
        self.composite().is_some()
    }

    /// Check if gate only annotates the circuit
    pub fn is_directive(&self) -> bool {
        matches!(self, Gate::Barrier(_) | Gate::MeasureAll)
    }

    /// Composite kind and operands, if this is a composite gate
    pub fn composite(&self) -> Option<(CompositeGate, [Qubit; 3])> {
        match self {
            Gate::Peres(a, b, c) => Some((CompositeGate::Peres, [*a, *b, *c])),
            Gate::Tr(a, b, c) => Some((CompositeGate::Tr, [*a, *b, *c])),
            _ => None,
        }
    }

    /// Expand composites into their primitive decomposition
    /// Gantree: decompose(&self) -> Vec<Gate> // 분해
    pub fn decompose(&self) -> Vec<Gate> {
        match self.composite() {
            Some((kind, [a, b, c])) => kind.decompose(a, b, c).to_vec(),
            None => vec![self.clone()],
        }
    }

    /// Get gate name (OpenQASM mnemonic)
    pub fn name(&self) -> &'static str {
        match self {
            Gate::X(_) => "x",
            Gate::Sx(_) => "sx",
            Gate::Sxdg(_) => "sxdg",
            Gate::Cnot(_, _) => "cx",
            Gate::Csx(_, _) => "csx",
            Gate::Csxdg(_, _) => "csxdg",
            Gate::Swap(_, _) => "swap",
            Gate::Ccx(_, _, _) => "ccx",
            Gate::Cswap(_, _, _) => "cswap",
            Gate::Peres(_, _, _) => CompositeGate::Peres.name(),
            Gate::Tr(_, _, _) => CompositeGate::Tr.name(),
            Gate::Barrier(_) => "barrier",
            Gate::MeasureAll => "measure",
        }
    }

    /// Convert to an OpenQASM 2.0 statement, resolving qubit names with `label`
    /// Gantree: to_qasm_with(&self, f) -> String // QASM 변환
    pub fn to_qasm_with<F>(&self, label: F) -> String
    where
        F: Fn(Qubit) -> String,
    {
        match self {
            Gate::MeasureAll => "measure q -> c;".to_string(),
            Gate::Barrier(qs) if qs.is_empty() => "barrier q;".to_string(),
            _ => {
                let operands: Vec<String> = self.qubits().into_iter().map(label).collect();
                format!("{} {};", self.name(), operands.join(","))
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::register::RegisterAllocator;

    fn qubits(n: usize) -> Vec<Qubit> {
        let mut alloc = RegisterAllocator::new();
        alloc.allocate("q", n).unwrap().qubits()
    }

    #[test]
    fn test_gate_qubits() {
        let q = qubits(3);
        assert_eq!(Gate::X(q[0]).qubits(), vec![q[0]]);
        assert_eq!(Gate::Cnot(q[0], q[1]).qubits(), vec![q[0], q[1]]);
        assert_eq!(Gate::Cswap(q[0], q[1], q[2]).qubits(), vec![q[0], q[1], q[2]]);
        assert!(Gate::MeasureAll.qubits().is_empty());
    }

    #[test]
    fn test_gate_classification() {
        let q = qubits(3);
        assert!(Gate::X(q[0]).is_single_qubit());
        assert!(Gate::Csxdg(q[0], q[1]).is_two_qubit());
        assert!(Gate::Peres(q[0], q[1], q[2]).is_three_qubit());
        assert!(Gate::Tr(q[0], q[1], q[2]).is_composite());
        assert!(!Gate::Ccx(q[0], q[1], q[2]).is_composite());
        assert!(Gate::MeasureAll.is_directive());
    }

    #[test]
    fn test_decompose_primitive_is_identity() {
        let q = qubits(2);
        let gate = Gate::Cnot(q[0], q[1]);
        assert_eq!(gate.decompose(), vec![gate]);
    }

    #[test]
    fn test_decompose_peres() {
        let q = qubits(3);
        let gates = Gate::Peres(q[0], q[1], q[2]).decompose();
        assert_eq!(
            gates,
            vec![
                Gate::Csxdg(q[0], q[2]),
                Gate::Csxdg(q[1], q[2]),
                Gate::Cnot(q[0], q[1]),
                Gate::Csx(q[1], q[2]),
            ]
        );
    }

    #[test]
    fn test_gate_to_qasm() {
        let q = qubits(3);
        let label = |qb: Qubit| format!("q[{}]", qb.index);
        assert_eq!(Gate::X(q[0]).to_qasm_with(label), "x q[0];");
        assert_eq!(
            Gate::Cswap(q[2], q[0], q[1]).to_qasm_with(label),
            "cswap q[2],q[0],q[1];"
        );
        assert_eq!(Gate::Tr(q[0], q[1], q[2]).to_qasm_with(label), "tr q[0],q[1],q[2];");
    }
}
