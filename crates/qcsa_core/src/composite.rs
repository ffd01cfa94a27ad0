//! Elementary 3-qubit reversible gates
//!
//! Gantree: L1_Circuit → CompositeGate
//!
//! Peres and TR are defined once by their decomposition into controlled
//! square roots of NOT and a CNOT, then inserted into circuits as atomic
//! [`Gate::Peres`] / [`Gate::Tr`] operations.
//!
//! | gate  | output on basis input (A, B, C) |
//! |-------|---------------------------------|
//! | Peres | (A, A⊕B, C⊕AB)                  |
//! | TR    | (A, A⊕B, C⊕A¬B)                 |

use crate::gate::Gate;
use crate::register::Qubit;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Composite reversible gate kind
/// Gantree: CompositeGate // Peres/TR
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompositeGate {
    /// Peres gate
    Peres,
    /// TR gate
    Tr,
}

impl CompositeGate {
    /// All composite kinds
    pub const ALL: [CompositeGate; 2] = [CompositeGate::Peres, CompositeGate::Tr];

    /// OpenQASM gate name
    pub fn name(&self) -> &'static str {
        match self {
            CompositeGate::Peres => "peres",
            CompositeGate::Tr => "tr",
        }
    }

    /// Primitive decomposition on qubits (A, B, C)
    /// Gantree: decompose(a, b, c) -> [Gate; 4] // 분해
    pub fn decompose(&self, a: Qubit, b: Qubit, c: Qubit) -> [Gate; 4] {
        match self {
            CompositeGate::Peres => [
                Gate::Csxdg(a, c),
                Gate::Csxdg(b, c),
                Gate::Cnot(a, b),
                Gate::Csx(b, c),
            ],
            CompositeGate::Tr => [
                Gate::Csxdg(b, c),
                Gate::Cnot(a, b),
                Gate::Csx(a, c),
                Gate::Csx(b, c),
            ],
        }
    }

    /// Classical action on a basis state (A, B, C)
    pub fn apply(&self, [a, b, c]: [bool; 3]) -> [bool; 3] {
        match self {
            CompositeGate::Peres => [a, a ^ b, c ^ (a & b)],
            CompositeGate::Tr => [a, a ^ b, c ^ (a & !b)],
        }
    }

    /// Full truth table, inputs enumerated as the binary numbers ABC = 000..111
    pub fn truth_table(&self) -> [([bool; 3], [bool; 3]); 8] {
        std::array::from_fn(|row| {
            let input = [row & 4 != 0, row & 2 != 0, row & 1 != 0];
            (input, self.apply(input))
        })
    }

    /// OpenQASM 2.0 `gate` block reproducing the decomposition
    pub fn qasm_definition(&self) -> String {
        let body = match self {
            CompositeGate::Peres => "csxdg a,c; csxdg b,c; cx a,b; csx b,c;",
            CompositeGate::Tr => "csxdg b,c; cx a,b; csx a,c; csx b,c;",
        };
        format!("gate {} a,b,c {{ {} }}", self.name(), body)
    }
}

impl fmt::Display for CompositeGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompositeGate::Peres => write!(f, "Peres"),
            CompositeGate::Tr => write!(f, "TR"),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
