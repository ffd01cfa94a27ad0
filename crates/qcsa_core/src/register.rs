//! Qubit registers and their allocator
//!
//! Gantree: L1_Circuit → Register
//!
//! Registers are identified by an opaque [`RegisterId`] handed out by a
//! [`RegisterAllocator`]. Handles are unique across every allocator in the
//! process. The label only feeds diagnostics and QASM export, and must be a
//! valid OpenQASM identifier.

use crate::error::{QcsaError, QcsaResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Next free handle, shared by all allocators
static NEXT_REGISTER_ID: AtomicUsize = AtomicUsize::new(0);

/// Words a register label may not take in OpenQASM 2.0
const RESERVED_LABELS: [&str; 13] = [
    "OPENQASM", "include", "qreg", "creg", "gate", "opaque", "measure", "reset", "barrier",
    "if", "pi", "U", "CX",
];

/// Check that `label` can be emitted as an OpenQASM register name
///
/// Accepts `[a-z][A-Za-z0-9_]*` minus the language keywords.
pub fn is_valid_label(label: &str) -> bool {
    let mut chars = label.chars();
    let starts_lower = chars.next().is_some_and(|c| c.is_ascii_lowercase());
    starts_lower
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !RESERVED_LABELS.contains(&label)
}

/// Opaque register handle, unique within the process
/// Gantree: RegisterId // 레지스터 핸들
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegisterId(usize);

impl RegisterId {
    /// Raw handle value
    pub fn raw(&self) -> usize {
        self.0
    }
}

impl fmt::Display for RegisterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// A single qubit: register handle plus index inside that register
/// Gantree: Qubit // 큐비트 참조
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Qubit {
    /// Owning register
    pub register: RegisterId,
    /// Position within the register (0 = least significant)
    pub index: usize,
}

impl Qubit {
    /// Create a qubit reference
    pub fn new(register: RegisterId, index: usize) -> Self {
        Self { register, index }
    }
}

/// Named, fixed-width qubit register
/// Gantree: QuantumRegister // 레지스터
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuantumRegister {
    id: RegisterId,
    label: String,
    size: usize,
}

impl QuantumRegister {
    /// Register handle
    pub fn id(&self) -> RegisterId {
        self.id
    }

    /// Diagnostic label
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Number of qubits
    pub fn size(&self) -> usize {
        self.size
    }

    /// Qubit at `index`
    ///
    /// The index is checked when a gate using it is added to a circuit.
    pub fn qubit(&self, index: usize) -> Qubit {
        Qubit::new(self.id, index)
    }

    /// All qubits, least significant first
    pub fn qubits(&self) -> Vec<Qubit> {
        (0..self.size).map(|i| self.qubit(i)).collect()
    }
}

impl fmt::Display for QuantumRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.label, self.size)
    }
}

/// Hands out registers with unique handles and unique labels
/// Gantree: RegisterAllocator // 레지스터 할당기
#[derive(Debug, Default)]
pub struct RegisterAllocator {
    labels: HashSet<String>,
}

impl RegisterAllocator {
    /// Create an empty allocator
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a register of `size` qubits labelled `label`
    /// Gantree: allocate(label, size) -> Result<QuantumRegister> // 할당
    pub fn allocate(&mut self, label: &str, size: usize) -> QcsaResult<QuantumRegister> {
        if !is_valid_label(label) {
            return Err(QcsaError::IllegalArgument(format!(
                "register label '{}' is not a QASM identifier",
                label
            )));
        }
        if !self.labels.insert(label.to_string()) {
            return Err(QcsaError::DuplicateRegister(label.to_string()));
        }
        let id = RegisterId(NEXT_REGISTER_ID.fetch_add(1, Ordering::Relaxed));
        log::trace!("allocated register {} as {}[{}]", id, label, size);
        Ok(QuantumRegister {
            id,
            label: label.to_string(),
            size,
        })
    }

    /// Number of registers handed out so far
    pub fn allocated(&self) -> usize {
        self.labels.len()
    }

    /// Check whether a label has already been issued
    pub fn is_taken(&self, label: &str) -> bool {
        self.labels.contains(label)
    }
}

// ============================================================================
// Tests
// ============================================================================
