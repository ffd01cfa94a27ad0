//! Error types for QCSA
//!
//! Gantree: L0_Foundation → Errors
//!
//! Every failure is raised where the violated precondition is detected and
//! propagated unchanged to the caller. Nothing here is retried or recovered.

// Error variant fields are self-documenting via error messages
#![allow(missing_docs)]

use thiserror::Error;

/// Main error type for QCSA
/// Gantree: QcsaError // enum
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QcsaError {
    // ========================================================================
    // Input Errors
    // ========================================================================
    /// Adder built with fewer than two bits per operand
    /// Gantree: IllegalOperandsSize{size} // 피연산자 크기
    #[error("Illegal operands size {size}: adders need at least 2 bits")]
    IllegalOperandsSize { size: usize },

    /// Operand or carry string of wrong length or with a non-binary character
    /// Gantree: IllegalStringFormat(String) // 비트열 형식
    #[error("Illegal string format: {0}")]
    IllegalStringFormat(String),

    /// Block size that does not divide the operand width
    #[error("Illegal argument: {0}")]
    IllegalArgument(String),

    /// Adder that offers neither the no-carry nor the with-carry capability
    #[error("Illegal adder: {0}")]
    IllegalAdder(String),

    // ========================================================================
    // Circuit Errors
    // ========================================================================
    /// Operation on a register the circuit does not contain
    /// Gantree: UnregisteredQubit{register} // 미등록 큐비트
    #[error("Unregistered qubit: register '{register}' is not part of the target circuit")]
    UnregisteredQubit { register: String },

    /// Qubit index past the end of its register
    #[error("Qubit {index} out of range for register '{register}' of size {size}")]
    QubitOutOfRange {
        register: String,
        index: usize,
        size: usize,
    },

    /// Register label issued twice, or a clashing register added to a circuit
    #[error("Duplicate register '{0}'")]
    DuplicateRegister(String),

    // ========================================================================
    // Backend Errors
    // ========================================================================
    /// Circuit wider than the backend supports
    #[error("Circuit has {qubits} qubits but the backend supports at most {max}")]
    QubitLimitExceeded { qubits: usize, max: usize },

    /// Backend execution error
    #[error("Backend error: {0}")]
    BackendError(String),

    // ========================================================================
    // Configuration and I/O Errors
    // ========================================================================
    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(String),

    /// File I/O error
    #[error("File error: {0}")]
    FileError(String),
}

/// Result type alias for QCSA operations
/// Gantree: QcsaResult<T> // type alias
pub type QcsaResult<T> = Result<T, QcsaError>;

// ============================================================================
// Error Conversion Helpers
// ============================================================================

impl From<serde_json::Error> for QcsaError {
    fn from(err: serde_json::Error) -> Self {
        QcsaError::JsonError(err.to_string())
    }
}

impl From<std::io::Error> for QcsaError {
    fn from(err: std::io::Error) -> Self {
        QcsaError::FileError(err.to_string())
    }
}

// ============================================================================
// Error Helpers
// ============================================================================

impl QcsaError {
    /// Check if error was caused by malformed caller input
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            QcsaError::IllegalOperandsSize { .. }
                | QcsaError::IllegalStringFormat(_)
                | QcsaError::IllegalArgument(_)
                | QcsaError::IllegalAdder(_)
        )
    }

    /// Check if error is a circuit construction error
    pub fn is_circuit_error(&self) -> bool {
        matches!(
            self,
            QcsaError::UnregisteredQubit { .. }
                | QcsaError::QubitOutOfRange { .. }
                | QcsaError::DuplicateRegister(_)
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = QcsaError::IllegalOperandsSize { size: 1 };
        assert!(err.to_string().contains('1'));
    }

    #[test]
    fn test_unregistered_qubit_message() {
        let err = QcsaError::UnregisteredQubit {
            register: "a3_1".into(),
        };
        assert!(err.to_string().contains("a3_1"));
        assert!(err.to_string().contains("Unregistered qubit"));
    }

    #[test]
    fn test_is_input_error() {
        assert!(QcsaError::IllegalStringFormat("x".into()).is_input_error());
        assert!(QcsaError::IllegalAdder("x".into()).is_input_error());
        assert!(!QcsaError::BackendError("x".into()).is_input_error());
    }

    #[test]
    fn test_is_circuit_error() {
        assert!(QcsaError::DuplicateRegister("a0".into()).is_circuit_error());
        assert!(!QcsaError::IllegalArgument("k".into()).is_circuit_error());
    }

    #[test]
    fn test_from_json_error() {
        let err: QcsaError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, QcsaError::JsonError(_)));
    }
}
