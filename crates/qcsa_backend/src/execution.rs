//! Backend execution types and traits
//!
//! Gantree: L3_Backend → BackendTrait
//!
//! Defines the interface for running a circuit and reading back counts.

use qcsa_core::{Circuit, Counts, QcsaResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Result of circuit execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Measurement counts (bitstring -> count)
    pub counts: Counts,

    /// Number of shots executed
    pub shots: u64,

    /// Execution metadata
    pub metadata: ExecutionMetadata,
}

/// Execution metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutionMetadata {
    /// Backend name
    pub backend: String,

    /// Width of the executed circuit
    pub num_qubits: usize,

    /// Execution time in milliseconds
    pub execution_time_ms: Option<u64>,

    /// Whether simulation was used
    pub simulated: bool,

    /// Seed used (if any)
    pub seed: Option<u64>,

    /// Additional info
    pub extra: HashMap<String, String>,
}

impl ExecutionResult {
    /// Create new execution result
    pub fn new(counts: Counts, shots: u64, backend: &str) -> Self {
        Self {
            counts,
            shots,
            metadata: ExecutionMetadata {
                backend: backend.to_string(),
                simulated: true,
                ..Default::default()
            },
        }
    }

    /// Get total count (should equal shots)
    pub fn total_counts(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Get probability of a specific bitstring
    pub fn probability(&self, bitstring: &str) -> f64 {
        if self.shots == 0 {
            return 0.0;
        }
        let count = self.counts.get(bitstring).copied().unwrap_or(0);
        count as f64 / self.shots as f64
    }

    /// Get most frequent bitstring
    ///
    /// Ties go to the lexicographically smallest bitstring.
    pub fn most_frequent(&self) -> Option<(&String, u64)> {
        self.counts
            .iter()
            .max_by(|(a, &ca), (b, &cb)| ca.cmp(&cb).then_with(|| b.cmp(a)))
            .map(|(bs, &count)| (bs, count))
    }

    /// Whether every shot produced the same bitstring
    pub fn is_deterministic(&self) -> bool {
        self.counts.len() == 1
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> QcsaResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for ExecutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ExecutionResult(backend={}, shots={}, unique={})",
            self.metadata.backend,
            self.shots,
            self.counts.len()
        )
    }
}

/// Quantum backend trait
/// Gantree: BackendTrait // 백엔드 인터페이스
pub trait Backend: Send + Sync {
    /// Get backend name
    fn name(&self) -> &str;

    /// Get the widest circuit this backend accepts
    fn num_qubits(&self) -> usize;

    /// Execute a circuit
    /// Gantree: execute(circuit, shots) -> Result<ExecutionResult>
    fn execute(&self, circuit: &Circuit, shots: u64) -> QcsaResult<ExecutionResult>;

    /// Execute multiple circuits (batch)
    fn execute_batch(&self, circuits: &[Circuit], shots: u64) -> QcsaResult<Vec<ExecutionResult>> {
        circuits.iter().map(|c| self.execute(c, shots)).collect()
    }

    /// Check if backend is simulator
    fn is_simulator(&self) -> bool {
        true
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_counts() -> Counts {
        let mut counts = HashMap::new();
        counts.insert("0100".to_string(), 700);
        counts.insert("0011".to_string(), 200);
        counts.insert("1111".to_string(), 100);
        counts
    }

    #[test]
    fn test_execution_result_new() {
        let result = ExecutionResult::new(make_test_counts(), 1000, "test");

        assert_eq!(result.shots, 1000);
        assert_eq!(result.metadata.backend, "test");
        assert!(result.metadata.simulated);
    }

    #[test]
    fn test_total_counts() {
        let result = ExecutionResult::new(make_test_counts(), 1000, "test");
        assert_eq!(result.total_counts(), 1000);
    }

    #[test]
    fn test_probability() {
        let result = ExecutionResult::new(make_test_counts(), 1000, "test");

        assert!((result.probability("0100") - 0.7).abs() < 1e-10);
        assert!((result.probability("1111") - 0.1).abs() < 1e-10);
        assert_eq!(result.probability("0000"), 0.0);
    }

    #[test]
    fn test_most_frequent() {
        let result = ExecutionResult::new(make_test_counts(), 1000, "test");

        let (bs, count) = result.most_frequent().unwrap();
        assert_eq!(bs, "0100");
        assert_eq!(count, 700);
        assert!(!result.is_deterministic());
    }

    #[test]
    fn test_most_frequent_tie() {
        let mut counts = HashMap::new();
        counts.insert("10".to_string(), 5);
        counts.insert("01".to_string(), 5);
        let result = ExecutionResult::new(counts, 10, "test");

        assert_eq!(result.most_frequent().unwrap().0, "01");
    }

    #[test]
    fn test_json_contains_counts() {
        let result = ExecutionResult::new(make_test_counts(), 1000, "test");
        let json = result.to_json().unwrap();

        assert!(json.contains("\"0100\": 700"));
        assert!(json.contains("\"backend\": \"test\""));
    }
}
