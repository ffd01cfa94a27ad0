//! Build-and-simulate driver
//!
//! Gantree: L4_Integration → QcsaRunner
//!
//! Composes a carry-select adder from a [`QcsaConfig`], runs it on the
//! simulator and decodes the most frequent outcome.

use crate::composer::{Qcsa, QcsaCircuit};
use crate::config::QcsaConfig;
use qcsa_backend::{Backend, ExecutionResult, SimulatorBackend};
use qcsa_core::{OperandBits, QcsaError, QcsaResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

/// Decoded outcome of one simulated addition
/// Gantree: AdditionReport // 실행 결과
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdditionReport {
    /// Operand `a`
    pub a: String,

    /// Operand `b`
    pub b: String,

    /// Carry-in
    pub carry_in: bool,

    /// Sum bits, most significant first
    pub sum: String,

    /// Carry-out
    pub carry_out: bool,

    /// Most frequent measured bitstring
    pub bitstring: String,

    /// Circuit metrics
    pub metrics: CircuitMetrics,

    /// Raw execution result
    pub execution: ExecutionResult,
}

/// Size of the composed circuit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitMetrics {
    /// Total qubits
    pub qubits: usize,

    /// Total gates, composites counted once
    pub gates: usize,

    /// Controlled swaps in the selection chain
    pub cswaps: usize,

    /// Circuit depth
    pub depth: usize,

    /// Build and simulation time
    pub total_time_ms: u64,
}

impl AdditionReport {
    /// Whether the decoded sum equals integer addition of the operands
    pub fn is_correct(&self) -> bool {
        let width = self.a.len();
        let (Ok(a), Ok(b), Ok(sum)) = (
            OperandBits::parse(&self.a),
            OperandBits::parse(&self.b),
            OperandBits::parse(&self.sum),
        ) else {
            return false;
        };
        if width == 0 || width > 127 {
            return false;
        }
        let total = a.to_u128() + b.to_u128() + u128::from(self.carry_in);
        sum.to_u128() == total & ((1u128 << width) - 1) && self.carry_out == (total >> width == 1)
    }
}

impl fmt::Display for AdditionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} + {} + {} = {} carry {} ({} qubits, {} gates)",
            self.a,
            self.b,
            u8::from(self.carry_in),
            self.sum,
            u8::from(self.carry_out),
            self.metrics.qubits,
            self.metrics.gates
        )
    }
}

/// Configured carry-select adder runner
/// Gantree: QcsaRunner // 빌드 + 시뮬레이션
#[derive(Debug, Clone)]
pub struct QcsaRunner {
    /// Configuration
    config: QcsaConfig,

    /// Verbose output
    verbose: bool,
}

impl QcsaRunner {
    /// Create runner with configuration
    pub fn new(config: QcsaConfig) -> Self {
        let verbose = config.verbose;
        Self { config, verbose }
    }

    /// Get configuration
    pub fn config(&self) -> &QcsaConfig {
        &self.config
    }

    /// Compose the circuit for the given operands
    pub fn compose(&self, a: &str, b: &str, c_in: &str) -> QcsaResult<QcsaCircuit> {
        let mut qcsa = Qcsa::from_config(&self.config)?;
        qcsa.initialize(a, b, c_in)?;
        qcsa.build()
    }

    /// Compose, simulate and decode one addition
    /// Gantree: run(a, b, c_in) -> Result<AdditionReport> // 원클릭 실행
    pub fn run(&self, a: &str, b: &str, c_in: &str) -> QcsaResult<AdditionReport> {
        let start_time = Instant::now();

        if self.verbose {
            println!("Starting QCSA run: {}", self.config);
        }

        let composed = self.compose(a, b, c_in)?;
        let backend = self.create_backend(composed.num_qubits());
        let execution = backend.execute(&composed.circuit, self.config.shots)?;

        let bitstring = execution
            .most_frequent()
            .map(|(bits, _)| bits.clone())
            .ok_or_else(|| QcsaError::BackendError("no measurement outcomes".into()))?;
        let (sum, carry_out) = composed.decode_bits(&bitstring)?;

        let metrics = CircuitMetrics {
            qubits: composed.num_qubits(),
            gates: composed.circuit.gate_count(),
            cswaps: composed.circuit.count_named("cswap"),
            depth: composed.circuit.depth(),
            total_time_ms: start_time.elapsed().as_millis() as u64,
        };

        let report = AdditionReport {
            a: a.to_string(),
            b: b.to_string(),
            carry_in: c_in == "1",
            sum: sum.as_str().to_string(),
            carry_out,
            bitstring,
            metrics,
            execution,
        };

        if self.verbose {
            println!("QCSA run complete: {} in {}ms", report, metrics.total_time_ms);
        }

        Ok(report)
    }

    fn create_backend(&self, num_qubits: usize) -> SimulatorBackend {
        let backend = SimulatorBackend::ideal(num_qubits);
        match self.config.seed {
            Some(seed) => backend.with_seed(seed),
            None => backend,
        }
    }
}

impl Default for QcsaRunner {
    fn default() -> Self {
        Self::new(QcsaConfig::default())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_default() {
        let report = QcsaRunner::default().run("0111", "0011", "0").unwrap();

        assert_eq!(report.sum, "1010");
        assert!(!report.carry_out);
        assert!(report.is_correct());
        assert_eq!(report.execution.total_counts(), 1024);
        assert!(report.execution.is_deterministic());
    }

    #[test]
    fn test_run_with_carry() {
        let runner = QcsaRunner::new(QcsaConfig::new(6, 3).with_shots(16).with_seed(1));
        let report = runner.run("111000", "000111", "1").unwrap();

        assert_eq!(report.sum, "000000");
        assert!(report.carry_out);
        assert!(report.is_correct());
        assert_eq!(report.metrics.cswaps, 4);
    }

    #[test]
    fn test_run_rejects_bad_config() {
        let runner = QcsaRunner::new(QcsaConfig::new(8, 3));
        assert!(matches!(
            runner.run("00000000", "00000000", "0"),
            Err(QcsaError::IllegalArgument(_))
        ));
    }

    #[test]
    fn test_run_rejects_bad_operands() {
        let runner = QcsaRunner::default();
        assert!(matches!(
            runner.run("01", "0011", "0"),
            Err(QcsaError::IllegalStringFormat(_))
        ));
    }

    #[test]
    fn test_report_detects_wrong_sum() {
        let mut report = QcsaRunner::default().run("0001", "0001", "0").unwrap();
        assert!(report.is_correct());

        report.sum = "0011".to_string();
        assert!(!report.is_correct());
    }
}
