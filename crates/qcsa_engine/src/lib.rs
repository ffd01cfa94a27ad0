//! # QCSA Engine
//!
//! Quantum Carry-Select Adder: block composition, configuration and a
//! build-and-simulate runner.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qcsa_engine // L4: Integration (완료)
//!     QcsaConfig // 통합 설정 (완료)
//!         n, k, first_adder, second_adder
//!         shots, seed, verbose
//!         validate(), load(), save()
//!     Qcsa // 캐리 선택 가산기 (완료)
//!         initialize(a, b, c_in) - 피연산자 설정
//!         build() - 블록 합성 + CSWAP 선택 체인
//!     QcsaLayout // 결과 위치 (완료)
//!         decode() - 합/캐리 해독
//!     QcsaRunner // 빌드 + 시뮬레이션 (완료)
//!         run() - 원클릭 실행
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qcsa_engine::prelude::*;
//! use qcsa_backend::SimulatorBackend;
//!
//! let mut qcsa = Qcsa::new(4, 2).unwrap();
//! qcsa.initialize("0111", "0011", "0").unwrap();
//! let built = qcsa.build().unwrap();
//!
//! let bits = SimulatorBackend::ideal(64).run_basis(&built.circuit).unwrap();
//! let (sum, carry) = built.decode(&bits).unwrap();
//! assert_eq!((sum, carry), (10, 0));
//! ```
//!
//! ## Using the Runner
//!
//! ```rust
//! use qcsa_engine::prelude::*;
//!
//! let config = QcsaConfig::new(6, 3).with_shots(32).with_seed(42);
//! let report = QcsaRunner::new(config).run("101010", "010101", "1").unwrap();
//!
//! assert_eq!(report.sum, "000000");
//! assert!(report.carry_out);
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Configuration (Gantree: L4_Integration → QcsaConfig)
pub mod config;

/// Carry-select composer (Gantree: L4_Integration → Qcsa)
pub mod composer;

/// Build-and-simulate driver (Gantree: L4_Integration → QcsaRunner)
pub mod runner;

// ============================================================================
// Re-exports
// ============================================================================

pub use composer::{Qcsa, QcsaCircuit, QcsaLayout, CIRCUIT_NAME};
pub use config::{AdderChoice, QcsaConfig};
pub use runner::{AdditionReport, CircuitMetrics, QcsaRunner};

// ============================================================================
// Prelude
// ============================================================================

/// Convenient imports for common use cases
pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use qcsa_engine::prelude::*;
    //! ```

    pub use crate::composer::{Qcsa, QcsaCircuit, QcsaLayout};
    pub use crate::config::{AdderChoice, QcsaConfig};
    pub use crate::runner::{AdditionReport, QcsaRunner};
}

// ============================================================================
// Version Information
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use qcsa_backend::{Backend, SimulatorBackend};

    #[test]
    fn test_config_to_circuit_to_qasm() {
        let config = QcsaConfig::new(4, 2);
        let built = Qcsa::from_config(&config).unwrap().build().unwrap();
        let qasm = built.circuit.to_qasm();

        assert!(qasm.contains("OPENQASM 2.0;"));
        assert!(qasm.contains("gate peres"));
        assert!(qasm.contains("gate tr"));
        assert!(qasm.contains("qreg b1_0[2];"));
        assert!(qasm.contains("cswap z0[0],b1_0[0],b1_1[0];"));
    }

    #[test]
    fn test_sampled_counts_agree_with_basis_run() {
        let mut qcsa = Qcsa::new(6, 2).unwrap();
        qcsa.initialize("011011", "001110", "1").unwrap();
        let built = qcsa.build().unwrap();

        let backend = SimulatorBackend::ideal(128).with_seed(3);
        let bits = backend.run_basis(&built.circuit).unwrap();
        let result = backend.execute(&built.circuit, 50).unwrap();

        assert_eq!(result.counts.get(&bits), Some(&50));
        // 27 + 14 + 1 = 42
        assert_eq!(built.decode(&bits).unwrap(), (42, 0));
    }

    #[test]
    fn test_decomposed_circuit_adds_the_same() {
        let mut qcsa = Qcsa::new(4, 2).unwrap();
        qcsa.initialize("1011", "0110", "0").unwrap();
        let built = qcsa.build().unwrap();
        let flat = built.circuit.decompose();

        assert_eq!(flat.count_composite(), 0);
        let backend = SimulatorBackend::ideal(64);
        assert_eq!(
            backend.run_basis(&flat).unwrap(),
            backend.run_basis(&built.circuit).unwrap()
        );
        // 11 + 6 = 17
        let bits = backend.run_basis(&flat).unwrap();
        assert_eq!(built.decode(&bits).unwrap(), (1, 1));
    }
}
