//! # QCSA Backend
//!
//! Backend abstraction and an ideal sparse state-vector simulator for
//! reversible adder circuits.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qcsa_backend // L3: Backend (완료)
//!     BackendTrait // 백엔드 인터페이스 (완료)
//!     StateVector // 희소 상태 벡터 (완료)
//!     SimulatorBackend // 시뮬레이터 구현 (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qcsa_backend::prelude::*;
//! use qcsa_core::prelude::*;
//!
//! let mut alloc = RegisterAllocator::new();
//! let q = alloc.allocate("q", 3).unwrap();
//! let circuit = CircuitBuilder::new()
//!     .register(&q)
//!     .x(q.qubit(0))
//!     .x(q.qubit(1))
//!     .peres(q.qubit(0), q.qubit(1), q.qubit(2))
//!     .build()
//!     .unwrap();
//!
//! // Peres(1, 1, 0) = (1, 0, 1), printed q[2] q[1] q[0]
//! let backend = SimulatorBackend::ideal(8);
//! assert_eq!(backend.run_basis(&circuit).unwrap(), "101");
//!
//! let result = backend.with_seed(42).execute(&circuit, 100).unwrap();
//! assert_eq!(result.counts.get("101"), Some(&100));
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Execution types and backend trait (Gantree: L3_Backend → BackendTrait)
pub mod execution;

/// Sparse state vector (Gantree: L3_Backend → StateVector)
pub mod statevector;

/// Simulator backend (Gantree: L3_Backend → SimulatorBackend)
pub mod simulator;

// ============================================================================
// Re-exports
// ============================================================================

pub use execution::{Backend, ExecutionMetadata, ExecutionResult};
pub use simulator::SimulatorBackend;
pub use statevector::StateVector;

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use qcsa_backend::prelude::*;
    //! ```

    pub use crate::execution::{Backend, ExecutionMetadata, ExecutionResult};
    pub use crate::simulator::SimulatorBackend;
    pub use crate::statevector::StateVector;
}

// ============================================================================
// Version Information
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
