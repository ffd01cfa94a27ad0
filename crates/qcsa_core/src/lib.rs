//! # QCSA Core
//!
//! Registers, reversible gates, circuits and the circuit merge utility used
//! by the Quantum Carry-Select Adder.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qcsa_core // L0+L1: Foundation + Circuit (완료)
//!     L0_Foundation // 기반 타입/에러 (완료)
//!         CoreTypes // 피연산자 비트열 (완료)
//!         Errors // 에러 타입 (완료)
//!     L1_Circuit // 회로 구조 (완료)
//!         Register // 레지스터 + 할당기 (완료)
//!         Gate // 게이트 enum (완료)
//!         CompositeGate // Peres/TR (완료)
//!         Circuit // 회로 + 병합 (완료)
//!         CircuitBuilder // 빌더 패턴 (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qcsa_core::prelude::*;
//!
//! let mut alloc = RegisterAllocator::new();
//! let a = alloc.allocate("a", 2).unwrap();
//! let z = alloc.allocate("z", 1).unwrap();
//!
//! let circuit = CircuitBuilder::new()
//!     .registers([&a, &z])
//!     .x(a.qubit(0))
//!     .peres(a.qubit(0), a.qubit(1), z.qubit(0))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 3);
//! println!("{}", circuit.to_qasm());
//! ```
//!
//! ## Merging
//!
//! ```rust
//! use qcsa_core::prelude::*;
//!
//! let mut alloc = RegisterAllocator::new();
//! let a = alloc.allocate("a", 1).unwrap();
//! let b = alloc.allocate("b", 1).unwrap();
//!
//! let block = CircuitBuilder::new()
//!     .registers([&a, &b])
//!     .cx(a.qubit(0), b.qubit(0))
//!     .build()
//!     .unwrap();
//!
//! // Registers must be shared before merging
//! let mut global = Circuit::with_name("global");
//! assert!(global.merge(&block).is_err());
//! global.add_registers(block.registers()).unwrap();
//! assert!(global.merge(&block).is_ok());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Core types (Gantree: L0_Foundation → CoreTypes)
pub mod types;

/// Error types (Gantree: L0_Foundation → Errors)
pub mod error;

/// Registers and allocation (Gantree: L1_Circuit → Register)
pub mod register;

/// Reversible gates (Gantree: L1_Circuit → Gate)
pub mod gate;

/// Peres and TR (Gantree: L1_Circuit → CompositeGate)
pub mod composite;

/// Circuit structure (Gantree: L1_Circuit → Circuit)
pub mod circuit;

/// Circuit builder (Gantree: L1_Circuit → CircuitBuilder)
pub mod builder;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::CircuitBuilder;
pub use circuit::{merge_circuit, Circuit};
pub use composite::CompositeGate;
pub use error::{QcsaError, QcsaResult};
pub use gate::Gate;
pub use register::{is_valid_label, QuantumRegister, Qubit, RegisterAllocator, RegisterId};
pub use types::{Counts, OperandBits};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases
    //!
    //! ```rust
    //! use qcsa_core::prelude::*;
    //! ```

    pub use crate::builder::CircuitBuilder;
    pub use crate::circuit::{merge_circuit, Circuit};
    pub use crate::composite::CompositeGate;
    pub use crate::error::{QcsaError, QcsaResult};
    pub use crate::gate::Gate;
    pub use crate::register::{QuantumRegister, Qubit, RegisterAllocator, RegisterId};
    pub use crate::types::{Counts, OperandBits};
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
    use proptest::prelude::*;

    #[test]
    fn test_independent_blocks_share_one_circuit() {
        let mut alloc = RegisterAllocator::new();
        let mut global = Circuit::with_name("global");

        for block in 0..3 {
            let a = alloc.allocate(&format!("a{}", block), 2).unwrap();
            let b = alloc.allocate(&format!("b{}", block), 2).unwrap();
            let sub = CircuitBuilder::new()
                .registers([&a, &b])
                .cx(a.qubit(0), b.qubit(0))
                .cx(a.qubit(1), b.qubit(1))
                .build()
                .unwrap();
            global.add_registers(sub.registers()).unwrap();
            global.merge(&sub).unwrap();
        }

        assert_eq!(global.registers().len(), 6);
        assert_eq!(global.num_qubits(), 12);
        assert_eq!(global.gate_count(), 6);
        // all blocks act on disjoint qubits
        assert_eq!(global.depth(), 1);
    }

    #[test]
    fn test_reused_label_fails_loudly() {
        let mut alloc = RegisterAllocator::new();
        alloc.allocate("b1_0", 2).unwrap();
        assert!(alloc.allocate("b1_0", 2).unwrap_err().is_circuit_error());
    }

    proptest! {
        #[test]
        fn prop_blocks_reassemble(value in 0u128..(1 << 12), k in 1usize..5) {
            let width = 12 - 12 % k;
            let bits = OperandBits::from_value(value, width);
            let mut rebuilt = 0u128;
            for block in 0..width / k {
                rebuilt |= bits.slice_block(block, k).unwrap().to_u128() << (k * block);
            }
            prop_assert_eq!(rebuilt, bits.to_u128());
        }
    }
}
