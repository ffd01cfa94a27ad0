//! # QCSA Adders
//!
//! Reversible ripple-carry adders used as building blocks of the
//! Quantum Carry-Select Adder.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qcsa_adders // L2: Adders (완료)
//!     AdderTraits // 능력 트레이트 + 스켈레톤 (완료)
//!     Thapliyal // 캐리 입력 없는 가산기 (완료)
//!     ThapliyalWithCarry // 캐리 입력 가산기 (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qcsa_adders::prelude::*;
//! use qcsa_core::RegisterAllocator;
//!
//! let mut alloc = RegisterAllocator::new();
//! let skeleton = Thapliyal
//!     .build(&mut alloc, 4, &RegisterNames::default())
//!     .unwrap();
//!
//! // Template is fixed; operands are loaded into a fresh circuit each time
//! let circuit = Thapliyal.initialize(&skeleton, "0011", "0001").unwrap();
//! assert_eq!(circuit.num_qubits(), 9);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Adder traits and skeletons (Gantree: L2_Adders → AdderTraits)
pub mod adder;

/// Adder without carry-in (Gantree: L2_Adders → Thapliyal)
pub mod thapliyal;

/// Adder with carry-in (Gantree: L2_Adders → ThapliyalWithCarry)
pub mod thapliyal_carry;

// ============================================================================
// Re-exports
// ============================================================================

pub use adder::{
    check_width, load_operands, Adder, AdderRegisters, AdderSkeleton, NoCarryAdder,
    RegisterNames, WithCarryAdder, MIN_WIDTH,
};
pub use thapliyal::Thapliyal;
pub use thapliyal_carry::ThapliyalWithCarry;

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases
    //!
    //! ```rust
    //! use qcsa_adders::prelude::*;
    //! ```

    pub use crate::adder::{
        Adder, AdderRegisters, AdderSkeleton, NoCarryAdder, RegisterNames, WithCarryAdder,
    };
    pub use crate::thapliyal::Thapliyal;
    pub use crate::thapliyal_carry::ThapliyalWithCarry;
}

// ============================================================================
// Version Information
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
