//! Simulator backend for QCSA
//!
//! Gantree: L3_Backend → SimulatorBackend
//!
//! Noiseless sparse state-vector simulator. Peres and TR are expanded into
//! their controlled-SX decomposition, so running an adder also checks that
//! the decompositions implement the intended reversible functions.

use crate::execution::{Backend, ExecutionMetadata, ExecutionResult};
use crate::statevector::{StateVector, MAX_STATE_QUBITS};
use num_complex::Complex64;
use qcsa_core::{Circuit, Counts, Gate, QcsaError, QcsaResult, Qubit};
use rand::prelude::*;
use rand::rngs::StdRng;
use std::collections::HashMap;
use std::time::Instant;

/// Ideal simulator backend
/// Gantree: SimulatorBackend // 시뮬레이터 구현
#[derive(Debug, Clone)]
pub struct SimulatorBackend {
    /// Backend name
    name: String,

    /// Widest circuit accepted
    num_qubits: usize,

    /// Random seed
    seed: Option<u64>,
}

impl SimulatorBackend {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create ideal (noiseless) simulator accepting up to `num_qubits` qubits
    ///
    /// The limit is capped at 128, the width of a basis index.
    pub fn ideal(num_qubits: usize) -> Self {
        Self {
            name: "qcsa_simulator".to_string(),
            num_qubits: num_qubits.min(MAX_STATE_QUBITS),
            seed: None,
        }
    }

    /// Set seed for reproducibility
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set backend name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Seed, if set
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    // ========================================================================
    // Simulation
    // ========================================================================

    /// Final state of a circuit started from |00...0⟩
    /// Gantree: statevector(circuit) -> Result<StateVector> // 상태 벡터
    pub fn statevector(&self, circuit: &Circuit) -> QcsaResult<StateVector> {
        self.check_width(circuit)?;

        let mut state = StateVector::zero(circuit.num_qubits());
        for gate in circuit.gates() {
            apply_gate(&mut state, circuit, gate)?;
        }

        log::trace!(
            "simulated {} gates over {} qubits, support {}",
            circuit.gate_count(),
            circuit.num_qubits(),
            state.support()
        );
        Ok(state)
    }

    /// Bitstring of a circuit whose final state is a single basis state
    ///
    /// Reversible adders map basis states to basis states, so this reads the
    /// result without sampling.
    /// Gantree: run_basis(circuit) -> Result<String> // 결정적 실행
    pub fn run_basis(&self, circuit: &Circuit) -> QcsaResult<String> {
        let state = self.statevector(circuit)?;
        match state.basis_state() {
            Some(basis) => Ok(state.bitstring(basis)),
            None => Err(QcsaError::BackendError(format!(
                "final state is a superposition of {} basis states",
                state.support()
            ))),
        }
    }

    /// Sample `shots` outcomes from a state
    fn sample(&self, state: &StateVector, shots: u64, rng: &mut StdRng) -> Counts {
        let probs = state.probabilities();
        let mut counts: Counts = HashMap::new();

        for _ in 0..shots {
            let r: f64 = rng.gen();
            let mut cumsum = 0.0;
            let mut outcome = probs.last().map(|&(basis, _)| basis).unwrap_or(0);
            for &(basis, p) in &probs {
                cumsum += p;
                if r < cumsum {
                    outcome = basis;
                    break;
                }
            }
            *counts.entry(state.bitstring(outcome)).or_insert(0) += 1;
        }

        counts
    }

    fn check_width(&self, circuit: &Circuit) -> QcsaResult<()> {
        if circuit.num_qubits() > self.num_qubits {
            return Err(QcsaError::QubitLimitExceeded {
                qubits: circuit.num_qubits(),
                max: self.num_qubits,
            });
        }
        Ok(())
    }
}

impl Backend for SimulatorBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    fn execute(&self, circuit: &Circuit, shots: u64) -> QcsaResult<ExecutionResult> {
        if shots == 0 {
            return Err(QcsaError::BackendError("shots must be positive".into()));
        }

        let started = Instant::now();
        let state = self.statevector(circuit)?;

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let counts = self.sample(&state, shots, &mut rng);

        log::debug!(
            "{}: {} shots over {} qubits, {} distinct outcomes",
            self.name,
            shots,
            circuit.num_qubits(),
            counts.len()
        );

        Ok(ExecutionResult {
            counts,
            shots,
            metadata: ExecutionMetadata {
                backend: self.name.clone(),
                num_qubits: circuit.num_qubits(),
                execution_time_ms: Some(started.elapsed().as_millis() as u64),
                simulated: true,
                seed: self.seed,
                ..Default::default()
            },
        })
    }

    fn is_simulator(&self) -> bool {
        true
    }
}

// ============================================================================
// Gate Kernels
// ============================================================================

/// sqrt(X) = ½ [[1+i, 1−i], [1−i, 1+i]]
fn sx_matrix() -> [[Complex64; 2]; 2] {
    let p = Complex64::new(0.5, 0.5);
    let m = Complex64::new(0.5, -0.5);
    [[p, m], [m, p]]
}

/// sqrt(X)†, the elementwise conjugate of sqrt(X)
fn sxdg_matrix() -> [[Complex64; 2]; 2] {
    let [[a, b], [c, d]] = sx_matrix();
    [[a.conj(), b.conj()], [c.conj(), d.conj()]]
}

fn apply_gate(state: &mut StateVector, circuit: &Circuit, gate: &Gate) -> QcsaResult<()> {
    let bit = |q: Qubit| -> QcsaResult<u128> {
        circuit
            .qubit_index(q)
            .map(|i| 1u128 << i)
            .ok_or_else(|| QcsaError::UnregisteredQubit {
                register: q.register.to_string(),
            })
    };

    match gate {
        Gate::X(q) => {
            let t = bit(*q)?;
            state.permute(|b| b ^ t);
        }
        Gate::Sx(q) => state.apply_controlled(0, bit(*q)?, sx_matrix()),
        Gate::Sxdg(q) => state.apply_controlled(0, bit(*q)?, sxdg_matrix()),
        Gate::Cnot(c, t) => {
            let (c, t) = (bit(*c)?, bit(*t)?);
            state.permute(|b| if b & c != 0 { b ^ t } else { b });
        }
        Gate::Csx(c, t) => state.apply_controlled(bit(*c)?, bit(*t)?, sx_matrix()),
        Gate::Csxdg(c, t) => state.apply_controlled(bit(*c)?, bit(*t)?, sxdg_matrix()),
        Gate::Swap(q1, q2) => {
            let (m1, m2) = (bit(*q1)?, bit(*q2)?);
            state.permute(|b| swap_bits(b, m1, m2));
        }
        Gate::Ccx(c1, c2, t) => {
            let controls = bit(*c1)? | bit(*c2)?;
            let t = bit(*t)?;
            state.permute(|b| if b & controls == controls { b ^ t } else { b });
        }
        Gate::Cswap(c, t1, t2) => {
            let (c, m1, m2) = (bit(*c)?, bit(*t1)?, bit(*t2)?);
            state.permute(|b| if b & c != 0 { swap_bits(b, m1, m2) } else { b });
        }
        Gate::Peres(..) | Gate::Tr(..) => {
            for primitive in gate.decompose() {
                apply_gate(state, circuit, &primitive)?;
            }
        }
        Gate::Barrier(_) | Gate::MeasureAll => {}
    }
    Ok(())
}

fn swap_bits(basis: u128, m1: u128, m2: u128) -> u128 {
    if (basis & m1 != 0) != (basis & m2 != 0) {
        basis ^ m1 ^ m2
    } else {
        basis
    }
}

// ============================================================================
// Tests
// ============================================================================
