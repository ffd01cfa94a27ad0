//! Sparse state vector
//!
//! Gantree: L3_Backend → StateVector
//!
//! Adder circuits act on up to a few dozen qubits but keep the state close
//! to a single basis state, so only non-zero amplitudes are stored. Basis
//! index bit `i` is the global qubit `i` of the circuit.

use num_complex::Complex64;
use std::collections::HashMap;

/// Amplitudes with squared norm below this are dropped
pub const PRUNE_EPSILON: f64 = 1e-12;

/// Widest state a `u128` basis index can address
pub const MAX_STATE_QUBITS: usize = 128;

/// Sparse state over `num_qubits` qubits
/// Gantree: StateVector // 희소 상태 벡터
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    num_qubits: usize,
    amplitudes: HashMap<u128, Complex64>,
}

impl StateVector {
    /// |00...0⟩ over `num_qubits` qubits
    pub fn zero(num_qubits: usize) -> Self {
        let mut amplitudes = HashMap::new();
        amplitudes.insert(0, Complex64::new(1.0, 0.0));
        Self {
            num_qubits,
            amplitudes,
        }
    }

    /// Number of qubits
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of stored (non-zero) amplitudes
    pub fn support(&self) -> usize {
        self.amplitudes.len()
    }

    /// Amplitude of a basis state
    pub fn amplitude(&self, basis: u128) -> Complex64 {
        self.amplitudes
            .get(&basis)
            .copied()
            .unwrap_or_else(|| Complex64::new(0.0, 0.0))
    }

    /// Probability of a basis state
    pub fn probability(&self, basis: u128) -> f64 {
        self.amplitude(basis).norm_sqr()
    }

    /// Non-zero probabilities in ascending basis order
    pub fn probabilities(&self) -> Vec<(u128, f64)> {
        let mut probs: Vec<(u128, f64)> = self
            .amplitudes
            .iter()
            .map(|(&basis, amp)| (basis, amp.norm_sqr()))
            .collect();
        probs.sort_by_key(|&(basis, _)| basis);
        probs
    }

    /// Sum of all probabilities (1 up to rounding)
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.values().map(|a| a.norm_sqr()).sum()
    }

    /// The basis state, if the state is one
    pub fn basis_state(&self) -> Option<u128> {
        match self.amplitudes.len() {
            1 => self.amplitudes.keys().next().copied(),
            _ => None,
        }
    }

    /// Basis index as a bitstring, most significant qubit first
    pub fn bitstring(&self, basis: u128) -> String {
        format!("{:0width$b}", basis, width = self.num_qubits)
    }

    // ========================================================================
    // Gate Application
    // ========================================================================

    /// Relabel basis states with a bijection on indices
    pub fn permute<F>(&mut self, f: F)
    where
        F: Fn(u128) -> u128,
    {
        self.amplitudes = self
            .amplitudes
            .drain()
            .map(|(basis, amp)| (f(basis), amp))
            .collect();
    }

    /// Apply the 2x2 unitary `u` to `target` where every bit in `controls` is set
    pub fn apply_controlled(&mut self, controls: u128, target: u128, u: [[Complex64; 2]; 2]) {
        let mut next: HashMap<u128, Complex64> = HashMap::with_capacity(self.amplitudes.len() * 2);
        for (basis, amp) in self.amplitudes.drain() {
            if basis & controls != controls {
                *next.entry(basis).or_default() += amp;
                continue;
            }
            let col = usize::from(basis & target != 0);
            *next.entry(basis & !target).or_default() += u[0][col] * amp;
            *next.entry(basis | target).or_default() += u[1][col] * amp;
        }
        next.retain(|_, amp| amp.norm_sqr() >= PRUNE_EPSILON);
        self.amplitudes = next;
    }
}

// ============================================================================
// Tests
// ============================================================================
