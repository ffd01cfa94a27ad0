//! Core types for QCSA
//!
//! Gantree: L0_Foundation → CoreTypes
//!
//! Operand bit strings and measurement counts shared by the adders, the
//! composer and the simulator.

use crate::error::{QcsaError, QcsaResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Type Aliases
// ============================================================================

/// Measurement counts: bitstring -> count
/// Gantree: Counts // pub type Counts = HashMap<String, u64>
pub type Counts = HashMap<String, u64>;

// ============================================================================
// OperandBits
// ============================================================================

/// Binary operand in positional notation (most significant character first)
///
/// Bit index 0 is the least significant bit, i.e. the last character.
/// Gantree: OperandBits // 피연산자 비트열
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OperandBits {
    text: String,
}

impl OperandBits {
    /// Parse an operand, accepting only `'0'` and `'1'`
    /// Gantree: parse(s) -> Result<Self> // 파싱+검증
    pub fn parse(s: &str) -> QcsaResult<Self> {
        if let Some(bad) = s.chars().find(|&c| c != '0' && c != '1') {
            return Err(QcsaError::IllegalStringFormat(format!(
                "'{}' contains '{}', only '0' and '1' are allowed",
                s, bad
            )));
        }
        Ok(Self {
            text: s.to_string(),
        })
    }

    /// All-zero operand of the given width
    pub fn zeros(width: usize) -> Self {
        Self {
            text: "0".repeat(width),
        }
    }

    /// Operand holding `value` truncated to `width` bits
    pub fn from_value(value: u128, width: usize) -> Self {
        let text = (0..width)
            .rev()
            .map(|i| {
                if i < 128 && (value >> i) & 1 == 1 {
                    '1'
                } else {
                    '0'
                }
            })
            .collect();
        Self { text }
    }

    /// Number of bits
    pub fn width(&self) -> usize {
        self.text.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Textual form, most significant bit first
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Bits ordered least significant first
    /// Gantree: lsb_first() -> Vec<bool> // LSB 순서
    pub fn lsb_first(&self) -> Vec<bool> {
        self.text.chars().rev().map(|c| c == '1').collect()
    }

    /// Bit at little-endian index (LSB = index 0)
    pub fn bit(&self, index: usize) -> Option<bool> {
        let width = self.width();
        if index >= width {
            return None;
        }
        self.text
            .as_bytes()
            .get(width - 1 - index)
            .map(|&byte| byte == b'1')
    }

    /// Numeric value (bits above 128 are ignored)
    pub fn to_u128(&self) -> u128 {
        self.lsb_first()
            .iter()
            .take(128)
            .enumerate()
            .filter(|(_, &bit)| bit)
            .map(|(i, _)| 1u128 << i)
            .sum()
    }

    /// Bits `[k*block, k*(block+1))` as their own operand, most significant first
    ///
    /// Block 0 holds the least significant bits.
    /// Gantree: slice_block(i, k) -> Result<Self> // 블록 분할
    pub fn slice_block(&self, block: usize, k: usize) -> QcsaResult<Self> {
        let width = self.width();
        let end_lsb = k
            .checked_mul(block + 1)
            .filter(|&end| end <= width && k > 0)
            .ok_or_else(|| {
                QcsaError::IllegalArgument(format!(
                    "block {} of size {} does not fit an operand of width {}",
                    block, k, width
                ))
            })?;
        let start = width - end_lsb;
        Ok(Self {
            text: self.text[start..start + k].to_string(),
        })
    }
}

impl fmt::Display for OperandBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl FromStr for OperandBits {
    type Err = QcsaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for OperandBits {
    type Error = QcsaError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

// ============================================================================
// Tests
// ============================================================================
