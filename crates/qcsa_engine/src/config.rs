//! Carry-select adder configuration
//!
//! Gantree: L4_Integration → QcsaConfig
//!
//! Serializable description of a carry-select adder and how to simulate it.

use qcsa_adders::{Adder, Thapliyal, ThapliyalWithCarry};
use qcsa_core::{QcsaError, QcsaResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Adder kind selectable from a configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdderChoice {
    /// Ripple-carry adder without carry-in
    Thapliyal,
    /// Ripple-carry adder with carry-in
    ThapliyalWithCarry,
}

impl AdderChoice {
    /// Instantiate the adder
    pub fn to_adder(self) -> Box<dyn Adder> {
        match self {
            AdderChoice::Thapliyal => Box::new(Thapliyal),
            AdderChoice::ThapliyalWithCarry => Box::new(ThapliyalWithCarry),
        }
    }

    /// Whether the adder takes no carry-in
    pub fn is_no_carry(self) -> bool {
        matches!(self, AdderChoice::Thapliyal)
    }

    /// Whether the adder takes a carry-in
    pub fn is_with_carry(self) -> bool {
        matches!(self, AdderChoice::ThapliyalWithCarry)
    }
}

impl fmt::Display for AdderChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdderChoice::Thapliyal => write!(f, "Thapliyal"),
            AdderChoice::ThapliyalWithCarry => write!(f, "ThapliyalWithCarry"),
        }
    }
}

/// Carry-select adder configuration
/// Gantree: QcsaConfig // 통합 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QcsaConfig {
    // ========================================================================
    // Adder Shape
    // ========================================================================
    /// Operand width
    pub n: usize,

    /// Block width, must divide `n`
    pub k: usize,

    /// Adder for block 0 and every default branch
    pub first_adder: AdderChoice,

    /// Adder for every carry-in-1 branch
    pub second_adder: AdderChoice,

    // ========================================================================
    // Execution Parameters
    // ========================================================================
    /// Number of shots per simulation
    pub shots: u64,

    /// Random seed
    pub seed: Option<u64>,

    /// Enable verbose output
    pub verbose: bool,
}

impl QcsaConfig {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Configuration for `n`-bit operands in `k`-bit blocks
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            k,
            first_adder: AdderChoice::Thapliyal,
            second_adder: AdderChoice::ThapliyalWithCarry,
            shots: 1024,
            seed: None,
            verbose: false,
        }
    }

    // ========================================================================
    // Builder Methods
    // ========================================================================

    /// Set operand and block widths
    pub fn with_blocks(mut self, n: usize, k: usize) -> Self {
        self.n = n;
        self.k = k;
        self
    }

    /// Set the adder kinds
    pub fn with_adders(mut self, first: AdderChoice, second: AdderChoice) -> Self {
        self.first_adder = first;
        self.second_adder = second;
        self
    }

    /// Set shots
    pub fn with_shots(mut self, shots: u64) -> Self {
        self.shots = shots;
        self
    }

    /// Set seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enable verbose output
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    // ========================================================================
    // Derived Values
    // ========================================================================

    /// Number of blocks (0 when `k` is 0)
    pub fn num_blocks(&self) -> usize {
        self.n.checked_div(self.k).unwrap_or(0)
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Validate configuration
    pub fn validate(&self) -> QcsaResult<()> {
        if self.k == 0 || self.n == 0 || self.n % self.k != 0 {
            return Err(QcsaError::IllegalArgument(format!(
                "block size {} must divide operand width {}",
                self.k, self.n
            )));
        }

        if self.k < qcsa_adders::MIN_WIDTH {
            return Err(QcsaError::IllegalOperandsSize { size: self.k });
        }

        if self.shots == 0 {
            return Err(QcsaError::ConfigError("shots must be > 0".to_string()));
        }

        if !self.first_adder.is_no_carry() {
            return Err(QcsaError::IllegalAdder(format!(
                "first adder must take no carry-in, got {}",
                self.first_adder
            )));
        }

        if !self.second_adder.is_with_carry() {
            return Err(QcsaError::IllegalAdder(format!(
                "second adder must take a carry-in, got {}",
                self.second_adder
            )));
        }

        Ok(())
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> QcsaResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON
    pub fn from_json(json: &str) -> QcsaResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load and validate a JSON file
    pub fn load(path: impl AsRef<Path>) -> QcsaResult<Self> {
        let config = Self::from_json(&fs::read_to_string(path)?)?;
        config.validate()?;
        Ok(config)
    }

    /// Write as a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> QcsaResult<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

impl Default for QcsaConfig {
    fn default() -> Self {
        Self::new(4, 2)
    }
}

impl fmt::Display for QcsaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "QcsaConfig(n={}, k={}, {}/{}, shots={})",
            self.n, self.k, self.first_adder, self.second_adder, self.shots
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
    fn test_default() {
        let config = QcsaConfig::default();
        assert_eq!((config.n, config.k), (4, 2));
        assert_eq!(config.num_blocks(), 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_methods() {
        let config = QcsaConfig::default()
            .with_blocks(12, 3)
            .with_shots(64)
            .with_seed(42)
            .with_verbose(true);

        assert_eq!(config.num_blocks(), 4);
        assert_eq!(config.shots, 64);
        assert_eq!(config.seed, Some(42));
        assert!(config.verbose);
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            QcsaConfig::new(8, 3).validate(),
            Err(QcsaError::IllegalArgument(_))
        ));
        assert!(matches!(
            QcsaConfig::new(8, 0).validate(),
            Err(QcsaError::IllegalArgument(_))
        ));
        assert_eq!(
            QcsaConfig::new(4, 1).validate(),
            Err(QcsaError::IllegalOperandsSize { size: 1 })
        );
        assert!(matches!(
            QcsaConfig::default().with_shots(0).validate(),
            Err(QcsaError::ConfigError(_))
        ));
        assert!(matches!(
            QcsaConfig::default()
                .with_adders(AdderChoice::ThapliyalWithCarry, AdderChoice::ThapliyalWithCarry)
                .validate(),
            Err(QcsaError::IllegalAdder(_))
        ));
        assert!(matches!(
            QcsaConfig::default()
                .with_adders(AdderChoice::Thapliyal, AdderChoice::Thapliyal)
                .validate(),
            Err(QcsaError::IllegalAdder(_))
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let config = QcsaConfig::new(8, 4).with_seed(7);
        let json = config.to_json().unwrap();

        assert!(json.contains("\"first_adder\": \"Thapliyal\""));
        assert_eq!(QcsaConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            QcsaConfig::from_json("{\"n\": 4}"),
            Err(QcsaError::JsonError(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("qcsa_config_{}.json", std::process::id()));
        let config = QcsaConfig::new(6, 3).with_shots(10);

        config.save(&path).unwrap();
        let loaded = QcsaConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            QcsaConfig::load("/nonexistent/qcsa.json"),
            Err(QcsaError::FileError(_))
        ));
    }

    #[test]
    fn test_adder_choice_instantiates() {
        assert!(AdderChoice::Thapliyal.to_adder().as_no_carry().is_some());
        assert!(AdderChoice::ThapliyalWithCarry
            .to_adder()
            .as_with_carry()
            .is_some());
    }
}
