use mathcheck_core::errors::{ErrorInfo, MathcheckError};
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Deterministic bounds on symbolic work.
///
/// Every parse and simplification is charged against these limits; running
/// out is reported as [`MathcheckError::Budget`] so callers can treat a
/// pathological expression exactly like a failed evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplifyBudget {
    /// Maximum number of terms any intermediate polynomial may hold.
    #[serde(default = "SimplifyBudget::default_max_terms")]
    pub max_terms: usize,
    /// Largest integer exponent (or root index) that will be expanded.
    #[serde(default = "SimplifyBudget::default_max_exponent")]
    pub max_exponent: u32,
    /// Maximum nesting depth of the syntax tree; every operator counts.
    #[serde(default = "SimplifyBudget::default_max_depth")]
    pub max_depth: usize,
    /// Largest bit length of any numerator or denominator.
    #[serde(default = "SimplifyBudget::default_max_coefficient_bits")]
    pub max_coefficient_bits: u64,
}

impl SimplifyBudget {
    const fn default_max_terms() -> usize {
        2048
    }

    const fn default_max_exponent() -> u32 {
        256
    }

    const fn default_max_depth() -> usize {
        128
    }

    const fn default_max_coefficient_bits() -> u64 {
        8192
    }

    pub(crate) fn check_terms(&self, terms: usize) -> Result<(), MathcheckError> {
        if terms > self.max_terms {
            return Err(MathcheckError::Budget(
                ErrorInfo::new("max_terms", "polynomial exceeded the term budget")
                    .with_context("terms", terms.to_string())
                    .with_context("max_terms", self.max_terms.to_string()),
            ));
        }
        Ok(())
    }

    /// Converts an exponent or root index to `u32`, rejecting anything larger
    /// than `max_exponent` in magnitude.
    pub(crate) fn check_exponent(&self, exponent: &BigInt) -> Result<u32, MathcheckError> {
        match exponent.magnitude().to_u32() {
            Some(value) if value <= self.max_exponent => Ok(value),
            _ => Err(MathcheckError::Budget(
                ErrorInfo::new("max_exponent", "exponent exceeded the budget")
                    .with_context("exponent", exponent.to_string())
                    .with_context("max_exponent", self.max_exponent.to_string()),
            )),
        }
    }

    /// Rejects coefficients (or estimates of coefficients about to be
    /// computed) wider than `max_coefficient_bits`.
    pub(crate) fn check_coefficient_bits(&self, bits: u64) -> Result<(), MathcheckError> {
        if bits > self.max_coefficient_bits {
            return Err(MathcheckError::Budget(
                ErrorInfo::new("max_coefficient_bits", "coefficient exceeded the size budget")
                    .with_context("bits", bits.to_string())
                    .with_context("max_coefficient_bits", self.max_coefficient_bits.to_string()),
            ));
        }
        Ok(())
    }

    pub(crate) fn check_depth(&self, depth: usize) -> Result<(), MathcheckError> {
        if depth > self.max_depth {
            return Err(MathcheckError::Budget(
                ErrorInfo::new("max_depth", "expression nesting exceeded the budget")
                    .with_context("max_depth", self.max_depth.to_string()),
            ));
        }
        Ok(())
    }
}

impl Default for SimplifyBudget {
    fn default() -> Self {
        Self {
            max_terms: Self::default_max_terms(),
            max_exponent: Self::default_max_exponent(),
            max_depth: Self::default_max_depth(),
            max_coefficient_bits: Self::default_max_coefficient_bits(),
        }
    }
}
