use thiserror::Error;

/// Errors raised by the calculator, translator and classifier.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("invalid input: {field} must be a finite non-negative number, got {value}")]
    InvalidInput { field: &'static str, value: f64 },
    #[error("{category} emissions overflow the representable range")]
    Overflow { category: &'static str },
    #[error("malformed input: {0}")]
    Malformed(String),
    #[error("unknown activity: {0}")]
    UnknownActivity(String),
}

/// Errors raised while loading or validating an emission factor table.
#[derive(Debug, Error)]
pub enum FactorTableError {
    #[error("factor table parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("factor {path} must be finite and non-negative, got {value}")]
    InvalidFactor { path: &'static str, value: f64 },
    #[error("factor table io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Rejects negative, NaN and infinite values.
pub(crate) fn check_non_negative(field: &'static str, value: f64) -> Result<f64, CalcError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(CalcError::InvalidInput { field, value })
    }
}

/// Rejects a computed quantity that left the finite range.
pub(crate) fn check_finite(category: &'static str, kg: f64) -> Result<f64, CalcError> {
    if kg.is_finite() {
        Ok(kg)
    } else {
        Err(CalcError::Overflow { category })
    }
}
