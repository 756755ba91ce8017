use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("field `{field}` must not be empty")]
    MissingField { field: &'static str },
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: u64,
        max: u64,
        value: u64,
    },
}

impl DomainError {
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    pub fn out_of_range(field: &'static str, min: u64, max: u64, value: u64) -> Self {
        Self::OutOfRange {
            field,
            min,
            max,
            value,
        }
    }
}
