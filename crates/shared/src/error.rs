use thiserror::Error;

/// Failures raised while turning user input into domain values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("invalid employee id: {0:?}")]
    InvalidId(String),
    #[error("invalid sort key: {0:?} (expected name, date or salary)")]
    InvalidSortKey(String),
    #[error("field `{0}` must not be empty")]
    EmptyField(&'static str),
    #[error("salary is not numeric: {0:?}")]
    InvalidSalary(String),
    #[error("unknown employee field: {0:?}")]
    UnknownField(String),
    #[error("unknown route: {0:?}")]
    UnknownRoute(String),
}
