use thiserror::Error;

// Unified error type for ksptree

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("cannot be non-symmetric yet positive definite")]
    InvalidPropertyCombination,
    #[error("solver {address}: cannot have {property} parent yet be non-{property}")]
    ParentChildPropertyMismatch { address: String, property: &'static str },
    #[error("invalid value {value:?} for {field}: must be a positive integer")]
    InvalidParameterValue { field: &'static str, value: String },
    #[error("solver {address}: cannot use fieldsplit on a matrix that is not block structured")]
    StructureRequired { address: String },
    #[error("no solver at address {0}")]
    NotFound(String),
    #[error("malformed solver address {0:?}")]
    InvalidAddress(String),
    #[error("unknown {kind} {value:?}")]
    UnknownOption { kind: &'static str, value: String },
    #[error("no edit form is open")]
    NoOpenForm,
    #[error("configuration error: {0}")]
    Config(String),
    #[error("tree invariant violated: {0}")]
    InvariantViolated(String),
}

impl TreeError {
    /// True for the rejections `apply_edit` raises during validation.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            TreeError::InvalidPropertyCombination
                | TreeError::ParentChildPropertyMismatch { .. }
                | TreeError::InvalidParameterValue { .. }
                | TreeError::StructureRequired { .. }
                | TreeError::UnknownOption { .. }
        )
    }
}
