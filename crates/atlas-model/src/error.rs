//! Model-level validation errors

/// Errors raised while validating entity field values
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Maturity scores live on a 1-5 scale
    #[error("maturity {value} outside the 1-5 scale")]
    MaturityOutOfRange { value: u8 },
}
