//! Field-level validation errors for order-entry input.

use thiserror::Error;

/// Why a form submission could not become an `OrderRequest`.
///
/// Always a client-input fault: nothing carrying one of these is ever
/// sent to the exchange. The field names are the form's field names so
/// a UI can highlight the offending input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A field required for this order kind was absent or blank.
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    /// A field that must be one of a fixed set of values was not.
    #[error("invalid value '{1}' for '{0}'")]
    InvalidEnum(&'static str, String),

    /// A numeric field did not parse or was not strictly positive.
    #[error("'{1}' is not a valid positive number for '{0}'")]
    InvalidNumber(&'static str, String),
}

impl ValidationError {
    /// Form field the error refers to.
    pub const fn field(&self) -> &'static str {
        match self {
            Self::MissingField(field)
            | Self::InvalidEnum(field, _)
            | Self::InvalidNumber(field, _) => field,
        }
    }
}
