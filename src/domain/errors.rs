use thiserror::Error;

/// Rental error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RentFilmError {
    /// Someone already holds the film
    AlreadyRented,
}

/// Return error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnFilmError {
    /// Nobody holds the film
    AlreadyAvailable,
}

/// Why a persisted line could not be turned back into a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("valor inteiro inválido no campo {field}: '{value}'")]
    InvalidInteger { field: &'static str, value: String },

    #[error("situação desconhecida: '{0}'")]
    UnknownSituation(String),
}
