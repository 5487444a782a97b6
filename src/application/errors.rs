use thiserror::Error;

use crate::domain::{RecordError, RentFilmError, ReturnFilmError};

/// Errors of the shop's application layer
///
/// Display strings are the messages shown to the operator.
#[derive(Debug, Error)]
pub enum LocadoraError {
    /// No film with the requested code
    #[error("Filme não encontrado.")]
    FilmNotFound,

    /// No customer with the requested document
    #[error("Usuário não encontrado.")]
    CustomerNotFound,

    /// Rental attempted for a document nobody registered
    #[error("Cliente não encontrado. Por favor, cadastre o cliente antes de alugar.")]
    RenterNotFound,

    /// Film code already registered
    #[error("Já existe um filme cadastrado com esse código.")]
    DuplicateCode,

    /// Normalised document already belongs to another customer
    #[error("Já existe um usuário cadastrado com este CPF.")]
    DuplicateDocument,

    /// Every customer identity up to `u64::MAX` is taken
    #[error("Não há mais identificadores disponíveis para novos usuários.")]
    IdentitiesExhausted,

    /// Document without a single digit
    #[error("O CPF deve conter ao menos um dígito.")]
    InvalidDocument,

    /// Text that would break the `;`-separated line format
    #[error("O campo {field} não pode conter ';' nem quebras de linha.")]
    InvalidField { field: &'static str },

    #[error("O filme selecionado já está alugado.")]
    AlreadyRented,

    #[error("O filme selecionado já está disponível.")]
    AlreadyAvailable,

    /// A persisted line could not be parsed
    #[error("Arquivo {file} corrompido na linha {line}: {reason}")]
    CorruptFile {
        file: String,
        line: usize,
        #[source]
        reason: RecordError,
    },

    /// Reading or writing a store failed
    #[error("Erro ao acessar o arquivo {file}: {source}")]
    Io {
        file: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<RentFilmError> for LocadoraError {
    fn from(err: RentFilmError) -> Self {
        match err {
            RentFilmError::AlreadyRented => LocadoraError::AlreadyRented,
        }
    }
}

impl From<ReturnFilmError> for LocadoraError {
    fn from(err: ReturnFilmError) -> Self {
        match err {
            ReturnFilmError::AlreadyAvailable => LocadoraError::AlreadyAvailable,
        }
    }
}

/// Application-layer Result type
pub type Result<T> = std::result::Result<T, LocadoraError>;

/// Rejects text the line format cannot hold.
pub(crate) fn ensure_storable(field: &'static str, value: &str) -> Result<()> {
    if value.contains([';', '\n', '\r']) {
        return Err(LocadoraError::InvalidField { field });
    }
    Ok(())
}
