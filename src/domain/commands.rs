use super::{CustomerDetails, FilmCode};

/// Command: register a film in the catalogue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterFilm {
    pub code: FilmCode,
    pub title: String,
    pub genre: String,
    pub classification: i32,
}

impl RegisterFilm {
    pub fn new(
        code: i32,
        title: impl Into<String>,
        genre: impl Into<String>,
        classification: i32,
    ) -> Self {
        Self {
            code: FilmCode::new(code),
            title: title.into(),
            genre: genre.into(),
            classification,
        }
    }
}

/// Command: replace the details of the customer holding `original_document`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCustomer {
    pub original_document: String,
    pub details: CustomerDetails,
}
