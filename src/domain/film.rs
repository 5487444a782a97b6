use chrono::{DateTime, Local};

use super::{
    Customer, Document, FilmCode, FilmRented, Genre, RentFilmError, ReturnFilmError,
    commands::RegisterFilm,
};

pub const AVAILABLE_LABEL: &str = "disponível";
pub const RENTED_LABEL: &str = "indisponível";

/// Rental situation of a film.
///
/// A rental made here always records its holder. Films read from older
/// files may be rented with the holder still unknown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Situation {
    Available,
    Rented { holder: Option<Document> },
}

impl Situation {
    pub fn label(&self) -> &'static str {
        match self {
            Situation::Available => AVAILABLE_LABEL,
            Situation::Rented { .. } => RENTED_LABEL,
        }
    }

    pub fn holder(&self) -> Option<&Document> {
        match self {
            Situation::Available => None,
            Situation::Rented { holder } => holder.as_ref(),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Situation::Available)
    }
}

/// Film in the catalogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Film {
    pub code: FilmCode,
    pub title: String,
    pub genre: Genre,
    pub classification: i32,
    pub situation: Situation,
}

impl Film {
    pub fn holder(&self) -> Option<&Document> {
        self.situation.holder()
    }

    pub fn is_available(&self) -> bool {
        self.situation.is_available()
    }
}

/// Pure function: registers a film.
///
/// The title is trimmed, the genre goes through the shorthand translation
/// and the film starts available.
pub fn register_film(cmd: &RegisterFilm) -> Film {
    Film {
        code: cmd.code,
        title: cmd.title.trim().to_string(),
        genre: Genre::from_input(&cmd.genre),
        classification: cmd.classification,
        situation: Situation::Available,
    }
}

/// Pure function: rents an available film to a customer.
///
/// Returns the held film and the event to append to the ledger.
pub fn rent_film(
    film: &Film,
    customer: &Customer,
    rented_at: DateTime<Local>,
) -> Result<(Film, FilmRented), RentFilmError> {
    if !film.is_available() {
        return Err(RentFilmError::AlreadyRented);
    }

    let rented = Film {
        situation: Situation::Rented {
            holder: Some(customer.document.clone()),
        },
        ..film.clone()
    };

    let event = FilmRented {
        customer_id: customer.id,
        film_code: film.code,
        film_title: film.title.clone(),
        rented_at,
    };

    Ok((rented, event))
}

/// Pure function: takes a held film back.
pub fn return_film(film: &Film) -> Result<Film, ReturnFilmError> {
    if film.is_available() {
        return Err(ReturnFilmError::AlreadyAvailable);
    }

    Ok(Film {
        situation: Situation::Available,
        ..film.clone()
    })
}
