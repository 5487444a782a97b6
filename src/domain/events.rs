use chrono::{DateTime, Local, NaiveDateTime};

use super::{CustomerId, FilmCode};

/// Event: a film was rented to a customer
///
/// Written once to the ledger and never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilmRented {
    pub customer_id: CustomerId,
    pub film_code: FilmCode,
    pub film_title: String,
    pub rented_at: DateTime<Local>,
}

/// A rental as read back from the ledger file.
///
/// Older ledgers identified the customer by document and name and carried a
/// timestamp; current ones store only the customer identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerEntry {
    ById {
        customer_id: CustomerId,
        film_code: FilmCode,
        film_title: String,
    },
    Legacy {
        document: String,
        name: String,
        film_code: FilmCode,
        film_title: String,
        rented_at: Option<NaiveDateTime>,
    },
}

impl LedgerEntry {
    pub fn film_code(&self) -> FilmCode {
        match self {
            LedgerEntry::ById { film_code, .. } | LedgerEntry::Legacy { film_code, .. } => {
                *film_code
            }
        }
    }
}

impl From<&FilmRented> for LedgerEntry {
    fn from(event: &FilmRented) -> Self {
        LedgerEntry::ById {
            customer_id: event.customer_id,
            film_code: event.film_code,
            film_title: event.film_title.clone(),
        }
    }
}
