use std::sync::Arc;

use crate::adapters::text_file::RecordStore as TextFileRecordStore;
use crate::config::AppConfig;
use crate::domain::{Customer, Film, FilmCode};
use crate::ports::RecordStore;

use super::errors::{LocadoraError, Result};
use super::film_catalogue::FilmCatalogue;
use super::rental_ledger::{RentalHistoryEntry, RentalLedger};
use super::user_registry::UserRegistry;

/// A film currently out, with its holder if still registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveRental<'a> {
    pub film: &'a Film,
    pub customer: Option<&'a Customer>,
}

/// The shop: customers, films and their rental log.
///
/// Built once at start-up and handed to the front end by reference.
pub struct Locadora {
    pub users: UserRegistry,
    pub films: FilmCatalogue,
}

impl Locadora {
    /// Opens the three text files under the configured data directory.
    pub fn open(config: &AppConfig) -> Result<Self> {
        std::fs::create_dir_all(config.data_dir()).map_err(|err| LocadoraError::Io {
            file: config.data_dir().display().to_string(),
            source: Box::new(err),
        })?;

        tracing::info!(data_dir = %config.data_dir().display(), "opening shop data");
        Self::from_stores(
            Arc::new(TextFileRecordStore::new(config.users_path())),
            Arc::new(TextFileRecordStore::new(config.films_path())),
            Arc::new(TextFileRecordStore::new(config.rentals_path())),
        )
    }

    /// Loads users first, then films. The ledger is read at load time only
    /// when a rented film was stored without its holder.
    pub fn from_stores(
        users: Arc<dyn RecordStore>,
        films: Arc<dyn RecordStore>,
        rentals: Arc<dyn RecordStore>,
    ) -> Result<Self> {
        let users = UserRegistry::load(users)?;
        let mut films = FilmCatalogue::load(films, RentalLedger::new(rentals))?;
        films.recover_holders(&users)?;
        Ok(Self { users, films })
    }

    /// Rents a film to the customer registered under `document`.
    pub fn rent_to_document(&mut self, code: FilmCode, document: &str) -> Result<Film> {
        let customer = self
            .users
            .find_by_document(document)
            .ok_or(LocadoraError::RenterNotFound)?;
        self.films.rent(code, customer)
    }

    pub fn return_film(&mut self, code: FilmCode) -> Result<Film> {
        self.films.return_film(code)
    }

    pub fn rental_history(&self, code: FilmCode) -> Result<Vec<RentalHistoryEntry>> {
        self.films.rental_history(code, &self.users)
    }

    /// Rented films in catalogue order, each with its holder resolved.
    pub fn active_rentals(&self) -> Vec<ActiveRental<'_>> {
        self.films
            .list()
            .iter()
            .filter(|film| !film.is_available())
            .map(|film| ActiveRental {
                film,
                customer: film
                    .holder()
                    .and_then(|holder| self.users.find_by_document(holder.as_str())),
            })
            .collect()
    }

    pub fn available_films(&self) -> impl Iterator<Item = &Film> {
        self.films.list().iter().filter(|film| film.is_available())
    }

    /// Films whose title equals `title`, ignoring case and surrounding spaces.
    pub fn search_by_title(&self, title: &str) -> Vec<&Film> {
        let wanted = title.trim().to_lowercase();
        self.films
            .list()
            .iter()
            .filter(|film| film.title.trim().to_lowercase() == wanted)
            .collect()
    }
}
