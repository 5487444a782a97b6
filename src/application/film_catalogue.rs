use std::sync::Arc;

use chrono::Local;

use crate::domain::{
    Customer, Film, FilmCode, Situation,
    commands::RegisterFilm,
    film,
    records::{format_film_line, parse_film_line},
};
use crate::ports::RecordStore;

use super::errors::{LocadoraError, Result, ensure_storable};
use super::persistence::{for_each_line, replace_all};
use super::rental_ledger::{RentalHistoryEntry, RentalLedger};
use super::user_registry::UserRegistry;

/// Film catalogue, mirrored in `filmes.txt`
///
/// Owns the rental ledger so that a successful rental is logged right
/// after the catalogue file has been rewritten.
pub struct FilmCatalogue {
    store: Arc<dyn RecordStore>,
    films: Vec<Film>,
    ledger: RentalLedger,
}

impl FilmCatalogue {
    /// Loads every film from the store.
    ///
    /// Lines with fewer than five fields are skipped; any other line that
    /// does not parse aborts the load.
    pub fn load(store: Arc<dyn RecordStore>, ledger: RentalLedger) -> Result<Self> {
        let file = store.location();
        let mut films = Vec::new();

        for_each_line(store.as_ref(), |line_no, line| {
            let parsed = parse_film_line(line).map_err(|reason| LocadoraError::CorruptFile {
                file: file.clone(),
                line: line_no,
                reason,
            })?;
            match parsed {
                Some(film) => films.push(film),
                None if line.trim().is_empty() => {}
                None => tracing::warn!(file = %file, line_no, "skipping short film line"),
            }
            Ok(())
        })?;

        tracing::debug!(count = films.len(), "films loaded");

        Ok(Self {
            store,
            films,
            ledger,
        })
    }

    pub fn register(&mut self, cmd: &RegisterFilm) -> Result<Film> {
        if self.find_by_code(cmd.code).is_some() {
            return Err(LocadoraError::DuplicateCode);
        }
        ensure_storable("título", &cmd.title)?;
        ensure_storable("gênero", &cmd.genre)?;

        let film = film::register_film(cmd);
        self.films.push(film.clone());
        self.persist()?;

        tracing::info!(code = %film.code, title = %film.title, genre = %film.genre, "film registered");
        Ok(film)
    }

    /// Rents an available film to `customer` and logs the rental.
    ///
    /// The ledger is only written after the catalogue file.
    pub fn rent(&mut self, code: FilmCode, customer: &Customer) -> Result<Film> {
        let index = self.position(code).ok_or(LocadoraError::FilmNotFound)?;

        let (rented, event) = film::rent_film(&self.films[index], customer, Local::now())?;
        self.films[index] = rented.clone();
        self.persist()?;

        tracing::info!(%code, holder = %customer.document, "film rented");
        self.ledger.record(&event)?;
        Ok(rented)
    }

    pub fn return_film(&mut self, code: FilmCode) -> Result<Film> {
        let index = self.position(code).ok_or(LocadoraError::FilmNotFound)?;

        let returned = film::return_film(&self.films[index])?;
        self.films[index] = returned.clone();
        self.persist()?;

        tracing::info!(%code, "film returned");
        Ok(returned)
    }

    /// Removes a film whatever its situation.
    ///
    /// Deleting a rented film drops the holder link; ledger lines stay.
    pub fn delete(&mut self, code: FilmCode) -> Result<Film> {
        let index = self.position(code).ok_or(LocadoraError::FilmNotFound)?;

        let removed = self.films.remove(index);
        if !removed.is_available() {
            tracing::warn!(%code, holder = ?removed.holder(), "deleting a film that is still rented");
        }
        self.persist()?;

        tracing::info!(%code, "film deleted");
        Ok(removed)
    }

    pub fn find_by_code(&self, code: FilmCode) -> Option<&Film> {
        self.films.iter().find(|film| film.code == code)
    }

    pub fn list(&self) -> &[Film] {
        &self.films
    }

    pub fn rental_history(
        &self,
        code: FilmCode,
        users: &UserRegistry,
    ) -> Result<Vec<RentalHistoryEntry>> {
        self.ledger.history_for_film(code, users)
    }

    /// Fills in the holder of rented films read without one, from the
    /// latest ledger entry for each film.
    ///
    /// Films whose holder cannot be found stay rented with an unknown
    /// holder; they can still be returned. Nothing is written until the
    /// next save.
    pub fn recover_holders(&mut self, users: &UserRegistry) -> Result<()> {
        if !self.films.iter().any(holder_unknown) {
            return Ok(());
        }

        let last_holders = self.ledger.last_holders(users)?;
        for film in &mut self.films {
            if !holder_unknown(film) {
                continue;
            }
            match last_holders.get(&film.code) {
                Some(holder) => {
                    tracing::info!(code = %film.code, %holder, "recovered holder from rental log");
                    film.situation = Situation::Rented {
                        holder: Some(holder.clone()),
                    };
                }
                None => {
                    tracing::warn!(code = %film.code, "rented film has no known holder");
                }
            }
        }
        Ok(())
    }

    fn position(&self, code: FilmCode) -> Option<usize> {
        self.films.iter().position(|film| film.code == code)
    }

    fn persist(&self) -> Result<()> {
        let lines = self.films.iter().map(format_film_line).collect();
        replace_all(self.store.as_ref(), lines)
    }
}

fn holder_unknown(film: &Film) -> bool {
    matches!(film.situation, Situation::Rented { holder: None })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::RecordStore as InMemoryRecordStore;
    use crate::domain::{CustomerId, Document, UserKind};

    struct Fixture {
        films: Arc<InMemoryRecordStore>,
        rentals: Arc<InMemoryRecordStore>,
        catalogue: FilmCatalogue,
    }

    fn fixture(lines: &[&str]) -> Fixture {
        let films = Arc::new(InMemoryRecordStore::with_lines("filmes.txt", lines.to_vec()));
        let rentals = Arc::new(InMemoryRecordStore::new("alugueis.txt"));
        let catalogue =
            FilmCatalogue::load(films.clone(), RentalLedger::new(rentals.clone())).unwrap();
        Fixture {
            films,
            rentals,
            catalogue,
        }
    }

    fn ana() -> Customer {
        Customer {
            id: CustomerId::new(42),
            document: Document::new("123.456.789-00"),
            name: "Ana".to_string(),
            phone: "555".to_string(),
            address: "Rua A".to_string(),
            kind: UserKind::Cliente,
        }
    }

    fn code(value: i32) -> FilmCode {
        FilmCode::new(value)
    }

    #[test]
    fn test_register_persists_available_film() {
        let mut fx = fixture(&[]);

        let film = fx
            .catalogue
            .register(&RegisterFilm::new(10, "Matrix", "F", 14))
            .unwrap();

        assert_eq!(film.situation.label(), "disponível");
        assert_eq!(film.genre.as_str(), "Ficção Científica");
        assert_eq!(fx.catalogue.find_by_code(code(10)), Some(&film));
        assert_eq!(fx.films.contents(), vec!["10;Matrix;Ficção Científica;14;disponível"]);
    }

    #[test]
    fn test_register_duplicate_code_is_rejected() {
        let mut fx = fixture(&["10;Matrix;F;14;disponível"]);

        let result = fx.catalogue.register(&RegisterFilm::new(10, "Outro", "D", 0));

        assert!(matches!(result, Err(LocadoraError::DuplicateCode)));
        assert_eq!(fx.catalogue.list().len(), 1);
    }

    #[test]
    fn test_rent_persists_then_records_event() {
        let mut fx = fixture(&["10;Matrix;F;14;disponível"]);

        let film = fx.catalogue.rent(code(10), &ana()).unwrap();

        assert_eq!(film.holder().unwrap().as_str(), "123.456.789-00");
        assert_eq!(
            fx.films.contents(),
            vec!["10;Matrix;Ficção Científica;14;indisponível;123.456.789-00"]
        );
        assert_eq!(fx.rentals.contents(), vec!["42;10;Matrix"]);
    }

    #[test]
    fn test_rent_unknown_or_rented_film_fails() {
        let mut fx = fixture(&["10;Matrix;F;14;disponível"]);
        fx.catalogue.rent(code(10), &ana()).unwrap();

        assert!(matches!(
            fx.catalogue.rent(code(99), &ana()),
            Err(LocadoraError::FilmNotFound)
        ));
        assert!(matches!(
            fx.catalogue.rent(code(10), &ana()),
            Err(LocadoraError::AlreadyRented)
        ));
        assert_eq!(fx.rentals.contents().len(), 1);
    }

    #[test]
    fn test_rent_does_not_log_when_catalogue_write_fails() {
        let mut fx = fixture(&["10;Matrix;F;14;disponível"]);
        fx.films.set_fail_writes(true);

        let result = fx.catalogue.rent(code(10), &ana());

        assert!(matches!(result, Err(LocadoraError::Io { .. })));
        assert!(fx.rentals.contents().is_empty());
        assert!(!fx.catalogue.find_by_code(code(10)).unwrap().is_available());
    }

    #[test]
    fn test_rent_then_return_restores_film() {
        let mut fx = fixture(&["10;Matrix;F;14;disponível"]);
        let before = fx.catalogue.find_by_code(code(10)).cloned().unwrap();

        fx.catalogue.rent(code(10), &ana()).unwrap();
        let after = fx.catalogue.return_film(code(10)).unwrap();

        assert_eq!(after, before);
        assert_eq!(fx.films.contents(), vec!["10;Matrix;Ficção Científica;14;disponível"]);
        assert_eq!(fx.rentals.contents().len(), 1);
    }

    #[test]
    fn test_return_available_or_unknown_film_fails() {
        let mut fx = fixture(&["10;Matrix;F;14;disponível"]);

        assert!(matches!(
            fx.catalogue.return_film(code(10)),
            Err(LocadoraError::AlreadyAvailable)
        ));
        assert!(matches!(
            fx.catalogue.return_film(code(11)),
            Err(LocadoraError::FilmNotFound)
        ));
    }

    #[test]
    fn test_delete_keeps_order_of_remaining_films() {
        let mut fx = fixture(&[
            "1;A;D;10;disponível",
            "2;B;D;10;disponível",
            "3;C;D;10;disponível",
        ]);

        fx.catalogue.delete(code(2)).unwrap();

        let codes: Vec<i32> = fx.catalogue.list().iter().map(|f| f.code.value()).collect();
        assert_eq!(codes, vec![1, 3]);
        assert_eq!(fx.films.contents().len(), 2);
        assert!(matches!(
            fx.catalogue.delete(code(2)),
            Err(LocadoraError::FilmNotFound)
        ));
    }

    #[test]
    fn test_delete_rented_film_is_allowed() {
        let mut fx = fixture(&["1;A;D;10;indisponível;111"]);

        let removed = fx.catalogue.delete(code(1)).unwrap();

        assert_eq!(removed.holder().unwrap().as_str(), "111");
        assert!(fx.catalogue.list().is_empty());
    }

    #[test]
    fn test_load_canonicalises_genre_and_skips_short_lines() {
        let fx = fixture(&["1;A;a;10;disponível", "2;B", "3;C;Comédia;12;DISPONÍVEL"]);

        let genres: Vec<&str> = fx.catalogue.list().iter().map(|f| f.genre.as_str()).collect();
        assert_eq!(genres, vec!["Ação", "Comédia"]);
    }

    #[test]
    fn test_recover_holders_from_rental_log() {
        // Arrange
        let users = UserRegistry::load(Arc::new(InMemoryRecordStore::with_lines(
            "usuarios.txt",
            ["42;123.456.789-00;Ana;555;Rua A;Cliente"],
        )))
        .unwrap();
        let mut fx = fixture(&[
            "1;Alien;T;16;indisponível",
            "2;Heat;A;14;indisponível",
            "3;Ran;D;12;indisponível;999",
        ]);
        fx.rentals.append("42;1;Alien").unwrap();
        fx.rentals.append("42;3;Ran").unwrap();

        // Act
        fx.catalogue.recover_holders(&users).unwrap();

        // Assert
        let holders: Vec<Option<&str>> = fx
            .catalogue
            .list()
            .iter()
            .map(|f| f.holder().map(Document::as_str))
            .collect();
        assert_eq!(holders, vec![Some("123.456.789-00"), None, Some("999")]);
        assert!(!fx.catalogue.find_by_code(code(2)).unwrap().is_available());

        // The film with no known holder can still be returned
        fx.catalogue.return_film(code(2)).unwrap();
        assert_eq!(
            fx.films.contents(),
            vec![
                "1;Alien;Terror;16;indisponível;123.456.789-00",
                "2;Heat;Ação;14;disponível",
                "3;Ran;Drama;12;indisponível;999",
            ]
        );
    }

    #[test]
    fn test_load_with_bad_integer_is_corrupt_file() {
        let films = Arc::new(InMemoryRecordStore::with_lines(
            "filmes.txt",
            ["1;A;D;10;disponível", "2;B;D;dez;disponível"],
        ));
        let ledger = RentalLedger::new(Arc::new(InMemoryRecordStore::new("alugueis.txt")));

        let result = FilmCatalogue::load(films, ledger);

        assert!(matches!(
            result,
            Err(LocadoraError::CorruptFile { line: 2, .. })
        ));
    }

    #[test]
    fn test_register_rejects_separator_in_title() {
        let mut fx = fixture(&[]);

        let result = fx.catalogue.register(&RegisterFilm::new(1, "A;B", "D", 0));

        assert!(matches!(
            result,
            Err(LocadoraError::InvalidField { field: "título" })
        ));
        assert!(fx.catalogue.list().is_empty());
    }
}
