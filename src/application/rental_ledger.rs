use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::domain::{
    Document, FilmCode, FilmRented, LedgerEntry,
    records::{format_ledger_line, parse_ledger_line},
};
use crate::ports::RecordStore;

use super::errors::{LocadoraError, Result};
use super::persistence::{for_each_line, io_error};
use super::user_registry::UserRegistry;

pub const UNKNOWN_CUSTOMER: &str = "Cliente não encontrado";
pub const NOT_INFORMED: &str = "Não informado";

/// One past rental of a film, resolved against the current customer data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RentalHistoryEntry {
    pub customer_name: String,
    pub document: String,
    pub phone: String,
    pub address: String,
    pub film_title: String,
    /// Only legacy ledger lines carry a timestamp
    pub rented_at: Option<NaiveDateTime>,
}

impl fmt::Display for RentalHistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cliente: {} (CPF: {}) - Telefone: {} - Endereço: {}",
            self.customer_name, self.document, self.phone, self.address
        )
    }
}

/// Append-only rental log, kept in `alugueis.txt`
///
/// Holds no state beyond its store. Nothing is ever rewritten or removed.
pub struct RentalLedger {
    store: Arc<dyn RecordStore>,
}

impl RentalLedger {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Appends the rental as `customerId;filmCode;filmTitle`.
    pub fn record(&self, event: &FilmRented) -> Result<()> {
        self.store
            .append(&format_ledger_line(&LedgerEntry::from(event)))
            .map_err(|err| io_error(self.store.as_ref(), err))?;

        tracing::info!(
            customer_id = %event.customer_id,
            film_code = %event.film_code,
            rented_at = %event.rented_at.format("%d/%m/%Y %H:%M:%S"),
            "rental recorded"
        );
        Ok(())
    }

    /// Every rental of `code`, in file order.
    ///
    /// Customers are looked up again so the output reflects their current
    /// details; current lines resolve by identity, legacy lines by
    /// document. Lines with fewer than three fields are skipped.
    pub fn history_for_film(
        &self,
        code: FilmCode,
        users: &UserRegistry,
    ) -> Result<Vec<RentalHistoryEntry>> {
        let mut history = Vec::new();
        self.for_each_entry(|entry| {
            if entry.film_code() == code {
                history.push(resolve(entry, users));
            }
        })?;
        Ok(history)
    }

    /// Document of the most recent renter of every film in the ledger.
    ///
    /// A film whose latest rental names a customer id that is no longer
    /// registered has no entry.
    pub fn last_holders(&self, users: &UserRegistry) -> Result<HashMap<FilmCode, Document>> {
        let mut holders = HashMap::new();
        self.for_each_entry(|entry| {
            let code = entry.film_code();
            let holder = match entry {
                LedgerEntry::ById { customer_id, .. } => users
                    .find_by_id(customer_id)
                    .map(|customer| customer.document.clone()),
                LedgerEntry::Legacy { document, .. } => Some(
                    users
                        .find_by_document(&document)
                        .map_or_else(|| Document::new(&document), |c| c.document.clone()),
                ),
            };
            match holder {
                Some(document) => holders.insert(code, document),
                None => holders.remove(&code),
            };
        })?;
        Ok(holders)
    }

    /// Visits every parsed entry in file order; short lines are skipped.
    fn for_each_entry(&self, mut visit: impl FnMut(LedgerEntry)) -> Result<()> {
        let file = self.store.location();
        for_each_line(self.store.as_ref(), |line_no, line| {
            let entry = parse_ledger_line(line).map_err(|reason| LocadoraError::CorruptFile {
                file: file.clone(),
                line: line_no,
                reason,
            })?;
            if let Some(entry) = entry {
                visit(entry);
            }
            Ok(())
        })
    }
}

fn resolve(entry: LedgerEntry, users: &UserRegistry) -> RentalHistoryEntry {
    match entry {
        LedgerEntry::ById {
            customer_id,
            film_title,
            ..
        } => match users.find_by_id(customer_id) {
            Some(customer) => RentalHistoryEntry {
                customer_name: customer.name.clone(),
                document: customer.document.to_string(),
                phone: customer.phone.clone(),
                address: customer.address.clone(),
                film_title,
                rented_at: None,
            },
            None => RentalHistoryEntry {
                customer_name: UNKNOWN_CUSTOMER.to_string(),
                document: format!("ID: {customer_id}"),
                phone: NOT_INFORMED.to_string(),
                address: NOT_INFORMED.to_string(),
                film_title,
                rented_at: None,
            },
        },
        LedgerEntry::Legacy {
            document,
            name,
            film_title,
            rented_at,
            ..
        } => match users.find_by_document(&document) {
            Some(customer) => RentalHistoryEntry {
                customer_name: customer.name.clone(),
                document: customer.document.to_string(),
                phone: customer.phone.clone(),
                address: customer.address.clone(),
                film_title,
                rented_at,
            },
            None => RentalHistoryEntry {
                customer_name: name,
                document,
                phone: NOT_INFORMED.to_string(),
                address: NOT_INFORMED.to_string(),
                film_title,
                rented_at,
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::RecordStore as InMemoryRecordStore;
    use crate::domain::{CustomerDetails, CustomerId};
    use chrono::Local;

    fn empty_users() -> UserRegistry {
        UserRegistry::load(Arc::new(InMemoryRecordStore::new("usuarios.txt"))).unwrap()
    }

    fn rented(customer_id: u64, code: i32, title: &str) -> FilmRented {
        FilmRented {
            customer_id: CustomerId::new(customer_id),
            film_code: FilmCode::new(code),
            film_title: title.to_string(),
            rented_at: Local::now(),
        }
    }

    #[test]
    fn test_record_appends_current_format() {
        let store = Arc::new(InMemoryRecordStore::with_lines("alugueis.txt", ["111;Bob;7;Alien"]));
        let ledger = RentalLedger::new(store.clone());

        ledger.record(&rented(42, 7, "Alien")).unwrap();
        ledger.record(&rented(43, 8, "Heat")).unwrap();

        assert_eq!(
            store.contents(),
            vec!["111;Bob;7;Alien", "42;7;Alien", "43;8;Heat"]
        );
    }

    #[test]
    fn test_record_failure_is_io_error() {
        let store = Arc::new(InMemoryRecordStore::new("alugueis.txt"));
        store.set_fail_writes(true);
        let ledger = RentalLedger::new(store);

        let result = ledger.record(&rented(1, 1, "A"));

        assert!(matches!(result, Err(LocadoraError::Io { .. })));
    }

    #[test]
    fn test_history_for_film_filters_and_keeps_order() {
        let mut users = empty_users();
        users
            .register(&CustomerDetails::new("Ana", "123", "555", "Rua A"))
            .unwrap();
        let store = Arc::new(InMemoryRecordStore::with_lines(
            "alugueis.txt",
            ["1;7;Alien", "1;8;Heat", "9;7;Alien", "curta"],
        ));
        let ledger = RentalLedger::new(store);

        let history = ledger.history_for_film(FilmCode::new(7), &users).unwrap();

        let lines: Vec<String> = history.iter().map(ToString::to_string).collect();
        assert_eq!(
            lines,
            vec![
                "Cliente: Ana (CPF: 123) - Telefone: 555 - Endereço: Rua A",
                "Cliente: Cliente não encontrado (CPF: ID: 9) - Telefone: Não informado - Endereço: Não informado",
            ]
        );
    }

    #[test]
    fn test_history_legacy_line_falls_back_to_recorded_name() {
        let users = empty_users();
        let store = Arc::new(InMemoryRecordStore::with_lines(
            "alugueis.txt",
            ["111;Bob;7;Alien;01/01/2020 10:00:00"],
        ));
        let ledger = RentalLedger::new(store);

        let history = ledger.history_for_film(FilmCode::new(7), &users).unwrap();

        assert_eq!(history.len(), 1);
        assert_eq!(history[0].customer_name, "Bob");
        assert_eq!(history[0].document, "111");
        assert_eq!(history[0].phone, NOT_INFORMED);
        assert!(history[0].rented_at.is_some());
    }

    #[test]
    fn test_history_reflects_updated_customer_details() {
        let mut users = empty_users();
        users
            .register(&CustomerDetails::new("Ana", "123", "555", "Rua A"))
            .unwrap();
        let store = Arc::new(InMemoryRecordStore::new("alugueis.txt"));
        let ledger = RentalLedger::new(store);
        ledger.record(&rented(1, 7, "Alien")).unwrap();

        users
            .update(&crate::domain::commands::UpdateCustomer {
                original_document: "123".to_string(),
                details: CustomerDetails::new("Ana Paula", "123", "999", "Rua Nova"),
            })
            .unwrap();
        let history = ledger.history_for_film(FilmCode::new(7), &users).unwrap();

        assert_eq!(history[0].customer_name, "Ana Paula");
        assert_eq!(history[0].phone, "999");
        assert_eq!(history[0].address, "Rua Nova");
    }

    #[test]
    fn test_history_with_bad_integer_is_corrupt_file() {
        let users = empty_users();
        let store = Arc::new(InMemoryRecordStore::with_lines(
            "alugueis.txt",
            ["1;7;Alien", "x;7;Alien"],
        ));
        let ledger = RentalLedger::new(store);

        let result = ledger.history_for_film(FilmCode::new(7), &users);

        assert!(matches!(
            result,
            Err(LocadoraError::CorruptFile { line: 2, .. })
        ));
    }

    #[test]
    fn test_last_holders_follow_latest_rental() {
        // Arrange
        let mut users = empty_users();
        users
            .register(&CustomerDetails::new("Ana", "123.456", "555", "Rua A"))
            .unwrap();
        let store = Arc::new(InMemoryRecordStore::with_lines(
            "alugueis.txt",
            [
                "111;Bob;7;Alien;01/01/2020 10:00:00",
                "1;7;Alien",
                "1;8;Heat",
                "123456;Ana;8;Heat",
                "1;9;Ran",
                "50;9;Ran",
            ],
        ));
        let ledger = RentalLedger::new(store);

        // Act
        let holders = ledger.last_holders(&users).unwrap();

        // Assert
        assert_eq!(holders.get(&FilmCode::new(7)), Some(&Document::new("123.456")));
        assert_eq!(holders.get(&FilmCode::new(8)), Some(&Document::new("123.456")));
        assert_eq!(holders.get(&FilmCode::new(9)), None);
        assert_eq!(holders.len(), 2);
    }

    #[test]
    fn test_last_holders_keeps_unregistered_legacy_document() {
        let store = Arc::new(InMemoryRecordStore::with_lines("alugueis.txt", ["111;Bob;7;Alien"]));
        let ledger = RentalLedger::new(store);

        let holders = ledger.last_holders(&empty_users()).unwrap();

        assert_eq!(holders.get(&FilmCode::new(7)), Some(&Document::new("111")));
    }

    #[test]
    fn test_history_of_empty_ledger_is_empty() {
        let ledger = RentalLedger::new(Arc::new(InMemoryRecordStore::new("alugueis.txt")));

        let history = ledger
            .history_for_film(FilmCode::new(1), &empty_users())
            .unwrap();

        assert!(history.is_empty());
    }
}
