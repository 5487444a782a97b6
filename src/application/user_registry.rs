use std::sync::Arc;

use crate::domain::{
    Customer, CustomerDetails, CustomerId, Document,
    commands::UpdateCustomer,
    customer::{apply_details, new_customer},
    normalize_document,
    records::{CustomerRecord, format_customer_line, parse_customer_line},
};
use crate::ports::RecordStore;

use super::errors::{LocadoraError, Result, ensure_storable};
use super::persistence::{for_each_line, replace_all};

/// Registry of customers, mirrored in `usuarios.txt`
///
/// Every mutation rewrites the whole file in insertion order. When the
/// rewrite fails the in-memory change is kept and the error is returned.
pub struct UserRegistry {
    store: Arc<dyn RecordStore>,
    customers: Vec<Customer>,
    next_id: Option<CustomerId>,
}

impl UserRegistry {
    /// Loads every customer from the store.
    ///
    /// Legacy lines without an identity receive fresh identities above the
    /// highest one found in the file. They are rewritten in the current
    /// layout on the next save.
    pub fn load(store: Arc<dyn RecordStore>) -> Result<Self> {
        let mut records = Vec::new();
        for_each_line(store.as_ref(), |line_no, line| {
            match parse_customer_line(line) {
                Some(record) => records.push(record),
                None if line.trim().is_empty() => {}
                None => tracing::warn!(file = %store.location(), line_no, "skipping short user line"),
            }
            Ok(())
        })?;

        let highest = records
            .iter()
            .filter_map(|record| match record {
                CustomerRecord::Current(customer) => Some(customer.id),
                CustomerRecord::Legacy { .. } => None,
            })
            .max();
        // Identities start at 1; an id of 0 in the file still reserves 1.
        let mut next_id = match highest {
            None => Some(CustomerId::new(1)),
            Some(id) => id.max(CustomerId::new(1)).checked_next(),
        };

        let mut customers = Vec::with_capacity(records.len());
        for record in records {
            let customer = match record {
                CustomerRecord::Current(customer) => customer,
                CustomerRecord::Legacy {
                    document,
                    name,
                    phone,
                    address,
                    kind,
                } => {
                    let id = next_id.ok_or(LocadoraError::IdentitiesExhausted)?;
                    next_id = id.checked_next();
                    tracing::info!(%id, %document, "assigned identity to legacy user line");
                    Customer {
                        id,
                        document,
                        name,
                        phone,
                        address,
                        kind,
                    }
                }
            };
            customers.push(customer);
        }

        if next_id.is_none() {
            tracing::warn!(file = %store.location(), "no identities left for new users");
        }
        tracing::debug!(count = customers.len(), next_id = ?next_id, "users loaded");

        Ok(Self {
            store,
            customers,
            next_id,
        })
    }

    /// Registers a new customer under the next identity.
    pub fn register(&mut self, details: &CustomerDetails) -> Result<Customer> {
        validate(details)?;

        if self.exists_by_document(&details.document) {
            return Err(LocadoraError::DuplicateDocument);
        }

        let id = self.next_id.ok_or(LocadoraError::IdentitiesExhausted)?;
        let customer = new_customer(id, details);
        self.next_id = id.checked_next();
        self.customers.push(customer.clone());
        self.persist()?;

        tracing::info!(id = %customer.id, document = %customer.document, "user registered");
        Ok(customer)
    }

    /// Replaces the details of the customer holding `original_document`.
    pub fn update(&mut self, cmd: &UpdateCustomer) -> Result<Customer> {
        let index = self
            .position_by_document(&cmd.original_document)
            .ok_or(LocadoraError::CustomerNotFound)?;

        validate(&cmd.details)?;

        let id = self.customers[index].id;
        let new_document = normalize_document(&cmd.details.document);
        let collides = self
            .customers
            .iter()
            .any(|other| other.id != id && other.document.normalized() == new_document);
        if collides {
            return Err(LocadoraError::DuplicateDocument);
        }

        let updated = apply_details(&self.customers[index], &cmd.details);
        self.customers[index] = updated.clone();
        self.persist()?;

        tracing::info!(%id, document = %updated.document, "user updated");
        Ok(updated)
    }

    pub fn find_by_document(&self, document: &str) -> Option<&Customer> {
        self.position_by_document(document)
            .map(|index| &self.customers[index])
    }

    pub fn find_by_id(&self, id: CustomerId) -> Option<&Customer> {
        self.customers.iter().find(|customer| customer.id == id)
    }

    pub fn exists_by_document(&self, document: &str) -> bool {
        self.find_by_document(document).is_some()
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// Identity the next registration will receive, `None` once exhausted
    pub fn next_id(&self) -> Option<CustomerId> {
        self.next_id
    }

    /// A query without digits never matches: its normalised form is empty.
    fn position_by_document(&self, document: &str) -> Option<usize> {
        if !Document::new(document).has_digits() {
            return None;
        }
        self.customers
            .iter()
            .position(|customer| customer.document.matches(document))
    }

    fn persist(&self) -> Result<()> {
        let lines = self.customers.iter().map(format_customer_line).collect();
        replace_all(self.store.as_ref(), lines)
    }
}

fn validate(details: &CustomerDetails) -> Result<()> {
    ensure_storable("nome", &details.name)?;
    ensure_storable("CPF", &details.document)?;
    ensure_storable("telefone", &details.phone)?;
    ensure_storable("endereço", &details.address)?;

    if !Document::new(&details.document).has_digits() {
        return Err(LocadoraError::InvalidDocument);
    }
    Ok(())
}
