use super::{CustomerId, Document, UserKind};

/// Registered customer of the shop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: CustomerId,
    pub document: Document,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub kind: UserKind,
}

/// Mutable details of a customer, as typed by the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDetails {
    pub name: String,
    pub document: String,
    pub phone: String,
    pub address: String,
}

impl CustomerDetails {
    pub fn new(
        name: impl Into<String>,
        document: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            document: document.into(),
            phone: phone.into(),
            address: address.into(),
        }
    }
}

/// Pure function: builds a new customer from typed details.
///
/// Every text field is trimmed; the kind is always `Cliente`.
pub fn new_customer(id: CustomerId, details: &CustomerDetails) -> Customer {
    Customer {
        id,
        document: Document::new(&details.document),
        name: details.name.trim().to_string(),
        phone: details.phone.trim().to_string(),
        address: details.address.trim().to_string(),
        kind: UserKind::Cliente,
    }
}

/// Pure function: applies new details to an existing customer.
///
/// Identity and kind are preserved.
pub fn apply_details(customer: &Customer, details: &CustomerDetails) -> Customer {
    Customer {
        id: customer.id,
        kind: customer.kind,
        ..new_customer(customer.id, details)
    }
}
