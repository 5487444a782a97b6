//! Line codecs for the three text files.
//!
//! Every record is one line of `;`-separated fields, with no quoting or
//! escaping. Readers accept the legacy layouts still found in old files;
//! writers always produce the current layout.

use chrono::NaiveDateTime;

use super::{
    Customer, CustomerId, Document, Film, FilmCode, Genre, LedgerEntry, RecordError,
    Situation, UserKind,
    film::{AVAILABLE_LABEL, RENTED_LABEL},
};

pub const FIELD_SEPARATOR: char = ';';

/// Minimum number of fields in a user or film line.
pub const MIN_FIELDS: usize = 5;

/// Timestamp layout of legacy ledger lines (`dd/MM/yyyy HH:mm:ss`).
pub const LEGACY_TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

fn split_fields(line: &str) -> Vec<&str> {
    line.split(FIELD_SEPARATOR).collect()
}

fn parse_int<T: std::str::FromStr>(field: &'static str, value: &str) -> Result<T, RecordError> {
    value.parse().map_err(|_| RecordError::InvalidInteger {
        field,
        value: value.to_string(),
    })
}

// ============================================================================
// usuarios.txt
// ============================================================================

/// A user line as found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerRecord {
    /// `id;document;name;phone;address[;type]`
    Current(Customer),
    /// `document;name;phone;address;type`, identity still to be assigned
    Legacy {
        document: Document,
        name: String,
        phone: String,
        address: String,
        kind: UserKind,
    },
}

/// Parses a user line. Lines with fewer than five fields yield `None`.
///
/// A first field that parses as an identity marks the current layout;
/// anything else is a legacy line.
pub fn parse_customer_line(line: &str) -> Option<CustomerRecord> {
    let fields = split_fields(line);
    if fields.len() < MIN_FIELDS {
        return None;
    }

    match fields[0].trim().parse::<u64>() {
        Ok(id) => Some(CustomerRecord::Current(Customer {
            id: CustomerId::new(id),
            document: Document::new(fields[1]),
            name: fields[2].to_string(),
            phone: fields[3].to_string(),
            address: fields[4].to_string(),
            kind: fields
                .get(5)
                .map(|kind| UserKind::from_label(kind))
                .unwrap_or_default(),
        })),
        Err(_) => Some(CustomerRecord::Legacy {
            document: Document::new(fields[0]),
            name: fields[1].to_string(),
            phone: fields[2].to_string(),
            address: fields[3].to_string(),
            kind: UserKind::from_label(fields[4]),
        }),
    }
}

pub fn format_customer_line(customer: &Customer) -> String {
    format!(
        "{};{};{};{};{};{}",
        customer.id,
        customer.document,
        customer.name,
        customer.phone,
        customer.address,
        customer.kind.as_str()
    )
}

// ============================================================================
// filmes.txt
// ============================================================================

/// Parses a film line: `code;title;genre;classification;situation[;holder]`.
///
/// Lines with fewer than five fields yield `Ok(None)`. A rented film read
/// without a sixth field has no known holder yet.
pub fn parse_film_line(line: &str) -> Result<Option<Film>, RecordError> {
    let fields = split_fields(line);
    if fields.len() < MIN_FIELDS {
        return Ok(None);
    }

    let code: i32 = parse_int("código", fields[0])?;
    let classification: i32 = parse_int("classificação", fields[3])?;

    let label = fields[4].trim().to_lowercase();
    let situation = if label == AVAILABLE_LABEL {
        Situation::Available
    } else if label == RENTED_LABEL {
        let holder = fields
            .get(5)
            .map(|doc| doc.trim())
            .filter(|doc| !doc.is_empty())
            .map(Document::new);
        Situation::Rented { holder }
    } else {
        return Err(RecordError::UnknownSituation(fields[4].to_string()));
    };

    Ok(Some(Film {
        code: FilmCode::new(code),
        title: fields[1].to_string(),
        genre: Genre::from_input(fields[2]),
        classification,
        situation,
    }))
}

pub fn format_film_line(film: &Film) -> String {
    let mut line = format!(
        "{};{};{};{};{}",
        film.code,
        film.title,
        film.genre,
        film.classification,
        film.situation.label()
    );
    if let Some(holder) = film.holder() {
        line.push(FIELD_SEPARATOR);
        line.push_str(holder.as_str());
    }
    line
}

// ============================================================================
// alugueis.txt
// ============================================================================

/// Parses a ledger line.
///
/// Exactly three fields is the current `customerId;filmCode;filmTitle`;
/// four or more is the legacy
/// `customerDocument;customerName;filmCode;filmTitle[;timestamp]`.
/// Anything shorter yields `Ok(None)`.
pub fn parse_ledger_line(line: &str) -> Result<Option<LedgerEntry>, RecordError> {
    let fields = split_fields(line);
    match fields.len() {
        0..=2 => Ok(None),
        3 => Ok(Some(LedgerEntry::ById {
            customer_id: CustomerId::new(parse_int("cliente", fields[0])?),
            film_code: FilmCode::new(parse_int("código do filme", fields[1])?),
            film_title: fields[2].to_string(),
        })),
        _ => Ok(Some(LedgerEntry::Legacy {
            document: fields[0].to_string(),
            name: fields[1].to_string(),
            film_code: FilmCode::new(parse_int("código do filme", fields[2])?),
            film_title: fields[3].to_string(),
            rented_at: fields.get(4).and_then(|raw| {
                NaiveDateTime::parse_from_str(raw.trim(), LEGACY_TIMESTAMP_FORMAT).ok()
            }),
        })),
    }
}

/// Formats a ledger entry; new rentals are always written as `ById`.
pub fn format_ledger_line(entry: &LedgerEntry) -> String {
    match entry {
        LedgerEntry::ById {
            customer_id,
            film_code,
            film_title,
        } => format!("{customer_id};{film_code};{film_title}"),
        LedgerEntry::Legacy {
            document,
            name,
            film_code,
            film_title,
            rented_at,
        } => {
            let mut line = format!("{document};{name};{film_code};{film_title}");
            if let Some(rented_at) = rented_at {
                line.push(FIELD_SEPARATOR);
                line.push_str(&rented_at.format(LEGACY_TIMESTAMP_FORMAT).to_string());
            }
            line
        }
    }
}
