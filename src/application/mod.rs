pub mod errors;
pub mod film_catalogue;
pub mod locadora;
mod persistence;
pub mod rental_ledger;
pub mod user_registry;

pub use errors::{LocadoraError, Result};
pub use film_catalogue::FilmCatalogue;
pub use locadora::{ActiveRental, Locadora};
pub use rental_ledger::{RentalHistoryEntry, RentalLedger};
pub use user_registry::UserRegistry;
