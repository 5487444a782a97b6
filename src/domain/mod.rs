pub mod commands;
pub mod customer;
pub mod errors;
pub mod events;
pub mod film;
pub mod records;
pub mod value_objects;

pub use customer::{Customer, CustomerDetails};
pub use errors::*;
pub use events::*;
pub use film::{Film, Situation};
pub use value_objects::*;
