use crate::domain::{Customer, Film};

pub const SEPARATOR: &str = "------------------------";

/// Multi-line description of a film, as shown in listings.
pub fn film(film: &Film) -> String {
    let mut text = format!(
        "Código do filme: {}\nTítulo: {}\nGênero: {}\nClassificação: {}\nSituação: {}",
        film.code,
        film.title,
        film.genre,
        film.classification,
        film.situation.label()
    );
    if let Some(holder) = film.holder() {
        text.push_str(&format!("\nAlugado por CPF: {holder}"));
    }
    text
}

/// Multi-line description of a customer.
pub fn customer(customer: &Customer) -> String {
    format!(
        "ID: {}\nCPF: {}\nTelefone: {}\nEndereço: {}\nTipo: {}\nNome: {}",
        customer.id,
        customer.document,
        customer.phone,
        customer.address,
        customer.kind.description(),
        customer.name
    )
}
