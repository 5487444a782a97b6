use crate::application::{Locadora, LocadoraError};
use crate::domain::{Film, FilmCode, commands::RegisterFilm};

use super::prompt::{self, PromptResult};
use super::render;

const MENU: &[&str] = &[
    "Alugar Filme",
    "Cadastrar Filme",
    "Pesquisar Filme",
    "Excluir Filme",
    "Mostrar Filmes (Todos)",
    "Devolver Filme",
    "Ver Aluguéis Ativos",
    "Histórico de Aluguéis",
    "Voltar",
];

pub fn menu(shop: &mut Locadora) -> PromptResult<()> {
    loop {
        prompt::message("\n--- Menu Filmes ---");
        match prompt::choose("Escolha uma opção", MENU)? {
            0 => rent(shop)?,
            1 => register(shop)?,
            2 => search(shop)?,
            3 => delete(shop)?,
            4 => list(shop),
            5 => give_back(shop)?,
            6 => active_rentals(shop),
            7 => history(shop)?,
            _ => return Ok(()),
        }
    }
}

fn show_film(film: &Film) {
    prompt::message(&render::film(film));
    prompt::message(render::SEPARATOR);
}

fn rent(shop: &mut Locadora) -> PromptResult<()> {
    prompt::message("\n--- Filmes Disponíveis ---");
    let mut any = false;
    for film in shop.available_films() {
        show_film(film);
        any = true;
    }
    if !any {
        prompt::message("Nenhum filme disponível para aluguel no momento.");
        return Ok(());
    }

    let code = FilmCode::new(prompt::integer("Digite o código do filme que deseja alugar")?);
    let document = prompt::text("Digite o CPF do cliente que está alugando")?;

    match shop.rent_to_document(code, &document) {
        Ok(film) => {
            prompt::message("\n=== Confirmação do Aluguel ===");
            if let Some(customer) = shop.users.find_by_document(&document) {
                prompt::message("Cliente:");
                prompt::message(&render::customer(customer));
                prompt::message(render::SEPARATOR);
            }
            prompt::message("Filme:");
            show_film(&film);
            prompt::message("Aluguel efetuado com sucesso!");
        }
        Err(err) => prompt::report(&err),
    }
    Ok(())
}

fn register(shop: &mut Locadora) -> PromptResult<()> {
    let code = prompt::integer("Digite o código do filme")?;
    let title = prompt::text("Digite o título do filme")?;
    let genre = prompt::text(
        "Digite o gênero (A – Ação, R – Romance, D – Drama, T – Terror, F – Ficção Científica)",
    )?;
    let classification = prompt::integer("Digite a classificação")?;

    match shop
        .films
        .register(&RegisterFilm::new(code, title, genre, classification))
    {
        Ok(_) => prompt::message("Filme cadastrado com sucesso :)"),
        Err(err) => prompt::report(&err),
    }
    Ok(())
}

fn search(shop: &Locadora) -> PromptResult<()> {
    let by = prompt::choose("Pesquisar por", &["Código", "Título"])?;
    let found: Vec<_> = if by == 0 {
        let code = FilmCode::new(prompt::integer("Digite o código do filme")?);
        shop.films.find_by_code(code).into_iter().collect()
    } else {
        let title = prompt::text("Digite o título do filme para pesquisa")?;
        shop.search_by_title(&title)
    };

    if found.is_empty() {
        prompt::report(&LocadoraError::FilmNotFound);
        return Ok(());
    }
    prompt::message("\nFilme encontrado:");
    for film in found {
        show_film(film);
    }
    Ok(())
}

fn delete(shop: &mut Locadora) -> PromptResult<()> {
    let code = FilmCode::new(prompt::integer("Digite o código do filme a excluir")?);

    let rented = shop
        .films
        .find_by_code(code)
        .is_some_and(|film| !film.is_available());
    if rented && !prompt::confirm("Este filme está alugado. Deseja excluí-lo mesmo assim?")? {
        return Ok(());
    }

    match shop.films.delete(code) {
        Ok(_) => prompt::message("Filme removido com sucesso."),
        Err(err) => prompt::report(&err),
    }
    Ok(())
}

fn list(shop: &Locadora) {
    prompt::message("\n--- Lista de Filmes ---");
    if shop.films.list().is_empty() {
        prompt::message("Nenhum filme cadastrado.");
        return;
    }
    for film in shop.films.list() {
        show_film(film);
    }
}

fn give_back(shop: &mut Locadora) -> PromptResult<()> {
    prompt::message("\n--- Devolução de Filme ---");
    {
        let active = shop.active_rentals();
        if active.is_empty() {
            prompt::message("ERRO: Não há nenhum filme alugado no momento.");
            return Ok(());
        }
        for rental in &active {
            let holder = rental
                .film
                .holder()
                .map_or_else(|| "desconhecido".to_string(), ToString::to_string);
            prompt::message(&format!(
                "Cod: {} - {} (Com CPF: {})",
                rental.film.code, rental.film.title, holder
            ));
        }
        prompt::message(render::SEPARATOR);
    }

    let code = FilmCode::new(prompt::integer("Digite o código do filme a ser devolvido")?);
    match shop.return_film(code) {
        Ok(film) => prompt::message(&format!(
            "Sucesso! O filme '{}' foi devolvido.",
            film.title
        )),
        Err(err) => prompt::report(&err),
    }
    Ok(())
}

fn active_rentals(shop: &Locadora) {
    prompt::message("\n--- Relatório de Filmes Alugados ---");
    let active = shop.active_rentals();
    if active.is_empty() {
        prompt::message("Não há nenhum filme alugado no momento.");
        return;
    }
    for rental in active {
        let renter = match (rental.customer, rental.film.holder()) {
            (Some(customer), _) => customer.name.clone(),
            (None, Some(holder)) => format!("Cliente não encontrado (CPF: {holder})"),
            (None, None) => "Cliente não encontrado".to_string(),
        };
        prompt::message(&format!(
            "Filme: {} (Cód: {})",
            rental.film.title, rental.film.code
        ));
        prompt::message(&format!("Alugado por: {renter}"));
        prompt::message("-------------------------------------------------");
    }
}

fn history(shop: &Locadora) -> PromptResult<()> {
    let code = FilmCode::new(prompt::integer("Digite o código do filme")?);
    let Some(film) = shop.films.find_by_code(code) else {
        prompt::report(&LocadoraError::FilmNotFound);
        return Ok(());
    };

    match shop.rental_history(code) {
        Ok(entries) if entries.is_empty() => {
            prompt::message("Nenhum aluguel registrado para este filme.");
        }
        Ok(entries) => {
            prompt::message(&format!("\n--- Histórico de Aluguéis: {} ---", film.title));
            for entry in entries {
                prompt::message(&entry.to_string());
            }
        }
        Err(err) => prompt::report(&err),
    }
    Ok(())
}
