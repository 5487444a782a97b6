use crate::application::{Locadora, LocadoraError};
use crate::domain::{CustomerDetails, commands::UpdateCustomer};

use super::prompt::{self, PromptResult};
use super::render;

const MENU: &[&str] = &[
    "Cadastrar Usuário",
    "Pesquisar Usuário",
    "Atualizar Usuário",
    "Mostrar Usuários",
    "Voltar",
];

pub fn menu(shop: &mut Locadora) -> PromptResult<()> {
    loop {
        prompt::message("\n--- Menu Usuários ---");
        match prompt::choose("Escolha uma opção", MENU)? {
            0 => register(shop)?,
            1 => search(shop)?,
            2 => update(shop)?,
            3 => list(shop),
            _ => return Ok(()),
        }
    }
}

fn read_details() -> PromptResult<CustomerDetails> {
    let document = prompt::text("Digite o CPF")?;
    let name = prompt::text("Digite o nome")?;
    let phone = prompt::text("Digite o telefone")?;
    let address = prompt::text("Digite o endereço")?;
    Ok(CustomerDetails::new(name, document, phone, address))
}

fn register(shop: &mut Locadora) -> PromptResult<()> {
    let details = read_details()?;
    match shop.users.register(&details) {
        Ok(_) => prompt::message("Usuário cadastrado com sucesso :)"),
        Err(err) => prompt::report(&err),
    }
    Ok(())
}

fn search(shop: &Locadora) -> PromptResult<()> {
    let document = prompt::text("Digite o CPF do usuário para pesquisa")?;
    match shop.users.find_by_document(&document) {
        Some(customer) => {
            prompt::message("Usuário encontrado:");
            prompt::message(&render::customer(customer));
            prompt::message(render::SEPARATOR);
        }
        None => prompt::report(&LocadoraError::CustomerNotFound),
    }
    Ok(())
}

fn update(shop: &mut Locadora) -> PromptResult<()> {
    let original_document = prompt::text("Digite o CPF do usuário a atualizar")?;
    if !shop.users.exists_by_document(&original_document) {
        prompt::report(&LocadoraError::CustomerNotFound);
        return Ok(());
    }

    let details = read_details()?;
    let cmd = UpdateCustomer {
        original_document,
        details,
    };
    match shop.users.update(&cmd) {
        Ok(_) => prompt::message("Usuário atualizado com sucesso."),
        Err(err) => prompt::report(&err),
    }
    Ok(())
}

fn list(shop: &Locadora) {
    prompt::message("\n--- Lista de Usuários ---");
    if shop.users.customers().is_empty() {
        prompt::message("Nenhum usuário cadastrado.");
        return;
    }
    for customer in shop.users.customers() {
        prompt::message(&render::customer(customer));
        prompt::message(render::SEPARATOR);
    }
}
