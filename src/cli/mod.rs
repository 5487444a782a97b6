//! Interactive menu front end.
//!
//! Application errors are shown and the menu continues; only prompt
//! failures end the session.

mod films;
pub mod prompt;
pub mod render;
mod users;

use crate::application::Locadora;

use prompt::PromptResult;

const MAIN_MENU: &[&str] = &["Filmes", "Usuários", "Sair"];

pub fn run(shop: &mut Locadora) -> PromptResult<()> {
    loop {
        prompt::message("\n--- Menu Geral ---");
        match prompt::choose("Escolha uma opção", MAIN_MENU)? {
            0 => films::menu(shop)?,
            1 => users::menu(shop)?,
            _ => {
                prompt::message("\n===== VOLTE SEMPRE :) =====");
                return Ok(());
            }
        }
    }
}
