use dialoguer::{Confirm, Input, Select};

use crate::application::LocadoraError;

/// Prompt failures (closed stdin, terminal errors) end the session.
pub type PromptResult<T> = std::result::Result<T, dialoguer::Error>;

pub fn text(prompt: &str) -> PromptResult<String> {
    Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
}

/// Asks again until the answer parses as an integer.
pub fn integer(prompt: &str) -> PromptResult<i32> {
    Input::<i32>::new()
        .with_prompt(prompt)
        .interact_text()
}

pub fn choose(prompt: &str, items: &[&str]) -> PromptResult<usize> {
    Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()
}

pub fn confirm(prompt: &str) -> PromptResult<bool> {
    Confirm::new().with_prompt(prompt).default(false).interact()
}

pub fn message(text: &str) {
    println!("{text}");
}

/// Shows an application error to the operator.
///
/// Storage failures are also logged with their source chain.
pub fn report(err: &LocadoraError) {
    match err {
        LocadoraError::Io { .. } | LocadoraError::CorruptFile { .. } => {
            tracing::error!(error = ?err, "storage failure");
        }
        _ => tracing::debug!(error = %err, "operation rejected"),
    }
    println!("ERRO: {err}");
}
