//! Interactive prompts for values not given on the command line.

use dialoguer::{Confirm, Input, Password};

use schooladmin_core::error::AppError;
use schooladmin_core::result::AppResult;

fn input_error(e: dialoguer::Error) -> AppError {
    AppError::internal(format!("Input error: {e}"))
}

/// Use `given`, or ask for a line of text.
pub fn text_or_prompt(given: Option<&str>, prompt: &str) -> AppResult<String> {
    match given {
        Some(value) => Ok(value.to_string()),
        None => Input::<String>::new()
            .with_prompt(prompt)
            .interact_text()
            .map_err(input_error),
    }
}

/// Use `given`, or ask for a hidden value.
pub fn secret_or_prompt(given: Option<&str>, prompt: &str) -> AppResult<String> {
    match given {
        Some(value) => Ok(value.to_string()),
        None => Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()
            .map_err(input_error),
    }
}

/// A new password and its confirmation. When given on the command line
/// the value doubles as its own confirmation.
pub fn new_password(given: Option<&str>) -> AppResult<(String, String)> {
    if let Some(value) = given {
        return Ok((value.to_string(), value.to_string()));
    }
    let password = secret_or_prompt(None, "New password")?;
    let confirm = secret_or_prompt(None, "Confirm password")?;
    Ok((password, confirm))
}

/// Ask a yes/no question unless `assume_yes` is set.
pub fn confirm(assume_yes: bool, prompt: &str) -> AppResult<bool> {
    if assume_yes {
        return Ok(true);
    }
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(input_error)
}
