#![deny(clippy::all, clippy::pedantic)]

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use backoffice::application::controller::Confirmation;

use crate::client::CliError;

pub fn read_opt_value(
    val: Option<String>,
    file: Option<PathBuf>,
) -> Result<Option<String>, CliError> {
    if let Some(path) = file {
        let data = fs::read_to_string(&path).map_err(|source| CliError::InputFile {
            path: path.display().to_string(),
            source,
        })?;
        return Ok(Some(data));
    }
    Ok(val)
}

/// `--yes` skips the prompt; otherwise one line is read from `input`.
pub fn confirm(
    prompt: &str,
    assume_yes: bool,
    input: &mut impl BufRead,
) -> Result<Confirmation, CliError> {
    if assume_yes {
        return Ok(Confirmation::assumed());
    }

    let mut stderr = io::stderr();
    write!(stderr, "{prompt} [y/N] ").map_err(|e| CliError::Output(e.to_string()))?;
    stderr.flush().map_err(|e| CliError::Output(e.to_string()))?;

    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .map_err(|source| CliError::InputFile {
            path: "<stdin>".into(),
            source,
        })?;
    Confirmation::from_answer(&answer).ok_or_else(|| CliError::Cancelled(prompt.to_string()))
}

pub fn confirm_stdin(prompt: &str, assume_yes: bool) -> Result<Confirmation, CliError> {
    confirm(prompt, assume_yes, &mut io::stdin().lock())
}
