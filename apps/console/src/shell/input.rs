//! Parsing of interactive shell lines into commands.

use shared::{domain::SortKey, error::DomainError};
use thiserror::Error;

pub const HELP: &str = "\
commands:
  search [TERM]              filter by name (empty clears)
  sort name|date|salary      change the sort key
  next | prev | page N       move between pages
  add FIELD=VALUE ...        create an employee
  edit ID FIELD=VALUE ...    update an employee
  delete ID                  delete an employee
  open PATH                  open /employees, /add or /edit/ID
  refresh                    reload the list from the store
  help | quit
fields: name email phone department designation salary dateOfJoining location manager
values with spaces need quotes: name=\"Amy Lee\"";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Search(String),
    Sort(SortKey),
    Next,
    Prev,
    Page(usize),
    Add(Vec<(String, String)>),
    /// The id stays raw; it is parsed when the edit view opens.
    Edit {
        id: String,
        fields: Vec<(String, String)>,
    },
    Delete(String),
    Open(String),
    Refresh,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("empty input")]
    Empty,
    #[error("unknown command {0:?}; type `help`")]
    UnknownCommand(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("expected FIELD=VALUE, got {0:?}")]
    BadAssignment(String),
    #[error("not a page number: {0:?}")]
    BadPage(String),
    #[error("unterminated quote")]
    UnterminatedQuote,
    #[error(transparent)]
    Domain(#[from] DomainError),
}

pub fn parse_line(line: &str) -> Result<ShellCommand, InputError> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb.to_ascii_lowercase().as_str() {
        "" => Err(InputError::Empty),
        "search" | "find" => Ok(ShellCommand::Search(unquote(rest)?)),
        "sort" => {
            if rest.is_empty() {
                return Err(InputError::MissingArgument("sort"));
            }
            Ok(ShellCommand::Sort(rest.parse()?))
        }
        "next" | "n" => Ok(ShellCommand::Next),
        "prev" | "p" => Ok(ShellCommand::Prev),
        "page" => rest
            .parse::<usize>()
            .map(ShellCommand::Page)
            .map_err(|_| InputError::BadPage(rest.to_string())),
        "add" => Ok(ShellCommand::Add(assignments(&tokenize(rest)?)?)),
        "edit" => {
            let tokens = tokenize(rest)?;
            let (id, fields) = tokens
                .split_first()
                .ok_or(InputError::MissingArgument("edit"))?;
            Ok(ShellCommand::Edit {
                id: id.clone(),
                fields: assignments(fields)?,
            })
        }
        "delete" | "del" | "rm" => {
            if rest.is_empty() {
                return Err(InputError::MissingArgument("delete"));
            }
            Ok(ShellCommand::Delete(rest.to_string()))
        }
        "open" | "go" => {
            if rest.is_empty() {
                return Err(InputError::MissingArgument("open"));
            }
            Ok(ShellCommand::Open(rest.to_string()))
        }
        "refresh" | "reload" => Ok(ShellCommand::Refresh),
        "help" | "?" => Ok(ShellCommand::Help),
        "quit" | "exit" | "q" => Ok(ShellCommand::Quit),
        _ => Err(InputError::UnknownCommand(verb.to_string())),
    }
}

/// Splits on whitespace; double quotes group words and are removed.
pub fn tokenize(input: &str) -> Result<Vec<String>, InputError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for ch in input.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    tokens.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }

    if in_quotes {
        return Err(InputError::UnterminatedQuote);
    }
    if has_token {
        tokens.push(current);
    }
    Ok(tokens)
}

fn unquote(input: &str) -> Result<String, InputError> {
    Ok(tokenize(input)?.join(" "))
}

fn assignments(tokens: &[String]) -> Result<Vec<(String, String)>, InputError> {
    tokens
        .iter()
        .map(|token| match token.split_once('=') {
            Some((field, value)) if !field.is_empty() => {
                Ok((field.to_string(), value.to_string()))
            }
            _ => Err(InputError::BadAssignment(token.clone())),
        })
        .collect()
}

#[cfg(test)]
#[path = "../tests/input_tests.rs"]
mod tests;
