//! Parsers for the arguments typed at the interactive prompt.

use crate::domain::{Column, SortKey, Task, TaskId};
use crate::error::{Result, TaskboardError};
use crate::views::SortBy;
use thiserror::Error;

/// Interactive board names must be shorter than this many characters
pub const MAX_BOARD_NAME_LEN: usize = 20;

const DESCENDING_FLAGS: &[&str] = &["--d", "--desc", "--descending"];
const DETAILED_FLAGS: &[&str] = &["--detailed", "--v"];

/// Malformed command input
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("Please provide input for this command")]
    Empty,

    #[error("List not found: '{0}'")]
    UnknownColumn(String),

    #[error("Missing sort type after --by")]
    MissingSortKey,

    #[error("Invalid sort type '{0}'. Please enter a valid sort type")]
    InvalidSortKey(String),

    #[error("Invalid input '{0}' after list selection")]
    UnexpectedToken(String),

    #[error("Too many arguments")]
    TooManyArguments,

    #[error("Invalid id '{0}'")]
    InvalidId(String),

    #[error("Name must be less than 20 characters")]
    NameTooLong,
}

pub fn parse_column(input: &str) -> Result<Column> {
    input.parse()
}

/// Accepts only `1`, `2` or `3`
pub fn parse_priority(input: &str) -> Result<u8> {
    input
        .trim()
        .parse::<u8>()
        .ok()
        .filter(|p| Task::is_valid_priority(*p))
        .ok_or_else(|| TaskboardError::InvalidPriority(input.trim().to_string()))
}

pub fn parse_task_id(input: &str) -> Result<TaskId> {
    input.parse()
}

/// Answer to a y/n/q question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Yes,
    No,
    Quit,
}

pub fn parse_confirmation(input: &str) -> Option<Confirmation> {
    match input.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(Confirmation::Yes),
        "n" | "no" => Some(Confirmation::No),
        "q" | "quit" => Some(Confirmation::Quit),
        _ => None,
    }
}

/// Checks the interactive length rule and returns the trimmed name.
/// Path rules are left to `Board::set_name`.
pub fn validate_new_board_name(input: &str) -> std::result::Result<&str, UsageError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UsageError::Empty);
    }
    if trimmed.chars().count() >= MAX_BOARD_NAME_LEN {
        return Err(UsageError::NameTooLong);
    }
    Ok(trimmed)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListTarget {
    Column(Column),
    All,
}

/// `<todo|doing|done|all> [--by <key> [--desc]]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub target: ListTarget,
    pub sort: Option<SortBy>,
    /// Trailing tokens that were not recognised
    pub ignored: Vec<String>,
}

impl ListQuery {
    pub const USAGE: &'static str = "Usage: list [<col> | <all>] [--by id|title|priority] [--desc]";

    pub fn parse(input: &str) -> std::result::Result<Self, UsageError> {
        let tokens: Vec<&str> = input.split_whitespace().collect();
        let Some(first) = tokens.first() else {
            return Err(UsageError::Empty);
        };

        let target = if first.eq_ignore_ascii_case("all") {
            ListTarget::All
        } else {
            let column = parse_column(first).map_err(|_| UsageError::UnknownColumn(first.to_string()))?;
            ListTarget::Column(column)
        };

        match tokens.len() {
            1 => {
                return Ok(Self {
                    target,
                    sort: None,
                    ignored: Vec::new(),
                })
            }
            2 if tokens[1].eq_ignore_ascii_case("--by") => return Err(UsageError::MissingSortKey),
            n if n > 4 => return Err(UsageError::TooManyArguments),
            _ => {}
        }

        if !tokens[1].eq_ignore_ascii_case("--by") {
            return Err(UsageError::UnexpectedToken(tokens[1].to_string()));
        }

        let key = SortKey::from_flag(tokens[2])
            .ok_or_else(|| UsageError::InvalidSortKey(tokens[2].to_string()))?;

        let mut descending = false;
        let mut ignored = Vec::new();
        for token in &tokens[3..] {
            if DESCENDING_FLAGS.iter().any(|f| token.eq_ignore_ascii_case(f)) {
                descending = true;
            } else {
                ignored.push(token.to_string());
            }
        }

        Ok(Self {
            target,
            sort: Some(SortBy { key, descending }),
            ignored,
        })
    }
}

/// `<id> [--detailed|--v]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindQuery {
    pub id: TaskId,
    pub detailed: bool,
    pub ignored: Vec<String>,
}

impl FindQuery {
    pub fn parse(input: &str) -> std::result::Result<Self, UsageError> {
        let mut tokens = input.split_whitespace();
        let first = tokens.next().ok_or(UsageError::Empty)?;
        let id = parse_task_id(first).map_err(|_| UsageError::InvalidId(first.to_string()))?;

        let mut detailed = false;
        let mut ignored = Vec::new();
        for token in tokens {
            if DETAILED_FLAGS.iter().any(|f| token.eq_ignore_ascii_case(f)) {
                detailed = true;
            } else {
                ignored.push(token.to_string());
            }
        }

        Ok(Self {
            id,
            detailed,
            ignored,
        })
    }
}
