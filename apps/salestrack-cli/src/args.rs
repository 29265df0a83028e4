//! Command line parsing.
//!
//! ```text
//! salestrack report    [--range TOKEN] [--input FILE]
//! salestrack dashboard [--input FILE]
//! salestrack receipt   <SALE_ID> [--input FILE]
//! ```

use std::path::PathBuf;

pub const USAGE: &str = "\
SalesTrack reporting tool

Usage: salestrack <COMMAND> [OPTIONS]

Commands:
  report      Analytics report for a time range
  dashboard   All-time summary, recent sales and product performance
  receipt     Receipt totals for one sale

Options:
  -r, --range <TOKEN>  7days | 30days | 90days | thisMonth | lastMonth (default: 30days)
  -i, --input <FILE>   Read a JSON export instead of the database
  -h, --help           Show this help message

Environment:
  SALESTRACK_DB_PATH, SALESTRACK_UTC_OFFSET_MINUTES, SALESTRACK_MAX_CONNECTIONS, RUST_LOG";

/// A parsed invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Report {
        /// Raw token; unknown values fall back to the default range
        range: Option<String>,
        input: Option<PathBuf>,
    },
    Dashboard {
        input: Option<PathBuf>,
    },
    Receipt {
        sale_id: String,
        input: Option<PathBuf>,
    },
    Help,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ArgsError {
    #[error("Missing command")]
    MissingCommand,

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Missing value for {0}")]
    MissingValue(String),

    #[error("Unexpected argument: {0}")]
    Unexpected(String),

    #[error("Missing sale ID")]
    MissingSaleId,
}

/// Parses arguments, program name excluded.
pub fn parse<I, S>(args: I) -> Result<Command, ArgsError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(Into::into).collect();

    let Some(command) = args.first() else {
        return Err(ArgsError::MissingCommand);
    };
    if matches!(command.as_str(), "--help" | "-h" | "help") {
        return Ok(Command::Help);
    }

    let mut range = None;
    let mut input = None;
    let mut positional = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--range" | "-r" => {
                range = Some(value_after(&args, i)?);
                i += 1;
            }
            "--input" | "-i" => {
                input = Some(PathBuf::from(value_after(&args, i)?));
                i += 1;
            }
            "--help" | "-h" => return Ok(Command::Help),
            flag if flag.starts_with('-') => return Err(ArgsError::Unexpected(flag.to_string())),
            other => positional.push(other.to_string()),
        }
        i += 1;
    }

    let command = match command.as_str() {
        "report" => Command::Report { range, input },
        "dashboard" => {
            reject_range(range)?;
            Command::Dashboard { input }
        }
        "receipt" => {
            reject_range(range)?;
            if positional.is_empty() {
                return Err(ArgsError::MissingSaleId);
            }
            let sale_id = positional.remove(0);
            Command::Receipt { sale_id, input }
        }
        other => return Err(ArgsError::UnknownCommand(other.to_string())),
    };

    match positional.first() {
        Some(extra) => Err(ArgsError::Unexpected(extra.clone())),
        None => Ok(command),
    }
}

fn value_after(args: &[String], i: usize) -> Result<String, ArgsError> {
    args.get(i + 1)
        .cloned()
        .ok_or_else(|| ArgsError::MissingValue(args[i].clone()))
}

fn reject_range(range: Option<String>) -> Result<(), ArgsError> {
    match range {
        Some(_) => Err(ArgsError::Unexpected("--range".to_string())),
        None => Ok(()),
    }
}
