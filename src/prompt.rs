//! Interactive choice between installing and describing

use crate::error::{RebrewError, Result};
use std::io::{BufRead, Write};

pub const PROMPT: &str = "What would you like to do?\n\t1. Install all packages.\n\t2. Get description for each package.\n\nEnter your choice: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    InstallAll,
    DescribeAll,
}

impl TryFrom<i64> for Action {
    type Error = RebrewError;

    fn try_from(choice: i64) -> Result<Self> {
        match choice {
            1 => Ok(Action::InstallAll),
            2 => Ok(Action::DescribeAll),
            other => Err(RebrewError::InvalidChoice(other)),
        }
    }
}

/// Parse the first whitespace-delimited token of `input` as a choice
pub fn parse_choice(input: &str) -> Result<Action> {
    let token = input
        .split_whitespace()
        .next()
        .ok_or_else(|| RebrewError::Input("no input".to_string()))?;

    let choice: i64 = token
        .parse()
        .map_err(|e| RebrewError::Input(format!("'{}': {}", token, e)))?;

    Action::try_from(choice)
}

/// Print the prompt to `output` and read a choice from `input`.
///
/// Blank lines are skipped until a token shows up or input ends.
pub fn read_choice(input: &mut impl BufRead, output: &mut impl Write) -> Result<Action> {
    write!(output, "{}", PROMPT)
        .and_then(|_| output.flush())
        .map_err(|e| RebrewError::Input(e.to_string()))?;

    let mut line = String::new();
    loop {
        line.clear();
        let read = input
            .read_line(&mut line)
            .map_err(|e| RebrewError::Input(e.to_string()))?;

        if read == 0 || !line.trim().is_empty() {
            break;
        }
    }

    let action = parse_choice(&line);
    let _ = writeln!(output);
    action
}
