//! Pre-game input collection: prompt and grid size, with validation.
//! Anything invalid aborts the attempt before a single network call.

use std::io::{self, Write};

pub(crate) fn ask(question: &str) -> io::Result<String> {
    print!("{question}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// A prompt is valid when it carries anything beyond whitespace.
pub(crate) fn valid_prompt(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Grid sizes must parse as strictly positive integers.
pub(crate) fn parse_grid_value(raw: &str) -> Option<usize> {
    raw.trim().parse::<usize>().ok().filter(|&value| value > 0)
}
