use std::io::{BufRead, Write};

use anyhow::{Context, bail};

/// Print `label` on stderr and read one trimmed line from stdin.
///
/// Returns `None` at end of input.
pub fn read_line(label: &str) -> anyhow::Result<Option<String>> {
    let mut stderr = std::io::stderr().lock();
    write!(stderr, "{label}").context("failed to write prompt")?;
    stderr.flush().context("failed to flush prompt")?;

    let mut line = String::new();
    let read = std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Like [`read_line`] but fails on end of input or an empty answer.
pub fn require(label: &str, what: &str) -> anyhow::Result<String> {
    match read_line(label)? {
        Some(value) if !value.is_empty() => Ok(value),
        _ => bail!("{what} is required"),
    }
}

/// Use `value` when given, otherwise prompt for it.
pub fn value_or_prompt(value: Option<&str>, label: &str, what: &str) -> anyhow::Result<String> {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => require(label, what),
    }
}
