//! JSON output for one-shot CLI commands
//!
//! One JSON document per line on stdout, UTF-8.

use std::io::{self, Write};

use serde::Serialize;

use super::errors::CliResult;

/// Write a JSON document to stdout
pub fn write_json<T: Serialize>(value: &T) -> CliResult<()> {
    let stdout = io::stdout();
    write_json_to(value, &mut stdout.lock())
}

/// Write a JSON document followed by a newline to `writer`
pub fn write_json_to<T: Serialize, W: Write>(value: &T, writer: &mut W) -> CliResult<()> {
    serde_json::to_writer(&mut *writer, value)?;
    writeln!(writer)?;
    writer.flush()?;

    Ok(())
}
