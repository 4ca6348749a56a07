//! Flat TOML table codec.
//!
//! Every property becomes a top-level string value:
//!
//! ```toml
//! # Saved by the settings dialog
//! TITLE = "Main window"
//! WIDTH = "1280"
//! ```
//!
//! Values stay strings on disk so the typed accessors behave exactly as they do
//! with the XML format.  The header comment is written as `#` lines and is
//! discarded by the TOML parser on load.

use std::io::{Read, Write};

use ::toml::{Table, Value};

use super::{CodecError, Entries, PropertyFormat};

/// Reads and writes a flat TOML table of string values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TomlFormat;

impl PropertyFormat for TomlFormat {
    fn decode(&self, input: &mut dyn Read) -> Result<Entries, CodecError> {
        let mut text = String::new();
        input.read_to_string(&mut text)?;

        let table: Table = text.parse().map_err(CodecError::malformed)?;
        table
            .into_iter()
            .map(|(key, value)| match value {
                Value::String(s) => Ok((key, s)),
                other => Err(CodecError::Malformed(format!(
                    "value of `{key}` is a {}, expected a string",
                    other.type_str()
                ))),
            })
            .collect()
    }

    fn encode(
        &self,
        entries: &Entries,
        comment: Option<&str>,
        output: &mut dyn Write,
    ) -> Result<(), CodecError> {
        if let Some(comment) = comment {
            for line in comment.lines().flat_map(|line| line.split('\r')) {
                writeln!(output, "# {}", comment_text(line))?;
            }
        }
        let body = ::toml::to_string(entries).map_err(CodecError::malformed)?;
        output.write_all(body.as_bytes())?;
        Ok(())
    }
}

/// Drops the control characters TOML does not allow inside a comment.
fn comment_text(line: &str) -> String {
    line.chars()
        .filter(|&c| c == '\t' || !c.is_control())
        .collect()
}
