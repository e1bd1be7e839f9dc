//! Pretty-printed JSON for reports

use std::io::Write;

use anyhow::Result;
use serde::Serialize;
use serde_json::Serializer;
use serde_json::ser::PrettyFormatter;

/// Pretty-print `value` with four-space indentation and a trailing newline
pub fn write_json<T: Serialize, W: Write>(value: &T, mut out: W) -> Result<()> {
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut ser)?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}
