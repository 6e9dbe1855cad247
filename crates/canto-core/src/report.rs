//! JSON report output.

use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{Error, Result};

const INDENT: &[u8] = b"    ";

/// Serialize `value` as pretty JSON (4-space indent) to `path`, replacing any
/// previous file. Non-ASCII text is written as UTF-8, not escaped.
pub fn write_json_report<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let to_error = |source: std::io::Error| Error::ReportWrite { path: path.to_path_buf(), source };

    let file = File::create(path).map_err(to_error)?;
    let mut writer = BufWriter::new(file);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|e| to_error(e.into()))?;
    writer.flush().map_err(to_error)
}
