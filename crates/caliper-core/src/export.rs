//! Tabular export of recorded measurements.
//!
//! Both formats write values with [`EXPORT_DECIMALS`] fractional digits.

use std::fmt;
use std::io::Write;
use std::path::Path;

use crate::consts::{EXPORT_DECIMALS, EXPORT_ID_HEADER, EXPORT_VALUE_HEADER};
use crate::error::{CaliperError, Result};
use crate::store::MeasurementStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma separated with CRLF line endings.
    Csv,
    /// Tab separated with LF line endings, for pasting into spreadsheets.
    Clipboard,
}

impl ExportFormat {
    fn separator(self) -> &'static str {
        match self {
            Self::Csv => ",",
            Self::Clipboard => "\t",
        }
    }

    fn line_ending(self) -> &'static str {
        match self {
            Self::Csv => "\r\n",
            Self::Clipboard => "\n",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "CSV"),
            Self::Clipboard => write!(f, "Clipboard"),
        }
    }
}

/// Format a distance the way every export and label shows it.
pub fn format_value(value: f64) -> String {
    format!("{value:.prec$}", prec = EXPORT_DECIMALS)
}

/// Write the header and one row per measurement to `sink`.
///
/// Fails with [`CaliperError::EmptyExport`] before writing anything when the
/// store is empty.
pub fn export<W: Write>(store: &MeasurementStore, sink: &mut W, format: ExportFormat) -> Result<()> {
    if store.is_empty() {
        return Err(CaliperError::EmptyExport);
    }

    let sep = format.separator();
    let eol = format.line_ending();

    write!(sink, "{EXPORT_ID_HEADER}{sep}{EXPORT_VALUE_HEADER}{eol}")?;
    for m in store.all() {
        write!(sink, "{}{sep}{}{eol}", m.id, format_value(m.value))?;
    }
    sink.flush()?;
    Ok(())
}

/// Render the export into a string (used for the clipboard).
pub fn render(store: &MeasurementStore, format: ExportFormat) -> Result<String> {
    let mut buf = Vec::new();
    export(store, &mut buf, format)?;
    // Only ASCII digits, separators and the UTF-8 header are ever written.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write a CSV file. The file is not created when the store is empty.
pub fn write_csv(store: &MeasurementStore, path: &Path) -> Result<()> {
    if store.is_empty() {
        return Err(CaliperError::EmptyExport);
    }
    let file = std::fs::File::create(path)?;
    let mut writer = std::io::BufWriter::new(file);
    export(store, &mut writer, ExportFormat::Csv)?;
    tracing::info!("Exported {} measurements to {}", store.len(), path.display());
    Ok(())
}
