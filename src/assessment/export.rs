use std::fs::OpenOptions;
use std::io::{Read, Write};
use std::path::Path;

use super::report::ExportRow;

/// Serialize export rows as CSV with a header.
pub fn write_rows<W: Write>(writer: W, rows: &[ExportRow]) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush().map_err(csv::Error::from)
}

/// Parse previously exported rows; the header row is required.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<ExportRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader.deserialize().collect()
}

/// Append a row to a CSV file, writing the header only when the file is new
/// or empty.
pub fn append_to_path<P: AsRef<Path>>(path: P, row: &ExportRow) -> Result<(), csv::Error> {
    let path = path.as_ref();
    let write_header = path
        .metadata()
        .map(|metadata| metadata.len() == 0)
        .unwrap_or(true);

    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(write_header)
        .from_writer(file);
    csv_writer.serialize(row)?;
    csv_writer.flush().map_err(csv::Error::from)
}
