// CompanyScope - core/export.rs
//
// CSV and JSON export of the filtered, sorted view.
// Core layer: writes to any Write trait object.

use crate::core::model::Record;
use crate::util::constants::MAX_EXPORT_RECORDS;
use crate::util::error::ExportError;
use std::io::Write;
use std::path::Path;

fn check_limit(count: usize) -> Result<(), ExportError> {
    if count > MAX_EXPORT_RECORDS {
        return Err(ExportError::TooManyRecords {
            count,
            max: MAX_EXPORT_RECORDS,
        });
    }
    Ok(())
}

/// Export records to CSV format.
///
/// Writes: name, country, industry, numberOfEmployees
pub fn export_csv<W: Write>(
    records: &[&Record],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    check_limit(records.len())?;

    let csv_error = |e: csv::Error| ExportError::Csv {
        path: export_path.to_path_buf(),
        source: e,
    };

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(["name", "country", "industry", "numberOfEmployees"])
        .map_err(csv_error)?;

    for record in records {
        let employees = record.number_of_employees.to_string();
        csv_writer
            .write_record([
                record.name.as_str(),
                record.country.as_str(),
                record.industry.as_str(),
                employees.as_str(),
            ])
            .map_err(csv_error)?;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(records.len())
}

/// Export records to JSON format (array of objects, same shape as the source).
pub fn export_json<W: Write>(
    records: &[&Record],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    check_limit(records.len())?;

    serde_json::to_writer_pretty(writer, records).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(records.len())
}
