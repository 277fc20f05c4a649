// src/services/export.rs
// DOCUMENTATION: Spreadsheet export
// PURPOSE: Write a ResultSet to a CSV file with fixed columns

use crate::errors::ProspectorError;
use crate::models::PlaceResult;
use serde::Serialize;
use std::path::Path;

/// Fixed column header of the exported spreadsheet
pub const EXPORT_HEADER: [&str; 5] = ["name", "address", "phone", "website", "place_id"];

/// One spreadsheet row
/// Field order must match EXPORT_HEADER
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    name: &'a str,
    address: &'a str,
    phone: &'a str,
    website: &'a str,
    place_id: &'a str,
}

impl<'a> From<&'a PlaceResult> for ExportRow<'a> {
    fn from(result: &'a PlaceResult) -> Self {
        ExportRow {
            name: &result.name,
            address: result.address.as_deref().unwrap_or(""),
            phone: result.phone.as_deref().unwrap_or(""),
            website: result.website.as_deref().unwrap_or(""),
            place_id: &result.place_id,
        }
    }
}

/// Write results to a CSV file
/// DOCUMENTATION: One row per result, in ResultSet order, header always present
///
/// # Arguments
/// * `results` - Results to export
/// * `path` - Destination file path
pub fn write_csv(results: &[PlaceResult], path: &Path) -> Result<(), ProspectorError> {
    let export_err = |source: csv::Error| ProspectorError::Export {
        path: path.display().to_string(),
        source,
    };

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(export_err)?;

    writer.write_record(EXPORT_HEADER).map_err(export_err)?;

    for result in results {
        writer.serialize(ExportRow::from(result)).map_err(export_err)?;
    }

    writer
        .flush()
        .map_err(|e| export_err(csv::Error::from(e)))?;

    log::info!("Exported {} rows to {}", results.len(), path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_results() -> Vec<PlaceResult> {
        vec![
            PlaceResult {
                place_id: "ChIJ001".to_string(),
                name: "Padaria Ideal".to_string(),
                address: Some("Rua Augusta 100, São Paulo - SP".to_string()),
                phone: Some("+55 11 1234-5678".to_string()),
                website: Some("https://padariaideal.com.br".to_string()),
            },
            PlaceResult {
                place_id: "ChIJ002".to_string(),
                name: "Padaria Ideal Centro".to_string(),
                address: None,
                phone: None,
                website: None,
            },
        ]
    }

    #[test]
    fn test_roundtrip_preserves_order_and_columns() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("prospects.csv");
        let results = sample_results();

        write_csv(&results, &path).expect("export should succeed");

        let mut reader = csv::Reader::from_path(&path).expect("file should be readable");
        assert_eq!(
            reader.headers().expect("headers").clone(),
            csv::StringRecord::from(EXPORT_HEADER.to_vec())
        );

        let rows: Vec<csv::StringRecord> =
            reader.records().collect::<Result<_, _>>().expect("rows");
        assert_eq!(rows.len(), 2);

        assert_eq!(&rows[0][0], "Padaria Ideal");
        assert_eq!(&rows[0][1], "Rua Augusta 100, São Paulo - SP");
        assert_eq!(&rows[0][2], "+55 11 1234-5678");
        assert_eq!(&rows[0][3], "https://padariaideal.com.br");
        assert_eq!(&rows[0][4], "ChIJ001");

        // Absent optional fields become empty cells
        assert_eq!(&rows[1][0], "Padaria Ideal Centro");
        assert_eq!(&rows[1][1], "");
        assert_eq!(&rows[1][2], "");
        assert_eq!(&rows[1][3], "");
        assert_eq!(&rows[1][4], "ChIJ002");
    }

    #[test]
    fn test_empty_result_set_still_writes_header() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("empty.csv");

        write_csv(&[], &path).expect("export should succeed");

        let mut reader = csv::Reader::from_path(&path).expect("file should be readable");
        assert_eq!(
            reader.headers().expect("headers").clone(),
            csv::StringRecord::from(EXPORT_HEADER.to_vec())
        );
        assert_eq!(reader.records().count(), 0);
    }

    #[test]
    fn test_unwritable_path_reports_path() {
        let path = Path::new("/nonexistent-dir/prospects.csv");

        let err = write_csv(&sample_results(), path).expect_err("export should fail");

        assert!(matches!(err, ProspectorError::Export { .. }));
        assert!(err.to_string().contains("/nonexistent-dir/prospects.csv"));
    }
}
