use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use super::model::{LaunchDataset, LaunchRecord, Outcome};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the launch dataset from a CSV file.
///
/// Required columns (any others are ignored):
/// * `Launch Site`
/// * `Payload Mass (kg)`
/// * `Booster Version Category`
/// * `class` – 1 for success, 0 for failure
pub fn load_csv(path: &Path) -> Result<LaunchDataset> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening launch CSV {}", path.display()))?;
    from_reader(file).with_context(|| format!("loading {}", path.display()))
}

/// Parse launch records from any CSV source with a header row.
pub fn from_reader<R: Read>(reader: R) -> Result<LaunchDataset> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers = reader.headers().context("reading CSV header")?.clone();
    let mut raw = csv::StringRecord::new();
    let mut records = Vec::new();

    while reader.read_record(&mut raw).context("reading CSV")? {
        // 1-based line in the file, header included.
        let line = raw.position().map_or(0, |p| p.line());
        let row: CsvRow = raw
            .deserialize(Some(&headers))
            .with_context(|| format!("CSV line {line}"))?;
        let record = row
            .into_record()
            .with_context(|| format!("CSV line {line}"))?;
        records.push(record);
    }

    Ok(LaunchDataset::from_records(records)?)
}

// ---------------------------------------------------------------------------
// Row layout
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Launch Site")]
    site: String,
    #[serde(rename = "Payload Mass (kg)")]
    payload_kg: f64,
    #[serde(rename = "Booster Version Category")]
    booster_category: String,
    #[serde(rename = "class")]
    class: i64,
}

impl CsvRow {
    fn into_record(self) -> Result<LaunchRecord> {
        let outcome = Outcome::try_from(self.class)?;
        Ok(LaunchRecord::new(
            self.site,
            self.payload_kg,
            self.booster_category,
            outcome,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category\n";

    #[test]
    fn loads_rows_and_ignores_extra_columns() {
        let csv = format!(
            "{HEADER}\
             1,CCAFS LC-40,0,0.0,F9 v1.0  B0003,v1.0\n\
             2,CCAFS LC-40,1,525.0,F9 v1.0  B0004,v1.0\n\
             3,VAFB SLC-4E,1,9600.0,F9 FT B1029.1,FT\n"
        );
        let ds = from_reader(csv.as_bytes()).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.min_payload(), 0.0);
        assert_eq!(ds.max_payload(), 9600.0);
        assert_eq!(ds.sites(), &["CCAFS LC-40", "VAFB SLC-4E"]);

        let last = &ds.records()[2];
        assert_eq!(last.booster_category, "FT");
        assert_eq!(last.outcome, Outcome::Success);
    }

    #[test]
    fn missing_column_is_an_error() {
        let csv = "Launch Site,class,Payload Mass (kg)\nCCAFS LC-40,1,500\n";
        let err = from_reader(csv.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("Booster Version Category"));
    }

    #[test]
    fn non_binary_class_is_an_error() {
        let csv = format!("{HEADER}1,CCAFS LC-40,3,500.0,F9,v1.0\n");
        let err = from_reader(csv.as_bytes()).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("0 or 1"), "{msg}");
    }

    #[test]
    fn errors_name_the_file_line_of_the_bad_row() {
        let csv = format!(
            "{HEADER}\
             1,CCAFS LC-40,0,0.0,F9 v1.0  B0003,v1.0\n\
             2,CCAFS LC-40,1,525.0,F9 v1.0  B0004,v1.0\n\
             3,VAFB SLC-4E,7,9600.0,F9 FT B1029.1,FT\n"
        );
        let msg = format!("{:#}", from_reader(csv.as_bytes()).unwrap_err());
        // Header is line 1, so the third data row is line 4.
        assert!(msg.contains("CSV line 4"), "{msg}");

        let first = format!("{HEADER}1,CCAFS LC-40,1,-5.0,F9,v1.0\n");
        let msg = format!("{:#}", from_reader(first.as_bytes()).unwrap_err());
        assert!(msg.contains("CSV line 2"), "{msg}");
    }

    #[test]
    fn unparsable_payload_is_an_error() {
        let csv = format!("{HEADER}1,CCAFS LC-40,1,heavy,F9,v1.0\n");
        assert!(from_reader(csv.as_bytes()).is_err());
    }

    #[test]
    fn negative_payload_is_an_error() {
        let csv = format!("{HEADER}1,CCAFS LC-40,1,-5.0,F9,v1.0\n");
        let err = from_reader(csv.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("non-negative"));
    }

    #[test]
    fn header_only_csv_is_empty_dataset() {
        let err = from_reader(HEADER.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("no launch records"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_csv(Path::new("/definitely/not/here/launches.csv")).unwrap_err();
        assert!(format!("{err:#}").contains("opening launch CSV"));
    }

    #[test]
    fn load_error_report_names_path_and_cause() {
        // `main` returns this error as is; its Debug form is the only report.
        let err = load_csv(Path::new("/definitely/not/here/launches.csv")).unwrap_err();
        let report = format!("{err:?}");
        assert!(report.starts_with("opening launch CSV /definitely/not/here/launches.csv"), "{report}");
        assert!(report.contains("Caused by"), "{report}");
        assert_eq!(report.matches("opening launch CSV").count(), 1, "{report}");
    }
}
