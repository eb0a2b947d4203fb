// Result artifact rendering: a ReconReport out to xlsx or CSV tables.
//
// Column layout and artifact names follow the report the tool has always
// produced: awb number, weight_file1, weight_file2, weight_diff.

use rust_xlsxwriter::Workbook;

use awbrecon_core::{JoinedRow, ReconReport};

pub const MATCHED_ARTIFACT: &str = "matching_awb_numbers";
pub const UNMATCHED_ARTIFACT: &str = "mismatching_awb_numbers";

const REPORT_COLUMNS: [&str; 4] = ["awb number", "weight_file1", "weight_file2", "weight_diff"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFormat {
    Xlsx,
    Csv,
}

impl ArtifactFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            Self::Csv => "text/csv",
        }
    }
}

/// One downloadable result table, rendered to bytes.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Render the report as its two result tables, matched first.
pub fn report_artifacts(
    report: &ReconReport,
    format: ArtifactFormat,
) -> Result<Vec<Artifact>, String> {
    let tables = [
        (MATCHED_ARTIFACT, report.matched.as_slice()),
        (UNMATCHED_ARTIFACT, report.unmatched.as_slice()),
    ];

    let mut artifacts = Vec::with_capacity(tables.len());
    for (base, rows) in tables {
        let bytes = match format {
            ArtifactFormat::Xlsx => rows_to_xlsx(rows)?,
            ArtifactFormat::Csv => rows_to_csv(rows)?,
        };
        artifacts.push(Artifact {
            filename: format!("{base}.{}", format.extension()),
            content_type: format.content_type(),
            bytes,
        });
    }
    Ok(artifacts)
}

fn rows_to_xlsx(rows: &[JoinedRow]) -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    for (c, header) in REPORT_COLUMNS.iter().enumerate() {
        sheet
            .write_string(0, c as u16, *header)
            .map_err(|e| e.to_string())?;
    }

    for (r, row) in rows.iter().enumerate() {
        let r = (r + 1) as u32;
        sheet.write_string(r, 0, &row.key).map_err(|e| e.to_string())?;
        for (c, value) in [row.value_a, row.value_b, row.diff].iter().enumerate() {
            // A missing side stays a blank cell
            if let Some(v) = value {
                sheet
                    .write_number(r, (c + 1) as u16, *v)
                    .map_err(|e| e.to_string())?;
            }
        }
    }

    workbook.save_to_buffer().map_err(|e| e.to_string())
}

fn rows_to_csv(rows: &[JoinedRow]) -> Result<Vec<u8>, String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(REPORT_COLUMNS)
        .map_err(|e| e.to_string())?;

    for row in rows {
        writer
            .write_record([
                row.key.clone(),
                number_cell(row.value_a),
                number_cell(row.value_b),
                number_cell(row.diff),
            ])
            .map_err(|e| e.to_string())?;
    }

    writer
        .into_inner()
        .map_err(|e| e.to_string())
}

fn number_cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use awbrecon_core::{parse, reconcile, RawTable};

    fn sample_report() -> ReconReport {
        let a = RawTable {
            name: "a.csv".into(),
            columns: vec!["AWB Number".into(), "Weight".into()],
            rows: vec![
                vec!["100".into(), "5.0".into()],
                vec!["200".into(), "3.0".into()],
            ],
        };
        let b = RawTable {
            name: "b.csv".into(),
            columns: vec!["AWB Number".into(), "Weight".into()],
            rows: vec![
                vec!["100".into(), "4.5".into()],
                vec!["300".into(), "1.0".into()],
            ],
        };
        reconcile(&parse(&a).unwrap(), &parse(&b).unwrap())
    }

    #[test]
    fn exactly_two_artifacts_matched_first() {
        let artifacts = report_artifacts(&sample_report(), ArtifactFormat::Csv).unwrap();
        assert_eq!(artifacts.len(), 2);
        assert_eq!(artifacts[0].filename, "matching_awb_numbers.csv");
        assert_eq!(artifacts[1].filename, "mismatching_awb_numbers.csv");
    }

    #[test]
    fn csv_artifact_layout() {
        let artifacts = report_artifacts(&sample_report(), ArtifactFormat::Csv).unwrap();
        let matched = String::from_utf8(artifacts[0].bytes.clone()).unwrap();
        let unmatched = String::from_utf8(artifacts[1].bytes.clone()).unwrap();

        assert!(matched.starts_with("awb number,weight_file1,weight_file2,weight_diff\n"));
        assert!(matched.contains("100,5,4.5,0.5"));
        // Missing sides render as empty cells, not sentinel numbers
        assert!(unmatched.contains("200,3,,"));
        assert!(unmatched.contains("300,,1,"));
    }

    #[test]
    fn xlsx_artifact_round_trips_through_reader() {
        let artifacts = report_artifacts(&sample_report(), ArtifactFormat::Xlsx).unwrap();
        let table =
            crate::read::read_table_bytes(&artifacts[0].filename, &artifacts[0].bytes).unwrap();

        assert_eq!(
            table.columns,
            vec!["awb number", "weight_file1", "weight_file2", "weight_diff"]
        );
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0], vec!["100", "5", "4.5", "0.5"]);
    }

    #[test]
    fn xlsx_blank_cells_for_missing_side() {
        let artifacts = report_artifacts(&sample_report(), ArtifactFormat::Xlsx).unwrap();
        let table =
            crate::read::read_table_bytes(&artifacts[1].filename, &artifacts[1].bytes).unwrap();

        // only_a row: weight_file2 and weight_diff blank
        assert_eq!(table.rows[0], vec!["200", "3", "", ""]);
        // only_b row: weight_file1 and weight_diff blank
        assert_eq!(table.rows[1], vec!["300", "", "1", ""]);
    }

    #[test]
    fn content_types() {
        assert_eq!(ArtifactFormat::Csv.content_type(), "text/csv");
        assert!(ArtifactFormat::Xlsx.content_type().contains("spreadsheetml"));
    }
}
