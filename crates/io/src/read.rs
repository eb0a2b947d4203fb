// Spreadsheet/CSV ingestion: one uploaded file in, one RawTable out.

use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Reader, Sheets};

use awbrecon_core::{RawTable, ReconError};

/// Extensions handed to calamine; everything else is treated as CSV/TSV.
const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

fn unreadable(file: &str, reason: impl ToString) -> ReconError {
    ReconError::Unreadable {
        file: file.into(),
        reason: reason.to_string(),
    }
}

fn extension_of(name: &str) -> String {
    Path::new(name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// Read a tabular file from disk. Format is chosen by extension.
pub fn read_table(path: &Path) -> Result<RawTable, ReconError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    if WORKBOOK_EXTENSIONS.contains(&extension_of(&name).as_str()) {
        let workbook = open_workbook_auto(path).map_err(|e| unreadable(&name, e))?;
        table_from_workbook(&name, workbook)
    } else {
        let bytes = std::fs::read(path).map_err(|e| unreadable(&name, e))?;
        table_from_csv_bytes(&name, &bytes)
    }
}

/// Read a tabular file already in memory (an upload). Format is chosen by
/// the uploaded filename's extension.
pub fn read_table_bytes(name: &str, bytes: &[u8]) -> Result<RawTable, ReconError> {
    if WORKBOOK_EXTENSIONS.contains(&extension_of(name).as_str()) {
        let workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
            .map_err(|e| unreadable(name, e))?;
        table_from_workbook(name, workbook)
    } else {
        table_from_csv_bytes(name, bytes)
    }
}

// ---------------------------------------------------------------------------
// Workbook (calamine)
// ---------------------------------------------------------------------------

fn table_from_workbook<RS>(name: &str, mut workbook: Sheets<RS>) -> Result<RawTable, ReconError>
where
    RS: std::io::Read + std::io::Seek,
{
    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    let first = sheet_names
        .first()
        .ok_or_else(|| unreadable(name, "workbook has no sheets"))?;

    let range = workbook
        .worksheet_range(first)
        .map_err(|e| unreadable(name, e))?;

    let mut rows = range
        .rows()
        .map(|r| r.iter().map(cell_to_string).collect::<Vec<String>>());

    let columns = rows
        .next()
        .ok_or_else(|| unreadable(name, "sheet has no header row"))?;

    Ok(RawTable {
        name: name.into(),
        columns,
        rows: rows.collect(),
    })
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => format_number(*f),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => format_number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => e.to_string(),
    }
}

/// Integral floats print without a trailing `.0` so numeric AWB cells keep
/// their original text form ("100154662", not "100154662.0").
fn format_number(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}

// ---------------------------------------------------------------------------
// CSV/TSV
// ---------------------------------------------------------------------------

fn table_from_csv_bytes(name: &str, bytes: &[u8]) -> Result<RawTable, ReconError> {
    let content = decode_utf8(bytes);
    let delimiter = sniff_delimiter(&content);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| unreadable(name, e))?;
        records.push(record.iter().map(|c| c.to_string()).collect::<Vec<String>>());
    }

    if records.is_empty() {
        return Err(unreadable(name, "file has no header row"));
    }
    let columns = records.remove(0);

    Ok(RawTable {
        name: name.into(),
        columns,
        rows: records,
    })
}

/// Convert to UTF-8 if needed (handles Windows-1252 from Excel CSV exports).
fn decode_utf8(bytes: &[u8]) -> String {
    match String::from_utf8(bytes.to_vec()) {
        Ok(s) => s,
        Err(e) => {
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            decoded.into_owned()
        }
    }
}

/// Detect the most likely field delimiter by checking consistency across the
/// first few lines. The delimiter producing the most consistent field count
/// (>1 field) wins; comma on a tie.
fn sniff_delimiter(content: &str) -> u8 {
    let candidates: &[u8] = &[b'\t', b';', b',', b'|'];
    let sample_lines: Vec<&str> = content.lines().take(10).collect();

    if sample_lines.is_empty() {
        return b',';
    }

    let mut best = b',';
    let mut best_score = 0u64;

    for &delim in candidates {
        let counts: Vec<usize> = sample_lines
            .iter()
            .map(|line| {
                csv::ReaderBuilder::new()
                    .delimiter(delim)
                    .has_headers(false)
                    .flexible(true)
                    .from_reader(line.as_bytes())
                    .records()
                    .next()
                    .and_then(|r| r.ok())
                    .map(|r| r.len())
                    .unwrap_or(1)
            })
            .collect();

        if counts.first().copied().unwrap_or(0) <= 1 {
            continue;
        }

        let target = counts[0];
        let consistent = counts.iter().filter(|&&c| c == target).count() as u64;
        let score = consistent * target as u64;

        if score > best_score {
            best_score = score;
            best = delim;
        }
    }

    best
}
