use crate::error::ReconError;
use crate::model::{Dataset, RawTable, Record};

/// Normalized name of the key column.
pub const KEY_COLUMN: &str = "awb number";
/// Normalized name of the value column.
pub const WEIGHT_COLUMN: &str = "weight";

/// Column names and key cells normalize the same way: surrounding
/// whitespace stripped, lowercased.
fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Coerce a weight cell to a number. Tolerates surrounding whitespace and
/// thousands separators ("1,234.5"); anything else non-numeric is None.
fn coerce_weight(s: &str) -> Option<f64> {
    let cleaned: String = s
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    // Only digits, '.', and a leading sign may remain; this keeps "nan",
    // "inf" and stray units out of f64::parse.
    for (i, c) in cleaned.chars().enumerate() {
        match c {
            '0'..='9' | '.' => {}
            '-' | '+' if i == 0 => {}
            _ => return None,
        }
    }

    cleaned.parse().ok()
}

/// Validate a raw table's schema and project it to (key, weight) records,
/// preserving row order.
///
/// Required normalized columns: [`KEY_COLUMN`] and [`WEIGHT_COLUMN`]; extra
/// columns are ignored, and a duplicated header resolves to its first
/// occurrence. A non-coercible weight cell fails the whole file.
pub fn parse(table: &RawTable) -> Result<Dataset, ReconError> {
    let normalized: Vec<String> = table.columns.iter().map(|c| normalize(c)).collect();
    let key_idx = normalized.iter().position(|c| c == KEY_COLUMN);
    let weight_idx = normalized.iter().position(|c| c == WEIGHT_COLUMN);

    let (key_idx, weight_idx) = match (key_idx, weight_idx) {
        (Some(k), Some(w)) => (k, w),
        (k, w) => {
            let mut columns = Vec::new();
            if k.is_none() {
                columns.push(KEY_COLUMN.to_string());
            }
            if w.is_none() {
                columns.push(WEIGHT_COLUMN.to_string());
            }
            return Err(ReconError::MissingColumns {
                file: table.name.clone(),
                columns,
            });
        }
    };

    let mut records = Vec::with_capacity(table.rows.len());
    for (i, row) in table.rows.iter().enumerate() {
        let key_raw = row.get(key_idx).map(String::as_str).unwrap_or("");
        let weight_raw = row.get(weight_idx).map(String::as_str).unwrap_or("");
        let weight = coerce_weight(weight_raw).ok_or_else(|| ReconError::ValueCoercion {
            file: table.name.clone(),
            row: i + 1,
            value: weight_raw.to_string(),
        })?;
        records.push(Record {
            key: normalize(key_raw),
            weight,
        });
    }

    Ok(Dataset {
        name: table.name.clone(),
        records,
    })
}
