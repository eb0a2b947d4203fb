use serde::Serialize;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A raw tabular blob as extracted from one uploaded file.
///
/// `name` identifies the file in every error message. Rows may be ragged;
/// cells missing at the end of a row read as empty.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// One projected row: normalized AWB key plus its weight.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub key: String,
    pub weight: f64,
}

/// An ordered, schema-validated projection of one input file.
/// Built only by [`crate::parse::parse`].
#[derive(Debug, Clone)]
pub struct Dataset {
    pub name: String,
    pub records: Vec<Record>,
}

// ---------------------------------------------------------------------------
// Join output
// ---------------------------------------------------------------------------

/// Which side(s) of the join a key appeared on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    Both,
    OnlyA,
    OnlyB,
}

impl std::fmt::Display for Presence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Both => write!(f, "both"),
            Self::OnlyA => write!(f, "only_a"),
            Self::OnlyB => write!(f, "only_b"),
        }
    }
}

/// One row of the full outer join.
///
/// `diff` is set iff `presence` is `Both`; a missing side is `None`, never a
/// sentinel number.
#[derive(Debug, Clone, Serialize)]
pub struct JoinedRow {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_a: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_b: Option<f64>,
    pub presence: Presence,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<f64>,
}

// ---------------------------------------------------------------------------
// Summary + report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconSummary {
    pub rows_a: usize,
    pub rows_b: usize,
    pub total: usize,
    pub matched: usize,
    pub only_a: usize,
    pub only_b: usize,
}

/// The reconciliation result: two disjoint partitions of the outer-join set.
#[derive(Debug, Clone, Serialize)]
pub struct ReconReport {
    pub summary: ReconSummary,
    pub matched: Vec<JoinedRow>,
    pub unmatched: Vec<JoinedRow>,
}
