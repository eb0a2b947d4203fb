use std::fmt;

#[derive(Debug)]
pub enum ReconError {
    /// Required column absent after header normalization.
    MissingColumns { file: String, columns: Vec<String> },
    /// Weight cell that cannot be coerced to a number. `row` is the 1-based
    /// data row (header excluded).
    ValueCoercion { file: String, row: usize, value: String },
    /// File could not be read or decoded as a table.
    Unreadable { file: String, reason: String },
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingColumns { file, columns } => {
                write!(
                    f,
                    "file '{file}' is missing required column(s): {}",
                    columns.join(", ")
                )
            }
            Self::ValueCoercion { file, row, value } => {
                write!(f, "file '{file}', row {row}: cannot read weight {value:?} as a number")
            }
            Self::Unreadable { file, reason } => {
                write!(f, "cannot read file '{file}': {reason}")
            }
        }
    }
}

impl std::error::Error for ReconError {}
