// File I/O operations

pub mod read;
pub mod write;

pub use read::{read_table, read_table_bytes};
pub use write::{report_artifacts, Artifact, ArtifactFormat, MATCHED_ARTIFACT, UNMATCHED_ARTIFACT};
