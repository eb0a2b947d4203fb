//! `awbrecon compare` — one-shot reconciliation from the shell.

use std::path::PathBuf;

use awbrecon_core::{parse, reconcile};
use awbrecon_io::{read_table, report_artifacts, ArtifactFormat};

use crate::exit_codes::EXIT_UNMATCHED;
use crate::CliError;

pub fn cmd_compare(
    file1: PathBuf,
    file2: PathBuf,
    json: bool,
    output: PathBuf,
    format: ArtifactFormat,
) -> Result<(), CliError> {
    let table_a = read_table(&file1).map_err(|e| CliError::parse(e.to_string()))?;
    let table_b = read_table(&file2).map_err(|e| CliError::parse(e.to_string()))?;
    let ds_a = parse(&table_a).map_err(|e| CliError::parse(e.to_string()))?;
    let ds_b = parse(&table_b).map_err(|e| CliError::parse(e.to_string()))?;

    let report = reconcile(&ds_a, &ds_b);

    let artifacts = report_artifacts(&report, format).map_err(|e| CliError::io(e))?;
    std::fs::create_dir_all(&output)
        .map_err(|e| CliError::io(format!("cannot create {}: {e}", output.display())))?;
    for artifact in &artifacts {
        let path = output.join(&artifact.filename);
        std::fs::write(&path, &artifact.bytes)
            .map_err(|e| CliError::io(format!("cannot write {}: {e}", path.display())))?;
        eprintln!("wrote {}", path.display());
    }

    if json {
        let json_str = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::io(format!("JSON serialization error: {e}")))?;
        println!("{json_str}");
    }

    // Human summary to stderr
    let s = &report.summary;
    eprintln!(
        "recon: {} rows — {} matched, {} unmatched ({} only in file 1, {} only in file 2)",
        s.total,
        s.matched,
        s.only_a + s.only_b,
        s.only_a,
        s.only_b,
    );

    if s.only_a + s.only_b > 0 {
        return Err(CliError {
            code: EXIT_UNMATCHED,
            message: "unmatched rows found".into(),
            hint: None,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exit_codes::{EXIT_PARSE, EXIT_UNMATCHED};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn compare_writes_both_artifacts() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.csv");
        let b = dir.path().join("b.csv");
        let out = dir.path().join("processed");
        fs::write(&a, "AWB Number,Weight\n100,5.0\n").unwrap();
        fs::write(&b, "AWB Number,Weight\n100,5.0\n").unwrap();

        cmd_compare(a, b, false, out.clone(), ArtifactFormat::Csv).unwrap();

        assert!(out.join("matching_awb_numbers.csv").exists());
        assert!(out.join("mismatching_awb_numbers.csv").exists());
    }

    #[test]
    fn unmatched_rows_exit_code() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.csv");
        let b = dir.path().join("b.csv");
        fs::write(&a, "AWB Number,Weight\n100,5.0\n").unwrap();
        fs::write(&b, "AWB Number,Weight\n200,3.0\n").unwrap();

        let err = cmd_compare(
            a,
            b,
            false,
            dir.path().join("out"),
            ArtifactFormat::Csv,
        )
        .unwrap_err();
        assert_eq!(err.code, EXIT_UNMATCHED);
    }

    #[test]
    fn parse_failure_writes_nothing() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.csv");
        let b = dir.path().join("b.csv");
        let out = dir.path().join("out");
        fs::write(&a, "AWB Number,Weight\n100,5.0\n").unwrap();
        fs::write(&b, "AWB Number,Weight\n200,heavy\n").unwrap();

        let err =
            cmd_compare(a, b, false, out.clone(), ArtifactFormat::Csv).unwrap_err();
        assert_eq!(err.code, EXIT_PARSE);
        assert!(err.message.contains("b.csv"));
        // Atomic failure: no partial artifacts
        assert!(!out.exists());
    }
}
