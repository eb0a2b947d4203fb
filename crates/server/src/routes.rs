// Route handlers: upload form, compare, artifact download.

use std::sync::Arc;

use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use tracing::{info, warn};

use awbrecon_core::{parse, reconcile, ReconError, ReconReport};
use awbrecon_io::{read_table_bytes, report_artifacts, ArtifactFormat};

use crate::AppState;

pub async fn index(State(state): State<Arc<AppState>>) -> Response {
    match state.render_index() {
        Ok(html) => Html(html).into_response(),
        Err(e) => internal_error(e),
    }
}

pub async fn compare(State(state): State<Arc<AppState>>, mut multipart: Multipart) -> Response {
    let mut file1: Option<(String, Vec<u8>)> = None;
    let mut file2: Option<(String, Vec<u8>)> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return (StatusCode::BAD_REQUEST, format!("malformed upload: {e}"))
                    .into_response()
            }
        };

        let part = field.name().map(str::to_string);
        let filename = field.file_name().unwrap_or("upload").to_string();
        let bytes = match field.bytes().await {
            Ok(bytes) => bytes.to_vec(),
            Err(e) => {
                return (StatusCode::BAD_REQUEST, format!("malformed upload: {e}"))
                    .into_response()
            }
        };

        match part.as_deref() {
            Some("file1") => file1 = Some((filename, bytes)),
            Some("file2") => file2 = Some((filename, bytes)),
            _ => {}
        }
    }

    let (Some((name1, bytes1)), Some((name2, bytes2))) = (file1, file2) else {
        return (StatusCode::BAD_REQUEST, "Please upload both files.").into_response();
    };

    let report = match run_comparison(&name1, &bytes1, &name2, &bytes2) {
        Ok(report) => report,
        Err(e) => {
            warn!("comparison failed: {e}");
            return (error_status(&e), e.to_string()).into_response();
        }
    };

    // Failed rendering produces zero artifacts: the store is only touched
    // once the whole response is ready.
    let artifacts = match report_artifacts(&report, ArtifactFormat::Xlsx) {
        Ok(artifacts) => artifacts,
        Err(e) => return internal_error(e),
    };
    let page = match state.render_results(&report, &artifacts) {
        Ok(page) => page,
        Err(e) => return internal_error(e),
    };

    info!(
        matched = report.summary.matched,
        unmatched = report.summary.only_a + report.summary.only_b,
        "comparison complete"
    );
    state.store.write().await.replace(artifacts);
    Html(page).into_response()
}

pub async fn download(State(state): State<Arc<AppState>>, Path(name): Path<String>) -> Response {
    match state.store.read().await.get(&name) {
        Some(artifact) => (
            [
                (header::CONTENT_TYPE, artifact.content_type.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", artifact.filename),
                ),
            ],
            artifact.bytes,
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            format!("no result named '{name}' — run a comparison first"),
        )
            .into_response(),
    }
}

fn run_comparison(
    name1: &str,
    bytes1: &[u8],
    name2: &str,
    bytes2: &[u8],
) -> Result<ReconReport, ReconError> {
    let ds_a = parse(&read_table_bytes(name1, bytes1)?)?;
    let ds_b = parse(&read_table_bytes(name2, bytes2)?)?;
    Ok(reconcile(&ds_a, &ds_b))
}

fn error_status(err: &ReconError) -> StatusCode {
    match err {
        ReconError::Unreadable { .. } => StatusCode::BAD_REQUEST,
        ReconError::MissingColumns { .. } | ReconError::ValueCoercion { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
    }
}

fn internal_error(err: impl std::fmt::Display) -> Response {
    warn!("internal error: {err}");
    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_statuses() {
        let unreadable = ReconError::Unreadable {
            file: "a.xlsx".into(),
            reason: "bad zip".into(),
        };
        let missing = ReconError::MissingColumns {
            file: "a.xlsx".into(),
            columns: vec!["weight".into()],
        };
        let coercion = ReconError::ValueCoercion {
            file: "a.xlsx".into(),
            row: 3,
            value: "heavy".into(),
        };

        assert_eq!(error_status(&unreadable), StatusCode::BAD_REQUEST);
        assert_eq!(error_status(&missing), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(error_status(&coercion), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn run_comparison_end_to_end() {
        let a = b"AWB Number,Weight\n100,5.0\n200,3.0\n";
        let b = b"AWB Number,Weight\n100,5.0\n300,1.0\n";
        let report = run_comparison("a.csv", a, "b.csv", b).unwrap();
        assert_eq!(report.summary.matched, 1);
        assert_eq!(report.summary.only_a, 1);
        assert_eq!(report.summary.only_b, 1);
    }

    #[test]
    fn run_comparison_fails_atomically() {
        let good = b"AWB Number,Weight\n100,5.0\n";
        let bad = b"AWB Number,Qty\n100,2\n";
        let err = run_comparison("good.csv", good, "bad.csv", bad).unwrap_err();
        assert!(matches!(err, ReconError::MissingColumns { .. }));
        assert!(err.to_string().contains("bad.csv"));
    }
}
