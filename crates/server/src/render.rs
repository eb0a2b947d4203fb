// HTML page rendering for the upload form and the result tables.

use serde::Serialize;

use awbrecon_core::{JoinedRow, ReconReport, ReconSummary};
use awbrecon_io::Artifact;

pub const INDEX_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>AWB Manifest Comparison</title>
</head>
<body>
    <h1>Upload Two Manifest Files for Comparison</h1>
    <form action="/compare" method="post" enctype="multipart/form-data">
        <label for="file1">File 1:</label>
        <input type="file" name="file1" required><br><br>
        <label for="file2">File 2:</label>
        <input type="file" name="file2" required><br><br>
        <button type="submit">Compare Files</button>
    </form>
</body>
</html>
"#;

pub const RESULTS_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Comparison Results</title>
    <style>
        table { border-collapse: collapse; }
        th, td { border: 1px solid #999; padding: 4px 10px; }
    </style>
</head>
<body>
    <h1>File Comparison Results</h1>
    <p>{{summary.matched}} matched, {{summary.only_a}} only in file 1, {{summary.only_b}} only in file 2.</p>

    <h2>Matching Rows</h2>
    <p>These AWB numbers appear in both files.</p>
    <table>
        <tr><th>awb number</th><th>weight_file1</th><th>weight_file2</th><th>weight_diff</th></tr>
        {{#each matched}}
        <tr><td>{{key}}</td><td>{{value_a}}</td><td>{{value_b}}</td><td>{{diff}}</td></tr>
        {{/each}}
    </table>

    <h2>Mismatching Rows</h2>
    <p>These AWB numbers are missing from one of the files.</p>
    <table>
        <tr><th>awb number</th><th>weight_file1</th><th>weight_file2</th><th>weight_diff</th></tr>
        {{#each unmatched}}
        <tr><td>{{key}}</td><td>{{value_a}}</td><td>{{value_b}}</td><td>{{diff}}</td></tr>
        {{/each}}
    </table>

    <h2>Download Links</h2>
    <ul>
        {{#each downloads}}
        <li><a href="/download/{{this}}" download>{{this}}</a></li>
        {{/each}}
    </ul>
</body>
</html>
"#;

#[derive(Debug, Serialize)]
struct RowView {
    key: String,
    value_a: String,
    value_b: String,
    diff: String,
}

#[derive(Debug, Serialize)]
pub struct ResultsContext {
    summary: ReconSummary,
    matched: Vec<RowView>,
    unmatched: Vec<RowView>,
    downloads: Vec<String>,
}

pub fn results_context(report: &ReconReport, artifacts: &[Artifact]) -> ResultsContext {
    ResultsContext {
        summary: report.summary.clone(),
        matched: report.matched.iter().map(row_view).collect(),
        unmatched: report.unmatched.iter().map(row_view).collect(),
        downloads: artifacts.iter().map(|a| a.filename.clone()).collect(),
    }
}

fn row_view(row: &JoinedRow) -> RowView {
    RowView {
        key: row.key.clone(),
        value_a: weight_cell(row.value_a),
        value_b: weight_cell(row.value_b),
        diff: weight_cell(row.diff),
    }
}

/// A missing side renders as an empty cell.
fn weight_cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
