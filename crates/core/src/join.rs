use std::collections::{HashMap, HashSet};

use crate::model::{Dataset, JoinedRow, Presence, ReconReport};
use crate::summary::compute_summary;

/// Full outer join of two datasets on `key`, partitioned by presence.
///
/// Cardinality follows relational outer-join rules: a key with m rows in A
/// and n rows in B yields m×n joined rows; keys missing from one side yield
/// one row per source row. Ordering is deterministic: A rows in file order
/// (each expanded against B occurrences in file order), then B-only rows in
/// file order.
pub fn reconcile(a: &Dataset, b: &Dataset) -> ReconReport {
    // Index B rows by key, preserving file order within each key.
    let mut b_index: HashMap<&str, Vec<usize>> = HashMap::new();
    for (i, rec) in b.records.iter().enumerate() {
        b_index.entry(rec.key.as_str()).or_default().push(i);
    }

    let mut matched = Vec::new();
    let mut unmatched = Vec::new();

    for rec in &a.records {
        match b_index.get(rec.key.as_str()) {
            Some(b_rows) => {
                for &bi in b_rows {
                    let value_b = b.records[bi].weight;
                    matched.push(JoinedRow {
                        key: rec.key.clone(),
                        value_a: Some(rec.weight),
                        value_b: Some(value_b),
                        presence: Presence::Both,
                        diff: Some((rec.weight - value_b).abs()),
                    });
                }
            }
            None => unmatched.push(JoinedRow {
                key: rec.key.clone(),
                value_a: Some(rec.weight),
                value_b: None,
                presence: Presence::OnlyA,
                diff: None,
            }),
        }
    }

    let a_keys: HashSet<&str> = a.records.iter().map(|r| r.key.as_str()).collect();
    for rec in &b.records {
        if !a_keys.contains(rec.key.as_str()) {
            unmatched.push(JoinedRow {
                key: rec.key.clone(),
                value_a: None,
                value_b: Some(rec.weight),
                presence: Presence::OnlyB,
                diff: None,
            });
        }
    }

    let summary = compute_summary(a.records.len(), b.records.len(), &matched, &unmatched);
    ReconReport {
        summary,
        matched,
        unmatched,
    }
}
