use crate::model::{JoinedRow, Presence, ReconSummary};

/// Compute summary statistics from the two partitions.
pub fn compute_summary(
    rows_a: usize,
    rows_b: usize,
    matched: &[JoinedRow],
    unmatched: &[JoinedRow],
) -> ReconSummary {
    let only_a = unmatched
        .iter()
        .filter(|r| r.presence == Presence::OnlyA)
        .count();
    ReconSummary {
        rows_a,
        rows_b,
        total: matched.len() + unmatched.len(),
        matched: matched.len(),
        only_a,
        only_b: unmatched.len() - only_a,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(presence: Presence) -> JoinedRow {
        JoinedRow {
            key: "k".into(),
            value_a: None,
            value_b: None,
            presence,
            diff: None,
        }
    }

    #[test]
    fn summary_counts() {
        let matched = vec![row(Presence::Both), row(Presence::Both)];
        let unmatched = vec![
            row(Presence::OnlyA),
            row(Presence::OnlyB),
            row(Presence::OnlyB),
        ];
        let summary = compute_summary(4, 3, &matched, &unmatched);
        assert_eq!(summary.rows_a, 4);
        assert_eq!(summary.rows_b, 3);
        assert_eq!(summary.total, 5);
        assert_eq!(summary.matched, 2);
        assert_eq!(summary.only_a, 1);
        assert_eq!(summary.only_b, 2);
    }
}
