// SPDX-License-Identifier: AGPL-3.0-or-later
// Part of the zd workspace — Licensed under AGPL-3.0-or-later.

//! End-to-end detection over the full stack: raw samples in, ranked
//! pattern report out.

use zd_patterns::{MetricValue, PatternDetector, PatternKind, SequenceSummary};

#[test]
fn symmetric_ramp_reports_mirror_symmetry_first() {
    let detector = PatternDetector::with_alpha(1.0).unwrap();
    let data = [1.0, 2.0, 3.0, 4.0, 4.0, 3.0, 2.0, 1.0];
    let patterns = detector.detect_all(&data);

    assert!(!patterns.is_empty());
    let first = &patterns[0];
    assert_eq!(first.kind, PatternKind::MirrorSymmetry);
    assert!(first.confidence > 0.9, "confidence={}", first.confidence);

    // Ranked by descending confidence.
    for window in patterns.windows(2) {
        assert!(window[0].confidence >= window[1].confidence);
    }
    // All-positive input cannot produce a sign-crossing pattern.
    assert!(patterns
        .iter()
        .all(|p| p.kind != PatternKind::SignCrossing));

    // Summary statistics accompany the report for the caller.
    let summary = SequenceSummary::describe(&data).unwrap();
    assert_eq!(summary.len, 8);
    assert_eq!(summary.min, 1.0);
    assert_eq!(summary.max, 4.0);
}

#[test]
fn detection_is_deterministic_across_calls() {
    let detector = PatternDetector::with_alpha(1.0).unwrap();
    let data = [1.0, 2.0, 3.0, 4.0, 4.0, 3.0, 2.0, 1.0];
    assert_eq!(detector.detect_all(&data), detector.detect_all(&data));
}

#[test]
fn gaussian_bell_reports_both_symmetry_and_persistence() {
    let detector = PatternDetector::new();
    let data: Vec<f64> = (0..40)
        .map(|i| {
            let x = -3.0 + 6.0 * i as f64 / 39.0;
            (-x * x).exp()
        })
        .collect();
    let patterns = detector.detect_all(&data);
    assert!(patterns
        .iter()
        .any(|p| p.kind == PatternKind::MirrorSymmetry));
    let persistence = patterns
        .iter()
        .find(|p| p.kind == PatternKind::DimensionalPersistence)
        .expect("persistence pattern");
    match persistence.metrics.get("coefficient_of_variation") {
        Some(MetricValue::Scalar(cv)) => assert!(*cv < 0.2),
        other => panic!("expected CV metric, got {other:?}"),
    }
}
