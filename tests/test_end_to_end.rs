//! Upload-to-anomaly flow across every component

mod common;

use std::sync::Arc;

use approx::assert_relative_eq;
use common::*;
use spc_stats::prelude::*;
use spc_stats::spc_core::{RecordingSubscriber, Severity};
use spc_stats::spc_correlation::CorrelationTier;
use spc_stats::{spawn_analysis, AnomalyBus, CapabilityClass, InMemoryStore};
use uuid::Uuid;

#[test]
fn test_session_analysis_of_upload() {
    init_tracing();
    let upload = process_upload(200, 10.0, 7);
    let snapshot = analyze(&upload, &AnalysisConfig::default()).unwrap();

    assert_eq!(snapshot.classification.numeric, vec!["thickness", "temperature", "weight"]);
    assert_eq!(snapshot.classification.categorical, vec!["line"]);

    for histogram in &snapshot.histograms {
        assert_eq!(histogram.histogram.len(), 12);
        assert_eq!(histogram.histogram.counts().iter().sum::<usize>(), 200);
    }

    let r = snapshot.correlation.matrix.get("thickness", "weight").unwrap();
    assert_relative_eq!(r, 1.0, epsilon = 1e-9);
    let strongest = &snapshot.correlation.significant[0];
    assert_eq!(strongest.tier, CorrelationTier::Strong);

    let thickness = &snapshot.statistics_for("thickness").unwrap().statistics;
    assert!((thickness.mean - 10.0).abs() < 0.2);
    assert!(thickness.min <= thickness.median && thickness.median <= thickness.max);
}

#[test]
fn test_capability_of_selected_parameter() -> anyhow::Result<()> {
    init_tracing();
    let upload = process_upload(100, 10.0, 11);
    let limits = SpecLimits::new(7.0, 13.0)?;

    let report = CapabilityAnalyzer::default()
        .analyze_column(&upload, "thickness", None, &limits)?
        .into_report()
        .ok_or_else(|| anyhow::anyhow!("expected a capability report"))?;

    assert_eq!(report.sample_size, 100);
    assert_eq!(report.within_spec_count + report.out_of_spec_count, 100);
    assert_eq!(report.classification, CapabilityClass::Capable);
    Ok(())
}

#[test]
fn test_uploads_accumulate_then_shift_alerts() {
    init_tracing();
    let recorder = RecordingSubscriber::new();
    let bus = AnomalyBus::new();
    bus.register(recorder.clone());
    let aggregator = CumulativeAggregator::new(Arc::new(InMemoryStore::new()), bus, Default::default());
    let numeric = vec!["thickness".to_string(), "temperature".to_string()];

    for seed in 0..3 {
        let upload = process_upload(50, 10.0, 100 + seed);
        let outcomes = aggregator.merge_dataset(&upload, "coating", &numeric, Uuid::new_v4()).unwrap();
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(|o| o.anomaly.is_none()));
    }

    let key = StatisticKey::new("thickness", "coating");
    assert_eq!(aggregator.statistic(&key).unwrap().unwrap().count, 150);

    let shifted = process_upload(50, 15.0, 999);
    let upload_id = Uuid::new_v4();
    let outcomes = aggregator.merge_dataset(&shifted, "coating", &numeric, upload_id).unwrap();

    let thickness = outcomes.iter().find(|o| o.statistic.key == key).unwrap();
    let event = thickness.anomaly.as_ref().unwrap();
    assert_eq!(event.severity, Severity::High);
    assert_eq!(event.triggering_upload_id, upload_id);
    assert_eq!(recorder.events().len(), 1);
    assert_eq!(thickness.statistic.count, 200);
}

#[test]
fn test_background_analysis() {
    init_tracing();
    let (tx, rx) = std::sync::mpsc::channel();
    spawn_analysis(process_upload(64, 10.0, 3), AnalysisConfig::default(), move |result| {
        tx.send(result.map(|snapshot| snapshot.statistics.len())).unwrap();
    });
    assert_eq!(rx.recv().unwrap().unwrap(), 3);
}

#[test]
fn test_snapshot_serializes() {
    let snapshot = analyze(&process_upload(20, 10.0, 5), &AnalysisConfig::default()).unwrap();
    let json = serde_json::to_value(&snapshot).unwrap();
    assert!(json["correlation"]["matrix"]["columns"].is_array());
    assert_eq!(json["classification"]["categorical"][0], "line");
}
