//! Engine runs with the production step sources.
//!
//! Checks the progress and classification guarantees over many randomized runs.

#![allow(clippy::unwrap_used, clippy::float_cmp)]

use std::sync::Arc;
use std::time::Duration;

use malaria_demo_adapters::{InstantPacer, RandomSteps, SeededSteps};
use malaria_demo_core::{
    classify, reference_hash, AnalysisEngine, DemoSession, KnownSample, ProgressEvent,
    DEFAULT_STEP_DELAY,
};
use malaria_demo_test_support::{
    reference, EngineBuilder, MockPacer, MockProgressSink, ScriptedSteps, UNKNOWN_REFERENCES,
};

fn random_engine() -> AnalysisEngine {
    AnalysisEngine::new(Box::new(InstantPacer), Box::new(RandomSteps))
}

fn assert_progress_shape(values: &[u8]) {
    assert!(!values.is_empty());
    assert!(values[0] >= 5, "first value {}", values[0]);
    assert!(
        values.windows(2).all(|w| w[0] <= w[1]),
        "not monotonic: {values:?}"
    );
    assert!(values.iter().all(|v| *v <= 100));
    assert_eq!(values.last(), Some(&100));
    // the final 100 is always emitted twice
    assert_eq!(&values[values.len() - 2..], &[100, 100]);
    // steps between stepped values stay within 5..=19 until the clamp
    for w in values[..values.len() - 1].windows(2) {
        let step = w[1] - w[0];
        assert!(step <= 19, "step {step} in {values:?}");
        if w[1] < 100 {
            assert!(step >= 5, "step {step} in {values:?}");
        }
    }
}

#[test]
fn test_random_runs_are_monotonic_and_end_at_100() {
    let engine = random_engine();
    for _ in 0..200 {
        let sink = MockProgressSink::new();
        engine.run(&reference("mystery.png"), &sink).unwrap();
        assert_progress_shape(&sink.progress_values());
    }
}

#[test]
fn test_default_delay_before_each_stepped_value() {
    let pacer = MockPacer::new();
    let engine = EngineBuilder::new()
        .steps([15])
        .pacer(pacer.clone())
        .build();
    let sink = MockProgressSink::new();

    engine.run(&reference("/infected.jpg"), &sink).unwrap();

    assert_eq!(sink.progress_values(), vec![15, 30, 45, 60, 75, 90, 100, 100]);
    // the repeated 100 is emitted without a pause
    assert_eq!(pacer.pauses(), vec![Duration::from_millis(120); 7]);
    assert_eq!(DEFAULT_STEP_DELAY, Duration::from_millis(120));
}

#[test]
fn test_out_of_range_steps_are_clamped() {
    let pacer = MockPacer::new();
    let engine = AnalysisEngine::new(
        Box::new(pacer.clone()),
        Box::new(ScriptedSteps::new([0, 200])),
    );
    let sink = MockProgressSink::new();

    engine.run(&reference("abc"), &sink).unwrap();

    let values = sink.progress_values();
    assert_eq!(values, vec![5, 24, 29, 48, 53, 72, 77, 96, 100, 100]);
    assert_progress_shape(&values);
    assert_eq!(pacer.pauses().len(), values.len() - 1);
}

#[test]
fn test_infected_sample_always_detected() {
    let engine = random_engine();
    for base in ["/", "/static/", "https://cdn.example.test/demo/"] {
        for _ in 0..20 {
            let sink = MockProgressSink::new();
            let result = engine
                .run(&KnownSample::Infected.reference(base), &sink)
                .unwrap();
            assert!(result.parasite_detected);
            assert_eq!(result.confidence, 0.96);
            assert_eq!(sink.progress_values().last(), Some(&100));
        }
    }
}

#[test]
fn test_uninfected_sample_never_detected() {
    let engine = random_engine();
    for _ in 0..50 {
        let sink = MockProgressSink::new();
        let result = engine
            .run(&reference("/static/uninfected.jpg"), &sink)
            .unwrap();
        assert!(!result.parasite_detected);
        assert_eq!(result.confidence, 0.98);
    }
}

#[test]
fn test_unknown_references_stable_across_runs() {
    let engine = random_engine();
    for value in UNKNOWN_REFERENCES {
        let expected = classify(&reference(value));
        for _ in 0..5 {
            let result = engine
                .run(&reference(value), &MockProgressSink::new())
                .unwrap();
            assert_eq!(result.parasite_detected, expected.parasite_detected);
            assert_eq!(result.confidence, expected.confidence);
            assert!((0.70..=0.99).contains(&result.confidence));
        }
        assert_eq!(reference_hash(value), reference_hash(value));
    }
}

#[test]
fn test_seeded_runs_repeat_progress() {
    let run = |seed| {
        let engine = AnalysisEngine::new(Box::new(InstantPacer), Box::new(SeededSteps::new(seed)));
        let sink = MockProgressSink::new();
        engine.run(&reference("abc"), &sink).unwrap();
        sink.progress_values()
    };

    let first = run(7);
    assert_eq!(first, run(7));
    assert_progress_shape(&first);
}

#[test]
fn test_session_scenario_infected() {
    let mut session = DemoSession::new(Arc::new(random_engine()));
    session.select_sample(KnownSample::Infected, "/");

    let sink = MockProgressSink::new();
    let result = session.analyze(&sink).cloned().unwrap();

    assert!(result.parasite_detected);
    assert_eq!(result.confidence, 0.96);
    assert_eq!(session.progress().value(), 100);
    assert_eq!(sink.started_count(), 1);
    assert_eq!(sink.completed(), vec![result]);
    assert!(matches!(
        sink.events().last(),
        Some(ProgressEvent::Completed { .. })
    ));
}
