// Integration tests for operation recording and export

use vorax::{
    BitSet, ConservationLaw, OperationKind, OperationLog, OperationRecord, OperationSink,
    PartitionEngine, RecordingEngine, Result, TracingSink,
};

fn bits(s: &str) -> BitSet {
    BitSet::from_binary_string(s).unwrap()
}

#[test]
fn test_records_every_operation() -> Result<()> {
    let mut log = OperationLog::new();
    let mut engine = RecordingEngine::new(PartitionEngine::default(), &mut log);

    let a = bits("1010");
    let b = bits("1100");
    engine.merge(&a, &b)?;
    let split = engine.split(&bits("11111111"), 3)?;
    engine.merge_all(split.outputs())?;
    engine.cycle(&bits("1111111"), 3)?;
    engine.transfer(&a, &b)?;
    engine.split_preserving(&bits("1011"), 2)?;

    let kinds: Vec<OperationKind> = log.records().iter().map(|r| r.kind).collect();
    assert_eq!(
        kinds,
        vec![
            OperationKind::Merge,
            OperationKind::Split,
            OperationKind::MergeAll,
            OperationKind::Cycle,
            OperationKind::Transfer,
            OperationKind::Split,
        ]
    );
    assert!(log.violations().is_empty());

    let merge_all = &log.records()[2];
    assert_eq!(merge_all.inputs.len(), 3);
    assert_eq!(merge_all.total_after, 8);

    let cycle = &log.records()[3];
    assert_eq!(cycle.law, ConservationLaw::Lossy);
    assert!(!cycle.conserved);
    assert!(!cycle.is_violation());
    Ok(())
}

#[test]
fn test_violations_are_reported() {
    let engine = PartitionEngine::default();
    let a = bits("11");
    let plan = engine.merge(&a, &a).unwrap();

    let mut forged = OperationRecord::from_plan(&plan, &[&a, &a]);
    forged.total_after = 3;
    forged.conserved = false;

    let mut log = OperationLog::new();
    log.record(OperationRecord::from_plan(&plan, &[&a, &a]));
    log.record(forged);

    let violations = log.violations();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].sequence, 1);
}

#[test]
fn test_reset() {
    let mut engine = RecordingEngine::new(PartitionEngine::default(), OperationLog::new());
    engine.split(&bits("11"), 2).unwrap();
    engine.sink_mut().reset();
    assert!(engine.sink().is_empty());

    engine.split(&bits("11"), 2).unwrap();
    assert_eq!(engine.sink().records()[0].sequence, 0);
}

#[test]
fn test_log_file_roundtrip() -> Result<()> {
    let mut engine = RecordingEngine::new(PartitionEngine::default(), OperationLog::new());
    engine.merge(&bits("1"), &bits("0"))?;
    engine.cycle(&bits("111"), 2)?;
    let (_, log) = engine.into_parts();

    let path = std::env::temp_dir().join(format!("vorax_log_{}.json", std::process::id()));
    log.to_json_file(&path)?;
    let loaded = OperationLog::from_json_file(&path)?;
    std::fs::remove_file(&path)?;

    assert_eq!(loaded.records(), log.records());
    Ok(())
}

#[test]
fn test_log_binary_roundtrip() -> Result<()> {
    let mut engine = RecordingEngine::new(PartitionEngine::default(), OperationLog::new());
    engine.transfer(&bits("110"), &bits("01"))?;
    let (_, log) = engine.into_parts();

    let bytes = log.to_bytes()?;
    let loaded = OperationLog::from_bytes(&bytes)?;
    assert_eq!(loaded.records(), log.records());
    assert_eq!(loaded.records()[0].outputs[0].bits, "01110");
    Ok(())
}

#[test]
fn test_tracing_sink_under_subscriber() {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let mut engine = RecordingEngine::new(PartitionEngine::default(), TracingSink::new());
        engine.merge(&bits("10"), &bits("01")).unwrap();
        engine.split(&bits("111"), 2).unwrap();
        engine.cycle(&bits("111"), 2).unwrap();
        assert_eq!(engine.sink().count(), 3);
    });
}

#[test]
fn test_boxed_sink() {
    let sink: Box<dyn OperationSink> = Box::new(OperationLog::new());
    let mut engine = RecordingEngine::new(PartitionEngine::default(), sink);
    engine.split(&bits("1"), 1).unwrap();
    engine.cycle(&bits("1"), 1).unwrap();
}
