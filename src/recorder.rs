//! Operation recording for audit.
//!
//! The engine never logs or stores anything itself. This module turns plans
//! into [`OperationRecord`]s and hands them to an [`OperationSink`]:
//!
//! - [`OperationLog`] keeps records in memory and exports them as JSON or
//!   bincode
//! - [`TracingSink`] forwards records to the `tracing` facade
//! - [`RecordingEngine`] wraps a [`PartitionEngine`] and records every
//!   successful operation into a sink
//!
//! # Examples
//!
//! ```
//! use vorax::{BitSet, OperationLog, PartitionEngine, RecordingEngine};
//!
//! let mut log = OperationLog::new();
//! let mut engine = RecordingEngine::new(PartitionEngine::default(), &mut log);
//!
//! let source = BitSet::from_value(0b1111_1111, 8).unwrap();
//! engine.split(&source, 3).unwrap();
//!
//! assert_eq!(log.len(), 1);
//! assert!(log.violations().is_empty());
//! ```

use crate::bitset::BitSet;
use crate::engine::PartitionEngine;
use crate::error::Result;
use crate::plan::{ConservationLaw, OperationKind, PartitionPlan};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Snapshot of a BitSet inside a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitSetSnapshot {
    /// Number of bit positions
    pub width: usize,
    /// Pattern, most-significant position first
    pub bits: String,
    /// Indices of active positions
    pub active_bits: Vec<usize>,
    /// Number of active positions
    pub population: usize,
}

impl BitSetSnapshot {
    /// Capture the pattern and active positions of `bs`.
    pub fn from_bitset(bs: &BitSet) -> Self {
        Self {
            width: bs.width(),
            bits: bs.to_binary_string(),
            active_bits: bs.active_positions(),
            population: bs.population(),
        }
    }
}

/// Audit entry for one operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationRecord {
    /// Position in the sink's sequence, assigned by the sink
    pub sequence: u64,
    pub kind: OperationKind,
    pub law: ConservationLaw,
    pub inputs: Vec<BitSetSnapshot>,
    pub outputs: Vec<BitSetSnapshot>,
    pub total_before: usize,
    pub total_after: usize,
    pub conserved: bool,
    /// Milliseconds since the Unix epoch
    pub timestamp_ms: u64,
}

impl OperationRecord {
    /// Build a record for `plan` produced from `inputs`, stamped with the current time.
    pub fn from_plan(plan: &PartitionPlan, inputs: &[&BitSet]) -> Self {
        let timestamp_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);

        Self {
            sequence: 0,
            kind: plan.kind(),
            law: plan.law(),
            inputs: inputs.iter().map(|bs| BitSetSnapshot::from_bitset(bs)).collect(),
            outputs: plan.outputs().iter().map(BitSetSnapshot::from_bitset).collect(),
            total_before: plan.total_before(),
            total_after: plan.total_after(),
            conserved: plan.conserved(),
            timestamp_ms,
        }
    }

    /// True when a preserving operation reported a mismatch.
    pub fn is_violation(&self) -> bool {
        self.law == ConservationLaw::Preserved && !self.conserved
    }
}

/// Receiver of operation records.
pub trait OperationSink {
    fn record(&mut self, record: OperationRecord);
}

impl<S: OperationSink + ?Sized> OperationSink for &mut S {
    fn record(&mut self, record: OperationRecord) {
        (**self).record(record);
    }
}

impl<S: OperationSink + ?Sized> OperationSink for Box<S> {
    fn record(&mut self, record: OperationRecord) {
        (**self).record(record);
    }
}

// =============================================================================
// In-memory log
// =============================================================================

/// In-memory sink with start/stop control and export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationLog {
    records: Vec<OperationRecord>,
    next_sequence: u64,
    #[serde(skip, default = "recording_default")]
    recording: bool,
}

fn recording_default() -> bool {
    true
}

impl OperationLog {
    /// Create an empty log that is recording.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_sequence: 0,
            recording: true,
        }
    }

    /// Resume recording.
    pub fn start(&mut self) {
        self.recording = true;
    }

    /// Pause recording; records passed in while stopped are dropped.
    pub fn stop(&mut self) {
        self.recording = false;
    }

    /// Whether the log accepts new records.
    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Records in sequence order.
    pub fn records(&self) -> &[OperationRecord] {
        &self.records
    }

    /// Number of records kept.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records of preserving operations whose totals did not match.
    pub fn violations(&self) -> Vec<&OperationRecord> {
        self.records.iter().filter(|r| r.is_violation()).collect()
    }

    /// Drop all records and restart sequence numbers at 0.
    pub fn reset(&mut self) {
        self.records.clear();
        self.next_sequence = 0;
    }

    /// Export log to JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Import log from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Export log to JSON file
    pub fn to_json_file(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Import log from JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Export log to bincode
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Import log from bincode
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(data)?)
    }
}

impl Default for OperationLog {
    fn default() -> Self {
        Self::new()
    }
}

impl OperationSink for OperationLog {
    fn record(&mut self, mut record: OperationRecord) {
        if !self.recording {
            return;
        }
        record.sequence = self.next_sequence;
        self.next_sequence += 1;
        self.records.push(record);
    }
}

// =============================================================================
// Tracing sink
// =============================================================================

/// Sink that emits each record as a `tracing` event.
///
/// Conserving plans log at `debug`, lossy plans at `trace`, and a preserving
/// plan that did not conserve at `warn`.
#[derive(Debug, Clone, Default)]
pub struct TracingSink {
    next_sequence: u64,
}

impl TracingSink {
    /// Create a sink with its sequence counter at 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records seen so far.
    pub fn count(&self) -> u64 {
        self.next_sequence
    }
}

impl OperationSink for TracingSink {
    fn record(&mut self, record: OperationRecord) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;

        if record.is_violation() {
            tracing::warn!(
                sequence,
                kind = %record.kind,
                total_before = record.total_before,
                total_after = record.total_after,
                "conservation violated"
            );
        } else if record.law == ConservationLaw::Lossy {
            tracing::trace!(
                sequence,
                kind = %record.kind,
                total_before = record.total_before,
                total_after = record.total_after,
                "lossy operation"
            );
        } else {
            tracing::debug!(
                sequence,
                kind = %record.kind,
                outputs = record.outputs.len(),
                total = record.total_after,
                "operation conserved"
            );
        }
    }
}

// =============================================================================
// Recording engine
// =============================================================================

/// A [`PartitionEngine`] that records every successful operation.
///
/// Failed operations return their error and leave the sink untouched.
#[derive(Debug)]
pub struct RecordingEngine<S: OperationSink> {
    engine: PartitionEngine,
    sink: S,
}

impl<S: OperationSink> RecordingEngine<S> {
    /// Wrap `engine`, sending records to `sink`.
    pub fn new(engine: PartitionEngine, sink: S) -> Self {
        Self { engine, sink }
    }

    /// Wrapped engine.
    pub fn engine(&self) -> &PartitionEngine {
        &self.engine
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable sink access, e.g. to stop or reset a log.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Unwrap into the engine and the sink.
    pub fn into_parts(self) -> (PartitionEngine, S) {
        (self.engine, self.sink)
    }

    fn commit(&mut self, plan: PartitionPlan, inputs: &[&BitSet]) -> PartitionPlan {
        self.sink.record(OperationRecord::from_plan(&plan, inputs));
        plan
    }

    /// [`PartitionEngine::merge`], recorded.
    pub fn merge(&mut self, a: &BitSet, b: &BitSet) -> Result<PartitionPlan> {
        let plan = self.engine.merge(a, b)?;
        Ok(self.commit(plan, &[a, b]))
    }

    pub fn merge_all(&mut self, parts: &[BitSet]) -> Result<PartitionPlan> {
        let plan = self.engine.merge_all(parts)?;
        let inputs: Vec<&BitSet> = parts.iter().collect();
        Ok(self.commit(plan, &inputs))
    }

    /// [`PartitionEngine::split`], recorded.
    pub fn split(&mut self, source: &BitSet, parts: usize) -> Result<PartitionPlan> {
        let plan = self.engine.split(source, parts)?;
        Ok(self.commit(plan, &[source]))
    }

    pub fn split_preserving(&mut self, source: &BitSet, parts: usize) -> Result<PartitionPlan> {
        let plan = self.engine.split_preserving(source, parts)?;
        Ok(self.commit(plan, &[source]))
    }

    pub fn cycle(&mut self, source: &BitSet, modulo: usize) -> Result<PartitionPlan> {
        let plan = self.engine.cycle(source, modulo)?;
        Ok(self.commit(plan, &[source]))
    }

    pub fn transfer(&mut self, source: &BitSet, target: &BitSet) -> Result<PartitionPlan> {
        let plan = self.engine.transfer(source, target)?;
        Ok(self.commit(plan, &[source, target]))
    }
}
