//! Vorax - Bit-Population Partition Engine
//!
//! Vorax redistributes the active bits of bit sets between containers while
//! keeping an explicit, checkable account of the total population. Every
//! operation is a pure function from immutable [`BitSet`] values to a
//! [`PartitionPlan`] whose conservation flag is always populated.
//!
//! # Key Characteristics
//!
//! - Immutable, width-generic bit sets backed by `bitvec`
//! - Concatenation-based merge that never loses an active bit
//! - Even split, modular cycle and directional transfer
//! - Conservation laws stated per operation, not assumed
//! - No global state: configuration and audit sinks are explicit values
//!
//! # Architecture
//!
//! - **BitSet**: immutable container of active positions (64-bit profile by default)
//! - **PartitionEngine**: merge, split, cycle and transfer
//! - **ConservationChecker**: population accounting behind every plan
//! - **EngineConfig**: width profile, serializable
//! - **Recorder**: operation records, in-memory log, `tracing` sink
//!
//! # Examples
//!
//! ## Split and merge back
//!
//! ```
//! use vorax::{BitSet, PartitionEngine};
//!
//! let engine = PartitionEngine::default();
//! let source = BitSet::from_value(0b1111_1111, 8).unwrap();
//!
//! let split = engine.split(&source, 3).unwrap();
//! assert_eq!(split.populations(), vec![3, 3, 2]);
//!
//! let merged = engine.merge_all(split.outputs()).unwrap();
//! assert_eq!(merged.primary().population(), 8);
//! ```
//!
//! ## Cycle is lossy
//!
//! ```
//! use vorax::{BitSet, ConservationLaw, PartitionEngine};
//!
//! let engine = PartitionEngine::default();
//! let source = BitSet::from_binary_string("111111").unwrap();
//!
//! let plan = engine.cycle(&source, 4).unwrap();
//! assert_eq!(plan.primary().population(), 2);
//! assert_eq!(plan.law(), ConservationLaw::Lossy);
//! ```
//!
//! # Concurrency
//!
//! All core types are plain values (`Send + Sync`). Independent calls can run
//! on separate threads with no coordination; sinks own their state behind
//! `&mut self`.

pub mod bitset;
pub mod config;
pub mod conservation;
pub mod engine;
pub mod error;
pub mod plan;
pub mod recorder;

// Re-exports for convenient access
pub use bitset::{BitSet, Word, BITS_PER_WORD, MAX_WIDTH};
pub use config::EngineConfig;
pub use conservation::ConservationChecker;
pub use engine::PartitionEngine;
pub use error::{OperationError, Result};
pub use plan::{ConservationLaw, OperationKind, PartitionPlan};
pub use recorder::{
    BitSetSnapshot, OperationLog, OperationRecord, OperationSink, RecordingEngine, TracingSink,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = "Vorax";

/// Get version string
pub fn version() -> String {
    format!("{} v{}", NAME, VERSION)
}
