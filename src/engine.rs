//! PartitionEngine - merge, split, cycle and transfer over BitSets.
//!
//! All operations are pure: they borrow their inputs, build new sets and
//! return a [`PartitionPlan`]. The engine holds nothing but its
//! [`EngineConfig`], so one engine can be shared freely between threads.
//!
//! # Conservation
//!
//! | Operation  | Law       | Output layout                                   |
//! |------------|-----------|-------------------------------------------------|
//! | `merge`    | Preserved | `a` low, `b` shifted by `a.width()`             |
//! | `merge_all`| Preserved | left fold of `merge`                            |
//! | `split`    | Preserved | `parts` active-only sets, sizes differ by <= 1  |
//! | `cycle`    | Lossy     | one active-only set of `n mod m` (or `m`)       |
//! | `transfer` | Preserved | `source` low, `target` high; drained source     |
//!
//! Merge is concatenation, never bitwise OR: OR collapses overlapping
//! positions and loses population whenever the inputs share an active bit.
//!
//! # Examples
//!
//! ```
//! use vorax::{BitSet, PartitionEngine};
//!
//! let engine = PartitionEngine::default();
//! let a = BitSet::from_binary_string("1010").unwrap();
//! let b = BitSet::from_binary_string("1100").unwrap();
//!
//! let plan = engine.merge(&a, &b).unwrap();
//! assert_eq!(plan.primary().to_binary_string(), "11001010");
//! assert!(plan.conserved());
//! ```

use crate::bitset::BitSet;
use crate::config::EngineConfig;
use crate::conservation::ConservationChecker;
use crate::error::{OperationError, Result};
use crate::plan::{OperationKind, PartitionPlan};

/// Sizes of an even distribution of `n` items over `parts` buckets.
///
/// The first `n % parts` buckets get one extra item.
fn even_shares(n: usize, parts: usize) -> impl Iterator<Item = usize> {
    debug_assert!(parts > 0);
    let base = n / parts;
    let rem = n % parts;
    (0..parts).map(move |i| if i < rem { base + 1 } else { base })
}

/// Stateless partition engine bound to a width profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionEngine {
    config: EngineConfig,
}

impl PartitionEngine {
    /// Create an engine after validating `config`.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Width profile this engine runs under.
    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Largest width an operation may produce.
    #[inline]
    pub fn max_width(&self) -> usize {
        self.config.max_width
    }

    /// Parse a binary string under this engine's width limit.
    pub fn parse(&self, s: &str) -> Result<BitSet> {
        BitSet::from_binary_string_with_limit(s, self.config.max_width)
    }

    /// Copy of `source` widened to `width` with the new positions cleared.
    ///
    /// Active-only split and cycle outputs are narrow; this restores a
    /// fixed-width container. Fails with `InvalidWidth` if `width` is below
    /// the current width or above the engine maximum.
    pub fn pad(&self, source: &BitSet, width: usize) -> Result<BitSet> {
        if width < source.width() || width > self.config.max_width {
            return Err(OperationError::InvalidWidth {
                width,
                min: source.width(),
                max: self.config.max_width,
            });
        }
        Ok(source.widened(width))
    }

    /// Empty output vector with room for `parts` sets.
    fn reserve_outputs(parts: usize) -> Result<Vec<BitSet>> {
        if parts == 0 {
            return Err(OperationError::InvalidPartitionCount(parts));
        }
        let mut outputs = Vec::new();
        outputs
            .try_reserve_exact(parts)
            .map_err(|_| OperationError::TooManyParts(parts))?;
        Ok(outputs)
    }

    fn check_width(&self, width: usize) -> Result<()> {
        if width > self.config.max_width {
            return Err(OperationError::WidthOverflow {
                width,
                max: self.config.max_width,
            });
        }
        Ok(())
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Concatenate `a` and `b` into one set of width `a.width() + b.width()`.
    ///
    /// Fails with `WidthOverflow` if the combined width exceeds the maximum.
    pub fn merge(&self, a: &BitSet, b: &BitSet) -> Result<PartitionPlan> {
        self.check_width(a.width() + b.width())?;
        let merged = a.concat(b);
        Ok(PartitionPlan::new(
            OperationKind::Merge,
            a.population() + b.population(),
            vec![merged],
        ))
    }

    /// Merge a sequence of sets left to right.
    ///
    /// The first set occupies the lowest positions. An empty slice yields a
    /// single empty output.
    pub fn merge_all(&self, parts: &[BitSet]) -> Result<PartitionPlan> {
        let mut merged = BitSet::empty();
        for part in parts {
            self.check_width(merged.width() + part.width())?;
            merged = merged.concat(part);
        }
        Ok(PartitionPlan::new(
            OperationKind::MergeAll,
            ConservationChecker::total(parts),
            vec![merged],
        ))
    }

    /// Distribute the active bits of `source` as evenly as possible over `parts` sets.
    ///
    /// With `n` active bits, the first `n % parts` outputs hold `n / parts + 1`
    /// bits and the rest hold `n / parts`. Bits are handed out lowest position
    /// first and each output is in active-only form (width equals population).
    ///
    /// Fails with `InvalidPartitionCount` if `parts` is 0, and with
    /// `TooManyParts` if the output sets cannot be allocated.
    pub fn split(&self, source: &BitSet, parts: usize) -> Result<PartitionPlan> {
        let mut outputs = Self::reserve_outputs(parts)?;
        let n = source.population();
        outputs.extend(even_shares(n, parts).map(BitSet::filled));
        Ok(PartitionPlan::new(OperationKind::Split, n, outputs))
    }

    /// Split keeping every active bit at its source position.
    ///
    /// Shares are the same as [`split`](Self::split), but each output has the
    /// width of `source` and holds the positions it was handed. The outputs
    /// are pairwise disjoint and together cover exactly the active positions
    /// of `source`.
    pub fn split_preserving(&self, source: &BitSet, parts: usize) -> Result<PartitionPlan> {
        let mut outputs = Self::reserve_outputs(parts)?;
        let positions = source.active_positions();
        let mut remaining = positions.as_slice();
        for share in even_shares(positions.len(), parts) {
            let (taken, rest) = remaining.split_at(share);
            outputs.push(BitSet::from_positions(source.width(), taken)?);
            remaining = rest;
        }
        Ok(PartitionPlan::new(
            OperationKind::Split,
            positions.len(),
            outputs,
        ))
    }

    /// Reduce the population of `source` modulo `modulo`.
    ///
    /// With `n` active bits the result holds `n % modulo` bits, except that a
    /// non-zero population that wraps exactly holds `modulo` bits instead of
    /// none. An empty source stays empty. The output is in active-only form.
    ///
    /// This operation is lossy: the plan's `conserved` flag is reported but
    /// promised nothing.
    ///
    /// Fails with `InvalidModulo` if `modulo` is 0.
    pub fn cycle(&self, source: &BitSet, modulo: usize) -> Result<PartitionPlan> {
        if modulo == 0 {
            return Err(OperationError::InvalidModulo(modulo));
        }
        let n = source.population();
        let result = match n % modulo {
            0 if n > 0 => modulo,
            r => r,
        };
        Ok(PartitionPlan::new(
            OperationKind::Cycle,
            n,
            vec![BitSet::filled(result)],
        ))
    }

    /// Move every active bit of `source` into a set combined with `target`.
    ///
    /// `outputs[0]` has the layout of `merge(source, target)`; `outputs[1]`
    /// is the drained source, which is the width-0 set.
    ///
    /// Fails with `WidthOverflow` if the combined width exceeds the maximum.
    pub fn transfer(&self, source: &BitSet, target: &BitSet) -> Result<PartitionPlan> {
        self.check_width(source.width() + target.width())?;
        let combined = source.concat(target);
        Ok(PartitionPlan::new(
            OperationKind::Transfer,
            source.population() + target.population(),
            vec![combined, BitSet::empty()],
        ))
    }
}
