//! PartitionPlan - the result of every partition operation.
//!
//! A plan carries the output sets together with the population totals before
//! and after the operation. The conservation flag is computed when the plan is
//! built and cannot be left unset: plans are only constructed inside the
//! crate, always through [`ConservationChecker`].
//!
//! Which totals an operation promises to keep equal is stated by its
//! [`ConservationLaw`]. Merge, transfer and split preserve the total; cycle is
//! lossy and its flag is informational only.

use crate::bitset::BitSet;
use crate::conservation::ConservationChecker;
use crate::error::{OperationError, Result};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Partition operation identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Merge,
    MergeAll,
    Split,
    Cycle,
    Transfer,
}

impl OperationKind {
    /// Conservation contract of this operation.
    pub const fn law(self) -> ConservationLaw {
        match self {
            OperationKind::Merge
            | OperationKind::MergeAll
            | OperationKind::Split
            | OperationKind::Transfer => ConservationLaw::Preserved,
            OperationKind::Cycle => ConservationLaw::Lossy,
        }
    }

    /// Lowercase name, as used in records and error messages.
    pub const fn name(self) -> &'static str {
        match self {
            OperationKind::Merge => "merge",
            OperationKind::MergeAll => "merge_all",
            OperationKind::Split => "split",
            OperationKind::Cycle => "cycle",
            OperationKind::Transfer => "transfer",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What an operation promises about total population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConservationLaw {
    /// Total population after equals total population before.
    Preserved,
    /// No promise; totals may differ.
    Lossy,
}

/// Output of a partition operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartitionPlan {
    kind: OperationKind,
    outputs: Vec<BitSet>,
    total_before: usize,
    total_after: usize,
    conserved: bool,
}

impl PartitionPlan {
    /// Build a plan, computing `total_after` and `conserved` from the outputs.
    pub(crate) fn new(kind: OperationKind, total_before: usize, outputs: Vec<BitSet>) -> Self {
        let total_after = ConservationChecker::total(&outputs);
        Self {
            kind,
            outputs,
            total_before,
            total_after,
            conserved: ConservationChecker::check(total_before, total_after),
        }
    }

    #[inline]
    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    /// Conservation contract of the producing operation.
    #[inline]
    pub fn law(&self) -> ConservationLaw {
        self.kind.law()
    }

    /// Output sets in operation order.
    #[inline]
    pub fn outputs(&self) -> &[BitSet] {
        &self.outputs
    }

    /// Take ownership of the output sets.
    pub fn into_outputs(self) -> Vec<BitSet> {
        self.outputs
    }

    /// First output, the combined set for merge and transfer.
    ///
    /// Every operation produces at least one output.
    #[inline]
    pub fn primary(&self) -> &BitSet {
        &self.outputs[0]
    }

    /// Population of each output.
    pub fn populations(&self) -> Vec<usize> {
        self.outputs.iter().map(BitSet::population).collect()
    }

    #[inline]
    pub fn total_before(&self) -> usize {
        self.total_before
    }

    #[inline]
    pub fn total_after(&self) -> usize {
        self.total_after
    }

    /// Whether totals before and after match.
    ///
    /// Always populated. For a lossy operation a `true` here is a coincidence
    /// of the inputs, not a guarantee.
    #[inline]
    pub fn conserved(&self) -> bool {
        self.conserved
    }

    /// Fail with `ConservationMismatch` if a preserving operation did not conserve.
    ///
    /// Lossy plans always pass.
    pub fn ensure_conserved(&self) -> Result<()> {
        if self.law() == ConservationLaw::Preserved && !self.conserved {
            return Err(OperationError::ConservationMismatch {
                kind: self.kind,
                before: self.total_before,
                after: self.total_after,
            });
        }
        Ok(())
    }

    /// True when a preserving operation reported a mismatch.
    pub fn is_violation(&self) -> bool {
        self.ensure_conserved().is_err()
    }
}

impl fmt::Display for PartitionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {} -> {} ({})",
            self.kind,
            self.outputs.iter().map(BitSet::to_binary_string).join(", "),
            self.total_before,
            self.total_after,
            if self.conserved { "conserved" } else { "not conserved" }
        )
    }
}
