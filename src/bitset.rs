//! BitSet - Immutable container of active bit positions.
//!
//! This module provides the value type every partition operation consumes and
//! produces. Storage is a `bitvec` vector, so the width is not tied to a
//! machine word; the literal constructors implement the 64-bit profile and the
//! engine's [`EngineConfig`](crate::EngineConfig) decides how wide operation
//! outputs may grow.
//!
//! # Design
//!
//! - Uses `BitVec<u64, Lsb0>` for storage (64-bit words, LSB-first ordering)
//! - The width *is* the vector length, so no bit at a position >= width can
//!   ever be set
//! - No mutating methods: operations build new sets
//! - Binary strings are written most-significant position first, matching
//!   binary literals (`"1010"` is `0b1010`)
//!
//! # Examples
//!
//! ```
//! use vorax::BitSet;
//!
//! let bs = BitSet::from_binary_string("1010").unwrap();
//! assert_eq!(bs.width(), 4);
//! assert_eq!(bs.population(), 2);
//! assert_eq!(bs.active_positions(), vec![1, 3]);
//! assert_eq!(bs, BitSet::from_value(0b1010, 4).unwrap());
//! ```

use crate::error::{OperationError, Result};
use bitvec::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Storage word type
pub type Word = u64;

/// Number of bits per storage word
pub const BITS_PER_WORD: usize = 64;

/// Maximum width of the fixed-width profile
pub const MAX_WIDTH: usize = 64;

/// Immutable set of active positions over `0..width`.
///
/// Two sets are equal iff they have the same width and the same bit pattern.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BitSet {
    /// Underlying bitvec storage with u64 words, LSB0 ordering
    bits: BitVec<Word, Lsb0>,
}

impl BitSet {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Create a BitSet of `width` bits from the low bits of `value`.
    ///
    /// Fails with `InvalidWidth` if `width` is 0 or greater than 64, and with
    /// `ValueExceedsWidth` if `value` has a bit set at a position >= `width`.
    ///
    /// # Examples
    ///
    /// ```
    /// use vorax::BitSet;
    ///
    /// let bs = BitSet::from_value(0b1111_1111, 8).unwrap();
    /// assert_eq!(bs.population(), 8);
    /// assert!(BitSet::from_value(5, 0).is_err());
    /// ```
    pub fn from_value(value: u64, width: usize) -> Result<Self> {
        if width == 0 || width > MAX_WIDTH {
            return Err(OperationError::InvalidWidth {
                width,
                min: 1,
                max: MAX_WIDTH,
            });
        }
        if width < MAX_WIDTH && value >> width != 0 {
            return Err(OperationError::ValueExceedsWidth { value, width });
        }

        let mut bits = BitVec::<Word, Lsb0>::from_element(value);
        bits.truncate(width);
        Ok(Self { bits })
    }

    /// Parse a binary string, most-significant position first.
    ///
    /// The width is the string length, limited to 64 characters. Use
    /// [`from_binary_string_with_limit`](Self::from_binary_string_with_limit)
    /// for wider sets.
    pub fn from_binary_string(s: &str) -> Result<Self> {
        Self::from_binary_string_with_limit(s, MAX_WIDTH)
    }

    /// Parse a binary string with a caller-chosen maximum width.
    ///
    /// Fails with `InvalidWidth` if the string is empty or longer than
    /// `max_width`, and with `InvalidCharacter` on the first character that
    /// is neither `'0'` nor `'1'`.
    pub fn from_binary_string_with_limit(s: &str, max_width: usize) -> Result<Self> {
        let width = s.chars().count();
        if width == 0 || width > max_width {
            return Err(OperationError::InvalidWidth {
                width,
                min: 1,
                max: max_width,
            });
        }

        let mut bits = BitVec::<Word, Lsb0>::repeat(false, width);
        for (index, character) in s.chars().enumerate() {
            match character {
                '0' => {}
                '1' => bits.set(width - 1 - index, true),
                _ => return Err(OperationError::InvalidCharacter { character, index }),
            }
        }
        Ok(Self { bits })
    }

    /// Create a BitSet of `width` bits with the given positions active.
    ///
    /// This is the arbitrary-width constructor: `width` is not limited to the
    /// 64-bit profile, and 0 is allowed. Operations still bound their outputs
    /// by the engine's `max_width`. Duplicate positions are harmless. Fails
    /// with `IndexOutOfRange` if any position is >= `width`.
    pub fn from_positions(width: usize, positions: &[usize]) -> Result<Self> {
        let mut bits = BitVec::<Word, Lsb0>::repeat(false, width);
        for &index in positions {
            if index >= width {
                return Err(OperationError::IndexOutOfRange { index, width });
            }
            bits.set(index, true);
        }
        Ok(Self { bits })
    }

    /// The width-0 set.
    #[inline]
    pub fn empty() -> Self {
        Self { bits: BitVec::new() }
    }

    /// Active-only form: width `n` with every position set.
    #[inline]
    pub fn filled(n: usize) -> Self {
        Self {
            bits: BitVec::repeat(true, n),
        }
    }

    /// Create a BitSet of `width` bits with exactly `num_active` random positions set.
    ///
    /// `num_active` is clamped to `width`.
    pub fn random<R: Rng>(width: usize, num_active: usize, rng: &mut R) -> Self {
        let mut bits = BitVec::<Word, Lsb0>::repeat(false, width);
        let num_active = num_active.min(width);
        for index in rand::seq::index::sample(rng, width, num_active) {
            bits.set(index, true);
        }
        Self { bits }
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Number of valid bit positions.
    #[inline(always)]
    pub fn width(&self) -> usize {
        self.bits.len()
    }

    /// True for the width-0 set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Count of set bits (population count).
    #[inline]
    pub fn population(&self) -> usize {
        self.bits.count_ones()
    }

    /// Value of the bit at position `i`.
    ///
    /// Fails with `IndexOutOfRange` if `i >= width`.
    #[inline]
    pub fn bit_at(&self, i: usize) -> Result<bool> {
        self.bits
            .get(i)
            .map(|bit| *bit)
            .ok_or(OperationError::IndexOutOfRange {
                index: i,
                width: self.width(),
            })
    }

    /// Indices of all set bits, in ascending order.
    pub fn active_positions(&self) -> Vec<usize> {
        self.bits.iter_ones().collect()
    }

    /// Pattern as an integer, when the set fits in 64 bits.
    ///
    /// The width-0 set reads as `Some(0)`.
    pub fn to_value(&self) -> Option<u64> {
        if self.width() > MAX_WIDTH {
            return None;
        }
        Some(self.bits.iter_ones().fold(0u64, |acc, i| acc | (1 << i)))
    }

    /// Pattern as a binary string, most-significant position first.
    pub fn to_binary_string(&self) -> String {
        self.bits
            .iter()
            .rev()
            .map(|bit| if *bit { '1' } else { '0' })
            .collect()
    }

    // =========================================================================
    // Crate-internal builders
    // =========================================================================

    /// Concatenate: `self` at its positions, `high` shifted by `self.width()`.
    pub(crate) fn concat(&self, high: &BitSet) -> BitSet {
        let mut bits = self.bits.clone();
        bits.extend_from_bitslice(&high.bits);
        BitSet { bits }
    }

    /// Copy widened to `width` with the new high positions cleared.
    pub(crate) fn widened(&self, width: usize) -> BitSet {
        debug_assert!(width >= self.width());
        let mut bits = self.bits.clone();
        bits.resize(width, false);
        BitSet { bits }
    }
}

impl Default for BitSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for BitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_binary_string())
    }
}

impl fmt::Debug for BitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitSet({:?}, width={})", self.to_binary_string(), self.width())
    }
}

impl FromStr for BitSet {
    type Err = OperationError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_binary_string(s)
    }
}
