//! Tests for BitSet construction, inspection and equality.

use proptest::prelude::*;
use rand::SeedableRng;
use vorax::{BitSet, OperationError};

// =============================================================================
// Construction
// =============================================================================

#[test]
fn test_from_value() {
    let bs = BitSet::from_value(0b1111_1111, 8).unwrap();
    assert_eq!(bs.width(), 8);
    assert_eq!(bs.population(), 8);
    assert_eq!(bs.to_value(), Some(0xFF));
}

#[test]
fn test_from_value_zero_width() {
    assert!(matches!(
        BitSet::from_value(5, 0),
        Err(OperationError::InvalidWidth { width: 0, .. })
    ));
}

#[test]
fn test_from_value_too_wide() {
    assert!(matches!(
        BitSet::from_value(5, 65),
        Err(OperationError::InvalidWidth {
            width: 65,
            min: 1,
            max: 64
        })
    ));
}

#[test]
fn test_from_value_rejects_truncation() {
    assert!(matches!(
        BitSet::from_value(0b111, 2),
        Err(OperationError::ValueExceedsWidth { .. })
    ));
}

#[test]
fn test_from_binary_string() {
    let bs = BitSet::from_binary_string("1010").unwrap();
    assert_eq!(bs.width(), 4);
    assert_eq!(bs.population(), 2);
    assert_eq!(bs, BitSet::from_value(0b1010, 4).unwrap());
}

#[test]
fn test_from_binary_string_invalid_character() {
    assert!(matches!(
        BitSet::from_binary_string("102"),
        Err(OperationError::InvalidCharacter {
            character: '2',
            index: 2
        })
    ));
}

#[test]
fn test_from_binary_string_empty() {
    assert!(matches!(
        BitSet::from_binary_string(""),
        Err(OperationError::InvalidWidth { width: 0, .. })
    ));
}

#[test]
fn test_from_binary_string_limits() {
    let s64 = "1".repeat(64);
    assert_eq!(BitSet::from_binary_string(&s64).unwrap().population(), 64);

    let s65 = "1".repeat(65);
    assert!(BitSet::from_binary_string(&s65).is_err());
    assert_eq!(
        BitSet::from_binary_string_with_limit(&s65, 128)
            .unwrap()
            .width(),
        65
    );
}

#[test]
fn test_from_positions_out_of_range() {
    assert!(matches!(
        BitSet::from_positions(8, &[1, 8]),
        Err(OperationError::IndexOutOfRange { index: 8, width: 8 })
    ));
}

#[test]
fn test_from_positions_beyond_fixed_profile() {
    let bs = BitSet::from_positions(1000, &[0, 999]).unwrap();
    assert_eq!(bs.width(), 1000);
    assert_eq!(bs.population(), 2);
    assert_eq!(bs.active_positions(), vec![0, 999]);
    assert_eq!(bs.to_value(), None);
}

#[test]
fn test_random_is_deterministic_per_seed() {
    let mut rng0 = rand::rngs::StdRng::seed_from_u64(7);
    let mut rng1 = rand::rngs::StdRng::seed_from_u64(7);
    assert_eq!(
        BitSet::random(64, 20, &mut rng0),
        BitSet::random(64, 20, &mut rng1)
    );
}

// =============================================================================
// Inspection
// =============================================================================

#[test]
fn test_bit_at() {
    let bs = BitSet::from_binary_string("100").unwrap();
    assert!(!bs.bit_at(0).unwrap());
    assert!(!bs.bit_at(1).unwrap());
    assert!(bs.bit_at(2).unwrap());
}

#[test]
fn test_bit_at_out_of_range() {
    let bs = BitSet::from_binary_string("100").unwrap();
    assert!(matches!(
        bs.bit_at(3),
        Err(OperationError::IndexOutOfRange { index: 3, width: 3 })
    ));
    assert!(BitSet::empty().bit_at(0).is_err());
}

#[test]
fn test_active_positions() {
    let bs = BitSet::from_value(0b1001_0110, 8).unwrap();
    assert_eq!(bs.active_positions(), vec![1, 2, 4, 7]);
}

#[test]
fn test_equality_requires_same_width() {
    let a = BitSet::from_binary_string("01").unwrap();
    let b = BitSet::from_binary_string("001").unwrap();
    assert_eq!(a.population(), b.population());
    assert_ne!(a, b);
}

#[test]
fn test_serde_round_trip() {
    let bs = BitSet::from_binary_string("110010").unwrap();
    let json = serde_json::to_string(&bs).unwrap();
    let restored: BitSet = serde_json::from_str(&json).unwrap();
    assert_eq!(bs, restored);
}

// =============================================================================
// Property-Based Tests
// =============================================================================

proptest! {
    #[test]
    fn prop_binary_string_round_trip(s in "[01]{1,64}") {
        let bs = BitSet::from_binary_string(&s).unwrap();
        prop_assert_eq!(bs.width(), s.len());

        let read_back: String = (0..bs.width())
            .rev()
            .map(|i| if bs.bit_at(i).unwrap() { '1' } else { '0' })
            .collect();
        prop_assert_eq!(&read_back, &s);
        prop_assert_eq!(bs.to_binary_string(), s);
    }

    #[test]
    fn prop_population_bounded_by_width(value in any::<u64>(), width in 1..=64usize) {
        let masked = if width == 64 { value } else { value & ((1u64 << width) - 1) };
        let bs = BitSet::from_value(masked, width).unwrap();
        prop_assert!(bs.population() <= bs.width());
        prop_assert_eq!(bs.population(), masked.count_ones() as usize);
        prop_assert_eq!(bs.to_value(), Some(masked));
    }

    #[test]
    fn prop_value_and_string_agree(value in any::<u64>()) {
        let from_value = BitSet::from_value(value, 64).unwrap();
        let from_string = BitSet::from_binary_string(&format!("{:064b}", value)).unwrap();
        prop_assert_eq!(from_value, from_string);
    }

    #[test]
    fn prop_random_population(width in 0..200usize, num in 0..200usize, seed in any::<u64>()) {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        let bs = BitSet::random(width, num, &mut rng);
        prop_assert_eq!(bs.width(), width);
        prop_assert_eq!(bs.population(), num.min(width));
    }
}
