//! Sources for the issuance sequence digit drawn during NSS generation.

use uuid::Uuid;

/// Supplies one decimal digit per call.
///
/// Generation takes the source as a parameter so callers decide between
/// random and reproducible digits.
pub trait SequenceSource: Send {
    /// Returns the next digit, `0..=9`.
    fn next_digit(&mut self) -> u8;
}

/// Draws digits from version 4 UUID randomness.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidSequenceSource;

impl SequenceSource for UuidSequenceSource {
    fn next_digit(&mut self) -> u8 {
        (Uuid::new_v4().as_u128() % 10) as u8
    }
}

/// Replays a fixed list of digits, cycling when exhausted.
///
/// # Example
///
/// ```
/// use nomina_engine::calculation::{FixedSequence, SequenceSource};
///
/// let mut source = FixedSequence::new(vec![3, 7]);
/// assert_eq!(source.next_digit(), 3);
/// assert_eq!(source.next_digit(), 7);
/// assert_eq!(source.next_digit(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FixedSequence {
    digits: Vec<u8>,
    position: usize,
}

impl FixedSequence {
    /// Creates a source that replays `digits`. Values above 9 are reduced
    /// modulo 10; an empty list always yields 0.
    pub fn new(digits: Vec<u8>) -> Self {
        Self {
            digits: digits.into_iter().map(|d| d % 10).collect(),
            position: 0,
        }
    }
}

impl SequenceSource for FixedSequence {
    fn next_digit(&mut self) -> u8 {
        if self.digits.is_empty() {
            return 0;
        }
        let digit = self.digits[self.position % self.digits.len()];
        self.position = (self.position + 1) % self.digits.len();
        digit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_source_yields_digits() {
        let mut source = UuidSequenceSource;
        for _ in 0..200 {
            assert!(source.next_digit() <= 9);
        }
    }

    #[test]
    fn test_fixed_sequence_cycles() {
        let mut source = FixedSequence::new(vec![1, 2, 3]);
        let drawn: Vec<u8> = (0..7).map(|_| source.next_digit()).collect();
        assert_eq!(drawn, vec![1, 2, 3, 1, 2, 3, 1]);
    }

    #[test]
    fn test_fixed_sequence_reduces_and_defaults() {
        let mut reduced = FixedSequence::new(vec![12]);
        assert_eq!(reduced.next_digit(), 2);

        let mut empty = FixedSequence::default();
        assert_eq!(empty.next_digit(), 0);
    }
}
