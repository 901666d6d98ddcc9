use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::FixtureError;

/// The draws the field generator makes, expressed over any [`Rng`].
///
/// `next_int` never yields `i32::MAX`, matching the non-negative integer source the fixture
/// format was first produced with.
pub trait RandomSource: Rng {
    fn next_bytes<const N: usize>(&mut self) -> [u8; N] {
        let mut bytes = [0_u8; N];
        self.fill_bytes(&mut bytes);
        bytes
    }

    fn next_int(&mut self) -> i32 {
        self.gen_range(0..i32::MAX)
    }

    /// # Errors
    /// Errors when `bound` is not positive
    fn next_int_below(&mut self, bound: i32) -> Result<i32, FixtureError> {
        self.next_int_between(0, bound)
    }

    /// # Errors
    /// Errors when `min..max_exclusive` is empty
    fn next_int_between(&mut self, min: i32, max_exclusive: i32) -> Result<i32, FixtureError> {
        if min >= max_exclusive {
            return Err(FixtureError::EmptyRange { min, max_exclusive });
        }
        Ok(self.gen_range(min..max_exclusive))
    }
}

impl<R: Rng + ?Sized> RandomSource for R {}

/// A seeded generator when `seed` is given, otherwise one seeded from OS entropy.
#[must_use]
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_int_is_non_negative() {
        let mut rng = rng_from_seed(Some(7));
        for _ in 0..10_000 {
            let value = rng.next_int();
            assert!((0..i32::MAX).contains(&value));
        }
    }

    #[test]
    fn test_next_int_between() {
        let mut rng = rng_from_seed(Some(7));
        for _ in 0..10_000 {
            let value = rng.next_int_between(-50, 50).unwrap();
            assert!((-50..=49).contains(&value));
        }
        assert!(matches!(
            rng.next_int_between(3, 3),
            Err(FixtureError::EmptyRange {
                min: 3,
                max_exclusive: 3
            })
        ));
    }

    #[test]
    fn test_next_int_below() {
        let mut rng = rng_from_seed(Some(7));
        assert_eq!(rng.next_int_below(1).unwrap(), 0);
        assert!(rng.next_int_below(0).is_err());
        assert!(rng.next_int_below(-4).is_err());
    }

    #[test]
    fn test_seeded_sources_repeat() {
        let mut first = rng_from_seed(Some(42));
        let mut second = rng_from_seed(Some(42));
        assert_eq!(first.next_bytes::<16>(), second.next_bytes::<16>());
        assert_eq!(first.next_int(), second.next_int());
    }
}
