use log::trace;

use crate::error::FixtureError;
use crate::random::RandomSource;
use crate::region::{RegionCode, RegionCodeProvider};

pub const KEY_DATA_LEN: usize = 16;
pub const VISITED_COUNTRY_COUNT: usize = 10;
/// Origin written into every row, never randomized.
pub const ORIGIN: &str = "DE";
/// Report type written into every row. Unlike the other integers it is encoded big-endian.
pub const REPORT_TYPE: i32 = 1;
pub const DAYS_SINCE_ONSET_MIN: i32 = -50;
pub const DAYS_SINCE_ONSET_MAX: i32 = 49;

/// One synthetic diagnosis key. The origin and report type are the constants [`ORIGIN`] and
/// [`REPORT_TYPE`] and so are not stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosisKeyFixture {
    pub key_data: [u8; KEY_DATA_LEN],
    pub rolling_start_interval_number: u32,
    pub rolling_period: u32,
    pub transmission_risk_level: i32,
    pub visited_countries: Vec<RegionCode>,
    pub days_since_onset_of_symptoms: i32,
}

/// Draws the fields of a [`DiagnosisKeyFixture`] from a random source and a region catalog.
#[derive(Debug, Clone, Default)]
pub struct FixtureGenerator<P> {
    regions: P,
}

impl<P: RegionCodeProvider> FixtureGenerator<P> {
    #[must_use]
    pub fn new(regions: P) -> Self {
        FixtureGenerator { regions }
    }

    /// Draws one fixture. The rolling interval fields take the bit pattern of a non-negative
    /// `i32` without any range check.
    ///
    /// # Errors
    /// Errors when the region catalog is empty or one of its entries has no region code
    pub fn generate<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<DiagnosisKeyFixture, FixtureError> {
        let key_data = rng.next_bytes::<KEY_DATA_LEN>();
        let rolling_start_interval_number = reinterpret_unsigned(rng.next_int());
        let rolling_period = reinterpret_unsigned(rng.next_int());
        let transmission_risk_level = rng.next_int();
        let visited_countries = (0..VISITED_COUNTRY_COUNT)
            .map(|_| self.pick_region(rng))
            .collect::<Result<Vec<_>, _>>()?;
        let days_since_onset_of_symptoms =
            rng.next_int_between(DAYS_SINCE_ONSET_MIN, DAYS_SINCE_ONSET_MAX + 1)?;

        Ok(DiagnosisKeyFixture {
            key_data,
            rolling_start_interval_number,
            rolling_period,
            transmission_risk_level,
            visited_countries,
            days_since_onset_of_symptoms,
        })
    }

    fn pick_region<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Result<RegionCode, FixtureError> {
        if self.regions.is_empty() {
            return Err(FixtureError::EmptyRegionCatalog);
        }
        let bound = i32::try_from(self.regions.len())
            .map_err(|_| FixtureError::RegionCatalogTooLarge(self.regions.len()))?;
        let index = rng.next_int_below(bound)?;
        let index = usize::try_from(index).map_err(|_| FixtureError::EmptyRegionCatalog)?;
        let region = self.regions.region_at(index)?;
        trace!("Picked region {} from catalog entry {}", region, index);
        Ok(region)
    }
}

fn reinterpret_unsigned(value: i32) -> u32 {
    u32::from_ne_bytes(value.to_ne_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::rng_from_seed;
    use crate::region::{FixedRegions, SpecificCultures};

    #[test]
    fn test_generate_ranges() {
        let generator = FixtureGenerator::new(SpecificCultures::default());
        let mut rng = rng_from_seed(Some(1));
        for _ in 0..2_000 {
            let fixture = generator.generate(&mut rng).unwrap();
            assert_eq!(fixture.visited_countries.len(), VISITED_COUNTRY_COUNT);
            assert!((DAYS_SINCE_ONSET_MIN..=DAYS_SINCE_ONSET_MAX)
                .contains(&fixture.days_since_onset_of_symptoms));
            assert!(fixture.rolling_start_interval_number < 0x8000_0000);
            assert!(fixture.rolling_period < 0x8000_0000);
            assert!(fixture.transmission_risk_level >= 0);
        }
    }

    #[test]
    fn test_generate_draws_from_catalog() {
        let only = RegionCode::try_from("NL").unwrap();
        let generator = FixtureGenerator::new(FixedRegions::new(vec![only]));
        let mut rng = rng_from_seed(Some(2));
        let fixture = generator.generate(&mut rng).unwrap();
        assert_eq!(fixture.visited_countries, vec![only; VISITED_COUNTRY_COUNT]);
    }

    #[test]
    fn test_generate_empty_catalog() {
        let generator = FixtureGenerator::new(FixedRegions::default());
        let mut rng = rng_from_seed(Some(3));
        assert!(matches!(
            generator.generate(&mut rng),
            Err(FixtureError::EmptyRegionCatalog)
        ));
    }

    struct OversizedCatalog;

    impl RegionCodeProvider for OversizedCatalog {
        fn len(&self) -> usize {
            usize::try_from(i32::MAX).unwrap() + 1
        }

        fn region_at(&self, _index: usize) -> Result<RegionCode, FixtureError> {
            RegionCode::try_from("DE")
        }
    }

    #[test]
    fn test_generate_oversized_catalog() {
        let generator = FixtureGenerator::new(OversizedCatalog);
        let mut rng = rng_from_seed(Some(4));
        assert!(matches!(
            generator.generate(&mut rng),
            Err(FixtureError::RegionCatalogTooLarge(len)) if len == 1 << 31
        ));
    }

    #[test]
    fn test_reinterpret_unsigned() {
        assert_eq!(reinterpret_unsigned(0), 0);
        assert_eq!(reinterpret_unsigned(i32::MAX), 0x7FFF_FFFF);
        assert_eq!(reinterpret_unsigned(-1), u32::MAX);
    }
}
