use std::fmt;
use std::str::FromStr;

use crate::error::FixtureError;

/// Specific (language plus region) culture tags the default catalog draws from. Several cultures
/// share a region, so regions spoken in more languages are drawn more often.
pub const SPECIFIC_CULTURES: &[&str] = &[
    "af-ZA", "am-ET", "ar-AE", "ar-BH", "ar-DZ", "ar-EG", "ar-IQ", "ar-JO", "ar-KW", "ar-LB",
    "ar-LY", "ar-MA", "ar-OM", "ar-QA", "ar-SA", "ar-SY", "ar-TN", "ar-YE", "az-Latn-AZ",
    "be-BY", "bg-BG", "bn-BD", "bn-IN", "bs-Latn-BA", "ca-ES", "cs-CZ", "cy-GB", "da-DK",
    "de-AT", "de-CH", "de-DE", "de-LI", "de-LU", "el-GR", "en-AU", "en-CA", "en-GB", "en-IE",
    "en-IN", "en-JM", "en-MT", "en-MY", "en-NZ", "en-PH", "en-SG", "en-US", "en-ZA", "en-ZW",
    "es-AR", "es-BO", "es-CL", "es-CO", "es-CR", "es-DO", "es-EC", "es-ES", "es-GT", "es-HN",
    "es-MX", "es-NI", "es-PA", "es-PE", "es-PR", "es-PY", "es-SV", "es-US", "es-UY", "es-VE",
    "et-EE", "eu-ES", "fa-IR", "fi-FI", "fil-PH", "fo-FO", "fr-BE", "fr-CA", "fr-CH", "fr-FR",
    "fr-LU", "fr-MC", "fy-NL", "ga-IE", "gl-ES", "gsw-FR", "he-IL", "hi-IN", "hr-BA", "hr-HR",
    "hu-HU", "hy-AM", "id-ID", "is-IS", "it-CH", "it-IT", "ja-JP", "ka-GE", "kk-KZ", "km-KH",
    "ko-KR", "ky-KG", "lb-LU", "lo-LA", "lt-LT", "lv-LV", "mk-MK", "mn-MN", "ms-BN", "ms-MY",
    "mt-MT", "nb-NO", "ne-NP", "nl-BE", "nl-NL", "nn-NO", "pl-PL", "pt-BR", "pt-PT", "rm-CH",
    "ro-RO", "ru-RU", "se-FI", "se-NO", "se-SE", "si-LK", "sk-SK", "sl-SI", "sq-AL",
    "sr-Cyrl-RS", "sr-Latn-ME", "sr-Latn-RS", "sv-FI", "sv-SE", "sw-KE", "ta-IN", "th-TH",
    "tk-TM", "tr-TR", "uk-UA", "ur-PK", "uz-Latn-UZ", "vi-VN", "zh-CN", "zh-HK", "zh-MO",
    "zh-SG", "zh-TW",
];

/// An ISO 3166 two-letter region code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionCode([u8; 2]);

impl RegionCode {
    #[must_use]
    pub fn as_bytes(self) -> [u8; 2] {
        self.0
    }
}

impl TryFrom<&str> for RegionCode {
    type Error = FixtureError;
    fn try_from(code: &str) -> Result<Self, Self::Error> {
        match code.as_bytes() {
            &[first, second] if first.is_ascii_uppercase() && second.is_ascii_uppercase() => {
                Ok(RegionCode([first, second]))
            }
            _ => Err(FixtureError::InvalidRegionCode(code.to_owned())),
        }
    }
}

impl FromStr for RegionCode {
    type Err = FixtureError;
    fn from_str(code: &str) -> Result<Self, Self::Err> {
        RegionCode::try_from(code)
    }
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", char::from(self.0[0]), char::from(self.0[1]))
    }
}

/// A catalog that visited countries are drawn from, one uniformly random entry at a time.
pub trait RegionCodeProvider {
    fn len(&self) -> usize;

    /// # Errors
    /// Errors when `index` is out of range or the entry does not resolve to a region code
    fn region_at(&self, index: usize) -> Result<RegionCode, FixtureError>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Resolves culture tags to the region named by their last subtag.
#[derive(Debug, Clone, Copy)]
pub struct SpecificCultures<'a> {
    cultures: &'a [&'a str],
}

impl<'a> SpecificCultures<'a> {
    #[must_use]
    pub fn new(cultures: &'a [&'a str]) -> Self {
        SpecificCultures { cultures }
    }
}

impl Default for SpecificCultures<'static> {
    fn default() -> Self {
        SpecificCultures::new(SPECIFIC_CULTURES)
    }
}

impl RegionCodeProvider for SpecificCultures<'_> {
    fn len(&self) -> usize {
        self.cultures.len()
    }

    fn region_at(&self, index: usize) -> Result<RegionCode, FixtureError> {
        let culture = self
            .cultures
            .get(index)
            .ok_or(FixtureError::RegionIndexOutOfRange(index))?;
        culture
            .rsplit('-')
            .next()
            .filter(|region| *region != *culture)
            .ok_or_else(|| FixtureError::InvalidRegionCode((*culture).to_owned()))
            .and_then(RegionCode::try_from)
    }
}

/// A fixed list of region codes, for callers that should not depend on the culture table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedRegions(Vec<RegionCode>);

impl FixedRegions {
    #[must_use]
    pub fn new(codes: Vec<RegionCode>) -> Self {
        FixedRegions(codes)
    }
}

impl From<Vec<RegionCode>> for FixedRegions {
    fn from(codes: Vec<RegionCode>) -> Self {
        FixedRegions::new(codes)
    }
}

impl RegionCodeProvider for FixedRegions {
    fn len(&self) -> usize {
        self.0.len()
    }

    fn region_at(&self, index: usize) -> Result<RegionCode, FixtureError> {
        self.0
            .get(index)
            .copied()
            .ok_or(FixtureError::RegionIndexOutOfRange(index))
    }
}
