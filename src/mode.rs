//! Palette-reduction strategy selector.

use std::fmt;

/// Which strategy the sampler runs. Unrecognized names parse to
/// [`SampleMode::Unknown`], which the sampler refuses to execute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SampleMode {
    Quantize,
    KmeansRandomSpread,
    KmeansStaticSpread,
    KmeansHueSpread,
    KmeansBrightHueSpread,
    KmeansSaturatedHueSpread,
    Unknown,
}

impl SampleMode {
    /// Every executable mode, in the order they are listed to users.
    pub const VALID: [SampleMode; 6] = [
        SampleMode::Quantize,
        SampleMode::KmeansRandomSpread,
        SampleMode::KmeansStaticSpread,
        SampleMode::KmeansHueSpread,
        SampleMode::KmeansBrightHueSpread,
        SampleMode::KmeansSaturatedHueSpread,
    ];

    /// Exact, case-sensitive match on the hyphenated name.
    pub fn parse(name: &str) -> Self {
        Self::VALID
            .into_iter()
            .find(|mode| mode.as_str() == name)
            .unwrap_or(SampleMode::Unknown)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SampleMode::Quantize => "quantize",
            SampleMode::KmeansRandomSpread => "kmeans-random-spread",
            SampleMode::KmeansStaticSpread => "kmeans-static-spread",
            SampleMode::KmeansHueSpread => "kmeans-hue-spread",
            SampleMode::KmeansBrightHueSpread => "kmeans-bright-hue-spread",
            SampleMode::KmeansSaturatedHueSpread => "kmeans-saturated-hue-spread",
            SampleMode::Unknown => "unknown",
        }
    }

    pub fn is_valid(&self) -> bool {
        *self != SampleMode::Unknown
    }
}

impl From<&str> for SampleMode {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}

impl fmt::Display for SampleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for mode in SampleMode::VALID {
            assert_eq!(SampleMode::parse(mode.as_str()), mode);
            assert!(mode.is_valid());
        }
    }

    #[test]
    fn unknown_names_never_default_to_a_mode() {
        assert_eq!(SampleMode::parse("bogus-mode"), SampleMode::Unknown);
        assert_eq!(SampleMode::parse("Quantize"), SampleMode::Unknown);
        assert_eq!(SampleMode::parse("kmeans_hue_spread"), SampleMode::Unknown);
        assert_eq!(SampleMode::parse(""), SampleMode::Unknown);
        // The sentinel's own name is not executable either.
        assert_eq!(SampleMode::parse("unknown"), SampleMode::Unknown);
        assert!(!SampleMode::Unknown.is_valid());
    }
}
