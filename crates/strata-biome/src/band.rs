//! Climate bands that feed biome classification.

use std::fmt;

/// Temperature band, coldest first. Matches the seven bands of a world's
/// temperature thresholds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TemperatureBand {
    Polar,
    Alpine,
    Boreal,
    Cool,
    Warm,
    Subtropical,
    Tropical,
}

impl TemperatureBand {
    /// Every band, coldest first.
    pub const ALL: [TemperatureBand; 7] = [
        TemperatureBand::Polar,
        TemperatureBand::Alpine,
        TemperatureBand::Boreal,
        TemperatureBand::Cool,
        TemperatureBand::Warm,
        TemperatureBand::Subtropical,
        TemperatureBand::Tropical,
    ];

    /// Band for a threshold band index; indices past the end saturate to
    /// [`TemperatureBand::Tropical`].
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }

    /// Threshold label of the band.
    pub fn label(self) -> &'static str {
        match self {
            TemperatureBand::Polar => "polar",
            TemperatureBand::Alpine => "alpine",
            TemperatureBand::Boreal => "boreal",
            TemperatureBand::Cool => "cool",
            TemperatureBand::Warm => "warm",
            TemperatureBand::Subtropical => "subtropical",
            TemperatureBand::Tropical => "tropical",
        }
    }
}

/// Humidity band, driest first. Eight bands split by seven quantiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HumidityBand {
    Superarid,
    Perarid,
    Arid,
    Semiarid,
    Subhumid,
    Humid,
    Perhumid,
    Superhumid,
}

impl HumidityBand {
    /// Every band, driest first.
    pub const ALL: [HumidityBand; 8] = [
        HumidityBand::Superarid,
        HumidityBand::Perarid,
        HumidityBand::Arid,
        HumidityBand::Semiarid,
        HumidityBand::Subhumid,
        HumidityBand::Humid,
        HumidityBand::Perhumid,
        HumidityBand::Superhumid,
    ];

    /// Band for a quantile band index; indices past the end saturate to
    /// [`HumidityBand::Superhumid`].
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }

    /// Lowercase band name.
    pub fn label(self) -> &'static str {
        match self {
            HumidityBand::Superarid => "superarid",
            HumidityBand::Perarid => "perarid",
            HumidityBand::Arid => "arid",
            HumidityBand::Semiarid => "semiarid",
            HumidityBand::Subhumid => "subhumid",
            HumidityBand::Humid => "humid",
            HumidityBand::Perhumid => "perhumid",
            HumidityBand::Superhumid => "superhumid",
        }
    }
}

impl fmt::Display for TemperatureBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for HumidityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_index_saturates() {
        assert_eq!(TemperatureBand::from_index(0), TemperatureBand::Polar);
        assert_eq!(TemperatureBand::from_index(6), TemperatureBand::Tropical);
        assert_eq!(TemperatureBand::from_index(40), TemperatureBand::Tropical);
        assert_eq!(HumidityBand::from_index(3), HumidityBand::Semiarid);
        assert_eq!(HumidityBand::from_index(8), HumidityBand::Superhumid);
    }

    #[test]
    fn test_bands_ordered() {
        assert!(TemperatureBand::Polar < TemperatureBand::Tropical);
        assert!(HumidityBand::Arid < HumidityBand::Humid);
    }

    #[test]
    fn test_display_uses_label() {
        assert_eq!(TemperatureBand::Subtropical.to_string(), "subtropical");
        assert_eq!(HumidityBand::Perhumid.to_string(), "perhumid");
        let labels: Vec<_> = HumidityBand::ALL.iter().map(|b| b.label()).collect();
        assert_eq!(labels.first(), Some(&"superarid"));
        assert_eq!(labels.last(), Some(&"superhumid"));
    }
}
