//! Biome classification from climate bands.

use crate::band::{HumidityBand, TemperatureBand};
use crate::label::Biome;

/// Climate of a single cell, as seen by a classifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClimateSample {
    /// Cell is under water.
    pub ocean: bool,
    /// Temperature band of the cell.
    pub temperature: TemperatureBand,
    /// Humidity band of the cell.
    pub humidity: HumidityBand,
}

/// Maps a cell's climate to a biome label.
pub trait BiomeClassifier: Send + Sync {
    /// Label for one cell.
    fn classify(&self, sample: &ClimateSample) -> Biome;
}

/// Holdridge life-zone lookup: temperature picks the row, humidity the
/// column. Ocean cells are always [`Biome::Ocean`].
#[derive(Clone, Copy, Debug, Default)]
pub struct HoldridgeClassifier;

impl BiomeClassifier for HoldridgeClassifier {
    fn classify(&self, sample: &ClimateSample) -> Biome {
        use Biome::*;
        use HumidityBand as H;

        if sample.ocean {
            return Ocean;
        }
        let h = sample.humidity;
        match sample.temperature {
            TemperatureBand::Polar => match h {
                H::Superarid => PolarDesert,
                _ => Ice,
            },
            TemperatureBand::Alpine => match h {
                H::Superarid => SubpolarDryTundra,
                H::Perarid => SubpolarMoistTundra,
                H::Arid => SubpolarWetTundra,
                _ => SubpolarRainTundra,
            },
            TemperatureBand::Boreal => match h {
                H::Superarid => BorealDesert,
                H::Perarid => BorealDryScrub,
                H::Arid => BorealMoistForest,
                H::Semiarid => BorealWetForest,
                _ => BorealRainForest,
            },
            TemperatureBand::Cool => match h {
                H::Superarid => CoolTemperateDesert,
                H::Perarid => CoolTemperateDesertScrub,
                H::Arid => CoolTemperateSteppe,
                H::Semiarid => CoolTemperateMoistForest,
                H::Subhumid => CoolTemperateWetForest,
                _ => CoolTemperateRainForest,
            },
            TemperatureBand::Warm => match h {
                H::Superarid => WarmTemperateDesert,
                H::Perarid => WarmTemperateDesertScrub,
                H::Arid => WarmTemperateThornScrub,
                H::Semiarid => WarmTemperateDryForest,
                H::Subhumid => WarmTemperateMoistForest,
                H::Humid => WarmTemperateWetForest,
                _ => WarmTemperateRainForest,
            },
            TemperatureBand::Subtropical => match h {
                H::Superarid => SubtropicalDesert,
                H::Perarid => SubtropicalDesertScrub,
                H::Arid => SubtropicalThornWoodland,
                H::Semiarid => SubtropicalDryForest,
                H::Subhumid => SubtropicalMoistForest,
                H::Humid => SubtropicalWetForest,
                _ => SubtropicalRainForest,
            },
            TemperatureBand::Tropical => match h {
                H::Superarid => TropicalDesert,
                H::Perarid => TropicalDesertScrub,
                H::Arid => TropicalThornWoodland,
                H::Semiarid => TropicalVeryDryForest,
                H::Subhumid => TropicalDryForest,
                H::Humid => TropicalMoistForest,
                H::Perhumid => TropicalWetForest,
                H::Superhumid => TropicalRainForest,
            },
        }
    }
}
