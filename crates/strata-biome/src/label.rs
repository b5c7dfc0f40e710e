//! Biome labels and the label⇄code table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strata_grid::{Cell, ScalarKind};

/// Errors raised when a stored biome label or code is not in the taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BiomeError {
    /// No biome has this name.
    #[error("unknown biome name: {0}")]
    UnknownName(String),
    /// No biome has this code.
    #[error("unknown biome code: {0}")]
    UnknownCode(i64),
}

/// A biome label. The discriminant is the label's code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Biome {
    BorealDesert = 0,
    BorealDryScrub = 1,
    BorealMoistForest = 2,
    BorealRainForest = 3,
    BorealWetForest = 4,
    CoolTemperateDesert = 5,
    CoolTemperateDesertScrub = 6,
    CoolTemperateMoistForest = 7,
    CoolTemperateRainForest = 8,
    CoolTemperateSteppe = 9,
    CoolTemperateWetForest = 10,
    Ice = 11,
    Ocean = 12,
    PolarDesert = 13,
    Sea = 14,
    SubpolarDryTundra = 15,
    SubpolarMoistTundra = 16,
    SubpolarRainTundra = 17,
    SubpolarWetTundra = 18,
    SubtropicalDesert = 19,
    SubtropicalDesertScrub = 20,
    SubtropicalDryForest = 21,
    SubtropicalMoistForest = 22,
    SubtropicalRainForest = 23,
    SubtropicalThornWoodland = 24,
    SubtropicalWetForest = 25,
    TropicalDesert = 26,
    TropicalDesertScrub = 27,
    TropicalDryForest = 28,
    TropicalMoistForest = 29,
    TropicalRainForest = 30,
    TropicalThornWoodland = 31,
    TropicalVeryDryForest = 32,
    TropicalWetForest = 33,
    WarmTemperateDesert = 34,
    WarmTemperateDesertScrub = 35,
    WarmTemperateDryForest = 36,
    WarmTemperateMoistForest = 37,
    WarmTemperateRainForest = 38,
    WarmTemperateThornScrub = 39,
    WarmTemperateWetForest = 40,
}

impl Biome {
    /// Every biome, in code order.
    pub const ALL: [Biome; 41] = [
        Biome::BorealDesert,
        Biome::BorealDryScrub,
        Biome::BorealMoistForest,
        Biome::BorealRainForest,
        Biome::BorealWetForest,
        Biome::CoolTemperateDesert,
        Biome::CoolTemperateDesertScrub,
        Biome::CoolTemperateMoistForest,
        Biome::CoolTemperateRainForest,
        Biome::CoolTemperateSteppe,
        Biome::CoolTemperateWetForest,
        Biome::Ice,
        Biome::Ocean,
        Biome::PolarDesert,
        Biome::Sea,
        Biome::SubpolarDryTundra,
        Biome::SubpolarMoistTundra,
        Biome::SubpolarRainTundra,
        Biome::SubpolarWetTundra,
        Biome::SubtropicalDesert,
        Biome::SubtropicalDesertScrub,
        Biome::SubtropicalDryForest,
        Biome::SubtropicalMoistForest,
        Biome::SubtropicalRainForest,
        Biome::SubtropicalThornWoodland,
        Biome::SubtropicalWetForest,
        Biome::TropicalDesert,
        Biome::TropicalDesertScrub,
        Biome::TropicalDryForest,
        Biome::TropicalMoistForest,
        Biome::TropicalRainForest,
        Biome::TropicalThornWoodland,
        Biome::TropicalVeryDryForest,
        Biome::TropicalWetForest,
        Biome::WarmTemperateDesert,
        Biome::WarmTemperateDesertScrub,
        Biome::WarmTemperateDryForest,
        Biome::WarmTemperateMoistForest,
        Biome::WarmTemperateRainForest,
        Biome::WarmTemperateThornScrub,
        Biome::WarmTemperateWetForest,
    ];

    /// Lower-case display name, e.g. `"boreal moist forest"`.
    pub fn name(self) -> &'static str {
        match self {
            Biome::BorealDesert => "boreal desert",
            Biome::BorealDryScrub => "boreal dry scrub",
            Biome::BorealMoistForest => "boreal moist forest",
            Biome::BorealRainForest => "boreal rain forest",
            Biome::BorealWetForest => "boreal wet forest",
            Biome::CoolTemperateDesert => "cool temperate desert",
            Biome::CoolTemperateDesertScrub => "cool temperate desert scrub",
            Biome::CoolTemperateMoistForest => "cool temperate moist forest",
            Biome::CoolTemperateRainForest => "cool temperate rain forest",
            Biome::CoolTemperateSteppe => "cool temperate steppe",
            Biome::CoolTemperateWetForest => "cool temperate wet forest",
            Biome::Ice => "ice",
            Biome::Ocean => "ocean",
            Biome::PolarDesert => "polar desert",
            Biome::Sea => "sea",
            Biome::SubpolarDryTundra => "subpolar dry tundra",
            Biome::SubpolarMoistTundra => "subpolar moist tundra",
            Biome::SubpolarRainTundra => "subpolar rain tundra",
            Biome::SubpolarWetTundra => "subpolar wet tundra",
            Biome::SubtropicalDesert => "subtropical desert",
            Biome::SubtropicalDesertScrub => "subtropical desert scrub",
            Biome::SubtropicalDryForest => "subtropical dry forest",
            Biome::SubtropicalMoistForest => "subtropical moist forest",
            Biome::SubtropicalRainForest => "subtropical rain forest",
            Biome::SubtropicalThornWoodland => "subtropical thorn woodland",
            Biome::SubtropicalWetForest => "subtropical wet forest",
            Biome::TropicalDesert => "tropical desert",
            Biome::TropicalDesertScrub => "tropical desert scrub",
            Biome::TropicalDryForest => "tropical dry forest",
            Biome::TropicalMoistForest => "tropical moist forest",
            Biome::TropicalRainForest => "tropical rain forest",
            Biome::TropicalThornWoodland => "tropical thorn woodland",
            Biome::TropicalVeryDryForest => "tropical very dry forest",
            Biome::TropicalWetForest => "tropical wet forest",
            Biome::WarmTemperateDesert => "warm temperate desert",
            Biome::WarmTemperateDesertScrub => "warm temperate desert scrub",
            Biome::WarmTemperateDryForest => "warm temperate dry forest",
            Biome::WarmTemperateMoistForest => "warm temperate moist forest",
            Biome::WarmTemperateRainForest => "warm temperate rain forest",
            Biome::WarmTemperateThornScrub => "warm temperate thorn scrub",
            Biome::WarmTemperateWetForest => "warm temperate wet forest",
        }
    }

    /// Looks a biome up by its display name.
    pub fn from_name(name: &str) -> Result<Self, BiomeError> {
        Self::ALL
            .iter()
            .copied()
            .find(|b| b.name() == name)
            .ok_or_else(|| BiomeError::UnknownName(name.to_string()))
    }

    /// Integer code stored in world files.
    pub fn code(self) -> i32 {
        i32::from(self as u8)
    }

    /// Inverse of [`Biome::code`].
    pub fn from_code(code: i64) -> Result<Self, BiomeError> {
        usize::try_from(code)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or(BiomeError::UnknownCode(code))
    }
}

impl fmt::Display for Biome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Biome {
    type Err = BiomeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl Cell for Biome {
    const KIND: ScalarKind = ScalarKind::Category;

    fn to_real(self) -> Option<f64> {
        None
    }

    fn from_real(_value: f64) -> Option<Self> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_follow_table_order() {
        for (i, biome) in Biome::ALL.iter().enumerate() {
            assert_eq!(biome.code(), i as i32);
            assert_eq!(Biome::from_code(i as i64), Ok(*biome));
        }
    }

    #[test]
    fn test_names_sorted_and_unique() {
        let names: Vec<&str> = Biome::ALL.iter().map(|b| b.name()).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_name_lookup() {
        assert_eq!(Biome::from_name("tropical very dry forest"), Ok(Biome::TropicalVeryDryForest));
        assert_eq!("ice".parse::<Biome>(), Ok(Biome::Ice));
        assert_eq!(
            Biome::from_name("lava field"),
            Err(BiomeError::UnknownName("lava field".into()))
        );
        assert_eq!(Biome::BorealDryScrub.to_string(), "boreal dry scrub");
    }

    #[test]
    fn test_unknown_code() {
        assert_eq!(Biome::from_code(-1), Err(BiomeError::UnknownCode(-1)));
        assert_eq!(
            Biome::from_code(Biome::ALL.len() as i64),
            Err(BiomeError::UnknownCode(Biome::ALL.len() as i64))
        );
    }

    #[test]
    fn test_category_kind() {
        assert_eq!(Biome::KIND, ScalarKind::Category);
        assert_eq!(Biome::Ocean.to_real(), None);
    }
}
