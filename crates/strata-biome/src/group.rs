//! Composite biome groups, each a fixed set of labels.

use crate::label::Biome;

/// Named unions of biome labels used by world queries such as "is jungle".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BiomeGroup {
    BorealForest,
    TemperateForest,
    WarmTemperateForest,
    TropicalDryForest,
    Tundra,
    Iceland,
    Jungle,
    Savanna,
    HotDesert,
    ColdParklands,
    Steppe,
    CoolDesert,
    Chaparral,
}

impl BiomeGroup {
    /// Every group, in declaration order.
    pub const ALL: [BiomeGroup; 13] = [
        BiomeGroup::BorealForest,
        BiomeGroup::TemperateForest,
        BiomeGroup::WarmTemperateForest,
        BiomeGroup::TropicalDryForest,
        BiomeGroup::Tundra,
        BiomeGroup::Iceland,
        BiomeGroup::Jungle,
        BiomeGroup::Savanna,
        BiomeGroup::HotDesert,
        BiomeGroup::ColdParklands,
        BiomeGroup::Steppe,
        BiomeGroup::CoolDesert,
        BiomeGroup::Chaparral,
    ];

    /// The labels belonging to this group.
    pub fn members(self) -> &'static [Biome] {
        use Biome::*;
        match self {
            BiomeGroup::BorealForest => &[BorealMoistForest, BorealWetForest, BorealRainForest],
            BiomeGroup::TemperateForest => &[
                CoolTemperateMoistForest,
                CoolTemperateWetForest,
                CoolTemperateRainForest,
            ],
            BiomeGroup::WarmTemperateForest => &[
                WarmTemperateMoistForest,
                WarmTemperateWetForest,
                WarmTemperateRainForest,
            ],
            BiomeGroup::TropicalDryForest => &[SubtropicalDryForest, TropicalDryForest],
            BiomeGroup::Tundra => &[SubpolarMoistTundra, SubpolarWetTundra, SubpolarRainTundra],
            BiomeGroup::Iceland => &[Ice, PolarDesert],
            BiomeGroup::Jungle => &[
                SubtropicalMoistForest,
                SubtropicalWetForest,
                SubtropicalRainForest,
                TropicalMoistForest,
                TropicalWetForest,
                TropicalRainForest,
            ],
            BiomeGroup::Savanna => &[
                SubtropicalThornWoodland,
                TropicalThornWoodland,
                TropicalVeryDryForest,
            ],
            BiomeGroup::HotDesert => &[
                WarmTemperateDesert,
                WarmTemperateDesertScrub,
                SubtropicalDesert,
                SubtropicalDesertScrub,
                TropicalDesert,
                TropicalDesertScrub,
            ],
            BiomeGroup::ColdParklands => &[SubpolarDryTundra, BorealDesert, BorealDryScrub],
            BiomeGroup::Steppe => &[CoolTemperateSteppe],
            BiomeGroup::CoolDesert => &[CoolTemperateDesert, CoolTemperateDesertScrub],
            BiomeGroup::Chaparral => &[WarmTemperateThornScrub, WarmTemperateDryForest],
        }
    }

    /// Returns `true` if `biome` is a member of this group.
    pub fn contains(self, biome: Biome) -> bool {
        self.members().contains(&biome)
    }
}

impl Biome {
    /// Groups this label belongs to.
    pub fn groups(self) -> impl Iterator<Item = BiomeGroup> {
        BiomeGroup::ALL.into_iter().filter(move |g| g.contains(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jungle_members() {
        assert!(BiomeGroup::Jungle.contains(Biome::TropicalRainForest));
        assert!(BiomeGroup::Jungle.contains(Biome::SubtropicalMoistForest));
        assert!(!BiomeGroup::Jungle.contains(Biome::TropicalDryForest));
    }

    #[test]
    fn test_groups_are_disjoint() {
        for biome in Biome::ALL {
            assert!(biome.groups().count() <= 1, "{biome} is in several groups");
        }
    }

    #[test]
    fn test_unassigned_labels() {
        assert_eq!(Biome::Ocean.groups().count(), 0);
        assert_eq!(Biome::Sea.groups().count(), 0);
        assert_eq!(Biome::CoolTemperateSteppe.groups().next(), Some(BiomeGroup::Steppe));
    }
}
