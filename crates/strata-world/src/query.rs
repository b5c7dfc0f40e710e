//! Read-only classification and neighbourhood queries on a [`World`].
//!
//! Queries take `(x, y)` with `x < width`, `y < height` and panic on
//! coordinates outside the world. A query against a layer the world does not
//! have panics with the layer's name.

use rand::Rng;
use rustc_hash::FxHashSet;
use strata_biome::{Biome, BiomeClassifier, BiomeGroup, ClimateSample, HumidityBand, TemperatureBand};
use strata_grid::{Grid, Layer};

use crate::world::{World, required};

/// Three-band level used by permeability and precipitation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Level {
    /// Below the `low` bound.
    Low,
    /// Between the `low` and `med` bounds.
    Med,
    /// At or above the `med` bound.
    High,
}

impl Level {
    fn from_index(index: usize) -> Self {
        match index {
            0 => Level::Low,
            1 => Level::Med,
            _ => Level::High,
        }
    }
}

/// Upper bound of `label` in the layer's thresholds; NaN if the band is
/// missing, which validated layouts rule out.
fn boundary(layer: &Layer<f64>, label: &str) -> f64 {
    layer
        .thresholds
        .as_ref()
        .and_then(|t| t.boundary(label))
        .unwrap_or(f64::NAN)
}

impl World {
    /// Returns `true` if the signed coordinate lies inside the world.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as u64) < self.width() as u64 && (y as u64) < self.height() as u64
    }

    // Land / ocean

    /// Whether the cell is under water.
    ///
    /// # Panics
    ///
    /// Panics if the world has no ocean layer.
    pub fn is_ocean(&self, x: usize, y: usize) -> bool {
        required(&self.ocean, "ocean").value(x, y)
    }

    /// Negation of [`World::is_ocean`].
    pub fn is_land(&self, x: usize, y: usize) -> bool {
        !self.is_ocean(x, y)
    }

    /// A uniformly chosen land cell, or `None` when the world is all ocean.
    pub fn random_land<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<(usize, usize)> {
        let ocean = &required(&self.ocean, "ocean").data;
        let land = ocean.iter().filter(|&&o| !o).count();
        if land == 0 {
            return None;
        }
        let pick = rng.random_range(0..land);
        let (index, _) = ocean.iter().enumerate().filter(|(_, o)| !**o).nth(pick)?;
        Some((index % self.width(), index / self.width()))
    }

    /// Upper bound of the `sea` band.
    pub fn sea_level(&self) -> f64 {
        let elevation = required(&self.elevation, "elevation");
        boundary(elevation, "sea")
    }

    // Elevation

    /// Raw elevation of a cell.
    pub fn elevation_at(&self, x: usize, y: usize) -> f64 {
        required(&self.elevation, "elevation").value(x, y)
    }

    /// Lowest elevation, ignoring NaN.
    pub fn min_elevation(&self) -> f64 {
        required(&self.elevation, "elevation").data.min()
    }

    /// Highest elevation, ignoring NaN.
    pub fn max_elevation(&self) -> f64 {
        required(&self.elevation, "elevation").data.max()
    }

    /// Elevation above which land counts as mountain: the upper bound of the
    /// `hill` band, or of the `plain` band when there is no hill band.
    pub fn mountain_threshold(&self) -> f64 {
        let elevation = required(&self.elevation, "elevation");
        let table = elevation.thresholds.as_ref();
        match table.and_then(|t| t.boundary("hill")) {
            Some(hill) => hill,
            None => boundary(elevation, "plain"),
        }
    }

    /// Lower edge of the hill range: the `plain` bound with a hill band,
    /// otherwise the `sea` bound.
    fn hill_floor(&self) -> f64 {
        let elevation = required(&self.elevation, "elevation");
        let has_hill = elevation
            .thresholds
            .as_ref()
            .is_some_and(|t| t.position("hill").is_some());
        let label = if has_hill { "plain" } else { "sea" };
        boundary(elevation, label)
    }

    /// Land above [`World::mountain_threshold`].
    pub fn is_mountain(&self, x: usize, y: usize) -> bool {
        self.is_land(x, y) && self.elevation_at(x, y) > self.mountain_threshold()
    }

    /// Mountain less than 2.0 above the mountain threshold.
    pub fn is_low_mountain(&self, x: usize, y: usize) -> bool {
        self.is_mountain(x, y) && self.elevation_at(x, y) < self.mountain_threshold() + 2.0
    }

    /// Mountain more than 4.0 above the mountain threshold.
    pub fn is_high_mountain(&self, x: usize, y: usize) -> bool {
        self.is_mountain(x, y) && self.elevation_at(x, y) > self.mountain_threshold() + 4.0
    }

    /// Height above the mountain threshold; 0 for ocean and non-mountain cells.
    pub fn level_of_mountain(&self, x: usize, y: usize) -> f64 {
        if self.is_ocean(x, y) {
            return 0.0;
        }
        let threshold = self.mountain_threshold();
        let e = self.elevation_at(x, y);
        if e <= threshold { 0.0 } else { e - threshold }
    }

    /// Land strictly between the hill floor and the mountain threshold.
    pub fn is_hill(&self, x: usize, y: usize) -> bool {
        if !self.is_land(x, y) {
            return false;
        }
        let e = self.elevation_at(x, y);
        self.hill_floor() < e && e < self.mountain_threshold()
    }

    // Temperature

    /// Temperature band of a cell, coldest band for values below every bound.
    pub fn temperature_band(&self, x: usize, y: usize) -> TemperatureBand {
        let layer = required(&self.temperature, "temperature");
        let index = layer
            .thresholds
            .as_ref()
            .map_or(0, |t| t.band_index(layer.value(x, y)));
        TemperatureBand::from_index(index)
    }

    /// Cell is in the polar temperature band.
    pub fn is_temperature_polar(&self, x: usize, y: usize) -> bool {
        self.temperature_band(x, y) == TemperatureBand::Polar
    }

    /// Cell is in the alpine temperature band.
    pub fn is_temperature_alpine(&self, x: usize, y: usize) -> bool {
        self.temperature_band(x, y) == TemperatureBand::Alpine
    }

    /// Cell is in the boreal temperature band.
    pub fn is_temperature_boreal(&self, x: usize, y: usize) -> bool {
        self.temperature_band(x, y) == TemperatureBand::Boreal
    }

    /// Cell is in the cool temperature band.
    pub fn is_temperature_cool(&self, x: usize, y: usize) -> bool {
        self.temperature_band(x, y) == TemperatureBand::Cool
    }

    /// Cell is in the warm temperature band.
    pub fn is_temperature_warm(&self, x: usize, y: usize) -> bool {
        self.temperature_band(x, y) == TemperatureBand::Warm
    }

    /// Cell is in the subtropical temperature band.
    pub fn is_temperature_subtropical(&self, x: usize, y: usize) -> bool {
        self.temperature_band(x, y) == TemperatureBand::Subtropical
    }

    /// Cell is in the tropical temperature band.
    pub fn is_temperature_tropical(&self, x: usize, y: usize) -> bool {
        self.temperature_band(x, y) == TemperatureBand::Tropical
    }

    // Humidity

    /// Humidity band from the percentile table: superarid below q87 up to
    /// superhumid at or above q12.
    pub fn humidity_band(&self, x: usize, y: usize) -> HumidityBand {
        let layer = required(&self.humidity, "humidity");
        let index = layer
            .quantiles
            .as_ref()
            .map_or(0, |q| q.band_index(layer.value(x, y)));
        HumidityBand::from_index(index)
    }

    /// `humidity >= quantile(key)`.
    ///
    /// # Panics
    ///
    /// Panics if `key` is not a stored percentile key.
    pub fn is_humidity_above_quantile(&self, x: usize, y: usize, key: u8) -> bool {
        let layer = required(&self.humidity, "humidity");
        match layer.quantiles.as_ref().and_then(|q| q.is_above(key, layer.value(x, y))) {
            Some(above) => above,
            None => panic!("humidity has no quantile {key}"),
        }
    }

    /// Cell is in the superarid humidity band.
    pub fn is_humidity_superarid(&self, x: usize, y: usize) -> bool {
        self.humidity_band(x, y) == HumidityBand::Superarid
    }

    /// Cell is in the perarid humidity band.
    pub fn is_humidity_perarid(&self, x: usize, y: usize) -> bool {
        self.humidity_band(x, y) == HumidityBand::Perarid
    }

    /// Cell is in the arid humidity band.
    pub fn is_humidity_arid(&self, x: usize, y: usize) -> bool {
        self.humidity_band(x, y) == HumidityBand::Arid
    }

    /// Cell is in the semiarid humidity band.
    pub fn is_humidity_semiarid(&self, x: usize, y: usize) -> bool {
        self.humidity_band(x, y) == HumidityBand::Semiarid
    }

    /// Cell is in the subhumid humidity band.
    pub fn is_humidity_subhumid(&self, x: usize, y: usize) -> bool {
        self.humidity_band(x, y) == HumidityBand::Subhumid
    }

    /// Cell is in the humid humidity band.
    pub fn is_humidity_humid(&self, x: usize, y: usize) -> bool {
        self.humidity_band(x, y) == HumidityBand::Humid
    }

    /// Cell is in the perhumid humidity band.
    pub fn is_humidity_perhumid(&self, x: usize, y: usize) -> bool {
        self.humidity_band(x, y) == HumidityBand::Perhumid
    }

    /// Cell is in the superhumid humidity band.
    pub fn is_humidity_superhumid(&self, x: usize, y: usize) -> bool {
        self.humidity_band(x, y) == HumidityBand::Superhumid
    }

    // Streams

    /// Accumulated flow through a cell.
    pub fn watermap_at(&self, x: usize, y: usize) -> f64 {
        required(&self.watermap, "watermap").value(x, y)
    }

    fn stream_band_is(&self, x: usize, y: usize, label: &str) -> bool {
        required(&self.watermap, "watermap").band_at(x, y) == Some(label)
    }

    /// Flow falls in the `creek` band.
    pub fn contains_creek(&self, x: usize, y: usize) -> bool {
        self.stream_band_is(x, y, "creek")
    }

    /// Flow falls in the `river` band.
    pub fn contains_river(&self, x: usize, y: usize) -> bool {
        self.stream_band_is(x, y, "river")
    }

    /// Flow falls in the `main river` band.
    pub fn contains_main_river(&self, x: usize, y: usize) -> bool {
        self.stream_band_is(x, y, "main river")
    }

    /// Any of creek, river or main river.
    pub fn contains_stream(&self, x: usize, y: usize) -> bool {
        self.contains_creek(x, y) || self.contains_river(x, y) || self.contains_main_river(x, y)
    }

    // Permeability / precipitation

    /// Permeability band of a cell.
    pub fn permeability_level(&self, x: usize, y: usize) -> Level {
        level_of(required(&self.permeability, "permeability"), x, y)
    }

    /// Precipitation band of a cell.
    pub fn precipitation_level(&self, x: usize, y: usize) -> Level {
        level_of(required(&self.precipitation, "precipitation"), x, y)
    }

    // Biome

    /// Stored biome label of a cell.
    pub fn biome_at(&self, x: usize, y: usize) -> Biome {
        required(&self.biome, "biome").value(x, y)
    }

    /// Whether the cell's biome belongs to `group`.
    pub fn is_in_group(&self, x: usize, y: usize, group: BiomeGroup) -> bool {
        group.contains(self.biome_at(x, y))
    }

    /// Biome is in [`BiomeGroup::BorealForest`].
    pub fn is_boreal_forest(&self, x: usize, y: usize) -> bool {
        self.is_in_group(x, y, BiomeGroup::BorealForest)
    }

    /// Biome is in [`BiomeGroup::TemperateForest`].
    pub fn is_temperate_forest(&self, x: usize, y: usize) -> bool {
        self.is_in_group(x, y, BiomeGroup::TemperateForest)
    }

    /// Biome is in [`BiomeGroup::WarmTemperateForest`].
    pub fn is_warm_temperate_forest(&self, x: usize, y: usize) -> bool {
        self.is_in_group(x, y, BiomeGroup::WarmTemperateForest)
    }

    /// Biome is in [`BiomeGroup::TropicalDryForest`].
    pub fn is_tropical_dry_forest(&self, x: usize, y: usize) -> bool {
        self.is_in_group(x, y, BiomeGroup::TropicalDryForest)
    }

    /// Biome is in [`BiomeGroup::Tundra`].
    pub fn is_tundra(&self, x: usize, y: usize) -> bool {
        self.is_in_group(x, y, BiomeGroup::Tundra)
    }

    /// Biome is in [`BiomeGroup::Iceland`].
    pub fn is_iceland(&self, x: usize, y: usize) -> bool {
        self.is_in_group(x, y, BiomeGroup::Iceland)
    }

    /// Biome is in [`BiomeGroup::Jungle`].
    pub fn is_jungle(&self, x: usize, y: usize) -> bool {
        self.is_in_group(x, y, BiomeGroup::Jungle)
    }

    /// Biome is in [`BiomeGroup::Savanna`].
    pub fn is_savanna(&self, x: usize, y: usize) -> bool {
        self.is_in_group(x, y, BiomeGroup::Savanna)
    }

    /// Biome is in [`BiomeGroup::HotDesert`].
    pub fn is_hot_desert(&self, x: usize, y: usize) -> bool {
        self.is_in_group(x, y, BiomeGroup::HotDesert)
    }

    /// Biome is in [`BiomeGroup::ColdParklands`].
    pub fn is_cold_parklands(&self, x: usize, y: usize) -> bool {
        self.is_in_group(x, y, BiomeGroup::ColdParklands)
    }

    /// Biome is in [`BiomeGroup::Steppe`].
    pub fn is_steppe(&self, x: usize, y: usize) -> bool {
        self.is_in_group(x, y, BiomeGroup::Steppe)
    }

    /// Biome is in [`BiomeGroup::CoolDesert`].
    pub fn is_cool_desert(&self, x: usize, y: usize) -> bool {
        self.is_in_group(x, y, BiomeGroup::CoolDesert)
    }

    /// Biome is in [`BiomeGroup::Chaparral`].
    pub fn is_chaparral(&self, x: usize, y: usize) -> bool {
        self.is_in_group(x, y, BiomeGroup::Chaparral)
    }

    /// Derives a biome for every cell from the ocean mask and the
    /// temperature and humidity bands.
    pub fn classify_biomes(&self, classifier: &dyn BiomeClassifier) -> Grid<Biome> {
        Grid::from_fn(self.width(), self.height(), |x, y| {
            classifier.classify(&ClimateSample {
                ocean: self.is_ocean(x, y),
                temperature: self.temperature_band(x, y),
                humidity: self.humidity_band(x, y),
            })
        })
    }

    // Plates

    /// Highest plate id plus one.
    pub fn n_actual_plates(&self) -> u32 {
        let max = required(&self.plates, "plates").data.max();
        u32::try_from(max.saturating_add(1)).unwrap_or(0)
    }

    // Neighbourhoods

    /// Cells within `radius` (Chebyshev distance) of `(x, y)`, clipped to the
    /// world and excluding the centre.
    pub fn tiles_around(&self, x: usize, y: usize, radius: usize) -> Vec<(usize, usize)> {
        self.tiles_around_where(x, y, radius, |_| true)
    }

    /// [`World::tiles_around`] filtered by `predicate`.
    pub fn tiles_around_where(
        &self,
        x: usize,
        y: usize,
        radius: usize,
        mut predicate: impl FnMut((usize, usize)) -> bool,
    ) -> Vec<(usize, usize)> {
        let xs = x.saturating_sub(radius)..=x.saturating_add(radius).min(self.width() - 1);
        let mut tiles = Vec::new();
        for nx in xs {
            let ys = y.saturating_sub(radius)..=y.saturating_add(radius).min(self.height() - 1);
            for ny in ys {
                if (nx, ny) != (x, y) && predicate((nx, ny)) {
                    tiles.push((nx, ny));
                }
            }
        }
        tiles
    }

    /// Union of the neighbourhoods of `positions`, without the positions
    /// themselves, sorted by `(x, y)`.
    pub fn tiles_around_many(
        &self,
        positions: &[(usize, usize)],
        radius: usize,
    ) -> Vec<(usize, usize)> {
        let inputs: FxHashSet<(usize, usize)> = positions.iter().copied().collect();
        let mut seen = FxHashSet::default();
        let mut tiles: Vec<(usize, usize)> = positions
            .iter()
            .flat_map(|&(x, y)| self.tiles_around(x, y, radius))
            .filter(|tile| !inputs.contains(tile) && seen.insert(*tile))
            .collect();
        tiles.sort_unstable();
        tiles
    }
}

fn level_of(layer: &Layer<f64>, x: usize, y: usize) -> Level {
    let index = layer
        .thresholds
        .as_ref()
        .map_or(0, |t| t.band_index(layer.value(x, y)));
    Level::from_index(index)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use strata_biome::HoldridgeClassifier;

    use super::*;
    use crate::step::Step;
    use crate::thresholds;

    /// 4×4 world: elevation `[0,1,5,10]` on every row, sea at 1, plain to 5,
    /// hill to 8; the leftmost column is ocean.
    fn scenario() -> World {
        let mut w = World::new("scenario", 4, 4, 1, 2, 1.0, Step::Full).unwrap();
        let elevation = Grid::from_fn(4, 4, |x, _| [0.0, 1.0, 5.0, 10.0][x]);
        w.set_elevation(elevation, thresholds::elevation(1.0, 5.0, Some(8.0)).unwrap())
            .unwrap();
        w.set_ocean(Grid::from_fn(4, 4, |x, _| x == 0)).unwrap();
        w.set_plates(Grid::from_fn(4, 4, |x, y| ((x + y) % 3) as i32))
            .unwrap();
        w.set_sea_depth(Grid::filled(4, 4, 0.0)).unwrap();
        w
    }

    #[test]
    fn test_elevation_scenario() {
        let w = scenario();
        assert_eq!(w.sea_level(), 1.0);
        assert_eq!(w.mountain_threshold(), 8.0);
        assert_eq!(w.elevation_at(3, 0), 10.0);
        assert!(w.is_mountain(3, 0));
        assert!(!w.is_low_mountain(3, 0));
        assert!(!w.is_high_mountain(3, 0));
        assert_eq!(w.level_of_mountain(3, 0), 2.0);
        assert_eq!(w.level_of_mountain(2, 0), 0.0);
        assert!(!w.is_mountain(2, 0));
        assert_eq!(w.min_elevation(), 0.0);
        assert_eq!(w.max_elevation(), 10.0);
    }

    #[test]
    fn test_hill_without_hill_band() {
        let mut w = scenario();
        let elevation = w.elevation().unwrap().data.clone();
        w.set_elevation(elevation, thresholds::elevation(1.0, 5.0, None).unwrap())
            .unwrap();
        assert_eq!(w.mountain_threshold(), 5.0);
        // floor is the sea bound, so 1.0 is not strictly above it
        assert!(!w.is_hill(1, 0));
        assert!(!w.is_hill(2, 0));
        assert!(w.is_mountain(3, 0));
        assert!(w.is_high_mountain(3, 0));
    }

    #[test]
    fn test_hill_with_hill_band() {
        let mut w = scenario();
        let elevation = Grid::from_fn(4, 4, |x, _| [0.0, 6.0, 7.9, 8.0][x]);
        w.set_elevation(elevation, thresholds::elevation(1.0, 5.0, Some(8.0)).unwrap())
            .unwrap();
        assert!(w.is_hill(1, 0));
        assert!(w.is_hill(2, 0));
        assert!(!w.is_hill(3, 0));
        assert!(!w.is_mountain(3, 0));
    }

    #[test]
    fn test_ocean_is_never_mountain() {
        let mut w = scenario();
        w.set_elevation(
            Grid::filled(4, 4, 20.0),
            thresholds::elevation(1.0, 5.0, Some(8.0)).unwrap(),
        )
        .unwrap();
        assert!(!w.is_mountain(0, 0));
        assert_eq!(w.level_of_mountain(0, 0), 0.0);
        assert!(w.is_high_mountain(1, 0));
    }

    #[test]
    fn test_temperature_bands() {
        let mut w = scenario();
        let values = [-1.0, 0.15, 0.25, 0.35, 0.45, 0.55, 0.9];
        let grid = Grid::from_fn(4, 4, |x, y| values[(x + y * 4) % 7]);
        w.set_temperature(grid, thresholds::temperature([0.1, 0.2, 0.3, 0.4, 0.5, 0.6]).unwrap())
            .unwrap();
        assert!(w.is_temperature_polar(0, 0));
        assert!(w.is_temperature_alpine(1, 0));
        assert!(w.is_temperature_boreal(2, 0));
        assert!(w.is_temperature_cool(3, 0));
        assert!(w.is_temperature_warm(0, 1));
        assert!(w.is_temperature_subtropical(1, 1));
        assert!(w.is_temperature_tropical(2, 1));
        assert!(!w.is_temperature_tropical(0, 0));
    }

    #[test]
    fn test_humidity_bands() {
        let mut w = scenario();
        let values = [0.1, 0.3, 0.45, 0.55, 0.65, 0.75, 0.85, 0.95];
        let grid = Grid::from_fn(4, 4, |x, y| values[(x + y * 4) % 8]);
        let quantiles = thresholds::humidity([0.9, 0.8, 0.7, 0.6, 0.5, 0.4, 0.3]).unwrap();
        w.set_humidity(grid, quantiles).unwrap();

        assert!(w.is_humidity_superarid(0, 0));
        assert!(w.is_humidity_perarid(1, 0));
        assert!(w.is_humidity_arid(2, 0));
        assert!(w.is_humidity_semiarid(3, 0));
        assert!(w.is_humidity_subhumid(0, 1));
        assert!(w.is_humidity_humid(1, 1));
        assert!(w.is_humidity_perhumid(2, 1));
        assert!(w.is_humidity_superhumid(3, 1));
        assert!(w.is_humidity_above_quantile(0, 1, 50));
        assert!(!w.is_humidity_above_quantile(3, 0, 50));
    }

    #[test]
    fn test_streams() {
        let mut w = scenario();
        let grid = Grid::from_fn(4, 4, |x, _| [0.0, 0.2, 1.0, 3.0][x]);
        w.set_watermap(grid, thresholds::watermap(0.1, 0.5, 2.0).unwrap())
            .unwrap();
        assert!(!w.contains_stream(0, 0));
        assert!(w.contains_creek(1, 0));
        assert!(!w.contains_river(1, 0));
        assert!(w.contains_river(2, 0));
        assert!(w.contains_main_river(3, 0));
        assert!(w.contains_stream(3, 0));
        assert_eq!(w.watermap_at(2, 0), 1.0);
    }

    #[test]
    fn test_levels() {
        let mut w = scenario();
        let grid = Grid::from_fn(4, 4, |x, _| x as f64);
        w.set_permeability(grid.clone(), thresholds::permeability(1.0, 3.0).unwrap())
            .unwrap();
        w.set_precipitation(grid, thresholds::precipitation(0.5, 1.5).unwrap())
            .unwrap();
        assert_eq!(w.permeability_level(0, 0), Level::Low);
        assert_eq!(w.permeability_level(1, 0), Level::Med);
        assert_eq!(w.permeability_level(3, 0), Level::High);
        assert_eq!(w.precipitation_level(1, 0), Level::Med);
        assert_eq!(w.precipitation_level(2, 0), Level::High);
    }

    #[test]
    fn test_biome_groups() {
        let mut w = scenario();
        let labels = [Biome::TropicalRainForest, Biome::Ice, Biome::CoolTemperateSteppe, Biome::Ocean];
        w.set_biome(Grid::from_fn(4, 4, |x, _| labels[x])).unwrap();
        assert!(w.is_jungle(0, 0));
        assert!(w.is_iceland(1, 0));
        assert!(w.is_steppe(2, 0));
        assert!(!w.is_steppe(3, 0));
        assert!(!w.is_tundra(3, 0));
        assert_eq!(w.biome_at(3, 2), Biome::Ocean);
    }

    #[test]
    fn test_classify_biomes() {
        let mut w = scenario();
        w.set_temperature(
            Grid::filled(4, 4, 0.9),
            thresholds::temperature([0.1, 0.2, 0.3, 0.4, 0.5, 0.6]).unwrap(),
        )
        .unwrap();
        w.set_humidity(
            Grid::filled(4, 4, 1.0),
            thresholds::humidity([0.9, 0.8, 0.7, 0.6, 0.5, 0.4, 0.3]).unwrap(),
        )
        .unwrap();
        let biomes = w.classify_biomes(&HoldridgeClassifier);
        assert_eq!(biomes.get(0, 0), Biome::Ocean);
        assert_eq!(biomes.get(1, 0), Biome::TropicalRainForest);
        w.set_biome(biomes).unwrap();
        assert!(w.is_jungle(2, 3));
    }

    #[test]
    fn test_land_queries() {
        let w = scenario();
        assert!(w.is_ocean(0, 2));
        assert!(w.is_land(1, 2));
        assert!(w.contains(3, 3));
        assert!(!w.contains(-1, 0));
        assert!(!w.contains(0, 4));
        assert_eq!(w.n_actual_plates(), 3);
    }

    #[test]
    fn test_random_land() {
        let w = scenario();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..50 {
            let (x, y) = w.random_land(&mut rng).unwrap();
            assert!(w.is_land(x, y));
        }

        let mut flooded = w.clone();
        flooded.set_ocean(Grid::filled(4, 4, true)).unwrap();
        assert_eq!(flooded.random_land(&mut rng), None);
    }

    #[test]
    fn test_tiles_around() {
        let w = scenario();
        let corner = w.tiles_around(0, 0, 1);
        assert_eq!(corner, vec![(0, 1), (1, 0), (1, 1)]);
        assert_eq!(w.tiles_around(1, 1, 1).len(), 8);
        assert_eq!(w.tiles_around(1, 1, 5).len(), 15);

        let land = w.tiles_around_where(1, 1, 1, |(x, y)| w.is_land(x, y));
        assert_eq!(land.len(), 5);
    }

    #[test]
    fn test_tiles_around_many() {
        let w = scenario();
        let tiles = w.tiles_around_many(&[(0, 0), (1, 0)], 1);
        assert_eq!(tiles, vec![(0, 1), (1, 1), (2, 0), (2, 1)]);
    }

    #[test]
    #[should_panic(expected = "world has no biome layer")]
    fn test_missing_layer_panics() {
        scenario().biome_at(0, 0);
    }
}
