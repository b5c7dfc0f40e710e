//! The [`World`] aggregate and its validating setters.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use strata_biome::Biome;
use strata_grid::{Cell, Grid, Layer, PERCENTILE_KEYS, QuantileTable, Resampler, ThresholdTable};
use tracing::info;

use crate::error::WorldError;
use crate::step::Step;
use crate::thresholds::{
    ELEVATION_BANDS, ELEVATION_BANDS_NO_HILL, LEVEL_BANDS, TEMPERATURE_BANDS, WATERMAP_BANDS,
};

/// A generated planetary surface: metadata plus a stack of co-registered
/// layers, every one of them exactly `width`×`height`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct World {
    name: String,
    width: usize,
    height: usize,
    seed: u64,
    n_plates: u32,
    ocean_level: f64,
    step: Step,

    pub(crate) elevation: Option<Layer<f64>>,
    pub(crate) plates: Option<Layer<i32>>,
    pub(crate) ocean: Option<Layer<bool>>,
    pub(crate) sea_depth: Option<Layer<f64>>,
    pub(crate) biome: Option<Layer<Biome>>,
    pub(crate) humidity: Option<Layer<f64>>,
    pub(crate) irrigation: Option<Layer<f64>>,
    pub(crate) permeability: Option<Layer<f64>>,
    pub(crate) watermap: Option<Layer<f64>>,
    pub(crate) precipitation: Option<Layer<f64>>,
    pub(crate) temperature: Option<Layer<f64>>,
    pub(crate) lake_map: Option<Layer<f64>>,
    pub(crate) river_map: Option<Layer<f64>>,
}

impl World {
    /// An empty world with no layers.
    pub fn new(
        name: impl Into<String>,
        width: usize,
        height: usize,
        seed: u64,
        n_plates: u32,
        ocean_level: f64,
        step: Step,
    ) -> Result<Self, WorldError> {
        check_dimensions(width, height)?;
        Ok(Self {
            name: name.into(),
            width,
            height,
            seed,
            n_plates,
            ocean_level,
            step,
            elevation: None,
            plates: None,
            ocean: None,
            sea_depth: None,
            biome: None,
            humidity: None,
            irrigation: None,
            permeability: None,
            watermap: None,
            precipitation: None,
            temperature: None,
            lake_map: None,
            river_map: None,
        })
    }

    /// Display name of the world.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Seed the generator was run with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of tectonic plates requested at generation.
    pub fn n_plates(&self) -> u32 {
        self.n_plates
    }

    /// Elevation of the sea surface.
    pub fn ocean_level(&self) -> f64 {
        self.ocean_level
    }

    /// Last generation step that ran.
    pub fn step(&self) -> Step {
        self.step
    }

    // Setters. Each checks the grid shape and the table layout first and
    // only then replaces the layer.

    /// Stores elevation with its `sea`/`plain`/`hill`/`mountain` bands. The
    /// hill band may be absent.
    pub fn set_elevation(
        &mut self,
        data: Grid<f64>,
        thresholds: ThresholdTable,
    ) -> Result<(), WorldError> {
        self.check_shape("elevation", &data)?;
        check_layout(
            "elevation",
            &thresholds,
            &[ELEVATION_BANDS, ELEVATION_BANDS_NO_HILL],
        )?;
        self.elevation = Some(Layer::with_thresholds(data, thresholds));
        Ok(())
    }

    /// Stores plate ids.
    pub fn set_plates(&mut self, data: Grid<i32>) -> Result<(), WorldError> {
        self.check_shape("plates", &data)?;
        self.plates = Some(Layer::bare(data));
        Ok(())
    }

    /// Stores the ocean mask.
    pub fn set_ocean(&mut self, data: Grid<bool>) -> Result<(), WorldError> {
        self.check_shape("ocean", &data)?;
        self.ocean = Some(Layer::bare(data));
        Ok(())
    }

    /// Stores normalised sea depth.
    pub fn set_sea_depth(&mut self, data: Grid<f64>) -> Result<(), WorldError> {
        self.check_shape("sea_depth", &data)?;
        self.sea_depth = Some(Layer::bare(data));
        Ok(())
    }

    /// Stores per-cell biome labels.
    pub fn set_biome(&mut self, data: Grid<Biome>) -> Result<(), WorldError> {
        self.check_shape("biome", &data)?;
        self.biome = Some(Layer::bare(data));
        Ok(())
    }

    /// Stores humidity with its percentile table, which must hold every key
    /// of [`PERCENTILE_KEYS`].
    pub fn set_humidity(
        &mut self,
        data: Grid<f64>,
        quantiles: QuantileTable,
    ) -> Result<(), WorldError> {
        self.check_shape("humidity", &data)?;
        check_quantiles(&quantiles)?;
        self.humidity = Some(Layer::with_quantiles(data, quantiles));
        Ok(())
    }

    /// Stores irrigation.
    pub fn set_irrigation(&mut self, data: Grid<f64>) -> Result<(), WorldError> {
        self.check_shape("irrigation", &data)?;
        self.irrigation = Some(Layer::bare(data));
        Ok(())
    }

    /// Stores permeability with `low`/`med`/`high` bands.
    pub fn set_permeability(
        &mut self,
        data: Grid<f64>,
        thresholds: ThresholdTable,
    ) -> Result<(), WorldError> {
        self.check_shape("permeability", &data)?;
        check_layout("permeability", &thresholds, &[LEVEL_BANDS])?;
        self.permeability = Some(Layer::with_thresholds(data, thresholds));
        Ok(())
    }

    /// Stores accumulated flow with the stream size bands.
    pub fn set_watermap(
        &mut self,
        data: Grid<f64>,
        thresholds: ThresholdTable,
    ) -> Result<(), WorldError> {
        self.check_shape("watermap", &data)?;
        check_layout("watermap", &thresholds, &[WATERMAP_BANDS])?;
        self.watermap = Some(Layer::with_thresholds(data, thresholds));
        Ok(())
    }

    /// Stores precipitation with `low`/`med`/`high` bands.
    pub fn set_precipitation(
        &mut self,
        data: Grid<f64>,
        thresholds: ThresholdTable,
    ) -> Result<(), WorldError> {
        self.check_shape("precipitation", &data)?;
        check_layout("precipitation", &thresholds, &[LEVEL_BANDS])?;
        self.precipitation = Some(Layer::with_thresholds(data, thresholds));
        Ok(())
    }

    /// Stores temperature with the seven temperature bands.
    pub fn set_temperature(
        &mut self,
        data: Grid<f64>,
        thresholds: ThresholdTable,
    ) -> Result<(), WorldError> {
        self.check_shape("temperature", &data)?;
        check_layout("temperature", &thresholds, &[TEMPERATURE_BANDS])?;
        self.temperature = Some(Layer::with_thresholds(data, thresholds));
        Ok(())
    }

    /// Stores the lake map.
    pub fn set_lake_map(&mut self, data: Grid<f64>) -> Result<(), WorldError> {
        self.check_shape("lake_map", &data)?;
        self.lake_map = Some(Layer::bare(data));
        Ok(())
    }

    /// Stores the river map.
    pub fn set_river_map(&mut self, data: Grid<f64>) -> Result<(), WorldError> {
        self.check_shape("river_map", &data)?;
        self.river_map = Some(Layer::bare(data));
        Ok(())
    }

    /// The elevation layer, if set.
    pub fn elevation(&self) -> Option<&Layer<f64>> {
        self.elevation.as_ref()
    }

    /// The plates layer, if set.
    pub fn plates(&self) -> Option<&Layer<i32>> {
        self.plates.as_ref()
    }

    /// The ocean layer, if set.
    pub fn ocean(&self) -> Option<&Layer<bool>> {
        self.ocean.as_ref()
    }

    /// The sea depth layer, if set.
    pub fn sea_depth(&self) -> Option<&Layer<f64>> {
        self.sea_depth.as_ref()
    }

    /// The biome layer, if set.
    pub fn biome(&self) -> Option<&Layer<Biome>> {
        self.biome.as_ref()
    }

    /// The humidity layer, if set.
    pub fn humidity(&self) -> Option<&Layer<f64>> {
        self.humidity.as_ref()
    }

    /// The irrigation layer, if set.
    pub fn irrigation(&self) -> Option<&Layer<f64>> {
        self.irrigation.as_ref()
    }

    /// The permeability layer, if set.
    pub fn permeability(&self) -> Option<&Layer<f64>> {
        self.permeability.as_ref()
    }

    /// The watermap layer, if set.
    pub fn watermap(&self) -> Option<&Layer<f64>> {
        self.watermap.as_ref()
    }

    /// The precipitation layer, if set.
    pub fn precipitation(&self) -> Option<&Layer<f64>> {
        self.precipitation.as_ref()
    }

    /// The temperature layer, if set.
    pub fn temperature(&self) -> Option<&Layer<f64>> {
        self.temperature.as_ref()
    }

    /// The lake map layer, if set.
    pub fn lake_map(&self) -> Option<&Layer<f64>> {
        self.lake_map.as_ref()
    }

    /// The river map layer, if set.
    pub fn river_map(&self) -> Option<&Layer<f64>> {
        self.river_map.as_ref()
    }

    /// Whether the elevation layer is present.
    pub fn has_elevation(&self) -> bool {
        self.elevation.is_some()
    }

    /// Whether the plates layer is present.
    pub fn has_plates(&self) -> bool {
        self.plates.is_some()
    }

    /// Whether the ocean layer is present.
    pub fn has_ocean(&self) -> bool {
        self.ocean.is_some()
    }

    /// Whether the sea depth layer is present.
    pub fn has_sea_depth(&self) -> bool {
        self.sea_depth.is_some()
    }

    /// Whether the biome layer is present.
    pub fn has_biome(&self) -> bool {
        self.biome.is_some()
    }

    /// Whether the humidity layer is present.
    pub fn has_humidity(&self) -> bool {
        self.humidity.is_some()
    }

    /// Whether the irrigation layer is present.
    pub fn has_irrigation(&self) -> bool {
        self.irrigation.is_some()
    }

    /// Whether the permeability layer is present.
    pub fn has_permeability(&self) -> bool {
        self.permeability.is_some()
    }

    /// Whether the watermap layer is present.
    pub fn has_watermap(&self) -> bool {
        self.watermap.is_some()
    }

    /// Whether the precipitation layer is present.
    pub fn has_precipitation(&self) -> bool {
        self.precipitation.is_some()
    }

    /// Whether the temperature layer is present.
    pub fn has_temperature(&self) -> bool {
        self.temperature.is_some()
    }

    /// Whether the lake map layer is present.
    pub fn has_lake_map(&self) -> bool {
        self.lake_map.is_some()
    }

    /// Whether the river map layer is present.
    pub fn has_river_map(&self) -> bool {
        self.river_map.is_some()
    }

    /// Names of the layers currently present, in storage order.
    pub fn layer_names(&self) -> Vec<&'static str> {
        [
            ("elevation", self.has_elevation()),
            ("plates", self.has_plates()),
            ("ocean", self.has_ocean()),
            ("sea_depth", self.has_sea_depth()),
            ("biome", self.has_biome()),
            ("humidity", self.has_humidity()),
            ("irrigation", self.has_irrigation()),
            ("permeability", self.has_permeability()),
            ("watermap", self.has_watermap()),
            ("lake_map", self.has_lake_map()),
            ("river_map", self.has_river_map()),
            ("precipitation", self.has_precipitation()),
            ("temperature", self.has_temperature()),
        ]
        .into_iter()
        .filter_map(|(name, present)| present.then_some(name))
        .collect()
    }

    /// Returns a copy of the world with every present layer resampled to
    /// `width`×`height`.
    pub fn rescaled(
        &self,
        width: usize,
        height: usize,
        resampler: &Resampler,
    ) -> Result<World, WorldError> {
        check_dimensions(width, height)?;
        Ok(World {
            name: self.name.clone(),
            width,
            height,
            seed: self.seed,
            n_plates: self.n_plates,
            ocean_level: self.ocean_level,
            step: self.step,
            elevation: rescale_layer(&self.elevation, width, height, resampler)?,
            plates: rescale_layer(&self.plates, width, height, resampler)?,
            ocean: rescale_layer(&self.ocean, width, height, resampler)?,
            sea_depth: rescale_layer(&self.sea_depth, width, height, resampler)?,
            biome: rescale_layer(&self.biome, width, height, resampler)?,
            humidity: rescale_layer(&self.humidity, width, height, resampler)?,
            irrigation: rescale_layer(&self.irrigation, width, height, resampler)?,
            permeability: rescale_layer(&self.permeability, width, height, resampler)?,
            watermap: rescale_layer(&self.watermap, width, height, resampler)?,
            precipitation: rescale_layer(&self.precipitation, width, height, resampler)?,
            temperature: rescale_layer(&self.temperature, width, height, resampler)?,
            lake_map: rescale_layer(&self.lake_map, width, height, resampler)?,
            river_map: rescale_layer(&self.river_map, width, height, resampler)?,
        })
    }

    /// Resamples every present layer in place.
    ///
    /// All layers are resampled into temporaries first; on error the world
    /// keeps its previous dimensions and contents.
    pub fn rescale(
        &mut self,
        width: usize,
        height: usize,
        resampler: &Resampler,
    ) -> Result<(), WorldError> {
        let started = Instant::now();
        let from = self.dimensions();
        *self = self.rescaled(width, height, resampler)?;
        info!(
            world = %self.name,
            from = ?from,
            to = ?(width, height),
            layers = self.layer_names().len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "rescaled world"
        );
        Ok(())
    }

    /// Re-checks every invariant. Used on data that bypassed the setters.
    pub(crate) fn validate(&self) -> Result<(), WorldError> {
        check_dimensions(self.width, self.height)?;
        self.check_layer("elevation", &self.elevation)?;
        self.check_layer("plates", &self.plates)?;
        self.check_layer("ocean", &self.ocean)?;
        self.check_layer("sea_depth", &self.sea_depth)?;
        self.check_layer("biome", &self.biome)?;
        self.check_layer("humidity", &self.humidity)?;
        self.check_layer("irrigation", &self.irrigation)?;
        self.check_layer("permeability", &self.permeability)?;
        self.check_layer("watermap", &self.watermap)?;
        self.check_layer("precipitation", &self.precipitation)?;
        self.check_layer("temperature", &self.temperature)?;
        self.check_layer("lake_map", &self.lake_map)?;
        self.check_layer("river_map", &self.river_map)?;

        let layouts: [(&'static str, Option<&Layer<f64>>, &[&[&str]]); 5] = [
            (
                "elevation",
                self.elevation.as_ref(),
                &[ELEVATION_BANDS, ELEVATION_BANDS_NO_HILL],
            ),
            ("permeability", self.permeability.as_ref(), &[LEVEL_BANDS]),
            ("watermap", self.watermap.as_ref(), &[WATERMAP_BANDS]),
            ("precipitation", self.precipitation.as_ref(), &[LEVEL_BANDS]),
            ("temperature", self.temperature.as_ref(), &[TEMPERATURE_BANDS]),
        ];
        for (layer, data, accepted) in layouts {
            if let Some(data) = data {
                match &data.thresholds {
                    Some(table) => check_layout(layer, table, accepted)?,
                    None => {
                        return Err(WorldError::ThresholdLayout {
                            layer,
                            expected: accepted[0].join(", "),
                            found: Vec::new(),
                        });
                    }
                }
            }
        }
        if let Some(humidity) = &self.humidity {
            match &humidity.quantiles {
                Some(quantiles) => check_quantiles(quantiles)?,
                None => return Err(WorldError::MissingQuantile(PERCENTILE_KEYS[0])),
            }
        }
        Ok(())
    }

    fn check_layer<T>(&self, layer: &'static str, data: &Option<Layer<T>>) -> Result<(), WorldError> {
        match data {
            Some(data) => self.check_shape(layer, &data.data),
            None => Ok(()),
        }
    }

    fn check_shape<T>(&self, layer: &'static str, data: &Grid<T>) -> Result<(), WorldError> {
        if data.dimensions() != self.dimensions() {
            return Err(WorldError::ShapeMismatch {
                layer,
                expected: self.dimensions(),
                found: data.dimensions(),
            });
        }
        Ok(())
    }
}

/// Borrows a layer that a query cannot do without.
///
/// # Panics
///
/// Panics with the layer's name if it is absent.
pub(crate) fn required<'a, T>(layer: &'a Option<Layer<T>>, name: &str) -> &'a Layer<T> {
    match layer {
        Some(layer) => layer,
        None => panic!("world has no {name} layer"),
    }
}

fn rescale_layer<T: Cell>(
    layer: &Option<Layer<T>>,
    width: usize,
    height: usize,
    resampler: &Resampler,
) -> Result<Option<Layer<T>>, WorldError> {
    Ok(layer
        .as_ref()
        .map(|l| l.resample(width, height, resampler))
        .transpose()?)
}

fn check_dimensions(width: usize, height: usize) -> Result<(), WorldError> {
    if width == 0 || height == 0 || width.checked_mul(height).is_none() {
        return Err(WorldError::InvalidDimensions { width, height });
    }
    Ok(())
}

fn check_layout(
    layer: &'static str,
    table: &ThresholdTable,
    accepted: &[&[&str]],
) -> Result<(), WorldError> {
    let matches = |labels: &[&str]| table.labels().eq(labels.iter().copied());
    if accepted.iter().any(|labels| matches(*labels)) {
        return Ok(());
    }
    Err(WorldError::ThresholdLayout {
        layer,
        expected: accepted[0].join(", "),
        found: table.labels().map(str::to_string).collect(),
    })
}

fn check_quantiles(quantiles: &QuantileTable) -> Result<(), WorldError> {
    match PERCENTILE_KEYS
        .iter()
        .find(|&&key| quantiles.boundary(key).is_none())
    {
        Some(&key) => Err(WorldError::MissingQuantile(key)),
        None => Ok(()),
    }
}
