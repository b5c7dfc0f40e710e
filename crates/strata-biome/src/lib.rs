//! Biome taxonomy: the closed label set, its label⇄code table, composite
//! groups, and classification from climate bands.
//!
//! Labels follow the Holdridge life-zone scheme. Codes are the label's
//! position in alphabetical order and are what the world file stores.

mod band;
mod classifier;
mod group;
mod label;

pub use band::{HumidityBand, TemperatureBand};
pub use classifier::{BiomeClassifier, ClimateSample, HoldridgeClassifier};
pub use group::BiomeGroup;
pub use label::{Biome, BiomeError};
