//! RON dump of a whole world, for local caching and inspection.
//!
//! Unlike the binary format this is not versioned; it mirrors the in-memory
//! structure and is re-validated on load.

use std::path::Path;

use tracing::debug;

use crate::error::WorldError;
use crate::world::World;

/// Errors raised while writing or loading a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The snapshot file could not be read.
    #[error("failed to read snapshot: {0}")]
    ReadError(#[source] std::io::Error),
    /// The snapshot file could not be written.
    #[error("failed to write snapshot: {0}")]
    WriteError(#[source] std::io::Error),
    /// The text is not a RON world.
    #[error("failed to parse snapshot: {0}")]
    ParseError(#[from] ron::error::SpannedError),
    /// RON serialisation failed.
    #[error("failed to serialize snapshot: {0}")]
    SerializeError(#[from] ron::Error),
    /// The snapshot parsed but describes an inconsistent world.
    #[error("invalid world in snapshot: {0}")]
    Invalid(#[from] WorldError),
}

impl World {
    /// Pretty-printed RON for the whole world.
    pub fn to_snapshot_string(&self) -> Result<String, SnapshotError> {
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(2)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        Ok(ron::ser::to_string_pretty(self, pretty)?)
    }

    /// Parses a snapshot and re-checks every layer against the world.
    pub fn from_snapshot_str(s: &str) -> Result<World, SnapshotError> {
        let world: World = ron::from_str(s)?;
        world.validate()?;
        Ok(world)
    }

    /// Writes [`World::to_snapshot_string`] to `path`.
    pub fn to_snapshot_file(&self, path: &Path) -> Result<(), SnapshotError> {
        let serialized = self.to_snapshot_string()?;
        std::fs::write(path, &serialized).map_err(SnapshotError::WriteError)?;
        debug!(path = %path.display(), bytes = serialized.len(), "wrote world snapshot");
        Ok(())
    }

    /// Loads a snapshot written by [`World::to_snapshot_file`].
    pub fn from_snapshot_file(path: &Path) -> Result<World, SnapshotError> {
        let contents = std::fs::read_to_string(path).map_err(SnapshotError::ReadError)?;
        World::from_snapshot_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use strata_biome::Biome;
    use strata_grid::Grid;

    use super::*;
    use crate::step::Step;
    use crate::thresholds;

    fn world() -> World {
        let mut w = World::new("snap", 3, 2, 9, 4, 0.5, Step::Precipitations).unwrap();
        w.set_elevation(
            Grid::from_fn(3, 2, |x, y| (x + 2 * y) as f64),
            thresholds::elevation(1.0, 2.0, Some(4.0)).unwrap(),
        )
        .unwrap();
        w.set_ocean(Grid::from_fn(3, 2, |x, _| x == 0)).unwrap();
        w.set_biome(Grid::filled(3, 2, Biome::TropicalDesert)).unwrap();
        w.set_precipitation(
            Grid::filled(3, 2, 0.4),
            thresholds::precipitation(0.2, 0.6).unwrap(),
        )
        .unwrap();
        w
    }

    #[test]
    fn test_snapshot_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("world.ron");
        let w = world();
        w.to_snapshot_file(&path).unwrap();
        assert_eq!(World::from_snapshot_file(&path).unwrap(), w);
    }

    #[test]
    fn test_snapshot_is_readable() {
        let text = world().to_snapshot_string().unwrap();
        assert!(text.contains("name: \"snap\""));
        assert!(text.contains("TropicalDesert"));
        assert!(text.contains("Precipitations"));
    }

    #[test]
    fn test_inconsistent_snapshot_rejected() {
        let text = world().to_snapshot_string().unwrap();
        let tampered = text.replacen("width: 3", "width: 4", 1);
        assert!(matches!(
            World::from_snapshot_str(&tampered),
            Err(SnapshotError::Invalid(WorldError::ShapeMismatch { .. }))
        ));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            World::from_snapshot_file(&dir.path().join("nope.ron")),
            Err(SnapshotError::ReadError(_))
        ));
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(matches!(
            World::from_snapshot_str("World(("),
            Err(SnapshotError::ParseError(_))
        ));
    }
}
