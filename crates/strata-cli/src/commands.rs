//! Subcommand implementations.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::time::Instant;

use strata_config::Config;
use strata_world::{FormatError, SnapshotError, World, WorldError};
use tracing::info;

/// Errors reported by the subcommands.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// A world file could not be read, decoded, encoded or written.
    #[error("{path}: {source}")]
    Format {
        /// File involved.
        path: PathBuf,
        /// Underlying codec error.
        #[source]
        source: FormatError,
    },
    /// The world rejected an operation.
    #[error(transparent)]
    World(#[from] WorldError),
    /// Writing the snapshot failed.
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    /// The file written does not re-encode to the bytes that were saved.
    #[error("{0}: written file does not match the rescaled world")]
    VerifyMismatch(PathBuf),
}

fn open(path: &Path) -> Result<World, CliError> {
    World::open(path).map_err(|source| CliError::Format {
        path: path.to_path_buf(),
        source,
    })
}

fn save(world: &World, path: &Path, verify: bool) -> Result<(), CliError> {
    let format_err = |source: FormatError| CliError::Format {
        path: path.to_path_buf(),
        source,
    };
    let bytes = world.to_bytes().map_err(format_err)?;
    std::fs::write(path, &bytes).map_err(|e| format_err(FormatError::Io(e)))?;
    // Compare encodings, not worlds: NaN cells never compare equal.
    if verify {
        let stored = World::open(path).map_err(format_err)?;
        if stored.to_bytes().map_err(format_err)? != bytes {
            return Err(CliError::VerifyMismatch(path.to_path_buf()));
        }
    }
    Ok(())
}

/// Prints [`describe`] for the world in `file`.
pub fn info(file: &Path) -> Result<(), CliError> {
    let world = open(file)?;
    print!("{}", describe(&world));
    Ok(())
}

/// Resamples the world in `file` to `width`×`height` and writes it to `output`.
pub fn rescale(
    file: &Path,
    width: usize,
    height: usize,
    output: &Path,
    config: &Config,
) -> Result<(), CliError> {
    let started = Instant::now();
    let mut world = open(file)?;
    world.rescale(width, height, &config.resampler())?;
    save(&world, output, config.codec.verify_after_write)?;
    info!(
        output = %output.display(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "wrote rescaled world"
    );
    Ok(())
}

/// Writes the world in `file` as a RON snapshot.
pub fn snapshot(file: &Path, output: &Path) -> Result<(), CliError> {
    let world = open(file)?;
    world.to_snapshot_file(output)?;
    info!(output = %output.display(), "wrote snapshot");
    Ok(())
}

/// Human-readable summary of a world.
pub fn describe(world: &World) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "name:        {}", world.name());
    let _ = writeln!(out, "size:        {}x{}", world.width(), world.height());
    let _ = writeln!(out, "seed:        {}", world.seed());
    let _ = writeln!(out, "plates:      {}", world.n_plates());
    let _ = writeln!(out, "ocean level: {}", world.ocean_level());
    let _ = writeln!(out, "step:        {}", world.step());
    let _ = writeln!(out, "layers:      {}", world.layer_names().join(", "));
    if world.has_elevation() {
        let _ = writeln!(
            out,
            "elevation:   {} .. {} (sea level {})",
            world.min_elevation(),
            world.max_elevation(),
            world.sea_level()
        );
    }
    if world.has_plates() {
        let _ = writeln!(out, "used plates: {}", world.n_actual_plates());
    }
    out
}

#[cfg(test)]
mod tests {
    use strata_grid::Grid;
    use strata_world::{Step, thresholds};

    use super::*;

    fn sample() -> World {
        let mut w = World::new("Pangaea", 4, 4, 7, 3, 1.0, Step::Full).unwrap();
        w.set_elevation(
            Grid::from_fn(4, 4, |x, y| (x + y) as f64),
            thresholds::elevation(1.0, 3.0, Some(5.0)).unwrap(),
        )
        .unwrap();
        w.set_plates(Grid::from_fn(4, 4, |x, _| (x / 2) as i32))
            .unwrap();
        w.set_ocean(Grid::from_fn(4, 4, |x, y| x + y < 1)).unwrap();
        w.set_sea_depth(Grid::filled(4, 4, 0.0)).unwrap();
        w
    }

    #[test]
    fn test_describe() {
        let text = describe(&sample());
        assert!(text.contains("name:        Pangaea"));
        assert!(text.contains("size:        4x4"));
        assert!(text.contains("layers:      elevation, plates, ocean, sea_depth"));
        assert!(text.contains("elevation:   0 .. 6 (sea level 1)"));
        assert!(text.contains("used plates: 2"));
    }

    #[test]
    fn test_rescale_writes_verified_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.woen");
        let output = dir.path().join("out.woen");
        sample().save(&input).unwrap();

        let mut config = Config::default();
        config.resample.threads = 2;
        rescale(&input, 8, 6, &output, &config).unwrap();
        let world = World::open(&output).unwrap();
        assert_eq!(world.dimensions(), (8, 6));
        assert_eq!(world.name(), "Pangaea");
    }

    #[test]
    fn test_verify_accepts_nan_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nan.woen");
        let mut world = sample();
        let mut depth = Grid::filled(4, 4, 0.5);
        depth.set(2, 1, f64::NAN);
        world.set_sea_depth(depth).unwrap();

        save(&world, &path, true).unwrap();
        assert!(World::open(&path).unwrap().sea_depth().unwrap().data.get(2, 1).is_nan());
    }

    #[test]
    fn test_snapshot_command() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.woen");
        let output = dir.path().join("in.ron");
        sample().save(&input).unwrap();
        snapshot(&input, &output).unwrap();
        assert_eq!(World::from_snapshot_file(&output).unwrap(), sample());
    }

    #[test]
    fn test_missing_input_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.woen");
        let err = info(&missing).unwrap_err();
        assert!(err.to_string().contains("missing.woen"));
    }
}
