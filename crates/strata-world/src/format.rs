//! Binary encoding of a whole [`World`].
//!
//! ## Layout
//!
//! All integers and floats are little-endian.
//!
//! | Field | Encoding |
//! |-------|----------|
//! | tag | 4 bytes `"Woen"` |
//! | version | `u32`, `major << 24 \| minor << 16 \| patch << 8` |
//! | name | `u32` byte length + UTF-8 |
//! | width, height | `u32`, `u32` |
//! | seed, n_plates, ocean_level | `u64`, `u32`, `f64` |
//! | step | string |
//! | elevation | matrix `f64` + sea, plain, hill bounds (`f64`, hill NaN if absent) |
//! | plates | matrix `i32` |
//! | ocean | matrix of `u8` 0/1 |
//! | sea_depth | matrix `f64` |
//! | biome | matrix `i32` biome codes |
//! | humidity | matrix `f64` + `u32` count + (`i32` key, `f64` value) pairs |
//! | irrigation | matrix `f64` |
//! | permeability | matrix `f64` + low, med |
//! | watermap | matrix `f64` + creek, river, main river |
//! | lake_map, river_map | matrix `f64` |
//! | precipitation | matrix `f64` + low, med |
//! | temperature | matrix `f64` + 6 bounds |
//!
//! A matrix is a `u32` row count followed by each row as a `u32` cell count
//! and its cells. Zero rows marks an absent layer, whose trailing bounds are
//! then omitted. Elevation, plates, ocean and sea depth are mandatory.

use std::fmt;
use std::path::Path;

use strata_biome::Biome;
use strata_grid::{Grid, GridError, Layer, QuantileTable, TableError, ThresholdTable};
use tracing::debug;

use crate::error::WorldError;
use crate::step::{Step, UnknownStep};
use crate::thresholds;
use crate::world::World;

/// Tag identifying the format (`0x576F656E` read big-endian).
pub const FORMAT_TAG: [u8; 4] = *b"Woen";

/// Version written by this build; buffers with a higher version are rejected.
pub const FORMAT_VERSION: FormatVersion = FormatVersion::new(0, 1, 0);

/// Semantic version packed into the 32-bit header field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FormatVersion {
    /// Incompatible layout changes.
    pub major: u8,
    /// Backwards compatible additions.
    pub minor: u8,
    /// Fixes.
    pub patch: u8,
}

impl FormatVersion {
    /// Version `major.minor.patch`.
    pub const fn new(major: u8, minor: u8, patch: u8) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Packs into the header code; the low byte is zero.
    pub const fn to_u32(self) -> u32 {
        (self.major as u32) << 24 | (self.minor as u32) << 16 | (self.patch as u32) << 8
    }

    /// Unpacks a header code; the low byte is ignored.
    pub const fn from_u32(code: u32) -> Self {
        Self::new((code >> 24) as u8, (code >> 16) as u8, (code >> 8) as u8)
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Errors raised while encoding or decoding a world.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// The buffer does not start with [`FORMAT_TAG`].
    #[error("not a world file: tag {found:02x?}")]
    TagMismatch {
        /// Leading bytes of the buffer, at most four.
        found: Vec<u8>,
    },
    /// The header code is above the newest version this build reads.
    #[error("unsupported format version code {code:#010x} (reader supports up to {supported})")]
    UnsupportedVersion {
        /// Raw header code as stored.
        code: u32,
        /// [`FORMAT_VERSION`].
        supported: FormatVersion,
    },
    /// The buffer ends before the field being read.
    #[error("data truncated: expected {expected} bytes, got {actual}")]
    Truncated {
        /// Offset the field would end at.
        expected: usize,
        /// Buffer length.
        actual: usize,
    },
    /// A length or dimension does not fit the `u32` it is stored in.
    #[error("{field} length {len} does not fit in u32")]
    TooLong {
        /// Field being written.
        field: &'static str,
        /// Offending length.
        len: usize,
    },
    /// The name or step is not UTF-8.
    #[error("string field is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
    /// A mask cell is neither 0 nor 1.
    #[error("invalid boolean byte {0}")]
    InvalidBool(u8),
    /// A stored biome code has no label.
    #[error("biome code {0} not found")]
    CategoryNotFound(i32),
    /// A humidity percentile key does not fit `0..=100`.
    #[error("invalid percentile key {0}")]
    InvalidQuantileKey(i32),
    /// A humidity percentile key is stored twice.
    #[error("duplicate percentile key {0}")]
    DuplicateQuantileKey(u8),
    /// The step name is not recognised.
    #[error(transparent)]
    UnknownStep(#[from] UnknownStep),
    /// Bytes remain after the last layer.
    #[error("{0} trailing bytes after world data")]
    TrailingBytes(usize),
    /// A mandatory layer is absent.
    #[error("world has no {0} layer")]
    MissingLayer(&'static str),
    /// Decoded layers do not form a consistent world.
    #[error(transparent)]
    World(#[from] WorldError),
    /// Stored bounds do not form a valid table.
    #[error(transparent)]
    Table(#[from] TableError),
    /// A stored matrix is ragged or empty.
    #[error(transparent)]
    Grid(#[from] GridError),
    /// Reading or writing the file failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl World {
    /// Encodes the world.
    ///
    /// Fails with [`FormatError::MissingLayer`] if elevation, plates, ocean or
    /// sea depth is absent.
    pub fn to_bytes(&self) -> Result<Vec<u8>, FormatError> {
        let elevation = mandatory(self.elevation(), "elevation")?;
        let plates = mandatory(self.plates(), "plates")?;
        let ocean = mandatory(self.ocean(), "ocean")?;
        let sea_depth = mandatory(self.sea_depth(), "sea_depth")?;

        let mut w = Writer::default();
        w.buf.extend_from_slice(&FORMAT_TAG);
        w.u32(FORMAT_VERSION.to_u32());
        w.string(self.name(), "name")?;
        w.u32(wire_len(self.width(), "width")?);
        w.u32(wire_len(self.height(), "height")?);
        w.u64(self.seed());
        w.u32(self.n_plates());
        w.f64(self.ocean_level());
        w.string(self.step().name(), "step")?;

        w.matrix(Some(&elevation.data), |w, v| w.f64(v))?;
        let table = elevation.thresholds.as_ref();
        w.f64(bound(table, "sea"));
        w.f64(bound(table, "plain"));
        w.f64(bound(table, "hill"));

        w.matrix(Some(&plates.data), |w, v| w.i32(v))?;
        w.matrix(Some(&ocean.data), |w, v| w.buf.push(u8::from(v)))?;
        w.matrix(Some(&sea_depth.data), |w, v| w.f64(v))?;
        w.matrix(self.biome().map(|l| &l.data), |w, v| w.i32(v.code()))?;

        w.real(self.humidity())?;
        if let Some(quantiles) = self.humidity().and_then(|l| l.quantiles.as_ref()) {
            w.u32(wire_len(quantiles.len(), "humidity quantiles")?);
            for (key, value) in quantiles.iter() {
                w.i32(i32::from(key));
                w.f64(value);
            }
        }

        w.real(self.irrigation())?;
        w.banded(self.permeability(), 2)?;
        w.banded(self.watermap(), 3)?;
        w.real(self.lake_map())?;
        w.real(self.river_map())?;
        w.banded(self.precipitation(), 2)?;
        w.banded(self.temperature(), 6)?;

        debug!(world = %self.name(), bytes = w.buf.len(), "encoded world");
        Ok(w.buf)
    }

    /// Decodes a world, rejecting a wrong tag or a newer version before any
    /// other field is read.
    pub fn from_bytes(data: &[u8]) -> Result<World, FormatError> {
        let mut r = Reader::new(data);

        let tag = r.take(FORMAT_TAG.len()).map_err(|_| FormatError::TagMismatch {
            found: data[..data.len().min(FORMAT_TAG.len())].to_vec(),
        })?;
        if tag != FORMAT_TAG {
            return Err(FormatError::TagMismatch { found: tag.to_vec() });
        }
        let code = r.u32()?;
        if code > FORMAT_VERSION.to_u32() {
            return Err(FormatError::UnsupportedVersion {
                code,
                supported: FORMAT_VERSION,
            });
        }
        let version = FormatVersion::from_u32(code);

        let name = r.string()?;
        let width = r.u32()? as usize;
        let height = r.u32()? as usize;
        let seed = r.u64()?;
        let n_plates = r.u32()?;
        let ocean_level = r.f64()?;
        let step = Step::from_name(&r.string()?)?;
        let mut world = World::new(name, width, height, seed, n_plates, ocean_level, step)?;

        let elevation = r.matrix(8, Reader::f64)?.ok_or(FormatError::MissingLayer("elevation"))?;
        let (sea, plain, hill) = (r.f64()?, r.f64()?, r.f64()?);
        let hill = (!hill.is_nan()).then_some(hill);
        world.set_elevation(elevation, thresholds::elevation(sea, plain, hill)?)?;

        let plates = r.matrix(4, Reader::i32)?.ok_or(FormatError::MissingLayer("plates"))?;
        world.set_plates(plates)?;
        let ocean = r.matrix(1, Reader::bool)?.ok_or(FormatError::MissingLayer("ocean"))?;
        world.set_ocean(ocean)?;
        let sea_depth = r.matrix(8, Reader::f64)?.ok_or(FormatError::MissingLayer("sea_depth"))?;
        world.set_sea_depth(sea_depth)?;

        if let Some(biome) = r.matrix(4, Reader::biome)? {
            world.set_biome(biome)?;
        }

        if let Some(humidity) = r.matrix(8, Reader::f64)? {
            let count = r.u32()? as usize;
            r.ensure(count.saturating_mul(12))?;
            let mut pairs = Vec::with_capacity(count);
            for _ in 0..count {
                let key = r.i32()?;
                let key = u8::try_from(key).map_err(|_| FormatError::InvalidQuantileKey(key))?;
                if pairs.iter().any(|&(seen, _)| seen == key) {
                    return Err(FormatError::DuplicateQuantileKey(key));
                }
                pairs.push((key, r.f64()?));
            }
            world.set_humidity(humidity, QuantileTable::from_pairs(pairs)?)?;
        }

        if let Some(irrigation) = r.matrix(8, Reader::f64)? {
            world.set_irrigation(irrigation)?;
        }
        if let Some(permeability) = r.matrix(8, Reader::f64)? {
            let table = thresholds::permeability(r.f64()?, r.f64()?)?;
            world.set_permeability(permeability, table)?;
        }
        if let Some(watermap) = r.matrix(8, Reader::f64)? {
            let table = thresholds::watermap(r.f64()?, r.f64()?, r.f64()?)?;
            world.set_watermap(watermap, table)?;
        }
        if let Some(lake_map) = r.matrix(8, Reader::f64)? {
            world.set_lake_map(lake_map)?;
        }
        if let Some(river_map) = r.matrix(8, Reader::f64)? {
            world.set_river_map(river_map)?;
        }
        if let Some(precipitation) = r.matrix(8, Reader::f64)? {
            let table = thresholds::precipitation(r.f64()?, r.f64()?)?;
            world.set_precipitation(precipitation, table)?;
        }
        if let Some(temperature) = r.matrix(8, Reader::f64)? {
            let mut bounds = [0.0; 6];
            for bound in &mut bounds {
                *bound = r.f64()?;
            }
            world.set_temperature(temperature, thresholds::temperature(bounds)?)?;
        }

        if r.remaining() > 0 {
            return Err(FormatError::TrailingBytes(r.remaining()));
        }
        debug!(world = %world.name(), %version, bytes = data.len(), "decoded world");
        Ok(world)
    }

    /// Encodes the world to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), FormatError> {
        std::fs::write(path, self.to_bytes()?)?;
        Ok(())
    }

    /// Reads and decodes the world stored at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<World, FormatError> {
        World::from_bytes(&std::fs::read(path)?)
    }
}

fn mandatory<'a, T>(
    layer: Option<&'a Layer<T>>,
    name: &'static str,
) -> Result<&'a Layer<T>, FormatError> {
    layer.ok_or(FormatError::MissingLayer(name))
}

fn bound(table: Option<&ThresholdTable>, label: &str) -> f64 {
    table.and_then(|t| t.boundary(label)).unwrap_or(f64::NAN)
}

/// `len` as the `u32` the layout stores it in.
fn wire_len(len: usize, field: &'static str) -> Result<u32, FormatError> {
    u32::try_from(len).map_err(|_| FormatError::TooLong { field, len })
}

#[derive(Default)]
struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    fn u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn i32(&mut self, v: i32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn f64(&mut self, v: f64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn string(&mut self, s: &str, field: &'static str) -> Result<(), FormatError> {
        self.u32(wire_len(s.len(), field)?);
        self.buf.extend_from_slice(s.as_bytes());
        Ok(())
    }

    fn matrix<T: Copy>(
        &mut self,
        grid: Option<&Grid<T>>,
        mut cell: impl FnMut(&mut Self, T),
    ) -> Result<(), FormatError> {
        let Some(grid) = grid else {
            self.u32(0);
            return Ok(());
        };
        self.u32(wire_len(grid.height(), "matrix rows")?);
        let width = wire_len(grid.width(), "matrix row")?;
        for row in grid.rows() {
            self.u32(width);
            for &v in row {
                cell(self, v);
            }
        }
        Ok(())
    }

    fn real(&mut self, layer: Option<&Layer<f64>>) -> Result<(), FormatError> {
        self.matrix(layer.map(|l| &l.data), |w, v| w.f64(v))
    }

    /// Real matrix followed by the first `bounds` threshold boundaries.
    fn banded(&mut self, layer: Option<&Layer<f64>>, bounds: usize) -> Result<(), FormatError> {
        self.real(layer)?;
        if let Some(table) = layer.and_then(|l| l.thresholds.as_ref()) {
            for i in 0..bounds {
                self.f64(table.boundary_at(i).unwrap_or(f64::NAN));
            }
        }
        Ok(())
    }
}

struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Fails unless at least `len` more bytes are available.
    fn ensure(&self, len: usize) -> Result<(), FormatError> {
        if len > self.remaining() {
            return Err(FormatError::Truncated {
                expected: self.pos.saturating_add(len),
                actual: self.data.len(),
            });
        }
        Ok(())
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], FormatError> {
        self.ensure(len)?;
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], FormatError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    fn u32(&mut self) -> Result<u32, FormatError> {
        Ok(u32::from_le_bytes(self.array()?))
    }

    fn u64(&mut self) -> Result<u64, FormatError> {
        Ok(u64::from_le_bytes(self.array()?))
    }

    fn i32(&mut self) -> Result<i32, FormatError> {
        Ok(i32::from_le_bytes(self.array()?))
    }

    fn f64(&mut self) -> Result<f64, FormatError> {
        Ok(f64::from_le_bytes(self.array()?))
    }

    fn bool(&mut self) -> Result<bool, FormatError> {
        match self.array::<1>()? {
            [0] => Ok(false),
            [1] => Ok(true),
            [other] => Err(FormatError::InvalidBool(other)),
        }
    }

    fn biome(&mut self) -> Result<Biome, FormatError> {
        let code = self.i32()?;
        Biome::from_code(i64::from(code)).map_err(|_| FormatError::CategoryNotFound(code))
    }

    fn string(&mut self) -> Result<String, FormatError> {
        let len = self.u32()? as usize;
        Ok(String::from_utf8(self.take(len)?.to_vec())?)
    }

    /// Reads a matrix whose cells take `cell_size` bytes; `None` for zero rows.
    fn matrix<T>(
        &mut self,
        cell_size: usize,
        mut cell: impl FnMut(&mut Self) -> Result<T, FormatError>,
    ) -> Result<Option<Grid<T>>, FormatError> {
        let rows = self.u32()? as usize;
        if rows == 0 {
            return Ok(None);
        }
        self.ensure(rows.saturating_mul(4))?;
        let mut out = Vec::with_capacity(rows);
        for _ in 0..rows {
            let len = self.u32()? as usize;
            self.ensure(len.saturating_mul(cell_size))?;
            let mut row = Vec::with_capacity(len);
            for _ in 0..len {
                row.push(cell(self)?);
            }
            out.push(row);
        }
        Ok(Some(Grid::from_rows(out)?))
    }
}
