//! Plain-text snapshots of a lattice's infection state.
//!
//! A snapshot stores the topology token, width and height on separate lines,
//! followed by one line per row holding a `1 ` or `0 ` token for every node.
//! Adjacency is not stored: loading regenerates the structure and then applies
//! the infection tokens in generation order.
//!
//! ```text
//! Rectangle
//! 3
//! 2
//! 1 0 1
//! 0 0 1
//! ```

use std::{
    fs::{self, File},
    io::{BufRead, BufReader, BufWriter, Write},
    num::NonZeroUsize,
    path::Path,
    str::Lines,
    sync::Arc,
};

use tracing::{Span, field, instrument};

use crate::{
    Lattice, LatticeError, Result, SnapshotError, StructureConfig, config::TopologyToken,
};

/// Largest `width * height` a snapshot header may declare. Larger headers are
/// rejected before any node is allocated.
pub const MAX_SNAPSHOT_NODES: usize = 1 << 26;

fn wrap(origin: &str) -> impl Fn(SnapshotError) -> LatticeError + '_ {
    move |error| LatticeError::Snapshot {
        origin: Arc::from(origin),
        error,
    }
}

impl Lattice {
    /// Writes the snapshot of this lattice to `writer`. `origin` names the
    /// destination in error reports.
    ///
    /// # Errors
    /// Returns [`LatticeError::NotGenerated`] when the lattice was not built
    /// from a structure config and [`LatticeError::Snapshot`] when writing
    /// fails.
    ///
    /// # Examples
    /// ```
    /// use perco_core::{Lattice, StructureConfig, Topology};
    ///
    /// let mut lattice = Lattice::generated(StructureConfig::new(2, 2, Topology::Triangular)?)?;
    /// lattice.apply_infection(&[true, false, false, true])?;
    ///
    /// let mut buffer = Vec::new();
    /// lattice.save(&mut buffer, "buffer")?;
    /// assert_eq!(String::from_utf8_lossy(&buffer), "Triangle\n2\n2\n1 0 \n0 1 \n");
    /// # Ok::<(), perco_core::LatticeError>(())
    /// ```
    #[instrument(name = "snapshot.save", err, skip(self, writer), fields(nodes = self.len()))]
    pub fn save<W: Write>(&self, mut writer: W, origin: &str) -> Result<()> {
        let config = self.config().ok_or(LatticeError::NotGenerated)?;
        let fail = wrap(origin);
        write_snapshot(self, config, &mut writer)
            .and_then(|()| writer.flush())
            .map_err(|error| fail(error.into()))
    }

    /// Writes the snapshot to `path`, creating missing parent directories.
    ///
    /// # Errors
    /// As for [`Lattice::save`], plus [`LatticeError::Snapshot`] when the file
    /// or its directories cannot be created.
    pub fn save_to_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let origin = path.display().to_string();
        if self.config().is_none() {
            return Err(LatticeError::NotGenerated);
        }
        let fail = wrap(&origin);
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|error| fail(error.into()))?;
        }
        let file = File::create(path).map_err(|error| fail(error.into()))?;
        self.save(BufWriter::new(file), &origin)
    }

    /// Reads a snapshot from `reader`, regenerates the structure it names and
    /// applies its infection tokens. Clusters are discovered before returning.
    ///
    /// # Errors
    /// Returns [`LatticeError::Snapshot`] naming `origin` when the header is
    /// missing or malformed, declares more than [`MAX_SNAPSHOT_NODES`]
    /// grid cells, the topology token is unknown, an infection
    /// token is not `0` or `1`, or the token count differs from the number of
    /// generated nodes.
    ///
    /// # Examples
    /// ```
    /// use perco_core::Lattice;
    ///
    /// let text = "Rectangle\n3\n1\n1 1 0 \n";
    /// let lattice = Lattice::load(text.as_bytes(), "inline")?;
    /// assert_eq!(lattice.clusters().len(), 1);
    /// assert_eq!(lattice.clusters()[0].size(), 2);
    /// # Ok::<(), perco_core::LatticeError>(())
    /// ```
    #[instrument(
        name = "snapshot.load",
        err,
        skip(reader),
        fields(nodes = field::Empty, clusters = field::Empty),
    )]
    pub fn load<R: BufRead>(mut reader: R, origin: &str) -> Result<Self> {
        let fail = wrap(origin);
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|error| fail(error.into()))?;

        let mut lines = text.lines();
        let config = read_header(&mut lines).map_err(&fail)?;
        let mut lattice = Self::generated(config)?;
        let pattern = read_pattern(lines, lattice.len()).map_err(&fail)?;
        let clusters = lattice.apply_infection(&pattern)?;

        Span::current().record("nodes", lattice.len());
        Span::current().record("clusters", clusters);
        Ok(lattice)
    }

    /// Reads a snapshot from the file at `path`.
    ///
    /// # Errors
    /// As for [`Lattice::load`], plus [`LatticeError::Snapshot`] when the file
    /// cannot be opened.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let origin = path.display().to_string();
        let file = File::open(path).map_err(|error| wrap(&origin)(error.into()))?;
        Self::load(BufReader::new(file), &origin)
    }
}

fn write_snapshot<W: Write>(
    lattice: &Lattice,
    config: &StructureConfig,
    writer: &mut W,
) -> std::io::Result<()> {
    writeln!(writer, "{}", config.topology_token())?;
    writeln!(writer, "{}", config.width())?;
    writeln!(writer, "{}", config.height())?;
    for row in lattice.rows() {
        for id in row.iter() {
            let infected = lattice.node(id).is_some_and(|node| node.is_infected());
            write!(writer, "{} ", u8::from(infected))?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

fn read_header(lines: &mut Lines<'_>) -> core::result::Result<StructureConfig, SnapshotError> {
    let token = lines
        .next()
        .ok_or(SnapshotError::MissingHeader { field: "topology" })?
        .trim();
    let TopologyToken {
        topology,
        side_boundaries,
    } = token
        .parse::<TopologyToken>()
        .map_err(|_| SnapshotError::UnknownTopology {
            token: token.to_owned(),
        })?;
    let width = read_dimension(lines, "width")?;
    let height = read_dimension(lines, "height")?;
    if width
        .checked_mul(height)
        .is_none_or(|nodes| nodes.get() > MAX_SNAPSHOT_NODES)
    {
        return Err(SnapshotError::InvalidHeader {
            field: "dimensions",
            token: format!("{width}x{height}"),
        });
    }
    let config = StructureConfig::new(width.get(), height.get(), topology).map_err(|_| {
        SnapshotError::InvalidHeader {
            field: "width",
            token: width.to_string(),
        }
    })?;
    Ok(config.with_side_boundaries(side_boundaries))
}

fn read_dimension(
    lines: &mut Lines<'_>,
    field: &'static str,
) -> core::result::Result<NonZeroUsize, SnapshotError> {
    let token = lines
        .next()
        .ok_or(SnapshotError::MissingHeader { field })?
        .trim();
    token
        .parse::<NonZeroUsize>()
        .map_err(|_| SnapshotError::InvalidHeader {
            field,
            token: token.to_owned(),
        })
}

fn read_pattern(lines: Lines<'_>, expected: usize) -> core::result::Result<Vec<bool>, SnapshotError> {
    let mut pattern = Vec::with_capacity(expected);
    for (position, token) in lines.flat_map(str::split_whitespace).enumerate() {
        let infected = match token {
            "1" => true,
            "0" => false,
            other => {
                return Err(SnapshotError::InvalidToken {
                    token: other.to_owned(),
                    position,
                });
            }
        };
        pattern.push(infected);
    }
    if pattern.len() != expected {
        return Err(SnapshotError::NodeCountMismatch {
            expected,
            found: pattern.len(),
        });
    }
    Ok(pattern)
}
