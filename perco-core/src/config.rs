//! Structure configuration describing how to build a lattice.
//!
//! A [`StructureConfig`] is validated once at construction and is immutable
//! afterwards. Equality covers every field so a lattice can skip regeneration
//! when asked to rebuild the structure it already holds.

use std::{fmt, num::NonZeroUsize, str::FromStr};

use crate::{LatticeError, ParseTopologyError, Result, Topology, topology::GeneratedLattice};

const SIDE_BOUNDARIES_SUFFIX: &str = "+LeftRight";

/// Width and height of the default 100×100 structure.
const DEFAULT_SIDE: NonZeroUsize = NonZeroUsize::MIN.saturating_add(99);

/// Validated `(width, height, topology)` triple plus the side-boundary flag.
///
/// # Examples
/// ```
/// use perco_core::{StructureConfig, Topology};
///
/// let config = StructureConfig::new(5, 3, Topology::Triangular)?;
/// assert_eq!(config.width().get(), 5);
/// assert_eq!(config.height().get(), 3);
/// assert_eq!(config, StructureConfig::new(5, 3, Topology::Triangular)?);
/// assert!(StructureConfig::new(0, 3, Topology::Triangular).is_err());
/// # Ok::<(), perco_core::LatticeError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StructureConfig {
    width: NonZeroUsize,
    height: NonZeroUsize,
    topology: Topology,
    side_boundaries: bool,
}

impl StructureConfig {
    /// Validates the dimensions and creates a configuration without side
    /// boundaries.
    ///
    /// # Errors
    /// Returns [`LatticeError::InvalidDimension`] when `width` or `height` is
    /// zero.
    pub fn new(width: usize, height: usize, topology: Topology) -> Result<Self> {
        let width = NonZeroUsize::new(width).ok_or(LatticeError::InvalidDimension {
            field: "width",
            got: width,
        })?;
        let height = NonZeroUsize::new(height).ok_or(LatticeError::InvalidDimension {
            field: "height",
            got: height,
        })?;
        Ok(Self {
            width,
            height,
            topology,
            side_boundaries: false,
        })
    }

    /// Returns a copy that also tags left and right boundaries.
    #[must_use]
    pub fn with_side_boundaries(mut self, enabled: bool) -> Self {
        self.side_boundaries = enabled;
        self
    }

    /// Returns the number of nodes requested per row.
    #[must_use]
    pub fn width(&self) -> NonZeroUsize {
        self.width
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn height(&self) -> NonZeroUsize {
        self.height
    }

    /// Returns the topology.
    #[must_use]
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Returns whether leftmost and rightmost nodes are tagged.
    #[must_use]
    pub fn side_boundaries(&self) -> bool {
        self.side_boundaries
    }

    /// Returns the persistence token for the topology and side-boundary flag.
    ///
    /// # Examples
    /// ```
    /// use perco_core::{StructureConfig, Topology};
    ///
    /// let config = StructureConfig::new(2, 2, Topology::Kagome)?.with_side_boundaries(true);
    /// assert_eq!(config.topology_token(), "Kagome+LeftRight");
    /// # Ok::<(), perco_core::LatticeError>(())
    /// ```
    #[must_use]
    pub fn topology_token(&self) -> String {
        if self.side_boundaries {
            format!("{}{SIDE_BOUNDARIES_SUFFIX}", self.topology.name())
        } else {
            self.topology.name().to_owned()
        }
    }

    /// Runs the topology generator and the optional side-boundary pass.
    pub(crate) fn build(&self) -> Result<GeneratedLattice> {
        let mut lattice = self.topology.generate(self.width, self.height)?;
        if self.side_boundaries {
            lattice.tag_sides()?;
        }
        Ok(lattice)
    }
}

impl Default for StructureConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_SIDE,
            height: DEFAULT_SIDE,
            topology: Topology::Rectangular,
            side_boundaries: false,
        }
    }
}

impl fmt::Display for StructureConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}x{}",
            self.topology_token(),
            self.width,
            self.height
        )
    }
}

/// Topology token optionally followed by the side-boundary suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TopologyToken {
    pub(crate) topology: Topology,
    pub(crate) side_boundaries: bool,
}

impl FromStr for TopologyToken {
    type Err = ParseTopologyError;

    fn from_str(token: &str) -> core::result::Result<Self, Self::Err> {
        let (name, side_boundaries) = match token.strip_suffix(SIDE_BOUNDARIES_SUFFIX) {
            Some(name) => (name, true),
            None => (token, false),
        };
        let topology = name.parse::<Topology>().map_err(|_| ParseTopologyError {
            token: token.to_owned(),
        })?;
        Ok(Self {
            topology,
            side_boundaries,
        })
    }
}

/// Configures and constructs [`StructureConfig`] values.
///
/// # Examples
/// ```
/// use perco_core::{StructureConfigBuilder, Topology};
///
/// let config = StructureConfigBuilder::new()
///     .with_width(8)
///     .with_height(4)
///     .with_topology(Topology::Kagome)
///     .build()
///     .expect("dimensions are valid");
/// assert_eq!(config.topology(), Topology::Kagome);
/// ```
#[derive(Debug, Clone)]
pub struct StructureConfigBuilder {
    width: usize,
    height: usize,
    topology: Topology,
    side_boundaries: bool,
}

impl Default for StructureConfigBuilder {
    fn default() -> Self {
        Self {
            width: DEFAULT_SIDE.get(),
            height: DEFAULT_SIDE.get(),
            topology: Topology::Rectangular,
            side_boundaries: false,
        }
    }
}

impl StructureConfigBuilder {
    /// Creates a builder describing a 100×100 rectangular lattice.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the width.
    #[must_use]
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Overrides the height.
    #[must_use]
    pub fn with_height(mut self, height: usize) -> Self {
        self.height = height;
        self
    }

    /// Overrides the topology.
    #[must_use]
    pub fn with_topology(mut self, topology: Topology) -> Self {
        self.topology = topology;
        self
    }

    /// Enables or disables left and right boundary tagging.
    #[must_use]
    pub fn with_side_boundaries(mut self, enabled: bool) -> Self {
        self.side_boundaries = enabled;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// Returns [`LatticeError::InvalidDimension`] when a dimension is zero.
    pub fn build(self) -> Result<StructureConfig> {
        Ok(StructureConfig::new(self.width, self.height, self.topology)?
            .with_side_boundaries(self.side_boundaries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BaseTopology;
    use rstest::rstest;

    #[rstest]
    #[case(0, 1, "width")]
    #[case(1, 0, "height")]
    #[case(0, 0, "width")]
    fn rejects_zero_dimensions(
        #[case] width: usize,
        #[case] height: usize,
        #[case] field: &'static str,
    ) {
        let err = StructureConfig::new(width, height, Topology::Rectangular)
            .expect_err("zero dimension must fail");
        assert_eq!(err, LatticeError::InvalidDimension { field, got: 0 });
    }

    #[test]
    fn equality_covers_every_field() {
        let base = StructureConfig::new(3, 3, Topology::Rectangular).expect("valid");
        assert_ne!(
            base,
            StructureConfig::new(3, 3, Topology::Triangular).expect("valid")
        );
        assert_ne!(
            base,
            StructureConfig::new(3, 4, Topology::Rectangular).expect("valid")
        );
        assert_ne!(base, base.with_side_boundaries(true));
    }

    #[test]
    fn default_matches_builder_default() {
        let built = StructureConfigBuilder::new().build().expect("valid");
        assert_eq!(built, StructureConfig::default());
        assert_eq!(built.width().get(), 100);
        assert_eq!(built.height().get(), 100);
        assert_eq!(built.topology(), Topology::Rectangular);
        assert!(!built.side_boundaries());
        assert_eq!(StructureConfig::default().to_string(), "Rectangle 100x100");
    }

    #[rstest]
    #[case("Rectangle", Topology::Rectangular, false)]
    #[case("Cylinder+LeftRight", Topology::Cylindrical { base: BaseTopology::Rectangular }, true)]
    #[case("Kagome+LeftRight", Topology::Kagome, true)]
    fn topology_tokens_round_trip(
        #[case] token: &str,
        #[case] topology: Topology,
        #[case] side_boundaries: bool,
    ) {
        let parsed: TopologyToken = token.parse().expect("token is valid");
        assert_eq!(
            parsed,
            TopologyToken {
                topology,
                side_boundaries
            }
        );
        let config = StructureConfig::new(1, 1, topology)
            .expect("valid")
            .with_side_boundaries(side_boundaries);
        assert_eq!(config.topology_token(), token);
    }

    #[test]
    fn suffix_alone_is_rejected() {
        let err = "+LeftRight"
            .parse::<TopologyToken>()
            .expect_err("bare suffix is not a topology");
        assert_eq!(err.token, "+LeftRight");
    }
}
