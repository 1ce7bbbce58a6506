//! Boundary identifiers used by the percolation test.
//!
//! A lattice percolates when one cluster touches every boundary id present in
//! the lattice. Generators tag the first and last rows with [`BoundaryId::TOP`]
//! and [`BoundaryId::BOTTOM`]; the side-boundary pass adds
//! [`BoundaryId::LEFT`] and [`BoundaryId::RIGHT`].

use std::{collections::BTreeSet, fmt};

/// Small integer tag naming a logical edge or region of a lattice.
///
/// # Examples
/// ```
/// use perco_core::BoundaryId;
///
/// assert_eq!(BoundaryId::TOP.get(), 1);
/// assert_eq!(BoundaryId::new(7).get(), 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoundaryId(u32);

impl BoundaryId {
    /// First generated row.
    pub const TOP: Self = Self(1);
    /// Last generated row.
    pub const BOTTOM: Self = Self(2);
    /// Leftmost node of every row.
    pub const LEFT: Self = Self(3);
    /// Rightmost node of every row.
    pub const RIGHT: Self = Self(4);

    /// Creates a custom boundary identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn new(id: u32) -> Self { Self(id) }

    /// Returns the underlying numeric identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn get(self) -> u32 { self.0 }
}

impl fmt::Display for BoundaryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::TOP => f.write_str("top"),
            Self::BOTTOM => f.write_str("bottom"),
            Self::LEFT => f.write_str("left"),
            Self::RIGHT => f.write_str("right"),
            Self(other) => write!(f, "boundary#{other}"),
        }
    }
}

/// Ordered set of boundary ids touched by a cluster or present in a lattice.
pub type BoundarySet = BTreeSet<BoundaryId>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(BoundaryId::TOP, "top")]
    #[case(BoundaryId::BOTTOM, "bottom")]
    #[case(BoundaryId::LEFT, "left")]
    #[case(BoundaryId::RIGHT, "right")]
    #[case(BoundaryId::new(42), "boundary#42")]
    fn display_names_well_known_boundaries(#[case] id: BoundaryId, #[case] expected: &str) {
        assert_eq!(id.to_string(), expected);
    }
}
