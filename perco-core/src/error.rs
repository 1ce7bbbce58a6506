//! Error types for the percolation core.
//!
//! Every fallible operation returns [`LatticeError`]. Decoding failures of the
//! plain-text snapshot format are described by [`SnapshotError`] and failures
//! raised by external node readers by [`NodeSourceError`]; both are wrapped by
//! [`LatticeError`] together with the identity of the offending input.

use std::{fmt, io, sync::Arc};

use thiserror::Error;

use crate::node::NodeId;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced while decoding or encoding a lattice snapshot.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum SnapshotError {
    /// The header ended before the named field was read.
    #[error("snapshot header is missing the `{field}` field")]
    MissingHeader {
        /// Header field that could not be read.
        field: &'static str,
    },
    /// A header field was not a positive integer, or the dimensions exceed
    /// [`crate::MAX_SNAPSHOT_NODES`].
    #[error("snapshot header field `{field}` has invalid value `{token}`")]
    InvalidHeader {
        /// Header field that failed to parse.
        field: &'static str,
        /// Raw token found in the input.
        token: String,
    },
    /// The topology token does not name a known topology.
    #[error("unknown topology `{token}`")]
    UnknownTopology {
        /// Raw token found in the input.
        token: String,
    },
    /// An infection token was something other than `0` or `1`.
    #[error("infection token `{token}` at node {position} must be 0 or 1")]
    InvalidToken {
        /// Raw token found in the input.
        token: String,
        /// Zero-based node position in generation order.
        position: usize,
    },
    /// The number of infection tokens disagrees with the generated topology.
    #[error("snapshot describes {found} nodes but the topology generated {expected}")]
    NodeCountMismatch {
        /// Number of nodes produced by the topology.
        expected: usize,
        /// Number of infection tokens present in the input.
        found: usize,
    },
    /// Reading or writing the underlying stream failed.
    #[error("snapshot i/o failed ({kind:?}): {message}")]
    Io {
        /// Category reported by the operating system.
        kind: io::ErrorKind,
        /// Rendered operating system message.
        message: String,
    },
}

impl From<io::Error> for SnapshotError {
    fn from(error: io::Error) -> Self {
        Self::Io {
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

define_error_codes! {
    /// Stable codes describing [`SnapshotError`] variants.
    enum SnapshotErrorCode for SnapshotError {
        /// The header ended before the named field was read.
        MissingHeader => MissingHeader { .. } => "SNAPSHOT_MISSING_HEADER",
        /// A header field could not be parsed.
        InvalidHeader => InvalidHeader { .. } => "SNAPSHOT_INVALID_HEADER",
        /// The topology token does not name a known topology.
        UnknownTopology => UnknownTopology { .. } => "SNAPSHOT_UNKNOWN_TOPOLOGY",
        /// An infection token was something other than `0` or `1`.
        InvalidToken => InvalidToken { .. } => "SNAPSHOT_INVALID_TOKEN",
        /// The number of infection tokens disagrees with the topology.
        NodeCountMismatch => NodeCountMismatch { .. } => "SNAPSHOT_NODE_COUNT_MISMATCH",
        /// Reading or writing the underlying stream failed.
        Io => Io { .. } => "SNAPSHOT_IO",
    }
}

/// An error produced by a [`crate::NodeSource`] implementation.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum NodeSourceError {
    /// A link or boundary tag referenced a node the source never created.
    #[error("node {node} does not exist in the source")]
    UnknownNode {
        /// The node handle that could not be resolved.
        node: NodeId,
    },
    /// The source produced no nodes.
    #[error("node source produced no nodes")]
    EmptyGraph,
}

define_error_codes! {
    /// Stable codes describing [`NodeSourceError`] variants.
    enum NodeSourceErrorCode for NodeSourceError {
        /// A link or boundary tag referenced a node the source never created.
        UnknownNode => UnknownNode { .. } => "NODE_SOURCE_UNKNOWN_NODE",
        /// The source produced no nodes.
        EmptyGraph => EmptyGraph => "NODE_SOURCE_EMPTY",
    }
}

/// Broad category of a [`LatticeError`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorKind {
    /// An argument violated a documented precondition.
    Validation,
    /// The caller invoked operations in an unsupported order.
    State,
    /// A persisted snapshot was malformed or could not be accessed.
    Format,
    /// An external node source failed.
    Source,
}

/// Error type produced by lattice construction, infection, clustering and
/// persistence.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum LatticeError {
    /// Width or height was zero.
    #[error("{field} must be at least 1 (got {got})")]
    InvalidDimension {
        /// Either `"width"` or `"height"`.
        field: &'static str,
        /// The rejected value.
        got: usize,
    },
    /// Infection probability was outside `[0, 1]` or not a number.
    #[error("infection probability must lie in [0, 1] (got {got})")]
    InvalidProbability {
        /// The rejected probability.
        got: f64,
    },
    /// A node had to be infected for the requested operation.
    #[error("node {node} is not infected")]
    NodeNotInfected {
        /// The offending node.
        node: NodeId,
    },
    /// A node was already assigned to a cluster.
    #[error("node {node} already belongs to a cluster")]
    NodeAlreadyClustered {
        /// The offending node.
        node: NodeId,
    },
    /// A node had to belong to a cluster for the requested operation.
    #[error("node {node} does not belong to a cluster")]
    NodeNotClustered {
        /// The offending node.
        node: NodeId,
    },
    /// A node handle did not resolve to a node of this graph.
    #[error("node {node} does not exist")]
    UnknownNode {
        /// The unresolved node handle.
        node: NodeId,
    },
    /// A row index was outside `[0, len)`.
    #[error("row index {index} is out of bounds for a row of {len} nodes")]
    RowIndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// Number of nodes in the row.
        len: usize,
    },
    /// An explicit infection pattern did not cover every node exactly once.
    #[error("infection pattern has {got} entries but the lattice has {expected} nodes")]
    PatternLengthMismatch {
        /// Number of nodes in the lattice.
        expected: usize,
        /// Number of entries supplied.
        got: usize,
    },
    /// Percolation clusters were requested before the percolation test ran.
    #[error("percolation clusters requested before has_percolation_cluster()")]
    PercolationNotChecked,
    /// Percolation was queried on a lattice whose nodes carry no boundary ids.
    #[error("percolation queried on a lattice without boundaries")]
    NoBoundaries,
    /// The operation needs a lattice built from a structure config.
    #[error("lattice was not generated from a structure config")]
    NotGenerated,
    /// A snapshot could not be decoded or written.
    #[error("snapshot `{origin}` failed: {error}")]
    Snapshot {
        /// Identity of the file or stream involved.
        origin: Arc<str>,
        #[source]
        /// Underlying format or i/o failure.
        error: SnapshotError,
    },
    /// A [`crate::NodeSource`] failed while producing nodes.
    #[error("node source `{source_name}` failed: {error}")]
    Source {
        /// Name reported by the node source.
        source_name: Arc<str>,
        #[source]
        /// Underlying node source error.
        error: NodeSourceError,
    },
}

define_error_codes! {
    /// Stable codes describing [`LatticeError`] variants.
    enum LatticeErrorCode for LatticeError {
        /// Width or height was zero.
        InvalidDimension => InvalidDimension { .. } => "LATTICE_INVALID_DIMENSION",
        /// Infection probability was outside `[0, 1]`.
        InvalidProbability => InvalidProbability { .. } => "LATTICE_INVALID_PROBABILITY",
        /// A node had to be infected.
        NodeNotInfected => NodeNotInfected { .. } => "LATTICE_NODE_NOT_INFECTED",
        /// A node was already assigned to a cluster.
        NodeAlreadyClustered => NodeAlreadyClustered { .. } => "LATTICE_NODE_ALREADY_CLUSTERED",
        /// A node had to belong to a cluster.
        NodeNotClustered => NodeNotClustered { .. } => "LATTICE_NODE_NOT_CLUSTERED",
        /// A node handle did not resolve.
        UnknownNode => UnknownNode { .. } => "LATTICE_UNKNOWN_NODE",
        /// A row index was out of bounds.
        RowIndexOutOfBounds => RowIndexOutOfBounds { .. } => "LATTICE_ROW_INDEX_OUT_OF_BOUNDS",
        /// An infection pattern had the wrong length.
        PatternLengthMismatch => PatternLengthMismatch { .. } => "LATTICE_PATTERN_LENGTH_MISMATCH",
        /// Percolation clusters were requested too early.
        PercolationNotChecked => PercolationNotChecked => "LATTICE_PERCOLATION_NOT_CHECKED",
        /// Percolation was queried without boundaries.
        NoBoundaries => NoBoundaries => "LATTICE_NO_BOUNDARIES",
        /// The lattice was not generated from a structure config.
        NotGenerated => NotGenerated => "LATTICE_NOT_GENERATED",
        /// A snapshot could not be decoded or written.
        SnapshotFailure => Snapshot { .. } => "LATTICE_SNAPSHOT_FAILURE",
        /// A node source failed.
        SourceFailure => Source { .. } => "LATTICE_SOURCE_FAILURE",
    }
}

impl LatticeError {
    /// Classify this error as a validation, state, format or source failure.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidDimension { .. }
            | Self::InvalidProbability { .. }
            | Self::NodeNotInfected { .. }
            | Self::NodeAlreadyClustered { .. }
            | Self::NodeNotClustered { .. }
            | Self::UnknownNode { .. }
            | Self::RowIndexOutOfBounds { .. }
            | Self::PatternLengthMismatch { .. } => ErrorKind::Validation,
            Self::PercolationNotChecked | Self::NoBoundaries | Self::NotGenerated => {
                ErrorKind::State
            }
            Self::Snapshot { .. } => ErrorKind::Format,
            Self::Source { .. } => ErrorKind::Source,
        }
    }

    /// Retrieve the inner [`SnapshotErrorCode`] when the error came from a snapshot.
    pub const fn snapshot_code(&self) -> Option<SnapshotErrorCode> {
        match self {
            Self::Snapshot { error, .. } => Some(error.code()),
            _ => None,
        }
    }

    /// Retrieve the inner [`NodeSourceErrorCode`] when the error came from a node source.
    pub const fn source_code(&self) -> Option<NodeSourceErrorCode> {
        match self {
            Self::Source { error, .. } => Some(error.code()),
            _ => None,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, LatticeError>;
