use std::sync::Arc;

use perco_core::{
    ErrorKind, LatticeError, LatticeErrorCode, NodeId, NodeSourceError, NodeSourceErrorCode,
    SnapshotError, SnapshotErrorCode,
};
use rstest::rstest;

#[rstest]
#[case(SnapshotError::MissingHeader { field: "width" }, SnapshotErrorCode::MissingHeader)]
#[case(
    SnapshotError::InvalidHeader { field: "height", token: "x".into() },
    SnapshotErrorCode::InvalidHeader,
)]
#[case(
    SnapshotError::UnknownTopology { token: "Hex".into() },
    SnapshotErrorCode::UnknownTopology,
)]
#[case(
    SnapshotError::InvalidToken { token: "2".into(), position: 3 },
    SnapshotErrorCode::InvalidToken,
)]
#[case(
    SnapshotError::NodeCountMismatch { expected: 4, found: 3 },
    SnapshotErrorCode::NodeCountMismatch,
)]
#[case(
    SnapshotError::from(std::io::Error::from(std::io::ErrorKind::NotFound)),
    SnapshotErrorCode::Io,
)]
fn returns_expected_snapshot_code(
    #[case] error: SnapshotError,
    #[case] expected: SnapshotErrorCode,
) {
    assert_eq!(error.code(), expected);
    assert!(error.code().as_str().starts_with("SNAPSHOT_"));
}

#[rstest]
#[case(
    NodeSourceError::UnknownNode { node: NodeId::new(2) },
    NodeSourceErrorCode::UnknownNode,
)]
#[case(NodeSourceError::EmptyGraph, NodeSourceErrorCode::EmptyGraph)]
fn returns_expected_node_source_code(
    #[case] error: NodeSourceError,
    #[case] expected: NodeSourceErrorCode,
) {
    assert_eq!(error.code(), expected);
    assert_eq!(error.code().to_string(), expected.as_str());
}

#[rstest]
#[case(
    LatticeError::InvalidDimension { field: "width", got: 0 },
    LatticeErrorCode::InvalidDimension,
    ErrorKind::Validation,
)]
#[case(
    LatticeError::InvalidProbability { got: 1.5 },
    LatticeErrorCode::InvalidProbability,
    ErrorKind::Validation,
)]
#[case(
    LatticeError::NodeAlreadyClustered { node: NodeId::new(1) },
    LatticeErrorCode::NodeAlreadyClustered,
    ErrorKind::Validation,
)]
#[case(
    LatticeError::RowIndexOutOfBounds { index: 4, len: 4 },
    LatticeErrorCode::RowIndexOutOfBounds,
    ErrorKind::Validation,
)]
#[case(
    LatticeError::PercolationNotChecked,
    LatticeErrorCode::PercolationNotChecked,
    ErrorKind::State,
)]
#[case(LatticeError::NoBoundaries, LatticeErrorCode::NoBoundaries, ErrorKind::State)]
#[case(LatticeError::NotGenerated, LatticeErrorCode::NotGenerated, ErrorKind::State)]
#[case(
    LatticeError::Snapshot {
        origin: Arc::from("run.txt"),
        error: SnapshotError::UnknownTopology { token: "Hex".into() },
    },
    LatticeErrorCode::SnapshotFailure,
    ErrorKind::Format,
)]
#[case(
    LatticeError::Source {
        source_name: Arc::from("graphml"),
        error: NodeSourceError::EmptyGraph,
    },
    LatticeErrorCode::SourceFailure,
    ErrorKind::Source,
)]
fn returns_expected_lattice_code(
    #[case] error: LatticeError,
    #[case] expected: LatticeErrorCode,
    #[case] kind: ErrorKind,
) {
    assert_eq!(error.code(), expected);
    assert_eq!(error.kind(), kind);
    assert!(error.code().as_str().starts_with("LATTICE_"));
}

#[test]
fn wrapped_errors_expose_inner_codes_and_origin() {
    let error = LatticeError::Snapshot {
        origin: Arc::from("run.txt"),
        error: SnapshotError::InvalidToken {
            token: "7".into(),
            position: 12,
        },
    };
    assert_eq!(error.snapshot_code(), Some(SnapshotErrorCode::InvalidToken));
    assert_eq!(error.source_code(), None);
    assert_eq!(
        error.to_string(),
        "snapshot `run.txt` failed: infection token `7` at node 12 must be 0 or 1"
    );
    let source = std::error::Error::source(&error).expect("inner error is the source");
    assert_eq!(
        source.to_string(),
        "infection token `7` at node 12 must be 0 or 1"
    );
}
