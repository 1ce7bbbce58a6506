//! Percolation core library.
//!
//! Builds regular lattices from a [`StructureConfig`], infects their nodes
//! with a Bernoulli trial, partitions the infected nodes into [`Cluster`]s
//! and tests whether any cluster spans every boundary of the lattice.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod boundary;
mod cluster;
mod config;
mod error;
mod graph;
mod lattice;
mod node;
mod row;
mod snapshot;
mod source;
mod topology;

#[cfg(test)]
mod properties;
#[cfg(test)]
mod test_utils;

pub use crate::{
    boundary::{BoundaryId, BoundarySet},
    cluster::Cluster,
    config::{StructureConfig, StructureConfigBuilder},
    error::{
        ErrorKind, LatticeError, LatticeErrorCode, NodeSourceError, NodeSourceErrorCode, Result,
        SnapshotError, SnapshotErrorCode,
    },
    graph::NodeGraph,
    lattice::{INFECTION_TOLERANCE, Lattice},
    node::{Node, NodeId, Substance},
    row::Row,
    snapshot::MAX_SNAPSHOT_NODES,
    source::{GraphBuilder, NodeSource},
    topology::{BaseTopology, GeneratedLattice, ParseTopologyError, Topology},
};
