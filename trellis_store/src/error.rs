// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::model::{EdgeId, NodeId};

/// Result alias for store mutations.
pub type Result<T, E = StoreError> = std::result::Result<T, E>;

/// Why a store mutation was rejected.
///
/// A rejected mutation leaves the registry, the spatial index and the
/// selection exactly as they were.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// A node or edge with this id already exists.
    #[error("id `{0}` is already in use")]
    DuplicateId(String),

    /// An edge names an endpoint that is not in the registry.
    #[error("edge `{edge}` references missing node `{endpoint}`")]
    DanglingEndpoint {
        /// The rejected edge.
        edge: EdgeId,
        /// The first missing endpoint.
        endpoint: NodeId,
    },

    /// Position or size is non-finite, or size is negative.
    #[error("node `{id}` has invalid geometry: {reason}")]
    InvalidGeometry {
        /// The node whose geometry was rejected.
        id: NodeId,
        /// What was wrong with it.
        reason: &'static str,
    },

    /// No node with this id exists.
    #[error("no node with id `{0}`")]
    UnknownNode(NodeId),

    /// No edge with this id exists.
    #[error("no edge with id `{0}`")]
    UnknownEdge(EdgeId),
}
