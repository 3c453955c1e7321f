//! Error types for mesh mutation and queries.

use glam::DVec3;
use thiserror::Error;

use crate::edges::EDGES_PER_VERTEX;
use crate::node::NodeId;
use crate::vertices::VertexId;

/// Result type alias using [`HtmError`].
pub type Result<T> = std::result::Result<T, HtmError>;

/// Errors raised by the mesh engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HtmError {
  /// A vertex acquired more incident edges than its bucket holds.
  ///
  /// Only reachable when the triangulation itself is broken. The operation
  /// that hit it stops immediately and the mesh must be treated as corrupt.
  #[error(
    "vertex {vertex} exceeded {slots} incident edges; mesh topology is corrupt",
    slots = EDGES_PER_VERTEX
  )]
  EdgeOverflow {
    /// Bucket owner (the larger endpoint index).
    vertex: VertexId,
  },

  /// No root triangle claimed the direction.
  ///
  /// Happens for the zero vector, NaN components, or a direction lying
  /// exactly on a shared edge. Not worth retrying.
  #[error("no triangle contains direction {direction}")]
  NotFound {
    /// The direction that was looked up.
    direction: DVec3,
  },

  /// The node handle is out of range or its slot was culled.
  #[error("node {node} does not exist")]
  UnknownNode {
    /// Offending handle.
    node: NodeId,
  },

  /// Subdivision target beyond what u32 handles can address.
  #[error("subdivision level {level} exceeds maximum {max}")]
  LevelTooDeep {
    /// Requested level.
    level: u32,
    /// Configured maximum.
    max: u32,
  },
}
