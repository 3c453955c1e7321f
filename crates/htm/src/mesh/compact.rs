//! Compaction - rewrite the stores without culled slots.

use super::Mesh;
use crate::node::NodeId;
use crate::vertices::VertexId;

/// Old to new handle translation produced by [`Mesh::compact`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Remap {
  vertices: Vec<Option<VertexId>>,
  nodes: Vec<Option<NodeId>>,
}

impl Remap {
  /// New handle of a vertex, `None` if it was dropped.
  pub fn vertex(&self, old: VertexId) -> Option<VertexId> {
    self.vertices.get(old.index()).copied().flatten()
  }

  /// New handle of a node, `None` if it was dropped.
  pub fn node(&self, old: NodeId) -> Option<NodeId> {
    self.nodes.get(old.index()).copied().flatten()
  }

  /// True when no slot moved or disappeared.
  pub fn is_identity(&self) -> bool {
    let same_vertex = |(i, v): (usize, &Option<VertexId>)| *v == Some(VertexId(i as u32));
    let same_node = |(i, n): (usize, &Option<NodeId>)| *n == Some(NodeId(i as u32));
    self.vertices.iter().enumerate().all(same_vertex) && self.nodes.iter().enumerate().all(same_node)
  }
}

impl Mesh {
  /// Drop cleared vertices and culled nodes, renumbering everything.
  ///
  /// Relative order is kept, so the roots stay at `0..8`. Every handle held
  /// from before the call must be translated through the returned
  /// [`Remap`].
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "htm::compact"))]
  pub fn compact(&mut self) -> Remap {
    let (vertices, vertex_remap) = self.vertices.compacted();
    let (nodes, node_remap) = self.nodes.compacted(&vertex_remap);
    let edges = self.edges.compacted(&vertex_remap, vertices.len());

    #[cfg(feature = "tracing")]
    tracing::debug!(
      vertices_dropped = self.vertices.len() - vertices.len(),
      nodes_dropped = self.nodes.len() - nodes.len(),
      "compacted mesh"
    );

    self.vertices = vertices;
    self.nodes = nodes;
    self.edges = edges;
    self.stats.compactions += 1;

    Remap {
      vertices: vertex_remap,
      nodes: node_remap,
    }
  }
}

#[cfg(test)]
#[path = "compact_test.rs"]
mod compact_test;
