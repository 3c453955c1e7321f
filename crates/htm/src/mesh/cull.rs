//! Cull - exact reversal of subdivision beneath a node.
//!
//! Splits are undone deepest level first, so every edge a split registered
//! is released before the split that produced its endpoints. Midpoints that
//! lose their last user are cleared from the vertex store; node slots of the
//! removed subtree are tombstoned. Nothing is renumbered until
//! [`Mesh::compact`](super::Mesh::compact).

use super::{Mesh, ROOT_COUNT};
use crate::error::{HtmError, Result};
use crate::node::NodeId;
use crate::vertices::VertexId;

impl Mesh {
  /// Collapse everything deeper than `level` under every root.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "htm::cull_to_level"))]
  pub fn cull_to_level(&mut self, level: u32) -> Result<()> {
    #[cfg(feature = "tracing")]
    let before = self.stats;
    for root in 0..ROOT_COUNT as u32 {
      self.cull_node_to_level(NodeId(root), level)?;
    }
    #[cfg(feature = "tracing")]
    tracing::debug!(
      nodes_culled = self.stats.nodes_culled - before.nodes_culled,
      vertices_cleared = self.stats.vertices_cleared - before.vertices_cleared,
      "culled mesh"
    );
    Ok(())
  }

  /// Collapse everything deeper than `level` within the subtree at `id`.
  ///
  /// Structure at or above `level` is left untouched.
  pub fn cull_node_to_level(&mut self, id: NodeId, level: u32) -> Result<()> {
    if self.nodes.get(id).is_none() {
      return Err(HtmError::UnknownNode { node: id });
    }
    for at in self.nodes_at_level(id, level) {
      if self.nodes.get(at).is_some_and(|n| !n.is_leaf()) {
        self.cull(at)?;
      }
    }
    Ok(())
  }

  /// Undo all subdivision at and beneath `id`, leaving it a leaf.
  ///
  /// Culling a leaf is a no-op.
  pub fn cull(&mut self, id: NodeId) -> Result<()> {
    let node = *self.nodes.get(id).ok_or(HtmError::UnknownNode { node: id })?;
    if node.is_leaf() {
      return Ok(());
    }

    // Subdivision may be uneven, so unwind from the deepest leaf anywhere
    // in the subtree rather than along one spine.
    let deepest = self.max_depth(id).unwrap_or(node.level);
    for level in (node.level + 1..=deepest).rev() {
      for at in self.nodes_at_level(id, level) {
        self.unsplit(at);
      }
    }
    self.unsplit(id);
    #[cfg(feature = "tracing")]
    tracing::trace!(node = %id, from = deepest, to = node.level, "cull");
    Ok(())
  }

  /// Release a split node's edges and drop its children.
  fn unsplit(&mut self, id: NodeId) {
    let Some(node) = self.nodes.get(id).copied() else {
      return;
    };
    let Some(children) = node.children else {
      return;
    };
    for (a, b) in node.edges() {
      self.merge_edge(a, b);
    }
    for child in children {
      self.remove_subtree(child);
    }
    if let Some(n) = self.nodes.get_mut(id) {
      n.children = None;
    }
  }

  fn merge_edge(&mut self, a: VertexId, b: VertexId) {
    if let Some(orphans) = self.edges.merge(a, b) {
      for v in orphans {
        self.vertices.clear(v);
        self.stats.vertices_cleared += 1;
      }
    }
  }

  fn remove_subtree(&mut self, id: NodeId) {
    if let Some(node) = self.nodes.remove(id) {
      self.stats.nodes_culled += 1;
      if let Some(children) = node.children {
        for child in children {
          self.remove_subtree(child);
        }
      }
    }
  }
}

#[cfg(test)]
#[path = "cull_test.rs"]
mod cull_test;
