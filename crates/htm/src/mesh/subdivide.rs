//! Adaptive subdivision.
//!
//! A leaf is split into four by the midpoints of its edges:
//!
//! ```text
//!               i0
//!              /  \
//!            e2 -- e1            child 0: (i0, e2, e1)
//!           /  \  /  \           child 1: (i1, e0, e2)
//!         i1 -- e0 -- i2         child 2: (i2, e1, e0)
//!                                child 3: (e0, e1, e2)
//! ```
//!
//! `e0`, `e1`, `e2` sit opposite `i0`, `i1`, `i2`. Each midpoint is looked up
//! in the edge cache first so a neighbor that already split the shared edge
//! hands over its vertex instead of creating a second one.

use glam::DVec3;

use super::{Mesh, ROOT_COUNT};
use crate::error::{HtmError, Result};
use crate::node::{Node, NodeId};
use crate::vertices::VertexId;

/// Midpoint approximation: normalized sum of the endpoints.
#[inline]
pub fn midpoint(a: DVec3, b: DVec3) -> DVec3 {
  (a + b).normalize()
}

impl Mesh {
  /// Subdivide every root until all leaves reach `level`.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "htm::subdivide"))]
  pub fn subdivide(&mut self, level: u32) -> Result<()> {
    #[cfg(feature = "tracing")]
    let before = self.stats;
    for root in 0..ROOT_COUNT as u32 {
      self.subdivide_node(NodeId(root), level)?;
    }
    #[cfg(feature = "tracing")]
    tracing::debug!(
      splits = self.stats.splits - before.splits,
      vertices_created = self.stats.vertices_created - before.vertices_created,
      nodes = self.nodes.len(),
      vertices = self.vertices.len(),
      "subdivided mesh"
    );
    Ok(())
  }

  /// Subdivide the subtree at `id` until its leaves reach `level`.
  ///
  /// Branches already at or past `level` are left alone.
  pub fn subdivide_node(&mut self, id: NodeId, level: u32) -> Result<()> {
    if level > self.config.max_level {
      return Err(HtmError::LevelTooDeep {
        level,
        max: self.config.max_level,
      });
    }
    let node = *self.nodes.get(id).ok_or(HtmError::UnknownNode { node: id })?;
    if node.level >= level {
      return Ok(());
    }

    let children = match node.children {
      Some(children) => children,
      None => self.split(&node)?,
    };
    for child in children {
      self.subdivide_node(child, level)?;
    }
    Ok(())
  }

  /// Split a leaf into four children and wire them to it.
  fn split(&mut self, node: &Node) -> Result<[NodeId; 4]> {
    let [i0, i1, i2] = node.indices;
    let [(a0, b0), (a1, b1), (a2, b2)] = node.edges();
    let e0 = self.edge_midpoint(a0, b0)?;
    let e1 = self.edge_midpoint(a1, b1)?;
    let e2 = self.edge_midpoint(a2, b2)?;

    let first = self.nodes.next_id().0;
    let ids = [
      NodeId(first),
      NodeId(first + 1),
      NodeId(first + 2),
      NodeId(first + 3),
    ];
    let level = node.level + 1;
    let parent = Some(node.index);
    let corners = [[i0, e2, e1], [i1, e0, e2], [i2, e1, e0], [e0, e1, e2]];
    for (id, indices) in ids.into_iter().zip(corners) {
      self.nodes.push(Node::new(id, level, indices, parent));
    }

    if let Some(n) = self.nodes.get_mut(node.index) {
      n.children = Some(ids);
    }
    self.stats.splits += 1;
    #[cfg(feature = "tracing")]
    tracing::trace!(node = %node.index, level, "split");
    Ok(ids)
  }

  /// Cached midpoint of `(a, b)`, computing and caching it on first use.
  fn edge_midpoint(&mut self, a: VertexId, b: VertexId) -> Result<VertexId> {
    let (slot, cached) = self.edges.get_or_create(a, b)?;
    if let Some(mid) = cached {
      self.stats.midpoints_reused += 1;
      return Ok(mid);
    }

    let va = self.vertices.get(a).unwrap_or(DVec3::ZERO);
    let vb = self.vertices.get(b).unwrap_or(DVec3::ZERO);
    let mid = self.vertices.append(midpoint(va, vb));
    self.edges.set_midpoint(slot, mid);
    self.stats.vertices_created += 1;
    Ok(mid)
  }
}

#[cfg(test)]
#[path = "subdivide_test.rs"]
mod subdivide_test;
