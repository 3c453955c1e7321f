//! Point location.

use glam::DVec3;

use crate::error::{HtmError, Result};
use crate::mesh::Mesh;
use crate::node::{Node, NodeId};

/// Strict containment of direction `p` in a counter-clockwise triangle.
///
/// Directions exactly on an edge belong to neither side.
#[inline]
pub fn triangle_contains(triangle: &[DVec3; 3], p: DVec3) -> bool {
  let [v0, v1, v2] = *triangle;
  v0.cross(v1).dot(p) > 0.0 && v1.cross(v2).dot(p) > 0.0 && v2.cross(v0).dot(p) > 0.0
}

impl Mesh {
  /// Whether node `id` strictly contains `direction`.
  pub fn contains(&self, id: NodeId, direction: DVec3) -> bool {
    self
      .triangle(id)
      .is_some_and(|t| triangle_contains(&t, direction))
  }

  /// Smallest current triangle containing `direction`.
  ///
  /// `direction` need not be normalized. Fails for the zero vector, NaN
  /// input, and directions exactly on a shared edge.
  pub fn lookup_by_cart(&self, direction: DVec3) -> Result<&Node> {
    self
      .roots()
      .find_map(|root| self.locate(root, direction))
      .ok_or_else(|| {
        #[cfg(feature = "tracing")]
        tracing::debug!(%direction, "no triangle contains direction");
        HtmError::NotFound { direction }
      })
  }

  fn locate(&self, id: NodeId, direction: DVec3) -> Option<&Node> {
    if !self.contains(id, direction) {
      return None;
    }
    let node = self.node(id)?;
    match node.children {
      None => Some(node),
      Some(children) => children
        .into_iter()
        .find_map(|child| self.locate(child, direction)),
    }
  }
}

#[cfg(test)]
#[path = "lookup_test.rs"]
mod lookup_test;
