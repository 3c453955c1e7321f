//! Lazy region search.

use std::iter::FusedIterator;

use smallvec::SmallVec;

use super::region::{Coverage, Region};
use crate::mesh::Mesh;
use crate::node::NodeId;

/// Depth-first search for nodes overlapping a region.
///
/// Yields, root-major and children `0..4` in order:
/// - a node fully `Inside`, without descending into it;
/// - a `Partial` leaf;
/// - nothing for an `Outside` leaf.
///
/// Split nodes that are `Partial` or `Outside` are descended into; the
/// latter because corner-only coverage can miss caps that fit inside a
/// triangle.
///
/// Borrows the mesh for its whole life, so the mesh cannot change under a
/// running search, and dropping it early leaves nothing pending.
pub struct Intersections<'a, R> {
  mesh: &'a Mesh,
  region: R,
  stack: SmallVec<[NodeId; 64]>,
}

impl<'a, R: Region> Intersections<'a, R> {
  pub(crate) fn new(mesh: &'a Mesh, region: R) -> Self {
    Self {
      mesh,
      region,
      stack: mesh.roots().rev().collect(),
    }
  }
}

impl<R: Region> Iterator for Intersections<'_, R> {
  type Item = NodeId;

  fn next(&mut self) -> Option<NodeId> {
    while let Some(id) = self.stack.pop() {
      let Some(node) = self.mesh.node(id) else {
        continue;
      };
      let Some(triangle) = self.mesh.triangle(id) else {
        continue;
      };
      match (self.region.coverage(&triangle), node.children) {
        (Coverage::Inside, _) | (Coverage::Partial, None) => return Some(id),
        (Coverage::Partial | Coverage::Outside, Some(children)) => {
          self.stack.extend(children.into_iter().rev());
        }
        (Coverage::Outside, None) => {}
      }
    }
    None
  }
}

impl<R: Region> FusedIterator for Intersections<'_, R> {}

impl Mesh {
  /// Nodes overlapping `region`, see [`Intersections`].
  ///
  /// Pass a reference to reuse a region across searches.
  pub fn intersections<R: Region>(&self, region: R) -> Intersections<'_, R> {
    Intersections::new(self, region)
  }
}

#[cfg(test)]
#[path = "intersections_test.rs"]
mod intersections_test;
