//! Node - one triangle of the mesh tree, and the arena that holds them.
//!
//! Nodes reference each other by [`NodeId`] only. Children are always
//! created four at a time, so a node is either a leaf or has exactly four.

use std::fmt;

use crate::vertices::VertexId;

/// Handle into the node store.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NodeId(pub u32);

impl NodeId {
  #[inline]
  pub fn index(self) -> usize {
    self.0 as usize
  }
}

impl fmt::Display for NodeId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "n{}", self.0)
  }
}

/// Triangle node.
///
/// Vertices wind counter-clockwise seen from outside the sphere, which is
/// what the containment test in `lookup_by_cart` relies on.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Node {
  /// Own position in the store.
  pub index: NodeId,
  /// Subdivision level; the octahedron faces are level 1.
  pub level: u32,
  /// Corner vertices.
  pub indices: [VertexId; 3],
  /// The four sub-triangles, `None` for a leaf.
  pub children: Option<[NodeId; 4]>,
  /// Node this one was split from, `None` for the eight roots.
  pub parent: Option<NodeId>,
}

impl Node {
  /// Create a leaf.
  pub fn new(index: NodeId, level: u32, indices: [VertexId; 3], parent: Option<NodeId>) -> Self {
    Self {
      index,
      level,
      indices,
      children: None,
      parent,
    }
  }

  #[inline]
  pub fn is_leaf(&self) -> bool {
    self.children.is_none()
  }

  /// The three edges in split order: opposite corner 0, 1, then 2.
  #[inline]
  pub fn edges(&self) -> [(VertexId, VertexId); 3] {
    let [i0, i1, i2] = self.indices;
    [(i1, i2), (i0, i2), (i0, i1)]
  }
}

/// Arena of nodes. Culled slots stay as `None` until compaction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeStore {
  slots: Vec<Option<Node>>,
}

impl NodeStore {
  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      slots: Vec::with_capacity(capacity),
    }
  }

  /// Handle the next pushed node will get.
  #[inline]
  pub fn next_id(&self) -> NodeId {
    NodeId(self.slots.len() as u32)
  }

  #[inline]
  pub fn push(&mut self, node: Node) {
    debug_assert_eq!(node.index, self.next_id());
    self.slots.push(Some(node));
  }

  #[inline]
  pub fn get(&self, id: NodeId) -> Option<&Node> {
    self.slots.get(id.index()).and_then(Option::as_ref)
  }

  #[inline]
  pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
    self.slots.get_mut(id.index()).and_then(Option::as_mut)
  }

  /// Tombstone a slot.
  #[inline]
  pub fn remove(&mut self, id: NodeId) -> Option<Node> {
    self.slots.get_mut(id.index()).and_then(Option::take)
  }

  /// Number of slots, tombstones included.
  pub fn len(&self) -> usize {
    self.slots.len()
  }

  pub fn is_empty(&self) -> bool {
    self.slots.is_empty()
  }

  pub fn live_count(&self) -> usize {
    self.slots.iter().flatten().count()
  }

  pub fn iter(&self) -> impl Iterator<Item = &Node> + '_ {
    self.slots.iter().flatten()
  }

  /// Copy without tombstones, handles and vertex references renumbered.
  pub fn compacted(&self, vertex_remap: &[Option<VertexId>]) -> (Self, Vec<Option<NodeId>>) {
    let mut remap = Vec::with_capacity(self.slots.len());
    let mut next = 0u32;
    for slot in &self.slots {
      if slot.is_some() {
        remap.push(Some(NodeId(next)));
        next += 1;
      } else {
        remap.push(None);
      }
    }

    let node_id = |id: NodeId| remap.get(id.index()).copied().flatten();
    let vertex_id = |id: VertexId| vertex_remap.get(id.index()).copied().flatten();

    let mut slots = Vec::with_capacity(next as usize);
    for node in self.iter() {
      let Some(index) = node_id(node.index) else {
        continue;
      };
      let indices = node.indices.map(|v| {
        let moved = vertex_id(v);
        debug_assert!(moved.is_some(), "{} references dropped {}", node.index, v);
        moved.unwrap_or(v)
      });
      let children = node.children.and_then(|cs| {
        let [a, b, c, d] = cs.map(node_id);
        Some([a?, b?, c?, d?])
      });
      slots.push(Some(Node {
        index,
        level: node.level,
        indices,
        children,
        parent: node.parent.and_then(node_id),
      }));
    }
    (Self { slots }, remap)
  }
}

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;
