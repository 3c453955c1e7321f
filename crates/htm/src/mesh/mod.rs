//! Mesh - the hierarchical triangular mesh and its three stores.
//!
//! # Bootstrap
//!
//! The mesh starts as an octahedron: six vertices on the axes and eight
//! level-1 faces, four south (`S0..S3`) then four north (`N0..N3`).
//!
//! ```text
//!   v0 = +Z   v1 = +X   v2 = +Y   v3 = -X   v4 = -Y   v5 = -Z
//!
//!   S0 (1,5,2)  S1 (2,5,3)  S2 (3,5,4)  S3 (4,5,1)
//!   N0 (1,0,4)  N1 (4,0,3)  N2 (3,0,2)  N3 (2,0,1)
//! ```
//!
//! Node handles `0..8` are the roots and survive every cull and compaction.
//!
//! # Module Structure
//!
//! - [`subdivide`](self::subdivide): adaptive quad-split through the edge
//!   cache
//! - [`cull`](self::cull): exact reversal of subdivision
//! - [`compact`](self::compact): drop tombstones and renumber

pub mod compact;
pub mod cull;
pub mod subdivide;

pub use compact::Remap;

use glam::DVec3;
use smallvec::SmallVec;

use crate::config::HtmConfig;
use crate::edges::{Edge, EdgeCache};
use crate::node::{Node, NodeId, NodeStore};
use crate::stats::MeshStats;
use crate::vertices::{VertexId, VertexStore};

/// Number of octahedron faces.
pub const ROOT_COUNT: usize = 8;

/// Octahedron corners.
pub const BOOTSTRAP_VERTICES: [DVec3; 6] = [
  DVec3::Z,
  DVec3::X,
  DVec3::Y,
  DVec3::NEG_X,
  DVec3::NEG_Y,
  DVec3::NEG_Z,
];

/// Octahedron faces, counter-clockwise seen from outside.
pub const BOOTSTRAP_FACES: [[u32; 3]; ROOT_COUNT] = [
  [1, 5, 2], // S0
  [2, 5, 3], // S1
  [3, 5, 4], // S2
  [4, 5, 1], // S3
  [1, 0, 4], // N0
  [4, 0, 3], // N1
  [3, 0, 2], // N2
  [2, 0, 1], // N3
];

/// Hierarchical triangular mesh.
///
/// Sole owner of the vertex store, node store and edge cache. Handles handed
/// out are plain indices; they stay valid across subdivision and culls (for
/// nodes that were not culled) but not across [`Mesh::compact`].
#[derive(Clone, Debug)]
pub struct Mesh {
  pub(crate) config: HtmConfig,
  pub(crate) vertices: VertexStore,
  pub(crate) nodes: NodeStore,
  pub(crate) edges: EdgeCache,
  pub(crate) stats: MeshStats,
}

impl Mesh {
  /// Create the level-1 octahedron with default configuration.
  pub fn new() -> Self {
    Self::with_config(HtmConfig::default())
  }

  /// Create the level-1 octahedron, stores reserved per `config`.
  ///
  /// Out-of-range levels are clamped first, see [`HtmConfig::clamped`].
  pub fn with_config(config: HtmConfig) -> Self {
    let config = config.clamped();
    let vertex_capacity = HtmConfig::vertex_capacity(config.reserve_level);
    let mut vertices = VertexStore::with_capacity(vertex_capacity);
    for v in BOOTSTRAP_VERTICES {
      vertices.append(v);
    }

    let mut nodes = NodeStore::with_capacity(HtmConfig::node_capacity(config.reserve_level));
    for (i, face) in BOOTSTRAP_FACES.iter().enumerate() {
      nodes.push(Node::new(NodeId(i as u32), 1, face.map(VertexId), None));
    }

    Self {
      config,
      vertices,
      nodes,
      edges: EdgeCache::with_capacity(vertex_capacity),
      stats: MeshStats::default(),
    }
  }

  pub fn config(&self) -> &HtmConfig {
    &self.config
  }

  pub fn stats(&self) -> MeshStats {
    self.stats
  }

  /// Handles of the eight octahedron faces.
  pub fn roots(&self) -> impl DoubleEndedIterator<Item = NodeId> {
    (0..ROOT_COUNT as u32).map(NodeId)
  }

  pub fn node(&self, id: NodeId) -> Option<&Node> {
    self.nodes.get(id)
  }

  /// Position of a vertex. Cleared slots read as the zero vector.
  pub fn vertex(&self, id: VertexId) -> Option<DVec3> {
    self.vertices.get(id)
  }

  /// Corner positions of a node.
  pub fn triangle(&self, id: NodeId) -> Option<[DVec3; 3]> {
    let node = self.nodes.get(id)?;
    self.corners(node)
  }

  #[inline]
  pub(crate) fn corners(&self, node: &Node) -> Option<[DVec3; 3]> {
    let [i0, i1, i2] = node.indices;
    Some([
      self.vertices.get(i0)?,
      self.vertices.get(i1)?,
      self.vertices.get(i2)?,
    ])
  }

  /// Node slots, tombstones included.
  pub fn node_count(&self) -> usize {
    self.nodes.len()
  }

  pub fn live_node_count(&self) -> usize {
    self.nodes.live_count()
  }

  /// Vertex slots, cleared ones included.
  pub fn vertex_count(&self) -> usize {
    self.vertices.len()
  }

  pub fn live_vertex_count(&self) -> usize {
    self.vertices.live_count()
  }

  /// The vertex store, aligned with [`Mesh::indices`].
  ///
  /// Cleared slots are the zero vector until the next compaction.
  pub fn vertices(&self) -> &[DVec3] {
    self.vertices.as_slice()
  }

  /// Live vertices with their handles.
  pub fn live_vertices(&self) -> impl Iterator<Item = (VertexId, DVec3)> + '_ {
    self.vertices.iter_live()
  }

  /// Live nodes in store order.
  pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
    self.nodes.iter()
  }

  /// Live (split) edges.
  pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
    self.edges.iter()
  }

  /// Flattened corner indices of every leaf, roots in order, depth-first.
  pub fn indices(&self) -> Vec<u32> {
    let mut indices = Vec::with_capacity(self.leaves().count() * 3);
    for node in self.leaves() {
      indices.extend(node.indices.map(|v| v.0));
    }
    indices
  }

  /// All leaves, lazily, in root-major depth-first order.
  pub fn leaves(&self) -> Leaves<'_> {
    Leaves::new(&self.nodes, self.roots())
  }

  /// Leaves below (or equal to) `id`.
  pub fn leaves_of(&self, id: NodeId) -> Leaves<'_> {
    Leaves::new(&self.nodes, std::iter::once(id))
  }

  /// Nodes of the subtree at `id` whose level is exactly `level`, in
  /// pre-order.
  pub fn nodes_at_level(&self, id: NodeId, level: u32) -> Vec<NodeId> {
    let mut found = Vec::new();
    let mut stack: SmallVec<[NodeId; 64]> = SmallVec::new();
    stack.push(id);
    while let Some(id) = stack.pop() {
      let Some(node) = self.nodes.get(id) else {
        continue;
      };
      if node.level == level {
        found.push(id);
      } else if node.level < level {
        if let Some(children) = node.children {
          stack.extend(children.into_iter().rev());
        }
      }
    }
    found
  }

  /// Deepest level reached anywhere in the subtree at `id`.
  pub fn max_depth(&self, id: NodeId) -> Option<u32> {
    let root = self.nodes.get(id)?;
    Some(self.leaves_of(id).map(|n| n.level).max().unwrap_or(root.level))
  }
}

impl Default for Mesh {
  fn default() -> Self {
    Self::new()
  }
}

/// Lazy depth-first leaf iterator.
///
/// Holds only a shared borrow and a small stack; dropping it early leaves
/// nothing behind.
pub struct Leaves<'a> {
  nodes: &'a NodeStore,
  stack: SmallVec<[NodeId; 64]>,
}

impl<'a> Leaves<'a> {
  fn new(nodes: &'a NodeStore, starts: impl DoubleEndedIterator<Item = NodeId>) -> Self {
    Self {
      nodes,
      stack: starts.rev().collect(),
    }
  }
}

impl<'a> Iterator for Leaves<'a> {
  type Item = &'a Node;

  fn next(&mut self) -> Option<Self::Item> {
    while let Some(id) = self.stack.pop() {
      let Some(node) = self.nodes.get(id) else {
        continue;
      };
      match node.children {
        None => return Some(node),
        Some(children) => self.stack.extend(children.into_iter().rev()),
      }
    }
    None
  }
}
