use std::collections::HashSet;

use glam::DVec3;

use super::*;
use crate::node::Node;

fn edge_set(mesh: &Mesh) -> HashSet<(VertexId, VertexId, Option<VertexId>)> {
  mesh.edges().map(|e| (e.start, e.end, e.mid)).collect()
}

fn live_vertex_set(mesh: &Mesh) -> HashSet<(VertexId, [u64; 3])> {
  mesh
    .live_vertices()
    .map(|(id, v)| (id, v.to_array().map(f64::to_bits)))
    .collect()
}

/// Culling a leaf changes nothing.
#[test]
fn test_cull_leaf_is_noop() {
  let mut mesh = Mesh::new();
  mesh.subdivide(2).unwrap();
  let before = mesh.clone();
  let leaf = mesh.leaves().next().unwrap().index;

  mesh.cull(leaf).unwrap();
  assert_eq!(mesh.nodes, before.nodes);
  assert_eq!(mesh.vertices, before.vertices);
  assert_eq!(edge_set(&mesh), edge_set(&before));
  assert_eq!(mesh.stats().nodes_culled, 0);
}

#[test]
fn test_cull_unknown_node() {
  let mut mesh = Mesh::new();
  assert_eq!(
    mesh.cull(NodeId(100)),
    Err(HtmError::UnknownNode { node: NodeId(100) })
  );
  assert_eq!(
    mesh.cull_node_to_level(NodeId(100), 1),
    Err(HtmError::UnknownNode { node: NodeId(100) })
  );
}

/// Subdividing a lone root and culling it restores the octahedron.
#[test]
fn test_cull_reverses_subdivide_of_isolated_root() {
  let mut mesh = Mesh::new();
  mesh.subdivide_node(NodeId(3), 4).unwrap();
  mesh.cull(NodeId(3)).unwrap();

  assert!(mesh.node(NodeId(3)).unwrap().is_leaf());
  assert_eq!(mesh.live_node_count(), 8);
  assert_eq!(mesh.live_vertex_count(), 6);
  assert!(mesh.edges().next().is_none());
  // Slots stay until compaction; cleared vertices read as zero.
  assert_eq!(mesh.node_count(), 8 + 4 + 16 + 64);
  assert!(mesh.vertices()[6..].iter().all(|v| *v == DVec3::ZERO));
  assert_eq!(mesh.stats().nodes_culled, 4 + 16 + 64);
  assert_eq!(
    mesh.stats().vertices_cleared,
    mesh.stats().vertices_created
  );
}

/// Subdivide then cull of one node under a uniform mesh leaves the same
/// live sets behind.
#[test]
fn test_cull_inverts_subdivide_under_uniform_mesh() {
  let mut mesh = Mesh::new();
  mesh.subdivide(3).unwrap();
  let nodes: Vec<Node> = mesh.nodes().copied().collect();
  let vertices = live_vertex_set(&mesh);
  let edges = edge_set(&mesh);

  let target = mesh.nodes_at_level(NodeId(6), 3)[2];
  mesh.subdivide_node(target, 6).unwrap();
  assert!(mesh.live_vertex_count() > vertices.len());
  mesh.cull(target).unwrap();

  let after: Vec<Node> = mesh.nodes().copied().collect();
  assert_eq!(after, nodes);
  assert_eq!(live_vertex_set(&mesh), vertices);
  assert_eq!(edge_set(&mesh), edges);
}

/// A neighbor split along the shared edge keeps its midpoint when this side
/// is culled.
#[test]
fn test_cull_keeps_midpoints_shared_with_split_neighbor() {
  let mut mesh = Mesh::new();
  // S0 and S1 share edge (2, 5).
  mesh.subdivide_node(NodeId(0), 3).unwrap();
  mesh.subdivide_node(NodeId(1), 3).unwrap();
  let mid = mesh.edges.midpoint(VertexId(2), VertexId(5)).unwrap();
  let position = mesh.vertex(mid).unwrap();

  mesh.cull(NodeId(0)).unwrap();

  assert!(mesh.node(NodeId(0)).unwrap().is_leaf());
  assert_eq!(mesh.edges.midpoint(VertexId(2), VertexId(5)), Some(mid));
  assert_eq!(mesh.edges.users(VertexId(2), VertexId(5)), 1);
  assert_eq!(mesh.vertex(mid), Some(position));
  // Every corner of the surviving side is still live.
  for leaf in mesh.leaves_of(NodeId(1)) {
    for v in leaf.indices {
      assert!(mesh.vertices.is_live(v), "{} lost {}", leaf.index, v);
    }
  }
  // Culling the other side as well brings back the bare octahedron.
  mesh.cull(NodeId(1)).unwrap();
  assert_eq!(mesh.live_vertex_count(), 6);
  assert!(mesh.edges().next().is_none());
}

/// Uneven depth below the culled node is fully unwound.
#[test]
fn test_cull_uneven_subtree() {
  let mut mesh = Mesh::new();
  mesh.subdivide_node(NodeId(7), 2).unwrap();
  let children = mesh.node(NodeId(7)).unwrap().children.unwrap();
  mesh.subdivide_node(children[3], 5).unwrap();
  mesh.subdivide_node(children[1], 3).unwrap();

  mesh.cull(NodeId(7)).unwrap();
  assert_eq!(mesh.live_node_count(), 8);
  assert_eq!(mesh.live_vertex_count(), 6);
  assert!(mesh.edges().next().is_none());
}

#[test]
fn test_cull_to_level() {
  let mut mesh = Mesh::new();
  mesh.subdivide(2).unwrap();
  let level2: Vec<Node> = mesh.nodes().copied().collect();
  let vertices = live_vertex_set(&mesh);

  mesh.subdivide(4).unwrap();
  let deep = mesh.leaves().nth(17).unwrap().index;
  mesh.subdivide_node(deep, 6).unwrap();
  mesh.cull_to_level(2).unwrap();

  assert_eq!(mesh.nodes().copied().collect::<Vec<_>>(), level2);
  assert_eq!(live_vertex_set(&mesh), vertices);
  assert!(mesh.leaves().all(|n| n.level == 2));
}

/// Levels at or below the current depth are left alone.
#[test]
fn test_cull_node_to_level_keeps_shallower_structure() {
  let mut mesh = Mesh::new();
  mesh.subdivide(3).unwrap();
  let before = mesh.live_node_count();

  mesh.cull_node_to_level(NodeId(0), 3).unwrap();
  mesh.cull_node_to_level(NodeId(0), 5).unwrap();
  assert_eq!(mesh.live_node_count(), before);

  mesh.cull_node_to_level(NodeId(0), 2).unwrap();
  assert_eq!(mesh.live_node_count(), before - 16);
  assert_eq!(mesh.max_depth(NodeId(0)), Some(2));
  assert_eq!(mesh.max_depth(NodeId(1)), Some(3));
}

/// The culled subtree can be rebuilt, reusing nothing stale.
#[test]
fn test_subdivide_after_cull() {
  let mut mesh = Mesh::new();
  mesh.subdivide(3).unwrap();
  mesh.cull_to_level(1).unwrap();
  mesh.subdivide(3).unwrap();

  assert_eq!(mesh.leaves().count(), 128);
  for leaf in mesh.leaves() {
    for v in leaf.indices {
      let p = mesh.vertex(v).unwrap();
      assert!((p.length() - 1.0).abs() < 1e-12);
    }
  }
  assert_eq!(mesh.live_vertex_count(), 66);
}
