//! htm - Hierarchical triangular mesh over the unit sphere
//!
//! A recursively refinable triangulation of the sphere, starting from an
//! octahedron and quad-splitting triangles on demand. It serves as a
//! spatial index: find the triangles overlapping a spherical region, or the
//! smallest triangle containing a direction.
//!
//! # Features
//!
//! - **Adaptive subdivision**: refine the whole sphere or single subtrees;
//!   neighbors share edge midpoints through a fixed-fanout edge cache, so
//!   the surface stays crack-free
//! - **Cull**: exact reversal of subdivision beneath any node
//! - **Region search**: caps, their intersections and unions, as a lazy
//!   depth-first iterator
//! - **Point location**: descend to the leaf containing a direction
//! - **Compaction**: drop culled slots and renumber
//!
//! Storage is index-based: nodes, vertices and edges live in flat arenas
//! addressed by [`NodeId`] and [`VertexId`].
//!
//! # Example
//!
//! ```
//! use glam::DVec3;
//! use htm::{Constraint, Mesh};
//!
//! let mut mesh = Mesh::new();
//! mesh.subdivide(5).unwrap();
//!
//! let leaf = mesh.lookup_by_cart(DVec3::new(0.9, 0.1, 0.1)).unwrap();
//! assert_eq!(leaf.level, 5);
//!
//! let cap = Constraint::new(DVec3::Z, 0.75);
//! let hits: Vec<_> = mesh.intersections(&cap).collect();
//! assert!(!hits.is_empty());
//!
//! // GPU-ready buffers.
//! let indices = mesh.indices();
//! let vertices = mesh.vertices();
//! assert_eq!(indices.len(), 3 * 8 * 4usize.pow(4));
//! assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
//! ```

pub mod config;
pub mod edges;
pub mod error;
pub mod node;
pub mod stats;
pub mod vertices;

// Re-export commonly used items
pub use config::{HtmConfig, MAX_LEVEL, MAX_RESERVE_LEVEL};
pub use edges::{Edge, EdgeCache, EDGES_PER_VERTEX};
pub use error::{HtmError, Result};
pub use node::{Node, NodeId, NodeStore};
pub use stats::MeshStats;
pub use vertices::{VertexId, VertexStore};

// Mesh tree: bootstrap, subdivision, cull, compaction
pub mod mesh;
pub use mesh::{Leaves, Mesh, Remap, ROOT_COUNT};

// Region search and point location
pub mod query;
pub use query::{Constraint, Convex, Coverage, Domain, Intersections, Region};
