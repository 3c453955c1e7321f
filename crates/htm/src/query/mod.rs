//! Spatial queries over the mesh tree.
//!
//! - [`region`]: cap predicates and their AND / OR combinations
//! - [`intersections`]: lazy search for triangles overlapping a region
//! - [`lookup`]: point location by direction vector

pub mod intersections;
pub mod lookup;
pub mod region;

pub use intersections::Intersections;
pub use lookup::triangle_contains;
pub use region::{Constraint, Convex, Coverage, Domain, Region};
