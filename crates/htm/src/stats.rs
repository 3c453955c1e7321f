//! Cumulative counters for mesh mutation.

/// Statistics accumulated over the lifetime of a mesh.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MeshStats {
	/// Leaf nodes split into four.
	pub splits: usize,
	/// Midpoint vertices appended.
	pub vertices_created: usize,
	/// Midpoints taken from the edge cache instead of recomputed.
	pub midpoints_reused: usize,
	/// Node slots tombstoned by culls.
	pub nodes_culled: usize,
	/// Vertex slots cleared by culls.
	pub vertices_cleared: usize,
	/// Completed compaction passes.
	pub compactions: usize,
}

impl MeshStats {
	/// Nodes appended by splits (always four per split).
	#[inline]
	pub fn nodes_created(&self) -> usize {
		self.splits * 4
	}

	/// Edge midpoint requests served, computed or cached.
	#[inline]
	pub fn midpoint_requests(&self) -> usize {
		self.vertices_created + self.midpoints_reused
	}
}
