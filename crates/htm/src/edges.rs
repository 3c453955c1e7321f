//! Edge cache - shared midpoints for crack-free subdivision.
//!
//! Edges are keyed by their larger endpoint. Each vertex owns a bucket of
//! [`EDGES_PER_VERTEX`] slots holding the edges that run from it to
//! lower-indexed neighbors:
//!
//! ```text
//!   buckets[start] = [ (start, end_a, mid?), (start, end_b, mid?), .. x6 ]
//!                        start >= end_a      start >= end_b
//! ```
//!
//! Midpoints always get a higher index than both endpoints, so every edge a
//! vertex gains at deeper levels lands in the newer vertex's bucket. In a
//! triangulated mesh no bucket ever needs more than six slots; running out
//! means the topology is broken.
//!
//! Buckets are addressed directly by vertex index. No hashing.
//!
//! An edge is shared by the two triangles on either side of it. Each split
//! that asks for the midpoint registers as a user, and [`EdgeCache::merge`]
//! only vacates the edge once the last user is gone, so culling one side
//! never pulls a midpoint out from under the other.

use smallvec::{smallvec, SmallVec};

use crate::error::{HtmError, Result};
use crate::vertices::VertexId;

/// Slots per vertex bucket.
pub const EDGES_PER_VERTEX: usize = 6;

/// Orphaned midpoints returned by [`EdgeCache::merge`].
pub type Orphans = SmallVec<[VertexId; 8]>;

type Bucket = [Option<Slot>; EDGES_PER_VERTEX];

#[derive(Clone, Copy, Debug)]
struct Slot {
  edge: Edge,
  users: u8,
}

/// Unordered vertex pair with its cached midpoint.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Edge {
  /// Larger endpoint (bucket owner).
  pub start: VertexId,
  /// Smaller endpoint.
  pub end: VertexId,
  /// Midpoint vertex, once computed.
  pub mid: Option<VertexId>,
}

impl Edge {
  /// Edge between `a` and `b` in canonical order.
  pub fn new(a: VertexId, b: VertexId, mid: Option<VertexId>) -> Self {
    let (start, end) = canonical(a, b);
    Self { start, end, mid }
  }
}

/// Location of an edge entry, valid until the next merge or compaction.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct EdgeSlot {
  bucket: u32,
  slot: u8,
}

#[inline]
fn canonical(a: VertexId, b: VertexId) -> (VertexId, VertexId) {
  if a >= b {
    (a, b)
  } else {
    (b, a)
  }
}

/// Fixed-fanout midpoint cache keyed by vertex index.
#[derive(Clone, Debug, Default)]
pub struct EdgeCache {
  buckets: Vec<Bucket>,
}

impl EdgeCache {
  /// Reserve buckets for `vertices` vertices.
  pub fn with_capacity(vertices: usize) -> Self {
    Self {
      buckets: vec![[None; EDGES_PER_VERTEX]; vertices],
    }
  }

  /// Number of vertex buckets currently allocated.
  pub fn capacity(&self) -> usize {
    self.buckets.len()
  }

  /// Doubling growth keyed by the highest vertex seen.
  fn grow(&mut self, start: VertexId) {
    let needed = start.index() + 1;
    if needed > self.buckets.len() {
      let len = needed.max(self.buckets.len() * 2);
      self.buckets.resize(len, [None; EDGES_PER_VERTEX]);
    }
  }

  /// Find the edge `(a, b)` or claim a slot for it, registering one user.
  ///
  /// Returns the slot and the cached midpoint, `None` when the edge is new
  /// (or was never given one).
  pub fn get_or_create(
    &mut self,
    a: VertexId,
    b: VertexId,
  ) -> Result<(EdgeSlot, Option<VertexId>)> {
    let (start, end) = canonical(a, b);
    self.grow(start);
    let bucket = &mut self.buckets[start.index()];

    let found = bucket
      .iter_mut()
      .enumerate()
      .find_map(|(i, s)| s.as_mut().filter(|s| s.edge.end == end).map(|s| (i, s)));
    if let Some((slot, entry)) = found {
      debug_assert!(
        entry.users < 2,
        "edge ({}, {}) requested by a third split",
        start,
        end
      );
      entry.users = entry.users.saturating_add(1);
      let mid = entry.edge.mid;
      return Ok((
        EdgeSlot {
          bucket: start.0,
          slot: slot as u8,
        },
        mid,
      ));
    }

    let Some(slot) = bucket.iter().position(Option::is_none) else {
      return Err(HtmError::EdgeOverflow { vertex: start });
    };
    bucket[slot] = Some(Slot {
      edge: Edge {
        start,
        end,
        mid: None,
      },
      users: 1,
    });
    Ok((
      EdgeSlot {
        bucket: start.0,
        slot: slot as u8,
      },
      None,
    ))
  }

  /// Assign the midpoint of a freshly created edge. Set once.
  pub fn set_midpoint(&mut self, at: EdgeSlot, mid: VertexId) {
    let entry = self
      .buckets
      .get_mut(at.bucket as usize)
      .and_then(|b| b[at.slot as usize].as_mut());
    if let Some(Slot { edge, .. }) = entry {
      debug_assert!(edge.mid.is_none(), "midpoint of {:?} overwritten", edge);
      if edge.mid.is_none() {
        edge.mid = Some(mid);
      }
    }
  }

  /// Live edge between `a` and `b`, if any.
  pub fn get(&self, a: VertexId, b: VertexId) -> Option<Edge> {
    let (start, end) = canonical(a, b);
    self
      .buckets
      .get(start.index())?
      .iter()
      .flatten()
      .map(|s| s.edge)
      .find(|e| e.end == end)
  }

  /// Cached midpoint of `(a, b)`.
  pub fn midpoint(&self, a: VertexId, b: VertexId) -> Option<VertexId> {
    self.get(a, b).and_then(|e| e.mid)
  }

  /// Undo one split's use of edge `(a, b)`.
  ///
  /// While another user remains the edge stays and the result is empty.
  /// Otherwise vacates the edge, then every edge owned by its midpoint
  /// (recursively, for midpoints split at deeper levels), and returns all
  /// midpoints that no longer belong to any edge so the caller can clear
  /// them. `None` when the edge was never split.
  pub fn merge(&mut self, a: VertexId, b: VertexId) -> Option<Orphans> {
    let (start, end) = canonical(a, b);
    let bucket = self.buckets.get_mut(start.index())?;
    let slot = bucket.iter().position(
      |s| matches!(s, Some(s) if s.edge.end == end && s.edge.mid.is_some()),
    )?;
    let entry = bucket[slot].as_mut()?;
    if entry.users > 1 {
      entry.users -= 1;
      return Some(Orphans::new());
    }
    let mid = bucket[slot].take().and_then(|s| s.edge.mid)?;

    let mut orphans: Orphans = smallvec![mid];
    self.collect_orphans(mid, &mut orphans);
    self.clear_bucket(mid);
    Some(orphans)
  }

  fn collect_orphans(&mut self, owner: VertexId, orphans: &mut Orphans) {
    let Some(bucket) = self.buckets.get(owner.index()) else {
      return;
    };
    let mids: SmallVec<[VertexId; EDGES_PER_VERTEX]> =
      bucket.iter().flatten().filter_map(|s| s.edge.mid).collect();
    for mid in mids {
      orphans.push(mid);
      self.collect_orphans(mid, orphans);
      self.clear_bucket(mid);
    }
  }

  fn clear_bucket(&mut self, owner: VertexId) {
    if let Some(bucket) = self.buckets.get_mut(owner.index()) {
      *bucket = [None; EDGES_PER_VERTEX];
    }
  }

  /// Live edges in bucket order.
  pub fn iter(&self) -> impl Iterator<Item = Edge> + '_ {
    self.slots().map(|s| s.edge)
  }

  /// Splits currently holding `(a, b)`; zero when absent.
  pub fn users(&self, a: VertexId, b: VertexId) -> u8 {
    let (start, end) = canonical(a, b);
    self
      .buckets
      .get(start.index())
      .and_then(|b| b.iter().flatten().find(|s| s.edge.end == end))
      .map_or(0, |s| s.users)
  }

  fn slots(&self) -> impl Iterator<Item = &Slot> + '_ {
    self.buckets.iter().flat_map(|b| b.iter().flatten())
  }

  pub fn len(&self) -> usize {
    self.iter().count()
  }

  pub fn is_empty(&self) -> bool {
    self.iter().next().is_none()
  }

  /// Rebuild with renumbered vertices. Edges touching a dropped vertex, or
  /// whose midpoint was dropped, are discarded.
  pub fn compacted(&self, remap: &[Option<VertexId>], vertices: usize) -> Self {
    let lookup = |v: VertexId| remap.get(v.index()).copied().flatten();
    let mut out = Self::with_capacity(vertices);
    for &Slot { edge, users } in self.slots() {
      let (Some(start), Some(end), Some(mid)) = (
        lookup(edge.start),
        lookup(edge.end),
        edge.mid.and_then(lookup),
      ) else {
        continue;
      };
      out.grow(start);
      // Remapping is monotonic, so each old bucket maps onto exactly one new
      // bucket and never exceeds its six slots.
      let bucket = &mut out.buckets[start.index()];
      if let Some(free) = bucket.iter_mut().find(|e| e.is_none()) {
        *free = Some(Slot {
          edge: Edge {
            start,
            end,
            mid: Some(mid),
          },
          users,
        });
      }
    }
    out
  }
}

#[cfg(test)]
#[path = "edges_test.rs"]
mod edges_test;
