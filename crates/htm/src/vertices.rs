//! Vertex store - append-only unit vectors with logical delete.
//!
//! A cleared slot holds the zero vector, which is never a valid point on the
//! sphere. Slots are only reclaimed by [`VertexStore::compacted`].

use std::fmt;

use glam::DVec3;

/// Handle into the vertex store.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct VertexId(pub u32);

impl VertexId {
  #[inline]
  pub fn index(self) -> usize {
    self.0 as usize
  }
}

impl fmt::Display for VertexId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "v{}", self.0)
  }
}

/// Ordered sequence of sphere positions addressed by [`VertexId`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VertexStore {
  positions: Vec<DVec3>,
}

impl VertexStore {
  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      positions: Vec::with_capacity(capacity),
    }
  }

  /// Append a position and return its handle.
  #[inline]
  pub fn append(&mut self, position: DVec3) -> VertexId {
    let id = VertexId(self.positions.len() as u32);
    self.positions.push(position);
    id
  }

  /// Position at `id`. Cleared slots return the zero vector.
  #[inline]
  pub fn get(&self, id: VertexId) -> Option<DVec3> {
    self.positions.get(id.index()).copied()
  }

  /// Logically delete a slot.
  #[inline]
  pub fn clear(&mut self, id: VertexId) {
    if let Some(slot) = self.positions.get_mut(id.index()) {
      *slot = DVec3::ZERO;
    }
  }

  #[inline]
  pub fn is_live(&self, id: VertexId) -> bool {
    self.get(id).is_some_and(|v| v != DVec3::ZERO)
  }

  /// Number of slots, cleared ones included.
  pub fn len(&self) -> usize {
    self.positions.len()
  }

  pub fn is_empty(&self) -> bool {
    self.positions.is_empty()
  }

  /// Number of slots that have not been cleared.
  pub fn live_count(&self) -> usize {
    self.positions.iter().filter(|v| **v != DVec3::ZERO).count()
  }

  pub fn as_slice(&self) -> &[DVec3] {
    &self.positions
  }

  /// Live entries with their handles.
  pub fn iter_live(&self) -> impl Iterator<Item = (VertexId, DVec3)> + '_ {
    self
      .positions
      .iter()
      .enumerate()
      .filter(|(_, v)| **v != DVec3::ZERO)
      .map(|(i, v)| (VertexId(i as u32), *v))
  }

  /// Copy of the store without cleared slots, plus the old to new map.
  ///
  /// Relative order of surviving entries is preserved.
  pub fn compacted(&self) -> (Self, Vec<Option<VertexId>>) {
    let mut remap = Vec::with_capacity(self.positions.len());
    let mut positions = Vec::with_capacity(self.live_count());
    for v in &self.positions {
      if *v == DVec3::ZERO {
        remap.push(None);
      } else {
        remap.push(Some(VertexId(positions.len() as u32)));
        positions.push(*v);
      }
    }
    (Self { positions }, remap)
  }
}

#[cfg(test)]
#[path = "vertices_test.rs"]
mod vertices_test;
