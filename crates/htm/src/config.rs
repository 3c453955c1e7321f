//! HtmConfig - store sizing and subdivision limits.

/// Deepest level whose node count still fits a u32 handle.
pub const MAX_LEVEL: u32 = 15;

/// Level the stores are pre-sized for when nothing else is requested.
pub const DEFAULT_RESERVE_LEVEL: u32 = 5;

/// Deepest level stores are ever pre-sized for (65538 vertices). Deeper
/// meshes grow on demand.
pub const MAX_RESERVE_LEVEL: u32 = 8;

/// Configuration for a [`Mesh`](crate::Mesh).
///
/// Fields are public; [`Mesh::with_config`](crate::Mesh::with_config) brings
/// them into range with [`HtmConfig::clamped`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HtmConfig {
  /// Stores are reserved up front for a uniform mesh of this level, so
  /// building up to it never reallocates. At most [`MAX_RESERVE_LEVEL`].
  pub reserve_level: u32,
  /// Subdivision requests deeper than this are rejected. At most
  /// [`MAX_LEVEL`].
  pub max_level: u32,
}

impl HtmConfig {
  /// Reserve for level 5, allow up to [`MAX_LEVEL`].
  pub const DEFAULT: Self = Self {
    reserve_level: DEFAULT_RESERVE_LEVEL,
    max_level: MAX_LEVEL,
  };

  /// Create a config that reserves for `reserve_level`, clamped to
  /// `1..=MAX_RESERVE_LEVEL`.
  pub fn with_reserve_level(reserve_level: u32) -> Self {
    Self {
      reserve_level,
      ..Self::DEFAULT
    }
    .clamped()
  }

  /// Copy with both levels in range: `max_level` in `1..=MAX_LEVEL`,
  /// `reserve_level` in `1..=min(max_level, MAX_RESERVE_LEVEL)`.
  pub fn clamped(self) -> Self {
    let max_level = self.max_level.clamp(1, MAX_LEVEL);
    Self {
      reserve_level: self.reserve_level.clamp(1, max_level.min(MAX_RESERVE_LEVEL)),
      max_level,
    }
  }

  /// Vertex count of a uniform mesh at `level`: 4^level + 2. Saturates at
  /// `usize::MAX`.
  #[inline]
  pub fn vertex_capacity(level: u32) -> usize {
    pow4(level).map_or(usize::MAX, |n| n.saturating_add(2))
  }

  /// Node count (all levels, leaves and interior) of a uniform mesh at
  /// `level`: 8 * (4^level - 1) / 3. Saturates at `usize::MAX`.
  #[inline]
  pub fn node_capacity(level: u32) -> usize {
    pow4(level).map_or(usize::MAX, |n| ((n - 1) / 3).saturating_mul(8))
  }

  /// Leaf triangle count of a uniform mesh at `level`: 8 * 4^(level-1).
  /// Saturates at `usize::MAX`.
  #[inline]
  pub fn leaf_count(level: u32) -> usize {
    pow4(level.saturating_sub(1)).map_or(usize::MAX, |n| n.saturating_mul(8))
  }
}

/// 4^level, `None` once it no longer fits a usize.
#[inline]
fn pow4(level: u32) -> Option<usize> {
  1usize.checked_shl(level.checked_mul(2)?)
}

impl Default for HtmConfig {
  fn default() -> Self {
    Self::DEFAULT
  }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
