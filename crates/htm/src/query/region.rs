//! Region predicates: caps (`Constraint`), conjunctions (`Convex`) and
//! disjunctions (`Domain`).
//!
//! # Coverage approximation
//!
//! A triangle is classified from its three corners only. A cap that lies
//! entirely inside a triangle without reaching any corner therefore reads
//! as [`Coverage::Outside`]. The intersection search compensates partially
//! by still descending into split triangles reported `Outside`.

use glam::DVec3;

/// Classification of a triangle against a region.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Coverage {
  /// All corners inside.
  Inside,
  /// Some corners inside.
  Partial,
  /// No corner inside.
  Outside,
}

/// Anything a triangle can be tested against.
pub trait Region {
  fn coverage(&self, triangle: &[DVec3; 3]) -> Coverage;
}

impl<R: Region + ?Sized> Region for &R {
  #[inline]
  fn coverage(&self, triangle: &[DVec3; 3]) -> Coverage {
    (**self).coverage(triangle)
  }
}

/// Spherical cap cut off by the plane `p · v = d`.
///
/// `d` near 1 is a small cap around `p`, `d = 0` a hemisphere, negative `d`
/// everything but a cap around `-p`.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Constraint {
  /// Unit normal pointing at the cap center.
  pub p: DVec3,
  /// Signed distance of the cutting plane from the origin.
  pub d: f64,
}

impl Constraint {
  /// Cap around `p` (normalized here) with plane distance `d`.
  pub fn new(p: DVec3, d: f64) -> Self {
    Self {
      p: p.normalize_or_zero(),
      d,
    }
  }

  /// Cap around `p` with the given angular radius in radians.
  pub fn from_angle(p: DVec3, radius: f64) -> Self {
    Self::new(p, radius.cos())
  }

  /// Whether a direction lies strictly inside the cap.
  #[inline]
  pub fn contains(&self, v: DVec3) -> bool {
    self.p.dot(v) > self.d
  }
}

impl Region for Constraint {
  fn coverage(&self, triangle: &[DVec3; 3]) -> Coverage {
    let inside = triangle.iter().filter(|v| self.contains(**v)).count();
    match inside {
      3 => Coverage::Inside,
      0 => Coverage::Outside,
      _ => Coverage::Partial,
    }
  }
}

/// Intersection of caps.
///
/// An empty convex covers the whole sphere.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Convex(pub Vec<Constraint>);

impl Region for Convex {
  fn coverage(&self, triangle: &[DVec3; 3]) -> Coverage {
    let mut all_inside = true;
    for constraint in &self.0 {
      match constraint.coverage(triangle) {
        Coverage::Outside => return Coverage::Outside,
        Coverage::Partial => all_inside = false,
        Coverage::Inside => {}
      }
    }
    if all_inside {
      Coverage::Inside
    } else {
      Coverage::Partial
    }
  }
}

impl From<Constraint> for Convex {
  fn from(constraint: Constraint) -> Self {
    Self(vec![constraint])
  }
}

impl FromIterator<Constraint> for Convex {
  fn from_iter<I: IntoIterator<Item = Constraint>>(iter: I) -> Self {
    Self(iter.into_iter().collect())
  }
}

/// Union of convexes.
///
/// An empty domain covers nothing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Domain(pub Vec<Convex>);

impl Region for Domain {
  fn coverage(&self, triangle: &[DVec3; 3]) -> Coverage {
    let mut all_outside = true;
    for convex in &self.0 {
      match convex.coverage(triangle) {
        Coverage::Inside => return Coverage::Inside,
        Coverage::Partial => all_outside = false,
        Coverage::Outside => {}
      }
    }
    if all_outside {
      Coverage::Outside
    } else {
      Coverage::Partial
    }
  }
}

impl From<Convex> for Domain {
  fn from(convex: Convex) -> Self {
    Self(vec![convex])
  }
}

impl FromIterator<Convex> for Domain {
  fn from_iter<I: IntoIterator<Item = Convex>>(iter: I) -> Self {
    Self(iter.into_iter().collect())
  }
}

#[cfg(test)]
#[path = "region_test.rs"]
mod region_test;
