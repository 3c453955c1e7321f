use glam::DVec3;

use super::*;

fn octant() -> [DVec3; 3] {
  [DVec3::Y, DVec3::Z, DVec3::X]
}

#[test]
fn test_constraint_normalizes_direction() {
  let c = Constraint::new(DVec3::new(0.0, 0.0, 3.0), 0.5);
  assert_eq!(c.p, DVec3::Z);
  assert!(c.contains(DVec3::Z));
  assert!(!c.contains(DVec3::X));
}

/// Points exactly on the cutting plane are outside.
#[test]
fn test_constraint_boundary_is_exclusive() {
  let c = Constraint::new(DVec3::Z, 0.0);
  assert!(!c.contains(DVec3::X));
  assert!(c.contains(DVec3::new(1.0, 0.0, 1e-9)));
}

#[test]
fn test_constraint_from_angle() {
  let c = Constraint::from_angle(DVec3::X, std::f64::consts::FRAC_PI_3);
  assert!((c.d - 0.5).abs() < 1e-12);
  assert!(c.contains(DVec3::new(0.6, 0.8, 0.0)));
  assert!(!c.contains(DVec3::new(0.4, 0.9, 0.0)));
}

#[test]
fn test_constraint_coverage_counts_corners() {
  let t = octant();
  assert_eq!(Constraint::new(DVec3::Z, 0.5).coverage(&t), Coverage::Partial);
  assert_eq!(Constraint::new(DVec3::ONE, 0.1).coverage(&t), Coverage::Inside);
  assert_eq!(Constraint::new(-DVec3::ONE, 0.1).coverage(&t), Coverage::Outside);
}

/// Corner-only classification misses a cap inside the face.
#[test]
fn test_small_cap_inside_face_reads_outside() {
  let cap = Constraint::new(DVec3::ONE, 0.99);
  assert!(cap.contains(DVec3::ONE.normalize()));
  assert_eq!(cap.coverage(&octant()), Coverage::Outside);
}

#[test]
fn test_convex_is_intersection() {
  let t = octant();
  let north = Constraint::new(DVec3::Z, -0.1);
  let east = Constraint::new(DVec3::X, -0.1);
  let band = Constraint::new(DVec3::Y, 0.5);
  let far = Constraint::new(DVec3::NEG_Z, 0.5);

  assert_eq!(Convex(vec![north, east]).coverage(&t), Coverage::Inside);
  assert_eq!(Convex(vec![north, band]).coverage(&t), Coverage::Partial);
  assert_eq!(Convex(vec![north, band, far]).coverage(&t), Coverage::Outside);
}

#[test]
fn test_empty_convex_covers_everything() {
  assert_eq!(Convex::default().coverage(&octant()), Coverage::Inside);
}

#[test]
fn test_domain_is_union() {
  let t = octant();
  let inside: Convex = Constraint::new(DVec3::ONE, 0.1).into();
  let partial: Convex = Constraint::new(DVec3::Z, 0.5).into();
  let outside: Convex = Constraint::new(-DVec3::ONE, 0.1).into();

  let all = Domain(vec![outside.clone(), partial.clone(), inside]);
  assert_eq!(all.coverage(&t), Coverage::Inside);
  let some = Domain(vec![outside.clone(), partial]);
  assert_eq!(some.coverage(&t), Coverage::Partial);
  let none: Domain = std::iter::once(outside).collect();
  assert_eq!(none.coverage(&t), Coverage::Outside);
}

#[test]
fn test_empty_domain_covers_nothing() {
  assert_eq!(Domain::default().coverage(&octant()), Coverage::Outside);
}

#[test]
fn test_convex_from_iterator() {
  let convex: Convex = [DVec3::X, DVec3::Y]
    .into_iter()
    .map(|p| Constraint::new(p, 0.0))
    .collect();
  assert_eq!(convex.0.len(), 2);
  assert_eq!(convex.0[1].p, DVec3::Y);
}

fn classify<R: Region>(region: R) -> Coverage {
  region.coverage(&octant())
}

/// Regions work through references and trait objects.
#[test]
fn test_region_by_reference() {
  let cap = Constraint::new(DVec3::Z, 0.5);
  let dynamic: &dyn Region = &cap;
  assert_eq!(classify(&cap), Coverage::Partial);
  assert_eq!(classify(dynamic), Coverage::Partial);
  assert_eq!(classify(cap), Coverage::Partial);
}
