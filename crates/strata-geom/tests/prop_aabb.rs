use proptest::prelude::*;
use strata_geom::{Aabb, Vec3};

fn bounded_f32() -> impl Strategy<Value = f32> {
    -1.0e4f32..1.0e4
}

fn inside(bb: &Aabb, p: Vec3) -> bool {
    bb.min.min(p) == bb.min && bb.max.max(p) == bb.max
}

fn arb_vec3() -> impl Strategy<Value = Vec3> {
    (bounded_f32(), bounded_f32(), bounded_f32()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

proptest! {
    // Every input point lies inside the box built from them
    #[test]
    fn from_points_contains_inputs(points in proptest::collection::vec(arb_vec3(), 1..32)) {
        let bb = Aabb::from_points(points.iter().copied()).unwrap();
        for p in &points {
            prop_assert!(inside(&bb, *p));
        }
        prop_assert!(bb.min.x <= bb.max.x && bb.min.y <= bb.max.y && bb.min.z <= bb.max.z);
    }

    // Cross product is orthogonal to both operands (scaled tolerance)
    #[test]
    fn cross_is_orthogonal(a in arb_vec3(), b in arb_vec3()) {
        let c = a.cross(b);
        let scale = (a.dot(a) * b.dot(b)).sqrt().max(1.0);
        prop_assert!(c.dot(a).abs() <= 1e-3 * scale * a.dot(a).sqrt().max(1.0));
        prop_assert!(c.dot(b).abs() <= 1e-3 * scale * b.dot(b).sqrt().max(1.0));
    }
}
