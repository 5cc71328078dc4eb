use super::*;

const EPS: f64 = 1e-3;

fn three_bone_chain() -> Skeleton {
    let mut s = Skeleton::new();
    let a = s.add_bone("a", 50.0, 0.0, None, None).unwrap();
    let b = s.add_bone("b", 50.0, 0.0, Some(a), None).unwrap();
    let _ = s.add_bone("c", 50.0, 0.0, Some(b), None).unwrap();
    s.create_ik_chain("chain", &["a", "b", "c"]).unwrap();
    s
}

fn tip(s: &Skeleton) -> Point {
    s.bone_by_name("c").unwrap().world_end()
}

#[test]
fn two_bone_reachable_target_keeps_segment_lengths() {
    let root = Point::new(0.0, 0.0);
    let target = Point::new(100.0, 0.0);
    let sol = solve_two_bone(root, target, 60.0, 60.0, None, BendDirection::Positive);

    assert!(((sol.mid - root).hypot() - 60.0).abs() < EPS);
    assert!(((target - sol.mid).hypot() - 60.0).abs() < EPS);
    let end = sol.mid + Vec2::from_angle(sol.angle2) * 60.0;
    assert!((end - target).hypot() < EPS);
}

#[test]
fn two_bone_unreachable_target_stretches_along_the_axis() {
    let root = Point::new(0.0, 0.0);
    let target = Point::new(200.0, 0.0);
    let sol = solve_two_bone(root, target, 60.0, 60.0, None, BendDirection::Positive);

    // Beyond full reach the limb lies straight on the x axis summing to
    // 120, with no off-axis elbow from acos round-off.
    assert!((sol.mid.x - 60.0).abs() < EPS);
    assert!(sol.mid.y.abs() < EPS);
    let end = sol.mid + Vec2::from_angle(sol.angle2) * 60.0;
    assert!((end.x - 120.0).abs() < EPS);
    assert!(end.y.abs() < EPS);

    // Exactly at full reach is straight too.
    let sol = solve_two_bone(
        root,
        Point::new(120.0, 0.0),
        60.0,
        60.0,
        None,
        BendDirection::Positive,
    );
    assert!(sol.mid.y.abs() < EPS);
    assert!(sol.angle1.abs() < EPS && sol.angle2.abs() < EPS);
}

#[test]
fn pole_side_picks_the_bend() {
    let root = Point::new(0.0, 0.0);
    let target = Point::new(100.0, 0.0);
    let above = solve_two_bone(
        root,
        target,
        60.0,
        60.0,
        Some(Point::new(50.0, 80.0)),
        BendDirection::Negative,
    );
    let below = solve_two_bone(
        root,
        target,
        60.0,
        60.0,
        Some(Point::new(50.0, -80.0)),
        BendDirection::Positive,
    );
    // The pole overrides the explicit bend direction.
    assert!(above.mid.y > 0.0);
    assert!(below.mid.y < 0.0);
}

#[test]
fn limb_wrappers_bend_opposite_sides() {
    let root = Point::new(0.0, 0.0);
    let target = Point::new(0.0, 100.0);
    let leg = solve_leg_ik(root, target, 60.0, 60.0);
    let arm = solve_arm_ik(root, target, 60.0, 60.0);
    assert!(leg.mid.x * arm.mid.x < 0.0, "knee and elbow on the same side");
}

#[test]
fn fabrik_reaches_a_reachable_target() {
    let mut s = three_bone_chain();
    let target = Point::new(100.0, 0.0);
    let reached = s.solve_ik("chain", target).unwrap();
    assert!(reached);
    assert!((tip(&s) - target).hypot() <= FABRIK_TOLERANCE);
}

#[test]
fn fabrik_unreachable_target_extends_fully() {
    let mut s = three_bone_chain();
    let reached = s.solve_ik("chain", Point::new(1000.0, 0.0)).unwrap();
    // The stretched-chain policy reports success.
    assert!(reached);
    let tip = tip(&s);
    assert!((tip.x - 150.0).abs() < EPS);
    assert!(tip.y.abs() < EPS);
    // Collinear joints: every bone points straight along +x.
    for name in ["a", "b", "c"] {
        let bone = s.bone_by_name(name).unwrap();
        assert!(bone.world_end().y.abs() < EPS);
    }
}

#[test]
fn fabrik_respects_the_chain_anchor() {
    let mut s = three_bone_chain();
    s.position = Point::new(10.0, 20.0);
    s.solve_ik("chain", Point::new(80.0, 90.0)).unwrap();
    let root = s.bone_by_name("a").unwrap();
    assert!((root.world_start() - Point::new(10.0, 20.0)).hypot() < EPS);
}

#[test]
fn fabrik_unknown_chain_is_an_error() {
    let mut s = three_bone_chain();
    assert!(s.solve_ik("nope", Point::new(0.0, 0.0)).is_err());
}

