use super::*;

const DT: f64 = 1.0 / 30.0;

fn test_params() -> ChainParams {
    ChainParams {
        gravity: Vec2::new(0.0, 100.0),
        damping: 0.9,
        stiffness: 0.9,
        iterations: 3,
    }
}

fn link_distances(chain: &PhysicsChain) -> Vec<f64> {
    let points = chain.points();
    points.windows(2).map(|w| (w[1] - w[0]).hypot()).collect()
}

#[test]
fn new_chain_hangs_straight_down_at_rest() {
    let chain = PhysicsChain::new(Point::new(10.0, 5.0), 4, 20.0, test_params());
    let points = chain.points();
    assert_eq!(points.len(), 5);
    assert_eq!(points[0], Point::new(10.0, 5.0));
    for (i, p) in points.iter().enumerate() {
        assert_eq!(*p, Point::new(10.0, 5.0 + 20.0 * i as f64));
    }
    for seg in chain.segments() {
        assert_eq!(seg.position, seg.prev_position);
    }
}

#[test]
fn settles_with_link_lengths_preserved() {
    let mut chain = PhysicsChain::new(Point::ORIGIN, 5, 20.0, test_params());
    // Yank the anchor sideways and let the chain swing out.
    chain.set_anchor(Point::new(40.0, 0.0));

    let mut early_tip_motion = 0.0;
    for step in 0..150 {
        chain.update(DT);
        if step == 15 {
            let tip = chain.segments().last().unwrap();
            early_tip_motion = (tip.position - tip.prev_position).hypot();
        }
    }

    // Five seconds in, every link is back within 5% of its rest length,
    // anchor link included.
    for dist in link_distances(&chain) {
        assert!((dist - 20.0).abs() < 20.0 * 0.05, "link length {dist}");
    }

    // And the tip has stopped moving compared to the initial swing.
    let tip = chain.segments().last().unwrap();
    let late_tip_motion = (tip.position - tip.prev_position).hypot();
    assert!(late_tip_motion < early_tip_motion || late_tip_motion < 1e-3);
}

#[test]
fn hanging_chain_keeps_rest_lengths_under_gravity() {
    // No anchor motion at all: gravity alone must not stretch the links.
    let mut chain = PhysicsChain::new(Point::ORIGIN, 5, 20.0, test_params());

    let mut early_tip_motion = 0.0;
    for step in 0..150 {
        chain.update(DT);
        if step == 15 {
            let tip = chain.segments().last().unwrap();
            early_tip_motion = (tip.position - tip.prev_position).hypot();
        }
    }

    for dist in link_distances(&chain) {
        assert!((dist - 20.0).abs() < 20.0 * 0.05, "link length {dist}");
    }

    let tip = chain.segments().last().unwrap();
    let late_tip_motion = (tip.position - tip.prev_position).hypot();
    assert!(late_tip_motion <= early_tip_motion || late_tip_motion < 1e-6);
}

#[test]
fn settled_chain_hangs_below_the_anchor() {
    let mut chain = PhysicsChain::new(Point::ORIGIN, 3, 20.0, test_params());
    chain.set_anchor(Point::new(25.0, 10.0));
    for _ in 0..300 {
        chain.update(DT);
    }
    let points = chain.points();
    for w in points.windows(2) {
        assert!(w[1].y > w[0].y);
        assert!((w[1].x - 25.0).abs() < 1.0);
    }
}

#[test]
fn anchor_never_moves_during_updates() {
    let mut chain = PhysicsChain::new(Point::new(3.0, -7.0), 4, 15.0, test_params());
    for _ in 0..60 {
        chain.update(DT);
    }
    assert_eq!(chain.anchor(), Point::new(3.0, -7.0));
    assert_eq!(chain.points()[0], Point::new(3.0, -7.0));
}

#[test]
fn apply_force_targets_one_or_all_segments() {
    let mut chain = PhysicsChain::new(Point::ORIGIN, 3, 20.0, test_params());
    let before: Vec<Point> = chain.segments().iter().map(|s| s.position).collect();

    chain.apply_force(Vec2::new(5.0, 0.0), Some(1));
    assert_eq!(chain.segments()[0].position, before[0]);
    assert_eq!(chain.segments()[1].position, before[1] + Vec2::new(5.0, 0.0));
    assert_eq!(chain.segments()[2].position, before[2]);

    chain.apply_force(Vec2::new(0.0, -2.0), None);
    assert_eq!(
        chain.segments()[0].position,
        before[0] + Vec2::new(0.0, -2.0)
    );

    // Out-of-range index is a no-op.
    let snapshot: Vec<Point> = chain.segments().iter().map(|s| s.position).collect();
    chain.apply_force(Vec2::new(100.0, 100.0), Some(99));
    let after: Vec<Point> = chain.segments().iter().map(|s| s.position).collect();
    assert_eq!(snapshot, after);
}

#[test]
fn mass_scales_down_applied_forces() {
    let force = Vec2::new(8.0, 0.0);

    let mut light = PhysicsChain::new(Point::ORIGIN, 2, 20.0, test_params());
    let before = light.segments()[1].position;
    light.apply_force(force, Some(1));
    let light_offset = light.segments()[1].position - before;

    let mut heavy = PhysicsChain::new(Point::ORIGIN, 2, 20.0, test_params());
    heavy.segments_mut()[1].mass = 2.0;
    heavy.apply_force(force, Some(1));
    let heavy_offset = heavy.segments()[1].position - before;

    assert_eq!(heavy_offset, light_offset * 0.5);
}

#[test]
fn default_params_match_the_documented_values() {
    let params = ChainParams::default();
    assert_eq!(params.gravity, Vec2::new(0.0, 300.0));
    assert_eq!(params.damping, 0.9);
    assert_eq!(params.stiffness, 0.9);
    assert_eq!(params.iterations, 3);
}
