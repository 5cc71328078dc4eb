use super::*;

const DT: f64 = 1.0 / 60.0;

#[test]
fn at_rest_on_target_stays_exactly_put() {
    let mut spring = Spring::new(120.0, 14.0, 5.0);
    for _ in 0..100 {
        spring.update(DT);
    }
    assert_eq!(spring.position(), 5.0);
    assert_eq!(spring.velocity(), 0.0);
}

#[test]
fn converges_to_a_new_target() {
    let mut spring = Spring::new(120.0, 14.0, 0.0);
    spring.set_target(10.0);
    for _ in 0..600 {
        spring.update(DT);
    }
    assert!((spring.position() - 10.0).abs() < 1e-3);
    assert!(spring.velocity().abs() < 1e-3);
}

#[test]
fn set_target_leaves_position_and_velocity_alone() {
    let mut spring = Spring::new(80.0, 10.0, 3.0);
    spring.set_target(-2.0);
    assert_eq!(spring.position(), 3.0);
    assert_eq!(spring.velocity(), 0.0);
    assert_eq!(spring.target(), -2.0);
}

#[test]
fn nudge_injects_velocity_that_damps_out() {
    let mut spring = Spring::new(120.0, 14.0, 0.0);
    spring.nudge(50.0);
    assert_eq!(spring.velocity(), 50.0);
    let displaced = spring.update(DT);
    assert!(displaced > 0.0);
    for _ in 0..600 {
        spring.update(DT);
    }
    assert!(spring.position().abs() < 1e-3);
}

#[test]
fn reset_snaps_everything() {
    let mut spring = Spring::new(120.0, 14.0, 0.0);
    spring.set_target(10.0);
    spring.nudge(5.0);
    spring.update(DT);
    spring.reset(7.0);
    assert_eq!(spring.position(), 7.0);
    assert_eq!(spring.target(), 7.0);
    assert_eq!(spring.velocity(), 0.0);
}

#[test]
fn non_positive_mass_falls_back_to_unit_mass() {
    let mut bad = Spring::with_mass(120.0, 14.0, -3.0, 0.0);
    let mut unit = Spring::new(120.0, 14.0, 0.0);
    bad.set_target(10.0);
    unit.set_target(10.0);
    for _ in 0..120 {
        assert_eq!(bad.update(DT), unit.update(DT));
    }
    assert!(bad.position().is_finite());
}

#[test]
fn heavier_mass_responds_slower() {
    let mut light = Spring::with_mass(120.0, 14.0, 1.0, 0.0);
    let mut heavy = Spring::with_mass(120.0, 14.0, 4.0, 0.0);
    light.set_target(10.0);
    heavy.set_target(10.0);
    for _ in 0..10 {
        light.update(DT);
        heavy.update(DT);
    }
    assert!(light.position() > heavy.position());
}

#[test]
fn spring_2d_axes_are_independent() {
    let mut spring = Spring2D::new(120.0, 14.0, Vec2::ZERO);
    spring.set_target(Vec2::new(10.0, -4.0));
    for _ in 0..600 {
        spring.update(DT);
    }
    let pos = spring.position();
    assert!((pos.x - 10.0).abs() < 1e-3);
    assert!((pos.y + 4.0).abs() < 1e-3);

    // Each axis matches a scalar spring driven the same way.
    let mut scalar = Spring::new(120.0, 14.0, 0.0);
    scalar.set_target(10.0);
    for _ in 0..600 {
        scalar.update(DT);
    }
    assert_eq!(pos.x, scalar.position());
}

#[test]
fn spring_2d_reset_and_nudge() {
    let mut spring = Spring2D::new(120.0, 14.0, Vec2::ZERO);
    spring.nudge(Vec2::new(3.0, -6.0));
    assert_eq!(spring.velocity(), Vec2::new(3.0, -6.0));
    spring.reset(Vec2::new(1.0, 2.0));
    assert_eq!(spring.position(), Vec2::new(1.0, 2.0));
    assert_eq!(spring.velocity(), Vec2::ZERO);
}
