use super::*;

const EPS: f64 = 1e-12;

#[test]
fn fps_rejects_zero_terms() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
    let fps = Fps::new(30, 1).unwrap();
    assert!((fps.frames_to_secs(30) - 1.0).abs() < EPS);
    assert!((fps.frame_duration_secs() - 1.0 / 30.0).abs() < EPS);
}

#[test]
fn rotate_quarter_turn() {
    let v = rotate(Vec2::new(1.0, 0.0), std::f64::consts::FRAC_PI_2);
    assert!(v.x.abs() < EPS);
    assert!((v.y - 1.0).abs() < EPS);
}

#[test]
fn normalize_or_zero_handles_zero_length() {
    assert_eq!(normalize_or_zero(Vec2::ZERO), Vec2::ZERO);
    let n = normalize_or_zero(Vec2::new(3.0, 4.0));
    assert!((n.hypot() - 1.0).abs() < EPS);
    assert!((n.x - 0.6).abs() < EPS);
}

#[test]
fn wrap_angle_lands_in_half_open_interval() {
    let pi = std::f64::consts::PI;
    assert!((wrap_angle(3.0 * pi / 2.0) + pi / 2.0).abs() < EPS);
    // PI is included, -PI wraps up to PI.
    assert!((wrap_angle(pi) - pi).abs() < EPS);
    assert!((wrap_angle(-pi) - pi).abs() < EPS);
    assert!((wrap_angle(5.0 * pi) - pi).abs() < 1e-9);
    assert_eq!(wrap_angle(0.0), 0.0);
}

#[test]
fn lerp_vec_endpoints_and_midpoint() {
    let a = Vec2::new(0.0, 10.0);
    let b = Vec2::new(10.0, 0.0);
    assert_eq!(lerp_vec(a, b, 0.0), a);
    assert_eq!(lerp_vec(a, b, 1.0), b);
    assert_eq!(lerp_vec(a, b, 0.5), Vec2::new(5.0, 5.0));
}
