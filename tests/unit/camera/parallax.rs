use super::*;

fn fps30() -> Fps {
    Fps::new(30, 1).unwrap()
}

#[test]
fn depth_zero_cancels_camera_motion() {
    let mut parallax = ParallaxCamera::new(640.0, 360.0);
    parallax.add_layer(ParallaxLayer::new("sky", 0.0));
    parallax.camera.position = Point::new(80.0, -20.0);
    parallax.update(0, fps30()).unwrap();
    let layer = parallax.layer("sky").unwrap();
    assert_eq!(layer.offset, Vec2::new(-80.0, 20.0));
}

#[test]
fn depth_one_rides_with_the_camera() {
    let mut parallax = ParallaxCamera::new(640.0, 360.0);
    parallax.add_layer(ParallaxLayer::new("playfield", 1.0));
    parallax.camera.position = Point::new(300.0, 150.0);
    parallax.update(0, fps30()).unwrap();
    assert_eq!(parallax.layer("playfield").unwrap().offset, Vec2::ZERO);
}

#[test]
fn intermediate_depths_scale_linearly() {
    let mut parallax = ParallaxCamera::new(640.0, 360.0);
    parallax.add_layer(ParallaxLayer::new("hills", 0.5));
    parallax.add_layer(ParallaxLayer::new("trees", 0.75));
    parallax.camera.position = Point::new(100.0, 0.0);
    parallax.update(0, fps30()).unwrap();
    assert_eq!(parallax.layer("hills").unwrap().offset, Vec2::new(-50.0, 0.0));
    assert_eq!(parallax.layer("trees").unwrap().offset, Vec2::new(-25.0, 0.0));
}

#[test]
fn foreground_depths_overshoot_the_camera() {
    let mut parallax = ParallaxCamera::new(640.0, 360.0);
    parallax.add_layer(ParallaxLayer::new("fog", 1.5));
    parallax.camera.position = Point::new(100.0, 0.0);
    parallax.update(0, fps30()).unwrap();
    // Depth above 1 moves against the background, faster than the camera.
    assert_eq!(parallax.layer("fog").unwrap().offset, Vec2::new(50.0, 0.0));
}

#[test]
fn set_reference_rebases_the_offsets() {
    let mut parallax = ParallaxCamera::new(640.0, 360.0);
    parallax.add_layer(ParallaxLayer::new("sky", 0.0));
    parallax.camera.position = Point::new(80.0, 0.0);
    parallax.set_reference(Point::new(80.0, 0.0));
    parallax.update(0, fps30()).unwrap();
    assert_eq!(parallax.layer("sky").unwrap().offset, Vec2::ZERO);
}

#[test]
fn add_layer_replaces_by_name() {
    let mut parallax = ParallaxCamera::new(640.0, 360.0);
    parallax.add_layer(ParallaxLayer::new("sky", 0.2));
    parallax.add_layer(ParallaxLayer::new("sky", 0.8));
    assert_eq!(parallax.layers_back_to_front().len(), 1);
    assert_eq!(parallax.layer("sky").unwrap().depth, 0.8);
}

#[test]
fn layers_sort_back_to_front_by_z_order() {
    let mut parallax = ParallaxCamera::new(640.0, 360.0);
    let mut far = ParallaxLayer::new("far", 0.1);
    far.z_order = -10;
    let mut near = ParallaxLayer::new("near", 0.9);
    near.z_order = 10;
    let mid = ParallaxLayer::new("mid", 0.5);
    parallax.add_layer(near);
    parallax.add_layer(far);
    parallax.add_layer(mid);

    let names: Vec<&str> = parallax
        .layers_back_to_front()
        .iter()
        .map(|l| l.name.as_str())
        .collect();
    assert_eq!(names, vec!["far", "mid", "near"]);
}

#[test]
fn wrapped_camera_still_updates() {
    let mut parallax = ParallaxCamera::new(640.0, 360.0);
    parallax.camera.follow(Point::new(100.0, 0.0), Vec2::ZERO);
    let fps = Fps::new(60, 1).unwrap();
    for frame in 0..600 {
        parallax.update(frame, fps).unwrap();
    }
    assert!((parallax.camera.position - Point::new(100.0, 0.0)).hypot() < 0.5);
}

#[test]
fn blur_is_zero_at_the_focal_plane_and_capped_far_away() {
    let dof = DepthOfField::new(0.5, 2.0, 8.0);
    assert_eq!(dof.blur_radius(0.5), 0.0);
    assert!(dof.blur_radius(0.4) > 0.0);
    // Symmetric around the focal plane. The two offsets are not the same
    // float, so compare up to rounding.
    assert!((dof.blur_radius(0.3) - dof.blur_radius(0.7)).abs() < 1e-9);
    // |2.0 - 0.5| * 2.0 * 8.0 is far past the cap.
    assert_eq!(dof.blur_radius(2.0), 8.0);
}

#[test]
fn blur_grows_with_distance_from_focus() {
    let dof = DepthOfField::new(0.5, 1.0, 10.0);
    let near = dof.blur_radius(0.45);
    let far = dof.blur_radius(0.2);
    assert!(far > near);
    assert!((near - 0.05 * 10.0).abs() < 1e-9);
}
