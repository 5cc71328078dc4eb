//! Runs a two-bone leg solve against a moving foot target while a Verlet
//! chain (a ponytail) trails the hip, printing world positions per frame.
//!
//! ```sh
//! cargo run --example pendulum_walk
//! ```

use marionette::{
    ChainParams, Fps, MarionetteResult, PhysicsChain, Point, Skeleton, Vec2,
};

fn main() -> MarionetteResult<()> {
    tracing_subscriber::fmt::init();

    let fps = Fps::new(30, 1)?;
    let dt = fps.frame_duration_secs();

    let mut skeleton = Skeleton::new();
    skeleton.position = Point::new(0.0, 0.0);
    let hip = skeleton.add_bone("hip", 45.0, 1.2, None, None)?;
    let knee = skeleton.add_bone("knee", 42.0, 0.3, Some(hip), None)?;
    skeleton.create_ik_chain("leg", &["hip", "knee"])?;

    let mut ponytail = PhysicsChain::new(Point::ORIGIN, 4, 12.0, ChainParams::default());

    for frame in 0..90u64 {
        let t = fps.frames_to_secs(frame);
        // Foot target sweeps an ellipse, like a stride.
        let foot = Point::new(30.0 * (t * 2.0).cos(), 70.0 + 8.0 * (t * 4.0).sin());
        skeleton.solve_ik("leg", foot)?;

        let hip_joint = skeleton
            .bone(hip)
            .map(|b| b.world_start())
            .unwrap_or(Point::ORIGIN);
        ponytail.set_anchor(hip_joint + Vec2::new(-4.0, -10.0));
        ponytail.update(dt);

        let knee_joint = skeleton
            .bone(knee)
            .map(|b| b.world_start())
            .unwrap_or(Point::ORIGIN);
        let tail_tip = ponytail.points().last().copied().unwrap_or(Point::ORIGIN);
        println!(
            "frame {frame:3}  knee ({:7.2}, {:7.2})  tail tip ({:7.2}, {:7.2})",
            knee_joint.x, knee_joint.y, tail_tip.x, tail_tip.y
        );
    }
    Ok(())
}
