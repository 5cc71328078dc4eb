//! Marionette is a procedural 2D character animation and physics core.
//!
//! It produces plain transform and position data for an external renderer
//! and consumes only frame-time deltas and target values. Four subsystems,
//! each independently updatable:
//!
//! 1. **Skeleton**: hierarchical bone kinematics with angle constraints and
//!    two IK solvers (iterative FABRIK over named chains, analytic two-bone
//!    with pole-vector bend control)
//! 2. **Physics**: damped springs, Verlet chains with constraint
//!    relaxation, and derived secondary-motion generators (breathing, eye
//!    wander/blink, squash & stretch, inertia follow, wobble)
//! 3. **Camera**: world<->screen transform with spring-smoothed follow and
//!    zoom, a composable shake stack, parallax layers and depth-of-field
//! 4. **Animation**: typed keyframe tracks with 14 easing kernels and
//!    multi-track clips
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: identical `dt`/frame sequences reproduce identical
//!   output; every random signal draws from an explicit per-instance seed.
//! - **Single-threaded by contract**: instances are independent (one per
//!   character is fine) but an individual instance expects one writer.
//! - **Configuration errors only**: setup mistakes fail fast with context;
//!   per-frame updates never fail on degenerate numeric input, they
//!   degrade to documented safe defaults.
//!
//! Composition happens in caller code: each frame, advance the skeleton
//! (optionally after an IK solve), the physics generators, the camera and
//! the clips with the same `dt`/frame, re-point chain anchors at bone
//! world positions, then read world transforms, chain point lists, camera
//! transforms and track values for drawing.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod camera;
mod foundation;
mod physics;
mod skeleton;

pub use animation::clip::AnimationClip;
pub use animation::ease::Ease;
pub use animation::track::{Keyframe, KeyframeTrack, TrackValue};
pub use camera::parallax::{DepthOfField, ParallaxCamera, ParallaxLayer};
pub use camera::rig::Camera;
pub use camera::shake::{ShakeInstance, ShakeKind};
pub use foundation::core::{
    Affine, Fps, Point, Rect, Vec2, lerp_vec, normalize_or_zero, rotate, wrap_angle,
};
pub use foundation::error::{MarionetteError, MarionetteResult};
pub use foundation::math::Rng64;
pub use physics::chain::{ChainParams, ChainSegment, PhysicsChain};
pub use physics::motion::{
    BreathSample, Breathing, EyeController, EyeParams, EyeSample, InertiaFollow, SquashStretch,
    StretchSample, Wobble,
};
pub use physics::spring::{Spring, Spring2D};
pub use skeleton::bone::{Bone, BoneConstraint, BoneId};
pub use skeleton::ik::{
    BendDirection, FABRIK_ITERATIONS, FABRIK_TOLERANCE, TwoBoneSolution, solve_arm_ik,
    solve_leg_ik, solve_two_bone,
};
pub use skeleton::model::Skeleton;
