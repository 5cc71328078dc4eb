use crate::{
    animation::clip::AnimationClip,
    animation::track::TrackValue,
    camera::shake::ShakeInstance,
    foundation::core::{Affine, Fps, Point, Rect, Vec2},
    foundation::error::{MarionetteError, MarionetteResult},
    physics::spring::{Spring, Spring2D},
};

// Reserved track names consumed by a bound clip.
const TRACK_POSITION: &str = "position";
const TRACK_ZOOM: &str = "zoom";
const TRACK_ROTATION: &str = "rotation";

/// Virtual 2D camera: world<->screen transform with zoom and roll,
/// spring-smoothed follow, clamping bounds, an optional bound keyframe
/// clip, and a composable shake stack.
///
/// The camera only computes geometry; cropping or resampling pixels against
/// the resulting transform is the renderer's concern.
#[derive(Clone, Debug)]
pub struct Camera {
    /// Viewport width in pixels.
    pub width: f64,
    /// Viewport height in pixels.
    pub height: f64,
    /// World position the view is centered on.
    pub position: Point,
    /// View roll, radians.
    pub rotation: f64,
    zoom: Spring,
    follow_target: Option<Point>,
    follow_offset: Vec2,
    follow: Spring2D,
    bounds: Option<Rect>,
    clip: Option<AnimationClip>,
    shakes: Vec<ShakeInstance>,
    shake_offset: Vec2,
    shake_rotation: f64,
}

impl Camera {
    /// Camera centered on the origin at zoom 1.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            position: Point::ORIGIN,
            rotation: 0.0,
            zoom: Spring::new(60.0, 12.0, 1.0),
            follow_target: None,
            follow_offset: Vec2::ZERO,
            follow: Spring2D::new(40.0, 10.0, Vec2::ZERO),
            bounds: None,
            clip: None,
            shakes: Vec::new(),
            shake_offset: Vec2::ZERO,
            shake_rotation: 0.0,
        }
    }

    /// Current (smoothed) zoom factor.
    pub fn zoom(&self) -> f64 {
        self.zoom.position()
    }

    /// Retarget the zoom spring.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom.set_target(zoom);
    }

    /// Snap the zoom immediately, skipping the smoothing.
    pub fn snap_zoom(&mut self, zoom: f64) {
        self.zoom.reset(zoom);
    }

    /// Follow `target + offset` through the position spring. Call again
    /// each frame for a moving target.
    pub fn follow(&mut self, target: Point, offset: Vec2) {
        if self.follow_target.is_none() {
            self.follow.reset(self.position.to_vec2());
        }
        self.follow_target = Some(target);
        self.follow_offset = offset;
    }

    /// Stop following; the camera stays where it is.
    pub fn clear_follow(&mut self) {
        self.follow_target = None;
    }

    /// Clamp the camera position inside `bounds` after every update.
    pub fn set_bounds(&mut self, bounds: Option<Rect>) {
        self.bounds = bounds;
    }

    /// Drive position/zoom/rotation from a clip's reserved tracks
    /// (`"position"`, `"zoom"`, `"rotation"`); absent tracks leave the
    /// corresponding state untouched.
    pub fn bind_clip(&mut self, clip: AnimationClip) {
        self.clip = Some(clip);
    }

    /// Remove the bound clip, if any.
    pub fn unbind_clip(&mut self) {
        self.clip = None;
    }

    /// Add a shake on top of whatever is already running.
    pub fn add_shake(&mut self, shake: ShakeInstance) {
        self.shakes.push(shake);
    }

    /// Summed offset of all active shakes, as of the last update.
    pub fn shake_offset(&self) -> Vec2 {
        self.shake_offset
    }

    /// Summed roll of all active shakes, as of the last update.
    pub fn shake_rotation(&self) -> f64 {
        self.shake_rotation
    }

    /// Number of shakes still alive.
    pub fn active_shakes(&self) -> usize {
        self.shakes.len()
    }

    /// Advance one frame.
    ///
    /// Order: bound clip, follow spring, zoom spring, bounds clamp, shake
    /// sampling and expiry. Only a malformed bound clip can fail (a
    /// configuration error); steady-state updates always succeed.
    #[tracing::instrument(skip(self))]
    pub fn update(&mut self, frame: u64, fps: Fps) -> MarionetteResult<()> {
        let dt = fps.frame_duration_secs();

        self.apply_clip(frame)?;

        if let Some(target) = self.follow_target {
            self.follow.set_target(target.to_vec2() + self.follow_offset);
            self.position = self.follow.update(dt).to_point();
        }

        self.zoom.update(dt);

        if let Some(bounds) = self.bounds {
            // kurbo permits backward rects (x0 > x1); normalize before
            // clamping or f64::clamp panics on min > max.
            let bounds = bounds.abs();
            self.position = Point::new(
                self.position.x.clamp(bounds.x0, bounds.x1),
                self.position.y.clamp(bounds.y0, bounds.y1),
            );
        }

        let mut offset = Vec2::ZERO;
        let mut roll = 0.0;
        for shake in &mut self.shakes {
            let (o, r) = shake.sample(shake.elapsed);
            offset += o;
            roll += r;
            shake.elapsed += dt;
        }
        self.shake_offset = offset;
        self.shake_rotation = roll;
        self.shakes.retain(|s| !s.expired());

        Ok(())
    }

    fn apply_clip(&mut self, frame: u64) -> MarionetteResult<()> {
        let Some(clip) = &self.clip else {
            return Ok(());
        };

        if clip.track(TRACK_POSITION).is_some() {
            match clip.value_at(TRACK_POSITION, frame)? {
                TrackValue::Tuple(v) if v.len() == 2 => {
                    self.position = Point::new(v[0], v[1]);
                }
                other => {
                    return Err(MarionetteError::camera(format!(
                        "camera clip '{}' track 'position' must hold 2-tuples, got {other:?}",
                        clip.name
                    )));
                }
            }
        }
        if clip.track(TRACK_ZOOM).is_some() {
            match clip.value_at(TRACK_ZOOM, frame)? {
                TrackValue::Scalar(z) => self.zoom.set_target(z),
                other => {
                    return Err(MarionetteError::camera(format!(
                        "camera clip '{}' track 'zoom' must hold scalars, got {other:?}",
                        clip.name
                    )));
                }
            }
        }
        if clip.track(TRACK_ROTATION).is_some() {
            match clip.value_at(TRACK_ROTATION, frame)? {
                TrackValue::Scalar(r) => self.rotation = r,
                other => {
                    return Err(MarionetteError::camera(format!(
                        "camera clip '{}' track 'rotation' must hold scalars, got {other:?}",
                        clip.name
                    )));
                }
            }
        }
        Ok(())
    }

    /// Composed world-to-screen affine: center the shake-adjusted position,
    /// zoom, then roll. Hand this to the renderer for the actual resample.
    pub fn view_transform(&self) -> Affine {
        Affine::translate(Vec2::new(self.width * 0.5, self.height * 0.5))
            * Affine::rotate(self.rotation + self.shake_rotation)
            * Affine::scale(self.zoom.position())
            * Affine::translate(-(self.position.to_vec2() + self.shake_offset))
    }

    /// Map a world point to screen coordinates.
    pub fn world_to_screen(&self, world: Point) -> Point {
        self.view_transform() * world
    }

    /// Exact inverse of [`Camera::world_to_screen`].
    pub fn screen_to_world(&self, screen: Point) -> Point {
        self.view_transform().inverse() * screen
    }
}

#[cfg(test)]
#[path = "../../tests/unit/camera/rig.rs"]
mod tests;
