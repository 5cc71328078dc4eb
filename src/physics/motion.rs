//! Single-purpose secondary-motion generators built on the spring
//! primitives. Each one reduces a time or velocity signal to a scalar or
//! offset per frame; composition with bones and cameras happens entirely in
//! caller code.

use std::collections::VecDeque;

use crate::{
    foundation::core::{Point, Vec2},
    foundation::math::Rng64,
    physics::spring::{Spring, Spring2D},
};

/// Asymmetric breathing oscillator: a fast inhale blended into a slower
/// exhale, plus a gentle lateral sway at half the breath frequency.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Breathing {
    /// Breaths per second.
    pub rate: f64,
    /// Peak chest displacement.
    pub depth: f64,
    phase: f64,
}

/// One frame of breathing output.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BreathSample {
    /// Chest rise, `0..=depth`.
    pub chest: f64,
    /// Shoulder rise, follows the chest at reduced amplitude.
    pub shoulders: f64,
    /// Lateral sway offset.
    pub sway: f64,
    /// Whether the cycle is currently in its inhale portion.
    pub inhaling: bool,
}

// Fraction of the cycle spent inhaling; exhaling takes the rest.
const INHALE_FRACTION: f64 = 0.4;

impl Breathing {
    /// Breathing generator starting at the top of an inhale.
    pub fn new(rate: f64, depth: f64) -> Self {
        Self {
            rate,
            depth,
            phase: 0.0,
        }
    }

    /// Advance by `dt` seconds.
    pub fn update(&mut self, dt: f64) -> BreathSample {
        self.phase += self.rate * dt;
        let cycle = self.phase.fract();
        let inhaling = cycle < INHALE_FRACTION;
        // Cosine ramp up over the inhale, back down over the exhale.
        let lift = if inhaling {
            let s = cycle / INHALE_FRACTION;
            0.5 - 0.5 * (std::f64::consts::PI * s).cos()
        } else {
            let s = (cycle - INHALE_FRACTION) / (1.0 - INHALE_FRACTION);
            0.5 + 0.5 * (std::f64::consts::PI * s).cos()
        };
        BreathSample {
            chest: lift * self.depth,
            shoulders: lift * self.depth * 0.6,
            sway: (std::f64::consts::PI * self.phase).sin() * self.depth * 0.25,
            inhaling,
        }
    }
}

/// Tunables for [`EyeController`].
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct EyeParams {
    /// Look-at smoothing stiffness.
    pub stiffness: f64,
    /// Look-at smoothing damping.
    pub damping: f64,
    /// Maximum wander target distance from center.
    pub wander_radius: f64,
    /// Mean seconds between wander retargets.
    pub wander_interval: f64,
    /// Mean seconds between blinks.
    pub blink_interval: f64,
    /// Uniform jitter applied to each blink interval, seconds.
    pub blink_jitter: f64,
    /// Full close-then-open time, seconds.
    pub blink_duration: f64,
    /// Pupil size oscillation frequency, Hz.
    pub pupil_rate: f64,
    /// Pupil size oscillation amplitude around 1.0.
    pub pupil_amount: f64,
}

impl Default for EyeParams {
    fn default() -> Self {
        Self {
            stiffness: 120.0,
            damping: 14.0,
            wander_radius: 4.0,
            wander_interval: 2.0,
            blink_interval: 4.0,
            blink_jitter: 1.5,
            blink_duration: 0.18,
            pupil_rate: 0.3,
            pupil_amount: 0.05,
        }
    }
}

#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
struct BlinkTimer {
    next_at: f64,
    started_at: f64,
    blinking: bool,
}

impl BlinkTimer {
    fn new(first_at: f64) -> Self {
        Self {
            next_at: first_at,
            started_at: 0.0,
            blinking: false,
        }
    }

    fn force(&mut self, now: f64) {
        self.blinking = true;
        self.started_at = now;
    }

    fn openness(&mut self, now: f64, params: &EyeParams, rng: &mut Rng64) -> f64 {
        if !self.blinking && now >= self.next_at {
            self.force(now);
        }
        if !self.blinking {
            return 1.0;
        }
        let t = (now - self.started_at) / params.blink_duration.max(1e-6);
        if t >= 1.0 {
            self.blinking = false;
            self.next_at =
                now + params.blink_interval + rng.next_f64_signed() * params.blink_jitter;
            return 1.0;
        }
        // Triangular close/open envelope: fully shut at the midpoint.
        1.0 - (1.0 - (2.0 * t - 1.0).abs())
    }
}

/// Spring-smoothed gaze with independent per-eye blinking and a slow
/// pupil-size oscillation. Both eyes converge on one gaze point; only
/// blink timing differs between them.
///
/// In wander mode the gaze retargets to a seeded random point inside
/// `wander_radius` on a jittered interval; `look_at` pins it instead. All
/// randomness comes from the per-instance seed, so a fixed seed replays
/// exactly.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct EyeController {
    /// Tunables.
    pub params: EyeParams,
    gaze: Spring2D,
    look_target: Option<Vec2>,
    wander_target: Vec2,
    next_wander_at: f64,
    left_blink: BlinkTimer,
    right_blink: BlinkTimer,
    #[serde(skip, default = "default_rng")]
    rng: Rng64,
    time: f64,
}

fn default_rng() -> Rng64 {
    Rng64::new(0)
}

/// One frame of eye output.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EyeSample {
    /// Smoothed gaze offset from the eye center.
    pub gaze: Vec2,
    /// Left eyelid openness in `[0, 1]`.
    pub left_openness: f64,
    /// Right eyelid openness in `[0, 1]`.
    pub right_openness: f64,
    /// Pupil scale around 1.0.
    pub pupil_scale: f64,
}

impl EyeController {
    /// Controller in wander mode with an explicit seed.
    pub fn new(params: EyeParams, seed: u64) -> Self {
        let mut rng = Rng64::new(seed);
        let left_first = params.blink_interval + rng.next_f64_signed() * params.blink_jitter;
        let right_first = params.blink_interval + rng.next_f64_signed() * params.blink_jitter;
        Self {
            params,
            gaze: Spring2D::new(params.stiffness, params.damping, Vec2::ZERO),
            look_target: None,
            wander_target: Vec2::ZERO,
            next_wander_at: 0.0,
            left_blink: BlinkTimer::new(left_first),
            right_blink: BlinkTimer::new(right_first),
            rng,
            time: 0.0,
        }
    }

    /// Pin the gaze to a fixed offset; disables wandering.
    pub fn look_at(&mut self, target: Vec2) {
        self.look_target = Some(target);
    }

    /// Resume randomized wandering.
    pub fn wander(&mut self) {
        self.look_target = None;
        self.next_wander_at = self.time;
    }

    /// Start a blink on both eyes immediately.
    pub fn trigger_blink(&mut self) {
        self.left_blink.force(self.time);
        self.right_blink.force(self.time);
    }

    /// Advance by `dt` seconds.
    pub fn update(&mut self, dt: f64) -> EyeSample {
        self.time += dt;

        let target = match self.look_target {
            Some(t) => t,
            None => {
                if self.time >= self.next_wander_at {
                    let angle = self.rng.next_f64_01() * std::f64::consts::TAU;
                    let radius = self.rng.next_f64_01() * self.params.wander_radius;
                    self.wander_target = Vec2::from_angle(angle) * radius;
                    self.next_wander_at = self.time
                        + self.params.wander_interval * (0.5 + self.rng.next_f64_01());
                }
                self.wander_target
            }
        };
        self.gaze.set_target(target);
        let gaze = self.gaze.update(dt);

        let left_openness = self.left_blink.openness(self.time, &self.params, &mut self.rng);
        let right_openness = self.right_blink.openness(self.time, &self.params, &mut self.rng);
        let pupil_scale = 1.0
            + (std::f64::consts::TAU * self.params.pupil_rate * self.time).sin()
                * self.params.pupil_amount;

        EyeSample {
            gaze,
            left_openness,
            right_openness,
            pupil_scale,
        }
    }
}

/// Velocity-driven squash & stretch.
///
/// Speed maps through a spring-smoothed stretch scalar into scale factors
/// along and perpendicular to the motion direction. Standing still degrades
/// to `(1, 1)`, never to NaN.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct SquashStretch {
    /// Stretch gained per unit of speed.
    pub intensity: f64,
    /// Hard cap on the along-axis stretch factor.
    pub max_stretch: f64,
    /// Whether the perpendicular axis compensates to preserve area.
    pub preserve_volume: bool,
    stretch: Spring,
}

/// One frame of squash/stretch output.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StretchSample {
    /// Scale along the motion direction.
    pub along: f64,
    /// Scale perpendicular to the motion direction.
    pub perp: f64,
    /// Motion direction, radians; 0 when standing still.
    pub angle: f64,
}

impl SquashStretch {
    /// Generator at rest (no deformation).
    pub fn new(intensity: f64, smoothing: f64, preserve_volume: bool) -> Self {
        Self {
            intensity,
            max_stretch: 1.8,
            preserve_volume,
            stretch: Spring::new(smoothing, smoothing.sqrt() * 2.0, 1.0),
        }
    }

    /// Advance by `dt` seconds under the character's current `velocity`.
    pub fn update(&mut self, dt: f64, velocity: Vec2) -> StretchSample {
        let speed = velocity.hypot();
        let target = (1.0 + speed * self.intensity).min(self.max_stretch);
        self.stretch.set_target(target);
        let along = self.stretch.update(dt).max(0.1);
        let perp = if self.preserve_volume {
            1.0 / along
        } else {
            1.0 - (along - 1.0) * 0.5
        };
        let angle = if speed > 1e-9 { velocity.atan2() } else { 0.0 };
        StretchSample { along, perp, angle }
    }
}

/// Delayed follow with velocity overshoot, for heads, held props and other
/// parts that trail the body.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct InertiaFollow {
    /// Frames of lag behind the driving position.
    pub delay_frames: usize,
    /// Velocity overshoot factor.
    pub overshoot: f64,
    history: VecDeque<Point>,
    follower: Spring2D,
}

impl InertiaFollow {
    /// Follower resting at `initial`.
    pub fn new(delay_frames: usize, overshoot: f64, initial: Point) -> Self {
        Self {
            delay_frames,
            overshoot,
            history: VecDeque::with_capacity(delay_frames + 1),
            follower: Spring2D::new(90.0, 12.0, initial.to_vec2()),
        }
    }

    /// Advance by `dt` seconds toward `target` and return the follower
    /// position.
    pub fn update(&mut self, dt: f64, target: Point) -> Point {
        let prev = self.history.back().copied().unwrap_or(target);
        self.history.push_back(target);
        while self.history.len() > self.delay_frames + 1 {
            self.history.pop_front();
        }
        let delayed = self.history.front().copied().unwrap_or(target);
        let velocity = target - prev;
        let desired = delayed + velocity * self.overshoot;
        self.follower.set_target(desired.to_vec2());
        self.follower.update(dt).to_point()
    }
}

/// Exponentially decaying sinusoid armed by [`Wobble::trigger`].
///
/// The trigger phase comes from the per-instance seed, so replays are
/// exact under a fixed seed.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Wobble {
    /// Oscillation frequency, Hz.
    pub frequency: f64,
    /// Exponential amplitude decay rate, 1/s.
    pub decay: f64,
    amplitude: f64,
    phase: f64,
    elapsed: f64,
    #[serde(skip, default = "default_rng")]
    rng: Rng64,
}

impl Wobble {
    /// Quiet wobble with an explicit seed.
    pub fn new(frequency: f64, decay: f64, seed: u64) -> Self {
        Self {
            frequency,
            decay,
            amplitude: 0.0,
            phase: 0.0,
            elapsed: 0.0,
            rng: Rng64::new(seed),
        }
    }

    /// Arm the wobble. A stronger trigger replaces a weaker one in flight;
    /// a weaker one is absorbed.
    pub fn trigger(&mut self, intensity: f64) {
        let current = self.amplitude * (-self.decay * self.elapsed).exp();
        if intensity >= current {
            self.amplitude = intensity;
            self.phase = self.rng.next_f64_01() * std::f64::consts::TAU;
            self.elapsed = 0.0;
        }
    }

    /// Advance by `dt` seconds and sample the current displacement.
    pub fn update(&mut self, dt: f64) -> f64 {
        self.elapsed += dt;
        let envelope = self.amplitude * (-self.decay * self.elapsed).exp();
        if envelope < 1e-6 {
            return 0.0;
        }
        envelope * (std::f64::consts::TAU * self.frequency * self.elapsed + self.phase).sin()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/physics/motion.rs"]
mod tests;
