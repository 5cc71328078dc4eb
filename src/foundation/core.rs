use crate::foundation::error::{MarionetteError, MarionetteResult};

pub use kurbo::{Affine, Point, Rect, Vec2};

/// Frame rate as an exact rational (`num / den` frames per second).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator, must be > 0.
    pub num: u32,
    /// Denominator, must be > 0.
    pub den: u32,
}

impl Fps {
    /// Validated constructor; both terms must be non-zero.
    pub fn new(num: u32, den: u32) -> MarionetteResult<Self> {
        if den == 0 {
            return Err(MarionetteError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(MarionetteError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Frames per second as a float.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of a single frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Convert a frame count to seconds.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * self.frame_duration_secs()
    }
}

/// Rotate `v` about the origin by `angle` radians (counter-clockwise).
pub fn rotate(v: Vec2, angle: f64) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Normalize `v`, yielding `Vec2::ZERO` for zero-length input.
///
/// Zero-length input is an expected steady state (e.g. a character standing
/// still), not an error, so this never produces NaN.
pub fn normalize_or_zero(v: Vec2) -> Vec2 {
    let len = v.hypot();
    if len <= 1e-12 {
        Vec2::ZERO
    } else {
        v / len
    }
}

/// Wrap an angle into the half-open interval `(-PI, PI]`.
pub fn wrap_angle(a: f64) -> f64 {
    let tau = std::f64::consts::TAU;
    let mut a = a % tau;
    if a > std::f64::consts::PI {
        a -= tau;
    } else if a <= -std::f64::consts::PI {
        a += tau;
    }
    a
}

/// Linear interpolation between two vectors.
pub fn lerp_vec(a: Vec2, b: Vec2, t: f64) -> Vec2 {
    a + (b - a) * t
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
