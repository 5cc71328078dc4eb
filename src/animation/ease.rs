use crate::foundation::error::{MarionetteError, MarionetteResult};

/// Easing kernel applied to normalized time when interpolating toward the
/// next keyframe.
///
/// A closed set matched exhaustively: adding a kernel is a compile-time
/// exercise, never a silent fallback. Every kernel is a pure closed-form
/// `f(t) -> t'`; downstream visual timing depends on the exact shapes, so
/// no approximations or table lookups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    /// Identity.
    Linear,
    /// Quadratic accelerate-in.
    InQuad,
    /// Quadratic decelerate-out.
    OutQuad,
    /// Quadratic in, then out.
    InOutQuad,
    /// Cubic accelerate-in.
    InCubic,
    /// Cubic decelerate-out.
    OutCubic,
    /// Cubic in, then out.
    InOutCubic,
    /// Sinusoidal accelerate-in.
    InSine,
    /// Sinusoidal decelerate-out.
    OutSine,
    /// Sinusoidal in, then out.
    InOutSine,
    /// Elastic overshoot at the start.
    InElastic,
    /// Elastic overshoot at the end.
    OutElastic,
    /// Bouncing settle at the end.
    OutBounce,
    /// Hold the previous value until `t >= 1`.
    Step,
}

impl Ease {
    /// Remap normalized time `t` (clamped into `[0, 1]`) to eased progress.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::InSine => 1.0 - (t * std::f64::consts::FRAC_PI_2).cos(),
            Self::OutSine => (t * std::f64::consts::FRAC_PI_2).sin(),
            Self::InOutSine => -((std::f64::consts::PI * t).cos() - 1.0) / 2.0,
            Self::InElastic => {
                const C4: f64 = std::f64::consts::TAU / 3.0;
                if t == 0.0 {
                    0.0
                } else if t == 1.0 {
                    1.0
                } else {
                    -(2.0f64.powf(10.0 * t - 10.0)) * ((t * 10.0 - 10.75) * C4).sin()
                }
            }
            Self::OutElastic => {
                const C4: f64 = std::f64::consts::TAU / 3.0;
                if t == 0.0 {
                    0.0
                } else if t == 1.0 {
                    1.0
                } else {
                    2.0f64.powf(-10.0 * t) * ((t * 10.0 - 0.75) * C4).sin() + 1.0
                }
            }
            Self::OutBounce => {
                const N1: f64 = 7.5625;
                const D1: f64 = 2.75;
                if t < 1.0 / D1 {
                    N1 * t * t
                } else if t < 2.0 / D1 {
                    let t = t - 1.5 / D1;
                    N1 * t * t + 0.75
                } else if t < 2.5 / D1 {
                    let t = t - 2.25 / D1;
                    N1 * t * t + 0.9375
                } else {
                    let t = t - 2.625 / D1;
                    N1 * t * t + 0.984375
                }
            }
            Self::Step => {
                if t >= 1.0 {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }

    /// Stable kind name used by the record round trip.
    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::InQuad => "in_quad",
            Self::OutQuad => "out_quad",
            Self::InOutQuad => "in_out_quad",
            Self::InCubic => "in_cubic",
            Self::OutCubic => "out_cubic",
            Self::InOutCubic => "in_out_cubic",
            Self::InSine => "in_sine",
            Self::OutSine => "out_sine",
            Self::InOutSine => "in_out_sine",
            Self::InElastic => "in_elastic",
            Self::OutElastic => "out_elastic",
            Self::OutBounce => "out_bounce",
            Self::Step => "step",
        }
    }

    /// Parse a kind name produced by [`Ease::name`].
    pub fn from_name(name: &str) -> MarionetteResult<Self> {
        Ok(match name {
            "linear" => Self::Linear,
            "in_quad" => Self::InQuad,
            "out_quad" => Self::OutQuad,
            "in_out_quad" => Self::InOutQuad,
            "in_cubic" => Self::InCubic,
            "out_cubic" => Self::OutCubic,
            "in_out_cubic" => Self::InOutCubic,
            "in_sine" => Self::InSine,
            "out_sine" => Self::OutSine,
            "in_out_sine" => Self::InOutSine,
            "in_elastic" => Self::InElastic,
            "out_elastic" => Self::OutElastic,
            "out_bounce" => Self::OutBounce,
            "step" => Self::Step,
            other => {
                return Err(MarionetteError::serde(format!(
                    "unknown easing kind '{other}'"
                )));
            }
        })
    }

    /// All kernels, in declaration order.
    pub const ALL: [Ease; 14] = [
        Self::Linear,
        Self::InQuad,
        Self::OutQuad,
        Self::InOutQuad,
        Self::InCubic,
        Self::OutCubic,
        Self::InOutCubic,
        Self::InSine,
        Self::OutSine,
        Self::InOutSine,
        Self::InElastic,
        Self::OutElastic,
        Self::OutBounce,
        Self::Step,
    ];
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
