use crate::{
    animation::ease::Ease,
    foundation::error::{MarionetteError, MarionetteResult},
};

/// Value carried by a keyframe.
///
/// Scalars interpolate directly and equal-length tuples interpolate
/// element-wise; every other pairing uses step semantics (the next value is
/// taken once eased `t` reaches 1).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum TrackValue {
    /// A single float.
    Scalar(f64),
    /// A fixed-length tuple of floats (position, color channels, ...).
    Tuple(Vec<f64>),
    /// A boolean flag; always steps.
    Flag(bool),
}

impl TrackValue {
    /// Interpolate `a -> b` at eased progress `t`.
    ///
    /// Mismatched tuple lengths are a configuration error, surfaced with
    /// both lengths; mixed kinds step rather than fail.
    pub fn interpolate(a: &Self, b: &Self, t: f64) -> MarionetteResult<Self> {
        match (a, b) {
            (Self::Scalar(x), Self::Scalar(y)) => Ok(Self::Scalar(x + (y - x) * t)),
            (Self::Tuple(xs), Self::Tuple(ys)) => {
                if xs.len() != ys.len() {
                    return Err(MarionetteError::animation(format!(
                        "dimension mismatch: cannot interpolate tuple of length {} with length {}",
                        xs.len(),
                        ys.len()
                    )));
                }
                Ok(Self::Tuple(
                    xs.iter()
                        .zip(ys)
                        .map(|(x, y)| x + (y - x) * t)
                        .collect(),
                ))
            }
            _ => Ok(if t >= 1.0 { b.clone() } else { a.clone() }),
        }
    }
}

impl From<f64> for TrackValue {
    fn from(v: f64) -> Self {
        Self::Scalar(v)
    }
}

impl From<(f64, f64)> for TrackValue {
    fn from((x, y): (f64, f64)) -> Self {
        Self::Tuple(vec![x, y])
    }
}

impl From<bool> for TrackValue {
    fn from(v: bool) -> Self {
        Self::Flag(v)
    }
}

/// A single keyframe on a track.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframe {
    /// Frame number the value lands on.
    pub frame: u64,
    /// Value at that frame.
    pub value: TrackValue,
    /// Kernel shaping the approach from the previous keyframe to this one.
    pub easing: Ease,
}

/// A frame-sorted sequence of keyframes with at most one key per frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct KeyframeTrack {
    keys: Vec<Keyframe>,
    default: TrackValue,
}

impl KeyframeTrack {
    /// New empty track; `default` is returned while no keys exist.
    pub fn new(default: impl Into<TrackValue>) -> Self {
        Self {
            keys: Vec::new(),
            default: default.into(),
        }
    }

    /// Insert a keyframe, replacing any existing key at the same frame.
    /// The key list stays sorted by frame.
    pub fn add_keyframe(&mut self, frame: u64, value: impl Into<TrackValue>, easing: Ease) {
        let value = value.into();
        let idx = self.keys.partition_point(|k| k.frame < frame);
        if self.keys.get(idx).is_some_and(|k| k.frame == frame) {
            self.keys[idx] = Keyframe {
                frame,
                value,
                easing,
            };
        } else {
            self.keys.insert(
                idx,
                Keyframe {
                    frame,
                    value,
                    easing,
                },
            );
        }
    }

    /// Remove the keyframe at `frame`, if any. Returns whether one existed.
    pub fn remove_keyframe(&mut self, frame: u64) -> bool {
        let idx = self.keys.partition_point(|k| k.frame < frame);
        if self.keys.get(idx).is_some_and(|k| k.frame == frame) {
            self.keys.remove(idx);
            true
        } else {
            false
        }
    }

    /// Sorted keyframes.
    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    /// Default value used while the track has no keys.
    pub fn default_value(&self) -> &TrackValue {
        &self.default
    }

    /// First/last key frames, if any keys exist.
    pub fn frame_range(&self) -> Option<(u64, u64)> {
        match (self.keys.first(), self.keys.last()) {
            (Some(first), Some(last)) => Some((first.frame, last.frame)),
            _ => None,
        }
    }

    /// Sample the track at `frame`.
    ///
    /// Before the first key or after the last, the nearest edge value is
    /// returned unchanged (clamp, not extrapolation). In between, normalized
    /// time is shaped by the *next* key's easing and the bracketing values
    /// are interpolated.
    pub fn value_at(&self, frame: u64) -> MarionetteResult<TrackValue> {
        if self.keys.is_empty() {
            return Ok(self.default.clone());
        }

        let idx = self.keys.partition_point(|k| k.frame <= frame);
        if idx == 0 {
            return Ok(self.keys[0].value.clone());
        }
        if idx >= self.keys.len() {
            return Ok(self.keys[self.keys.len() - 1].value.clone());
        }

        let a = &self.keys[idx - 1];
        // An exact hit lands on `a`; return its value directly instead of
        // interpolating at t = 0, which would drag the next key's shape
        // (and any of its errors) into a frame that sits on a keyframe.
        if a.frame == frame {
            return Ok(a.value.clone());
        }
        let b = &self.keys[idx];
        // Frames are unique and sorted, so a.frame < frame < b.frame here.
        let t = ((frame - a.frame) as f64) / ((b.frame - a.frame) as f64);
        let te = b.easing.apply(t);
        TrackValue::interpolate(&a.value, &b.value, te)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/track.rs"]
mod tests;
