use crate::{
    foundation::core::Vec2,
    foundation::math::{noise01, noise_signed},
};

/// Waveform family of a camera shake.
///
/// Closed set matched exhaustively; adding a family is a compile-time
/// exercise rather than a silently ignored string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ShakeKind {
    /// Sharp hit: bi-axial sine under quadratic decay.
    Impact,
    /// Blast: slower decay, larger amplitude, adds roll.
    Explosion,
    /// Documentary wobble: continuous layered sines, no decay inside the
    /// window.
    Handheld,
    /// Ground rumble: slow decay with a vertical bias.
    Earthquake,
    /// Buzz: uniform seeded jitter, no roll.
    Vibration,
}

/// One active shake on a camera.
///
/// A value type: [`ShakeInstance::sample`] is a pure function of elapsed
/// time, with all per-instance randomness derived from the stored seed.
/// The camera owns the lifecycle (pending until the first update, expired
/// once elapsed time passes `duration`).
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct ShakeInstance {
    /// Waveform family.
    pub kind: ShakeKind,
    /// Peak offset amplitude, world units.
    pub intensity: f64,
    /// Lifetime, seconds.
    pub duration: f64,
    /// Base oscillation frequency, Hz.
    pub frequency: f64,
    /// Per-instance seed captured at construction.
    pub seed: u64,
    pub(crate) elapsed: f64,
}

impl ShakeInstance {
    /// New shake; `elapsed` starts at zero and is advanced by the owning
    /// camera.
    pub fn new(kind: ShakeKind, intensity: f64, duration: f64, frequency: f64, seed: u64) -> Self {
        Self {
            kind,
            intensity,
            duration,
            frequency,
            seed,
            elapsed: 0.0,
        }
    }

    /// Whether `elapsed` has passed `duration`.
    pub fn expired(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Sample `(offset, roll)` at `t` seconds after the shake started.
    ///
    /// Exactly `(Vec2::ZERO, 0.0)` outside `[0, duration)`.
    pub fn sample(&self, t: f64) -> (Vec2, f64) {
        if t < 0.0 || t >= self.duration || self.duration <= 0.0 {
            return (Vec2::ZERO, 0.0);
        }
        let progress = t / self.duration;
        let tau = std::f64::consts::TAU;
        // Stable per-instance phases, derived once from the seed.
        let phase_x = noise01(self.seed, 0) * tau;
        let phase_y = noise01(self.seed, 1) * tau;
        let phase_r = noise01(self.seed, 2) * tau;

        match self.kind {
            ShakeKind::Impact => {
                let decay = (1.0 - progress) * (1.0 - progress);
                let offset = Vec2::new(
                    (tau * self.frequency * t + phase_x).sin(),
                    (tau * self.frequency * 1.3 * t + phase_y).sin(),
                ) * (self.intensity * decay);
                (offset, 0.0)
            }
            ShakeKind::Explosion => {
                let decay = 1.0 - progress;
                let amp = self.intensity * 1.5 * decay;
                let offset = Vec2::new(
                    (tau * self.frequency * t + phase_x).sin(),
                    (tau * self.frequency * 0.9 * t + phase_y).sin(),
                ) * amp;
                let roll = (tau * self.frequency * 0.5 * t + phase_r).sin() * 0.03 * self.intensity
                    * decay;
                (offset, roll)
            }
            ShakeKind::Handheld => {
                // Three detuned octaves per axis; amplitude stays constant
                // for the whole window.
                let amp = self.intensity * 0.3;
                let f = tau * self.frequency;
                let x = (f * t + phase_x).sin() * 0.6
                    + (f * 2.7 * t + phase_x * 1.7).sin() * 0.3
                    + (f * 6.1 * t + phase_x * 2.3).sin() * 0.1;
                let y = (f * 1.1 * t + phase_y).sin() * 0.6
                    + (f * 3.1 * t + phase_y * 1.9).sin() * 0.3
                    + (f * 5.3 * t + phase_y * 2.9).sin() * 0.1;
                let roll = (f * 0.4 * t + phase_r).sin() * 0.004 * self.intensity;
                (Vec2::new(x, y) * amp, roll)
            }
            ShakeKind::Earthquake => {
                let decay = 1.0 - progress * progress;
                let offset = Vec2::new(
                    (tau * self.frequency * 0.6 * t + phase_x).sin() * 0.4,
                    (tau * self.frequency * t + phase_y).sin(),
                ) * (self.intensity * decay);
                let roll =
                    (tau * self.frequency * 0.3 * t + phase_r).sin() * 0.01 * self.intensity * decay;
                (offset, roll)
            }
            ShakeKind::Vibration => {
                // Time-quantized jitter lattice keeps the sample pure in t.
                let cell = (t * self.frequency * 4.0).floor().max(0.0) as u64;
                let offset = Vec2::new(
                    noise_signed(self.seed, cell),
                    noise_signed(self.seed ^ 0x5151_5151, cell),
                ) * self.intensity;
                (offset, 0.0)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/camera/shake.rs"]
mod tests;
