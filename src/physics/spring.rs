use crate::foundation::core::Vec2;

// Non-positive mass would blow up the integration; fall back to unit mass.
const MIN_MASS: f64 = 1e-9;

/// Damped harmonic oscillator over a scalar value.
///
/// Integrated semi-implicitly each [`Spring::update`]:
/// `accel = (stiffness * (target - pos) - damping * vel) / mass`, then
/// velocity and position in turn. A spring at rest on its target stays
/// exactly at rest.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct Spring {
    position: f64,
    velocity: f64,
    target: f64,
    /// Restoring force per unit displacement.
    pub stiffness: f64,
    /// Velocity damping coefficient.
    pub damping: f64,
    /// Oscillating mass; values <= 0 are treated as 1.
    pub mass: f64,
}

impl Spring {
    /// Unit-mass spring resting at `initial`.
    pub fn new(stiffness: f64, damping: f64, initial: f64) -> Self {
        Self::with_mass(stiffness, damping, 1.0, initial)
    }

    /// Spring with explicit mass, resting at `initial`.
    pub fn with_mass(stiffness: f64, damping: f64, mass: f64, initial: f64) -> Self {
        Self {
            position: initial,
            velocity: 0.0,
            target: initial,
            stiffness,
            damping,
            mass,
        }
    }

    /// Current position.
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Current velocity.
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Current target.
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Retarget without touching position or velocity.
    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    /// Add to velocity directly (impact reactions).
    pub fn nudge(&mut self, impulse: f64) {
        self.velocity += impulse;
    }

    /// Snap to `value`: position = target = value, velocity zeroed.
    pub fn reset(&mut self, value: f64) {
        self.position = value;
        self.target = value;
        self.velocity = 0.0;
    }

    /// Advance by `dt` seconds and return the new position.
    pub fn update(&mut self, dt: f64) -> f64 {
        let mass = if self.mass > MIN_MASS { self.mass } else { 1.0 };
        let accel =
            (self.stiffness * (self.target - self.position) - self.damping * self.velocity) / mass;
        self.velocity += accel * dt;
        self.position += self.velocity * dt;
        self.position
    }
}

/// Two independent axis springs driven as one 2D value.
///
/// The axes are deliberately uncoupled; diagonal motion settles exactly like
/// its components.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct Spring2D {
    /// Horizontal axis.
    pub x: Spring,
    /// Vertical axis.
    pub y: Spring,
}

impl Spring2D {
    /// Unit-mass spring pair resting at `initial`.
    pub fn new(stiffness: f64, damping: f64, initial: Vec2) -> Self {
        Self {
            x: Spring::new(stiffness, damping, initial.x),
            y: Spring::new(stiffness, damping, initial.y),
        }
    }

    /// Current position.
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x.position(), self.y.position())
    }

    /// Current velocity.
    pub fn velocity(&self) -> Vec2 {
        Vec2::new(self.x.velocity(), self.y.velocity())
    }

    /// Retarget both axes.
    pub fn set_target(&mut self, target: Vec2) {
        self.x.set_target(target.x);
        self.y.set_target(target.y);
    }

    /// Add a velocity impulse.
    pub fn nudge(&mut self, impulse: Vec2) {
        self.x.nudge(impulse.x);
        self.y.nudge(impulse.y);
    }

    /// Snap both axes to `value`.
    pub fn reset(&mut self, value: Vec2) {
        self.x.reset(value.x);
        self.y.reset(value.y);
    }

    /// Advance by `dt` seconds and return the new position.
    pub fn update(&mut self, dt: f64) -> Vec2 {
        Vec2::new(self.x.update(dt), self.y.update(dt))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/physics/spring.rs"]
mod tests;
