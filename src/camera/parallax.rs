use std::collections::HashMap;

use crate::{
    camera::rig::Camera,
    foundation::core::{Fps, Point, Vec2},
    foundation::error::MarionetteResult,
};

/// A background/foreground layer coupled to camera movement by depth.
///
/// Depth 0 is a fully static backdrop, depth 1 rides exactly with the
/// camera, values above 1 move faster (foreground).
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ParallaxLayer {
    /// Layer name; the keying identity inside a [`ParallaxCamera`].
    pub name: String,
    /// Fractional coupling to camera movement.
    pub depth: f64,
    /// Per-frame offset computed by [`ParallaxCamera::update`].
    pub offset: Vec2,
    /// Whether the renderer should tile the layer image.
    pub tile: bool,
    /// Painter's-order key; lower draws first.
    pub z_order: i32,
}

impl ParallaxLayer {
    /// Untiled layer at `depth` with z-order 0.
    pub fn new(name: impl Into<String>, depth: f64) -> Self {
        Self {
            name: name.into(),
            depth,
            offset: Vec2::ZERO,
            tile: false,
            z_order: 0,
        }
    }
}

/// Camera wrapper maintaining depth-scaled offsets for a set of named
/// layers.
#[derive(Clone, Debug)]
pub struct ParallaxCamera {
    /// The wrapped camera; drive follow/shake/zoom through it.
    pub camera: Camera,
    reference: Point,
    layers: HashMap<String, ParallaxLayer>,
}

impl ParallaxCamera {
    /// Parallax camera whose reference point is the camera's starting
    /// position.
    pub fn new(width: f64, height: f64) -> Self {
        let camera = Camera::new(width, height);
        let reference = camera.position;
        Self {
            camera,
            reference,
            layers: HashMap::new(),
        }
    }

    /// Install or replace a layer under its name.
    pub fn add_layer(&mut self, layer: ParallaxLayer) {
        self.layers.insert(layer.name.clone(), layer);
    }

    /// Look up a layer by name.
    pub fn layer(&self, name: &str) -> Option<&ParallaxLayer> {
        self.layers.get(name)
    }

    /// Layers sorted back to front by z-order.
    pub fn layers_back_to_front(&self) -> Vec<&ParallaxLayer> {
        let mut out: Vec<&ParallaxLayer> = self.layers.values().collect();
        out.sort_by_key(|l| l.z_order);
        out
    }

    /// Re-anchor the reference point layer offsets are measured from.
    pub fn set_reference(&mut self, reference: Point) {
        self.reference = reference;
    }

    /// Advance the wrapped camera, then recompute each layer's offset as
    /// `-(camera - reference) * (1 - depth)`: depth 0 stays put, depth 1
    /// moves exactly with the camera.
    pub fn update(&mut self, frame: u64, fps: Fps) -> MarionetteResult<()> {
        self.camera.update(frame, fps)?;
        let delta = self.camera.position - self.reference;
        for layer in self.layers.values_mut() {
            layer.offset = -delta * (1.0 - layer.depth);
        }
        Ok(())
    }
}

/// Depth-of-field blur mapping handed to the renderer as a pure function.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct DepthOfField {
    /// Depth that renders perfectly sharp.
    pub focal_distance: f64,
    /// Blur growth per unit of depth distance.
    pub aperture: f64,
    /// Blur radius ceiling, pixels.
    pub max_blur: f64,
}

impl DepthOfField {
    /// New mapping focused at `focal_distance`.
    pub fn new(focal_distance: f64, aperture: f64, max_blur: f64) -> Self {
        Self {
            focal_distance,
            aperture,
            max_blur,
        }
    }

    /// Blur radius for a layer at `depth`:
    /// `min(|depth - focal| * aperture * max_blur, max_blur)`.
    pub fn blur_radius(&self, depth: f64) -> f64 {
        ((depth - self.focal_distance).abs() * self.aperture * self.max_blur).min(self.max_blur)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/camera/parallax.rs"]
mod tests;
