use crate::foundation::core::{Point, wrap_angle};

/// Index of a bone inside its owning [`Skeleton`](crate::Skeleton)'s bone
/// table.
///
/// Parent/child links are stored as ids, never as owning pointers: the
/// skeleton is the sole owner of every bone and destroys them together, so
/// a `BoneId` must not be used across skeletons.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct BoneId(pub usize);

/// Angular limit on a bone's local angle.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BoneConstraint {
    /// Lower bound, radians.
    pub min_angle: f64,
    /// Upper bound, radians.
    pub max_angle: f64,
    /// Resistance hint in `[0, 1]` consumed by higher-level animation logic.
    pub stiffness: f64,
}

impl BoneConstraint {
    /// New constraint clamping into `[min_angle, max_angle]`.
    pub fn new(min_angle: f64, max_angle: f64, stiffness: f64) -> Self {
        Self {
            min_angle,
            max_angle,
            stiffness,
        }
    }

    /// Wrap `angle` into `(-PI, PI]`, then clamp into the constraint range.
    pub fn clamp(&self, angle: f64) -> f64 {
        wrap_angle(angle).clamp(self.min_angle, self.max_angle)
    }
}

/// One bone in a skeleton's hierarchy.
///
/// The `world_*` fields are derived caches written only by
/// [`Skeleton::update`](crate::Skeleton::update); every read accessor
/// requires at least one update call after the last mutation of local state.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Bone {
    /// Unique name within the owning skeleton.
    pub name: String,
    /// Rest length.
    pub length: f64,
    /// Angle relative to the parent bone (radians).
    pub local_angle: f64,
    /// Parent bone, if any; `None` marks a root.
    pub parent: Option<BoneId>,
    /// Direct children, in insertion order.
    pub children: Vec<BoneId>,
    /// Optional angular limit applied by `set_angle`.
    pub constraint: Option<BoneConstraint>,
    /// Whether a renderer should draw geometry attached to this bone.
    pub visible: bool,
    /// Optional display color tag carried for the renderer.
    pub color: Option<String>,
    /// Optional sprite attachment name carried for the renderer.
    pub sprite: Option<String>,

    pub(crate) world_start: Point,
    pub(crate) world_end: Point,
    pub(crate) world_angle: f64,
}

impl Bone {
    pub(crate) fn new(name: String, length: f64, local_angle: f64, parent: Option<BoneId>) -> Self {
        Self {
            name,
            length,
            local_angle,
            parent,
            children: Vec::new(),
            constraint: None,
            visible: true,
            color: None,
            sprite: None,
            world_start: Point::ORIGIN,
            world_end: Point::ORIGIN,
            world_angle: 0.0,
        }
    }

    /// World-space start joint. Valid only after `Skeleton::update`.
    pub fn world_start(&self) -> Point {
        self.world_start
    }

    /// World-space end joint. Valid only after `Skeleton::update`.
    pub fn world_end(&self) -> Point {
        self.world_end
    }

    /// Accumulated world angle. Valid only after `Skeleton::update`.
    pub fn world_angle(&self) -> f64 {
        self.world_angle
    }
}
