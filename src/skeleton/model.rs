use std::collections::HashMap;

use crate::{
    foundation::core::{Point, Vec2},
    foundation::error::{MarionetteError, MarionetteResult},
    skeleton::bone::{Bone, BoneConstraint, BoneId},
};

/// Hierarchical 2D bone rig with forward kinematics and named IK chains.
///
/// The skeleton exclusively owns its bones in an index table; see
/// [`BoneId`] for the ownership contract. World transforms are derived
/// state: they are recomputed from scratch by [`Skeleton::update`] and must
/// not be read across a mutation of local angles or the skeleton transform
/// without an intervening update.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Skeleton {
    pub(crate) bones: Vec<Bone>,
    by_name: HashMap<String, BoneId>,
    roots: Vec<BoneId>,
    chains: HashMap<String, Vec<BoneId>>,
    /// World position of the rig origin; roots start here.
    pub position: Point,
    /// World rotation applied to every root (radians).
    pub rotation: f64,
    /// Uniform scale applied to bone lengths.
    pub scale: f64,
}

impl Skeleton {
    /// New empty skeleton at the origin with unit scale.
    pub fn new() -> Self {
        Self {
            bones: Vec::new(),
            by_name: HashMap::new(),
            roots: Vec::new(),
            chains: HashMap::new(),
            position: Point::ORIGIN,
            rotation: 0.0,
            scale: 1.0,
        }
    }

    /// Number of bones.
    pub fn len(&self) -> usize {
        self.bones.len()
    }

    /// Whether the skeleton has no bones.
    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    /// Add a bone. `parent: None` makes it a root.
    ///
    /// Fails if `name` is already taken or `parent` is unknown.
    pub fn add_bone(
        &mut self,
        name: impl Into<String>,
        length: f64,
        local_angle: f64,
        parent: Option<BoneId>,
        constraint: Option<BoneConstraint>,
    ) -> MarionetteResult<BoneId> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(MarionetteError::skeleton(format!(
                "bone name '{name}' already exists"
            )));
        }
        if let Some(p) = parent {
            if p.0 >= self.bones.len() {
                return Err(MarionetteError::skeleton(format!(
                    "parent id {} for bone '{name}' is out of range",
                    p.0
                )));
            }
        }

        let id = BoneId(self.bones.len());
        let mut bone = Bone::new(name.clone(), length, local_angle, parent);
        bone.constraint = constraint;
        self.bones.push(bone);
        self.by_name.insert(name, id);
        match parent {
            Some(p) => self.bones[p.0].children.push(id),
            None => self.roots.push(id),
        }
        Ok(id)
    }

    /// Resolve a bone name to its id.
    pub fn bone_id(&self, name: &str) -> Option<BoneId> {
        self.by_name.get(name).copied()
    }

    /// Borrow a bone by id.
    pub fn bone(&self, id: BoneId) -> Option<&Bone> {
        self.bones.get(id.0)
    }

    /// Mutably borrow a bone by id.
    pub fn bone_mut(&mut self, id: BoneId) -> Option<&mut Bone> {
        self.bones.get_mut(id.0)
    }

    /// Borrow a bone by name.
    pub fn bone_by_name(&self, name: &str) -> Option<&Bone> {
        self.bone_id(name).and_then(|id| self.bone(id))
    }

    /// Root bone ids (bones with no parent).
    pub fn roots(&self) -> &[BoneId] {
        &self.roots
    }

    /// Iterate all bones with their ids, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (BoneId, &Bone)> {
        self.bones.iter().enumerate().map(|(i, b)| (BoneId(i), b))
    }

    /// Set a bone's local angle.
    ///
    /// With `apply_constraints` and a constraint present, the angle is
    /// wrapped into `(-PI, PI]` and clamped into the constraint range;
    /// otherwise it is stored raw.
    pub fn set_angle(&mut self, id: BoneId, angle: f64, apply_constraints: bool) {
        let Some(bone) = self.bones.get_mut(id.0) else {
            return;
        };
        bone.local_angle = match (&bone.constraint, apply_constraints) {
            (Some(c), true) => c.clamp(angle),
            _ => angle,
        };
    }

    /// Recompute every bone's world transform, depth-first from each root.
    ///
    /// Children are processed strictly after their parents. Roots start at
    /// the skeleton `position`/`rotation`; every bone's end is
    /// `start + from_angle(world_angle) * length * scale`.
    #[tracing::instrument(skip(self), fields(bones = self.bones.len()))]
    pub fn update(&mut self) {
        let mut stack: Vec<BoneId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let (start, base_angle) = match self.bones[id.0].parent {
                Some(p) => (self.bones[p.0].world_end, self.bones[p.0].world_angle),
                None => (self.position, self.rotation),
            };
            let bone = &mut self.bones[id.0];
            bone.world_start = start;
            bone.world_angle = base_angle + bone.local_angle;
            bone.world_end =
                start + Vec2::from_angle(bone.world_angle) * (bone.length * self.scale);
            stack.extend(bone.children.iter().rev().copied());
        }
    }

    /// Register a named IK chain over `bone_names`, root first.
    ///
    /// Every name must exist and each non-first bone must be the direct
    /// child of the bone before it. Violations are reported here, naming
    /// the offending bone; solves never re-validate.
    pub fn create_ik_chain(
        &mut self,
        name: impl Into<String>,
        bone_names: &[&str],
    ) -> MarionetteResult<()> {
        let name = name.into();
        if bone_names.is_empty() {
            return Err(MarionetteError::skeleton(format!(
                "ik chain '{name}' must contain at least one bone"
            )));
        }
        let mut ids = Vec::with_capacity(bone_names.len());
        for bone_name in bone_names {
            let id = self.bone_id(bone_name).ok_or_else(|| {
                MarionetteError::skeleton(format!(
                    "ik chain '{name}' references unknown bone '{bone_name}'"
                ))
            })?;
            if let Some(&prev) = ids.last() {
                if self.bones[id.0].parent != Some(prev) {
                    return Err(MarionetteError::skeleton(format!(
                        "ik chain '{name}': bone '{bone_name}' is not a direct child of '{}'",
                        self.bones[prev.0].name
                    )));
                }
            }
            ids.push(id);
        }
        self.chains.insert(name, ids);
        Ok(())
    }

    /// Bone ids of a registered chain.
    pub fn ik_chain(&self, name: &str) -> Option<&[BoneId]> {
        self.chains.get(name).map(Vec::as_slice)
    }

    /// Registered chain names.
    pub fn ik_chain_names(&self) -> impl Iterator<Item = &str> {
        self.chains.keys().map(String::as_str)
    }

    /// Serialize structure and metadata to a generic record tree.
    ///
    /// The record covers per-bone name, length, angle, constraint bounds,
    /// visibility/color/sprite metadata and the recursive child tree, plus
    /// the IK-chain map and the skeleton transform. World caches are
    /// derived state and deliberately excluded.
    pub fn to_record(&self) -> serde_json::Value {
        let bones: Vec<serde_json::Value> =
            self.roots.iter().map(|&id| self.bone_record(id)).collect();
        let chains: serde_json::Map<String, serde_json::Value> = self
            .chains
            .iter()
            .map(|(name, ids)| {
                let names: Vec<&str> = ids.iter().map(|id| self.bones[id.0].name.as_str()).collect();
                (name.clone(), serde_json::json!(names))
            })
            .collect();
        serde_json::json!({
            "position": [self.position.x, self.position.y],
            "rotation": self.rotation,
            "scale": self.scale,
            "bones": bones,
            "chains": chains,
        })
    }

    fn bone_record(&self, id: BoneId) -> serde_json::Value {
        let bone = &self.bones[id.0];
        let children: Vec<serde_json::Value> = bone
            .children
            .iter()
            .map(|&child| self.bone_record(child))
            .collect();
        let mut obj = serde_json::Map::new();
        obj.insert("name".into(), serde_json::json!(bone.name));
        obj.insert("length".into(), serde_json::json!(bone.length));
        obj.insert("angle".into(), serde_json::json!(bone.local_angle));
        obj.insert("visible".into(), serde_json::json!(bone.visible));
        obj.insert("children".into(), serde_json::json!(children));
        if let Some(c) = &bone.constraint {
            obj.insert(
                "constraint".into(),
                serde_json::json!({
                    "min": c.min_angle,
                    "max": c.max_angle,
                    "stiffness": c.stiffness,
                }),
            );
        }
        if let Some(color) = &bone.color {
            obj.insert("color".into(), serde_json::json!(color));
        }
        if let Some(sprite) = &bone.sprite {
            obj.insert("sprite".into(), serde_json::json!(sprite));
        }
        serde_json::Value::Object(obj)
    }

    /// Rebuild a skeleton from a record produced by [`Skeleton::to_record`].
    pub fn from_record(record: &serde_json::Value) -> MarionetteResult<Self> {
        let mut skeleton = Self::new();
        if let Some(pos) = record.get("position").and_then(|v| v.as_array()) {
            if pos.len() != 2 {
                return Err(MarionetteError::serde(
                    "skeleton record 'position' must have two elements",
                ));
            }
            let (x, y) = match (pos[0].as_f64(), pos[1].as_f64()) {
                (Some(x), Some(y)) => (x, y),
                _ => {
                    return Err(MarionetteError::serde(
                        "skeleton record 'position' elements must be numbers",
                    ));
                }
            };
            skeleton.position = Point::new(x, y);
        }
        skeleton.rotation = record.get("rotation").and_then(|v| v.as_f64()).unwrap_or(0.0);
        skeleton.scale = record.get("scale").and_then(|v| v.as_f64()).unwrap_or(1.0);

        let bones = record
            .get("bones")
            .and_then(|v| v.as_array())
            .ok_or_else(|| MarionetteError::serde("skeleton record is missing 'bones' list"))?;
        for bone in bones {
            skeleton.bone_from_record(bone, None)?;
        }

        if let Some(chains) = record.get("chains").and_then(|v| v.as_object()) {
            for (name, list) in chains {
                let list = list.as_array().ok_or_else(|| {
                    MarionetteError::serde(format!("chain '{name}' record must be a list"))
                })?;
                let names: Vec<&str> = list.iter().filter_map(|v| v.as_str()).collect();
                if names.len() != list.len() {
                    return Err(MarionetteError::serde(format!(
                        "chain '{name}' record contains a non-string bone name"
                    )));
                }
                skeleton.create_ik_chain(name.clone(), &names)?;
            }
        }
        Ok(skeleton)
    }

    fn bone_from_record(
        &mut self,
        record: &serde_json::Value,
        parent: Option<BoneId>,
    ) -> MarionetteResult<()> {
        let name = record
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| MarionetteError::serde("bone record is missing 'name'"))?;
        let length = record
            .get("length")
            .and_then(|v| v.as_f64())
            .ok_or_else(|| {
                MarionetteError::serde(format!("bone record '{name}' is missing 'length'"))
            })?;
        let angle = record
            .get("angle")
            .and_then(|v| v.as_f64())
            .ok_or_else(|| {
                MarionetteError::serde(format!("bone record '{name}' is missing 'angle'"))
            })?;
        let constraint = record.get("constraint").and_then(|v| v.as_object()).map(|c| {
            BoneConstraint::new(
                c.get("min").and_then(|v| v.as_f64()).unwrap_or(0.0),
                c.get("max").and_then(|v| v.as_f64()).unwrap_or(0.0),
                c.get("stiffness").and_then(|v| v.as_f64()).unwrap_or(0.0),
            )
        });

        let id = self.add_bone(name, length, angle, parent, constraint)?;
        let bone = &mut self.bones[id.0];
        bone.visible = record.get("visible").and_then(|v| v.as_bool()).unwrap_or(true);
        bone.color = record
            .get("color")
            .and_then(|v| v.as_str())
            .map(str::to_owned);
        bone.sprite = record
            .get("sprite")
            .and_then(|v| v.as_str())
            .map(str::to_owned);

        if let Some(children) = record.get("children").and_then(|v| v.as_array()) {
            for child in children {
                self.bone_from_record(child, Some(id))?;
            }
        }
        Ok(())
    }
}

impl Default for Skeleton {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/skeleton/model.rs"]
mod tests;
