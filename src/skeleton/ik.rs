use crate::{
    foundation::core::{Point, Vec2, normalize_or_zero},
    foundation::error::{MarionetteError, MarionetteResult},
    skeleton::model::Skeleton,
};

/// Default FABRIK iteration cap.
pub const FABRIK_ITERATIONS: usize = 10;
/// Default FABRIK tip-to-target tolerance, world units.
pub const FABRIK_TOLERANCE: f64 = 0.5;

// Keeps law-of-cosines input strictly inside the acos domain.
const REACH_EPSILON: f64 = 1e-6;

/// Which side the middle joint bends toward when no pole is supplied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum BendDirection {
    /// Bend toward the positive perpendicular of the root->target line.
    #[default]
    Positive,
    /// Bend toward the negative perpendicular.
    Negative,
}

impl BendDirection {
    fn sign(self) -> f64 {
        match self {
            Self::Positive => 1.0,
            Self::Negative => -1.0,
        }
    }
}

/// Output of the analytic two-bone solver.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TwoBoneSolution {
    /// World position of the middle joint (elbow/knee).
    pub mid: Point,
    /// World angle of the first bone.
    pub angle1: f64,
    /// World angle of the second bone.
    pub angle2: f64,
}

/// Analytic two-bone IK via the law of cosines. Stateless; no skeleton
/// required.
///
/// A target at or beyond full reach yields the exactly straight limb along
/// the root->target ray; a target inside `|len1 - len2|` is clamped to the
/// nearest reachable pose. Neither case fails. The bend side comes from
/// `pole` when supplied (which side of the root->target line it falls on),
/// otherwise from `bend`.
pub fn solve_two_bone(
    root: Point,
    target: Point,
    len1: f64,
    len2: f64,
    pole: Option<Point>,
    bend: BendDirection,
) -> TwoBoneSolution {
    let to_target = target - root;
    let raw_dist = to_target.hypot();
    let base_angle = to_target.atan2();

    // At or beyond full reach the limb is exactly straight. Going through
    // acos here instead would amplify the clamp epsilon (the derivative of
    // acos blows up near 1) into a visible off-axis elbow.
    let offset = if raw_dist >= len1 + len2 {
        0.0
    } else {
        // Degenerate limbs (a zero-length bone) collapse the reachable band
        // to a single distance rather than panicking or producing NaN.
        let min_reach = (len1 - len2).abs() + REACH_EPSILON;
        let max_reach = (len1 + len2 - REACH_EPSILON).max(min_reach);
        let dist = raw_dist.clamp(min_reach, max_reach).max(REACH_EPSILON);
        let cos_offset = ((len1 * len1 + dist * dist - len2 * len2)
            / (2.0 * len1 * dist).max(REACH_EPSILON))
        .clamp(-1.0, 1.0);
        cos_offset.acos()
    };

    let bend_sign = match pole {
        Some(pole) => {
            let dir = normalize_or_zero(to_target);
            let perp = Vec2::new(-dir.y, dir.x);
            if perp.dot(pole - root) >= 0.0 { 1.0 } else { -1.0 }
        }
        None => bend.sign(),
    };

    let angle1 = base_angle + offset * bend_sign;
    let mid = root + Vec2::from_angle(angle1) * len1;
    let angle2 = (target - mid).atan2();
    TwoBoneSolution { mid, angle1, angle2 }
}

/// Two-bone solve with the knee-forward default pole: offset from the
/// root->target line toward its positive perpendicular, half the limb reach
/// out.
pub fn solve_leg_ik(root: Point, target: Point, len1: f64, len2: f64) -> TwoBoneSolution {
    let pole = root + limb_pole_offset(root, target, len1, len2, 1.0);
    solve_two_bone(root, target, len1, len2, Some(pole), BendDirection::Positive)
}

/// Two-bone solve with the elbow default pole on the opposite side of the
/// root->target line from [`solve_leg_ik`].
pub fn solve_arm_ik(root: Point, target: Point, len1: f64, len2: f64) -> TwoBoneSolution {
    let pole = root + limb_pole_offset(root, target, len1, len2, -1.0);
    solve_two_bone(root, target, len1, len2, Some(pole), BendDirection::Negative)
}

fn limb_pole_offset(root: Point, target: Point, len1: f64, len2: f64, side: f64) -> Vec2 {
    let dir = normalize_or_zero(target - root);
    let perp = Vec2::new(-dir.y, dir.x);
    perp * (side * 0.5 * (len1 + len2))
}

impl Skeleton {
    /// FABRIK solve of `chain` toward `target` with default iteration cap
    /// and tolerance.
    pub fn solve_ik(&mut self, chain: &str, target: Point) -> MarionetteResult<bool> {
        self.solve_ik_fabrik(chain, target, FABRIK_ITERATIONS, FABRIK_TOLERANCE)
    }

    /// Classic FABRIK over a registered chain.
    ///
    /// Joint positions are seeded from the current world pose, then
    /// backward/forward passes re-impose segment lengths until the tip is
    /// within `tolerance` of `target` or `iterations` run out. A target
    /// beyond the chain's total length skips iteration entirely and lays
    /// every joint along the straight root->target ray (fully extended
    /// pose, reported as success). Solved joint positions are written back
    /// as raw local angles and the skeleton is re-updated.
    ///
    /// Only an unknown chain name fails; solving itself never does.
    #[tracing::instrument(skip(self))]
    pub fn solve_ik_fabrik(
        &mut self,
        chain: &str,
        target: Point,
        iterations: usize,
        tolerance: f64,
    ) -> MarionetteResult<bool> {
        let ids = self
            .ik_chain(chain)
            .ok_or_else(|| MarionetteError::skeleton(format!("unknown ik chain '{chain}'")))?
            .to_vec();

        // Seed joints from the current pose.
        self.update();
        let mut joints: Vec<Point> = Vec::with_capacity(ids.len() + 1);
        joints.push(self.bones[ids[0].0].world_start);
        for &id in &ids {
            joints.push(self.bones[id.0].world_end);
        }
        let lengths: Vec<f64> = ids
            .iter()
            .map(|id| self.bones[id.0].length * self.scale)
            .collect();
        let total: f64 = lengths.iter().sum();
        let anchor = joints[0];
        let n = ids.len();

        let reached = if (target - anchor).hypot() >= total {
            // Unreachable: stretch straight toward the target. This is the
            // documented policy, not a failure.
            let dir = normalize_or_zero(target - anchor);
            for i in 0..n {
                joints[i + 1] = joints[i] + dir * lengths[i];
            }
            true
        } else {
            // A chain lying exactly on the root->target line cannot fold:
            // every pass keeps it collinear. Seed a tiny perpendicular bend
            // on the interior joints; the first backward pass amplifies it
            // into a proper fold.
            let line = normalize_or_zero(target - anchor);
            let perp = Vec2::new(-line.y, line.x);
            let collinear = joints[1..=n].iter().all(|&j| {
                let d = j - anchor;
                (d.x * line.y - d.y * line.x).abs() < 1e-9
            });
            if collinear && perp != Vec2::ZERO {
                for (i, joint) in joints.iter_mut().enumerate().take(n).skip(1) {
                    *joint += perp * (1e-3 * i as f64);
                }
            }

            let mut within = (joints[n] - target).hypot() <= tolerance;
            for _ in 0..iterations {
                if within {
                    break;
                }
                // Backward: pin the tip to the target, walk root-ward.
                joints[n] = target;
                for i in (0..n).rev() {
                    let dir = normalize_or_zero(joints[i] - joints[i + 1]);
                    joints[i] = joints[i + 1] + dir * lengths[i];
                }
                // Forward: re-pin the root, walk tip-ward.
                joints[0] = anchor;
                for i in 0..n {
                    let dir = normalize_or_zero(joints[i + 1] - joints[i]);
                    joints[i + 1] = joints[i] + dir * lengths[i];
                }
                within = (joints[n] - target).hypot() <= tolerance;
            }
            within
        };

        // Convert joint positions back to local angles. Raw assignment:
        // constraints belong to set_angle, not to solver output.
        let mut parent_world_angle = match self.bones[ids[0].0].parent {
            Some(p) => self.bones[p.0].world_angle,
            None => self.rotation,
        };
        for (i, &id) in ids.iter().enumerate() {
            let segment_angle = (joints[i + 1] - joints[i]).atan2();
            self.bones[id.0].local_angle = segment_angle - parent_world_angle;
            parent_world_angle = segment_angle;
        }
        self.update();
        Ok(reached)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/skeleton/ik.rs"]
mod tests;
