use glam::{Quat, Vec3};
use log::trace;

use crate::posing::GEOM_EPSILON;
use crate::rig::roles::Joint;
use crate::rig::{NodeId, Skeleton};

/// Two-bone inverse kinematics, the classic law-of-cosines solve.
///
/// Bone lengths are re-derived from the current pose each solve, so the
/// chain also tolerates length drift introduced by direct keyframe
/// authoring. Targets beyond the chain's reach are clamped to the reach
/// sphere (direction preserved), fully extending the limb instead of
/// erroring. The mid joint is placed by rotating the root→target axis
/// about the fixed per-family bend axis; the current limb orientation is
/// deliberately ignored, so the chain always bends to the same side.
pub(crate) fn solve(
    rig: &mut Skeleton,
    root: Joint,
    mid: Joint,
    effector: NodeId,
    delta: Vec3,
    bend_axis: Vec3,
) -> bool {
    let Some(root_pos) = rig.find_joint(root).map(|n| n.position) else {
        trace!("ik ignored: chain root {} missing", root.name());
        return false;
    };
    let Some((mid_id, mid_pos)) = rig.find_joint(mid).map(|n| (n.id, n.position)) else {
        trace!("ik ignored: chain mid {} missing", mid.name());
        return false;
    };
    let Some(effector_pos) = rig.find_node(effector).map(|n| n.position) else {
        return false;
    };

    let len1 = (mid_pos - root_pos).length();
    let len2 = (effector_pos - mid_pos).length();
    let reach = len1 + len2;
    if reach <= GEOM_EPSILON {
        return false;
    }

    let mut to_target = effector_pos + delta - root_pos;
    let dist = to_target.length();
    if dist <= GEOM_EPSILON {
        // Target collapsed onto the chain root; direction is undefined.
        return false;
    }

    // Clamp unreachable targets to the reach sphere, direction preserved.
    let d = if dist > reach {
        to_target *= reach / dist;
        reach
    } else {
        dist
    };
    let target = root_pos + to_target;
    let axis_dir = to_target / d;

    // Interior angle at the chain root. The clamp guards against cosines
    // drifting outside [-1, 1] when the triangle degenerates (target at
    // exactly full reach, or collapsed onto the root).
    let denom = 2.0 * len1 * d;
    let new_mid = if denom <= GEOM_EPSILON {
        root_pos + axis_dir * len1
    } else {
        let cos_alpha = ((len1 * len1 + d * d - len2 * len2) / denom).clamp(-1.0, 1.0);
        let swing = Quat::from_axis_angle(bend_axis, cos_alpha.acos());
        root_pos + swing * axis_dir * len1
    };

    // Carry the mid joint's subtree along, then pin the effector (and
    // anything below it) exactly on the clamped target.
    rig.translate_subtree(mid_id, new_mid - mid_pos);
    let carried = effector_pos + (new_mid - mid_pos);
    rig.translate_subtree(effector, target - carried);
    true
}
