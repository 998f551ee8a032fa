//! Posing engine: translates a requested joint displacement into a
//! physically plausible pose update.
//!
//! A drag is classified by the dragged joint's [`JointRole`]: the hip
//! translates the whole hierarchy, mid-chain joints swing on a
//! length-preserving sphere, end effectors run a two-bone IK solve, and
//! everything else moves rigidly. Bone lengths are only enforced during
//! these solves; direct keyframe authoring is free to change them.
//!
//! All operations mutate the live [`Skeleton`] in place and return
//! whether the pose changed — the rendering layer polls joint positions
//! every frame, so no further invalidation is needed.

mod fk;
mod ik;

use glam::Vec3;
use log::trace;

use crate::rig::{Joint, JointRole, NodeId, Skeleton};

/// Positions and lengths below this are treated as degenerate.
pub(crate) const GEOM_EPSILON: f32 = 1e-6;

/// Applies a requested world-space displacement of one joint.
///
/// Dragging an id not present in the rig is a no-op, not an error; a
/// joint with an unrecognized name translates rigidly with its
/// descendants.
pub fn apply_drag(rig: &mut Skeleton, id: NodeId, delta: Vec3) -> bool {
    let Some(node) = rig.find_node(id) else {
        trace!("drag ignored: no joint {id} in rig");
        return false;
    };

    let role = Joint::from_name(&node.name).map_or(JointRole::Free, Joint::role);
    match role {
        JointRole::Root | JointRole::Free => rig.translate_subtree(id, delta),
        JointRole::Swing { anchor } => fk::swing(rig, id, anchor, delta),
        JointRole::Effector {
            root,
            mid,
            bend_axis,
        } => ik::solve(rig, root, mid, id, delta, bend_axis),
    }
}
