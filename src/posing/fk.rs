use glam::Vec3;
use log::trace;

use crate::posing::GEOM_EPSILON;
use crate::rig::roles::Joint;
use crate::rig::{NodeId, Skeleton};

/// Constrained single-bone swing.
///
/// The unconstrained target is projected back onto the sphere of radius
/// |joint - anchor| centered at the anchor, preserving the pre-drag bone
/// length while allowing swing in any direction; the corrected delta is
/// then applied rigidly to the joint and its descendants.
pub(crate) fn swing(rig: &mut Skeleton, id: NodeId, anchor: Joint, delta: Vec3) -> bool {
    let Some(anchor_pos) = rig.find_joint(anchor).map(|n| n.position) else {
        trace!("swing ignored: anchor {} missing", anchor.name());
        return false;
    };
    let Some(start) = rig.find_node(id).map(|n| n.position) else {
        return false;
    };

    let bone_len = (start - anchor_pos).length();
    let dir = start + delta - anchor_pos;

    // Zero-length bone or a target coincident with the anchor: there is
    // no direction to normalize, so the constraint is skipped and the
    // drag falls back to a rigid translation.
    let corrected = if bone_len <= GEOM_EPSILON || dir.length() <= GEOM_EPSILON {
        delta
    } else {
        anchor_pos + dir.normalize() * bone_len - start
    };

    rig.translate_subtree(id, corrected)
}
