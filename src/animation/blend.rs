//! Whole-pose linear interpolation.
//!
//! Joints are matched across the two snapshots by id; positions lerp
//! component-wise and the two style scalars lerp alongside. A joint
//! present in `prev` but absent from `next` holds its `prev` value —
//! under the shared-topology invariant this should not occur, but
//! degraded data degrades the pose, never the session.

use glam::Vec3;
use rustc_hash::FxHashMap;

use crate::rig::{NodeId, Skeleton};

/// Blends two pose snapshots into `out` in place.
///
/// Mutating `out` by id match (rather than replacing the skeleton)
/// preserves external references to the live object and avoids per-frame
/// allocation of a fresh tree.
pub fn blend_into(prev: &Skeleton, next: &Skeleton, alpha: f32, out: &mut Skeleton) {
    let mut next_positions: FxHashMap<NodeId, Vec3> = FxHashMap::default();
    next.visit(|node| {
        next_positions.insert(node.id, node.position);
    });

    let mut blended: FxHashMap<NodeId, Vec3> = FxHashMap::default();
    prev.visit(|node| {
        let position = next_positions
            .get(&node.id)
            .map_or(node.position, |target| node.position.lerp(*target, alpha));
        blended.insert(node.id, position);
    });

    out.visit_mut(|node| {
        if let Some(position) = blended.get(&node.id) {
            node.position = *position;
        }
    });
    out.head_radius = lerp(prev.head_radius, next.head_radius, alpha);
    out.stroke_width = lerp(prev.stroke_width, next.stroke_width, alpha);
}

/// Convenience: blends two snapshots into a fresh pose.
#[must_use]
pub fn blend(prev: &Skeleton, next: &Skeleton, alpha: f32) -> Skeleton {
    let mut out = prev.clone();
    blend_into(prev, next, alpha, &mut out);
    out
}

#[inline]
fn lerp(start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * t
}
