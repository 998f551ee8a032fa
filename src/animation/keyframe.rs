use uuid::Uuid;

use crate::rig::Skeleton;

/// A timestamped full-pose snapshot.
///
/// The pose is a deep clone taken at commit time and is never mutated
/// afterwards — mutating it would corrupt animation history, so every
/// path that hands a pose to a keyframe clones first.
#[derive(Debug, Clone)]
pub struct Keyframe {
    pub id: Uuid,
    /// Seconds from clip start, >= 0.
    pub timestamp: f32,
    /// Owned pose snapshot.
    pub pose: Skeleton,
}

impl Keyframe {
    /// Snapshots `pose` at `timestamp`.
    #[must_use]
    pub fn capture(timestamp: f32, pose: &Skeleton) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp,
            pose: pose.clone(),
        }
    }
}
