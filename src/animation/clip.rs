use log::debug;
use uuid::Uuid;

use crate::animation::keyframe::Keyframe;
use crate::errors::{Result, RigError};
use crate::rig::Skeleton;

/// Default duration of a freshly created clip, in seconds.
pub const DEFAULT_CLIP_DURATION: f32 = 5.0;

/// A named, ordered-by-time sequence of keyframes — the unit of playback.
///
/// # Invariants
///
/// - `keyframes` is always sorted by non-decreasing timestamp
/// - `duration >= ` every keyframe timestamp
/// - every keyframe pose shares the same joint-id topology, which is
///   what lets interpolation match joints across snapshots
#[derive(Debug, Clone)]
pub struct Clip {
    pub id: Uuid,
    pub name: String,
    /// Seconds; raised automatically when a keyframe lands past it.
    pub duration: f32,
    keyframes: Vec<Keyframe>,
}

impl Clip {
    /// Creates an empty clip with the default duration.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            duration: DEFAULT_CLIP_DURATION,
            keyframes: Vec::new(),
        }
    }

    /// Rebuilds a clip from already-ordered parts (deserialization).
    ///
    /// Keyframes are re-sorted defensively and the duration is raised to
    /// cover the last timestamp.
    #[must_use]
    pub fn from_parts(
        id: Uuid,
        name: impl Into<String>,
        duration: f32,
        mut keyframes: Vec<Keyframe>,
    ) -> Self {
        keyframes.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));
        let last = keyframes.last().map_or(0.0, |kf| kf.timestamp);
        Self {
            id,
            name: name.into(),
            duration: duration.max(last),
            keyframes,
        }
    }

    #[inline]
    #[must_use]
    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    /// Clones `pose` into a new keyframe at `timestamp`, keeping the
    /// sequence sorted and raising the duration if needed.
    ///
    /// Duplicate timestamps are rejected rather than left with an
    /// undefined tie-break order.
    pub fn commit_keyframe(&mut self, timestamp: f32, pose: &Skeleton) -> Result<Uuid> {
        if self
            .keyframes
            .iter()
            .any(|kf| kf.timestamp == timestamp)
        {
            return Err(RigError::DuplicateKeyframe { timestamp });
        }

        let keyframe = Keyframe::capture(timestamp, pose);
        let id = keyframe.id;
        let index = self
            .keyframes
            .partition_point(|kf| kf.timestamp <= timestamp);
        self.keyframes.insert(index, keyframe);
        self.duration = self.duration.max(timestamp);
        debug!(
            "clip '{}': keyframe at {timestamp}s ({} total, duration {}s)",
            self.name,
            self.keyframes.len(),
            self.duration
        );
        Ok(id)
    }

    /// Removes a keyframe by id. Returns whether one was removed.
    pub fn remove_keyframe(&mut self, id: Uuid) -> bool {
        let before = self.keyframes.len();
        self.keyframes.retain(|kf| kf.id != id);
        self.keyframes.len() != before
    }

    /// Locates the keyframe pair bracketing `time`:
    /// `prev.timestamp <= time <= next.timestamp`.
    ///
    /// Times outside the keyframe range fall back to the
    /// `(first, last)` pair; a single keyframe brackets itself (static
    /// pose); an empty clip returns `None` and playback is a no-op.
    #[must_use]
    pub fn bracket(&self, time: f32) -> Option<(&Keyframe, &Keyframe)> {
        let first = self.keyframes.first()?;
        let last = self.keyframes.last()?;

        self.keyframes
            .windows(2)
            .map(|pair| (&pair[0], &pair[1]))
            .find(|(prev, next)| prev.timestamp <= time && time <= next.timestamp)
            .or(Some((first, last)))
    }

    /// Interpolation fraction within a bracketing pair, guarded to 0 for
    /// coincident timestamps and clamped to [0, 1].
    #[must_use]
    pub fn alpha(prev: &Keyframe, next: &Keyframe, time: f32) -> f32 {
        let span = next.timestamp - prev.timestamp;
        if span <= 0.0 {
            return 0.0;
        }
        ((time - prev.timestamp) / span).clamp(0.0, 1.0)
    }
}
