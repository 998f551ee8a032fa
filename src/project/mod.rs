//! Project aggregate: the clip collection, the active clip, the
//! live-editing skeleton, and the embedded playback state.
//!
//! The live rig is a decoupled copy used for posing — it is never the
//! same object as any keyframe snapshot (clone-on-commit, clone-on-load),
//! so edits can never alias stored animation history.

pub mod format;

use std::path::Path;

use glam::Vec3;
use log::debug;
use serde_json::Value;
use uuid::Uuid;

use crate::animation::{Clip, Player};
use crate::errors::{Result, RigError};
use crate::posing;
use crate::rig::{NodeId, Skeleton};

pub struct Project {
    clips: Vec<Clip>,
    active: Option<Uuid>,
    /// The live-editing skeleton, exclusively owned by this session.
    pub rig: Skeleton,
    pub player: Player,
    /// Opaque skin metadata, passed through serialization untouched.
    pub skin: Option<Value>,
    /// Opaque polygon metadata, passed through serialization untouched.
    pub polygons: Option<Value>,
}

impl Project {
    /// Fresh project: one empty clip selected, canonical rest pose.
    #[must_use]
    pub fn new() -> Self {
        let clip = Clip::new("Animation 1");
        let active = Some(clip.id);
        Self {
            clips: vec![clip],
            active,
            rig: Skeleton::default_pose(),
            player: Player::new(),
            skin: None,
            polygons: None,
        }
    }

    pub(crate) fn from_loaded(
        clips: Vec<Clip>,
        skin: Option<Value>,
        polygons: Option<Value>,
    ) -> Self {
        let active = clips.first().map(|clip| clip.id);
        let rig = clips
            .first()
            .and_then(|clip| clip.keyframes().first())
            .map_or_else(Skeleton::default_pose, |kf| kf.pose.clone());
        Self {
            clips,
            active,
            rig,
            player: Player::new(),
            skin,
            polygons,
        }
    }

    // ========================================================================
    // Clip management
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    #[must_use]
    pub fn clip(&self, id: Uuid) -> Option<&Clip> {
        self.clips.iter().find(|clip| clip.id == id)
    }

    #[inline]
    #[must_use]
    pub fn active_clip_id(&self) -> Option<Uuid> {
        self.active
    }

    #[must_use]
    pub fn active_clip(&self) -> Option<&Clip> {
        self.active.and_then(|id| self.clip(id))
    }

    /// Creates an empty clip, selects it, and resets the live rig to the
    /// default pose.
    pub fn create_clip(&mut self, name: impl Into<String>) -> Uuid {
        let clip = Clip::new(name);
        let id = clip.id;
        self.clips.push(clip);
        // The new clip has no keyframes; selecting it loads the default pose.
        let _ = self.select_clip(id);
        id
    }

    pub fn rename_clip(&mut self, id: Uuid, name: impl Into<String>) -> Result<()> {
        let clip = self
            .clips
            .iter_mut()
            .find(|clip| clip.id == id)
            .ok_or(RigError::ClipNotFound(id))?;
        clip.name = name.into();
        Ok(())
    }

    /// Switches the active clip: play time resets to 0 and the first
    /// keyframe's pose (or the default pose for an empty clip) is
    /// clone-loaded into the live rig.
    pub fn select_clip(&mut self, id: Uuid) -> Result<()> {
        let clip = self.clip(id).ok_or(RigError::ClipNotFound(id))?;
        self.rig = clip
            .keyframes()
            .first()
            .map_or_else(Skeleton::default_pose, |kf| kf.pose.clone());
        self.active = Some(id);
        self.player.time = 0.0;
        debug!("selected clip {id}");
        Ok(())
    }

    /// Removes a clip; if it was active, selection falls back to the
    /// first remaining clip.
    pub fn remove_clip(&mut self, id: Uuid) -> Result<()> {
        let before = self.clips.len();
        self.clips.retain(|clip| clip.id != id);
        if self.clips.len() == before {
            return Err(RigError::ClipNotFound(id));
        }
        if self.active == Some(id) {
            match self.clips.first().map(|clip| clip.id) {
                Some(next) => self.select_clip(next)?,
                None => self.active = None,
            }
        }
        Ok(())
    }

    // ========================================================================
    // Editing
    // ========================================================================

    /// Drags a joint of the live rig; returns whether the pose changed.
    pub fn drag_joint(&mut self, id: NodeId, delta: Vec3) -> bool {
        posing::apply_drag(&mut self.rig, id, delta)
    }

    /// Commits the live pose into the active clip at the current play
    /// time.
    pub fn commit_keyframe(&mut self) -> Result<Uuid> {
        let time = self.player.time;
        let active = self.active.ok_or(RigError::NoActiveClip)?;
        let rig = &self.rig;
        let clip = self
            .clips
            .iter_mut()
            .find(|clip| clip.id == active)
            .ok_or(RigError::ClipNotFound(active))?;
        clip.commit_keyframe(time, rig)
    }

    /// Embeddable playback surface: flips between playing and stopped.
    pub fn set_playing(&mut self, playing: bool) {
        if playing {
            self.player.play();
        } else {
            self.player.pause();
        }
    }

    /// The per-frame simulation step: advances playback and writes the
    /// interpolated pose into the live rig in place.
    ///
    /// Returns whether the pose changed; the rendering layer polls joint
    /// positions every frame, so no further change signal exists.
    pub fn step(&mut self, dt: f32) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        if !self.player.is_playing() {
            return false;
        }
        let Some(index) = self.clips.iter().position(|clip| clip.id == active) else {
            return false;
        };
        let clip = &self.clips[index];
        self.player.advance(dt, clip);
        let clip = &self.clips[index];
        self.player.sample_into(clip, &mut self.rig)
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Parses either project format generation. Parse-then-commit: a
    /// failure never leaves a partially constructed project behind.
    pub fn from_json(json: &str) -> Result<Self> {
        format::project_from_json(json)
    }

    /// Serializes to the current (`sa3`, version 3) format.
    pub fn to_json(&self) -> Result<String> {
        format::project_to_json(self)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

impl Default for Project {
    fn default() -> Self {
        Self::new()
    }
}
