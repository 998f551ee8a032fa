use log::debug;

use crate::animation::blend::blend_into;
use crate::animation::clip::Clip;
use crate::rig::Skeleton;

/// Playback state over a single clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayState {
    /// Time frozen; the pose already loaded stays as-is.
    Stopped,
    /// Time advances every simulation step.
    Playing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopMode {
    /// Wrap past the clip duration and keep playing. The default.
    Loop,
    /// Clamp at the clip duration and stop advancing.
    Once,
}

/// Time-advancing playback sampler.
///
/// The player owns nothing but time and state; it is handed a [`Clip`]
/// each step, locates the bracketing keyframe pair, and writes the
/// interpolated pose into the live skeleton in place.
#[derive(Debug, Clone)]
pub struct Player {
    /// Seconds into the clip.
    pub time: f32,
    /// Playback rate multiplier; negative plays in reverse.
    pub time_scale: f32,
    state: PlayState,
    pub loop_mode: LoopMode,
}

impl Player {
    #[must_use]
    pub fn new() -> Self {
        Self {
            time: 0.0,
            time_scale: 1.0,
            state: PlayState::Stopped,
            loop_mode: LoopMode::Loop,
        }
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> PlayState {
        self.state
    }

    #[inline]
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.state == PlayState::Playing
    }

    pub fn play(&mut self) {
        if self.state != PlayState::Playing {
            debug!("playback started at {}s", self.time);
            self.state = PlayState::Playing;
        }
    }

    /// Immediately effective: there is no pending asynchronous work, so
    /// pausing is simply "stop advancing time".
    pub fn pause(&mut self) {
        if self.state != PlayState::Stopped {
            debug!("playback paused at {}s", self.time);
            self.state = PlayState::Stopped;
        }
    }

    pub fn toggle(&mut self) {
        match self.state {
            PlayState::Stopped => self.play(),
            PlayState::Playing => self.pause(),
        }
    }

    /// Pauses and rewinds to the clip start.
    pub fn rewind(&mut self) {
        self.state = PlayState::Stopped;
        self.time = 0.0;
    }

    /// Advances time by `dt` seconds of simulation time, wrapping or
    /// clamping per the loop mode.
    pub fn advance(&mut self, dt: f32, clip: &Clip) {
        if self.state != PlayState::Playing {
            return;
        }

        let duration = clip.duration;
        if duration <= 0.0 {
            self.time = 0.0;
            return;
        }

        self.time += dt * self.time_scale;
        match self.loop_mode {
            LoopMode::Loop => {
                if self.time > duration {
                    self.time %= duration;
                } else if self.time < 0.0 {
                    // Reverse playback wraps from the far end.
                    self.time = duration + (self.time % duration);
                }
            }
            LoopMode::Once => {
                if self.time >= duration {
                    self.time = duration;
                    self.pause();
                } else if self.time < 0.0 {
                    self.time = 0.0;
                    self.pause();
                }
            }
        }
    }

    /// Writes the interpolated pose at the current time into `rig`.
    ///
    /// Returns whether the pose changed; an empty clip is a no-op.
    pub fn sample_into(&self, clip: &Clip, rig: &mut Skeleton) -> bool {
        let Some((prev, next)) = clip.bracket(self.time) else {
            return false;
        };
        let alpha = Clip::alpha(prev, next, self.time);
        blend_into(&prev.pose, &next.pose, alpha, rig);
        true
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}
