//! Keyframes, clips, pose interpolation, and the playback state machine.

pub mod blend;
pub mod clip;
pub mod keyframe;
pub mod player;

pub use blend::{blend, blend_into};
pub use clip::{Clip, DEFAULT_CLIP_DURATION};
pub use keyframe::Keyframe;
pub use player::{LoopMode, PlayState, Player};
