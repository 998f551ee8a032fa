//! stickrig — pose editing and keyframe animation core for a humanoid
//! stickman rig.
//!
//! The crate owns the hard core of a stickman animation editor and its
//! embeddable playback runtime:
//!
//! - [`rig`] — the hierarchical joint model: an owned, id-stable node
//!   tree per pose, the fixed rig topology, and joint role
//!   classification
//! - [`posing`] — drag handling: root translation, length-preserving
//!   single-bone swing, and two-bone IK with reach clamping
//! - [`animation`] — timestamped full-pose keyframes, clips, whole-pose
//!   linear interpolation, and the looping playback sampler
//! - [`project`] — the editor aggregate plus the two-generation JSON
//!   project format
//!
//! Rendering, UI, and camera work live outside the crate: the output
//! surface is a [`rig::Skeleton`] whose joint positions a renderer reads
//! every frame. Everything runs on one logical thread inside a
//! cooperative frame loop — no operation blocks, and pausing playback is
//! immediately effective.

pub mod animation;
pub mod errors;
pub mod posing;
pub mod project;
pub mod rig;

pub use animation::{Clip, Keyframe, LoopMode, PlayState, Player, blend, blend_into};
pub use errors::{Result, RigError};
pub use posing::apply_drag;
pub use project::Project;
pub use rig::{Joint, JointRole, Node, NodeId, Skeleton};
