//! Fixed rig topology and joint role classification.
//!
//! The editor manipulates one reused humanoid topology:
//!
//! ```text
//! hip ─┬─ torso ── neck ─┬─ head
//!      │                 ├─ leftElbow ── leftHand
//!      │                 └─ rightElbow ── rightHand
//!      ├─ leftKnee ── leftFoot
//!      └─ rightKnee ── rightFoot
//! ```
//!
//! Joint roles are a closed enumeration over this table rather than
//! string matching on display names, so an unknown joint is an explicit
//! [`JointRole::Free`] fallback instead of a silent comparison miss.

use glam::Vec3;

use crate::rig::node::NodeId;

/// The named joints of the canonical stickman rig, in pre-order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Joint {
    Hip,
    Torso,
    Neck,
    Head,
    LeftElbow,
    LeftHand,
    RightElbow,
    RightHand,
    LeftKnee,
    LeftFoot,
    RightKnee,
    RightFoot,
}

/// How a drag on a joint is translated into a pose update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JointRole {
    /// Translates the entire hierarchy rigidly.
    Root,
    /// Constrained single-bone swing: the joint moves on the sphere of
    /// its current distance to `anchor`, descendants follow rigidly.
    Swing {
        /// The joint the bone length is preserved against. Not always
        /// the tree parent: the neck swings relative to the hip.
        anchor: Joint,
    },
    /// Two-bone IK end effector, solved against its two proximal
    /// ancestors with a fixed per-family bend axis.
    Effector {
        /// Chain root (hip for legs, neck for arms).
        root: Joint,
        /// Intermediate joint (knee / elbow).
        mid: Joint,
        /// Bend-plane normal. Fixed per joint family: the solve always
        /// resolves to the same elbow-forward / knee-backward side,
        /// ignoring the limb's current orientation.
        bend_axis: Vec3,
    },
    /// Rigid translation of the joint and its descendants, unconstrained.
    Free,
}

/// Bend axis shared by both elbows: arms fold with the elbow vertex
/// swinging toward +Z.
const ELBOW_BEND_AXIS: Vec3 = Vec3::NEG_X;
/// Bend axis shared by both knees: legs fold with the knee vertex
/// swinging toward -Z.
const KNEE_BEND_AXIS: Vec3 = Vec3::X;

impl Joint {
    /// Every joint of the rig, in deterministic pre-order.
    pub const ALL: [Joint; 12] = [
        Joint::Hip,
        Joint::Torso,
        Joint::Neck,
        Joint::Head,
        Joint::LeftElbow,
        Joint::LeftHand,
        Joint::RightElbow,
        Joint::RightHand,
        Joint::LeftKnee,
        Joint::LeftFoot,
        Joint::RightKnee,
        Joint::RightFoot,
    ];

    /// Canonical stable id of this joint.
    #[inline]
    #[must_use]
    pub fn id(self) -> NodeId {
        NodeId(self as u32)
    }

    /// Joint carrying this canonical id, if any.
    #[must_use]
    pub fn from_id(id: NodeId) -> Option<Joint> {
        Joint::ALL.get(id.0 as usize).copied()
    }

    /// Display name, doubling as the role tag drag classification reads.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Joint::Hip => "hip",
            Joint::Torso => "torso",
            Joint::Neck => "neck",
            Joint::Head => "head",
            Joint::LeftElbow => "leftElbow",
            Joint::LeftHand => "leftHand",
            Joint::RightElbow => "rightElbow",
            Joint::RightHand => "rightHand",
            Joint::LeftKnee => "leftKnee",
            Joint::LeftFoot => "leftFoot",
            Joint::RightKnee => "rightKnee",
            Joint::RightFoot => "rightFoot",
        }
    }

    /// Inverse of [`Joint::name`].
    #[must_use]
    pub fn from_name(name: &str) -> Option<Joint> {
        Joint::ALL.into_iter().find(|j| j.name() == name)
    }

    /// Children in the fixed topology, in stable order.
    #[must_use]
    pub fn children(self) -> &'static [Joint] {
        match self {
            Joint::Hip => &[Joint::Torso, Joint::LeftKnee, Joint::RightKnee],
            Joint::Torso => &[Joint::Neck],
            Joint::Neck => &[Joint::Head, Joint::LeftElbow, Joint::RightElbow],
            Joint::LeftElbow => &[Joint::LeftHand],
            Joint::RightElbow => &[Joint::RightHand],
            Joint::LeftKnee => &[Joint::LeftFoot],
            Joint::RightKnee => &[Joint::RightFoot],
            Joint::Head
            | Joint::LeftHand
            | Joint::RightHand
            | Joint::LeftFoot
            | Joint::RightFoot => &[],
        }
    }

    /// Rest-pose position, Y up, feet resting at the stroke radius.
    #[must_use]
    pub fn rest_position(self) -> Vec3 {
        match self {
            Joint::Hip => Vec3::new(0.0, 0.90, 0.0),
            Joint::Torso => Vec3::new(0.0, 1.15, 0.0),
            Joint::Neck => Vec3::new(0.0, 1.40, 0.0),
            Joint::Head => Vec3::new(0.0, 1.62, 0.0),
            Joint::LeftElbow => Vec3::new(-0.28, 1.15, 0.0),
            Joint::LeftHand => Vec3::new(-0.36, 0.88, 0.0),
            Joint::RightElbow => Vec3::new(0.28, 1.15, 0.0),
            Joint::RightHand => Vec3::new(0.36, 0.88, 0.0),
            Joint::LeftKnee => Vec3::new(-0.12, 0.48, 0.0),
            Joint::LeftFoot => Vec3::new(-0.16, 0.05, 0.0),
            Joint::RightKnee => Vec3::new(0.12, 0.48, 0.0),
            Joint::RightFoot => Vec3::new(0.16, 0.05, 0.0),
        }
    }

    /// Drag behavior for this joint.
    #[must_use]
    pub fn role(self) -> JointRole {
        match self {
            Joint::Hip => JointRole::Root,
            Joint::Neck => JointRole::Swing { anchor: Joint::Hip },
            Joint::LeftElbow | Joint::RightElbow => JointRole::Swing {
                anchor: Joint::Neck,
            },
            Joint::LeftKnee | Joint::RightKnee => JointRole::Swing { anchor: Joint::Hip },
            Joint::LeftHand => JointRole::Effector {
                root: Joint::Neck,
                mid: Joint::LeftElbow,
                bend_axis: ELBOW_BEND_AXIS,
            },
            Joint::RightHand => JointRole::Effector {
                root: Joint::Neck,
                mid: Joint::RightElbow,
                bend_axis: ELBOW_BEND_AXIS,
            },
            Joint::LeftFoot => JointRole::Effector {
                root: Joint::Hip,
                mid: Joint::LeftKnee,
                bend_axis: KNEE_BEND_AXIS,
            },
            Joint::RightFoot => JointRole::Effector {
                root: Joint::Hip,
                mid: Joint::RightKnee,
                bend_axis: KNEE_BEND_AXIS,
            },
            Joint::Torso | Joint::Head => JointRole::Free,
        }
    }
}
