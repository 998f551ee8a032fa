//! Joint tree data model: nodes, the skeleton, and the fixed rig
//! topology with its joint roles.

pub mod node;
pub mod roles;
pub mod skeleton;

pub use node::{Node, NodeId};
pub use roles::{Joint, JointRole};
pub use skeleton::{DEFAULT_HEAD_RADIUS, DEFAULT_STROKE_WIDTH, Skeleton};
