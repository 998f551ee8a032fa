//! Persisted project representation, two generations.
//!
//! - Current format: tagged `format: "sa3"`, `version: 3`. Values are
//!   canonical; no correction applied on load. `skin`/`polygons` are
//!   opaque pass-through blobs.
//! - Legacy format: untagged, top-level `keyframes` or `clips`. Values
//!   are at a larger screen-space scale with Y inverted, so loading
//!   scales by [`LEGACY_SCALE`], flips Y, and floor-aligns each pose so
//!   its lowest joint rests at Y = 0.
//!
//! Joint names are not persisted. On load they are reassigned from the
//! canonical rig by id match, falling back to positional (pre-order)
//! pairing; joints that match neither stay unnamed and are treated as
//! unclassified by the posing engine.

use glam::Vec3;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::animation::{Clip, DEFAULT_CLIP_DURATION, Keyframe};
use crate::errors::{Result, RigError};
use crate::project::Project;
use crate::rig::skeleton::{DEFAULT_HEAD_RADIUS, DEFAULT_STROKE_WIDTH};
use crate::rig::{Joint, Node, NodeId, Skeleton};

/// Format tag of the current generation.
pub const FORMAT_TAG: &str = "sa3";
/// Version of the current generation.
pub const FORMAT_VERSION: u32 = 3;
/// Scale applied to legacy positions to reach current conventions.
pub const LEGACY_SCALE: f32 = 0.01;

// ============================================================================
// Current generation ("sa3", version 3)
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectDoc {
    format: String,
    version: u32,
    clips: Vec<ClipDoc>,
    head_radius: f32,
    stroke_width: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    skin: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    polygons: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ClipDoc {
    id: String,
    name: String,
    duration: f32,
    keyframes: Vec<KeyframeDoc>,
}

#[derive(Debug, Serialize, Deserialize)]
struct KeyframeDoc {
    id: String,
    timestamp: f32,
    pose: PoseDoc,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PoseDoc {
    root: NodeDoc,
    head_radius: f32,
    stroke_width: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct NodeDoc {
    id: Option<u32>,
    pos: [f32; 3],
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<NodeDoc>,
}

// ============================================================================
// Legacy generation (untagged)
// ============================================================================

#[derive(Debug, Deserialize)]
struct LegacyDoc {
    #[serde(default)]
    clips: Option<Vec<LegacyClipDoc>>,
    #[serde(default)]
    keyframes: Option<Vec<LegacyKeyframeDoc>>,
}

#[derive(Debug, Deserialize)]
struct LegacyClipDoc {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    duration: Option<f32>,
    #[serde(default)]
    keyframes: Vec<LegacyKeyframeDoc>,
}

#[derive(Debug, Deserialize)]
struct LegacyKeyframeDoc {
    #[serde(default, alias = "time")]
    timestamp: Option<f32>,
    #[serde(default)]
    pose: Option<LegacyPoseDoc>,
    #[serde(default)]
    skeleton: Option<LegacyPoseDoc>,
}

#[derive(Debug, Deserialize)]
struct LegacyPoseDoc {
    root: NodeDoc,
}

// ============================================================================
// Loading
// ============================================================================

/// Parses either format generation, dispatching on the `format` tag.
pub fn project_from_json(json: &str) -> Result<Project> {
    let value: Value = serde_json::from_str(json)?;
    match value.get("format").and_then(Value::as_str) {
        Some(FORMAT_TAG) => load_current(value),
        Some(other) => Err(RigError::UnsupportedFormat(format!(
            "unknown format tag '{other}'"
        ))),
        None => load_legacy(value),
    }
}

fn load_current(value: Value) -> Result<Project> {
    let doc: ProjectDoc = serde_json::from_value(value)?;
    if doc.version != FORMAT_VERSION {
        return Err(RigError::UnsupportedFormat(format!(
            "unsupported {FORMAT_TAG} version {}",
            doc.version
        )));
    }

    let clips = doc
        .clips
        .into_iter()
        .map(|clip_doc| {
            let keyframes = clip_doc
                .keyframes
                .into_iter()
                .map(|kf| Keyframe {
                    id: parse_uuid(&kf.id),
                    timestamp: kf.timestamp,
                    pose: pose_from_doc(
                        kf.pose.root,
                        kf.pose.head_radius,
                        kf.pose.stroke_width,
                        false,
                    ),
                })
                .collect();
            Clip::from_parts(
                parse_uuid(&clip_doc.id),
                clip_doc.name,
                clip_doc.duration,
                keyframes,
            )
        })
        .collect();

    Ok(Project::from_loaded(clips, doc.skin, doc.polygons))
}

fn load_legacy(value: Value) -> Result<Project> {
    let doc: LegacyDoc = serde_json::from_value(value)?;

    let clips: Vec<Clip> = match (doc.clips, doc.keyframes) {
        (Some(clip_docs), _) => clip_docs
            .into_iter()
            .enumerate()
            .map(|(i, clip_doc)| {
                let name = clip_doc
                    .name
                    .unwrap_or_else(|| format!("Animation {}", i + 1));
                legacy_clip(name, clip_doc.duration, clip_doc.keyframes)
            })
            .collect(),
        (None, Some(keyframes)) => {
            vec![legacy_clip("Animation 1".to_string(), None, keyframes)]
        }
        (None, None) => {
            return Err(RigError::UnsupportedFormat(
                "unrecognized project layout".to_string(),
            ));
        }
    };

    if clips.iter().all(Clip::is_empty) {
        return Err(RigError::EmptyProject);
    }

    debug!("loaded legacy project ({} clips)", clips.len());
    Ok(Project::from_loaded(clips, None, None))
}

fn legacy_clip(name: String, duration: Option<f32>, docs: Vec<LegacyKeyframeDoc>) -> Clip {
    let keyframes: Vec<Keyframe> = docs
        .into_iter()
        .enumerate()
        .filter_map(|(i, kf)| {
            let pose_doc = kf.pose.or(kf.skeleton)?;
            Some(Keyframe {
                id: Uuid::new_v4(),
                // Legacy files may omit timestamps; index spacing keeps
                // the authored order playable.
                timestamp: kf.timestamp.unwrap_or(i as f32),
                pose: pose_from_doc(
                    pose_doc.root,
                    DEFAULT_HEAD_RADIUS,
                    DEFAULT_STROKE_WIDTH,
                    true,
                ),
            })
        })
        .collect();

    let last = keyframes.last().map_or(0.0, |kf| kf.timestamp);
    let duration = duration.unwrap_or(last.max(DEFAULT_CLIP_DURATION));
    Clip::from_parts(Uuid::new_v4(), name, duration, keyframes)
}

fn pose_from_doc(root: NodeDoc, head_radius: f32, stroke_width: f32, legacy: bool) -> Skeleton {
    let mut next_id = 0;
    let root = node_from_doc(root, &mut next_id, legacy);
    let mut pose = Skeleton::new(root, head_radius, stroke_width);

    if legacy {
        // Rest the pose on the floor: lowest joint at exactly Y = 0.
        let min_y = pose.min_y();
        if min_y.is_finite() && min_y != 0.0 {
            pose.visit_mut(|node| node.position.y -= min_y);
            debug!("floor-aligned legacy pose by {min_y}");
        }
    }

    assign_joint_names(&mut pose);
    pose
}

fn node_from_doc(doc: NodeDoc, next_id: &mut u32, legacy: bool) -> Node {
    let id = match doc.id {
        Some(id) => NodeId(id),
        None => NodeId(*next_id),
    };
    *next_id += 1;

    let [x, y, z] = doc.pos;
    let position = if legacy {
        Vec3::new(x, -y, z) * LEGACY_SCALE
    } else {
        Vec3::new(x, y, z)
    };

    let children = doc
        .children
        .into_iter()
        .map(|child| node_from_doc(child, next_id, legacy))
        .collect();
    Node::with_children(id, "", position, children)
}

/// Restores display names (the joint role tags) to a loaded pose: id
/// match against the canonical rig first, pre-order position otherwise.
fn assign_joint_names(pose: &mut Skeleton) {
    let mut index = 0usize;
    pose.visit_mut(|node| {
        let joint = Joint::from_id(node.id).or_else(|| Joint::ALL.get(index).copied());
        if let Some(joint) = joint {
            node.name = joint.name().to_string();
        }
        index += 1;
    });
}

fn parse_uuid(raw: &str) -> Uuid {
    Uuid::parse_str(raw).unwrap_or_else(|_| Uuid::new_v4())
}

// ============================================================================
// Saving (current generation only)
// ============================================================================

pub fn project_to_json(project: &Project) -> Result<String> {
    let clips = project
        .clips()
        .iter()
        .map(|clip| ClipDoc {
            id: clip.id.to_string(),
            name: clip.name.clone(),
            duration: clip.duration,
            keyframes: clip
                .keyframes()
                .iter()
                .map(|kf| KeyframeDoc {
                    id: kf.id.to_string(),
                    timestamp: kf.timestamp,
                    pose: PoseDoc {
                        root: node_to_doc(kf.pose.root()),
                        head_radius: kf.pose.head_radius,
                        stroke_width: kf.pose.stroke_width,
                    },
                })
                .collect(),
        })
        .collect();

    let doc = ProjectDoc {
        format: FORMAT_TAG.to_string(),
        version: FORMAT_VERSION,
        clips,
        head_radius: project.rig.head_radius,
        stroke_width: project.rig.stroke_width,
        skin: project.skin.clone(),
        polygons: project.polygons.clone(),
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

fn node_to_doc(node: &Node) -> NodeDoc {
    NodeDoc {
        id: Some(node.id.0),
        pos: node.position.to_array(),
        children: node.children.iter().map(node_to_doc).collect(),
    }
}
