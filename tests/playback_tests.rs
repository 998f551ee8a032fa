//! Clip, keyframe, and playback tests
//!
//! Tests for:
//! - commit_keyframe ordering, duration growth, duplicate rejection
//! - Interpolation boundary and monotonic laws
//! - Bracketing fallbacks (before first, past last, single, empty)
//! - Coincident-timestamp zero-alpha guard
//! - Player loop/once modes, reverse playback, pause semantics

use glam::Vec3;
use uuid::Uuid;

use stickrig::animation::{Clip, Keyframe, LoopMode, PlayState, Player, blend, blend_into};
use stickrig::posing::apply_drag;
use stickrig::rig::{Joint, Skeleton};
use stickrig::RigError;

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    approx(a.x, b.x) && approx(a.y, b.y) && approx(a.z, b.z)
}

fn poses_approx(a: &Skeleton, b: &Skeleton) -> bool {
    let (fa, fb) = (a.flatten(), b.flatten());
    fa.len() == fb.len()
        && fa
            .iter()
            .zip(fb.iter())
            .all(|(x, y)| x.id == y.id && vec3_approx(x.position, y.position))
}

/// Default pose with the hip dragged sideways — a distinct, valid pose
/// sharing the canonical topology.
fn shifted_pose(dx: f32) -> Skeleton {
    let mut rig = Skeleton::default_pose();
    apply_drag(&mut rig, Joint::Hip.id(), Vec3::new(dx, 0.0, 0.0));
    rig
}

fn two_keyframe_clip(t0: f32, a: &Skeleton, t1: f32, b: &Skeleton) -> Clip {
    Clip::from_parts(
        Uuid::new_v4(),
        "test",
        0.0,
        vec![Keyframe::capture(t0, a), Keyframe::capture(t1, b)],
    )
}

// ============================================================================
// Keyframe Commit
// ============================================================================

#[test]
fn commit_keeps_keyframes_sorted() {
    let pose = Skeleton::default_pose();
    let mut clip = Clip::new("walk");

    clip.commit_keyframe(2.0, &pose).unwrap();
    clip.commit_keyframe(0.5, &pose).unwrap();
    clip.commit_keyframe(1.0, &pose).unwrap();

    let times: Vec<f32> = clip.keyframes().iter().map(|kf| kf.timestamp).collect();
    assert_eq!(times, vec![0.5, 1.0, 2.0]);
}

#[test]
fn commit_raises_duration_past_default() {
    let pose = Skeleton::default_pose();
    let mut clip = Clip::new("walk");
    assert!(approx(clip.duration, 5.0));

    clip.commit_keyframe(7.2, &pose).unwrap();
    assert!(approx(clip.duration, 7.2));

    // Earlier commits never shrink it.
    clip.commit_keyframe(1.0, &pose).unwrap();
    assert!(approx(clip.duration, 7.2));
    assert!(clip.duration >= clip.keyframes().last().unwrap().timestamp);
}

#[test]
fn commit_rejects_duplicate_timestamp() {
    let pose = Skeleton::default_pose();
    let mut clip = Clip::new("walk");
    clip.commit_keyframe(1.0, &pose).unwrap();

    let err = clip.commit_keyframe(1.0, &pose).unwrap_err();
    assert!(matches!(err, RigError::DuplicateKeyframe { .. }));
    assert_eq!(clip.keyframes().len(), 1);
}

#[test]
fn commit_snapshots_independently_of_live_pose() {
    let mut rig = Skeleton::default_pose();
    let mut clip = Clip::new("walk");
    clip.commit_keyframe(0.0, &rig).unwrap();

    let before = clip.keyframes()[0].pose.clone();
    apply_drag(&mut rig, Joint::Hip.id(), Vec3::new(2.0, 0.0, 0.0));

    assert!(
        poses_approx(&clip.keyframes()[0].pose, &before),
        "later live edits must not reach the committed snapshot"
    );
}

#[test]
fn remove_keyframe_by_id() {
    let pose = Skeleton::default_pose();
    let mut clip = Clip::new("walk");
    let id = clip.commit_keyframe(0.0, &pose).unwrap();
    clip.commit_keyframe(1.0, &pose).unwrap();

    assert!(clip.remove_keyframe(id));
    assert!(!clip.remove_keyframe(id));
    assert_eq!(clip.keyframes().len(), 1);
}

// ============================================================================
// Interpolation Laws
// ============================================================================

#[test]
fn blend_boundary_law() {
    let a = Skeleton::default_pose();
    let b = shifted_pose(1.0);

    assert!(poses_approx(&blend(&a, &b, 0.0), &a));
    assert!(poses_approx(&blend(&a, &b, 1.0), &b));
}

#[test]
fn blend_midpoint_and_monotonic_law() {
    let a = Skeleton::default_pose();
    let b = shifted_pose(2.0);

    for alpha in [0.25, 0.5, 0.75] {
        let mixed = blend(&a, &b, alpha);
        for ((node, na), nb) in mixed.flatten().iter().zip(a.flatten()).zip(b.flatten()) {
            for axis in 0..3 {
                let lo = na.position[axis].min(nb.position[axis]);
                let hi = na.position[axis].max(nb.position[axis]);
                assert!(
                    node.position[axis] >= lo - EPSILON && node.position[axis] <= hi + EPSILON,
                    "interpolated position must stay on the segment"
                );
            }
        }
    }

    let mid = blend(&a, &b, 0.5);
    let hip_a = a.find_joint(Joint::Hip).unwrap().position;
    let hip_b = b.find_joint(Joint::Hip).unwrap().position;
    assert!(vec3_approx(
        mid.find_joint(Joint::Hip).unwrap().position,
        (hip_a + hip_b) * 0.5
    ));
}

#[test]
fn blend_interpolates_style_scalars() {
    let a = Skeleton::default_pose();
    let mut b = shifted_pose(1.0);
    b.head_radius = a.head_radius * 3.0;
    b.stroke_width = a.stroke_width * 5.0;

    let mid = blend(&a, &b, 0.5);
    assert!(approx(mid.head_radius, a.head_radius * 2.0));
    assert!(approx(mid.stroke_width, a.stroke_width * 3.0));
}

#[test]
fn blend_into_mutates_in_place_and_skips_unknown_ids() {
    let a = Skeleton::default_pose();
    let mut b = shifted_pose(1.0);
    // Degrade `next`: drop the head so it has no match for that id.
    let head_id = Joint::Head.id();
    b.node_mut(Joint::Neck.id())
        .unwrap()
        .children
        .retain(|child| child.id != head_id);

    let mut live = a.clone();
    blend_into(&a, &b, 0.5, &mut live);

    // Unmatched joints hold their prev value.
    assert!(vec3_approx(
        live.find_node(head_id).unwrap().position,
        a.find_node(head_id).unwrap().position
    ));
    // Matched joints blend normally.
    let hip_a = a.find_joint(Joint::Hip).unwrap().position;
    let hip_b = b.find_joint(Joint::Hip).unwrap().position;
    assert!(vec3_approx(
        live.find_joint(Joint::Hip).unwrap().position,
        (hip_a + hip_b) * 0.5
    ));
}

// ============================================================================
// Bracketing
// ============================================================================

#[test]
fn bracket_between_keyframes() {
    let a = Skeleton::default_pose();
    let b = shifted_pose(1.0);
    let clip = two_keyframe_clip(0.0, &a, 2.0, &b);

    let (prev, next) = clip.bracket(1.0).unwrap();
    assert!(approx(prev.timestamp, 0.0));
    assert!(approx(next.timestamp, 2.0));
    assert!(approx(Clip::alpha(prev, next, 1.0), 0.5));
}

#[test]
fn bracket_before_first_clamps_to_first_pose() {
    let a = Skeleton::default_pose();
    let b = shifted_pose(1.0);
    let clip = two_keyframe_clip(1.0, &a, 2.0, &b);

    let (prev, next) = clip.bracket(0.25).unwrap();
    let alpha = Clip::alpha(prev, next, 0.25);
    assert!(approx(alpha, 0.0), "alpha must clamp to 0, got {alpha}");
}

#[test]
fn bracket_past_last_clamps_to_last_pose() {
    let a = Skeleton::default_pose();
    let b = shifted_pose(1.0);
    let clip = two_keyframe_clip(0.0, &a, 2.0, &b);

    let (prev, next) = clip.bracket(10.0).unwrap();
    let alpha = Clip::alpha(prev, next, 10.0);
    assert!(approx(alpha, 1.0), "alpha must clamp to 1, got {alpha}");
}

#[test]
fn bracket_empty_clip_is_none() {
    let clip = Clip::new("empty");
    assert!(clip.bracket(0.0).is_none());
}

#[test]
fn single_keyframe_is_static() {
    let a = shifted_pose(0.5);
    let clip = Clip::from_parts(
        Uuid::new_v4(),
        "static",
        0.0,
        vec![Keyframe::capture(1.0, &a)],
    );

    let player = Player::new();
    for time in [0.0, 0.5, 1.0, 3.0] {
        let mut sampler = player.clone();
        sampler.time = time;
        let mut live = Skeleton::default_pose();
        assert!(sampler.sample_into(&clip, &mut live));
        assert!(poses_approx(&live, &a));
    }
}

#[test]
fn coincident_timestamps_blend_with_zero_alpha() {
    let a = Skeleton::default_pose();
    let b = shifted_pose(1.0);
    // from_parts tolerates what commit_keyframe rejects.
    let clip = two_keyframe_clip(1.0, &a, 1.0, &b);

    let (prev, next) = clip.bracket(1.0).unwrap();
    assert!(approx(Clip::alpha(prev, next, 1.0), 0.0));
}

// ============================================================================
// Player
// ============================================================================

#[test]
fn player_defaults_stopped_and_looping() {
    let player = Player::new();
    assert_eq!(player.state(), PlayState::Stopped);
    assert_eq!(player.loop_mode, LoopMode::Loop);
    assert!(approx(player.time, 0.0));
}

#[test]
fn stopped_player_does_not_advance() {
    let a = Skeleton::default_pose();
    let clip = two_keyframe_clip(0.0, &a, 2.0, &a);

    let mut player = Player::new();
    player.advance(1.0, &clip);
    assert!(approx(player.time, 0.0));
}

#[test]
fn midpoint_sample_scenario() {
    let a = Skeleton::default_pose();
    let b = shifted_pose(1.0);
    let clip = two_keyframe_clip(0.0, &a, 2.0, &b);

    let mut player = Player::new();
    player.play();
    player.advance(1.0, &clip);

    let mut live = a.clone();
    assert!(player.sample_into(&clip, &mut live));
    assert!(poses_approx(&live, &blend(&a, &b, 0.5)));
}

#[test]
fn loop_wrap_scenario() {
    let a = Skeleton::default_pose();
    let b = shifted_pose(1.0);
    // Keyframes at 0 and 2, duration exactly 2.
    let clip = two_keyframe_clip(0.0, &a, 2.0, &b);
    assert!(approx(clip.duration, 2.0));

    let mut player = Player::new();
    player.play();
    player.advance(2.5, &clip);
    assert!(
        approx(player.time, 0.5),
        "2.5s into a 2s looping clip wraps to 0.5, got {}",
        player.time
    );
    assert!(player.is_playing(), "looping never stops on its own");

    let mut live = a.clone();
    player.sample_into(&clip, &mut live);
    assert!(poses_approx(&live, &blend(&a, &b, 0.25)));
}

#[test]
fn once_mode_clamps_and_stops() {
    let a = Skeleton::default_pose();
    let clip = two_keyframe_clip(0.0, &a, 2.0, &a);

    let mut player = Player::new();
    player.loop_mode = LoopMode::Once;
    player.play();
    player.advance(3.0, &clip);

    assert!(approx(player.time, 2.0));
    assert_eq!(player.state(), PlayState::Stopped);
}

#[test]
fn reverse_playback_wraps_from_far_end() {
    let a = Skeleton::default_pose();
    let clip = two_keyframe_clip(0.0, &a, 2.0, &a);

    let mut player = Player::new();
    player.time_scale = -1.0;
    player.time = 0.5;
    player.play();
    player.advance(1.0, &clip);

    assert!(
        player.time > 0.0 && player.time <= clip.duration,
        "reverse loop must stay within [0, duration], got {}",
        player.time
    );
}

#[test]
fn time_scale_multiplies_dt() {
    let a = Skeleton::default_pose();
    let clip = two_keyframe_clip(0.0, &a, 4.0, &a);

    let mut player = Player::new();
    player.time_scale = 2.0;
    player.play();
    player.advance(1.0, &clip);
    assert!(approx(player.time, 2.0));
}

#[test]
fn sample_empty_clip_leaves_rig_untouched() {
    let clip = Clip::new("empty");
    let player = Player::new();

    let mut live = Skeleton::default_pose();
    let before = live.clone();
    assert!(!player.sample_into(&clip, &mut live));
    assert!(poses_approx(&live, &before));
}

#[test]
fn rewind_stops_and_resets_time() {
    let mut player = Player::new();
    player.time = 3.2;
    player.play();

    player.rewind();
    assert_eq!(player.state(), PlayState::Stopped);
    assert!(approx(player.time, 0.0));
}
