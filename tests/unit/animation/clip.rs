use super::*;

fn walk_clip() -> AnimationClip {
    let mut clip = AnimationClip::new("walk");
    let mut x = KeyframeTrack::new(0.0);
    x.add_keyframe(0, 0.0, Ease::Linear);
    x.add_keyframe(20, 100.0, Ease::OutQuad);
    clip.add_track("x", x);
    let mut bounce = KeyframeTrack::new(0.0);
    bounce.add_keyframe(5, 0.0, Ease::Linear);
    bounce.add_keyframe(30, -12.0, Ease::OutBounce);
    clip.add_track("bounce", bounce);
    clip
}

#[test]
fn frame_range_is_the_union_across_tracks() {
    let clip = walk_clip();
    assert_eq!(clip.frame_range(), Some((0, 30)));
    assert_eq!(AnimationClip::new("empty").frame_range(), None);
}

#[test]
fn unknown_track_is_a_configuration_error() {
    let clip = walk_clip();
    let err = clip.value_at("y", 0).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("walk"));
    assert!(msg.contains("'y'"));
}

#[test]
fn looped_playback_wraps_the_frame_range() {
    let mut clip = walk_clip();
    clip.set_looped(true);
    // Period is 30; frame 35 maps to frame 5.
    assert_eq!(clip.value_at("x", 35).unwrap(), clip.value_at("x", 5).unwrap());
    // Without looping the edge value holds instead.
    clip.set_looped(false);
    assert_eq!(clip.value_at("x", 35).unwrap(), TrackValue::Scalar(100.0));
}

#[test]
fn record_round_trip_is_lossless() {
    let mut clip = walk_clip();
    clip.set_looped(true);
    let restored = AnimationClip::from_record(&clip.to_record()).unwrap();
    assert_eq!(restored, clip);
}

#[test]
fn record_round_trip_preserves_value_kinds() {
    let mut clip = AnimationClip::new("kinds");
    let mut track = KeyframeTrack::new(TrackValue::Tuple(vec![0.0, 0.0]));
    track.add_keyframe(0, (1.0, 2.0), Ease::InOutSine);
    track.add_keyframe(8, (3.0, 4.0), Ease::Step);
    clip.add_track("pos", track);
    let mut flags = KeyframeTrack::new(true);
    flags.add_keyframe(3, false, Ease::Linear);
    clip.add_track("visible", flags);

    let restored = AnimationClip::from_record(&clip.to_record()).unwrap();
    assert_eq!(restored, clip);
}

#[test]
fn from_record_rejects_unknown_easing() {
    let record = serde_json::json!({
        "name": "bad",
        "tracks": {
            "x": { "default": 0.0, "keys": [ { "frame": 0, "value": 1.0, "easing": "warp" } ] }
        }
    });
    let err = AnimationClip::from_record(&record).unwrap_err();
    assert!(err.to_string().contains("warp"));
}
