use std::collections::HashMap;

use crate::{
    animation::ease::Ease,
    animation::track::{KeyframeTrack, TrackValue},
    foundation::error::{MarionetteError, MarionetteResult},
};

/// A named collection of keyframe tracks sharing one frame range.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationClip {
    /// Clip name (used by persistence and diagnostics).
    pub name: String,
    tracks: HashMap<String, KeyframeTrack>,
    looped: bool,
}

impl AnimationClip {
    /// New empty clip.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tracks: HashMap::new(),
            looped: false,
        }
    }

    /// Enable or disable looped playback.
    pub fn set_looped(&mut self, looped: bool) {
        self.looped = looped;
    }

    /// Whether playback loops over the clip's frame range.
    pub fn looped(&self) -> bool {
        self.looped
    }

    /// Insert or replace a track under `name`.
    pub fn add_track(&mut self, name: impl Into<String>, track: KeyframeTrack) {
        self.tracks.insert(name.into(), track);
    }

    /// Look up a track by name.
    pub fn track(&self, name: &str) -> Option<&KeyframeTrack> {
        self.tracks.get(name)
    }

    /// Mutable track lookup.
    pub fn track_mut(&mut self, name: &str) -> Option<&mut KeyframeTrack> {
        self.tracks.get_mut(name)
    }

    /// Track names in no particular order.
    pub fn track_names(&self) -> impl Iterator<Item = &str> {
        self.tracks.keys().map(String::as_str)
    }

    /// Union `(min, max)` key frame range across all tracks, if any track
    /// has keys.
    pub fn frame_range(&self) -> Option<(u64, u64)> {
        let mut out: Option<(u64, u64)> = None;
        for track in self.tracks.values() {
            if let Some((lo, hi)) = track.frame_range() {
                out = Some(match out {
                    Some((a, b)) => (a.min(lo), b.max(hi)),
                    None => (lo, hi),
                });
            }
        }
        out
    }

    /// Sample `track` at `frame`, honoring the loop flag.
    ///
    /// An unknown track name is a configuration error carrying the track
    /// and clip names.
    pub fn value_at(&self, track: &str, frame: u64) -> MarionetteResult<TrackValue> {
        let t = self.tracks.get(track).ok_or_else(|| {
            MarionetteError::animation(format!(
                "clip '{}' has no track named '{track}'",
                self.name
            ))
        })?;
        t.value_at(self.playback_frame(frame))
    }

    /// Map a global frame onto the clip range, wrapping when looped.
    fn playback_frame(&self, frame: u64) -> u64 {
        if !self.looped {
            return frame;
        }
        let Some((start, end)) = self.frame_range() else {
            return frame;
        };
        let period = end - start;
        if period == 0 || frame <= start {
            return frame;
        }
        start + (frame - start) % period
    }

    /// Serialize to a generic record tree (see [`AnimationClip::from_record`]).
    pub fn to_record(&self) -> serde_json::Value {
        let mut tracks = serde_json::Map::new();
        for (name, track) in &self.tracks {
            let keys: Vec<serde_json::Value> = track
                .keys()
                .iter()
                .map(|k| {
                    serde_json::json!({
                        "frame": k.frame,
                        "value": value_to_record(&k.value),
                        "easing": k.easing.name(),
                    })
                })
                .collect();
            tracks.insert(
                name.clone(),
                serde_json::json!({
                    "default": value_to_record(track.default_value()),
                    "keys": keys,
                }),
            );
        }
        serde_json::json!({
            "name": self.name,
            "loop": self.looped,
            "tracks": tracks,
        })
    }

    /// Rebuild a clip from a record produced by [`AnimationClip::to_record`].
    pub fn from_record(record: &serde_json::Value) -> MarionetteResult<Self> {
        let name = record
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| MarionetteError::serde("clip record is missing 'name'"))?;
        let mut clip = Self::new(name);
        clip.looped = record.get("loop").and_then(|v| v.as_bool()).unwrap_or(false);

        let tracks = record
            .get("tracks")
            .and_then(|v| v.as_object())
            .ok_or_else(|| MarionetteError::serde("clip record is missing 'tracks' map"))?;
        for (track_name, track_rec) in tracks {
            let default = track_rec
                .get("default")
                .map(value_from_record)
                .transpose()?
                .unwrap_or(TrackValue::Scalar(0.0));
            let mut track = KeyframeTrack::new(default);
            let keys = track_rec
                .get("keys")
                .and_then(|v| v.as_array())
                .ok_or_else(|| {
                    MarionetteError::serde(format!(
                        "track '{track_name}' record is missing 'keys' list"
                    ))
                })?;
            for key in keys {
                let frame = key.get("frame").and_then(|v| v.as_u64()).ok_or_else(|| {
                    MarionetteError::serde(format!(
                        "keyframe in track '{track_name}' is missing 'frame'"
                    ))
                })?;
                let value = key
                    .get("value")
                    .map(value_from_record)
                    .transpose()?
                    .ok_or_else(|| {
                        MarionetteError::serde(format!(
                            "keyframe in track '{track_name}' is missing 'value'"
                        ))
                    })?;
                let easing = match key.get("easing").and_then(|v| v.as_str()) {
                    Some(name) => Ease::from_name(name)?,
                    None => Ease::Linear,
                };
                track.add_keyframe(frame, value, easing);
            }
            clip.add_track(track_name.clone(), track);
        }
        Ok(clip)
    }
}

fn value_to_record(value: &TrackValue) -> serde_json::Value {
    match value {
        TrackValue::Scalar(v) => serde_json::json!(v),
        TrackValue::Tuple(vs) => serde_json::json!(vs),
        TrackValue::Flag(v) => serde_json::json!(v),
    }
}

fn value_from_record(value: &serde_json::Value) -> MarionetteResult<TrackValue> {
    match value {
        serde_json::Value::Number(n) => {
            let v = n
                .as_f64()
                .ok_or_else(|| MarionetteError::serde("keyframe value is not a finite number"))?;
            Ok(TrackValue::Scalar(v))
        }
        serde_json::Value::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                let v = item.as_f64().ok_or_else(|| {
                    MarionetteError::serde("tuple keyframe value has a non-numeric element")
                })?;
                out.push(v);
            }
            Ok(TrackValue::Tuple(out))
        }
        serde_json::Value::Bool(v) => Ok(TrackValue::Flag(*v)),
        other => Err(MarionetteError::serde(format!(
            "unsupported keyframe value record: {other}"
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/clip.rs"]
mod tests;
