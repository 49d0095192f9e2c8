//! The validated video generation prompt and its sub-entities.
//!
//! Field names and nesting here are the downstream interchange format; they
//! must stay bit-stable. Doc comments on fields double as the property
//! descriptions in the function-call contract.

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::params::{AspectRatio, Duration};
use crate::validate::{self, FieldDefect, ValidationError};

/// Frame rate applied when the model leaves it unspecified.
pub const DEFAULT_FRAME_RATE: &str = "24fps";

fn default_frame_rate() -> String {
    DEFAULT_FRAME_RATE.to_string()
}

fn default_generate_audio() -> bool {
    true
}

/// Subject/character specifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct Subject {
    /// Detailed description of the subject or character
    pub description: String,
    /// What the subject is doing
    pub action: String,
    /// Clothing and appearance details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wardrobe: Option<String>,
    /// Facial expression or emotion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
}

impl Subject {
    fn from_map(
        map: &Map<String, Value>,
        prefix: &str,
        defects: &mut Vec<FieldDefect>,
    ) -> Option<Self> {
        let description = validate::required_string(map, prefix, "description", defects);
        let action = validate::required_string(map, prefix, "action", defects);
        let wardrobe = validate::optional_string(map, prefix, "wardrobe", defects);
        let expression = validate::optional_string(map, prefix, "expression", defects);

        Some(Subject {
            description: description?,
            action: action?,
            wardrobe,
            expression,
        })
    }
}

/// Scene environment specifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct Scene {
    /// Physical location or setting
    pub location: String,
    /// Time of day: golden hour, night, midday, etc.
    pub time_of_day: String,
    /// Lighting conditions: natural, studio, dramatic, etc.
    pub lighting: String,
    /// Overall mood and atmosphere
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ambiance: Option<String>,
    /// Weather conditions if relevant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather: Option<String>,
}

impl Scene {
    fn from_map(
        map: &Map<String, Value>,
        prefix: &str,
        defects: &mut Vec<FieldDefect>,
    ) -> Option<Self> {
        let location = validate::required_string(map, prefix, "location", defects);
        let time_of_day = validate::required_string(map, prefix, "time_of_day", defects);
        let lighting = validate::required_string(map, prefix, "lighting", defects);
        let ambiance = validate::optional_string(map, prefix, "ambiance", defects);
        let weather = validate::optional_string(map, prefix, "weather", defects);

        Some(Scene {
            location: location?,
            time_of_day: time_of_day?,
            lighting: lighting?,
            ambiance,
            weather,
        })
    }
}

/// Shot framing and technical specifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct ShotComposition {
    /// Shot framing: wide shot, medium shot, close-up, extreme close-up
    pub framing: String,
    /// Lens specification: 24mm, 50mm, 85mm, etc.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lens: Option<String>,
    /// Camera equipment: ARRI Alexa, RED, etc.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera_equipment: Option<String>,
    /// Frame rate specification
    #[serde(default = "default_frame_rate")]
    pub frame_rate: String,
}

impl ShotComposition {
    fn from_map(
        map: &Map<String, Value>,
        prefix: &str,
        defects: &mut Vec<FieldDefect>,
    ) -> Option<Self> {
        let framing = validate::required_string(map, prefix, "framing", defects);
        let lens = validate::optional_string(map, prefix, "lens", defects);
        let camera_equipment = validate::optional_string(map, prefix, "camera_equipment", defects);
        let frame_rate = validate::optional_string(map, prefix, "frame_rate", defects)
            .unwrap_or_else(default_frame_rate);

        Some(ShotComposition {
            framing: framing?,
            lens,
            camera_equipment,
            frame_rate,
        })
    }
}

/// Camera movement specifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct CameraMotion {
    /// Type of camera motion: dolly, crane, orbit, steadicam, handheld, static
    #[serde(rename = "type")]
    pub kind: String,
    /// Detailed camera movement description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CameraMotion {
    fn from_map(
        map: &Map<String, Value>,
        prefix: &str,
        defects: &mut Vec<FieldDefect>,
    ) -> Option<Self> {
        let kind = validate::required_string(map, prefix, "type", defects);
        let description = validate::optional_string(map, prefix, "description", defects);

        Some(CameraMotion {
            kind: kind?,
            description,
        })
    }
}

/// Audio specifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct Audio {
    /// Background environmental sounds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ambient: Option<String>,
    /// Voice characteristics if dialogue is present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_tone: Option<String>,
    /// Background music style
    #[serde(skip_serializing_if = "Option::is_none")]
    pub music_style: Option<String>,
}

impl Audio {
    fn from_map(map: &Map<String, Value>, prefix: &str, defects: &mut Vec<FieldDefect>) -> Self {
        Audio {
            ambient: validate::optional_string(map, prefix, "ambient", defects),
            voice_tone: validate::optional_string(map, prefix, "voice_tone", defects),
            music_style: validate::optional_string(map, prefix, "music_style", defects),
        }
    }
}

/// A complete, validated video generation request.
///
/// Constructed through [`VideoPrompt::from_value`]: the mapping either
/// satisfies every schema invariant or construction fails with the full
/// defect list. There is no mutating API; a prompt is immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct VideoPrompt {
    /// The main subject of the video
    pub subject: Subject,
    /// Scene environment and setting
    pub scene: Scene,
    /// Shot composition and framing
    pub shot: ShotComposition,
    /// Camera movement specifications
    pub camera_motion: CameraMotion,
    /// Visual style: cinematic, documentary, horror, animated, etc.
    pub style: String,
    /// Audio specifications
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<Audio>,
    /// Video duration in seconds: 8 for detailed scenes, 6 for medium length, 4 for short clips
    #[serde(default)]
    pub duration_seconds: Duration,
    /// Video aspect ratio: "16:9" for landscape/cinematic, "9:16" for vertical/mobile
    #[serde(default)]
    pub aspect_ratio: AspectRatio,
    /// Whether to generate audio
    #[serde(default = "default_generate_audio")]
    pub generate_audio: bool,
    /// Elements to avoid: text overlays, artifacts, etc.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_prompt: Option<Vec<String>>,
}

impl VideoPrompt {
    /// Construct from a key-structured mapping.
    ///
    /// Walks every field and reports ALL defects in one pass; defaults are
    /// applied for absent `duration_seconds`, `aspect_ratio`,
    /// `generate_audio`, and `shot.frame_rate`.
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let obj = match value.as_object() {
            Some(obj) => obj,
            None => {
                return Err(ValidationError::single(FieldDefect::wrong_type(
                    "$", "an object",
                )))
            }
        };

        let mut defects = Vec::new();

        let subject = match validate::required_section(obj, "subject", &mut defects) {
            Some(section) => Subject::from_map(section, "subject", &mut defects),
            None => None,
        };
        let scene = match validate::required_section(obj, "scene", &mut defects) {
            Some(section) => Scene::from_map(section, "scene", &mut defects),
            None => None,
        };
        let shot = match validate::required_section(obj, "shot", &mut defects) {
            Some(section) => ShotComposition::from_map(section, "shot", &mut defects),
            None => None,
        };
        let camera_motion = match validate::required_section(obj, "camera_motion", &mut defects) {
            Some(section) => CameraMotion::from_map(section, "camera_motion", &mut defects),
            None => None,
        };
        let style = validate::required_string(obj, "", "style", &mut defects);

        let audio = validate::optional_section(obj, "audio", &mut defects)
            .map(|section| Audio::from_map(section, "audio", &mut defects));
        let duration_seconds = validate::duration_field(obj, &mut defects);
        let aspect_ratio = validate::aspect_ratio_field(obj, &mut defects);
        let generate_audio = validate::bool_field(obj, "generate_audio", true, &mut defects);
        let negative_prompt = validate::string_list_field(obj, "negative_prompt", &mut defects);

        match (subject, scene, shot, camera_motion, style) {
            (Some(subject), Some(scene), Some(shot), Some(camera_motion), Some(style))
                if defects.is_empty() =>
            {
                Ok(VideoPrompt {
                    subject,
                    scene,
                    shot,
                    camera_motion,
                    style,
                    audio,
                    duration_seconds,
                    aspect_ratio,
                    generate_audio,
                    negative_prompt,
                })
            }
            _ => Err(ValidationError::new(defects)),
        }
    }

    /// Parse and construct from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ValidationError> {
        let value: Value = serde_json::from_str(text).map_err(|e| {
            ValidationError::single(FieldDefect::new("$", format!("invalid JSON: {e}")))
        })?;
        Self::from_value(&value)
    }

    /// Canonical JSON form, fields in declared order, absent optionals omitted.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Pretty-printed canonical JSON form.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

// Deserialization funnels through `from_value` so serde entry points enforce
// the same invariants as explicit construction.
impl<'de> Deserialize<'de> for VideoPrompt {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        VideoPrompt::from_value(&value).map_err(serde::de::Error::custom)
    }
}
