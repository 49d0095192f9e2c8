//! Enumerated generation parameters.

use std::fmt;
use std::str::FromStr;

use schemars::gen::SchemaGenerator;
use schemars::schema::{InstanceType, Schema, SchemaObject};
use schemars::JsonSchema;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Supported clip durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Duration {
    /// 4 seconds
    Short,
    /// 6 seconds
    Medium,
    /// 8 seconds
    Long,
}

impl Duration {
    /// All supported durations.
    pub const ALL: &'static [Duration] = &[Duration::Short, Duration::Medium, Duration::Long];

    /// Duration in whole seconds, as submitted downstream.
    pub const fn seconds(self) -> u8 {
        match self {
            Duration::Short => 4,
            Duration::Medium => 6,
            Duration::Long => 8,
        }
    }
}

impl Default for Duration {
    fn default() -> Self {
        Duration::Long
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.seconds())
    }
}

impl TryFrom<i64> for Duration {
    type Error = DurationParseError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            4 => Ok(Duration::Short),
            6 => Ok(Duration::Medium),
            8 => Ok(Duration::Long),
            other => Err(DurationParseError(other)),
        }
    }
}

// Serializes as the bare second count; the enum is a closed set, not a
// struct, on the wire.
impl Serialize for Duration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.seconds() as u64)
    }
}

impl JsonSchema for Duration {
    fn schema_name() -> String {
        "Duration".to_string()
    }

    fn is_referenceable() -> bool {
        false
    }

    fn json_schema(_gen: &mut SchemaGenerator) -> Schema {
        let mut schema = SchemaObject {
            instance_type: Some(InstanceType::Integer.into()),
            ..Default::default()
        };
        schema.metadata().description =
            Some("Video duration in seconds: 4, 6, or 8".to_string());
        schema.enum_values = Some(vec![4.into(), 6.into(), 8.into()]);
        Schema::Object(schema)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unsupported duration: {0}s, expected 4, 6 or 8")]
pub struct DurationParseError(pub i64);

/// Supported output aspect ratios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AspectRatio {
    /// Landscape/cinematic (16:9)
    Widescreen,
    /// Vertical/mobile (9:16)
    Vertical,
}

impl AspectRatio {
    /// All supported aspect ratios.
    pub const ALL: &'static [AspectRatio] = &[AspectRatio::Widescreen, AspectRatio::Vertical];

    /// Returns the ratio string as submitted downstream.
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Widescreen => "16:9",
            AspectRatio::Vertical => "9:16",
        }
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        AspectRatio::Widescreen
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AspectRatio {
    type Err = AspectRatioParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "16:9" => Ok(AspectRatio::Widescreen),
            "9:16" => Ok(AspectRatio::Vertical),
            _ => Err(AspectRatioParseError(s.to_string())),
        }
    }
}

impl Serialize for AspectRatio {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl JsonSchema for AspectRatio {
    fn schema_name() -> String {
        "AspectRatio".to_string()
    }

    fn is_referenceable() -> bool {
        false
    }

    fn json_schema(_gen: &mut SchemaGenerator) -> Schema {
        let mut schema = SchemaObject {
            instance_type: Some(InstanceType::String.into()),
            ..Default::default()
        };
        schema.metadata().description =
            Some("Video aspect ratio: \"16:9\" or \"9:16\"".to_string());
        schema.enum_values = Some(vec!["16:9".into(), "9:16".into()]);
        Schema::Object(schema)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported aspect ratio: {0}, expected \"16:9\" or \"9:16\"")]
pub struct AspectRatioParseError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_defaults_to_long() {
        assert_eq!(Duration::default(), Duration::Long);
        assert_eq!(Duration::default().seconds(), 8);
    }

    #[test]
    fn test_duration_from_seconds() {
        assert_eq!(Duration::try_from(4), Ok(Duration::Short));
        assert_eq!(Duration::try_from(6), Ok(Duration::Medium));
        assert_eq!(Duration::try_from(8), Ok(Duration::Long));
    }

    #[test]
    fn test_duration_rejects_out_of_set_values() {
        assert!(Duration::try_from(5).is_err());
        assert!(Duration::try_from(10).is_err());
        assert!(Duration::try_from(-1).is_err());
    }

    #[test]
    fn test_duration_serializes_as_integer() {
        let value = serde_json::to_value(Duration::Medium).unwrap();
        assert_eq!(value, serde_json::json!(6));
    }

    #[test]
    fn test_aspect_ratio_defaults_to_widescreen() {
        assert_eq!(AspectRatio::default(), AspectRatio::Widescreen);
    }

    #[test]
    fn test_aspect_ratio_parse_and_display() {
        assert_eq!("16:9".parse::<AspectRatio>(), Ok(AspectRatio::Widescreen));
        assert_eq!("9:16".parse::<AspectRatio>(), Ok(AspectRatio::Vertical));
        assert_eq!(AspectRatio::Vertical.to_string(), "9:16");
    }

    #[test]
    fn test_aspect_ratio_rejects_unknown_ratio() {
        assert!("4:3".parse::<AspectRatio>().is_err());
        assert!("16x9".parse::<AspectRatio>().is_err());
    }

    #[test]
    fn test_aspect_ratio_serializes_as_string() {
        let value = serde_json::to_value(AspectRatio::Vertical).unwrap();
        assert_eq!(value, serde_json::json!("9:16"));
    }

    #[test]
    fn test_all_constants_enumerate_the_closed_sets() {
        let seconds: Vec<u8> = Duration::ALL.iter().map(|d| d.seconds()).collect();
        assert_eq!(seconds, [4, 6, 8]);

        let ratios: Vec<&str> = AspectRatio::ALL.iter().map(|r| r.as_str()).collect();
        assert_eq!(ratios, ["16:9", "9:16"]);
    }
}
