//! Schema model for Veo video generation prompts.
//!
//! This crate provides the validated [`VideoPrompt`] entity and its
//! sub-entities. A prompt is constructed from a key-structured mapping and is
//! either fully valid or not constructed at all; construction reports every
//! defective field in one pass. The serialized JSON form is the interchange
//! format handed to downstream video-generation submission systems, so field
//! names and nesting are stable.

pub mod params;
pub mod prompt;
pub mod validate;

// Re-export common types
pub use params::{AspectRatio, AspectRatioParseError, Duration, DurationParseError};
pub use prompt::{
    Audio, CameraMotion, Scene, ShotComposition, Subject, VideoPrompt, DEFAULT_FRAME_RATE,
};
pub use validate::{FieldDefect, ValidationError};
