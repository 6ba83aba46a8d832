// Strong typing over strings. Newtypes for location keys and asset URLs.
// Shared data model: records from the content file, derived asset paths, engine config.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Normalized location identifier: lower-case words separated by single spaces.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationKey(String);

impl LocationKey {
    /// Normalize raw selector input. Returns `None` for empty or blank input.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join(" ");

        if normalized.is_empty() {
            None
        } else {
            Some(LocationKey(normalized))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Key with spaces replaced by underscores, as used in asset file names.
    pub fn slug(&self) -> String {
        self.0.replace(' ', "_")
    }

    /// Title-cased form for headings: every word capitalized.
    pub fn title(&self) -> String {
        self.0
            .split(' ')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for LocationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Historical content for one location. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub identity: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub timeline: Vec<String>,
    pub uniqueness: String,
    pub narrative: String,
}

/// `"timeline": null` reads as no events.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Old/modern image URLs for one location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePair {
    pub old: String,
    pub modern: String,
}

/// Which of the two comparison images an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSlot {
    Old,
    Modern,
}

impl ImageSlot {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "old" => Some(ImageSlot::Old),
            "modern" => Some(ImageSlot::Modern),
            _ => None,
        }
    }
}

/// Geographic point (degrees).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoord {
    pub lat: f64,
    pub lng: f64,
}

impl GeoCoord {
    pub const fn new(lat: f64, lng: f64) -> Self {
        GeoCoord { lat, lng }
    }
}

/// Engine configuration passed from JS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChronicleConfig {
    /// Delay between revealed characters of the story text.
    #[serde(default = "default_typewriter_interval")]
    pub typewriter_interval_ms: u32,
    /// Delay before unmuting after a muted autoplay retry succeeds.
    #[serde(default = "default_unmute_delay")]
    pub unmute_delay_ms: u32,
    #[serde(default = "default_gallery_capacity")]
    pub gallery_capacity: usize,
    #[serde(default = "default_volume")]
    pub initial_volume: f32,
    #[serde(default = "default_true")]
    pub initial_loop: bool,
    #[serde(default = "default_content_url")]
    pub content_url: String,
    /// Element scrolled into view after a map or shortcut selection.
    #[serde(default = "default_scroll_target")]
    pub scroll_target_id: String,
    #[serde(default)]
    pub elements: ElementIds,
}

impl Default for ChronicleConfig {
    fn default() -> Self {
        ChronicleConfig {
            typewriter_interval_ms: default_typewriter_interval(),
            unmute_delay_ms: default_unmute_delay(),
            gallery_capacity: default_gallery_capacity(),
            initial_volume: default_volume(),
            initial_loop: default_true(),
            content_url: default_content_url(),
            scroll_target_id: default_scroll_target(),
            elements: ElementIds::default(),
        }
    }
}

fn default_typewriter_interval() -> u32 {
    15
}

fn default_unmute_delay() -> u32 {
    200
}

fn default_gallery_capacity() -> usize {
    50
}

fn default_volume() -> f32 {
    1.0
}

fn default_true() -> bool {
    true
}

fn default_content_url() -> String {
    "/data/history.json".to_string()
}

fn default_scroll_target() -> String {
    "time-travel".to_string()
}

/// DOM element ids the WASM bindings attach to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementIds {
    #[serde(default = "default_old_image")]
    pub old_image: String,
    #[serde(default = "default_modern_image")]
    pub modern_image: String,
    #[serde(default = "default_story_text")]
    pub story_text: String,
    #[serde(default = "default_audio")]
    pub audio: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        ElementIds {
            old_image: default_old_image(),
            modern_image: default_modern_image(),
            story_text: default_story_text(),
            audio: default_audio(),
        }
    }
}

fn default_old_image() -> String {
    "oldImg".to_string()
}

fn default_modern_image() -> String {
    "modernImg".to_string()
}

fn default_story_text() -> String {
    "storyText".to_string()
}

fn default_audio() -> String {
    "soundscape".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_key_normalizes_input() {
        let key = LocationKey::parse("  Howrah   BRIDGE ").unwrap();
        assert_eq!(key.as_str(), "howrah bridge");
        assert_eq!(key.slug(), "howrah_bridge");
        assert_eq!(key.title(), "Howrah Bridge");
    }

    #[test]
    fn blank_key_is_rejected() {
        assert!(LocationKey::parse("").is_none());
        assert!(LocationKey::parse("   ").is_none());
    }

    #[test]
    fn record_timeline_is_optional() {
        let record: HistoryRecord =
            serde_json::from_str(r#"{"identity":"I","uniqueness":"U","narrative":"N"}"#).unwrap();
        assert!(record.timeline.is_empty());
    }

    #[test]
    fn config_defaults_fill_missing_fields() {
        let config: ChronicleConfig = serde_json::from_str(r#"{"unmute_delay_ms":350}"#).unwrap();
        assert_eq!(config.unmute_delay_ms, 350);
        assert_eq!(config.typewriter_interval_ms, 15);
        assert_eq!(config.gallery_capacity, 50);
        assert_eq!(config.elements.audio, "soundscape");
        assert_eq!(config, ChronicleConfig { unmute_delay_ms: 350, ..Default::default() });
    }

    #[test]
    fn image_slot_parses_lowercase_names() {
        assert_eq!(ImageSlot::parse("old"), Some(ImageSlot::Old));
        assert_eq!(ImageSlot::parse("modern"), Some(ImageSlot::Modern));
        assert_eq!(ImageSlot::parse("Old"), None);
    }
}
