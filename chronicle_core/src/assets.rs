// Asset path derivation for imagery and soundscapes, plus the image fallback policy.

use serde::{Deserialize, Serialize};

use crate::types::{ImagePair, ImageSlot, LocationKey};

pub const FALLBACK_OLD_IMAGE: &str = "/assets/fallback/historical.jpg";
pub const FALLBACK_MODERN_IMAGE: &str = "/assets/fallback/modern.jpg";

/// Ambient soundscape families. Each maps to one audio file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundCategory {
    Train,
    River,
    Streets,
    Tram,
    Dhaak,
}

impl SoundCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundCategory::Train => "train",
            SoundCategory::River => "river",
            SoundCategory::Streets => "streets",
            SoundCategory::Tram => "tram",
            SoundCategory::Dhaak => "dhaak",
        }
    }

    pub fn url(&self) -> String {
        format!("/sounds/{}.mp3", self.as_str())
    }
}

const SOUND_MAP: [(&str, SoundCategory); 24] = [
    ("sealdah", SoundCategory::Train),
    ("howrah bridge", SoundCategory::River),
    ("gariahat", SoundCategory::Streets),
    ("esplanade", SoundCategory::Tram),
    ("park street", SoundCategory::Streets),
    ("college street", SoundCategory::Streets),
    ("dhakhineswar", SoundCategory::Dhaak),
    ("princep ghat", SoundCategory::River),
    ("ganga ghat", SoundCategory::River),
    ("kalighat", SoundCategory::Dhaak),
    ("shobhabazar", SoundCategory::Dhaak),
    ("jorasanko", SoundCategory::Streets),
    ("tram depot", SoundCategory::Tram),
    ("victoria", SoundCategory::Tram),
    ("kumartuli", SoundCategory::Streets),
    ("borobazar", SoundCategory::Streets),
    ("dalhousie", SoundCategory::Tram),
    ("cathedral", SoundCategory::Tram),
    ("belur math", SoundCategory::River),
    ("fort william", SoundCategory::Streets),
    ("indian museum", SoundCategory::Streets),
    ("indian coffee house", SoundCategory::Streets),
    ("metcalfe hall", SoundCategory::Tram),
    ("shaheed minar", SoundCategory::Tram),
];

/// Derives asset URLs from a location key. Total over all keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssetResolver;

impl AssetResolver {
    pub fn new() -> Self {
        AssetResolver
    }

    pub fn resolve_images(&self, key: &LocationKey) -> ImagePair {
        let slug = key.slug();
        ImagePair {
            old: format!("/assets/locations/{}_old.jpg", slug),
            modern: format!("/assets/locations/{}_modern.jpg", slug),
        }
    }

    /// Soundscape category for a key; unmapped keys fall back to streets.
    pub fn sound_category(&self, key: &LocationKey) -> SoundCategory {
        SOUND_MAP
            .iter()
            .find(|(name, _)| *name == key.as_str())
            .map(|(_, category)| *category)
            .unwrap_or(SoundCategory::Streets)
    }

    pub fn resolve_audio(&self, key: &LocationKey) -> String {
        self.sound_category(key).url()
    }

    pub fn fallback_for(&self, slot: ImageSlot) -> &'static str {
        match slot {
            ImageSlot::Old => FALLBACK_OLD_IMAGE,
            ImageSlot::Modern => FALLBACK_MODERN_IMAGE,
        }
    }
}

/// Narrow view of a displayed image element.
pub trait ImageSurface {
    fn set_source(&mut self, url: &str);
    /// Apply a CSS filter expression (`"none"` clears it).
    fn set_filter(&mut self, filter: &str);
}

/// Where a displayed image currently stands in the fallback policy.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ImageSource {
    Empty,
    Primary(String),
    Fallback,
}

/// An image surface with its load-failure policy attached.
/// A failed primary is replaced by the fallback exactly once; a failing
/// fallback is terminal.
pub struct FallbackImage<S: ImageSurface> {
    surface: S,
    fallback: &'static str,
    source: ImageSource,
}

impl<S: ImageSurface> FallbackImage<S> {
    pub fn new(surface: S, fallback: &'static str) -> Self {
        FallbackImage {
            surface,
            fallback,
            source: ImageSource::Empty,
        }
    }

    pub fn show(&mut self, url: &str) {
        self.source = ImageSource::Primary(url.to_string());
        self.surface.set_source(url);
    }

    /// Report a load failure. Returns `true` if the fallback was substituted.
    pub fn load_failed(&mut self) -> bool {
        match &self.source {
            ImageSource::Primary(url) => {
                log::debug!("Image '{}' failed to load, using '{}'", url, self.fallback);
                self.source = ImageSource::Fallback;
                self.surface.set_source(self.fallback);
                true
            }
            ImageSource::Fallback | ImageSource::Empty => false,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == ImageSource::Fallback
    }

    /// URL of whatever is currently displayed.
    pub fn current_source(&self) -> Option<&str> {
        match &self.source {
            ImageSource::Empty => None,
            ImageSource::Primary(url) => Some(url.as_str()),
            ImageSource::Fallback => Some(self.fallback),
        }
    }

    pub fn set_filter(&mut self, filter: &str) {
        self.surface.set_filter(filter);
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}
