// chronicle_core: Kolkata Chronicle Rust/WASM engine.
// Location selection, story reveal, soundscapes, gallery and map live here; JS is plumbing.

mod assets;
mod audio;
mod content;
mod controller;
mod error;
mod gallery;
mod locations;
mod logging;
mod map;
mod story;
mod typewriter;
mod types;
mod web;
mod year;

use wasm_bindgen::prelude::*;

pub use assets::{
    AssetResolver, FallbackImage, ImageSurface, SoundCategory, FALLBACK_MODERN_IMAGE,
    FALLBACK_OLD_IMAGE,
};
pub use audio::{
    AudioOutput, PendingPlay, PlayFollowUp, PlayRequest, PlaybackBlocked, PlaybackState,
    PlaybackStatus, SoundscapePlayer, UnmuteToken,
};
pub use content::{ContentStore, StoryCard, StoryDetail};
pub use controller::{LocationSelectionController, Selection, Surfaces};
pub use error::ChronicleError;
pub use gallery::{GalleryHistory, DEFAULT_GALLERY_CAPACITY};
pub use locations::{location_options, LocationOption, LOCATIONS};
pub use map::{MapMarker, MapSetup, MapView};
pub use story::compose_story;
pub use typewriter::{RenderToken, TextSurface, Tick, TypewriterRenderer};
pub use types::*;
pub use web::{ChronicleApp, DomAudio, DomImage, DomText};
pub use year::{ImageFilter, YearBand, YearEffect, YEAR_MAX, YEAR_MIN};

/// Initialize panic hook and console logging.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(debug_assertions)]
    logging::init(log::LevelFilter::Debug);
    #[cfg(not(debug_assertions))]
    logging::init(log::LevelFilter::Info);
}

/// Location catalogue as JSON, for building the selector before the app binds.
#[wasm_bindgen]
pub fn locations_json() -> Result<String, JsValue> {
    serde_json::to_string(&location_options())
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locations_json_lists_catalogue() {
        let json = locations_json().unwrap();
        let parsed: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), LOCATIONS.len());
        assert_eq!(parsed[1]["key"], "howrah bridge");
        assert_eq!(parsed[1]["title"], "Howrah Bridge");
    }
}
