// Location selection: the one entry point for the selector, the quick-select
// shortcuts and the map popups. Drives images, story, soundscape and gallery in
// that order; each step handles its own failures.

use crate::assets::{AssetResolver, FallbackImage, ImageSurface, SoundCategory};
use crate::audio::{AudioOutput, PendingPlay, SoundscapePlayer};
use crate::content::ContentStore;
use crate::error::ChronicleError;
use crate::gallery::GalleryHistory;
use crate::map::MapView;
use crate::story::compose_story;
use crate::typewriter::{RenderToken, TextSurface, TypewriterRenderer};
use crate::types::{ChronicleConfig, ImagePair, ImageSlot, LocationKey};
use crate::year::YearEffect;

/// Surfaces the controller writes to.
pub struct Surfaces<I, T, A> {
    pub old_image: I,
    pub modern_image: I,
    pub story_text: T,
    pub audio: A,
}

/// Everything a selection started that the caller has to drive further.
#[derive(Debug)]
pub struct Selection<P> {
    pub key: LocationKey,
    pub images: ImagePair,
    pub category: SoundCategory,
    /// Tick the typewriter with this token until it stops.
    pub render: RenderToken,
    /// Await this and report back via the player.
    pub play: PendingPlay<P>,
}

pub struct LocationSelectionController<I: ImageSurface, T: TextSurface, A: AudioOutput> {
    content: ContentStore,
    resolver: AssetResolver,
    old_image: FallbackImage<I>,
    modern_image: FallbackImage<I>,
    typewriter: TypewriterRenderer<T>,
    player: SoundscapePlayer<A>,
    gallery: GalleryHistory,
    map: MapView,
    current: Option<LocationKey>,
    year: Option<YearEffect>,
}

impl<I: ImageSurface, T: TextSurface, A: AudioOutput> LocationSelectionController<I, T, A> {
    pub fn new(config: &ChronicleConfig, surfaces: Surfaces<I, T, A>) -> Self {
        let resolver = AssetResolver::new();
        LocationSelectionController {
            content: ContentStore::new(),
            old_image: FallbackImage::new(
                surfaces.old_image,
                resolver.fallback_for(ImageSlot::Old),
            ),
            modern_image: FallbackImage::new(
                surfaces.modern_image,
                resolver.fallback_for(ImageSlot::Modern),
            ),
            typewriter: TypewriterRenderer::new(
                surfaces.story_text,
                config.typewriter_interval_ms,
            ),
            player: SoundscapePlayer::new(
                surfaces.audio,
                config.initial_volume,
                config.initial_loop,
                config.unmute_delay_ms,
            ),
            gallery: GalleryHistory::new(config.gallery_capacity),
            map: MapView::new(),
            resolver,
            current: None,
            year: None,
        }
    }

    /// Install the loaded content. Selections made before this show the
    /// placeholder story.
    pub fn set_content(&mut self, content: ContentStore) {
        self.content = content;
    }

    /// Show `raw` as the current location.
    pub fn select(&mut self, raw: &str) -> Result<Selection<A::Pending>, ChronicleError> {
        let key = LocationKey::parse(raw).ok_or(ChronicleError::MissingSelection)?;
        log::debug!("Selecting location '{}'", key);

        let images = self.resolver.resolve_images(&key);
        self.old_image.show(&images.old);
        self.modern_image.show(&images.modern);

        let story = compose_story(&key, self.content.get(&key));
        let render = self.typewriter.render(&story);

        let category = self.player.category_for(&key);
        let play = self.player.play_for_location(&key);

        self.gallery.push(&images);
        self.current = Some(key.clone());

        Ok(Selection {
            key,
            images,
            category,
            render,
            play,
        })
    }

    /// Popup action on a map marker. Names outside the map table are
    /// rejected without touching any panel.
    pub fn activate_marker(&mut self, marker: &str) -> Result<Selection<A::Pending>, ChronicleError> {
        if LocationKey::parse(marker).is_none() {
            return Err(ChronicleError::MissingSelection);
        }
        let key = self
            .map
            .activate(marker)
            .ok_or_else(|| ChronicleError::UnknownMarker(marker.trim().to_string()))?;
        self.select(key.as_str())
    }

    /// Apply the era filters for `year` to both displayed images.
    pub fn apply_year(&mut self, year: i32) -> YearEffect {
        let effect = YearEffect::for_year(year);
        self.old_image.set_filter(&effect.old.to_css());
        self.modern_image.set_filter(&effect.modern.to_css());
        self.year = Some(effect);
        effect
    }

    /// An image reported a load error. Returns `true` if the fallback was shown.
    pub fn image_failed(&mut self, slot: ImageSlot) -> bool {
        match slot {
            ImageSlot::Old => self.old_image.load_failed(),
            ImageSlot::Modern => self.modern_image.load_failed(),
        }
    }

    pub fn current(&self) -> Option<&LocationKey> {
        self.current.as_ref()
    }

    pub fn year(&self) -> Option<&YearEffect> {
        self.year.as_ref()
    }

    pub fn content(&self) -> &ContentStore {
        &self.content
    }

    pub fn gallery(&self) -> &GalleryHistory {
        &self.gallery
    }

    pub fn map(&self) -> &MapView {
        &self.map
    }

    pub fn typewriter(&self) -> &TypewriterRenderer<T> {
        &self.typewriter
    }

    pub fn typewriter_mut(&mut self) -> &mut TypewriterRenderer<T> {
        &mut self.typewriter
    }

    pub fn player(&self) -> &SoundscapePlayer<A> {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut SoundscapePlayer<A> {
        &mut self.player
    }

    pub fn old_image(&self) -> &FallbackImage<I> {
        &self.old_image
    }

    pub fn modern_image(&self) -> &FallbackImage<I> {
        &self.modern_image
    }
}
