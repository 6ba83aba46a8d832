// Browser bindings: DOM-backed surfaces and the ChronicleApp facade exposed to JS.
// JS forwards events here; timers and playback promises are driven from this side.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_net::http::Request;
use gloo_timers::callback::{Interval, Timeout};
use js_sys::Promise;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{future_to_promise, spawn_local, JsFuture};
use web_sys::{
    HtmlAudioElement, HtmlElement, HtmlImageElement, ScrollBehavior, ScrollIntoViewOptions,
};

use crate::assets::ImageSurface;
use crate::audio::{AudioOutput, PendingPlay, PlayFollowUp, PlaybackBlocked};
use crate::content::ContentStore;
use crate::controller::{LocationSelectionController, Selection, Surfaces};
use crate::error::ChronicleError;
use crate::typewriter::{RenderToken, TextSurface};
use crate::types::{ChronicleConfig, ImageSlot, LocationKey};

/// `<img>` element.
pub struct DomImage(HtmlImageElement);

impl ImageSurface for DomImage {
    fn set_source(&mut self, url: &str) {
        self.0.set_src(url);
    }

    fn set_filter(&mut self, filter: &str) {
        let _ = self.0.style().set_property("filter", filter);
    }
}

/// Story text element. Keeps its own copy of the text to avoid reading the DOM back.
pub struct DomText {
    element: HtmlElement,
    text: String,
}

impl TextSurface for DomText {
    fn clear(&mut self) {
        self.text.clear();
        self.element.set_text_content(Some(""));
    }

    fn append(&mut self, ch: char) {
        self.text.push(ch);
        self.element.set_text_content(Some(&self.text));
    }
}

/// `<audio>` element.
pub struct DomAudio(HtmlAudioElement);

impl AudioOutput for DomAudio {
    type Pending = Option<Promise>;

    fn pause(&mut self) {
        let _ = self.0.pause();
    }

    fn set_source(&mut self, url: &str) {
        self.0.set_src(url);
    }

    fn rewind(&mut self) {
        self.0.set_current_time(0.0);
    }

    fn set_loop(&mut self, looping: bool) {
        self.0.set_loop(looping);
    }

    fn set_volume(&mut self, volume: f32) {
        self.0.set_volume(f64::from(volume));
    }

    fn set_muted(&mut self, muted: bool) {
        self.0.set_muted(muted);
    }

    fn play(&mut self) -> Self::Pending {
        self.0.play().ok()
    }
}

type DomController = LocationSelectionController<DomImage, DomText, DomAudio>;

struct AppState {
    controller: DomController,
    story_timer: Option<Interval>,
    unmute_timer: Option<Timeout>,
}

/// Page-level engine handle.
#[wasm_bindgen]
pub struct ChronicleApp {
    state: Rc<RefCell<AppState>>,
    config: ChronicleConfig,
}

#[wasm_bindgen]
impl ChronicleApp {
    /// Bind to the page. `config_json` may be empty for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<ChronicleApp, JsValue> {
        let config = parse_config(config_json).map_err(to_js)?;
        let ids = &config.elements;

        let surfaces = Surfaces {
            old_image: DomImage(element_by_id(&ids.old_image)?),
            modern_image: DomImage(element_by_id(&ids.modern_image)?),
            story_text: DomText {
                element: element_by_id(&ids.story_text)?,
                text: String::new(),
            },
            audio: DomAudio(element_by_id(&ids.audio)?),
        };

        let controller = LocationSelectionController::new(&config, surfaces);
        Ok(ChronicleApp {
            state: Rc::new(RefCell::new(AppState {
                controller,
                story_timer: None,
                unmute_timer: None,
            })),
            config,
        })
    }

    /// Fetch the content file. Resolves with the number of records; a failed
    /// fetch resolves with 0 and leaves the store empty.
    pub fn load_content(&self) -> Promise {
        let state = Rc::clone(&self.state);
        let url = self.config.content_url.clone();
        future_to_promise(async move {
            let store = match fetch_text(&url).await {
                Ok(body) => ContentStore::from_json_or_empty(&body),
                Err(e) => {
                    log::warn!("Fetching {} failed: {}", url, e);
                    ContentStore::new()
                }
            };
            let count = store.len();
            state.borrow_mut().controller.set_content(store);
            Ok(JsValue::from(count as u32))
        })
    }

    /// Generate/apply action. Returns `false` (after prompting) when nothing is selected.
    pub fn select(&self, key: &str) -> bool {
        let result = self.state.borrow_mut().controller.select(key);
        self.finish_selection(result)
    }

    /// Quick-select shortcut: select, then scroll the viewer into view.
    pub fn quick_select(&self, key: &str) -> bool {
        let selected = self.select(key);
        if selected {
            self.scroll_to_viewer();
        }
        selected
    }

    /// "Open Time Travel" action in a map popup.
    pub fn activate_marker(&self, marker: &str) -> bool {
        let result = self.state.borrow_mut().controller.activate_marker(marker);
        let selected = self.finish_selection(result);
        if selected {
            self.scroll_to_viewer();
        }
        selected
    }

    /// Apply the year filters; returns the effect as JSON.
    pub fn set_year(&self, year: i32) -> Result<String, JsValue> {
        let effect = self.state.borrow_mut().controller.apply_year(year);
        serde_json::to_string(&effect)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Image `onerror` hook. `slot` is `"old"` or `"modern"`.
    pub fn image_failed(&self, slot: &str) -> bool {
        match ImageSlot::parse(slot) {
            Some(slot) => self.state.borrow_mut().controller.image_failed(slot),
            None => false,
        }
    }

    /// Returns the new play/pause button label.
    pub fn toggle_play_pause(&self) -> String {
        let pending = self.state.borrow_mut().controller.player_mut().toggle_play_pause();
        if let Some(pending) = pending {
            await_play(Rc::clone(&self.state), pending);
        }
        self.play_pause_label()
    }

    /// Returns the new mute button label.
    pub fn toggle_mute(&self) -> String {
        let mut state = self.state.borrow_mut();
        let player = state.controller.player_mut();
        player.toggle_mute();
        player.mute_label().to_string()
    }

    pub fn set_volume(&self, volume: f32) {
        self.state.borrow_mut().controller.player_mut().set_volume(volume);
    }

    pub fn set_loop(&self, looping: bool) {
        self.state.borrow_mut().controller.player_mut().set_loop(looping);
    }

    pub fn play_pause_label(&self) -> String {
        self.state.borrow().controller.player().play_pause_label().to_string()
    }

    pub fn mute_label(&self) -> String {
        self.state.borrow().controller.player().mute_label().to_string()
    }

    pub fn playback_state_json(&self) -> Result<String, JsValue> {
        to_json(self.state.borrow().controller.player().state())
    }

    pub fn gallery_json(&self) -> Result<String, JsValue> {
        to_json(&self.state.borrow().controller.gallery().to_vec())
    }

    pub fn story_cards_json(&self) -> Result<String, JsValue> {
        to_json(&self.state.borrow().controller.content().story_cards())
    }

    /// Modal content for a story card, or `undefined` for unknown keys.
    pub fn story_detail_json(&self, key: &str) -> Result<Option<String>, JsValue> {
        let Some(key) = LocationKey::parse(key) else {
            return Ok(None);
        };
        self.state
            .borrow()
            .controller
            .content()
            .story_detail(&key)
            .map(|detail| to_json(&detail))
            .transpose()
    }

    pub fn map_setup_json(&self) -> Result<String, JsValue> {
        to_json(&self.state.borrow().controller.map().setup())
    }
}

impl ChronicleApp {
    fn finish_selection(
        &self,
        result: Result<Selection<Option<Promise>>, ChronicleError>,
    ) -> bool {
        match result {
            Ok(selection) => {
                start_typewriter(&self.state, selection.render);
                await_play(Rc::clone(&self.state), selection.play);
                true
            }
            Err(ChronicleError::MissingSelection) => {
                if let Some(window) = web_sys::window() {
                    let _ = window.alert_with_message(&ChronicleError::MissingSelection.to_string());
                }
                false
            }
            Err(e) => {
                log::warn!("Selection ignored: {}", e);
                false
            }
        }
    }

    fn scroll_to_viewer(&self) {
        let Some(target) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(&self.config.scroll_target_id))
        else {
            return;
        };
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        target.scroll_into_view_with_scroll_into_view_options(&options);
    }
}

fn start_typewriter(state: &Rc<RefCell<AppState>>, token: RenderToken) {
    let interval_ms = state.borrow().controller.typewriter().interval_ms();
    let weak = Rc::downgrade(state);
    let interval = Interval::new(interval_ms, move || tick_typewriter(&weak, token));
    // Replacing the handle cancels the previous reveal's timer.
    state.borrow_mut().story_timer = Some(interval);
}

fn tick_typewriter(state: &Weak<RefCell<AppState>>, token: RenderToken) {
    let Some(state) = state.upgrade() else {
        return;
    };
    let mut state = state.borrow_mut();
    if !state.controller.typewriter_mut().tick(token).should_stop() {
        return;
    }
    if state.controller.typewriter().is_current(token) {
        if let Some(timer) = state.story_timer.take() {
            // Still inside this timer's callback; release the closure on a later turn.
            let closure = timer.cancel();
            let _ = Timeout::new(0, move || drop(closure)).forget();
        }
    }
}

fn await_play(state: Rc<RefCell<AppState>>, play: PendingPlay<Option<Promise>>) {
    spawn_local(async move {
        let outcome = match play.pending {
            Some(promise) => JsFuture::from(promise)
                .await
                .map(|_| ())
                .map_err(|_| PlaybackBlocked),
            None => Err(PlaybackBlocked),
        };

        let follow_up = state
            .borrow_mut()
            .controller
            .player_mut()
            .play_resolved(play.request, outcome);

        match follow_up {
            PlayFollowUp::Retry(retry) => await_play(state, retry),
            PlayFollowUp::ScheduleUnmute { token, delay_ms } => {
                let weak = Rc::downgrade(&state);
                let timeout = Timeout::new(delay_ms, move || {
                    if let Some(state) = weak.upgrade() {
                        state.borrow_mut().controller.player_mut().unmute_elapsed(token);
                    }
                });
                state.borrow_mut().unmute_timer = Some(timeout);
            }
            PlayFollowUp::Nothing | PlayFollowUp::GaveUp => {}
        }
    });
}

async fn fetch_text(url: &str) -> Result<String, gloo_net::Error> {
    let response = Request::get(url).send().await?;
    if !response.ok() {
        return Err(gloo_net::Error::GlooError(format!(
            "HTTP {} {}",
            response.status(),
            response.status_text()
        )));
    }
    response.text().await
}

fn element_by_id<T: JsCast>(id: &str) -> Result<T, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
        .ok_or_else(|| JsValue::from_str(&format!("Missing element #{}", id)))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("Element #{} has the wrong type", id)))
}

/// Empty input selects the defaults.
pub(crate) fn parse_config(config_json: &str) -> Result<ChronicleConfig, ChronicleError> {
    if config_json.trim().is_empty() {
        return Ok(ChronicleConfig::default());
    }
    serde_json::from_str(config_json).map_err(|e| ChronicleError::InvalidConfig(e.to_string()))
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn to_js(err: ChronicleError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
