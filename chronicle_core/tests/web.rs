//! Browser tests for the DOM bindings. Run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use chronicle_core::ChronicleApp;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlImageElement;

wasm_bindgen_test_configure!(run_in_browser);

fn mount(tag: &str, id: &str) {
    let document = web_sys::window().unwrap().document().unwrap();
    if document.get_element_by_id(id).is_some() {
        return;
    }
    let element = document.create_element(tag).unwrap();
    element.set_id(id);
    document.body().unwrap().append_child(&element).unwrap();
}

fn app() -> ChronicleApp {
    mount("img", "oldImg");
    mount("img", "modernImg");
    mount("div", "storyText");
    mount("audio", "soundscape");
    ChronicleApp::new("").unwrap()
}

fn image(id: &str) -> HtmlImageElement {
    web_sys::window()
        .unwrap()
        .document()
        .unwrap()
        .get_element_by_id(id)
        .unwrap()
        .dyn_into()
        .unwrap()
}

#[wasm_bindgen_test]
fn select_sets_image_sources() {
    let app = app();
    assert!(app.select("Park Street"));
    assert!(image("oldImg").src().ends_with("/assets/locations/park_street_old.jpg"));
    assert!(image("modernImg").src().ends_with("/assets/locations/park_street_modern.jpg"));
    let gallery: Vec<String> = serde_json::from_str(&app.gallery_json().unwrap()).unwrap();
    assert_eq!(gallery.len(), 2);
}

#[wasm_bindgen_test]
fn image_failure_switches_to_fallback_once() {
    let app = app();
    app.select("kumartuli");
    assert!(app.image_failed("old"));
    assert!(!app.image_failed("old"));
    assert!(image("oldImg").src().ends_with("/assets/fallback/historical.jpg"));
}

#[wasm_bindgen_test]
fn year_filter_is_written_to_style() {
    let app = app();
    app.select("dalhousie");
    app.set_year(1930).unwrap();
    let filter = image("oldImg")
        .style()
        .get_property_value("filter")
        .unwrap();
    assert!(filter.contains("sepia"));
}

#[wasm_bindgen_test]
fn mute_toggle_updates_label() {
    let app = app();
    assert_eq!(app.toggle_mute(), "🔇 Unmute");
    assert_eq!(app.toggle_mute(), "🔈 Mute");
}

#[wasm_bindgen_test]
async fn unreachable_content_resolves_to_empty_store() {
    app();
    let app = ChronicleApp::new(r#"{"content_url": "/no-such-content.json"}"#).unwrap();
    let count = wasm_bindgen_futures::JsFuture::from(app.load_content())
        .await
        .unwrap();
    assert_eq!(count.as_f64(), Some(0.0));
    let cards: Vec<serde_json::Value> =
        serde_json::from_str(&app.story_cards_json().unwrap()).unwrap();
    assert!(cards.is_empty());
}

#[wasm_bindgen_test]
fn unknown_marker_leaves_page_untouched() {
    let app = app();
    assert!(app.select("sealdah"));
    assert!(!app.activate_marker("Nowhere"));
    assert!(image("oldImg").src().ends_with("/assets/locations/sealdah_old.jpg"));
}

#[wasm_bindgen_test]
fn every_selection_path_reports_pause_label() {
    let app = app();
    assert!(app.quick_select("kalighat"));
    assert_eq!(app.play_pause_label(), "⏸ Pause");
    app.toggle_play_pause();
    assert!(app.activate_marker("Sealdah"));
    assert_eq!(app.play_pause_label(), "⏸ Pause");
}
