//! Overlay rendering against a real DOM.
//! Run with `wasm-pack test --headless --chrome`.
#![cfg(target_arch = "wasm32")]

use focus_flow::overlay::{self, OVERLAY_ID};
use wasm_bindgen_test::*;
use web_sys::Document;

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn clear_overlay(document: &Document) {
    if let Some(existing) = document.get_element_by_id(OVERLAY_ID) {
        existing.remove();
    }
}

fn overlay_count(document: &Document) -> u32 {
    document
        .query_selector_all(&format!("#{}", OVERLAY_ID))
        .unwrap()
        .length()
}

#[wasm_bindgen_test]
fn test_overlay_created_once() {
    let document = document();
    clear_overlay(&document);

    assert!(overlay::show(&document, "http://example.com/ad", 120).unwrap());
    assert!(!overlay::show(&document, "http://example.com/ad", 120).unwrap());

    assert_eq!(overlay_count(&document), 1);
}

#[wasm_bindgen_test]
fn test_overlay_shows_url_and_response_time() {
    let document = document();
    clear_overlay(&document);

    overlay::show(&document, "http://example.com/ad", 120).unwrap();

    let text = document
        .get_element_by_id(OVERLAY_ID)
        .unwrap()
        .text_content()
        .unwrap();
    assert!(text.contains("http://example.com/ad"));
    assert!(text.contains("120ms"));
}

#[wasm_bindgen_test]
fn test_overlay_url_is_not_markup() {
    let document = document();
    clear_overlay(&document);

    overlay::show(&document, "<img id=\"injected\" src=x>", 5).unwrap();

    assert!(document.get_element_by_id("injected").is_none());
}
