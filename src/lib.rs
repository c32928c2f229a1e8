/// FocusFlow - browser extension that flags distracting sites
/// Built with Rust + WASM + Yew

pub mod classifier;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod messages;
pub mod overlay;
pub mod settings;
pub mod watcher;
pub mod ui;

mod background;
mod chrome;
mod content;
mod transport;

use wasm_bindgen::prelude::*;

// Set up panic hook and logging for every context (worker, page, popup)
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(config::log_level()));
}

// Start the tab watcher in the background service worker
#[wasm_bindgen]
pub fn start_background() {
    background::start();
}

// Start listening for overlay messages in a page
#[wasm_bindgen]
pub fn start_content_script() {
    content::start();
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}
