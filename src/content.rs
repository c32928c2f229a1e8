/// Content script: draws the overlay when the background flags this page
use crate::messages::ContentMessage;
use crate::overlay;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(module = "/js/content.js")]
extern "C" {
    fn onRuntimeMessage(callback: &js_sys::Function);
}

pub fn start() {
    let on_message = Closure::wrap(Box::new(move |message_js: JsValue| {
        match serde_wasm_bindgen::from_value::<ContentMessage>(message_js) {
            Ok(message) => handle(&message),
            Err(e) => log::debug!("Ignoring runtime message: {:?}", e),
        }
    }) as Box<dyn Fn(JsValue)>);

    onRuntimeMessage(on_message.as_ref().unchecked_ref());
    on_message.forget();
}

pub fn handle(message: &ContentMessage) {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        log::warn!("No document to draw the overlay on");
        return;
    };

    match message {
        ContentMessage::ShowDistractingOverlay { url, response_time } => {
            if let Err(e) = overlay::show(&document, url, *response_time) {
                log::error!("Failed to show overlay: {:?}", e);
            }
        }
    }
}
