/// Background service worker: watches tabs and reacts to popup messages
use crate::chrome::ChromeAlertSink;
use crate::classifier::{ClassificationClient, HostClock};
use crate::config::ApiConfig;
use crate::dispatcher::Dispatcher;
use crate::messages::BackgroundMessage;
use crate::settings;
use crate::transport::FetchTransport;
use crate::watcher::{Handled, TabEvent, Watcher};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

#[wasm_bindgen(module = "/js/background.js")]
extern "C" {
    fn onTabEvent(callback: &js_sys::Function);

    fn onRuntimeMessage(callback: &js_sys::Function);
}

type BackgroundWatcher = Watcher<FetchTransport, HostClock, ChromeAlertSink>;

pub fn start() {
    let client = ClassificationClient::new(ApiConfig::from_env(), FetchTransport);
    let watcher = Rc::new(Watcher::new(
        client,
        Dispatcher::new(ChromeAlertSink),
        settings::select_store(),
    ));

    // The bridge queued whatever woke the worker; attaching replays it.
    // Messages go first so a queued toggle applies before queued tab events.
    listen_for_messages(watcher.clone());
    listen_for_tabs(watcher);

    log::info!("Background worker started");
}

fn listen_for_tabs(watcher: Rc<BackgroundWatcher>) {
    let on_event = Closure::wrap(Box::new(move |event_js: JsValue| {
        let event: TabEvent = match serde_wasm_bindgen::from_value(event_js) {
            Ok(event) => event,
            Err(e) => {
                log::warn!("Ignoring malformed tab event: {:?}", e);
                return;
            }
        };

        let watcher = watcher.clone();
        spawn_local(async move {
            if let Handled::Checked(verdict, dispatch) = watcher.handle(&event).await {
                log::debug!("{:?} -> {:?}", verdict, dispatch);
            }
        });
    }) as Box<dyn Fn(JsValue)>);

    onTabEvent(on_event.as_ref().unchecked_ref());
    on_event.forget();
}

fn listen_for_messages(watcher: Rc<BackgroundWatcher>) {
    let on_message = Closure::wrap(Box::new(move |message_js: JsValue| {
        match serde_wasm_bindgen::from_value::<BackgroundMessage>(message_js) {
            Ok(BackgroundMessage::ToggleProtection { enabled }) => {
                watcher.set_protection_enabled(enabled);
            }
            Err(e) => log::debug!("Ignoring runtime message: {:?}", e),
        }
    }) as Box<dyn Fn(JsValue)>);

    onRuntimeMessage(on_message.as_ref().unchecked_ref());
    on_message.forget();
}
