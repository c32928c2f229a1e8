/// Rust side of the chrome.* bridge used by the background worker and the popup
use crate::dispatcher::{AlertSink, Notification};
use crate::messages::{BackgroundMessage, ContentMessage};
use crate::transport::js_error_message;
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(module = "/js/chrome.js")]
extern "C" {
    fn hasNotifications() -> bool;

    fn hasTabs() -> bool;

    #[wasm_bindgen(catch)]
    fn createNotification(id: &str, options: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    fn sendTabMessage(tab_id: i32, message: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn getActiveTab() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn closeTab(tab_id: i32) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    fn closeWindow() -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn sendRuntimeMessage(message: JsValue) -> Result<(), JsValue>;
}

/// The tab the user is looking at
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ActiveTab {
    pub id: i32,
    pub url: Option<String>,
}

/// What the "close tab" choice in the popup acts on
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CloseTarget {
    Tab(i32),
    PopupWindow,
}

/// Alerts through `chrome.notifications` and `chrome.tabs.sendMessage`
#[derive(Debug, Clone, Copy, Default)]
pub struct ChromeAlertSink;

impl AlertSink for ChromeAlertSink {
    fn notifications_available(&self) -> bool {
        hasNotifications()
    }

    fn notify(&self, id: &str, notification: &Notification) -> Result<(), String> {
        let options = serde_wasm_bindgen::to_value(notification).map_err(|e| format!("{:?}", e))?;
        createNotification(id, options).map_err(|e| js_error_message(&e))
    }

    fn send_to_tab(&self, tab_id: i32, message: &ContentMessage) -> Result<(), String> {
        if !hasTabs() {
            return Err("tabs API not available".to_string());
        }
        let message = serde_wasm_bindgen::to_value(message).map_err(|e| format!("{:?}", e))?;
        sendTabMessage(tab_id, message).map_err(|e| js_error_message(&e))
    }
}

/// Active tab of the current window, `None` outside the extension host
pub async fn active_tab() -> Result<Option<ActiveTab>, String> {
    if !hasTabs() {
        return Ok(None);
    }

    let tab_js = getActiveTab().await.map_err(|e| js_error_message(&e))?;
    if tab_js.is_null() || tab_js.is_undefined() {
        return Ok(None);
    }

    serde_wasm_bindgen::from_value(tab_js)
        .map(Some)
        .map_err(|e| format!("Failed to parse tab: {:?}", e))
}

/// Close the target tab; the popup window when there is none or no tabs API
pub async fn close_tab_or_window(target: CloseTarget) -> Result<(), String> {
    match target {
        CloseTarget::Tab(tab_id) if hasTabs() => closeTab(tab_id).await.map_err(|e| js_error_message(&e)),
        _ => closeWindow().map_err(|e| js_error_message(&e)),
    }
}

pub async fn send_to_background(message: &BackgroundMessage) -> Result<(), String> {
    let message = serde_wasm_bindgen::to_value(message).map_err(|e| format!("{:?}", e))?;
    sendRuntimeMessage(message).await.map_err(|e| js_error_message(&e))
}
