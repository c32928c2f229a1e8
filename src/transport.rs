/// `fetch`-backed transport for the background worker and the popup
use crate::classifier::{HttpReply, Transport};
use crate::error::CheckError;
use async_trait::async_trait;
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(module = "/js/fetch.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn fetchText(url: &str, method: &str, body: Option<String>) -> Result<JsValue, JsValue>;
}

#[derive(Deserialize)]
struct RawReply {
    status: u16,
    body: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

impl FetchTransport {
    async fn send(&self, url: &str, method: &str, body: Option<String>) -> Result<HttpReply, CheckError> {
        let reply_js = fetchText(url, method, body)
            .await
            .map_err(|e| CheckError::Network(js_error_message(&e)))?;

        let raw: RawReply = serde_wasm_bindgen::from_value(reply_js)
            .map_err(|e| CheckError::Decode(format!("{:?}", e)))?;

        Ok(HttpReply {
            status: raw.status,
            body: raw.body,
        })
    }
}

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn get(&self, url: &str) -> Result<HttpReply, CheckError> {
        self.send(url, "GET", None).await
    }

    async fn post_json(&self, url: &str, body: &str) -> Result<HttpReply, CheckError> {
        self.send(url, "POST", Some(body.to_string())).await
    }
}

/// `error.message` for JS `Error`s, the debug form for anything else
pub(crate) fn js_error_message(value: &JsValue) -> String {
    value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{:?}", value))
}
