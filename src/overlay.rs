/// Full-page overlay drawn by the content script over a distracting site
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

pub const OVERLAY_ID: &str = "distracting-overlay";

const OVERLAY_STYLE: &str = "position: fixed; top: 0; left: 0; width: 100vw; height: 100vh; \
    background-color: rgba(0, 0, 0, 0.9); z-index: 999999; display: flex; \
    align-items: center; justify-content: center; color: white; font-size: 24px; \
    text-align: center; padding: 20px; box-sizing: border-box;";

/// Append the overlay to `document.body` unless one is already shown.
///
/// Returns `true` when a new overlay was created. There is no removal path:
/// the overlay goes away with the page.
pub fn show(document: &Document, url: &str, response_time: u32) -> Result<bool, JsValue> {
    if document.get_element_by_id(OVERLAY_ID).is_some() {
        log::debug!("Overlay already shown");
        return Ok(false);
    }

    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;

    let overlay = document.create_element("div")?;
    overlay.set_id(OVERLAY_ID);
    overlay.set_attribute("style", OVERLAY_STYLE)?;

    let content = document.create_element("div")?;

    // URL goes in as text so a crafted address cannot inject markup
    let headline = document.create_element("p")?;
    headline.append_with_str_1("This site ")?;
    let strong = document.create_element("strong")?;
    strong.set_text_content(Some(url));
    headline.append_child(&strong)?;
    headline.append_with_str_1(" has been detected as distracting!")?;
    content.append_child(&headline)?;

    let timing = paragraph(document, &format!("(Response Time: {}ms)", response_time), None)?;
    content.append_child(&timing)?;

    let hint = paragraph(document, "Switch tabs to dismiss this overlay.", Some("font-size: 16px;"))?;
    content.append_child(&hint)?;

    overlay.append_child(&content)?;
    body.append_child(&overlay)?;

    log::info!("Overlay shown for {}", url);
    Ok(true)
}

fn paragraph(document: &Document, text: &str, style: Option<&str>) -> Result<Element, JsValue> {
    let p = document.create_element("p")?;
    p.set_text_content(Some(text));
    if let Some(style) = style {
        p.set_attribute("style", style)?;
    }
    Ok(p)
}
