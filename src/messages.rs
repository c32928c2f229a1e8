/// Messages exchanged between the background, popup and content contexts
use serde::{Deserialize, Serialize};

/// Sent to a tab's content script
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ContentMessage {
    #[serde(rename = "SHOW_DISTRACTING_OVERLAY")]
    ShowDistractingOverlay {
        url: String,
        #[serde(rename = "responseTime")]
        response_time: u32,
    },
}

/// Sent from the popup to the background service worker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum BackgroundMessage {
    #[serde(rename = "toggleProtection")]
    ToggleProtection { enabled: bool },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_overlay_message_wire_format() {
        let message = ContentMessage::ShowDistractingOverlay {
            url: "http://example.com/ad".to_string(),
            response_time: 120,
        };

        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({
                "type": "SHOW_DISTRACTING_OVERLAY",
                "url": "http://example.com/ad",
                "responseTime": 120
            })
        );
    }

    #[test]
    fn test_toggle_protection_from_popup() {
        let parsed: BackgroundMessage =
            serde_json::from_value(json!({ "action": "toggleProtection", "enabled": false })).unwrap();

        assert_eq!(parsed, BackgroundMessage::ToggleProtection { enabled: false });
    }

    #[test]
    fn test_unknown_message_is_rejected() {
        let result: Result<ContentMessage, _> =
            serde_json::from_value(json!({ "type": "SOMETHING_ELSE", "url": "x" }));
        assert!(result.is_err());

        let result: Result<BackgroundMessage, _> = serde_json::from_value(json!({ "greeting": "hi" }));
        assert!(result.is_err());
    }
}
