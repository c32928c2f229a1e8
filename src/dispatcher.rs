/// Notification dispatcher: side effects of a distracting verdict
use crate::classifier::Verdict;
use crate::messages::ContentMessage;
use serde::Serialize;

pub const NOTIFICATION_ID: &str = "distractingNotification";
pub const NOTIFICATION_TITLE: &str = "Distracting Tab Detected";
/// Packaged icon; the bridge resolves it against the extension root
pub const NOTIFICATION_ICON: &str = "icons/icon128.png";

/// Options for `chrome.notifications.create`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(rename = "type")]
    pub kind: String,
    pub icon_url: String,
    pub title: String,
    pub message: String,
    pub priority: u8,
}

impl Notification {
    pub fn for_verdict(verdict: &Verdict) -> Notification {
        Notification {
            kind: "basic".to_string(),
            icon_url: NOTIFICATION_ICON.to_string(),
            title: NOTIFICATION_TITLE.to_string(),
            message: format!(
                "The URL {} is distracting! (Response Time: {}ms)",
                verdict.url, verdict.elapsed_ms
            ),
            priority: 2,
        }
    }
}

/// Where alerts go. Every call is fire-and-forget.
pub trait AlertSink {
    fn notifications_available(&self) -> bool;

    fn notify(&self, id: &str, notification: &Notification) -> Result<(), String>;

    fn send_to_tab(&self, tab_id: i32, message: &ContentMessage) -> Result<(), String>;
}

/// What a dispatch actually did
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Dispatch {
    pub notified: bool,
    pub overlay_sent: bool,
}

pub struct Dispatcher<S> {
    sink: S,
}

impl<S: AlertSink> Dispatcher<S> {
    pub fn new(sink: S) -> Self {
        Dispatcher { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Raise a notification and/or an overlay for a distracting verdict.
    /// Clear verdicts do nothing.
    pub fn dispatch(&self, verdict: &Verdict, tab_id: Option<i32>) -> Dispatch {
        let mut dispatch = Dispatch::default();
        if !verdict.distracting {
            return dispatch;
        }

        if self.sink.notifications_available() {
            let notification = Notification::for_verdict(verdict);
            match self.sink.notify(NOTIFICATION_ID, &notification) {
                Ok(()) => {
                    log::info!("Notification sent for distracting URL: {}", verdict.url);
                    dispatch.notified = true;
                }
                Err(e) => log::error!("Failed to create notification: {}", e),
            }
        } else {
            log::warn!(
                "Distracting URL detected: {} (notifications API not available)",
                verdict.url
            );
        }

        if let Some(tab_id) = tab_id {
            let message = ContentMessage::ShowDistractingOverlay {
                url: verdict.url.clone(),
                response_time: verdict.elapsed_ms,
            };
            match self.sink.send_to_tab(tab_id, &message) {
                Ok(()) => dispatch.overlay_sent = true,
                Err(e) => log::warn!("Failed to message tab {}: {}", tab_id, e),
            }
        }

        dispatch
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    pub struct RecordingSink {
        pub no_notifications: bool,
        pub fail_tab_messages: bool,
        pub notifications: RefCell<Vec<(String, Notification)>>,
        pub tab_messages: RefCell<Vec<(i32, ContentMessage)>>,
    }

    impl AlertSink for RecordingSink {
        fn notifications_available(&self) -> bool {
            !self.no_notifications
        }

        fn notify(&self, id: &str, notification: &Notification) -> Result<(), String> {
            self.notifications
                .borrow_mut()
                .push((id.to_string(), notification.clone()));
            Ok(())
        }

        fn send_to_tab(&self, tab_id: i32, message: &ContentMessage) -> Result<(), String> {
            if self.fail_tab_messages {
                return Err("Could not establish connection. Receiving end does not exist.".to_string());
            }
            self.tab_messages.borrow_mut().push((tab_id, message.clone()));
            Ok(())
        }
    }
}
