/// Tab watcher: turns tab lifecycle events into link checks
use crate::classifier::{ClassificationClient, Clock, Transport, Verdict};
use crate::dispatcher::{AlertSink, Dispatch, Dispatcher};
use crate::error::CheckError;
use crate::settings::{self, SettingsStore};
use serde::Deserialize;
use std::cell::Cell;
use std::rc::Rc;

/// Tab lifecycle events forwarded by the background bridge
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TabEvent {
    /// The user switched to an existing tab
    #[serde(rename_all = "camelCase")]
    Activated { tab_id: i32, url: Option<String> },
    /// A tab changed; `status` is `"complete"` once a navigation finished loading
    #[serde(rename_all = "camelCase")]
    Updated {
        tab_id: i32,
        status: Option<String>,
        url: Option<String>,
    },
}

impl TabEvent {
    /// The URL and tab to check, if this event calls for a check
    pub fn target(&self) -> Option<(&str, i32)> {
        let (tab_id, url) = match self {
            TabEvent::Activated { tab_id, url } => (*tab_id, url.as_deref()),
            TabEvent::Updated {
                tab_id,
                status,
                url,
            } => {
                if status.as_deref() != Some("complete") {
                    return None;
                }
                (*tab_id, url.as_deref())
            }
        };

        url.filter(|url| !url.is_empty()).map(|url| (url, tab_id))
    }
}

/// Result of handling one event
#[derive(Debug, Clone, PartialEq)]
pub enum Handled {
    Ignored,
    ProtectionOff,
    Checked(Verdict, Dispatch),
    Failed(CheckError),
}

pub struct Watcher<T, C, S> {
    client: ClassificationClient<T, C>,
    dispatcher: Dispatcher<S>,
    store: Rc<dyn SettingsStore>,
    // None until the stored flag has been read or a toggle arrived
    protection_enabled: Cell<Option<bool>>,
}

impl<T: Transport, C: Clock, S: AlertSink> Watcher<T, C, S> {
    pub fn new(client: ClassificationClient<T, C>, dispatcher: Dispatcher<S>, store: Rc<dyn SettingsStore>) -> Self {
        Watcher {
            client,
            dispatcher,
            store,
            protection_enabled: Cell::new(None),
        }
    }

    /// The flag as last known; `None` before the first event or toggle
    pub fn protection_enabled(&self) -> Option<bool> {
        self.protection_enabled.get()
    }

    pub fn set_protection_enabled(&self, enabled: bool) {
        log::info!("Protection {}", if enabled { "enabled" } else { "disabled" });
        self.protection_enabled.set(Some(enabled));
    }

    /// Resolve the flag, reading the store on first use.
    async fn protection(&self) -> bool {
        if let Some(enabled) = self.protection_enabled.get() {
            return enabled;
        }

        let saved = settings::load_or_default(self.store.as_ref()).await;
        // A toggle that landed while the store was being read wins
        let enabled = self.protection_enabled.get().unwrap_or(saved.protection_enabled);
        self.protection_enabled.set(Some(enabled));
        enabled
    }

    /// Check the tab behind `event` and dispatch alerts if it is distracting.
    ///
    /// Events are independent: nothing here orders or cancels overlapping
    /// checks, so a slow response for a tab the user already left still fires.
    pub async fn handle(&self, event: &TabEvent) -> Handled {
        let Some((url, tab_id)) = event.target() else {
            return Handled::Ignored;
        };

        if !self.protection().await {
            log::debug!("Protection off, skipping {}", url);
            return Handled::ProtectionOff;
        }

        log::info!("Tab {} now at {}", tab_id, url);
        match self.client.check(url).await {
            Ok(verdict) => {
                let dispatch = self.dispatcher.dispatch(&verdict, Some(tab_id));
                Handled::Checked(verdict, dispatch)
            }
            Err(e) => {
                log::error!("Check failed for {}: {}", url, e);
                Handled::Failed(e)
            }
        }
    }
}
