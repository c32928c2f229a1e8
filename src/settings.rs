/// Persisted user settings and the stores that hold them
use crate::error::StoreError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(module = "/js/storage.js")]
extern "C" {
    fn hasExtensionStorage() -> bool;

    #[wasm_bindgen(catch)]
    async fn syncGet(keys: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn syncSet(items: JsValue) -> Result<(), JsValue>;
}

pub const DARK_MODE_KEY: &str = "darkMode";
pub const PROTECTION_KEY: &str = "protectionEnabled";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub dark_mode: bool,
    pub protection_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            dark_mode: false,
            protection_enabled: true,
        }
    }
}

impl Settings {
    /// Read from a flat string store; absent or unparsable keys keep their defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Settings {
        let defaults = Settings::default();
        let flag = |key: &str, default: bool| {
            lookup(key)
                .and_then(|value| value.parse::<bool>().ok())
                .unwrap_or(default)
        };

        Settings {
            dark_mode: flag(DARK_MODE_KEY, defaults.dark_mode),
            protection_enabled: flag(PROTECTION_KEY, defaults.protection_enabled),
        }
    }

    /// Flat key/value form used by `localStorage`
    pub fn to_pairs(&self) -> [(&'static str, String); 2] {
        [
            (DARK_MODE_KEY, self.dark_mode.to_string()),
            (PROTECTION_KEY, self.protection_enabled.to_string()),
        ]
    }
}

#[async_trait(?Send)]
pub trait SettingsStore {
    fn name(&self) -> &'static str;

    async fn load(&self) -> Result<Settings, StoreError>;

    async fn save(&self, settings: &Settings) -> Result<(), StoreError>;
}

/// `chrome.storage.sync`
#[derive(Debug, Default)]
pub struct ExtensionStore;

#[async_trait(?Send)]
impl SettingsStore for ExtensionStore {
    fn name(&self) -> &'static str {
        "chrome.storage.sync"
    }

    async fn load(&self) -> Result<Settings, StoreError> {
        let keys = serde_wasm_bindgen::to_value(&[DARK_MODE_KEY, PROTECTION_KEY])
            .map_err(|e| StoreError::Serde(format!("{:?}", e)))?;

        let items = syncGet(keys)
            .await
            .map_err(|e| StoreError::Bridge(format!("{:?}", e)))?;

        if items.is_null() || items.is_undefined() {
            return Ok(Settings::default());
        }

        serde_wasm_bindgen::from_value(items).map_err(|e| StoreError::Serde(format!("{:?}", e)))
    }

    async fn save(&self, settings: &Settings) -> Result<(), StoreError> {
        let items = serde_wasm_bindgen::to_value(settings)
            .map_err(|e| StoreError::Serde(format!("{:?}", e)))?;

        syncSet(items)
            .await
            .map_err(|e| StoreError::Bridge(format!("{:?}", e)))
    }
}

/// `window.localStorage`, for when the popup runs outside the extension host
#[derive(Debug, Default)]
pub struct LocalStore;

impl LocalStore {
    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .ok_or(StoreError::Unavailable)?
            .local_storage()
            .map_err(|e| StoreError::Bridge(format!("{:?}", e)))?
            .ok_or(StoreError::Unavailable)
    }
}

#[async_trait(?Send)]
impl SettingsStore for LocalStore {
    fn name(&self) -> &'static str {
        "localStorage"
    }

    async fn load(&self) -> Result<Settings, StoreError> {
        let storage = LocalStore::storage()?;
        Ok(Settings::from_lookup(|key| storage.get_item(key).ok().flatten()))
    }

    async fn save(&self, settings: &Settings) -> Result<(), StoreError> {
        let storage = LocalStore::storage()?;
        for (key, value) in settings.to_pairs() {
            storage
                .set_item(key, &value)
                .map_err(|e| StoreError::Bridge(format!("{:?}", e)))?;
        }
        Ok(())
    }
}

/// Pick the settings store once, at startup
pub fn select_store() -> Rc<dyn SettingsStore> {
    let store: Rc<dyn SettingsStore> = if hasExtensionStorage() {
        Rc::new(ExtensionStore)
    } else {
        Rc::new(LocalStore)
    };
    log::debug!("Settings store: {}", store.name());
    store
}

/// Load settings, falling back to defaults when the store fails
pub async fn load_or_default(store: &dyn SettingsStore) -> Settings {
    match store.load().await {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("Failed to load settings from {}: {}", store.name(), e);
            Settings::default()
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// In-memory stand-in for `localStorage`
    #[derive(Default)]
    pub struct MemoryStore {
        items: RefCell<HashMap<String, String>>,
    }

    impl MemoryStore {
        pub fn holding(settings: Settings) -> Self {
            let items = settings
                .to_pairs()
                .into_iter()
                .map(|(key, value)| (key.to_string(), value))
                .collect();
            MemoryStore {
                items: RefCell::new(items),
            }
        }
    }

    #[async_trait(?Send)]
    impl SettingsStore for MemoryStore {
        fn name(&self) -> &'static str {
            "memory"
        }

        async fn load(&self) -> Result<Settings, StoreError> {
            let items = self.items.borrow();
            Ok(Settings::from_lookup(|key| items.get(key).cloned()))
        }

        async fn save(&self, settings: &Settings) -> Result<(), StoreError> {
            let mut items = self.items.borrow_mut();
            for (key, value) in settings.to_pairs() {
                items.insert(key.to_string(), value);
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::testing::MemoryStore;
    use futures::executor::block_on;

    struct BrokenStore;

    #[async_trait(?Send)]
    impl SettingsStore for BrokenStore {
        fn name(&self) -> &'static str {
            "broken"
        }

        async fn load(&self) -> Result<Settings, StoreError> {
            Err(StoreError::Unavailable)
        }

        async fn save(&self, _settings: &Settings) -> Result<(), StoreError> {
            Err(StoreError::Unavailable)
        }
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(!settings.dark_mode);
        assert!(settings.protection_enabled);
    }

    #[test]
    fn test_dark_mode_survives_fresh_load() {
        let store = MemoryStore::default();
        let mut settings = block_on(store.load()).unwrap();

        settings.dark_mode = !settings.dark_mode;
        block_on(store.save(&settings)).unwrap();

        let reloaded = block_on(load_or_default(&store));
        assert!(reloaded.dark_mode);
        assert_eq!(reloaded, settings);
    }

    #[test]
    fn test_from_lookup_ignores_garbage() {
        let settings = Settings::from_lookup(|key| match key {
            "darkMode" => Some("true".to_string()),
            "protectionEnabled" => Some("yes please".to_string()),
            _ => None,
        });

        assert_eq!(
            settings,
            Settings {
                dark_mode: true,
                protection_enabled: true,
            }
        );
    }

    #[test]
    fn test_sync_storage_shape() {
        let json = serde_json::to_value(Settings {
            dark_mode: true,
            protection_enabled: false,
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({ "darkMode": true, "protectionEnabled": false }));

        // chrome.storage.sync.get returns only the keys that were ever written
        let partial: Settings = serde_json::from_str(r#"{"darkMode": true}"#).unwrap();
        assert!(partial.dark_mode);
        assert!(partial.protection_enabled);
    }

    #[test]
    fn test_load_failure_falls_back_to_defaults() {
        assert_eq!(block_on(load_or_default(&BrokenStore)), Settings::default());
    }
}
