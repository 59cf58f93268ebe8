//! JSON values in key-value storage

use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::platform::KeyValueStorage;

/// Typed view over raw storage. Never fails the caller: unreadable or
/// corrupt entries read as `None`, rejected writes return `false`.
#[derive(Clone)]
pub struct LocalStore {
    storage: Rc<dyn KeyValueStorage>,
}

impl LocalStore {
    pub fn new(storage: Rc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let json = match self.storage.get_item(key) {
            Ok(Some(json)) => json,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("Could not read {}: {}", key, e);
                return None;
            }
        };
        match serde_json::from_str(&json) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Ignoring corrupt data under {}: {}", key, e);
                None
            }
        }
    }

    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> bool {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not serialize {}: {}", key, e);
                return false;
            }
        };
        match self.storage.set_item(key, &json) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Could not write {}: {}", key, e);
                false
            }
        }
    }
}
