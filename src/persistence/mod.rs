//! Save/load of the game snapshot
//!
//! Features:
//! - Remote save keyed by user id (DynamoDB)
//! - LocalStorage fallback under `gameState_<userId>` on any remote failure
//! - Local-only mode when the remote client cannot be built
//! - Corrupt local data reads as "no save"

pub mod gateway;
pub mod local;

use std::rc::Rc;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::AwsConfig;
use crate::platform::KeyValueStorage;
use crate::remote::{DynamoDbStore, Transport};
use crate::state::StateSnapshot;

pub use gateway::{FallbackGateway, LocalGateway};
pub use local::LocalStore;

/// Prefix of the LocalStorage key holding a user's save
pub const LOCAL_KEY_PREFIX: &str = "gameState_";

/// LocalStorage key for `user_id`
pub fn local_key(user_id: &str) -> String {
    format!("{}{}", LOCAL_KEY_PREFIX, user_id)
}

/// The only persistence failures the application shell ever sees
#[derive(Debug, Error)]
pub enum PersistError {
    /// Neither the remote store nor the local fallback accepted the save
    #[error("could not save game state for {user_id}")]
    SaveFailed { user_id: String },

    #[error("could not load game state for {user_id}: {reason}")]
    LoadFailed { user_id: String, reason: String },
}

/// One save/load contract regardless of where the data lives
#[async_trait(?Send)]
pub trait Gateway {
    /// Persist `snapshot` for `user_id`. Remote errors are absorbed by
    /// falling back to local storage.
    async fn save(&self, user_id: &str, snapshot: &StateSnapshot) -> Result<(), PersistError>;

    /// Fetch the latest snapshot for `user_id`, `None` if never saved
    async fn load(&self, user_id: &str) -> Result<Option<StateSnapshot>, PersistError>;
}

/// Build the gateway for this environment.
///
/// Without a transport, or with a configuration the remote client rejects,
/// the result persists to local storage only.
pub fn connect(
    config: AwsConfig,
    transport: Option<Rc<dyn Transport>>,
    storage: Rc<dyn KeyValueStorage>,
) -> Rc<dyn Gateway> {
    let local = LocalStore::new(storage);

    let Some(transport) = transport else {
        log::warn!("No HTTP transport available, using local storage");
        return Rc::new(LocalGateway::new(local));
    };

    match DynamoDbStore::new(transport, config) {
        Ok(remote) => {
            log::info!("Remote saves enabled");
            Rc::new(FallbackGateway::new(Box::new(remote), local))
        }
        Err(e) => {
            log::warn!("AWS services unavailable ({}), using local storage", e);
            Rc::new(LocalGateway::new(local))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStorage;
    use crate::remote::testing::ScriptedTransport;
    use futures::executor::block_on;

    #[test]
    fn test_local_key() {
        assert_eq!(local_key("current-user"), "gameState_current-user");
    }

    #[test]
    fn test_connect_without_transport_is_local_only() {
        let storage = Rc::new(MemoryStorage::new());
        let gateway = connect(AwsConfig::default(), None, storage.clone());

        let snapshot = StateSnapshot::new_game(3);
        block_on(gateway.save("u", &snapshot)).unwrap();
        assert!(storage.get_item("gameState_u").unwrap().is_some());
        assert_eq!(block_on(gateway.load("u")).unwrap(), Some(snapshot));
    }

    #[test]
    fn test_connect_with_bad_region_is_local_only() {
        let storage = Rc::new(MemoryStorage::new());
        let transport = Rc::new(ScriptedTransport::new());
        let config = AwsConfig::from_values(Some("not a region"), Some("a"), Some("b"));
        let gateway = connect(config, Some(transport.clone() as Rc<dyn Transport>), storage.clone());

        block_on(gateway.save("u", &StateSnapshot::new_game(3))).unwrap();
        assert_eq!(transport.request_count(), 0);
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_connect_with_empty_credentials_falls_back_per_call() {
        let storage = Rc::new(MemoryStorage::new());
        let transport = Rc::new(ScriptedTransport::new());
        let gateway = connect(AwsConfig::default(), Some(transport.clone() as Rc<dyn Transport>), storage.clone());

        let snapshot = StateSnapshot::new_game(11);
        block_on(gateway.save("u", &snapshot)).unwrap();
        assert_eq!(transport.request_count(), 0);
        assert_eq!(block_on(gateway.load("u")).unwrap(), Some(snapshot));
    }
}
