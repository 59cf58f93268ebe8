//! Gateway implementations

use async_trait::async_trait;

use super::{Gateway, LocalStore, PersistError, local_key};
use crate::remote::RemoteStore;
use crate::state::StateSnapshot;

/// Remote store first, local storage on any remote failure
pub struct FallbackGateway {
    remote: Box<dyn RemoteStore>,
    local: LocalStore,
}

impl FallbackGateway {
    pub fn new(remote: Box<dyn RemoteStore>, local: LocalStore) -> Self {
        Self { remote, local }
    }
}

#[async_trait(?Send)]
impl Gateway for FallbackGateway {
    async fn save(&self, user_id: &str, snapshot: &StateSnapshot) -> Result<(), PersistError> {
        let remote_result = match snapshot.to_json() {
            Ok(payload) => self.remote.put_state(user_id, &payload).await,
            Err(e) => Err(crate::remote::RemoteError::Malformed(e.to_string())),
        };

        match remote_result {
            Ok(()) => {
                log::info!("Game saved remotely for {}", user_id);
                Ok(())
            }
            Err(e) => {
                log::warn!("Falling back to LocalStorage for game state: {}", e);
                write_local(&self.local, user_id, snapshot)
            }
        }
    }

    async fn load(&self, user_id: &str) -> Result<Option<StateSnapshot>, PersistError> {
        let error = match self.remote.get_state(user_id).await {
            Ok(None) => return Ok(None),
            Ok(Some(payload)) => match StateSnapshot::from_json(&payload) {
                Ok(snapshot) => {
                    log::info!("Loaded remote game state for {}", user_id);
                    return Ok(Some(snapshot));
                }
                Err(e) => format!("corrupt remote record: {}", e),
            },
            Err(e) => e.to_string(),
        };

        log::warn!("Falling back to LocalStorage for game state: {}", error);
        Ok(read_local(&self.local, user_id))
    }
}

/// Local storage only; used when no remote client could be built
pub struct LocalGateway {
    local: LocalStore,
}

impl LocalGateway {
    pub fn new(local: LocalStore) -> Self {
        Self { local }
    }
}

#[async_trait(?Send)]
impl Gateway for LocalGateway {
    async fn save(&self, user_id: &str, snapshot: &StateSnapshot) -> Result<(), PersistError> {
        write_local(&self.local, user_id, snapshot)
    }

    async fn load(&self, user_id: &str) -> Result<Option<StateSnapshot>, PersistError> {
        Ok(read_local(&self.local, user_id))
    }
}

fn write_local(local: &LocalStore, user_id: &str, snapshot: &StateSnapshot) -> Result<(), PersistError> {
    if local.set(&local_key(user_id), snapshot) {
        log::info!("Game saved to LocalStorage for {}", user_id);
        Ok(())
    } else {
        log::error!("LocalStorage rejected game state for {}", user_id);
        Err(PersistError::SaveFailed {
            user_id: user_id.to_string(),
        })
    }
}

fn read_local(local: &LocalStore, user_id: &str) -> Option<StateSnapshot> {
    let snapshot = local.get::<StateSnapshot>(&local_key(user_id));
    match &snapshot {
        Some(_) => log::info!("Loaded game state from LocalStorage for {}", user_id),
        None => log::info!("No saved game found for {}", user_id),
    }
    snapshot
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use super::*;
    use crate::platform::{KeyValueStorage, MemoryStorage};
    use crate::remote::RemoteError;
    use futures::executor::block_on;

    /// Remote store that either works like a map or fails every call
    #[derive(Default)]
    struct FakeRemote {
        records: RefCell<HashMap<String, String>>,
        failing: bool,
        puts: RefCell<u32>,
    }

    impl FakeRemote {
        fn failing() -> Self {
            Self {
                failing: true,
                ..Default::default()
            }
        }
    }

    #[async_trait(?Send)]
    impl RemoteStore for Rc<FakeRemote> {
        async fn put_state(&self, user_id: &str, payload: &str) -> Result<(), RemoteError> {
            *self.puts.borrow_mut() += 1;
            if self.failing {
                return Err(RemoteError::Network("connection reset".to_string()));
            }
            self.records
                .borrow_mut()
                .insert(user_id.to_string(), payload.to_string());
            Ok(())
        }

        async fn get_state(&self, user_id: &str) -> Result<Option<String>, RemoteError> {
            if self.failing {
                return Err(RemoteError::Throttled("rate exceeded".to_string()));
            }
            Ok(self.records.borrow().get(user_id).cloned())
        }
    }

    fn gateway(remote: &Rc<FakeRemote>, storage: &Rc<MemoryStorage>) -> FallbackGateway {
        FallbackGateway::new(
            Box::new(remote.clone()),
            LocalStore::new(storage.clone()),
        )
    }

    #[test]
    fn test_remote_save_and_load() {
        let remote = Rc::new(FakeRemote::default());
        let storage = Rc::new(MemoryStorage::new());
        let gw = gateway(&remote, &storage);
        let snapshot = StateSnapshot::new_game(5);

        block_on(gw.save("u", &snapshot)).unwrap();
        assert!(remote.records.borrow().contains_key("u"));
        assert!(storage.is_empty(), "successful remote save stays remote");
        assert_eq!(block_on(gw.load("u")).unwrap(), Some(snapshot));
    }

    #[test]
    fn test_remote_failure_writes_local_and_does_not_error() {
        let remote = Rc::new(FakeRemote::failing());
        let storage = Rc::new(MemoryStorage::new());
        let gw = gateway(&remote, &storage);
        let snapshot = StateSnapshot::new_game(6);

        block_on(gw.save("u", &snapshot)).unwrap();
        assert_eq!(*remote.puts.borrow(), 1);
        let stored = storage.get_item("gameState_u").unwrap().unwrap();
        assert_eq!(StateSnapshot::from_json(&stored).unwrap(), snapshot);
    }

    #[test]
    fn test_local_round_trip_when_remote_unreachable() {
        let remote = Rc::new(FakeRemote::failing());
        let storage = Rc::new(MemoryStorage::new());
        let gw = gateway(&remote, &storage);
        let snapshot = StateSnapshot::new_game(8);

        block_on(gw.save("u", &snapshot)).unwrap();
        assert_eq!(block_on(gw.load("u")).unwrap(), Some(snapshot));
    }

    #[test]
    fn test_unknown_user_is_none() {
        let storage = Rc::new(MemoryStorage::new());
        let ok = gateway(&Rc::new(FakeRemote::default()), &storage);
        let failing = gateway(&Rc::new(FakeRemote::failing()), &storage);
        assert_eq!(block_on(ok.load("ghost")).unwrap(), None);
        assert_eq!(block_on(failing.load("ghost")).unwrap(), None);
    }

    #[test]
    fn test_corrupt_remote_record_reads_local() {
        let remote = Rc::new(FakeRemote::default());
        remote
            .records
            .borrow_mut()
            .insert("u".to_string(), "{broken".to_string());
        let storage = Rc::new(MemoryStorage::new());
        let snapshot = StateSnapshot::new_game(9);
        LocalStore::new(storage.clone()).set("gameState_u", &snapshot);

        let gw = gateway(&remote, &storage);
        assert_eq!(block_on(gw.load("u")).unwrap(), Some(snapshot));
    }

    #[test]
    fn test_corrupt_local_record_is_none() {
        let storage = Rc::new(MemoryStorage::new());
        storage.set_item("gameState_u", "][").unwrap();
        let gw = LocalGateway::new(LocalStore::new(storage));
        assert_eq!(block_on(gw.load("u")).unwrap(), None);
    }

    #[test]
    fn test_local_record_with_partial_unit_cost_loads() {
        let storage = Rc::new(MemoryStorage::new());
        storage
            .set_item(
                "gameState_u",
                r#"{"units":[{"id":3,"name":"Core Weaver","type":"support","level":1,
                    "attack":10,"defense":20,"cost":{"quantumCores":10},
                    "description":"Field support","experience":0,"maxExperience":500}]}"#,
            )
            .unwrap();
        let gw = LocalGateway::new(LocalStore::new(storage));

        let loaded = block_on(gw.load("u")).unwrap().expect("valid save is kept");
        assert_eq!(loaded.units.len(), 1);
        assert_eq!(loaded.units[0].cost.quantum_cores, Some(10));
        assert_eq!(loaded.units[0].cost.energy, None);
    }

    #[test]
    fn test_both_stores_failing_reports_save_failure() {
        let remote = Rc::new(FakeRemote::failing());
        let storage = Rc::new(MemoryStorage::read_only());
        let gw = gateway(&remote, &storage);
        let err = block_on(gw.save("u", &StateSnapshot::new_game(1))).unwrap_err();
        assert!(matches!(err, PersistError::SaveFailed { ref user_id } if user_id == "u"));
    }

    #[test]
    fn test_local_gateway_round_trip() {
        let storage = Rc::new(MemoryStorage::new());
        let gw = LocalGateway::new(LocalStore::new(storage));
        let snapshot = StateSnapshot::new_game(4);
        block_on(gw.save("p1", &snapshot)).unwrap();
        assert_eq!(block_on(gw.load("p1")).unwrap(), Some(snapshot));
        assert_eq!(block_on(gw.load("p2")).unwrap(), None);
    }
}
