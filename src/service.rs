use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::{
    consts::beacon_const::{BEACON_TABLE, MAX_KEY_ATTEMPTS, RENDEZVOUS_TABLE},
    errors::{Error, Result},
    models::{Lookup, beacon::Beacon, rendezvous::Rendezvous},
    store::{BeaconStore, RendezvousStore},
    utils::{get_record_id::get_record_id_from_string, key_gen::KeyGenerator},
};

/// Entry point for every beacon operation. Stores are handed in at
/// construction; nothing here is process-global.
#[derive(Debug, Clone)]
pub struct BeaconService {
    beacons: BeaconStore,
    rendezvous: RendezvousStore,
    keys: Arc<dyn KeyGenerator>,
}

impl BeaconService {
    pub fn new(
        beacons: BeaconStore,
        rendezvous: RendezvousStore,
        keys: Arc<dyn KeyGenerator>,
    ) -> Self {
        Self {
            beacons,
            rendezvous,
            keys,
        }
    }

    pub async fn create(
        &self,
        owner_id: String,
        name: String,
        description: String,
    ) -> Result<Beacon> {
        for attempt in 1..=MAX_KEY_ATTEMPTS {
            let key = self.keys.generate();
            if key.is_empty() {
                return Err(Error::InternalServerError);
            }
            match self
                .beacons
                .insert(key, owner_id.clone(), name.clone(), description.clone())
                .await
            {
                Ok(beacon) => {
                    info!("Created beacon {} for owner {}", beacon.key, beacon.owner_id);
                    return Ok(beacon);
                }
                Err(Error::DuplicateKey(key)) => {
                    warn!(
                        "Generated key {} already taken (attempt {}/{})",
                        key, attempt, MAX_KEY_ATTEMPTS
                    );
                }
                Err(err) => return Err(err),
            }
        }
        Err(Error::BeaconCreationFailed {
            attempts: MAX_KEY_ATTEMPTS,
        })
    }

    /// Beacons are never deleted, so a beacon found here still exists when
    /// the rendezvous is inserted.
    pub async fn record_rendezvous(
        &self,
        beacon_key: &str,
        remote_address: String,
    ) -> Result<Rendezvous> {
        let beacon_key = non_empty_key(beacon_key)?;
        let beacon = self
            .beacons
            .find_by_exact_key(beacon_key)
            .await?
            .ok_or_else(|| Error::BeaconNotFound(beacon_key.into()))?;

        self.rendezvous.insert(beacon.key, remote_address).await
    }

    pub async fn list_beacons(&self) -> Result<Vec<Beacon>> {
        self.beacons.list_all().await
    }

    pub async fn find_beacon(&self, beacon_key: &str) -> Result<Option<Beacon>> {
        let beacon_key = non_empty_key(beacon_key)?;
        match self.beacons.find_by_key(beacon_key).await? {
            Lookup::Found(beacon) => Ok(Some(beacon)),
            Lookup::NotFound => Ok(None),
            Lookup::Ambiguous => Err(Error::AmbiguousResult(beacon_key.into())),
        }
    }

    pub async fn find_beacon_by_id(&self, id: &str) -> Result<Option<Beacon>> {
        match get_record_id_from_string(BEACON_TABLE, id) {
            Some(id) => self.beacons.find_by_id(id).await,
            None => Ok(None),
        }
    }

    pub async fn find_beacons_for_owner(&self, owner_id: &str) -> Result<Vec<Beacon>> {
        self.beacons.find_by_owner(owner_id).await
    }

    pub async fn beacons_created_on(&self, date: NaiveDate) -> Result<Vec<Beacon>> {
        self.beacons.find_by_date(date).await
    }

    pub async fn find_rendezvous_for_beacon(&self, beacon_key: &str) -> Result<Vec<Rendezvous>> {
        let beacon_key = non_empty_key(beacon_key)?;
        self.rendezvous.find_by_key(beacon_key).await
    }

    pub async fn find_rendezvous_by_id(&self, id: &str) -> Result<Option<Rendezvous>> {
        match get_record_id_from_string(RENDEZVOUS_TABLE, id) {
            Some(id) => self.rendezvous.find_by_id(id).await,
            None => Ok(None),
        }
    }

    pub async fn rendezvous_on(&self, date: NaiveDate) -> Result<Vec<Rendezvous>> {
        self.rendezvous.find_by_date(date).await
    }
}

fn non_empty_key(beacon_key: &str) -> Result<&str> {
    let beacon_key = beacon_key.trim();
    if beacon_key.is_empty() {
        return Err(Error::InvalidKey);
    }
    Ok(beacon_key)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::{
        consts::beacon_const::KEY_LENGTH,
        test_support::{mem_db, record_keys},
        utils::{key_gen::RandomKeyGenerator, time::SystemClock},
    };

    #[derive(Debug)]
    struct FixedKeys(Mutex<Vec<&'static str>>);

    impl KeyGenerator for FixedKeys {
        fn generate(&self) -> String {
            let mut keys = self.0.lock().unwrap();
            if keys.len() > 1 {
                keys.remove(0).into()
            } else {
                keys[0].into()
            }
        }
    }

    async fn service_with(keys: Arc<dyn KeyGenerator>) -> (BeaconService, RendezvousStore) {
        let sdb = mem_db().await;
        let clock = Arc::new(SystemClock);
        let rendezvous = RendezvousStore::new(sdb.clone(), clock.clone());
        let service = BeaconService::new(BeaconStore::new(sdb, clock), rendezvous.clone(), keys);
        (service, rendezvous)
    }

    async fn service() -> (BeaconService, RendezvousStore) {
        service_with(Arc::new(RandomKeyGenerator)).await
    }

    #[tokio::test]
    async fn test_create_and_find_for_owner() {
        let (service, _) = service().await;
        let beacon = service
            .create("u1".into(), "n".into(), "d".into())
            .await
            .unwrap();

        assert_eq!(beacon.key.len(), KEY_LENGTH);
        assert_eq!(service.find_beacons_for_owner("u1").await.unwrap(), [beacon.clone()]);
        assert_eq!(service.find_beacon(&beacon.key).await.unwrap(), Some(beacon.clone()));
        assert_eq!(service.list_beacons().await.unwrap(), [beacon]);
    }

    #[tokio::test]
    async fn test_record_rendezvous() {
        let (service, _) = service().await;
        let beacon = service
            .create("u1".into(), "n".into(), "d".into())
            .await
            .unwrap();

        let rendezvous = service
            .record_rendezvous(&beacon.key, "203.0.113.5".into())
            .await
            .unwrap();
        assert_eq!(rendezvous.beacon_key, beacon.key);

        let history = service.find_rendezvous_for_beacon(&beacon.key).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].remote_address, "203.0.113.5");
        assert!(history[0].created_at >= beacon.created_at);
    }

    #[tokio::test]
    async fn test_record_rendezvous_unknown_key() {
        let (service, rendezvous) = service().await;
        service
            .create("u1".into(), "n".into(), "d".into())
            .await
            .unwrap();

        let result = service
            .record_rendezvous("nonexistent", "203.0.113.5".into())
            .await;
        assert!(matches!(result, Err(Error::BeaconNotFound(ref key)) if key == "nonexistent"));
        assert_eq!(rendezvous.count().await.unwrap(), 0);

        let result = service.record_rendezvous("  ", "203.0.113.5".into()).await;
        assert!(matches!(result, Err(Error::InvalidKey)));
    }

    #[tokio::test]
    async fn test_create_retries_on_collision() {
        let keys = FixedKeys(Mutex::new(vec!["taken", "taken", "fresh"]));
        let (service, _) = service_with(Arc::new(keys)).await;

        let first = service.create("u1".into(), "a".into(), "d".into()).await.unwrap();
        assert_eq!(first.key, "taken");
        let second = service.create("u1".into(), "b".into(), "d".into()).await.unwrap();
        assert_eq!(second.key, "fresh");
    }

    #[tokio::test]
    async fn test_create_gives_up_after_max_attempts() {
        let keys = FixedKeys(Mutex::new(vec!["taken"]));
        let (service, _) = service_with(Arc::new(keys)).await;

        service.create("u1".into(), "a".into(), "d".into()).await.unwrap();
        let result = service.create("u1".into(), "b".into(), "d".into()).await;
        assert!(matches!(
            result,
            Err(Error::BeaconCreationFailed { attempts }) if attempts == MAX_KEY_ATTEMPTS
        ));
        assert_eq!(service.list_beacons().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_find_beacon_ambiguous() {
        let keys = FixedKeys(Mutex::new(vec!["shared-1", "shared-2"]));
        let (service, _) = service_with(Arc::new(keys)).await;
        service.create("u1".into(), "a".into(), "d".into()).await.unwrap();
        service.create("u1".into(), "b".into(), "d".into()).await.unwrap();

        assert!(matches!(
            service.find_beacon("shared").await,
            Err(Error::AmbiguousResult(_))
        ));
        assert!(service.find_beacon("shared-2").await.unwrap().is_some());
        assert_eq!(service.find_beacon("absent").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let sdb = mem_db().await;
        let clock = Arc::new(SystemClock);
        let service = BeaconService::new(
            BeaconStore::new(sdb.clone(), clock.clone()),
            RendezvousStore::new(sdb.clone(), clock),
            Arc::new(RandomKeyGenerator),
        );
        let beacon = service
            .create("u1".into(), "n".into(), "d".into())
            .await
            .unwrap();
        let rendezvous = service
            .record_rendezvous(&beacon.key, "203.0.113.5".into())
            .await
            .unwrap();

        let beacon_key = record_keys(&sdb, BEACON_TABLE).await.remove(0);
        let beacon_id = format!("{}:{}", BEACON_TABLE, beacon_key);
        assert_eq!(service.find_beacon_by_id(&beacon_id).await.unwrap(), Some(beacon));

        let rendezvous_key = record_keys(&sdb, RENDEZVOUS_TABLE).await.remove(0);
        assert_eq!(
            service.find_rendezvous_by_id(&rendezvous_key).await.unwrap(),
            Some(rendezvous)
        );
        assert_eq!(service.find_beacon_by_id("rendezvous:x").await.unwrap(), None);
        assert_eq!(service.find_beacon_by_id("missing").await.unwrap(), None);
    }
}
