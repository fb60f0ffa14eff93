use std::sync::Arc;

use chrono::NaiveDate;
use surrealdb::{RecordId, Surreal, engine::any::Any};
use tracing::{debug, info, warn};

use crate::{
    consts::beacon_const::BEACON_TABLE,
    errors::{Error, Result},
    models::{
        Lookup,
        beacon::{Beacon, CreateBeacon},
    },
    utils::time::{Clock, day_bounds, time_now},
};

use super::is_unique_violation;

#[derive(Debug, Clone)]
pub struct BeaconStore {
    sdb: Surreal<Any>,
    clock: Arc<dyn Clock>,
}

impl BeaconStore {
    pub fn new(sdb: Surreal<Any>, clock: Arc<dyn Clock>) -> Self {
        Self { sdb, clock }
    }

    /// Saves a new beacon. A key that is already taken fails with
    /// [`Error::DuplicateKey`]; the unique index decides, not a pre-check.
    pub async fn insert(
        &self,
        key: String,
        owner_id: String,
        name: String,
        description: String,
    ) -> Result<Beacon> {
        let beacon_data = CreateBeacon {
            key: key.clone(),
            owner_id,
            name,
            description,
            created_at: time_now(self.clock.as_ref()),
        };
        let created = self
            .sdb
            .create::<Option<Beacon>>(BEACON_TABLE)
            .content(beacon_data)
            .await;

        match created {
            Ok(Some(beacon)) => {
                info!("Successfully saved Beacon with id: {:?}", beacon.id);
                Ok(beacon)
            }
            Ok(None) => Err(Error::InternalServerError),
            Err(err) if is_unique_violation(&err) => {
                warn!("Beacon key collision: {}", key);
                Err(Error::DuplicateKey(key))
            }
            Err(err) => {
                // a write conflict with a concurrent insert of the same key
                if let Ok(Some(_)) = self.find_by_exact_key(&key).await {
                    warn!("Beacon key collision after conflict: {}", key);
                    return Err(Error::DuplicateKey(key));
                }
                Err(err.into())
            }
        }
    }

    pub async fn find_by_id(&self, id: RecordId) -> Result<Option<Beacon>> {
        let beacon: Option<Beacon> = self.sdb.select(id.clone()).await?;
        if beacon.is_none() {
            debug!("No beacon found with ID: {:?}", id);
        }
        Ok(beacon)
    }

    /// Partial match on the key. Several matches yield [`Lookup::Ambiguous`].
    pub async fn find_by_key(&self, key: &str) -> Result<Lookup<Beacon>> {
        let matches: Vec<Beacon> = self
            .sdb
            .query("SELECT * FROM type::table($table) WHERE string::contains(key, $key) ORDER BY created_at ASC LIMIT 2;")
            .bind(("table", BEACON_TABLE))
            .bind(("key", key.to_owned()))
            .await?
            .take(0)?;

        let lookup = Lookup::from_matches(matches);
        match lookup {
            Lookup::NotFound => debug!("No beacon found with key: {}", key),
            Lookup::Ambiguous => warn!("Key matches more than one beacon: {}", key),
            Lookup::Found(_) => {}
        }
        Ok(lookup)
    }

    pub async fn find_by_exact_key(&self, key: &str) -> Result<Option<Beacon>> {
        let beacon = self
            .sdb
            .query("SELECT * FROM type::table($table) WHERE key = $key;")
            .bind(("table", BEACON_TABLE))
            .bind(("key", key.to_owned()))
            .await?
            .take::<Vec<Beacon>>(0)?
            .into_iter()
            .next();
        Ok(beacon)
    }

    pub async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<Beacon>> {
        let beacons: Vec<Beacon> = self
            .sdb
            .query("SELECT * FROM type::table($table) WHERE owner_id = $owner_id ORDER BY created_at ASC;")
            .bind(("table", BEACON_TABLE))
            .bind(("owner_id", owner_id.to_owned()))
            .await?
            .take(0)?;

        if beacons.is_empty() {
            debug!("Unable to find Beacons for user: {}", owner_id);
        }
        Ok(beacons)
    }

    pub async fn find_by_date(&self, date: NaiveDate) -> Result<Vec<Beacon>> {
        let (start, end) = day_bounds(date);
        let beacons: Vec<Beacon> = self
            .sdb
            .query("SELECT * FROM type::table($table) WHERE created_at >= $start AND created_at < $end ORDER BY created_at ASC;")
            .bind(("table", BEACON_TABLE))
            .bind(("start", start))
            .bind(("end", end))
            .await?
            .take(0)?;

        if beacons.is_empty() {
            debug!("No beacons on requested date: {}", date);
        }
        Ok(beacons)
    }

    pub async fn list_all(&self) -> Result<Vec<Beacon>> {
        let beacons: Vec<Beacon> = self
            .sdb
            .query("SELECT * FROM type::table($table) ORDER BY created_at ASC;")
            .bind(("table", BEACON_TABLE))
            .await?
            .take(0)?;
        Ok(beacons)
    }
}
