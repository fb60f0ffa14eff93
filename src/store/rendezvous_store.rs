use std::sync::Arc;

use chrono::NaiveDate;
use surrealdb::{RecordId, Surreal, engine::any::Any};
use tracing::{debug, info};

use crate::{
    consts::beacon_const::RENDEZVOUS_TABLE,
    errors::{Error, Result},
    models::rendezvous::{CreateRendezvous, Rendezvous},
    utils::time::{Clock, day_bounds, time_now},
};

/// Rendezvous history. The store does not check `beacon_key` against the
/// beacon table; `BeaconService` resolves the beacon before inserting.
#[derive(Debug, Clone)]
pub struct RendezvousStore {
    sdb: Surreal<Any>,
    clock: Arc<dyn Clock>,
}

impl RendezvousStore {
    pub fn new(sdb: Surreal<Any>, clock: Arc<dyn Clock>) -> Self {
        Self { sdb, clock }
    }

    pub async fn insert(&self, beacon_key: String, remote_address: String) -> Result<Rendezvous> {
        let rendezvous_data = CreateRendezvous {
            beacon_key,
            remote_address,
            created_at: time_now(self.clock.as_ref()),
        };
        let rendezvous = self
            .sdb
            .create::<Option<Rendezvous>>(RENDEZVOUS_TABLE)
            .content(rendezvous_data)
            .await?
            .ok_or(Error::InternalServerError)?;

        info!(
            "Recorded rendezvous {:?} for beacon {} from {}",
            rendezvous.id, rendezvous.beacon_key, rendezvous.remote_address
        );
        Ok(rendezvous)
    }

    pub async fn find_by_id(&self, id: RecordId) -> Result<Option<Rendezvous>> {
        let rendezvous: Option<Rendezvous> = self.sdb.select(id.clone()).await?;
        if rendezvous.is_none() {
            debug!("No rendezvous found with ID: {:?}", id);
        }
        Ok(rendezvous)
    }

    pub async fn find_by_key(&self, beacon_key: &str) -> Result<Vec<Rendezvous>> {
        let rendezvous: Vec<Rendezvous> = self
            .sdb
            .query("SELECT * FROM type::table($table) WHERE beacon_key = $beacon_key ORDER BY created_at ASC;")
            .bind(("table", RENDEZVOUS_TABLE))
            .bind(("beacon_key", beacon_key.to_owned()))
            .await?
            .take(0)?;

        if rendezvous.is_empty() {
            debug!("No rendezvous recorded for beacon: {}", beacon_key);
        }
        Ok(rendezvous)
    }

    pub async fn find_by_date(&self, date: NaiveDate) -> Result<Vec<Rendezvous>> {
        let (start, end) = day_bounds(date);
        let rendezvous: Vec<Rendezvous> = self
            .sdb
            .query("SELECT * FROM type::table($table) WHERE created_at >= $start AND created_at < $end ORDER BY created_at ASC;")
            .bind(("table", RENDEZVOUS_TABLE))
            .bind(("start", start))
            .bind(("end", end))
            .await?
            .take(0)?;

        if rendezvous.is_empty() {
            debug!("No rendezvous on requested date: {}", date);
        }
        Ok(rendezvous)
    }

    #[cfg(test)]
    pub async fn count(&self) -> Result<usize> {
        let all: Vec<Rendezvous> = self.sdb.select(RENDEZVOUS_TABLE).await?;
        Ok(all.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ScriptedClock, at, mem_db};
    use crate::utils::time::SystemClock;

    #[tokio::test]
    async fn test_find_by_key_sorted_by_creation() {
        let clock = ScriptedClock::new([
            at(2026, 10, 17, 15),
            at(2026, 10, 17, 8),
            at(2026, 10, 16, 23),
            at(2026, 10, 17, 11),
        ]);
        let store = RendezvousStore::new(mem_db().await, Arc::new(clock));
        for addr in ["10.0.0.3", "10.0.0.1", "10.0.0.0", "10.0.0.2"] {
            let key = if addr == "10.0.0.2" { "other" } else { "key" };
            store.insert(key.into(), addr.into()).await.unwrap();
        }

        let addrs = |all: Vec<Rendezvous>| {
            all.into_iter()
                .map(|r| r.remote_address)
                .collect::<Vec<_>>()
        };

        let history = store.find_by_key("key").await.unwrap();
        assert!(history.windows(2).all(|w| w[0].created_at <= w[1].created_at));
        assert_eq!(addrs(history), ["10.0.0.0", "10.0.0.1", "10.0.0.3"]);

        let day = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        assert_eq!(
            addrs(store.find_by_date(day).await.unwrap()),
            ["10.0.0.1", "10.0.0.2", "10.0.0.3"]
        );
        assert!(store.find_by_key("missing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let store = RendezvousStore::new(mem_db().await, Arc::new(SystemClock));
        let rendezvous = store
            .insert("key".into(), "203.0.113.5".into())
            .await
            .unwrap();

        assert_eq!(
            store.find_by_id(rendezvous.id.clone()).await.unwrap(),
            Some(rendezvous)
        );
        assert_eq!(
            store
                .find_by_id(RecordId::from_table_key(RENDEZVOUS_TABLE, "missing"))
                .await
                .unwrap(),
            None
        );
    }
}
