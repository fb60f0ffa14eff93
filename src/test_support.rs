use std::{collections::VecDeque, sync::Mutex};

use chrono::{DateTime, TimeZone, Utc};
use surrealdb::{Surreal, engine::any::Any};

use crate::{state::apply_schema, utils::time::Clock};

/// Fresh in-memory database with the beacon schema applied.
pub async fn mem_db() -> Surreal<Any> {
    let sdb = surrealdb::engine::any::connect("mem://")
        .await
        .expect("in-memory engine");
    sdb.use_ns("test").use_db("test").await.expect("namespace");
    apply_schema(&sdb).await.expect("schema");
    sdb
}

/// Bare record keys (`abc` of `beacons:abc`) of every row in `table`.
pub async fn record_keys(sdb: &Surreal<Any>, table: &'static str) -> Vec<String> {
    sdb.query("SELECT VALUE record::id(id) FROM type::table($table);")
        .bind(("table", table))
        .await
        .expect("query")
        .take(0)
        .expect("record keys")
}

pub fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .expect("valid test time")
}

/// Hands out the given times in order, then falls back to the wall clock.
#[derive(Debug, Default)]
pub struct ScriptedClock {
    times: Mutex<VecDeque<DateTime<Utc>>>,
}

impl ScriptedClock {
    pub fn new(times: impl IntoIterator<Item = DateTime<Utc>>) -> Self {
        Self {
            times: Mutex::new(times.into_iter().collect()),
        }
    }
}

impl Clock for ScriptedClock {
    fn now(&self) -> DateTime<Utc> {
        self.times
            .lock()
            .expect("clock lock")
            .pop_front()
            .unwrap_or_else(Utc::now)
    }
}
