use std::{path::PathBuf, sync::Arc};

use surrealdb::{
    Surreal,
    engine::any::{self, Any},
    opt::auth::Root,
};
use tracing::info;

use crate::{
    config::Config,
    consts::schema::SCHEMA,
    errors::Result,
    service::BeaconService,
    store::{BeaconStore, RendezvousStore},
    utils::{key_gen::RandomKeyGenerator, time::SystemClock},
};

#[derive(Debug, Clone)]
pub struct AppState {
    pub service: BeaconService,
    pub payload: Option<PathBuf>,
    pub trust_forwarded: bool,
}

impl AppState {
    pub async fn init(config: &Config) -> Result<Self> {
        let sdb = any::connect(config.db_url.as_str()).await?;
        if let (Some(username), Some(password)) = (&config.db_user, &config.db_pass) {
            sdb.signin(Root {
                username: username.as_str(),
                password: password.as_str(),
            })
            .await?;
        }
        sdb.use_ns(config.namespace.as_str())
            .use_db(config.database.as_str())
            .await?;
        info!("Connected to SurrealDB at {}", config.db_url);

        apply_schema(&sdb).await?;

        Ok(Self::new(sdb, config.payload.clone(), config.trust_forwarded))
    }

    pub fn new(sdb: Surreal<Any>, payload: Option<PathBuf>, trust_forwarded: bool) -> Self {
        let clock = Arc::new(SystemClock);
        let service = BeaconService::new(
            BeaconStore::new(sdb.clone(), clock.clone()),
            RendezvousStore::new(sdb, clock),
            Arc::new(RandomKeyGenerator),
        );
        Self {
            service,
            payload,
            trust_forwarded,
        }
    }
}

pub async fn apply_schema(sdb: &Surreal<Any>) -> Result<()> {
    sdb.query(SCHEMA).await?.check()?;
    Ok(())
}
