use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "beacon-rendezvous")]
#[command(about = "Issues tracking beacons and records every rendezvous against them")]
#[command(version)]
pub struct Config {
    /// Bind address
    #[arg(long, env = "BEACON_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Bind port
    #[arg(short, long, env = "BEACON_PORT", default_value_t = 3587)]
    pub port: u16,

    /// SurrealDB endpoint, e.g. `ws://localhost:8050` or `mem://`
    #[arg(long, env = "BEACON_DB_URL", default_value = "ws://localhost:8050")]
    pub db_url: String,

    #[arg(long, env = "BEACON_DB_USER")]
    pub db_user: Option<String>,

    #[arg(long, env = "BEACON_DB_PASS", hide_env_values = true)]
    pub db_pass: Option<String>,

    #[arg(long, env = "BEACON_DB_NS", default_value = "beacon")]
    pub namespace: String,

    #[arg(long, env = "BEACON_DB_NAME", default_value = "beacon")]
    pub database: String,

    /// File served on every rendezvous; a 1x1 GIF when unset
    #[arg(long, env = "BEACON_PAYLOAD")]
    pub payload: Option<PathBuf>,

    /// Take the remote address from `X-Forwarded-For` / `X-Real-IP`
    #[arg(long, env = "BEACON_TRUST_FORWARDED", default_value_t = false)]
    pub trust_forwarded: bool,
}

impl Config {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
