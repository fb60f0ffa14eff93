pub mod beacon_const {
    pub const BEACON_TABLE: &str = "beacons";
    pub const RENDEZVOUS_TABLE: &str = "rendezvous";

    pub const KEY_BIT_LENGTH: u32 = 130;
    pub const KEY_RADIX: u32 = 32;
    // ceil(130 / 5)
    pub const KEY_LENGTH: usize = 26;
    pub const MAX_KEY_ATTEMPTS: u32 = 3;
}

pub mod schema {
    pub const SCHEMA: &str = r#"
DEFINE TABLE IF NOT EXISTS beacons SCHEMALESS;
DEFINE INDEX IF NOT EXISTS beacon_key_unique ON TABLE beacons FIELDS key UNIQUE;
DEFINE INDEX IF NOT EXISTS beacon_owner ON TABLE beacons FIELDS owner_id;
DEFINE INDEX IF NOT EXISTS beacon_created_at ON TABLE beacons FIELDS created_at;

DEFINE TABLE IF NOT EXISTS rendezvous SCHEMALESS;
DEFINE INDEX IF NOT EXISTS rendezvous_beacon_key ON TABLE rendezvous FIELDS beacon_key;
DEFINE INDEX IF NOT EXISTS rendezvous_created_at ON TABLE rendezvous FIELDS created_at;
"#;
}

/// 1x1 transparent GIF served on rendezvous when no payload file is configured.
pub const DEFAULT_PAYLOAD: &[u8] = &[
    0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 0x01, 0x00, 0x01, 0x00, 0x80, 0x00, 0x00, 0x00, 0x00,
    0x00, 0xff, 0xff, 0xff, 0x21, 0xf9, 0x04, 0x01, 0x00, 0x00, 0x00, 0x00, 0x2c, 0x00, 0x00,
    0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x02, 0x02, 0x44, 0x01, 0x00, 0x3b,
];
