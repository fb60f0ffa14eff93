use surrealdb::RecordId;

/// Accepts either a bare record key (`abc`) or a full record id (`beacons:abc`).
pub fn get_record_id_from_string(table: &str, val: &str) -> Option<RecordId> {
    let val = val.trim();
    let key = match val.split_once(':') {
        Some((tb, key)) if tb == table => key,
        Some(_) => return None,
        None => val,
    };
    if key.is_empty() {
        return None;
    }
    Some(RecordId::from_table_key(table, key))
}
