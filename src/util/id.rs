use chrono::Utc;
use rand::Rng;

const SUFFIX_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const SUFFIX_LEN: usize = 9;

/// Generates a record id: millisecond timestamp plus a random base-36
/// suffix so that inserts landing in the same millisecond (frequent for
/// message tracking during webhook bursts) still get distinct ids.
pub fn new_record_id() -> String {
    let millis = Utc::now().timestamp_millis();
    let mut rng = rand::thread_rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| {
            let idx = rng.gen_range(0..SUFFIX_CHARSET.len());
            SUFFIX_CHARSET[idx] as char
        })
        .collect();
    format!("{}_{}", millis, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_id_shape() {
        let id = new_record_id();
        let (millis, suffix) = id.split_once('_').expect("id should contain a separator");
        assert!(millis.parse::<i64>().is_ok());
        assert_eq!(suffix.len(), SUFFIX_LEN);
        assert!(suffix.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_ids_are_distinct_within_one_millisecond() {
        let ids: HashSet<String> = (0..1000).map(|_| new_record_id()).collect();
        assert_eq!(ids.len(), 1000);
    }
}
