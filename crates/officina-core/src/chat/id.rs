//! Opaque entity id generation.

use chrono::Utc;
use uuid::Uuid;

/// Length of the random suffix appended to every id.
const SUFFIX_LEN: usize = 9;

/// Generates an id of the form `<prefix>_<unix-millis>_<random-suffix>`.
///
/// The suffix is taken from a v4 UUID, so collision probability stays
/// negligible even under rapid repeated calls within one millisecond.
pub fn generate(prefix: &str) -> String {
    let millis = Utc::now().timestamp_millis();
    let hex = Uuid::new_v4().simple().to_string();
    format!("{}_{}_{}", prefix, millis, &hex[..SUFFIX_LEN])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_shape() {
        let id = generate("session");
        let parts: Vec<&str> = id.splitn(3, '_').collect();
        assert_eq!(parts[0], "session");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), SUFFIX_LEN);
    }

    #[test]
    fn test_generate_is_unique_under_rapid_calls() {
        let ids: HashSet<String> = (0..1000).map(|_| generate("session")).collect();
        assert_eq!(ids.len(), 1000);
    }
}
