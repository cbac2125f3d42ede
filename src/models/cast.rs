use serde::{Deserialize, Serialize};

/// Composite grouping key identifying one cast.
///
/// Fields hold the verbatim source text, so two rows group together iff
/// every key column compares byte-for-byte equal. No rounding or numeric
/// normalization happens here; coordinate text that differs only in
/// representation splits into separate casts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CastKey {
    pub cruise: String,
    pub station: String,
    pub year: String,
    pub month: String,
    pub day: String,
    pub hour: String,
    pub minute: String,
    pub longitude: String,
    pub latitude: String,
    /// Present for bottle/CTD extracts only.
    pub bottom_depth: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(lat: &str) -> CastKey {
        CastKey {
            cruise: "C58".to_string(),
            station: "12".to_string(),
            year: "2014".to_string(),
            month: "7".to_string(),
            day: "3".to_string(),
            hour: "10".to_string(),
            minute: "30".to_string(),
            longitude: "-15.25".to_string(),
            latitude: lat.to_string(),
            bottom_depth: Some("120".to_string()),
        }
    }

    #[test]
    fn test_identical_text_compares_equal() {
        assert_eq!(key("60.5"), key("60.5"));
    }

    #[test]
    fn test_representation_difference_splits_casts() {
        // "60.5" and "60.50" are the same coordinate but distinct keys
        assert_ne!(key("60.5"), key("60.50"));
    }
}
