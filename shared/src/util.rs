use chrono::{DateTime, NaiveDateTime, Utc};

/// Current UTC time in Unix milliseconds
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Client-generated id for device-local records (millisecond timestamp).
pub fn local_id() -> i64 {
    now_millis()
}

/// Server timestamps carry no offset; they are interpreted as UTC.
pub fn assume_utc(naive: NaiveDateTime) -> DateTime<Utc> {
    naive.and_utc()
}

/// Truncate to at most `max` characters (not bytes).
pub fn truncate_chars(text: &str, max: usize) -> (&str, bool) {
    match text.char_indices().nth(max) {
        Some((idx, _)) => (&text[..idx], true),
        None => (text, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_counts_characters() {
        assert_eq!(truncate_chars("abc", 5), ("abc", false));
        assert_eq!(truncate_chars("abcde", 5), ("abcde", false));
        assert_eq!(truncate_chars("abcdef", 5), ("abcde", true));
        // Multi-byte characters must not be split
        assert_eq!(truncate_chars("ééééééé", 3), ("ééé", true));
    }

    #[test]
    fn test_assume_utc_keeps_wall_clock() {
        let naive = NaiveDateTime::parse_from_str("2024-05-01T10:30:00", "%Y-%m-%dT%H:%M:%S")
            .unwrap();
        assert_eq!(assume_utc(naive).to_rfc3339(), "2024-05-01T10:30:00+00:00");
    }
}
