use std::sync::LazyLock;

use regex::Regex;

/// ISO-8601 duration, e.g. `P1Y2M`, `P3W`, `PT1M`, `P1DT12H30M5.5S`
const DURATION_PATTERN: &str = r"^P(\d+Y)?(\d+M)?(\d+W)?(\d+D)?(T(\d+H)?(\d+M)?(\d+([.,]\d+)?S)?)?$";

static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(DURATION_PATTERN).expect("duration pattern is valid"));

/// Check that `value` is a non-empty ISO-8601 duration.
pub fn is_iso8601_duration(value: &str) -> bool {
    let Some(caps) = DURATION_RE.captures(value) else {
        return false;
    };

    // `P` and `PT` alone carry no component
    let has_date = (1..=4).any(|i| caps.get(i).is_some());
    let has_time = (6..=8).any(|i| caps.get(i).is_some());
    if caps.get(5).is_some() && !has_time {
        return false;
    }
    has_date || has_time
}
