use chrono::NaiveDate;

pub const STANDARD_DAY_FORMAT: &str = "%Y-%m-%d";

// Day marker helpers. The marker is stored as a bare date string so the
// persisted blob stays human-readable and timezone-free.

pub fn format_day(day: NaiveDate) -> String {
    day.format(STANDARD_DAY_FORMAT).to_string()
}

pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), STANDARD_DAY_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_marker_round_trips() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();
        assert_eq!(format_day(day), "2024-05-17");
        assert_eq!(parse_day("2024-05-17"), Some(day));
    }

    #[test]
    fn unparseable_markers_read_as_absent() {
        assert_eq!(parse_day(""), None);
        assert_eq!(parse_day("5/17/2024"), None);
    }
}
