use std::sync::OnceLock;
use time::{Date, format_description::FormatItem};

static FORMAT: OnceLock<Vec<FormatItem<'static>>> = OnceLock::new();

/// Parse an ISO `YYYY-MM-DD` string into a calendar date.
///
/// The pattern is checked first (four digits, dash, two digits, dash, two
/// digits) so that shapes like `2024-5-1` are rejected before the calendar
/// check; `2025-02-30` then fails the parse itself.
#[must_use]
pub fn parse_iso_date(s: &str) -> Option<Date> {
    if !matches_pattern(s) {
        return None;
    }

    let format = FORMAT.get_or_init(|| {
        time::format_description::parse("[year]-[month]-[day]")
            .expect("static date format description must parse")
    });

    Date::parse(s, format).ok()
}

fn matches_pattern(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() != 10 {
        return false;
    }

    bytes.iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        _ => b.is_ascii_digit(),
    })
}

///
/// TESTS
///
