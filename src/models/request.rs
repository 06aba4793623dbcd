//! Validated chart requests

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};

use super::Pair;
use crate::config::constants::{DATE_SUFFIXES, LOCAL_OFFSET_HOURS, WINDOW_DAYS};

/// Output encoding selected by the date token's suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Svg,
    Png,
}

impl ImageFormat {
    /// `.svg` selects SVG; anything else (including no suffix) selects PNG.
    pub fn from_token(date_token: &str) -> Self {
        if date_token.ends_with(".svg") {
            ImageFormat::Svg
        } else {
            ImageFormat::Png
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ImageFormat::Svg => "image/svg+xml",
            ImageFormat::Png => "image/png",
        }
    }
}

/// A chart request that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesRequest {
    pub pair: Pair,
    /// Local (JST) wall-clock anchor; midnight for plain date tokens
    pub anchor: NaiveDateTime,
}

impl SeriesRequest {
    /// Validate the raw path segments.
    /// Returns `None` for an unsupported pair or a date token that does not parse.
    pub fn parse(pair: &str, date_token: &str) -> Option<(Self, ImageFormat)> {
        let pair = Pair::parse(pair)?;
        let anchor = parse_anchor(date_token)?;

        // Reject anchors whose window would leave chrono's representable range
        let span = Duration::hours(LOCAL_OFFSET_HOURS) + Duration::days(WINDOW_DAYS as i64 - 1);
        anchor.checked_sub_signed(span)?;

        Some((Self { pair, anchor }, ImageFormat::from_token(date_token)))
    }

    /// Calendar date of the anchor in the local zone
    pub fn anchor_date(&self) -> NaiveDate {
        self.anchor.date()
    }

    /// The anchor day and the 30 days before it, most recent first,
    /// each shifted from local time into its UTC instant.
    pub fn candidate_times(&self) -> Vec<DateTime<Utc>> {
        let start = self.anchor - Duration::hours(LOCAL_OFFSET_HOURS);
        (0..WINDOW_DAYS as i64)
            .filter_map(|i| start.checked_sub_signed(Duration::days(i)))
            .map(|naive| Utc.from_utc_datetime(&naive))
            .collect()
    }
}

fn strip_suffix(date_token: &str) -> &str {
    DATE_SUFFIXES
        .iter()
        .find_map(|suffix| date_token.strip_suffix(suffix))
        .unwrap_or(date_token)
}

/// Accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS` (local time) or a full RFC 3339
/// timestamp, which is converted to local wall-clock time.
fn parse_anchor(date_token: &str) -> Option<NaiveDateTime> {
    let raw = strip_suffix(date_token);

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    if let Ok(local) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(local);
    }

    let local_zone = FixedOffset::east_opt(i32::try_from(LOCAL_OFFSET_HOURS * 3600).ok()?)?;
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&local_zone).naive_local())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::iso_instant;

    #[test]
    fn test_format_selection() {
        assert_eq!(ImageFormat::from_token("2024-01-31.svg"), ImageFormat::Svg);
        assert_eq!(ImageFormat::from_token("2024-01-31.png"), ImageFormat::Png);
        assert_eq!(ImageFormat::from_token("2024-01-31"), ImageFormat::Png);
        assert_eq!(ImageFormat::Svg.content_type(), "image/svg+xml");
        assert_eq!(ImageFormat::Png.content_type(), "image/png");
    }

    #[test]
    fn test_parse_strips_suffix() {
        let (req, format) = SeriesRequest::parse("btc_jpy", "2024-01-31.svg").unwrap();
        assert_eq!(req.pair.as_str(), "btc_jpy");
        assert_eq!(req.anchor_date(), NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
        assert_eq!(format, ImageFormat::Svg);
    }

    #[test]
    fn test_parse_rejects_invalid_input() {
        assert!(SeriesRequest::parse("xyz_jpy", "2024-01-31.svg").is_none());
        assert!(SeriesRequest::parse("btc_jpy", "not-a-date").is_none());
        assert!(SeriesRequest::parse("btc_jpy", "2024-02-30.png").is_none());
        assert!(SeriesRequest::parse("btc_jpy", "2024-01-31.gif").is_none());
    }

    #[test]
    fn test_candidates_span_31_days_shifted_by_offset() {
        let (req, _) = SeriesRequest::parse("btc_jpy", "2024-01-31.png").unwrap();
        let times = req.candidate_times();

        assert_eq!(times.len(), 31);
        assert_eq!(iso_instant(&times[0]), "2024-01-30T15:00:00.000Z");
        assert_eq!(iso_instant(&times[30]), "2023-12-31T15:00:00.000Z");
        for pair in times.windows(2) {
            assert_eq!(pair[0] - pair[1], Duration::days(1));
        }
    }

    #[test]
    fn test_rfc3339_anchor_is_taken_as_local_time() {
        let (req, _) = SeriesRequest::parse("mona_jpy", "2024-03-01T12:00:00+09:00").unwrap();
        assert_eq!(iso_instant(&req.candidate_times()[0]), "2024-03-01T03:00:00.000Z");

        let (req, _) = SeriesRequest::parse("mona_jpy", "2024-01-31T00:00:00Z.svg").unwrap();
        assert_eq!(iso_instant(&req.candidate_times()[0]), "2024-01-31T00:00:00.000Z");
    }

    #[test]
    fn test_anchor_date_is_local_calendar_day() {
        let (req, _) = SeriesRequest::parse("btc_jpy", "2024-03-01T02:00:00+09:00.svg").unwrap();
        assert_eq!(req.anchor_date(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        let first = req.candidate_times()[0];
        assert_eq!(crate::models::local_day_label(&first), "3/1");
    }

    #[test]
    fn test_offsetless_datetime_is_local_time() {
        let (req, format) = SeriesRequest::parse("btc_jpy", "2024-01-31T10:00:00.svg").unwrap();
        assert_eq!(format, ImageFormat::Svg);
        assert_eq!(req.anchor_date(), NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
        assert_eq!(iso_instant(&req.candidate_times()[0]), "2024-01-31T01:00:00.000Z");
    }
}
