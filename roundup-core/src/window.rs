use crate::error::DigestError;
use crate::post::PostRecord;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Closed creation-time interval `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeWindow {
    /// Build a window, rejecting `start > end`.
    ///
    /// ```
    /// use chrono::{Duration, Utc};
    /// use roundup_core::{DigestError, TimeWindow};
    ///
    /// let now = Utc::now();
    /// assert!(TimeWindow::new(now, now).is_ok());
    /// assert!(matches!(
    ///     TimeWindow::new(now, now - Duration::days(1)),
    ///     Err(DigestError::InvalidRange { .. })
    /// ));
    /// ```
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, DigestError> {
        if start > end {
            return Err(DigestError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Window between two calendar dates, each taken at midnight UTC.
    ///
    /// The end date contributes only its first instant, so a window of
    /// `2024-05-01..=2024-05-08` covers posts up to `2024-05-08T00:00:00Z`.
    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Result<Self, DigestError> {
        Self::new(midnight_utc(start), midnight_utc(end))
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.start <= ts && ts <= self.end
    }
}

fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Keep the posts created inside `window`, in input order.
pub fn filter_window(posts: &[PostRecord], window: &TimeWindow) -> Vec<PostRecord> {
    posts
        .iter()
        .filter(|post| window.contains(post.created_at()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, d, 0, 0, 0).unwrap()
    }

    fn post(text: &str, at: DateTime<Utc>) -> PostRecord {
        PostRecord::new(text, 0, 0, at)
    }

    #[test]
    fn bounds_are_inclusive() {
        let window = TimeWindow::new(day(2), day(4)).unwrap();
        let posts = vec![
            post("before", day(1)),
            post("start", day(2)),
            post("inside", day(3)),
            post("end", day(4)),
            post("after", day(5)),
        ];

        let kept: Vec<_> = filter_window(&posts, &window)
            .iter()
            .map(|p| p.text().to_string())
            .collect();
        assert_eq!(kept, vec!["start", "inside", "end"]);
    }

    #[test]
    fn preserves_input_order() {
        let window = TimeWindow::new(day(1), day(9)).unwrap();
        let posts = vec![post("c", day(7)), post("a", day(2)), post("b", day(5))];

        let kept: Vec<_> = filter_window(&posts, &window)
            .iter()
            .map(|p| p.text().to_string())
            .collect();
        assert_eq!(kept, vec!["c", "a", "b"]);
    }

    #[test]
    fn no_match_is_empty_not_error() {
        let window = TimeWindow::new(day(10), day(12)).unwrap();
        let posts = vec![post("a", day(1)), post("b", day(2))];
        assert!(filter_window(&posts, &window).is_empty());
        assert!(filter_window(&[], &window).is_empty());
    }

    #[test]
    fn filtering_is_idempotent() {
        let window = TimeWindow::new(day(2), day(6)).unwrap();
        let posts: Vec<_> = (1..=8).map(|d| post(&format!("p{d}"), day(d))).collect();

        let once = filter_window(&posts, &window);
        let twice = filter_window(&once, &window);
        assert_eq!(once, twice);
        assert_eq!(once.len(), 5);
    }

    #[test]
    fn input_is_untouched() {
        let window = TimeWindow::new(day(2), day(3)).unwrap();
        let posts = vec![post("a", day(1)), post("b", day(2))];
        let snapshot = posts.clone();
        let _ = filter_window(&posts, &window);
        assert_eq!(posts, snapshot);
    }

    #[test]
    fn reversed_range_is_rejected() {
        let err = TimeWindow::new(day(5), day(1)).unwrap_err();
        assert!(matches!(err, DigestError::InvalidRange { .. }));
    }

    #[test]
    fn dates_map_to_midnight_utc() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 8).unwrap();
        let window = TimeWindow::from_dates(start, end).unwrap();

        assert_eq!(window.start(), day(1));
        assert_eq!(window.end(), day(8));
        assert!(window.contains(day(8)));
        assert!(!window.contains(Utc.with_ymd_and_hms(2024, 3, 8, 0, 0, 1).unwrap()));
    }
}
