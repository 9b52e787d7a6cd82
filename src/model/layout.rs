use chrono::NaiveDate;

use super::bounds::TimelineBounds;
use super::milestone::TimelineItem;
use crate::error::ParseError;

/// Horizontal placement of a bar, as percentages of the track width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarLayout {
    pub left_percent: f32,
    pub width_percent: f32,
}

impl BarLayout {
    pub fn right_percent(&self) -> f32 {
        self.left_percent + self.width_percent
    }

    /// Convert to pixel `(x, width)` on a track `track_width` pixels wide.
    pub fn to_pixels(&self, track_width: f32) -> (f32, f32) {
        (
            self.left_percent / 100.0 * track_width,
            self.width_percent / 100.0 * track_width,
        )
    }
}

/// Place a bar for already parsed dates.
pub fn layout_span(start: NaiveDate, end: NaiveDate, bounds: &TimelineBounds) -> BarLayout {
    let total_days = bounds.total_days() as f32;
    let start_offset = bounds.days_from_min(start).max(0.0);
    let duration = ((end - start).num_days() as f32).max(1.0);
    BarLayout {
        left_percent: start_offset / total_days * 100.0,
        width_percent: duration / total_days * 100.0,
    }
}

/// Place a milestone's bar within `bounds`. Bars that start before the
/// window are pinned to its left edge; zero or negative durations render
/// one day wide.
pub fn layout_bar(item: &TimelineItem, bounds: &TimelineBounds) -> Result<BarLayout, ParseError> {
    let (start, end) = item.span()?;
    Ok(layout_span(start, end, bounds))
}

/// Position of `today` as a percentage of the window. Not clamped: a date
/// outside the window yields a value below 0 or above 100.
pub fn today_position(bounds: &TimelineBounds, today: NaiveDate) -> f32 {
    bounds.days_from_min(today) / bounds.total_days() as f32 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, day).unwrap()
    }

    fn window() -> TimelineBounds {
        TimelineBounds {
            min_date: d(3, 6),
            max_date: d(3, 19),
        }
    }

    #[test]
    fn test_bar_percentages() {
        let item = TimelineItem::new("P", "Trenching", d(3, 10), d(3, 15));
        let bar = layout_bar(&item, &window()).unwrap();
        assert!((bar.left_percent - 30.77).abs() < 0.01);
        assert!((bar.width_percent - 38.46).abs() < 0.01);
    }

    #[test]
    fn test_zero_duration_has_one_day_width() {
        let item = TimelineItem::new("P", "Handover", d(3, 12), d(3, 12));
        let bar = layout_bar(&item, &window()).unwrap();
        assert!(bar.width_percent > 0.0);
        assert!((bar.width_percent - 100.0 / 13.0).abs() < 1e-4);
    }

    #[test]
    fn test_negative_duration_clamped() {
        let bar = layout_span(d(3, 12), d(3, 8), &window());
        assert!((bar.width_percent - 100.0 / 13.0).abs() < 1e-4);
    }

    #[test]
    fn test_early_start_pinned_left() {
        let bar = layout_span(d(3, 1), d(3, 8), &window());
        assert_eq!(bar.left_percent, 0.0);
    }

    #[test]
    fn test_to_pixels() {
        let bar = BarLayout {
            left_percent: 25.0,
            width_percent: 10.0,
        };
        let (x, w) = bar.to_pixels(800.0);
        assert!((x - 200.0).abs() < 1e-3);
        assert!((w - 80.0).abs() < 1e-3);
        assert_eq!(bar.right_percent(), 35.0);
    }

    #[test]
    fn test_today_position_unclamped() {
        assert!((today_position(&window(), d(3, 12)) - 46.15).abs() < 0.01);
        assert!(today_position(&window(), d(3, 1)) < 0.0);
        assert!(today_position(&window(), d(3, 30)) > 100.0);
    }

    #[test]
    fn test_unparseable_item_is_reported() {
        let mut item = TimelineItem::new("P", "Bad", d(3, 10), d(3, 11));
        item.start_date = "garbage".to_string();
        assert!(matches!(
            layout_bar(&item, &window()),
            Err(ParseError::Shape { .. })
        ));
    }
}
