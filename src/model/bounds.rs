use chrono::{Duration, NaiveDate};

use super::milestone::TimelineItem;
use super::viewport::clamp_zoom;

/// Days shown either side of "today" when a project has no usable milestones.
pub const EMPTY_WINDOW_DAYS: i64 = 7;

/// Padding at zoom 1.0; shrinks as zoom grows.
const BASE_BUFFER_DAYS: f32 = 4.0;

/// The padded date window laid out for one project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineBounds {
    pub min_date: NaiveDate,
    pub max_date: NaiveDate,
}

impl TimelineBounds {
    /// Whole days between `min_date` and `max_date`. Always at least 1.
    pub fn total_days(&self) -> i64 {
        (self.max_date - self.min_date).num_days().max(1)
    }

    /// Fractional day offset of `date` from `min_date`.
    pub fn days_from_min(&self, date: NaiveDate) -> f32 {
        (date - self.min_date).num_days() as f32
    }

    /// The date at a fractional position (0.0 = min, 1.0 = max).
    pub fn date_at_fraction(&self, fraction: f32) -> NaiveDate {
        let days = (fraction * self.total_days() as f32).floor() as i64;
        self.min_date + Duration::days(days)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.min_date && date <= self.max_date
    }
}

/// Padding added on each side of the raw range at a given zoom.
pub fn buffer_days(zoom_level: f32) -> i64 {
    (BASE_BUFFER_DAYS / clamp_zoom(zoom_level)).ceil() as i64
}

/// Compute the padded window for a set of (already resolved) items.
///
/// Items whose dates fail to parse are left out; if none remain, the
/// window falls back to a fortnight centered on `today`.
pub fn compute_bounds(items: &[TimelineItem], zoom_level: f32, today: NaiveDate) -> TimelineBounds {
    let mut raw: Option<(NaiveDate, NaiveDate)> = None;
    for item in items {
        match item.span() {
            Ok((start, end)) => {
                raw = Some(match raw {
                    Some((lo, hi)) => (lo.min(start), hi.max(end)),
                    None => (start, end),
                });
            }
            Err(e) => {
                log::warn!("Leaving '{}' out of bounds: {}", item.label, e);
            }
        }
    }

    let Some((raw_min, raw_max)) = raw else {
        return TimelineBounds {
            min_date: today - Duration::days(EMPTY_WINDOW_DAYS),
            max_date: today + Duration::days(EMPTY_WINDOW_DAYS),
        };
    };

    // A lone item whose end precedes its start would invert the window.
    let raw_max = raw_max.max(raw_min);
    let buffer = Duration::days(buffer_days(zoom_level));
    TimelineBounds {
        min_date: raw_min - buffer,
        max_date: raw_max + buffer,
    }
}
