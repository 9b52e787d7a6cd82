use chrono::{Duration, NaiveDate};

use super::bounds::TimelineBounds;

/// One labeled date on the header axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub date: NaiveDate,
    /// Day offset from the window start, for positioning.
    pub offset_days: i64,
    pub is_today: bool,
}

/// Days between consecutive ticks. Below zoom 1.0 labels are thinned out.
pub fn day_increment(zoom_level: f32) -> i64 {
    if zoom_level < 1.0 {
        (1.0 / zoom_level.max(f32::EPSILON)).ceil() as i64
    } else {
        1
    }
}

/// Lazy tick sequence over a window. Holds no state beyond its cursor, so a
/// fresh call to [`generate_ticks`] always starts from the beginning.
#[derive(Debug, Clone)]
pub struct Ticks {
    min_date: NaiveDate,
    total_days: i64,
    step: i64,
    next: i64,
    today: NaiveDate,
}

impl Iterator for Ticks {
    type Item = Tick;

    fn next(&mut self) -> Option<Tick> {
        if self.next > self.total_days {
            return None;
        }
        let offset_days = self.next;
        self.next += self.step;
        let date = self.min_date + Duration::days(offset_days);
        Some(Tick {
            date,
            offset_days,
            is_today: date == self.today,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.next > self.total_days {
            0
        } else {
            ((self.total_days - self.next) / self.step + 1) as usize
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Ticks {}

pub fn generate_ticks(bounds: &TimelineBounds, zoom_level: f32, today: NaiveDate) -> Ticks {
    Ticks {
        min_date: bounds.min_date,
        total_days: bounds.total_days(),
        step: day_increment(zoom_level),
        next: 0,
        today,
    }
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
    fn test_day_increment_by_zoom() {
        assert_eq!(day_increment(0.5), 2);
        assert_eq!(day_increment(0.7), 2);
        assert_eq!(day_increment(0.9), 2);
        assert_eq!(day_increment(1.0), 1);
        assert_eq!(day_increment(3.0), 1);
    }

    #[test]
    fn test_daily_ticks_cover_window_inclusive() {
        let ticks: Vec<Tick> = generate_ticks(&window(), 1.0, d(3, 12)).collect();
        assert_eq!(ticks.len(), 14);
        assert_eq!(ticks.first().unwrap().date, d(3, 6));
        assert_eq!(ticks.last().unwrap().date, d(3, 19));
        let today: Vec<_> = ticks.iter().filter(|t| t.is_today).collect();
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].offset_days, 6);
    }

    #[test]
    fn test_zoomed_out_ticks_skip_days() {
        let ticks: Vec<Tick> = generate_ticks(&window(), 0.5, d(3, 7)).collect();
        let offsets: Vec<i64> = ticks.iter().map(|t| t.offset_days).collect();
        assert_eq!(offsets, vec![0, 2, 4, 6, 8, 10, 12]);
        // Today falls between labels.
        assert!(ticks.iter().all(|t| !t.is_today));
    }

    #[test]
    fn test_sequence_is_restartable() {
        let bounds = window();
        let first: Vec<Tick> = generate_ticks(&bounds, 1.0, d(3, 12)).collect();
        let second: Vec<Tick> = generate_ticks(&bounds, 1.0, d(3, 12)).collect();
        assert_eq!(first, second);
        assert_eq!(generate_ticks(&bounds, 1.0, d(3, 12)).len(), first.len());
    }
}
