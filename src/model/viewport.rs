use chrono::NaiveDate;

use super::bounds::TimelineBounds;

pub const MIN_ZOOM: f32 = 0.5;
pub const MAX_ZOOM: f32 = 3.0;
pub const DEFAULT_ZOOM: f32 = 1.0;

/// Pixels per day at zoom 1.0 unless configured otherwise.
pub const DEFAULT_DAY_WIDTH: f32 = 36.0;

/// Clamp a zoom level into the supported range. NaN resets to the default.
pub fn clamp_zoom(zoom: f32) -> f32 {
    if zoom.is_nan() {
        DEFAULT_ZOOM
    } else {
        zoom.clamp(MIN_ZOOM, MAX_ZOOM)
    }
}

/// Zoom and scroll of one rendered timeline, plus the track geometry the
/// host reports back (visible width and full content width).
#[derive(Debug, Clone)]
pub struct ViewportState {
    zoom_level: f32,
    scroll_offset: f32,
    viewport_width: f32,
    content_width: f32,
    /// Pixels per day at zoom 1.0.
    day_width: f32,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::new(DEFAULT_DAY_WIDTH)
    }
}

impl ViewportState {
    pub fn new(day_width: f32) -> Self {
        Self {
            zoom_level: DEFAULT_ZOOM,
            scroll_offset: 0.0,
            viewport_width: 0.0,
            content_width: 0.0,
            day_width: day_width.max(1.0),
        }
    }

    pub fn zoom_level(&self) -> f32 {
        self.zoom_level
    }

    /// Set the zoom, returning the clamped value actually applied.
    pub fn set_zoom_level(&mut self, zoom: f32) -> f32 {
        self.zoom_level = clamp_zoom(zoom);
        self.zoom_level
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    /// Set the scroll offset, clamped to the scrollable range.
    pub fn set_scroll_offset(&mut self, offset: f32) -> f32 {
        self.scroll_offset = if offset.is_nan() {
            0.0
        } else {
            offset.clamp(0.0, self.max_scroll())
        };
        self.scroll_offset
    }

    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    pub fn set_viewport_width(&mut self, width: f32) {
        self.viewport_width = width.max(0.0);
        self.content_width = self.content_width.max(self.viewport_width);
        self.set_scroll_offset(self.scroll_offset);
    }

    pub fn content_width(&self) -> f32 {
        self.content_width
    }

    pub fn day_width(&self) -> f32 {
        self.day_width
    }

    /// Furthest the track can scroll: content beyond the visible width.
    pub fn max_scroll(&self) -> f32 {
        (self.content_width - self.viewport_width).max(0.0)
    }

    /// Full track width for a window of `total_days` at the current zoom.
    /// Never narrower than the visible area.
    pub fn content_width_for(&self, total_days: i64) -> f32 {
        (total_days as f32 * self.day_width * self.zoom_level).max(self.viewport_width)
    }

    /// Recompute the content width after bounds or zoom changed.
    pub fn relayout(&mut self, total_days: i64) {
        self.content_width = self.content_width_for(total_days);
        self.set_scroll_offset(self.scroll_offset);
    }

    /// Horizontal pixel position of the viewport's midpoint in content space.
    pub fn center_x(&self) -> f32 {
        self.scroll_offset + self.viewport_width / 2.0
    }

    /// Midpoint as a fraction of the content width.
    pub fn center_fraction(&self) -> f32 {
        if self.content_width <= 0.0 {
            0.0
        } else {
            self.center_x() / self.content_width
        }
    }

    /// Convert a date to an x-pixel offset from the track start.
    pub fn date_to_x(&self, bounds: &TimelineBounds, date: NaiveDate) -> f32 {
        bounds.days_from_min(date) / bounds.total_days() as f32 * self.content_width
    }

    /// Convert an x-pixel offset back to a calendar day.
    pub fn x_to_date(&self, bounds: &TimelineBounds, x: f32) -> NaiveDate {
        if self.content_width <= 0.0 {
            return bounds.min_date;
        }
        bounds.date_at_fraction(x / self.content_width)
    }

    /// Back to zoom 1.0 at the start of the track.
    pub fn reset(&mut self) {
        self.zoom_level = DEFAULT_ZOOM;
        self.scroll_offset = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sized(viewport: f32, days: i64) -> ViewportState {
        let mut vp = ViewportState::new(40.0);
        vp.set_viewport_width(viewport);
        vp.relayout(days);
        vp
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut vp = ViewportState::default();
        assert_eq!(vp.set_zoom_level(10.0), MAX_ZOOM);
        assert_eq!(vp.set_zoom_level(0.1), MIN_ZOOM);
        assert_eq!(vp.set_zoom_level(f32::NAN), DEFAULT_ZOOM);
        assert_eq!(vp.set_zoom_level(1.7), 1.7);
    }

    #[test]
    fn test_scroll_is_clamped_to_scrollable_range() {
        let mut vp = sized(400.0, 20);
        assert_eq!(vp.content_width(), 800.0);
        assert_eq!(vp.max_scroll(), 400.0);
        assert_eq!(vp.set_scroll_offset(-50.0), 0.0);
        assert_eq!(vp.set_scroll_offset(1000.0), 400.0);
        assert_eq!(vp.set_scroll_offset(120.0), 120.0);
    }

    #[test]
    fn test_content_never_narrower_than_viewport() {
        let vp = sized(1000.0, 5);
        assert_eq!(vp.content_width(), 1000.0);
        assert_eq!(vp.max_scroll(), 0.0);
    }

    #[test]
    fn test_relayout_reclamps_scroll() {
        let mut vp = sized(400.0, 20);
        vp.set_scroll_offset(400.0);
        vp.set_zoom_level(0.5);
        vp.relayout(20);
        assert_eq!(vp.content_width(), 400.0);
        assert_eq!(vp.scroll_offset(), 0.0);
    }

    #[test]
    fn test_center_fraction() {
        let mut vp = sized(400.0, 20);
        vp.set_scroll_offset(200.0);
        assert_eq!(vp.center_x(), 400.0);
        assert_eq!(vp.center_fraction(), 0.5);
    }

    #[test]
    fn test_date_x_round_trip() {
        let vp = sized(400.0, 20);
        let bounds = TimelineBounds {
            min_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            max_date: NaiveDate::from_ymd_opt(2025, 3, 21).unwrap(),
        };
        let date = NaiveDate::from_ymd_opt(2025, 3, 11).unwrap();
        let x = vp.date_to_x(&bounds, date);
        assert_eq!(x, 400.0);
        assert_eq!(vp.x_to_date(&bounds, x), date);
    }
}
