//! One rendered project timeline: its milestones, viewport, drag controller
//! and the geometry derived from them.

use chrono::NaiveDate;
use uuid::Uuid;

use super::bounds::{compute_bounds, TimelineBounds};
use super::document::PointerDocument;
use super::grouping::sort_by_start;
use super::interaction::{DragUpdate, InteractionController, PointerTarget, Propagation};
use super::layout::{layout_bar, today_position, BarLayout};
use super::milestone::TimelineItem;
use super::overrides::OverrideMap;
use super::scroll::ScrollAnimation;
use super::ticks::{generate_ticks, Ticks};
use super::viewport::ViewportState;
use crate::error::ParseError;

/// State changes that may schedule follow-up work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Mounted,
    GroupChanged,
    ZoomReset,
    DataChanged,
}

/// Follow-up work run once the layout has settled and no drag is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    ScrollToToday,
}

pub fn reactions_for(transition: Transition) -> &'static [Reaction] {
    match transition {
        Transition::Mounted | Transition::GroupChanged | Transition::ZoomReset => {
            &[Reaction::ScrollToToday]
        }
        Transition::DataChanged => &[],
    }
}

/// A milestone with its resolved placement.
#[derive(Debug, Clone)]
pub struct PlacedBar {
    pub item: TimelineItem,
    pub layout: Result<BarLayout, ParseError>,
    /// True when a session override shadows the source milestone.
    pub overridden: bool,
}

#[derive(Debug)]
pub struct Timeline {
    group_key: String,
    source: Vec<TimelineItem>,
    overrides: OverrideMap,
    /// `source` with overrides applied, sorted by start date.
    items: Vec<TimelineItem>,
    today: NaiveDate,
    viewport: ViewportState,
    controller: InteractionController,
    bounds: TimelineBounds,
    pending: Vec<Reaction>,
    animation: Option<ScrollAnimation>,
}

impl Timeline {
    pub fn new(
        group_key: impl Into<String>,
        items: Vec<TimelineItem>,
        today: NaiveDate,
        day_width: f32,
    ) -> Self {
        let viewport = ViewportState::new(day_width);
        let bounds = compute_bounds(&[], viewport.zoom_level(), today);
        let mut timeline = Self {
            group_key: group_key.into(),
            source: items,
            overrides: OverrideMap::new(),
            items: Vec::new(),
            today,
            viewport,
            controller: InteractionController::new(),
            bounds,
            pending: Vec::new(),
            animation: None,
        };
        timeline.refresh();
        timeline.react(Transition::Mounted);
        timeline
    }

    // ── Getters ─────────────────────────────────────────────────

    pub fn group_key(&self) -> &str {
        &self.group_key
    }

    /// Resolved milestones in display order.
    pub fn items(&self) -> &[TimelineItem] {
        &self.items
    }

    pub fn bounds(&self) -> TimelineBounds {
        self.bounds
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn overrides(&self) -> &OverrideMap {
        &self.overrides
    }

    pub fn zoom_level(&self) -> f32 {
        self.viewport.zoom_level()
    }

    pub fn scroll_offset(&self) -> f32 {
        self.viewport.scroll_offset()
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn pending_reactions(&self) -> &[Reaction] {
        &self.pending
    }

    // ── Derived geometry ────────────────────────────────────────

    pub fn ticks(&self) -> Ticks {
        generate_ticks(&self.bounds, self.zoom_level(), self.today)
    }

    pub fn bars(&self) -> Vec<PlacedBar> {
        self.items
            .iter()
            .map(|item| PlacedBar {
                layout: layout_bar(item, &self.bounds),
                overridden: self.overrides.contains(item.id),
                item: item.clone(),
            })
            .collect()
    }

    pub fn today_percent(&self) -> f32 {
        today_position(&self.bounds, self.today)
    }

    /// Calendar day under the viewport's horizontal midpoint.
    pub fn center_date(&self) -> NaiveDate {
        self.viewport.x_to_date(&self.bounds, self.viewport.center_x())
    }

    /// Scroll offset that puts today in the middle of the viewport.
    pub fn today_scroll_target(&self) -> f32 {
        let fraction = self.today_percent() / 100.0;
        (fraction * self.viewport.content_width() - self.viewport.viewport_width() / 2.0).max(0.0)
    }

    // ── Data ────────────────────────────────────────────────────

    /// Replace the milestones of the current project (e.g. after a reload).
    pub fn set_items(&mut self, items: Vec<TimelineItem>) {
        self.source = items;
        self.refresh();
        self.react(Transition::DataChanged);
    }

    /// Show a different project. Any drag is abandoned and zoom resets.
    pub fn switch_group(&mut self, group_key: impl Into<String>, items: Vec<TimelineItem>) {
        self.controller.cancel();
        self.animation = None;
        self.group_key = group_key.into();
        self.source = items;
        self.viewport.reset();
        self.refresh();
        self.react(Transition::GroupChanged);
        log::info!(
            "Switched timeline to '{}' ({} milestones)",
            self.group_key,
            self.items.len()
        );
    }

    pub fn set_today(&mut self, today: NaiveDate) {
        if today != self.today {
            self.today = today;
            self.refresh();
        }
    }

    /// Shadow a milestone for this session only.
    pub fn set_override(&mut self, item: TimelineItem) {
        self.overrides.set(item);
        self.refresh();
    }

    pub fn clear_override(&mut self, id: Uuid) {
        if self.overrides.remove(id).is_some() {
            self.refresh();
        }
    }

    /// Drop every session override. Returns how many were dropped.
    pub fn clear_overrides(&mut self) -> usize {
        let count = self.overrides.len();
        if count > 0 {
            self.overrides.clear();
            self.refresh();
        }
        count
    }

    /// The milestone as supplied, ignoring overrides.
    pub fn source_item(&self, id: Uuid) -> Option<&TimelineItem> {
        self.source.iter().find(|item| item.id == id)
    }

    // ── Viewport ────────────────────────────────────────────────

    /// The host reports the visible width of the track.
    pub fn set_viewport_width(&mut self, width: f32) {
        if (width - self.viewport.viewport_width()).abs() > f32::EPSILON {
            self.viewport.set_viewport_width(width);
            self.relayout();
        }
    }

    /// Apply a scroll the host performed natively (wheel, scrollbar).
    /// Ignored while a drag or animation owns the offset.
    pub fn sync_native_scroll(&mut self, offset: f32) {
        if self.controller.is_idle() && self.animation.is_none() {
            self.viewport.set_scroll_offset(offset);
        }
    }

    /// Change zoom keeping the date under the viewport center in place.
    /// Returns the zoom actually applied.
    pub fn zoom_to(&mut self, zoom: f32) -> f32 {
        let old_min = self.bounds.min_date;
        let center_days = self.center_days();

        let applied = self.viewport.set_zoom_level(zoom);
        self.relayout();

        let shift = (old_min - self.bounds.min_date).num_days() as f32;
        let fraction = (center_days + shift) / self.bounds.total_days() as f32;
        let half = self.viewport.viewport_width() / 2.0;
        self.viewport
            .set_scroll_offset(fraction * self.viewport.content_width() - half);
        applied
    }

    /// Back to zoom 1.0 and re-center on today. Ignored during a drag.
    pub fn reset_zoom(&mut self) {
        if !self.controller.is_idle() {
            return;
        }
        self.viewport.set_zoom_level(1.0);
        self.relayout();
        self.react(Transition::ZoomReset);
    }

    /// Ask for a smooth scroll to today on the next update.
    pub fn request_scroll_to_today(&mut self) {
        if !self.pending.contains(&Reaction::ScrollToToday) {
            self.pending.push(Reaction::ScrollToToday);
        }
    }

    // ── Pointer input ───────────────────────────────────────────

    pub fn pointer_down(
        &mut self,
        target: PointerTarget,
        x: f32,
        document: &mut PointerDocument,
    ) -> Propagation {
        let was_idle = self.controller.is_idle();
        let propagation = self
            .controller
            .pointer_down(target, x, &self.viewport, document);
        if was_idle && !self.controller.is_idle() {
            // The user takes over; an in-flight auto scroll must not fight them.
            self.animation = None;
        }
        propagation
    }

    pub fn pointer_move(&mut self, x: f32) {
        match self.controller.pointer_move(x) {
            DragUpdate::None => {}
            DragUpdate::Scroll(offset) => {
                self.viewport.set_scroll_offset(offset);
            }
            DragUpdate::Zoom(zoom) => {
                if (zoom - self.zoom_level()).abs() > f32::EPSILON {
                    self.zoom_to(zoom);
                }
            }
        }
    }

    /// Release on the timeline itself.
    pub fn pointer_up(&mut self) -> bool {
        self.controller.pointer_up()
    }

    /// Pick up releases the window saw outside the timeline.
    pub fn poll_document(&mut self) -> bool {
        self.controller.poll_release()
    }

    /// Abandon any drag, e.g. before the view goes away.
    pub fn cancel_drag(&mut self) {
        self.controller.cancel();
    }

    /// Advance reactions and animations to time `now` (seconds). Returns
    /// true while more frames are needed.
    pub fn update(&mut self, now: f64) -> bool {
        self.poll_document();

        let settled = self.controller.is_idle() && self.viewport.viewport_width() > 0.0;
        if settled {
            for reaction in std::mem::take(&mut self.pending) {
                match reaction {
                    Reaction::ScrollToToday => {
                        // Replaces whatever animation was running.
                        self.animation = Some(ScrollAnimation::new(
                            self.scroll_offset(),
                            self.today_scroll_target(),
                            now,
                        ));
                    }
                }
            }
        }

        if let Some(animation) = self.animation {
            let (offset, done) = animation.sample(now);
            self.viewport.set_scroll_offset(offset);
            if done {
                self.animation = None;
            }
        }

        self.animation.is_some() || !self.pending.is_empty()
    }

    // ── Internals ───────────────────────────────────────────────

    fn refresh(&mut self) {
        self.items = sort_by_start(&self.overrides.resolve_all(&self.source));
        self.relayout();
    }

    fn relayout(&mut self) {
        self.bounds = compute_bounds(&self.items, self.zoom_level(), self.today);
        self.viewport.relayout(self.bounds.total_days());
    }

    fn react(&mut self, transition: Transition) {
        for reaction in reactions_for(transition) {
            if !self.pending.contains(reaction) {
                self.pending.push(*reaction);
            }
        }
    }

    /// Days from the window start to the viewport midpoint.
    fn center_days(&self) -> f32 {
        self.viewport.center_fraction() * self.bounds.total_days() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::date_token;

    fn date(s: &str) -> NaiveDate {
        date_token::parse(s).unwrap()
    }

    fn sample() -> Timeline {
        let items = vec![TimelineItem::new(
            "Ring A",
            "Trenching",
            date("10 Mar 2025"),
            date("15 Mar 2025"),
        )];
        let mut timeline = Timeline::new("Ring A", items, date("12 Mar 2025"), 36.0);
        timeline.set_viewport_width(200.0);
        timeline
    }

    #[test]
    fn test_mount_schedules_scroll_to_today() {
        let mut timeline = sample();
        assert_eq!(timeline.pending_reactions(), &[Reaction::ScrollToToday]);
        assert!(timeline.update(0.0));
        assert!(timeline.pending_reactions().is_empty());
        assert!(timeline.is_animating());
        assert!(!timeline.update(10.0));
        let expected = timeline.today_scroll_target();
        assert!((timeline.scroll_offset() - expected).abs() < 0.01);
    }

    #[test]
    fn test_reactions_wait_for_drag_to_finish() {
        let mut doc = PointerDocument::new();
        let mut timeline = sample();
        timeline.pointer_down(PointerTarget::Track, 0.0, &mut doc);
        timeline.update(0.0);
        assert!(!timeline.is_animating());
        assert_eq!(timeline.pending_reactions().len(), 1);

        doc.pointer_up();
        timeline.update(1.0);
        assert!(timeline.controller().is_idle());
        assert!(timeline.is_animating());
    }

    #[test]
    fn test_data_refresh_does_not_recenter() {
        let mut timeline = sample();
        timeline.update(0.0);
        timeline.update(10.0);
        let items = timeline.items().to_vec();
        timeline.set_items(items);
        assert!(timeline.pending_reactions().is_empty());
    }

    #[test]
    fn test_switch_group_resets_state() {
        let mut doc = PointerDocument::new();
        let mut timeline = sample();
        timeline.zoom_to(2.5);
        timeline.pointer_down(PointerTarget::ZoomStrip, 10.0, &mut doc);
        assert_eq!(doc.active_listeners(), 1);

        timeline.switch_group("Ring B", Vec::new());
        assert_eq!(timeline.group_key(), "Ring B");
        assert_eq!(timeline.zoom_level(), 1.0);
        assert!(timeline.controller().is_idle());
        assert_eq!(doc.active_listeners(), 0);
        assert_eq!(timeline.pending_reactions(), &[Reaction::ScrollToToday]);
        assert_eq!(timeline.bounds().total_days(), 14);
    }

    #[test]
    fn test_pointer_down_cancels_auto_scroll() {
        let mut doc = PointerDocument::new();
        let mut timeline = sample();
        timeline.update(0.0);
        assert!(timeline.is_animating());
        timeline.pointer_down(PointerTarget::Track, 5.0, &mut doc);
        assert!(!timeline.is_animating());
    }

    #[test]
    fn test_override_shadows_layout() {
        let mut timeline = sample();
        let id = timeline.items()[0].id;
        let moved = timeline.items()[0].with_dates(date("01 Apr 2025"), date("03 Apr 2025"));
        timeline.set_override(moved);
        assert!(timeline.bars()[0].overridden);
        assert_eq!(timeline.bounds().max_date, date("07 Apr 2025"));
        assert_eq!(timeline.source_item(id).unwrap().start_date, "10 Mar 2025");

        timeline.clear_override(id);
        assert!(!timeline.bars()[0].overridden);
        assert_eq!(timeline.bounds().max_date, date("19 Mar 2025"));
    }

    #[test]
    fn test_reset_zoom_recenters() {
        let mut timeline = sample();
        timeline.update(0.0);
        timeline.update(10.0);
        timeline.zoom_to(2.0);
        timeline.reset_zoom();
        assert_eq!(timeline.zoom_level(), 1.0);
        assert_eq!(timeline.pending_reactions(), &[Reaction::ScrollToToday]);
    }

    #[test]
    fn test_native_scroll_ignored_while_panning() {
        let mut doc = PointerDocument::new();
        let mut timeline = sample();
        timeline.update(0.0);
        timeline.update(10.0);
        timeline.sync_native_scroll(0.0);
        assert_eq!(timeline.scroll_offset(), 0.0);

        timeline.pointer_down(PointerTarget::Track, 100.0, &mut doc);
        timeline.sync_native_scroll(200.0);
        assert_eq!(timeline.scroll_offset(), 0.0);
        timeline.pointer_move(60.0);
        assert_eq!(timeline.scroll_offset(), 60.0);
    }
}
