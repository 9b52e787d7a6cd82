use chrono::{Duration, NaiveDate};

use fiber_timeline::model::bounds::buffer_days;
use fiber_timeline::model::date_token::{self, MONTH_TOKENS};
use fiber_timeline::model::layout::layout_span;
use fiber_timeline::model::ticks::day_increment;
use fiber_timeline::model::{
    compute_bounds, PointerDocument, PointerTarget, Propagation, Timeline, TimelineItem,
};

fn date(s: &str) -> NaiveDate {
    date_token::parse(s).unwrap()
}

fn item(label: &str, start: &str, end: &str) -> TimelineItem {
    TimelineItem::new("Ring A", label, date(start), date(end))
}

fn close(a: f32, b: f32, tolerance: f32) -> bool {
    (a - b).abs() <= tolerance
}

/// A year of back-to-back milestones.
fn long_project() -> Vec<TimelineItem> {
    let first = date("06 Jan 2025");
    (0..26)
        .map(|i| {
            let start = first + Duration::days(i * 14);
            TimelineItem::new(
                "Ring A",
                format!("Segment {}", i + 1),
                start,
                start + Duration::days(10),
            )
        })
        .collect()
}

#[test]
fn every_month_token_parses_to_its_month() {
    for (index, token) in MONTH_TOKENS.iter().enumerate() {
        let parsed = date_token::parse(&format!("15 {} 2025", token)).unwrap();
        assert_eq!(chrono::Datelike::month(&parsed), index as u32 + 1, "{}", token);
    }
}

#[test]
fn buffer_shrinks_as_zoom_grows() {
    assert!(buffer_days(2.0) <= buffer_days(0.5));

    let items = vec![item("Survey", "01 Mar 2025", "20 Mar 2025")];
    let today = date("10 Mar 2025");
    let wide = compute_bounds(&items, 0.5, today);
    let narrow = compute_bounds(&items, 2.0, today);
    assert!(narrow.total_days() <= wide.total_days());
}

#[test]
fn bounds_never_degenerate() {
    let today = date("01 Jun 2025");
    let sets = vec![
        vec![item("Point", "01 Jun 2025", "01 Jun 2025")],
        vec![item("Inverted", "10 Jun 2025", "02 Jun 2025")],
        long_project(),
    ];
    for items in sets {
        for zoom in [0.5, 1.0, 3.0] {
            let bounds = compute_bounds(&items, zoom, today);
            assert!(bounds.max_date > bounds.min_date);
        }
    }
}

#[test]
fn single_day_milestone_has_visible_width() {
    let items = vec![item("Splice", "05 Mei 2025", "05 Mei 2025")];
    let bounds = compute_bounds(&items, 3.0, date("05 Mei 2025"));
    let bar = layout_span(date("05 Mei 2025"), date("05 Mei 2025"), &bounds);
    assert!(bar.width_percent > 0.0);
}

#[test]
fn tick_density_follows_zoom() {
    assert_eq!(day_increment(0.5), 2);
    assert_eq!(day_increment(1.0), 1);
    assert_eq!(day_increment(3.0), 1);
}

#[test]
fn zoom_keeps_center_date_within_a_day() {
    let today = date("01 Jul 2025");
    for (from, to) in [(1.0, 2.5), (1.0, 0.5), (0.5, 3.0), (3.0, 0.75), (1.5, 1.2)] {
        let mut timeline = Timeline::new("Ring A", long_project(), today, 36.0);
        timeline.set_viewport_width(800.0);
        timeline.zoom_to(from);
        let middle = timeline.viewport().max_scroll() / 2.0;
        timeline.sync_native_scroll(middle);

        let before = timeline.center_date();
        timeline.zoom_to(to);
        let after = timeline.center_date();

        let drift = (after - before).num_days().abs();
        assert!(drift <= 1, "{} -> {}: {} vs {}", from, to, before, after);
    }
}

#[test]
fn zoom_strip_drag_never_pans() {
    let mut doc = PointerDocument::new();
    let mut timeline = Timeline::new("Ring A", long_project(), date("01 Jul 2025"), 36.0);
    timeline.set_viewport_width(800.0);
    let scroll_before = timeline.scroll_offset();

    let propagation = timeline.pointer_down(PointerTarget::ZoomStrip, 300.0, &mut doc);
    assert_eq!(propagation, Propagation::Stop);
    // A second press from the same gesture must not start a pan.
    timeline.pointer_down(PointerTarget::Track, 300.0, &mut doc);

    for x in [320.0, 360.0, 420.0, 500.0] {
        timeline.pointer_move(x);
        assert!(!timeline.controller().is_panning());
    }
    assert!(timeline.controller().is_zooming());
    assert!(timeline.zoom_level() > 1.0);
    assert!(close(timeline.zoom_level(), 1.0 + 200.0 * 0.005, 1e-4));
    assert_ne!(timeline.scroll_offset(), scroll_before);
}

#[test]
fn release_outside_the_timeline_ends_the_pan() {
    let mut doc = PointerDocument::new();
    let mut timeline = Timeline::new("Ring A", long_project(), date("01 Jul 2025"), 36.0);
    timeline.set_viewport_width(800.0);

    timeline.pointer_down(PointerTarget::Track, 400.0, &mut doc);
    assert!(timeline.controller().is_panning());

    // Released somewhere else in the window.
    doc.pointer_up();
    timeline.poll_document();
    assert!(!timeline.controller().is_panning());
    assert_eq!(doc.active_listeners(), 0);

    // Later moves no longer scroll.
    let offset = timeline.scroll_offset();
    timeline.pointer_move(100.0);
    assert_eq!(timeline.scroll_offset(), offset);
}

#[test]
fn pointer_leaving_the_window_ends_the_zoom_drag() {
    let mut doc = PointerDocument::new();
    let mut timeline = Timeline::new("Ring A", long_project(), date("01 Jul 2025"), 36.0);
    timeline.set_viewport_width(800.0);

    timeline.pointer_down(PointerTarget::ZoomStrip, 10.0, &mut doc);
    doc.pointer_left();
    timeline.update(0.0);
    assert!(timeline.controller().is_idle());
}

#[test]
fn single_milestone_end_to_end() {
    let items = vec![item("Trenching", "10 Mar 2025", "15 Mar 2025")];
    let timeline = Timeline::new("Ring A", items, date("12 Mar 2025"), 36.0);

    let bounds = timeline.bounds();
    assert_eq!(bounds.min_date, date("06 Mar 2025"));
    assert_eq!(bounds.max_date, date("19 Mar 2025"));
    assert_eq!(bounds.total_days(), 13);

    let bars = timeline.bars();
    let layout = bars[0].layout.clone().unwrap();
    assert!(close(layout.left_percent, 30.77, 0.01));
    assert!(close(layout.width_percent, 38.46, 0.01));
    assert!(close(timeline.today_percent(), 46.15, 0.01));

    let ticks: Vec<_> = timeline.ticks().collect();
    assert_eq!(ticks.len(), 14);
    assert_eq!(ticks.iter().filter(|t| t.is_today).count(), 1);
}

#[test]
fn empty_project_centers_on_today() {
    let timeline = Timeline::new("Empty", Vec::new(), date("01 Jan 2025"), 36.0);
    let bounds = timeline.bounds();
    assert_eq!(bounds.min_date, date("25 Des 2024"));
    assert_eq!(bounds.max_date, date("08 Jan 2025"));
}

#[test]
fn unreadable_dates_are_reported_not_placed() {
    let mut broken = item("Survey", "01 Mar 2025", "03 Mar 2025");
    broken.end_date = "03 Xyz 2025".to_string();
    let items = vec![broken, item("Permits", "05 Mar 2025", "09 Mar 2025")];
    let timeline = Timeline::new("Ring A", items, date("06 Mar 2025"), 36.0);

    // Bounds come from the readable milestone only.
    assert_eq!(timeline.bounds().min_date, date("01 Mar 2025"));
    let bars = timeline.bars();
    assert_eq!(bars.len(), 2);
    assert_eq!(bars.iter().filter(|b| b.layout.is_err()).count(), 1);
}

#[test]
fn switching_projects_recenters_on_today() {
    let today = date("01 Jul 2025");
    let mut timeline = Timeline::new("Ring A", long_project(), today, 36.0);
    timeline.set_viewport_width(800.0);
    timeline.update(0.0);
    timeline.update(5.0);
    timeline.sync_native_scroll(0.0);

    timeline.switch_group("Ring B", long_project());
    timeline.update(10.0);
    assert!(timeline.is_animating());
    timeline.update(20.0);
    assert!(!timeline.is_animating());

    let center = timeline.center_date();
    assert!((center - today).num_days().abs() <= 1, "centered on {}", center);
}
