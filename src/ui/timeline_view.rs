use chrono::Datelike;
use egui::{Align2, Color32, CursorIcon, Id, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};
use uuid::Uuid;

use crate::model::date_token;
use crate::model::interaction::CursorHint;
use crate::model::timeline::PlacedBar;
use crate::model::{PointerDocument, PointerTarget, Propagation, Timeline};
use crate::ui::theme;

const ROW_HEIGHT: f32 = theme::ROW_HEIGHT;
const ROW_PADDING: f32 = theme::ROW_GAP;
const HEADER_HEIGHT: f32 = theme::HEADER_HEIGHT;
const ZOOM_STRIP_HEIGHT: f32 = theme::ZOOM_STRIP_HEIGHT;

/// Result details from interactions in the timeline.
#[derive(Debug, Clone, Default)]
pub struct TimelineInteraction {
    pub selection_changed: bool,
}

/// Render the timeline area (central panel) and feed pointer input to the
/// timeline's drag controller.
pub fn show_timeline(
    timeline: &mut Timeline,
    document: &mut PointerDocument,
    selected: &mut Option<Uuid>,
    ui: &mut Ui,
) -> TimelineInteraction {
    let mut interaction = TimelineInteraction::default();
    let available = ui.available_size();
    timeline.set_viewport_width(available.x);

    let bars = timeline.bars();
    let content_width = timeline.viewport().content_width();
    let content_height = (HEADER_HEIGHT + bars.len() as f32 * (ROW_HEIGHT + ROW_PADDING) + 40.0)
        .max(available.y);

    let output = egui::ScrollArea::both()
        .id_salt("timeline-track")
        .auto_shrink([false, false])
        .drag_to_scroll(false)
        .horizontal_scroll_offset(timeline.scroll_offset())
        .show(ui, |ui| {
            let (response, painter) =
                ui.allocate_painter(Vec2::new(content_width, content_height), Sense::hover());
            let origin = response.rect.min;
            let mut consumed_click = false;

            let strip_rect = Rect::from_min_size(origin, Vec2::new(content_width, ZOOM_STRIP_HEIGHT));
            let track_rect = Rect::from_min_max(
                Pos2::new(origin.x, origin.y + HEADER_HEIGHT),
                response.rect.max,
            );
            let strip = ui.interact(strip_rect, Id::new("timeline-zoom-strip"), Sense::drag());
            let track = ui.interact(track_rect, Id::new("timeline-track-area"), Sense::click_and_drag());

            handle_pointer(timeline, document, &strip, &track, ui);

            painter.rect_filled(response.rect, 0.0, theme::BG_DARK);
            draw_rows(&painter, origin, content_width, bars.len());
            draw_header(&painter, origin, timeline, content_width, strip.hovered());
            draw_today_line(&painter, response.rect, timeline, content_height);

            for (i, bar) in bars.iter().enumerate() {
                let y = origin.y + HEADER_HEIGHT + i as f32 * (ROW_HEIGHT + ROW_PADDING) + ROW_PADDING;
                let is_selected = *selected == Some(bar.item.id);
                let Some(bar_rect) =
                    draw_bar(&painter, origin, content_width, bar, i, y, is_selected)
                else {
                    continue;
                };

                let bar_response = ui.interact(
                    bar_rect,
                    ui.make_persistent_id(("milestone-bar", bar.item.id)),
                    Sense::click(),
                );
                if bar_response.clicked() {
                    *selected = Some(bar.item.id);
                    interaction.selection_changed = true;
                    consumed_click = true;
                }
                if timeline.controller().is_idle() {
                    bar_response.on_hover_ui(|ui| bar_tooltip(ui, bar));
                }
            }

            // Empty click on the track clears selection
            if track.clicked() && !consumed_click && selected.is_some() {
                *selected = None;
                interaction.selection_changed = true;
            }

            if track.hovered() || !timeline.controller().is_idle() {
                ui.ctx().set_cursor_icon(cursor_icon(timeline.controller().cursor()));
            } else if strip.hovered() {
                ui.ctx().set_cursor_icon(CursorIcon::ResizeHorizontal);
            }
        });

    timeline.sync_native_scroll(output.state.offset.x);
    interaction
}

/// Translate egui responses into controller events. The zoom strip is asked
/// first; if it stops propagation the track never sees the press.
fn handle_pointer(
    timeline: &mut Timeline,
    document: &mut PointerDocument,
    strip: &egui::Response,
    track: &egui::Response,
    ui: &Ui,
) {
    let pointer_x = ui.input(|i| i.pointer.interact_pos()).map(|p| p.x);

    if let Some(x) = pointer_x {
        let mut propagation = Propagation::Continue;
        if strip.drag_started() {
            propagation = timeline.pointer_down(PointerTarget::ZoomStrip, x, document);
        }
        if propagation == Propagation::Continue && track.drag_started() {
            timeline.pointer_down(PointerTarget::Track, x, document);
        }
        if !timeline.controller().is_idle() {
            timeline.pointer_move(x);
        }
    }

    if strip.drag_stopped() || track.drag_stopped() {
        timeline.pointer_up();
    }
}

fn cursor_icon(hint: CursorHint) -> CursorIcon {
    match hint {
        CursorHint::Grab => CursorIcon::Grab,
        CursorHint::Grabbing => CursorIcon::Grabbing,
        CursorHint::ResizeHorizontal => CursorIcon::ResizeHorizontal,
    }
}

fn draw_rows(painter: &egui::Painter, origin: Pos2, width: f32, count: usize) {
    for i in 0..count {
        let y = origin.y + HEADER_HEIGHT + i as f32 * (ROW_HEIGHT + ROW_PADDING);
        let row_bg = if i % 2 == 0 {
            theme::BG_PANEL
        } else {
            theme::BG_DARK
        };
        painter.rect_filled(
            Rect::from_min_size(Pos2::new(origin.x, y), Vec2::new(width, ROW_HEIGHT + ROW_PADDING)),
            0.0,
            row_bg,
        );
        painter.line_segment(
            [
                Pos2::new(origin.x, y + ROW_HEIGHT + ROW_PADDING),
                Pos2::new(origin.x + width, y + ROW_HEIGHT + ROW_PADDING),
            ],
            Stroke::new(0.5, theme::BORDER_SUBTLE),
        );
    }
}

fn draw_header(
    painter: &egui::Painter,
    origin: Pos2,
    timeline: &Timeline,
    width: f32,
    strip_hovered: bool,
) {
    painter.rect_filled(
        Rect::from_min_size(origin, Vec2::new(width, HEADER_HEIGHT)),
        0.0,
        theme::BG_HEADER,
    );

    // Zoom strip
    let strip_fill = if strip_hovered || timeline.controller().is_zooming() {
        theme::BG_SELECTED
    } else {
        theme::BG_ZOOM_STRIP
    };
    painter.rect_filled(
        Rect::from_min_size(origin, Vec2::new(width, ZOOM_STRIP_HEIGHT)),
        0.0,
        strip_fill,
    );
    let hint = format!(
        "{}  drag to zoom · {:.0}%",
        egui_phosphor::regular::ARROWS_HORIZONTAL,
        timeline.zoom_level() * 100.0
    );
    painter.text(
        Pos2::new(origin.x + timeline.scroll_offset() + 8.0, origin.y + ZOOM_STRIP_HEIGHT / 2.0),
        Align2::LEFT_CENTER,
        hint,
        theme::font_small(),
        theme::TEXT_DIM,
    );

    painter.line_segment(
        [
            Pos2::new(origin.x, origin.y + HEADER_HEIGHT),
            Pos2::new(origin.x + width, origin.y + HEADER_HEIGHT),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );

    let total_days = timeline.bounds().total_days() as f32;
    for (i, tick) in timeline.ticks().enumerate() {
        let x = origin.x + tick.offset_days as f32 / total_days * width;

        painter.line_segment(
            [
                Pos2::new(x, origin.y + HEADER_HEIGHT),
                Pos2::new(x, origin.y + 2000.0),
            ],
            Stroke::new(0.5, theme::GRID_LINE),
        );

        let color = if tick.is_today {
            theme::TODAY_LINE
        } else if tick.date.weekday().num_days_from_monday() >= 5 {
            theme::TEXT_DIM
        } else {
            theme::TEXT_SECONDARY
        };
        painter.text(
            Pos2::new(x + 3.0, origin.y + HEADER_HEIGHT - 10.0),
            Align2::LEFT_CENTER,
            date_token::format_short(tick.date),
            theme::font_sub(),
            color,
        );

        if i == 0 || tick.date.day() == 1 {
            painter.text(
                Pos2::new(x + 3.0, origin.y + ZOOM_STRIP_HEIGHT + 8.0),
                Align2::LEFT_CENTER,
                tick.date.year().to_string(),
                theme::font_small(),
                theme::TEXT_PRIMARY,
            );
        }
    }
}

fn draw_today_line(painter: &egui::Painter, content: Rect, timeline: &Timeline, height: f32) {
    let x = content.min.x + timeline.today_percent() / 100.0 * content.width();
    // Outside the padded window the marker is simply clipped away.
    let clipped = painter.with_clip_rect(painter.clip_rect().intersect(content));

    clipped.line_segment(
        [
            Pos2::new(x, content.min.y + HEADER_HEIGHT),
            Pos2::new(x, content.min.y + height),
        ],
        Stroke::new(1.5, theme::TODAY_LINE),
    );

    let badge_w = 42.0;
    let badge_rect = Rect::from_min_size(
        Pos2::new(x - badge_w / 2.0, content.min.y + HEADER_HEIGHT - 1.0),
        Vec2::new(badge_w, 14.0),
    );
    clipped.rect_filled(badge_rect, Rounding::same(3.0), theme::TODAY_LINE);
    clipped.text(
        badge_rect.center(),
        Align2::CENTER_CENTER,
        "Today",
        theme::font_small(),
        Color32::WHITE,
    );
}

/// Paint one milestone row. Returns the bar rect, or `None` when the
/// milestone's dates could not be read.
fn draw_bar(
    painter: &egui::Painter,
    origin: Pos2,
    width: f32,
    bar: &PlacedBar,
    index: usize,
    y: f32,
    is_selected: bool,
) -> Option<Rect> {
    let layout = match &bar.layout {
        Ok(layout) => *layout,
        Err(e) => {
            painter.text(
                Pos2::new(origin.x + 8.0, y + ROW_HEIGHT / 2.0),
                Align2::LEFT_CENTER,
                format!("{} {}: {}", egui_phosphor::regular::WARNING, bar.item.label, e),
                theme::font_bar(),
                theme::TEXT_WARNING,
            );
            return None;
        }
    };

    let (x, bar_width) = layout.to_pixels(width);
    let inset = theme::BAR_INSET;
    let bar_rect = Rect::from_min_size(
        Pos2::new(origin.x + x, y + inset),
        Vec2::new(bar_width.max(4.0), ROW_HEIGHT - inset * 2.0),
    );
    let rounding = Rounding::same(theme::BAR_ROUNDING);
    let color = theme::status_color(bar.item.status.as_deref(), index);

    // Soft shadow
    painter.rect_filled(
        bar_rect.translate(Vec2::new(1.0, 2.0)),
        rounding,
        Color32::from_black_alpha(35),
    );
    painter.rect_filled(bar_rect, rounding, color);

    if bar.overridden {
        painter.rect_stroke(
            bar_rect.expand(1.0),
            Rounding::same(theme::BAR_ROUNDING + 1.0),
            Stroke::new(1.5, theme::OVERRIDE_OUTLINE),
        );
    }
    if is_selected {
        painter.rect_stroke(
            bar_rect.expand(2.5),
            Rounding::same(theme::BAR_ROUNDING + 2.5),
            Stroke::new(2.0, theme::BORDER_ACCENT),
        );
    }

    let galley = painter.layout_no_wrap(bar.item.label.clone(), theme::font_bar(), theme::TEXT_ON_BAR);
    if bar_rect.width() > galley.size().x + 12.0 {
        let text_y = bar_rect.top() + (bar_rect.height() - galley.size().y) / 2.0;
        painter.galley(
            Pos2::new(bar_rect.left() + 6.0, text_y),
            galley,
            Color32::TRANSPARENT,
        );
    } else {
        // Too narrow: label beside the bar
        painter.text(
            Pos2::new(bar_rect.right() + 6.0, bar_rect.center().y),
            Align2::LEFT_CENTER,
            &bar.item.label,
            theme::font_bar(),
            theme::TEXT_SECONDARY,
        );
    }

    Some(bar_rect)
}

fn bar_tooltip(ui: &mut Ui, bar: &PlacedBar) {
    ui.strong(&bar.item.label);
    ui.label(format!("{} → {}", bar.item.start_date, bar.item.end_date));
    if let Some(status) = &bar.item.status {
        ui.label(status);
    }
    if bar.overridden {
        ui.label(
            egui::RichText::new("What-if dates (not saved)")
                .small()
                .color(theme::OVERRIDE_OUTLINE),
        );
    }
}
