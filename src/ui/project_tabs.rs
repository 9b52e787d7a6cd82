use egui::{RichText, Ui};

use crate::model::scroll::ScrollAnimation;
use crate::ui::theme;

/// Scroll state of the project tab strip.
#[derive(Debug, Default)]
pub struct TabStrip {
    offset: f32,
    max_offset: f32,
    animation: Option<ScrollAnimation>,
}

impl TabStrip {
    /// Smooth-scroll by `delta` pixels. Replaces any scroll still running.
    pub fn scroll_by(&mut self, delta: f32, now: f64) {
        let from = self.offset;
        let base = self.animation.map(|a| a.target()).unwrap_or(from);
        let to = (base + delta).clamp(0.0, self.max_offset);
        self.animation = Some(ScrollAnimation::new(from, to, now));
    }

    /// Advance the animation; true while more frames are needed.
    fn step(&mut self, now: f64) -> bool {
        if let Some(animation) = self.animation {
            let (offset, done) = animation.sample(now);
            self.offset = offset;
            if done {
                self.animation = None;
            }
        }
        self.animation.is_some()
    }
}

/// Render the project tabs. Returns the key of a newly clicked tab.
pub fn show_project_tabs(
    strip: &mut TabStrip,
    keys: &[String],
    active: Option<&str>,
    ui: &mut Ui,
) -> Option<String> {
    let mut clicked = None;
    let now = ui.input(|i| i.time);
    if strip.step(now) {
        ui.ctx().request_repaint();
    }

    ui.horizontal(|ui| {
        ui.set_height(theme::TAB_HEIGHT);

        let left = ui.add_enabled(
            strip.offset > 0.0,
            egui::Button::new(egui_phosphor::regular::CARET_LEFT).frame(false),
        );
        if left.on_hover_text("Scroll projects left").clicked() {
            strip.scroll_by(-theme::TAB_SCROLL_STEP, now);
        }

        let arrow_space = 28.0;
        let strip_width = (ui.available_width() - arrow_space).max(0.0);
        let output = egui::ScrollArea::horizontal()
            .id_salt("project-tabs")
            .max_width(strip_width)
            .scroll_bar_visibility(egui::scroll_area::ScrollBarVisibility::AlwaysHidden)
            .horizontal_scroll_offset(strip.offset)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    for key in keys {
                        let is_active = active == Some(key.as_str());
                        let text = RichText::new(key).size(12.0).color(if is_active {
                            theme::TEXT_PRIMARY
                        } else {
                            theme::TEXT_SECONDARY
                        });
                        let tab = egui::Button::new(text)
                            .fill(if is_active {
                                theme::BG_SELECTED
                            } else {
                                theme::BG_PANEL
                            })
                            .rounding(egui::Rounding::same(5.0));
                        if ui.add(tab).clicked() && !is_active {
                            clicked = Some(key.clone());
                        }
                    }
                });
            });
        strip.max_offset = (output.content_size.x - output.inner_rect.width()).max(0.0);
        if strip.animation.is_none() {
            strip.offset = output.state.offset.x;
        }

        let right = ui.add_enabled(
            strip.offset < strip.max_offset,
            egui::Button::new(egui_phosphor::regular::CARET_RIGHT).frame(false),
        );
        if right.on_hover_text("Scroll projects right").clicked() {
            strip.scroll_by(theme::TAB_SCROLL_STEP, now);
        }
    });

    clicked
}
