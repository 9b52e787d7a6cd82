use egui::{Color32, RichText, Ui};
use uuid::Uuid;

use crate::model::Timeline;
use crate::ui::theme;

/// Render the milestone list of the active project. Returns the id of a
/// clicked row.
pub fn show_milestone_list(
    timeline: &Timeline,
    selected: Option<Uuid>,
    ui: &mut Ui,
) -> Option<Uuid> {
    let mut clicked = None;
    let items = timeline.items();

    ui.add_space(2.0);
    ui.horizontal(|ui| {
        ui.label(
            RichText::new("Milestones")
                .strong()
                .size(15.0)
                .color(theme::TEXT_PRIMARY),
        );
        ui.add_space(4.0);
        ui.label(
            RichText::new(format!("({})", items.len()))
                .size(11.0)
                .color(theme::TEXT_DIM),
        );
    });
    ui.add_space(4.0);
    ui.separator();

    egui::ScrollArea::vertical()
        .id_salt("milestone-list")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for (i, item) in items.iter().enumerate() {
                let is_selected = selected == Some(item.id);
                let readable = item.span().is_ok();
                let row_bg = if is_selected {
                    theme::BG_SELECTED
                } else if i % 2 == 0 {
                    theme::BG_PANEL
                } else {
                    theme::BG_DARK
                };

                let frame = egui::Frame {
                    fill: row_bg,
                    rounding: egui::Rounding::same(4.0),
                    inner_margin: egui::Margin::symmetric(6.0, 4.0),
                    outer_margin: egui::Margin::ZERO,
                    stroke: egui::Stroke::NONE,
                    shadow: egui::epaint::Shadow::NONE,
                };

                let frame_resp = frame.show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.spacing_mut().item_spacing.x = 6.0;

                        let (dot_rect, _) =
                            ui.allocate_exact_size(egui::vec2(6.0, 6.0), egui::Sense::hover());
                        ui.painter().circle_filled(
                            dot_rect.center(),
                            3.0,
                            theme::status_color(item.status.as_deref(), i),
                        );

                        let mut name = item.label.clone();
                        if timeline.overrides().contains(item.id) {
                            name.push_str(" *");
                        }
                        ui.add(
                            egui::Label::new(RichText::new(name).size(12.0).color(if is_selected {
                                Color32::WHITE
                            } else {
                                theme::TEXT_PRIMARY
                            }))
                            .truncate(),
                        );

                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.spacing_mut().item_spacing.x = 4.0;
                            if readable {
                                ui.label(
                                    RichText::new(format!("{} → {}", item.start_date, item.end_date))
                                        .size(10.0)
                                        .color(theme::TEXT_SECONDARY),
                                );
                            } else {
                                ui.label(
                                    RichText::new(format!(
                                        "{} unreadable date",
                                        egui_phosphor::regular::WARNING
                                    ))
                                    .size(10.0)
                                    .color(theme::TEXT_WARNING),
                                );
                            }
                        });
                    });
                });

                let row_click = ui.interact(
                    frame_resp.response.rect,
                    egui::Id::new(("milestone-row", item.id)),
                    egui::Sense::click(),
                );
                if row_click.clicked() {
                    clicked = Some(item.id);
                }

                ui.add_space(1.0);
            }
        });

    clicked
}
