use egui::{RichText, Ui};

use crate::model::TimelineItem;
use crate::ui::theme;

/// Actions the what-if editor can request.
pub enum EditorAction {
    None,
    /// Shadow the milestone with these values for this session.
    Override(TimelineItem),
    /// Drop the session override and show the source milestone again.
    Reset,
    Close,
}

/// Render the what-if editor for the selected milestone. Changes are
/// session-only overrides, never written back to the data.
pub fn show_override_editor(item: &TimelineItem, is_overridden: bool, ui: &mut Ui) -> EditorAction {
    let mut action = EditorAction::None;

    ui.add_space(6.0);
    ui.horizontal(|ui| {
        ui.label(
            RichText::new("What-if Dates")
                .strong()
                .size(13.0)
                .color(theme::TEXT_PRIMARY),
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .add(egui::Button::new(egui_phosphor::regular::X).frame(false))
                .on_hover_text("Close editor")
                .clicked()
            {
                action = EditorAction::Close;
            }
        });
    });
    ui.add_space(4.0);

    let frame = egui::Frame {
        fill: theme::BG_DARK,
        rounding: egui::Rounding::same(4.0),
        inner_margin: egui::Margin::same(8.0),
        outer_margin: egui::Margin::ZERO,
        stroke: egui::Stroke::new(1.0, theme::BORDER_SUBTLE),
        shadow: egui::epaint::Shadow::NONE,
    };

    frame.show(ui, |ui| {
        ui.spacing_mut().item_spacing.y = 6.0;
        ui.label(RichText::new(&item.label).size(12.0).strong());
        ui.label(
            RichText::new(&item.group_key)
                .size(10.0)
                .color(theme::TEXT_DIM),
        );

        let (mut start, mut end) = match item.span() {
            Ok(span) => span,
            Err(e) => {
                ui.label(
                    RichText::new(format!("{} {}", egui_phosphor::regular::WARNING, e))
                        .size(11.0)
                        .color(theme::TEXT_WARNING),
                );
                return;
            }
        };

        let mut changed = false;
        ui.horizontal(|ui| {
            ui.label(RichText::new("Start").size(10.0).color(theme::TEXT_DIM).strong());
            changed |= ui
                .add(egui_extras::DatePickerButton::new(&mut start).id_salt("whatif_start"))
                .changed();
        });
        ui.horizontal(|ui| {
            ui.label(RichText::new("End").size(10.0).color(theme::TEXT_DIM).strong());
            changed |= ui
                .add(egui_extras::DatePickerButton::new(&mut end).id_salt("whatif_end"))
                .changed();
        });
        if changed {
            action = EditorAction::Override(item.with_dates(start, end.max(start)));
        }

        if is_overridden {
            ui.label(
                RichText::new("Showing what-if dates (not saved)")
                    .size(10.0)
                    .color(theme::OVERRIDE_OUTLINE),
            );
            if ui.button("Reset to source dates").clicked() {
                action = EditorAction::Reset;
            }
        }
    });

    action
}
