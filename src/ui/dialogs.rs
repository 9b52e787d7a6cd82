use crate::app::TimelineApp;
use crate::model::date_token::MONTH_TOKENS;
use crate::ui::theme;
use egui::{Context, RichText, Window};

pub fn show_about_dialog(app: &mut TimelineApp, ctx: &Context) {
    let mut should_close = false;
    Window::new("About")
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([320.0, 200.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.heading(RichText::new("Fiber Timeline").strong());
                ui.add_space(2.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                        .color(theme::TEXT_SECONDARY),
                );
                ui.add_space(10.0);
                ui.label("Milestone timelines for fiber roll-out projects,");
                ui.label("built with Rust and egui.");
                ui.add_space(14.0);
                if ui.add_sized([100.0, 28.0], egui::Button::new("Close")).clicked() {
                    should_close = true;
                }
            });
        });
    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_about = false;
    }
}

/// Render the "CSV Import Format" help dialog.
pub fn show_csv_help_dialog(app: &mut TimelineApp, ctx: &Context) {
    let mut should_close = false;
    Window::new(RichText::new("CSV Import Format").strong().size(14.0))
        .resizable(true)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .default_size([520.0, 360.0])
        .show(ctx, |ui| {
            ui.add_space(4.0);
            ui.label("One milestone per row. Delimiter (; , or tab) is detected.");
            ui.add_space(6.0);
            egui::Grid::new("csv_help_grid")
                .num_columns(2)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    let row = |ui: &mut egui::Ui, column: &str, aliases: &str| {
                        ui.label(RichText::new(column).strong());
                        ui.label(RichText::new(aliases).color(theme::TEXT_SECONDARY));
                        ui.end_row();
                    };
                    row(ui, "Project", "project, site, group (optional: file name)");
                    row(ui, "Milestone", "milestone, label, name, task");
                    row(ui, "Start", "start, start date, from, begin");
                    row(ui, "End", "end, end date, to, finish, due");
                    row(ui, "Status", "status, state, progress (optional)");
                });
            ui.add_space(8.0);
            ui.label(format!(
                "Dates: 'DD Mon YYYY' with months {}, or YYYY-MM-DD / DD/MM/YYYY.",
                MONTH_TOKENS.join(" ")
            ));
            ui.add_space(10.0);
            if ui.button("Close").clicked() {
                should_close = true;
            }
        });
    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_csv_help = false;
    }
}
