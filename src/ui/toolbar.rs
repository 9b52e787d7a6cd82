use crate::app::TimelineApp;
use crate::ui::theme;
use egui::{menu, RichText, Ui};

/// Render the top toolbar / menu bar.
pub fn show_toolbar(app: &mut TimelineApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font_menu()), |ui| {
            if ui.button("  Open Dataset...").clicked() {
                app.open_dataset();
                ui.close_menu();
            }
            if ui.button("  Import CSV...").clicked() {
                app.import_csv();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Load Sample Data").clicked() {
                app.load_sample();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  View  ").font(theme::font_menu()), |ui| {
            if ui.button("  Reset Zoom        Ctrl+0").clicked() {
                app.reset_zoom();
                ui.close_menu();
            }
            if ui.button("  Scroll to Today   Ctrl+T").clicked() {
                app.scroll_to_today();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Clear What-if Edits").clicked() {
                app.clear_overrides();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Open Log Folder").clicked() {
                app.open_log_folder();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  Help  ").font(theme::font_menu()), |ui| {
            if ui.button("CSV Format...").clicked() {
                app.show_csv_help = true;
                ui.close_menu();
            }
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        // Right-aligned dataset title
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(RichText::new(app.dataset_title()).size(11.0).weak());
        });
    });
}
