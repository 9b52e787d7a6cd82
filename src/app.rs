use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use uuid::Uuid;

use crate::config::{AppSettings, SettingsStore};
use crate::model::{Dataset, PointerDocument, Timeline};
use crate::ui;
use crate::ui::override_editor::EditorAction;
use crate::ui::project_tabs::TabStrip;

/// Main application state.
pub struct TimelineApp {
    pub dataset: Dataset,
    pub dataset_path: Option<PathBuf>,
    pub timeline: Timeline,
    pub document: PointerDocument,
    pub tabs: TabStrip,
    pub selected: Option<Uuid>,

    // Dialog state
    pub show_about: bool,
    pub show_csv_help: bool,

    // Status message
    pub status_message: String,

    settings: AppSettings,
    settings_store: SettingsStore,
    log_dir: PathBuf,
}

impl TimelineApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: AppSettings,
        settings_store: SettingsStore,
        log_dir: PathBuf,
    ) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        Self::with_settings(settings, settings_store, log_dir)
    }

    /// Build the app state without a window; restores the last dataset
    /// and project when possible.
    pub fn with_settings(
        settings: AppSettings,
        settings_store: SettingsStore,
        log_dir: PathBuf,
    ) -> Self {
        let today = today();
        let mut status_message = "Ready".to_string();
        let (dataset, dataset_path) = match settings.last_dataset.clone() {
            Some(path) => match crate::io::load_dataset(&path) {
                Ok(dataset) => (dataset, Some(path)),
                Err(e) => {
                    log::warn!("Could not reopen last dataset: {}", e);
                    status_message = format!("Could not reopen last dataset: {}", e);
                    (Dataset::sample(today), None)
                }
            },
            None => (Dataset::sample(today), None),
        };

        let keys = dataset.project_keys();
        let active = settings
            .last_project
            .clone()
            .filter(|key| keys.contains(key))
            .or_else(|| keys.first().cloned())
            .unwrap_or_default();
        let timeline = Timeline::new(
            active.clone(),
            dataset.project_items(&active),
            today,
            settings.day_width(),
        );

        Self {
            dataset,
            dataset_path,
            timeline,
            document: PointerDocument::new(),
            tabs: TabStrip::default(),
            selected: None,
            show_about: false,
            show_csv_help: false,
            status_message,
            settings,
            settings_store,
            log_dir,
        }
    }

    pub fn dataset_title(&self) -> &str {
        &self.dataset.title
    }

    pub fn active_project(&self) -> &str {
        self.timeline.group_key()
    }

    // --- File operations ---

    pub fn open_dataset(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Milestone Dataset", &["json"])
            .pick_file()
        {
            match crate::io::load_dataset(&path) {
                Ok(dataset) => {
                    let count = dataset.milestones.len();
                    self.set_dataset(dataset, Some(path));
                    self.status_message = format!("Loaded {} milestones", count);
                }
                Err(e) => {
                    log::error!("Failed to open dataset: {}", e);
                    self.status_message = format!("Error loading: {}", e);
                }
            }
        }
    }

    pub fn import_csv(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv", "txt"])
            .pick_file()
        {
            match crate::io::import_csv(&path) {
                Ok((milestones, skipped)) => {
                    let title = path
                        .file_stem()
                        .and_then(|s| s.to_str())
                        .unwrap_or("Imported Dataset")
                        .to_string();
                    let count = milestones.len();
                    self.set_dataset(Dataset::new(title, milestones), None);

                    if skipped > 0 {
                        self.status_message =
                            format!("Imported {} milestones ({} rows skipped)", count, skipped);
                    } else {
                        self.status_message = format!("Imported {} milestones", count);
                    }
                }
                Err(e) => {
                    log::error!("CSV import failed: {}", e);
                    self.status_message = format!("CSV import failed: {}", e);
                }
            }
        }
    }

    pub fn load_sample(&mut self) {
        self.set_dataset(Dataset::sample(today()), None);
        self.status_message = "Sample data loaded".to_string();
    }

    /// Replace the dataset. Keeps the active project when the new data has
    /// it (a reload), otherwise switches to the first project.
    pub fn set_dataset(&mut self, dataset: Dataset, path: Option<PathBuf>) {
        self.dataset = dataset;
        self.dataset_path = path;
        self.selected = None;

        let keys = self.dataset.project_keys();
        let current = self.active_project().to_string();
        if keys.contains(&current) {
            self.timeline.set_items(self.dataset.project_items(&current));
        } else {
            let first = keys.first().cloned().unwrap_or_default();
            self.timeline
                .switch_group(first.clone(), self.dataset.project_items(&first));
        }

        self.settings.last_dataset = self.dataset_path.clone();
        self.settings.last_project = Some(self.active_project().to_string());
        self.persist_settings();
    }

    pub fn select_project(&mut self, key: &str) {
        if key == self.active_project() {
            return;
        }
        self.selected = None;
        self.timeline
            .switch_group(key.to_string(), self.dataset.project_items(key));
        self.settings.last_project = Some(key.to_string());
        self.persist_settings();
    }

    // --- View operations ---

    pub fn reset_zoom(&mut self) {
        self.timeline.reset_zoom();
    }

    pub fn scroll_to_today(&mut self) {
        self.timeline.request_scroll_to_today();
    }

    pub fn clear_overrides(&mut self) {
        let count = self.timeline.clear_overrides();
        self.status_message = format!("Cleared {} what-if edits", count);
    }

    pub fn open_log_folder(&mut self) {
        if let Err(e) = open::that(&self.log_dir) {
            log::warn!("Could not open log folder {}: {}", self.log_dir.display(), e);
            self.status_message = format!("Could not open log folder: {}", e);
        }
    }

    fn persist_settings(&mut self) {
        if let Err(e) = self.settings_store.save(&self.settings) {
            log::warn!("Could not save settings: {}", e);
        }
    }

    fn apply_editor_action(&mut self, id: Uuid, action: EditorAction) {
        match action {
            EditorAction::None => {}
            EditorAction::Override(item) => {
                self.status_message = format!(
                    "What-if: '{}' {} → {}",
                    item.label, item.start_date, item.end_date
                );
                self.timeline.set_override(item);
            }
            EditorAction::Reset => {
                self.timeline.clear_override(id);
                self.status_message = "Restored source dates".to_string();
            }
            EditorAction::Close => self.selected = None,
        }
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

impl eframe::App for TimelineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);

        // Window-level pointer release, wherever it happens.
        let (released, pointer_gone) = ctx.input(|i| {
            (
                i.pointer.any_released(),
                i.events.iter().any(|e| matches!(e, egui::Event::PointerGone)),
            )
        });
        if released {
            self.document.pointer_up();
        }
        if pointer_gone {
            self.document.pointer_left();
        }

        self.timeline.set_today(today());
        if self.timeline.update(ctx.input(|i| i.time)) {
            ctx.request_repaint();
        }

        // Handle keyboard shortcuts outside closures to avoid borrow issues
        let should_reset = ctx.input(|i| i.modifiers.command && i.key_pressed(egui::Key::Num0));
        let should_center = ctx.input(|i| i.modifiers.command && i.key_pressed(egui::Key::T));
        if should_reset {
            self.reset_zoom();
        }
        if should_center {
            self.scroll_to_today();
        }

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Project tabs
        let mut switch_to = None;
        egui::TopBottomPanel::top("project_tabs")
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_HEADER)
                    .inner_margin(egui::Margin::symmetric(6.0, 4.0)),
            )
            .show(ctx, |ui| {
                let keys = self.dataset.project_keys();
                let active = self.timeline.group_key().to_string();
                switch_to =
                    ui::project_tabs::show_project_tabs(&mut self.tabs, &keys, Some(&active), ui);
            });
        if let Some(key) = switch_to {
            self.select_project(&key);
        }

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_HEADER)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .font(ui::theme::font_small())
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!(
                                "Milestones: {}",
                                self.timeline.items().len()
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                        );
                        ui.label(egui::RichText::new(" · ").size(10.5).color(ui::theme::TEXT_DIM));
                        ui.label(
                            egui::RichText::new(format!(
                                "Zoom: {:.0}%",
                                self.timeline.zoom_level() * 100.0
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                        );
                        ui.label(egui::RichText::new(" · ").size(10.5).color(ui::theme::TEXT_DIM));
                        ui.label(
                            egui::RichText::new(format!(
                                "Centered on {}",
                                crate::model::date_token::format(self.timeline.center_date())
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        // Left panel: what-if editor + milestone list
        let mut editor_action = None;
        let mut list_click = None;
        egui::SidePanel::left("milestone_panel")
            .default_width(ui::theme::SIDE_PANEL_WIDTH)
            .min_width(220.0)
            .max_width(ui::theme::SIDE_PANEL_WIDTH * 2.0)
            .resizable(true)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_PANEL)
                    .inner_margin(egui::Margin::same(8.0))
                    .stroke(egui::Stroke::new(1.0, ui::theme::BORDER_SUBTLE)),
            )
            .show(ctx, |ui| {
                // If a milestone is selected, show the editor at the top
                if let Some(sel_id) = self.selected {
                    if let Some(item) = self.timeline.items().iter().find(|i| i.id == sel_id) {
                        let overridden = self.timeline.overrides().contains(sel_id);
                        let action = ui::override_editor::show_override_editor(item, overridden, ui);
                        editor_action = Some((sel_id, action));
                    }
                    ui.add_space(4.0);
                    ui.separator();
                    ui.add_space(2.0);
                }
                list_click =
                    ui::milestone_list::show_milestone_list(&self.timeline, self.selected, ui);
            });
        if let Some((id, action)) = editor_action {
            self.apply_editor_action(id, action);
        }
        if let Some(id) = list_click {
            self.selected = Some(id);
        }

        // Central panel: timeline
        egui::CentralPanel::default()
            .frame(egui::Frame::default().fill(ui::theme::BG_DARK))
            .show(ctx, |ui| {
                if self.timeline.group_key().is_empty() {
                    ui.centered_and_justified(|ui| {
                        ui.label(
                            egui::RichText::new("No milestones loaded")
                                .color(ui::theme::TEXT_DIM),
                        );
                    });
                    return;
                }
                let interaction = ui::timeline_view::show_timeline(
                    &mut self.timeline,
                    &mut self.document,
                    &mut self.selected,
                    ui,
                );
                if interaction.selection_changed {
                    if let Some(item) = self
                        .selected
                        .and_then(|id| self.timeline.items().iter().find(|i| i.id == id))
                    {
                        self.status_message = format!("Selected '{}'", item.label);
                    }
                }
            });

        // Dialogs
        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
        if self.show_csv_help {
            ui::dialogs::show_csv_help_dialog(self, ctx);
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_in(dir: &std::path::Path) -> TimelineApp {
        TimelineApp::with_settings(
            AppSettings::default(),
            SettingsStore::new(dir.join("settings.json")),
            dir.join("logs"),
        )
    }

    #[test]
    fn test_starts_on_first_sample_project() {
        let dir = tempfile::tempdir().unwrap();
        let app = app_in(dir.path());
        assert_eq!(app.active_project(), "Backbone Ring A");
        assert!(!app.timeline.items().is_empty());
    }

    #[test]
    fn test_select_project_persists_choice() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        app.select_project("DC Interconnect");
        assert_eq!(app.active_project(), "DC Interconnect");

        let saved = SettingsStore::new(dir.path().join("settings.json"))
            .load()
            .unwrap();
        assert_eq!(saved.last_project.as_deref(), Some("DC Interconnect"));

        let restored = TimelineApp::with_settings(
            saved,
            SettingsStore::new(dir.path().join("settings.json")),
            dir.path().join("logs"),
        );
        assert_eq!(restored.active_project(), "DC Interconnect");
    }

    #[test]
    fn test_unknown_last_project_falls_back_to_first() {
        let dir = tempfile::tempdir().unwrap();
        let settings = AppSettings {
            last_project: Some("Gone".into()),
            ..Default::default()
        };
        let app = TimelineApp::with_settings(
            settings,
            SettingsStore::new(dir.path().join("settings.json")),
            dir.path().join("logs"),
        );
        assert_eq!(app.active_project(), "Backbone Ring A");
    }

    #[test]
    fn test_clear_overrides_restores_sources() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        let item = app.timeline.items()[0].clone();
        let start = item.start().unwrap();
        app.timeline
            .set_override(item.with_dates(start, start + chrono::Duration::days(40)));
        assert_eq!(app.timeline.overrides().len(), 1);

        app.clear_overrides();
        assert!(app.timeline.overrides().is_empty());
    }
}
