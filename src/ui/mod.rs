pub mod dialogs;
pub mod milestone_list;
pub mod override_editor;
pub mod project_tabs;
pub mod theme;
pub mod timeline_view;
pub mod toolbar;
