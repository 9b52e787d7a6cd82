use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::grouping::{group_by_project, ProjectGroup};
use super::milestone::TimelineItem;

/// A read-only collection of milestones across projects.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub milestones: Vec<TimelineItem>,
}

fn default_title() -> String {
    "Untitled Dataset".to_string()
}

impl Dataset {
    pub fn new(title: impl Into<String>, milestones: Vec<TimelineItem>) -> Self {
        Self {
            title: title.into(),
            milestones,
        }
    }

    pub fn groups(&self) -> Vec<ProjectGroup> {
        group_by_project(&self.milestones)
    }

    /// Project keys in first-seen order.
    pub fn project_keys(&self) -> Vec<String> {
        self.groups().into_iter().map(|g| g.key).collect()
    }

    /// Milestones of one project, in input order.
    pub fn project_items(&self, key: &str) -> Vec<TimelineItem> {
        self.milestones
            .iter()
            .filter(|item| item.group_key == key)
            .cloned()
            .collect()
    }

    /// A demonstration dataset of fiber roll-out milestones around `today`.
    pub fn sample(today: NaiveDate) -> Self {
        let at = |offset: i64| today + Duration::days(offset);
        let milestone = |project: &str, label: &str, start: i64, end: i64, status: &str| {
            let mut item = TimelineItem::new(project, label, at(start), at(end));
            item.status = Some(status.to_string());
            item
        };

        let milestones = vec![
            // ── Backbone ring ───────────────────────────────────────────
            milestone("Backbone Ring A", "Route survey", -12, -8, "Done"),
            milestone("Backbone Ring A", "Permits", -9, -2, "Done"),
            milestone("Backbone Ring A", "Trenching", -3, 6, "In progress"),
            milestone("Backbone Ring A", "Duct installation", 2, 10, "Planned"),
            milestone("Backbone Ring A", "Cable pulling", 8, 14, "Planned"),
            milestone("Backbone Ring A", "Splicing", 13, 17, "Planned"),
            milestone("Backbone Ring A", "OTDR testing", 17, 19, "Planned"),
            milestone("Backbone Ring A", "Handover", 20, 20, "Planned"),
            // ── Last mile ───────────────────────────────────────────────
            milestone("Last Mile Cluster 7", "Home pass survey", -4, 1, "In progress"),
            milestone("Last Mile Cluster 7", "Pole installation", 1, 9, "Planned"),
            milestone("Last Mile Cluster 7", "Aerial cabling", 7, 15, "Planned"),
            milestone("Last Mile Cluster 7", "ODP mounting", 12, 16, "Planned"),
            milestone("Last Mile Cluster 7", "Acceptance test", 18, 18, "Planned"),
            // ── Data center link ────────────────────────────────────────
            milestone("DC Interconnect", "Rack allocation", 5, 6, "Planned"),
            milestone("DC Interconnect", "Patch panel install", 6, 9, "Planned"),
            milestone("DC Interconnect", "Link commissioning", 10, 10, "Planned"),
        ];

        Self::new("Sample Fiber Roll-out", milestones)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_has_three_projects_in_order() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 12).unwrap();
        let data = Dataset::sample(today);
        assert_eq!(
            data.project_keys(),
            vec!["Backbone Ring A", "Last Mile Cluster 7", "DC Interconnect"]
        );
        assert_eq!(data.project_items("DC Interconnect").len(), 3);
        assert!(data.milestones.iter().all(|m| m.span().is_ok()));
    }

    #[test]
    fn test_partial_json_is_valid() {
        let data: Dataset = serde_json::from_str("{}").unwrap();
        assert_eq!(data.title, "Untitled Dataset");
        assert!(data.milestones.is_empty());
        assert!(data.project_keys().is_empty());
    }
}
