use super::milestone::TimelineItem;

/// Milestones sharing one project key.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectGroup {
    pub key: String,
    pub items: Vec<TimelineItem>,
}

/// Partition items by project, keeping projects in first-seen order and
/// items in input order within each project.
pub fn group_by_project(items: &[TimelineItem]) -> Vec<ProjectGroup> {
    let mut groups: Vec<ProjectGroup> = Vec::new();
    for item in items {
        match groups.iter_mut().find(|g| g.key == item.group_key) {
            Some(group) => group.items.push(item.clone()),
            None => groups.push(ProjectGroup {
                key: item.group_key.clone(),
                items: vec![item.clone()],
            }),
        }
    }
    groups
}

/// Order items by start date. Ties keep their input order; items with an
/// unreadable start date sink to the end, also in input order.
pub fn sort_by_start(items: &[TimelineItem]) -> Vec<TimelineItem> {
    let mut sorted = items.to_vec();
    sorted.sort_by_key(|item| match item.start() {
        Ok(date) => (false, Some(date)),
        Err(_) => (true, None),
    });
    sorted
}
