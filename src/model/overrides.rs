use std::collections::HashMap;

use uuid::Uuid;

use super::milestone::TimelineItem;

/// Session-only edits that shadow source milestones by id.
///
/// The source collection is never touched; every layout pass resolves items
/// through [`OverrideMap::resolve`].
#[derive(Debug, Clone, Default)]
pub struct OverrideMap {
    edits: HashMap<Uuid, TimelineItem>,
}

impl OverrideMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// The override for `item` if one exists, otherwise `item` itself.
    pub fn resolve<'a>(&'a self, item: &'a TimelineItem) -> &'a TimelineItem {
        self.edits.get(&item.id).unwrap_or(item)
    }

    /// Resolve a whole collection into owned, shadowed copies.
    pub fn resolve_all(&self, items: &[TimelineItem]) -> Vec<TimelineItem> {
        items.iter().map(|item| self.resolve(item).clone()).collect()
    }

    /// Shadow an item. The override keeps its id; a mismatched group key is
    /// allowed and simply renders in the original item's slot.
    pub fn set(&mut self, item: TimelineItem) {
        self.edits.insert(item.id, item);
    }

    pub fn remove(&mut self, id: Uuid) -> Option<TimelineItem> {
        self.edits.remove(&id)
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.edits.contains_key(&id)
    }

    pub fn clear(&mut self) {
        self.edits.clear();
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }
}
