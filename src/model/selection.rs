//! Set of item identifiers picked in delete mode

use std::collections::HashSet;

use super::catalog::ItemId;

/// Items currently selected in a library view.
///
/// Set semantics: toggling an absent id adds it, toggling a present id
/// removes it. Order is irrelevant and duplicates cannot occur.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: HashSet<ItemId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, id: ItemId) {
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Keep only the ids for which `keep` returns true
    pub fn retain(&mut self, mut keep: impl FnMut(ItemId) -> bool) {
        self.ids.retain(|id| keep(*id));
    }

    /// Selected ids in ascending order, for stable logging and backend calls
    pub fn to_sorted_vec(&self) -> Vec<ItemId> {
        let mut ids: Vec<ItemId> = self.ids.iter().copied().collect();
        ids.sort();
        ids
    }
}

impl FromIterator<ItemId> for SelectionSet {
    fn from_iter<T: IntoIterator<Item = ItemId>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_membership_follows_toggle_parity() {
        let mut selection = SelectionSet::new();
        let id = ItemId(7);
        for n in 1..=6 {
            selection.toggle(id);
            assert_eq!(selection.contains(id), n % 2 == 1, "after {} toggles", n);
        }
    }

    #[test]
    fn interleaved_toggles_track_each_id_independently() {
        let mut selection = SelectionSet::new();
        let sequence = [1, 2, 1, 3, 2, 2, 4, 4, 4];
        for raw in sequence {
            selection.toggle(ItemId(raw));
        }
        // 1: 2x, 2: 3x, 3: 1x, 4: 3x
        assert!(!selection.contains(ItemId(1)));
        assert!(selection.contains(ItemId(2)));
        assert!(selection.contains(ItemId(3)));
        assert!(selection.contains(ItemId(4)));
        assert_eq!(selection.len(), 3);
    }

    #[test]
    fn clear_is_idempotent() {
        let mut selection: SelectionSet = [ItemId(1), ItemId(2)].into_iter().collect();
        selection.clear();
        assert_eq!(selection.len(), 0);
        selection.clear();
        assert_eq!(selection.len(), 0);
        assert!(selection.is_empty());
    }

    #[test]
    fn retain_drops_unwanted_ids() {
        let mut selection: SelectionSet = [ItemId(1), ItemId(2), ItemId(3)].into_iter().collect();
        selection.retain(|id| id != ItemId(2));
        assert_eq!(selection.to_sorted_vec(), vec![ItemId(1), ItemId(3)]);
    }

    #[test]
    fn sorted_vec_is_ascending() {
        let selection: SelectionSet = [ItemId(9), ItemId(3), ItemId(5)].into_iter().collect();
        assert_eq!(selection.to_sorted_vec(), vec![ItemId(3), ItemId(5), ItemId(9)]);
    }
}
