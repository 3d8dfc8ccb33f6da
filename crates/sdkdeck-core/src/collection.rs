use std::cmp::Ordering;

use crate::observable::Observable;

type Predicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;
type Comparator<T> = Box<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// A reactive container over an unordered source set.
///
/// The visible view is always `sort(filter(source))`: recomputed
/// synchronously whenever the source, predicate, or comparator changes, and
/// published through an [`Observable`]. The sort is stable, so comparator
/// ties keep source insertion order.
pub struct FilteredCollection<T> {
    source: Vec<T>,
    predicate: Predicate<T>,
    comparator: Comparator<T>,
    visible: Observable<Vec<T>>,
}

impl<T: Clone + PartialEq> FilteredCollection<T> {
    pub fn new(
        predicate: impl Fn(&T) -> bool + Send + Sync + 'static,
        comparator: impl Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    ) -> Self {
        Self {
            source: Vec::new(),
            predicate: Box::new(predicate),
            comparator: Box::new(comparator),
            visible: Observable::new(Vec::new()),
        }
    }

    /// Atomically swaps the backing set and recomputes the visible view.
    pub fn replace_source(&mut self, items: Vec<T>) {
        self.source = items;
        self.recompute();
    }

    pub fn set_predicate(&mut self, predicate: impl Fn(&T) -> bool + Send + Sync + 'static) {
        self.predicate = Box::new(predicate);
        self.recompute();
    }

    pub fn set_comparator(
        &mut self,
        comparator: impl Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    ) {
        self.comparator = Box::new(comparator);
        self.recompute();
    }

    #[must_use]
    pub fn visible(&self) -> &Observable<Vec<T>> {
        &self.visible
    }

    #[must_use]
    pub fn visible_items(&self) -> Vec<T> {
        self.visible.get()
    }

    #[must_use]
    pub fn source_len(&self) -> usize {
        self.source.len()
    }

    fn recompute(&mut self) {
        let mut items: Vec<T> = self
            .source
            .iter()
            .filter(|item| (self.predicate)(item))
            .cloned()
            .collect();
        items.sort_by(|a, b| (self.comparator)(a, b));
        self.visible.set(items);
    }
}

/// Tracks the selected item (or none) within a collection's visible view.
///
/// Identity is the item type's own equality, so an entry whose non-identity
/// fields changed across a refresh still counts as the same selection.
pub struct SelectionCursor<T> {
    selected: Observable<Option<T>>,
}

impl<T: Clone + PartialEq> SelectionCursor<T> {
    pub fn new() -> Self {
        Self {
            selected: Observable::new(None),
        }
    }

    #[must_use]
    pub fn observable(&self) -> &Observable<Option<T>> {
        &self.selected
    }

    #[must_use]
    pub fn get(&self) -> Option<T> {
        self.selected.get()
    }

    pub fn set(&self, item: T) {
        self.selected.set(Some(item));
    }

    pub fn clear(&self) {
        self.selected.set(None);
    }

    pub fn select_first(&self, visible: &[T]) {
        if let Some(first) = visible.first() {
            self.set(first.clone());
        }
    }

    /// Moves the selection by `offset` within `visible`, clamped to the ends.
    /// With nothing selected, a forward move lands on the first item and a
    /// backward move on the last.
    pub fn move_by(&self, visible: &[T], offset: isize) {
        if visible.is_empty() {
            self.clear();
            return;
        }

        let last = visible.len() - 1;
        let current = self
            .get()
            .and_then(|selected| visible.iter().position(|item| *item == selected));
        let target = match current {
            Some(index) => index.saturating_add_signed(offset).min(last),
            None if offset >= 0 => 0,
            None => last,
        };
        self.set(visible[target].clone());
    }

    /// Re-resolves the selected identity against a new visible view, adopting
    /// the replacement item (whose non-identity fields may have changed) or
    /// clearing when the identity is gone.
    pub fn retain_in(&self, visible: &[T]) {
        if let Some(selected) = self.get() {
            match visible.iter().find(|item| **item == selected) {
                Some(replacement) => self.set(replacement.clone()),
                None => self.clear(),
            }
        }
    }
}

impl<T: Clone + PartialEq> Default for SelectionCursor<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{FilteredCollection, SelectionCursor};

    #[derive(Debug, Clone)]
    struct Entry {
        id: &'static str,
        score: u32,
    }

    impl PartialEq for Entry {
        fn eq(&self, other: &Self) -> bool {
            self.id == other.id
        }
    }

    fn entry(id: &'static str, score: u32) -> Entry {
        Entry { id, score }
    }

    fn collection() -> FilteredCollection<Entry> {
        FilteredCollection::new(|_: &Entry| true, |a, b| a.score.cmp(&b.score))
    }

    #[test]
    fn visible_view_is_filtered_then_sorted() {
        let mut items = collection();
        items.replace_source(vec![entry("c", 3), entry("a", 1), entry("b", 2)]);
        items.set_predicate(|item: &Entry| item.score >= 2);

        let ids: Vec<&str> = items.visible_items().iter().map(|item| item.id).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[test]
    fn comparator_ties_keep_insertion_order() {
        let mut items = collection();
        items.replace_source(vec![entry("x", 1), entry("y", 1), entry("z", 0)]);

        let ids: Vec<&str> = items.visible_items().iter().map(|item| item.id).collect();
        assert_eq!(ids, vec!["z", "x", "y"]);
    }

    #[test]
    fn replace_source_publishes_through_the_observable() {
        let mut items = collection();
        let observed = std::sync::Arc::new(std::sync::Mutex::new(0_usize));
        let sink = std::sync::Arc::clone(&observed);
        items
            .visible()
            .subscribe(move |view: &Vec<Entry>| *sink.lock().unwrap() = view.len());

        items.replace_source(vec![entry("a", 1), entry("b", 2)]);

        assert_eq!(*observed.lock().unwrap(), 2);
    }

    #[test]
    fn cursor_moves_clamp_at_the_ends() {
        let cursor = SelectionCursor::new();
        let visible = vec![entry("a", 1), entry("b", 2), entry("c", 3)];

        cursor.move_by(&visible, 1);
        assert_eq!(cursor.get().map(|item| item.id), Some("a"));

        cursor.move_by(&visible, 10);
        assert_eq!(cursor.get().map(|item| item.id), Some("c"));

        cursor.move_by(&visible, -1);
        assert_eq!(cursor.get().map(|item| item.id), Some("b"));

        cursor.move_by(&visible, -10);
        assert_eq!(cursor.get().map(|item| item.id), Some("a"));
    }

    #[test]
    fn backward_move_from_empty_selection_lands_on_last() {
        let cursor = SelectionCursor::new();
        let visible = vec![entry("a", 1), entry("b", 2)];
        cursor.move_by(&visible, -1);
        assert_eq!(cursor.get().map(|item| item.id), Some("b"));
    }

    #[test]
    fn move_on_empty_view_clears() {
        let cursor = SelectionCursor::new();
        cursor.set(entry("a", 1));
        cursor.move_by(&[], 1);
        assert!(cursor.get().is_none());
    }

    #[test]
    fn retain_adopts_the_replacement_item() {
        let cursor = SelectionCursor::new();
        cursor.set(entry("a", 1));

        cursor.retain_in(&[entry("b", 5), entry("a", 9)]);
        assert_eq!(cursor.get().map(|item| item.score), Some(9));

        cursor.retain_in(&[entry("b", 5)]);
        assert!(cursor.get().is_none());
    }
}
