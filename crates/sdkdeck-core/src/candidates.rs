use crate::collection::{FilteredCollection, SelectionCursor};
use crate::entries::CandidateEntry;
use crate::observable::Observable;

/// Filter state for the candidate list: a case-folded text token plus the
/// installed-only toggle.
#[derive(Debug, Clone, Default)]
pub struct CandidateFilter {
    pub text: Option<String>,
    pub installed_only: bool,
}

impl CandidateFilter {
    fn matches(&self, entry: &CandidateEntry) -> bool {
        if self.installed_only && entry.installed == 0 {
            return false;
        }
        match &self.text {
            None => true,
            Some(token) => entry.candidate.name.to_lowercase().contains(token),
        }
    }
}

/// The candidate list: all installable SDK products, name-sorted, with a
/// substring filter and an installed-only toggle.
///
/// Any filter change reselects the first visible entry, even when the
/// previous selection would still be visible, so the version pane always
/// tracks a deterministic candidate.
pub struct CandidateRegistry {
    collection: FilteredCollection<CandidateEntry>,
    cursor: SelectionCursor<CandidateEntry>,
    filter: CandidateFilter,
}

impl CandidateRegistry {
    #[must_use]
    pub fn new() -> Self {
        let filter = CandidateFilter::default();
        let predicate = filter.clone();
        Self {
            collection: FilteredCollection::new(
                move |entry| predicate.matches(entry),
                |a, b| {
                    a.candidate
                        .name
                        .to_lowercase()
                        .cmp(&b.candidate.name.to_lowercase())
                },
            ),
            cursor: SelectionCursor::new(),
            filter,
        }
    }

    /// Replaces the whole candidate set, keeping the selection when an entry
    /// with the same id survives and falling back to the first visible entry.
    pub fn replace(&mut self, entries: Vec<CandidateEntry>) {
        self.collection.replace_source(entries);
        let visible = self.collection.visible_items();
        self.cursor.retain_in(&visible);
        if self.cursor.get().is_none() {
            self.cursor.select_first(&visible);
        }
    }

    pub fn set_text(&mut self, text: Option<&str>) {
        self.filter.text = normalize_token(text);
        self.apply_filter();
    }

    pub fn set_installed_only(&mut self, installed_only: bool) {
        self.filter.installed_only = installed_only;
        self.apply_filter();
    }

    pub fn move_selection(&mut self, offset: isize) {
        self.cursor.move_by(&self.collection.visible_items(), offset);
    }

    #[must_use]
    pub fn selected(&self) -> Option<CandidateEntry> {
        self.cursor.get()
    }

    #[must_use]
    pub fn selection(&self) -> &Observable<Option<CandidateEntry>> {
        self.cursor.observable()
    }

    #[must_use]
    pub fn visible(&self) -> &Observable<Vec<CandidateEntry>> {
        self.collection.visible()
    }

    #[must_use]
    pub fn visible_items(&self) -> Vec<CandidateEntry> {
        self.collection.visible_items()
    }

    #[must_use]
    pub fn filter(&self) -> &CandidateFilter {
        &self.filter
    }

    fn apply_filter(&mut self) {
        let predicate = self.filter.clone();
        self.collection
            .set_predicate(move |entry| predicate.matches(entry));
        // Forced reselection keeps the dependent version pane deterministic.
        self.cursor.clear();
        self.cursor.select_first(&self.collection.visible_items());
    }
}

impl Default for CandidateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn normalize_token(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
}
