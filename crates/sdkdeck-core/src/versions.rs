use crate::candidates::normalize_token;
use crate::collection::{FilteredCollection, SelectionCursor};
use crate::entries::VersionEntry;
use crate::observable::Observable;

/// Filter state for the version list: a case-folded text token plus the
/// installed/downloaded/used toggles.
#[derive(Debug, Clone, Default)]
pub struct VersionFilter {
    pub text: Option<String>,
    pub installed_only: bool,
    pub downloaded_only: bool,
    pub used_only: bool,
}

impl VersionFilter {
    fn matches(&self, entry: &VersionEntry) -> bool {
        if self.installed_only && !entry.version.installed {
            return false;
        }
        if self.downloaded_only && !entry.version.downloaded {
            return false;
        }
        if self.used_only && !entry.active {
            return false;
        }
        let Some(token) = &self.text else {
            return true;
        };

        // Every whitespace-separated sub-token must occur in the version
        // string or the vendor, either field satisfying a sub-token.
        let version = entry.version.version.to_lowercase();
        let vendor = entry.version.vendor.as_deref().map(str::to_lowercase);
        token.split_whitespace().all(|sub| {
            version.contains(sub)
                || vendor
                    .as_deref()
                    .is_some_and(|vendor| vendor.contains(sub))
        })
    }
}

/// The version list for the currently selected candidate.
///
/// Default order is vendor ascending (absent vendor first), then parsed
/// version descending, newest first. A text filter change snaps the
/// selection to the first visible entry; a toggle change keeps a still
/// visible selection.
pub struct VersionRegistry {
    collection: FilteredCollection<VersionEntry>,
    cursor: SelectionCursor<VersionEntry>,
    filter: VersionFilter,
    selected_installed: Observable<bool>,
    selected_active: Observable<bool>,
}

impl VersionRegistry {
    #[must_use]
    pub fn new() -> Self {
        let filter = VersionFilter::default();
        let predicate = filter.clone();
        Self {
            collection: FilteredCollection::new(
                move |entry| predicate.matches(entry),
                |a, b| {
                    a.version
                        .vendor
                        .cmp(&b.version.vendor)
                        .then_with(|| b.order.cmp(&a.order))
                },
            ),
            cursor: SelectionCursor::new(),
            filter,
            selected_installed: Observable::new(false),
            selected_active: Observable::new(false),
        }
    }

    /// Replaces the contents with the versions of a newly selected (or
    /// re-resolved) candidate, keeping a surviving selection and otherwise
    /// selecting the first visible entry.
    pub fn repopulate(&mut self, entries: Vec<VersionEntry>) {
        self.collection.replace_source(entries);
        let visible = self.collection.visible_items();
        self.cursor.retain_in(&visible);
        if self.cursor.get().is_none() {
            self.cursor.select_first(&visible);
        }
        self.sync_selection_flags();
    }

    /// Empties the registry; used when no candidate is selected.
    pub fn clear(&mut self) {
        self.collection.replace_source(Vec::new());
        self.cursor.clear();
        self.sync_selection_flags();
    }

    pub fn set_text(&mut self, text: Option<&str>) {
        self.filter.text = normalize_token(text);
        self.apply_filter();
    }

    pub fn set_installed_only(&mut self, installed_only: bool) {
        self.filter.installed_only = installed_only;
        self.apply_filter();
    }

    pub fn set_downloaded_only(&mut self, downloaded_only: bool) {
        self.filter.downloaded_only = downloaded_only;
        self.apply_filter();
    }

    pub fn set_used_only(&mut self, used_only: bool) {
        self.filter.used_only = used_only;
        self.apply_filter();
    }

    pub fn move_selection(&mut self, offset: isize) {
        self.cursor.move_by(&self.collection.visible_items(), offset);
        self.sync_selection_flags();
    }

    #[must_use]
    pub fn selected(&self) -> Option<VersionEntry> {
        self.cursor.get()
    }

    #[must_use]
    pub fn selection(&self) -> &Observable<Option<VersionEntry>> {
        self.cursor.observable()
    }

    #[must_use]
    pub fn visible(&self) -> &Observable<Vec<VersionEntry>> {
        self.collection.visible()
    }

    #[must_use]
    pub fn visible_items(&self) -> Vec<VersionEntry> {
        self.collection.visible_items()
    }

    #[must_use]
    pub fn filter(&self) -> &VersionFilter {
        &self.filter
    }

    /// Whether the selected version is installed locally; drives UI
    /// enablement of uninstall/use.
    #[must_use]
    pub fn selected_installed(&self) -> &Observable<bool> {
        &self.selected_installed
    }

    /// Whether the selected version is the candidate's global default.
    #[must_use]
    pub fn selected_active(&self) -> &Observable<bool> {
        &self.selected_active
    }

    fn apply_filter(&mut self) {
        let predicate = self.filter.clone();
        self.collection
            .set_predicate(move |entry| predicate.matches(entry));

        let visible = self.collection.visible_items();
        if let Some(selected) = self.cursor.get()
            && !visible.contains(&selected)
        {
            self.cursor.clear();
        }
        if self.filter.text.is_some() || self.cursor.get().is_none() {
            self.cursor.clear();
            self.cursor.select_first(&visible);
        }
        self.sync_selection_flags();
    }

    fn sync_selection_flags(&self) {
        let selected = self.cursor.get();
        self.selected_installed.set(
            selected
                .as_ref()
                .is_some_and(|entry| entry.version.installed),
        );
        self.selected_active
            .set(selected.as_ref().is_some_and(|entry| entry.active));
    }
}

impl Default for VersionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
