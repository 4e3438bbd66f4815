//! Record selection and page-level view state.

use crate::error::DataFetchError;
use crate::models::Record;

/// Page lifecycle. Only `Loading` may transition, and only once.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    Error(DataFetchError),
    Loaded(RecordBrowser),
}

impl LoadState {
    /// Settle the initial fetch. Ignored unless still loading; leaving
    /// `Error` or `Loaded` requires a full reload.
    pub fn resolve(&mut self, result: Result<Vec<Record>, DataFetchError>, is_mobile: bool) {
        if !matches!(self, LoadState::Loading) {
            tracing::warn!("ignoring data result after page already settled");
            return;
        }
        *self = match result {
            Ok(records) => LoadState::Loaded(RecordBrowser::new(records, is_mobile)),
            Err(e) => LoadState::Error(e),
        };
    }

    pub fn browser(&self) -> Option<&RecordBrowser> {
        match self {
            LoadState::Loaded(b) => Some(b),
            _ => None,
        }
    }

    pub fn browser_mut(&mut self) -> Option<&mut RecordBrowser> {
        match self {
            LoadState::Loaded(b) => Some(b),
            _ => None,
        }
    }
}

/// Ordered records plus the current selection and sidebar state.
///
/// `selected` is `Some(i)` with `i < records.len()` exactly when the
/// collection is non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordBrowser {
    records: Vec<Record>,
    selected: Option<usize>,
    sidebar_open: bool,
    is_mobile: bool,
}

impl RecordBrowser {
    pub fn new(records: Vec<Record>, is_mobile: bool) -> Self {
        let selected = if records.is_empty() { None } else { Some(0) };
        RecordBrowser {
            records,
            selected,
            sidebar_open: false,
            is_mobile,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_record(&self) -> Option<&Record> {
        self.selected.and_then(|i| self.records.get(i))
    }

    pub fn sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    pub fn is_mobile(&self) -> bool {
        self.is_mobile
    }

    /// Select `index`. Returns false and changes nothing when out of range.
    /// On mobile layout a successful selection also closes the sidebar.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.records.len() {
            return false;
        }
        self.selected = Some(index);
        if self.is_mobile {
            self.sidebar_open = false;
        }
        true
    }

    /// Move to the next record, wrapping to the first.
    pub fn advance(&mut self) {
        let len = self.records.len();
        if let Some(i) = self.selected.as_mut() {
            *i = (*i + 1) % len;
        }
    }

    /// Move to the previous record, wrapping to the last.
    pub fn retreat(&mut self) {
        let len = self.records.len();
        if let Some(i) = self.selected.as_mut() {
            *i = (*i + len - 1) % len;
        }
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    pub fn close_sidebar(&mut self) {
        self.sidebar_open = false;
    }

    /// Recomputed from the viewport width on every resize.
    pub fn set_mobile(&mut self, is_mobile: bool) {
        self.is_mobile = is_mobile;
    }
}
