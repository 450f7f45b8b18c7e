//! Sorting and pagination for the street table.

use catalog_core::{
    CatalogError, CatalogResult, DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS, SortColumn, SortDirection,
    StreetRow,
};

// ============================================================================
// Table State
// ============================================================================

/// Sort order and page window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableState {
    column: SortColumn,
    direction: SortDirection,
    page: usize,
    page_size: usize,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            column: SortColumn::default(),
            direction: SortDirection::default(),
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl TableState {
    /// Table state with the given initial page size
    pub fn with_page_size(page_size: usize) -> CatalogResult<Self> {
        let mut state = Self::default();
        state.set_page_size(page_size)?;
        Ok(state)
    }

    pub fn column(&self) -> SortColumn {
        self.column
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Header click: flip to descending when already ascending on this
    /// column, otherwise sort ascending by it
    pub fn request_sort(&mut self, column: SortColumn) {
        self.direction = if self.column == column && self.direction == SortDirection::Ascending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        self.column = column;
        tracing::debug!("Sorting by {} {}", column.key(), self.direction.description());
    }

    /// Change the page size; the page index always returns to 0
    pub fn set_page_size(&mut self, size: usize) -> CatalogResult<()> {
        if !PAGE_SIZE_OPTIONS.contains(&size) {
            return Err(CatalogError::validation(format!(
                "Page size must be one of {:?}, got {}",
                PAGE_SIZE_OPTIONS, size
            )));
        }
        self.page_size = size;
        self.page = 0;
        Ok(())
    }

    /// Any index is accepted; pages past the data are simply empty
    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    pub fn first_page(&mut self) {
        self.page = 0;
    }

    /// Stable sort of `rows` by the current column and direction
    pub fn sort<'a>(&self, rows: &'a [StreetRow]) -> Vec<&'a StreetRow> {
        let mut sorted: Vec<&StreetRow> = rows.iter().collect();
        sorted.sort_by(|a, b| {
            self.direction
                .apply(a.value(self.column).cmp(b.value(self.column)))
        });
        sorted
    }

    /// Rows on the current page, in sorted order
    pub fn visible<'a>(&self, rows: &'a [StreetRow]) -> Vec<&'a StreetRow> {
        let start = self.page.saturating_mul(self.page_size);
        self.sort(rows)
            .into_iter()
            .skip(start)
            .take(self.page_size)
            .collect()
    }

    /// Number of pages needed for `total` rows (at least one)
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size).max(1)
    }

    /// Blank rows that pad a short last page to full height
    ///
    /// The first page is never padded.
    pub fn filler_rows(&self, total: usize) -> usize {
        if self.page == 0 {
            return 0;
        }
        (self.page + 1)
            .saturating_mul(self.page_size)
            .saturating_sub(total)
            .min(self.page_size)
    }

    /// Footer text such as "6–10 of 12"
    pub fn range_label(&self, total: usize) -> String {
        let from = if total == 0 {
            0
        } else {
            self.page.saturating_mul(self.page_size) + 1
        };
        let to = (self.page + 1).saturating_mul(self.page_size).min(total);
        format!("{}–{} of {}", from, to, total)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    pub fn has_next(&self, total: usize) -> bool {
        self.page + 1 < self.page_count(total)
    }
}

// ============================================================================
// Street Table
// ============================================================================

/// Displayed rows, in the order they arrived, plus the table state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreetTable {
    rows: Vec<StreetRow>,
    pub state: TableState,
}

impl StreetTable {
    pub fn new(state: TableState) -> Self {
        Self {
            rows: Vec::new(),
            state,
        }
    }

    /// Rows in insertion order
    pub fn rows(&self) -> &[StreetRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Replace the row set with a new query result and go back to page 0
    pub fn replace(&mut self, rows: Vec<StreetRow>) {
        tracing::debug!("Showing {} street rows", rows.len());
        self.rows = rows;
        self.state.first_page();
    }

    /// Add a row after all existing ones
    pub fn append(&mut self, row: StreetRow) {
        self.rows.push(row);
    }

    pub fn sorted(&self) -> Vec<&StreetRow> {
        self.state.sort(&self.rows)
    }

    pub fn visible(&self) -> Vec<&StreetRow> {
        self.state.visible(&self.rows)
    }

    pub fn page_count(&self) -> usize {
        self.state.page_count(self.rows.len())
    }

    pub fn filler_rows(&self) -> usize {
        self.state.filler_rows(self.rows.len())
    }

    pub fn range_label(&self) -> String {
        self.state.range_label(self.rows.len())
    }

    pub fn has_next(&self) -> bool {
        self.state.has_next(self.rows.len())
    }

    pub fn next_page(&mut self) {
        if self.has_next() {
            self.state.set_page(self.state.page() + 1);
        }
    }

    pub fn previous_page(&mut self) {
        if self.state.has_previous() {
            self.state.set_page(self.state.page() - 1);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
