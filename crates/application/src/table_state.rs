use storerate_core::AppResult;
use storerate_domain::{
    Record, SearchQuery, SortDirection, SortSpec, ToRecord, render_rows, render_table,
};

/// Table configurations used by the client screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TablePreset {
    /// Store listing shown to every signed-in user.
    StoreList,
    /// Users tab of the admin dashboard.
    AdminUsers,
    /// Stores tab of the admin dashboard.
    AdminStores,
    /// Ratings table of the owner dashboard.
    OwnerRatings,
}

impl TablePreset {
    /// Returns the fields matched by the search box.
    #[must_use]
    pub fn search_fields(&self) -> &'static [&'static str] {
        match self {
            Self::StoreList => &["name", "address"],
            Self::AdminUsers => &["name", "email", "address", "role"],
            Self::AdminStores => &["name", "email", "address"],
            Self::OwnerRatings => &["userName", "userEmail"],
        }
    }

    /// Returns the initial sort field and direction.
    #[must_use]
    pub fn default_sort(&self) -> (&'static str, SortDirection) {
        match self {
            Self::OwnerRatings => ("date", SortDirection::Desc),
            _ => ("name", SortDirection::Asc),
        }
    }
}

/// View-local table state: search term, active sort and searched fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    query: SearchQuery,
    sort: SortSpec,
    search_fields: Vec<String>,
}

impl TableState {
    /// Creates a table state with an empty search term.
    #[must_use]
    pub fn new<S: Into<String>>(sort: SortSpec, search_fields: impl IntoIterator<Item = S>) -> Self {
        Self {
            query: SearchQuery::default(),
            sort,
            search_fields: search_fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates the initial state of a preset table.
    pub fn for_preset(preset: TablePreset) -> AppResult<Self> {
        let (field, direction) = preset.default_sort();
        Ok(Self::new(
            SortSpec::new(field, direction)?,
            preset.search_fields().iter().copied(),
        ))
    }

    /// Replaces the search term.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = SearchQuery::new(query);
    }

    /// Replaces the active sort.
    pub fn set_sort(&mut self, sort: SortSpec) {
        self.sort = sort;
    }

    /// Applies a click on the header of `field`.
    pub fn toggle_sort(&mut self, field: &str) -> AppResult<()> {
        self.sort = self.sort.toggled(field)?;
        Ok(())
    }

    /// Returns the search term.
    #[must_use]
    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    /// Returns the active sort.
    #[must_use]
    pub fn sort(&self) -> &SortSpec {
        &self.sort
    }

    /// Returns the searched field names.
    #[must_use]
    pub fn search_fields(&self) -> &[String] {
        &self.search_fields
    }

    /// Derives the rows to display from typed rows.
    #[must_use]
    pub fn render<T: ToRecord + Clone>(&self, rows: &[T]) -> Vec<T> {
        render_rows(rows, &self.query, &self.sort, &self.search_fields)
    }

    /// Derives the records to display.
    #[must_use]
    pub fn render_records(&self, records: &[Record]) -> Vec<Record> {
        render_table(records, &self.query, &self.sort, &self.search_fields)
    }
}
