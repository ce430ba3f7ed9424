//! State behind the schools page: the cached list, filter and paging
//! controls, mutation progress and the notices each outcome produces.
//!
//! Nothing here touches the renderer; the page keeps these in signals.

use shared_types::{
    page_count, page_slice, School, SchoolsFilter, ShowingRange, StatusFilter,
    DEFAULT_ROWS_PER_PAGE,
};

use super::service::ServiceError;

pub const LOAD_ERROR_MESSAGE: &str = "Error loading schools. Please try again later.";

/// Reason given when the browser refuses to open the export.
pub const EXPORT_BLOCKED_MESSAGE: &str = "the browser blocked the download window";

// ── Cached list ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Error(String),
}

/// Identifies one fetch so a late answer can be recognised as stale.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchTicket {
    epoch: u64,
    filter: SchoolsFilter,
}

impl FetchTicket {
    pub fn filter(&self) -> &SchoolsFilter {
        &self.filter
    }
}

/// The last accepted result set plus the invalidation epoch.
///
/// A result is only accepted for the newest filter at the current epoch;
/// anything else is dropped on arrival.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListCache {
    epoch: u64,
    filter: Option<SchoolsFilter>,
    /// Filter the current `rows` were fetched for.
    rows_filter: Option<SchoolsFilter>,
    rows: Vec<School>,
    state: FetchState,
}

impl ListCache {
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn rows(&self) -> &[School] {
        &self.rows
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    /// Placeholder rows replace the table while a fetch is in flight, unless
    /// the rows on screen already answer the pending filter (a refetch after
    /// a mutation).
    pub fn show_skeleton(&self) -> bool {
        match self.state {
            FetchState::Idle => true,
            FetchState::Loading => self.rows.is_empty() || self.rows_filter != self.filter,
            FetchState::Loaded | FetchState::Error(_) => false,
        }
    }

    pub fn show_empty(&self) -> bool {
        self.state == FetchState::Loaded && self.rows.is_empty()
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            FetchState::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Record that a fetch for `filter` started.
    pub fn begin(&mut self, filter: SchoolsFilter) -> FetchTicket {
        self.filter = Some(filter.clone());
        self.state = FetchState::Loading;
        FetchTicket {
            epoch: self.epoch,
            filter,
        }
    }

    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.epoch == self.epoch && self.filter.as_ref() == Some(&ticket.filter)
    }

    /// Store a fetch result. Returns `false` when the ticket is stale and
    /// the result was discarded.
    pub fn complete(
        &mut self,
        ticket: &FetchTicket,
        result: Result<Vec<School>, ServiceError>,
    ) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        match result {
            Ok(rows) => {
                self.rows = rows;
                self.rows_filter = Some(ticket.filter.clone());
                self.state = FetchState::Loaded;
            }
            Err(err) => {
                self.rows.clear();
                self.rows_filter = None;
                self.state = FetchState::Error(err.message().to_string());
            }
        }
        true
    }

    /// Mark the cached rows out of date. Fetches begun before this call
    /// will be discarded.
    pub fn invalidate(&mut self) {
        self.epoch += 1;
    }
}

// ── Filter and paging ───────────────────────────────────────────────

/// Filter bar and pager state. Any filter change sends the pager back to
/// page 1.
#[derive(Debug, Clone, PartialEq)]
pub struct ListControls {
    pub filter: SchoolsFilter,
    page: usize,
    rows_per_page: usize,
}

impl Default for ListControls {
    fn default() -> Self {
        Self {
            filter: SchoolsFilter::default(),
            page: 1,
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
        }
    }
}

impl ListControls {
    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    pub fn commit_search(&mut self, search: String) {
        self.filter.search = search;
        self.page = 1;
    }

    pub fn set_status(&mut self, status: StatusFilter) {
        self.filter.status = status;
        self.page = 1;
    }

    pub fn set_sort_key(&mut self, key: &str) {
        self.filter.set_sort_key(key);
        self.page = 1;
    }

    pub fn set_rows_per_page(&mut self, rows_per_page: usize) {
        self.rows_per_page = rows_per_page.max(1);
        self.page = 1;
    }

    pub fn page_count(&self, total: usize) -> usize {
        page_count(total, self.rows_per_page)
    }

    /// The requested page, pulled back inside `[1, page_count]`.
    pub fn current_page(&self, total: usize) -> usize {
        self.page.clamp(1, self.page_count(total).max(1))
    }

    pub fn go_to_page(&mut self, page: usize, total: usize) {
        self.page = page.clamp(1, self.page_count(total).max(1));
    }

    pub fn visible<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        page_slice(rows, self.current_page(rows.len()), self.rows_per_page)
    }

    pub fn showing(&self, total: usize) -> ShowingRange {
        ShowingRange::new(self.current_page(total), self.rows_per_page, total)
    }
}

// ── Mutations ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Default)]
pub enum MutationState {
    #[default]
    Idle,
    Submitting,
    Success,
    Error(String),
}

impl MutationState {
    pub fn is_pending(&self) -> bool {
        *self == MutationState::Submitting
    }

    /// Claim the slot. `false` while a mutation of this kind is in flight.
    pub fn begin(&mut self) -> bool {
        if self.is_pending() {
            return false;
        }
        *self = MutationState::Submitting;
        true
    }

    pub fn settle<T>(&mut self, result: &Result<T, ServiceError>) {
        *self = match result {
            Ok(_) => MutationState::Success,
            Err(err) => MutationState::Error(err.message().to_string()),
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
    Export,
}

/// Title and body of a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: &'static str,
    pub description: String,
}

impl MutationKind {
    pub fn success_notice(self) -> Notice {
        let (title, description) = match self {
            MutationKind::Create => ("School Added", "The school has been successfully added."),
            MutationKind::Update => ("School Updated", "The school has been successfully updated."),
            MutationKind::Delete => ("School Deleted", "The school has been permanently removed."),
            MutationKind::Export => ("Export Complete", "Your export has been generated successfully."),
        };
        Notice {
            title,
            description: description.to_string(),
        }
    }

    pub fn failure_notice(self, err: &ServiceError) -> Notice {
        match self {
            MutationKind::Create => {
                let reason = match err {
                    ServiceError::AuthenticationRequired(_) => {
                        "You need to be logged in to add a school. Please sign in and try again."
                    }
                    ServiceError::PermissionDenied(_) => {
                        "Permission denied: You don't have the required permissions to add a school."
                    }
                    other => other.message(),
                };
                Notice {
                    title: "Error",
                    description: format!("Failed to add school: {}", reason),
                }
            }
            MutationKind::Update => Notice {
                title: "Error",
                description: format!("Failed to update school: {}", err.message()),
            },
            MutationKind::Delete => Notice {
                title: "Error",
                description: format!("Failed to delete school: {}", err.message()),
            },
            MutationKind::Export => Notice {
                title: "Export Failed",
                description: format!("Could not generate export: {}", err.message()),
            },
        }
    }
}
