use serde::{Deserialize, Serialize};

/// Rows-per-page choices offered under the table.
pub const ROWS_PER_PAGE_OPTIONS: &[usize] = &[10, 25, 50, 100];

pub const DEFAULT_ROWS_PER_PAGE: usize = 10;

/// Generic message response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MessageResponse {
    pub message: String,
}

/// Number of pages needed to show `total` rows, `per_page` at a time.
pub fn page_count(total: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    total.div_ceil(per_page)
}

/// The rows that land on 1-based `page`. Out-of-range pages are empty.
pub fn page_slice<T>(items: &[T], page: usize, per_page: usize) -> &[T] {
    if page == 0 || per_page == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(per_page);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(per_page).min(items.len());
    &items[start..end]
}

/// "Showing X to Y of N" figures for the table footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowingRange {
    pub from: usize,
    pub to: usize,
    pub total: usize,
}

impl ShowingRange {
    pub fn new(page: usize, per_page: usize, total: usize) -> Self {
        let page = page.max(1);
        Self {
            from: ((page - 1) * per_page + 1).min(total),
            to: (page * per_page).min(total),
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_is_ceiling_division() {
        assert_eq!(page_count(0, 10), 0);
        assert_eq!(page_count(1, 10), 1);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
        assert_eq!(page_count(101, 25), 5);
        assert_eq!(page_count(5, 0), 0);
    }

    #[test]
    fn last_page_holds_the_remainder() {
        let items: Vec<usize> = (0..23).collect();
        for per_page in [1, 4, 10, 23, 25] {
            let pages = page_count(items.len(), per_page);
            let last = page_slice(&items, pages, per_page);
            assert_eq!(last.len(), items.len() - (pages - 1) * per_page);
            assert!(!last.is_empty() && last.len() <= per_page);
        }
    }

    #[test]
    fn page_slice_out_of_range_is_empty() {
        let items = [1, 2, 3];
        assert!(page_slice(&items, 0, 10).is_empty());
        assert!(page_slice(&items, 2, 10).is_empty());
        assert_eq!(page_slice(&items, 2, 2), &[3]);
    }

    #[test]
    fn showing_range_clamps_to_total() {
        assert_eq!(
            ShowingRange::new(3, 10, 23),
            ShowingRange { from: 21, to: 23, total: 23 }
        );
        assert_eq!(
            ShowingRange::new(1, 10, 0),
            ShowingRange { from: 0, to: 0, total: 0 }
        );
    }
}
