use dioxus::prelude::*;

use crate::components::button::{Button, ButtonVariant};

/// One slot in the page-number strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

/// Page numbers to render: the first page, the last page, and the current
/// page with one neighbour either side. Each gap collapses to one ellipsis.
///
/// `page_window(5, 10)` is `1 … 4 5 6 … 10`.
pub fn page_window(current: usize, page_count: usize) -> Vec<PageItem> {
    if page_count == 0 {
        return Vec::new();
    }
    let current = current.clamp(1, page_count);

    let mut items = Vec::new();
    let mut last_shown = 0;
    for page in 1..=page_count {
        let near_current = page + 1 >= current && page <= current + 1;
        if page == 1 || page == page_count || near_current {
            if last_shown != 0 && page > last_shown + 1 {
                items.push(PageItem::Ellipsis);
            }
            items.push(PageItem::Page(page));
            last_shown = page;
        }
    }
    items
}

/// Previous/Next buttons around a windowed strip of page numbers.
/// Pages are 1-based. Renders nothing when there is at most one page.
#[component]
pub fn Pagination(page: usize, page_count: usize, on_change: EventHandler<usize>) -> Element {
    if page_count <= 1 {
        return rsx! {};
    }

    let current = page.clamp(1, page_count);
    let items = page_window(current, page_count);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        nav { class: "pagination", "aria-label": "Pagination",
            Button {
                variant: ButtonVariant::Outline,
                disabled: current <= 1,
                onclick: move |_| on_change.call(current.saturating_sub(1).max(1)),
                "Previous"
            }
            for (idx, item) in items.into_iter().enumerate() {
                {match item {
                    PageItem::Page(n) => rsx! {
                        Button {
                            key: "{idx}-{n}",
                            variant: if n == current { ButtonVariant::Primary } else { ButtonVariant::Ghost },
                            onclick: move |_| on_change.call(n),
                            "{n}"
                        }
                    },
                    PageItem::Ellipsis => rsx! {
                        span { key: "{idx}-gap", class: "pagination-ellipsis", "…" }
                    },
                }}
            }
            Button {
                variant: ButtonVariant::Outline,
                disabled: current >= page_count,
                onclick: move |_| on_change.call((current + 1).min(page_count)),
                "Next"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageItem::{Ellipsis, Page};

    #[test]
    fn middle_page_has_gaps_on_both_sides() {
        assert_eq!(
            page_window(5, 10),
            vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn first_page_only_gaps_on_the_right() {
        assert_eq!(page_window(1, 10), vec![Page(1), Page(2), Ellipsis, Page(10)]);
    }

    #[test]
    fn last_page_only_gaps_on_the_left() {
        assert_eq!(page_window(10, 10), vec![Page(1), Ellipsis, Page(9), Page(10)]);
    }

    #[test]
    fn small_counts_have_no_ellipsis() {
        assert_eq!(page_window(2, 3), vec![Page(1), Page(2), Page(3)]);
        assert_eq!(page_window(1, 1), vec![Page(1)]);
        assert!(page_window(1, 0).is_empty());
    }

    #[test]
    fn adjacent_neighbour_does_not_leave_a_gap() {
        assert_eq!(
            page_window(3, 6),
            vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(6)]
        );
    }

    #[test]
    fn out_of_range_page_is_clamped() {
        assert_eq!(page_window(42, 4), vec![Page(1), Ellipsis, Page(3), Page(4)]);
    }
}
