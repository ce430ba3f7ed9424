use dioxus::prelude::*;

/// Scrollable table wrapper with co-located styles.
#[component]
pub fn DataTable(children: Element) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "data-table",
            table {
                {children}
            }
        }
    }
}

/// Table header section. Wraps `th` cells in a `thead > tr`.
#[component]
pub fn DataTableHeader(children: Element) -> Element {
    rsx! {
        thead {
            tr { {children} }
        }
    }
}

#[component]
pub fn DataTableBody(children: Element) -> Element {
    rsx! {
        tbody { {children} }
    }
}

/// Column header cell. `numeric` right-aligns the column.
#[component]
pub fn DataTableColumn(#[props(default = false)] numeric: bool, children: Element) -> Element {
    rsx! {
        th { class: if numeric { "numeric" } else { "" }, {children} }
    }
}

#[component]
pub fn DataTableRow(children: Element) -> Element {
    rsx! {
        tr { class: "data-table-row", {children} }
    }
}

/// Body cell. `title` shows the full text on hover when the cell is truncated.
#[component]
pub fn DataTableCell(
    #[props(default = false)] numeric: bool,
    #[props(default)] title: Option<String>,
    children: Element,
) -> Element {
    rsx! {
        td {
            class: if numeric { "numeric" } else { "" },
            title: title,
            {children}
        }
    }
}

/// Footer strip under the table for range text and page controls.
#[component]
pub fn DataTableFooter(children: Element) -> Element {
    rsx! {
        div { class: "data-table-footer", {children} }
    }
}
