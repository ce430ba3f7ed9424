use dioxus::prelude::*;

/// Loading placeholder with an animated pulse.
#[component]
pub fn Skeleton(#[props(extends = GlobalAttributes)] attributes: Vec<Attribute>) -> Element {
    let base = vec![Attribute::new("class", "skeleton", None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div {
            ..merged,
        }
    }
}

/// Placeholder rows shown while a table's first page loads.
#[component]
pub fn TableSkeleton(rows: usize, #[props(default = 6)] columns: usize) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "table-skeleton", "aria-busy": "true",
            for row in 0..rows {
                div { key: "{row}", class: "table-skeleton-row",
                    for col in 0..columns {
                        Skeleton { key: "{col}", class: "table-skeleton-cell" }
                    }
                }
            }
        }
    }
}
