use dioxus::prelude::*;
use dioxus_primitives::alert_dialog as prim;

fn class_attr(class: &'static str) -> Attribute {
    Attribute::new("class", class, None, false)
}

/// Confirmation dialog root. Open state is controlled by the caller.
#[component]
pub fn AlertDialogRoot(mut props: prim::AlertDialogRootProps) -> Element {
    props.attributes.push(class_attr("alert-dialog-overlay"));

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        prim::AlertDialogRoot { ..props }
    }
}

#[component]
pub fn AlertDialogContent(mut props: prim::AlertDialogContentProps) -> Element {
    if props.class.is_none() {
        props.class = Some("alert-dialog-content".to_string());
    }

    rsx! {
        prim::AlertDialogContent { ..props }
    }
}

#[component]
pub fn AlertDialogTitle(mut props: prim::AlertDialogTitleProps) -> Element {
    props.attributes.push(class_attr("alert-dialog-title"));
    rsx! { prim::AlertDialogTitle { ..props } }
}

#[component]
pub fn AlertDialogDescription(mut props: prim::AlertDialogDescriptionProps) -> Element {
    props.attributes.push(class_attr("alert-dialog-description"));
    rsx! { prim::AlertDialogDescription { ..props } }
}

/// Button row. Put the confirming action here as a regular `Button` when
/// the dialog must stay open until the action succeeds.
#[component]
pub fn AlertDialogActions(mut props: prim::AlertDialogActionsProps) -> Element {
    props.attributes.push(class_attr("alert-dialog-actions"));
    rsx! { prim::AlertDialogActions { ..props } }
}

#[component]
pub fn AlertDialogCancel(mut props: prim::AlertDialogCancelProps) -> Element {
    props.attributes.push(class_attr("alert-dialog-cancel"));
    rsx! { prim::AlertDialogCancel { ..props } }
}
