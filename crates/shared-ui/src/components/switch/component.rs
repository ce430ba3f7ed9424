use dioxus::prelude::*;
use dioxus_primitives::switch as prim;

#[component]
pub fn Switch(mut props: prim::SwitchProps) -> Element {
    props
        .attributes
        .push(Attribute::new("class", "switch", None, false));

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        prim::Switch { ..props }
    }
}

#[component]
pub fn SwitchThumb(mut props: prim::SwitchThumbProps) -> Element {
    props
        .attributes
        .push(Attribute::new("class", "switch-thumb", None, false));

    rsx! {
        prim::SwitchThumb { ..props }
    }
}

/// Switch with a text label beside it, bound to a plain bool.
#[component]
pub fn LabeledSwitch(
    label: String,
    checked: bool,
    on_change: EventHandler<bool>,
    #[props(default = false)] disabled: bool,
) -> Element {
    rsx! {
        label { class: "switch-row",
            Switch {
                checked: Some(checked),
                disabled: disabled,
                on_checked_change: move |val: bool| on_change.call(val),
                SwitchThumb {}
            }
            span { class: "switch-label", "{label}" }
        }
    }
}
