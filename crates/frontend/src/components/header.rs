use dioxus::prelude::*;

#[component]
pub fn Header(sidebar_open: bool, on_toggle: EventHandler<()>) -> Element {
    let label = if sidebar_open { "Close panel" } else { "Open panel" };
    rsx! {
        header { class: "header",
            div { class: "header-title",
                span { class: "header-icon", "\u{2708}" }
                h1 { "Drone Monitoring" }
            }
            button {
                class: "icon-button",
                aria_label: "{label}",
                onclick: move |_| on_toggle.call(()),
                if sidebar_open { "\u{2715}" } else { "\u{2630}" }
            }
        }
    }
}
