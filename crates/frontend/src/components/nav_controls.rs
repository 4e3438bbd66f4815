use dioxus::prelude::*;
use dronewatch_shared::format;

/// Previous/next buttons shown on mobile while the sidebar is closed.
#[component]
pub fn NavControls(
    index: usize,
    total: usize,
    on_prev: EventHandler<()>,
    on_next: EventHandler<()>,
) -> Element {
    let counter = format::position_counter(index, total);
    rsx! {
        div { class: "nav-controls",
            button {
                aria_label: "Previous location",
                onclick: move |_| on_prev.call(()),
                "\u{2039}"
            }
            div { class: "nav-counter", "{counter}" }
            button {
                aria_label: "Next location",
                onclick: move |_| on_next.call(()),
                "\u{203a}"
            }
        }
    }
}
