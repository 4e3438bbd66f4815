use dioxus::prelude::*;

/// Dismissable error notice floating over the map.
#[component]
pub fn Banner(title: String, message: String, on_dismiss: EventHandler<()>) -> Element {
    rsx! {
        div { class: "banner", role: "alert",
            div { class: "banner-title",
                span { class: "banner-icon", "!" }
                p { "{title}" }
                button {
                    class: "banner-close",
                    aria_label: "Dismiss",
                    onclick: move |_| on_dismiss.call(()),
                    "\u{00d7}"
                }
            }
            p { class: "banner-message", "{message}" }
        }
    }
}
