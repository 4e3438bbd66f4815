use dioxus::prelude::*;

#[component]
pub fn LoadingScreen() -> Element {
    rsx! {
        div { class: "status-screen",
            div { class: "spinner" }
            p { "Loading victim data..." }
        }
    }
}

/// Fetch failure. Retry is a full page reload.
#[component]
pub fn ErrorScreen(message: String) -> Element {
    rsx! {
        div { class: "status-screen",
            div { class: "status-card error",
                h2 { "Error" }
                p { "{message}" }
                button {
                    onclick: move |_| {
                        if let Some(window) = web_sys::window() {
                            let _ = window.location().reload();
                        }
                    },
                    "Try Again"
                }
            }
        }
    }
}

#[component]
pub fn EmptyScreen() -> Element {
    rsx! {
        div { class: "status-screen",
            div { class: "status-card empty",
                h2 { "No Data" }
                p { "No victim records were found." }
            }
        }
    }
}
