use dioxus::prelude::*;
use dronewatch_shared::route::TransportMode;

fn mode_icon(mode: TransportMode) -> &'static str {
    match mode {
        TransportMode::Driving => "\u{1f697}",
        TransportMode::Cycling => "\u{1f6b2}",
        TransportMode::Walking => "\u{1f6b6}",
    }
}

/// Locate and show/hide-route buttons.
#[component]
pub fn RouteControls(
    locating: bool,
    has_location: bool,
    route_visible: bool,
    on_locate: EventHandler<()>,
    on_toggle: EventHandler<()>,
) -> Element {
    let locate_class = if locating { "round-button busy" } else { "round-button" };
    let route_class = if !has_location {
        "round-button inactive"
    } else if route_visible {
        "round-button active"
    } else {
        "round-button"
    };
    let route_title = if route_visible { "Hide route" } else { "Show route" };

    rsx! {
        div { class: "route-controls",
            button {
                class: "{locate_class}",
                title: "Get my location",
                disabled: locating,
                onclick: move |_| on_locate.call(()),
                "\u{1f9ed}"
            }
            button {
                class: "{route_class}",
                title: "{route_title}",
                disabled: locating,
                onclick: move |_| on_toggle.call(()),
                "\u{27a4}"
            }
        }
    }
}

#[component]
pub fn TransportSelector(mode: TransportMode, on_change: EventHandler<TransportMode>) -> Element {
    rsx! {
        div { class: "transport-selector",
            for option in TransportMode::ALL {
                button {
                    key: "{option}",
                    class: if option == mode { "active" } else { "" },
                    title: option.label(),
                    onclick: move |_| on_change.call(option),
                    {mode_icon(option)}
                }
            }
        }
    }
}
