use dioxus::prelude::*;
use dronewatch_shared::format;
use dronewatch_shared::models::Record;

use crate::locale;

#[component]
pub fn Sidebar(
    records: Vec<Record>,
    selected: usize,
    is_open: bool,
    on_select: EventHandler<usize>,
) -> Element {
    let class = if is_open { "sidebar open" } else { "sidebar" };
    let Some(record) = records.get(selected).cloned() else {
        return rsx! {};
    };

    rsx! {
        aside { class: "{class}",
            div { class: "sidebar-scroll",
                RecordList { records: records.clone(), selected, on_select }
                RecordDetail { record: record.clone() }
                AdditionalInfo { record }
            }
        }
    }
}

#[component]
fn RecordList(records: Vec<Record>, selected: usize, on_select: EventHandler<usize>) -> Element {
    rsx! {
        section { class: "panel",
            h2 { "Victim List" }
            div { class: "record-list",
                for (index, record) in records.iter().enumerate() {
                    div {
                        key: "{index}",
                        class: if index == selected { "record-item selected" } else { "record-item" },
                        onclick: move |_| on_select.call(index),
                        div { class: "record-badge", "\u{1f465}" }
                        div {
                            h3 { {format::record_label(index)} }
                            p { class: "muted", {format::people_detected(record.person_count)} }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn RecordDetail(record: Record) -> Element {
    let detected = locale::local_timestamp(&record.detected_at);
    let coords = format::format_coordinates(record.position());
    rsx! {
        section { class: "panel",
            h2 { "Victim Details" }
            div { class: "detail-card",
                div { class: "detail-row",
                    span { class: "muted", "Victims:" }
                    span { "{record.person_count} people" }
                }
                div { class: "detail-row",
                    span { class: "muted", "Detected at:" }
                    span { "{detected}" }
                }
                div { class: "detail-row",
                    span { class: "muted", "Coordinates:" }
                    span { "{coords}" }
                }
            }
        }
    }
}

#[component]
fn AdditionalInfo(record: Record) -> Element {
    let detected = locale::local_timestamp(&record.detected_at);
    let coords = format::format_coordinates(record.position());
    rsx! {
        section { class: "panel info",
            p { "\u{23f1} Detected on: {detected}" }
            p { "\u{1f4cd} Coordinates: {coords}" }
            p { "\u{1f465} People detected: {record.person_count}" }
            p { class: "highlight",
                "Tip: use the compass button on the map to get your location and a route to the victims."
            }
            p { class: "highlight",
                "Choose a transport mode (car, bicycle, on foot) while a route is shown."
            }
        }
    }
}
