mod api;
mod components;
mod config;
mod geolocation;
mod leaflet;
mod locale;
mod pages;

use dioxus::prelude::*;

const CSS: Asset = asset!("/assets/main.css");
const FAVICON: Asset = asset!("/assets/favicon.svg");

#[allow(non_snake_case)]
fn App() -> Element {
    rsx! {
        document::Title { "Drone Monitoring" }
        document::Link { rel: "icon", r#type: "image/svg+xml", href: FAVICON }
        document::Stylesheet { href: CSS }
        pages::dashboard::Dashboard {}
    }
}

fn main() {
    launch(App);
}
