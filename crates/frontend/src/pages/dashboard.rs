use std::cell::RefCell;
use std::rc::Rc;

use dioxus::logger::tracing::{info, warn};
use dioxus::prelude::*;
use dronewatch_shared::browser::LoadState;
use dronewatch_shared::view::ViewConfig;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::api;
use crate::components::header::Header;
use crate::components::map_view::MapView;
use crate::components::nav_controls::NavControls;
use crate::components::sidebar::Sidebar;
use crate::components::status_screens::{EmptyScreen, ErrorScreen, LoadingScreen};

fn viewport_width() -> f64 {
    web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|w| w.as_f64())
        .unwrap_or(f64::MAX)
}

#[component]
pub fn Dashboard() -> Element {
    let view_config = ViewConfig::default();
    let mut page = use_signal(|| LoadState::Loading);
    let mut is_mobile = use_signal(|| view_config.is_mobile(viewport_width()));

    // Fetch once on mount
    use_future(move || async move {
        let result = api::fetch_records().await;
        match &result {
            Ok(records) => info!(count = records.len(), "records loaded"),
            Err(e) => warn!(error = %e, "failed to load records"),
        }
        let mobile = *is_mobile.peek();
        page.write().resolve(result, mobile);
    });

    // Resize listener lives as long as the page
    let resize: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = use_hook(|| {
        let handler = Closure::<dyn FnMut()>::new(move || {
            let mobile = view_config.is_mobile(viewport_width());
            if *is_mobile.peek() != mobile {
                is_mobile.set(mobile);
                if let Some(browser) = page.write().browser_mut() {
                    browser.set_mobile(mobile);
                }
            }
        });
        if let Some(window) = web_sys::window() {
            if let Err(e) = window
                .add_event_listener_with_callback("resize", handler.as_ref().unchecked_ref())
            {
                warn!(error = ?e, "could not attach resize listener");
            }
        }
        Rc::new(RefCell::new(Some(handler)))
    });
    {
        let resize = resize.clone();
        use_drop(move || {
            if let (Some(window), Some(handler)) = (web_sys::window(), resize.borrow_mut().take()) {
                let _ = window
                    .remove_event_listener_with_callback("resize", handler.as_ref().unchecked_ref());
            }
        });
    }

    let records = use_memo(move || {
        page.read()
            .browser()
            .map(|b| b.records().to_vec())
            .unwrap_or_default()
    });
    let selected = use_memo(move || page.read().browser().and_then(|b| b.selected_index()));
    let sidebar_open = use_memo(move || {
        page.read()
            .browser()
            .map(|b| b.sidebar_open())
            .unwrap_or(false)
    });

    let select = move |index: usize| {
        if let Some(browser) = page.write().browser_mut() {
            browser.select(index);
        }
    };

    let state = page.read().clone();
    let browser = match state {
        LoadState::Loading => return rsx! { LoadingScreen {} },
        LoadState::Error(e) => return rsx! { ErrorScreen { message: e.to_string() } },
        LoadState::Loaded(browser) => browser,
    };
    if browser.is_empty() {
        return rsx! { EmptyScreen {} };
    }

    let mobile = *is_mobile.read();
    let open = browser.sidebar_open();
    let index = browser.selected_index().unwrap_or(0);

    rsx! {
        div { class: "app",
            Header {
                sidebar_open: open,
                on_toggle: move |_| {
                    if let Some(browser) = page.write().browser_mut() {
                        browser.toggle_sidebar();
                    }
                },
            }
            div { class: "layout",
                Sidebar {
                    records: browser.records().to_vec(),
                    selected: index,
                    is_open: open,
                    on_select: select,
                }
                if mobile && open {
                    div {
                        class: "backdrop",
                        onclick: move |_| {
                            if let Some(browser) = page.write().browser_mut() {
                                browser.close_sidebar();
                            }
                        },
                    }
                }
                main { class: "map-area",
                    MapView {
                        records,
                        selected,
                        is_mobile,
                        sidebar_open,
                        view_config,
                        on_select: select,
                    }
                    if mobile && !open {
                        NavControls {
                            index,
                            total: browser.len(),
                            on_prev: move |_| {
                                if let Some(browser) = page.write().browser_mut() {
                                    browser.retreat();
                                }
                            },
                            on_next: move |_| {
                                if let Some(browser) = page.write().browser_mut() {
                                    browser.advance();
                                }
                            },
                        }
                    }
                }
            }
        }
    }
}
