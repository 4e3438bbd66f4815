use std::cell::RefCell;
use std::rc::Rc;

use dioxus::logger::tracing::{error, info, warn};
use dioxus::prelude::*;
use dronewatch_shared::error::OverlayError;
use dronewatch_shared::models::{Record, BASE_LOCATION};
use dronewatch_shared::overlay::OverlayManager;
use dronewatch_shared::route::{RouteEffect, RouteState, GEOLOCATION_OPTIONS};
use dronewatch_shared::view::{base_marker, record_markers, user_marker, ViewConfig, Viewport};
use gloo_timers::future::TimeoutFuture;

use crate::components::banner::Banner;
use crate::components::route_controls::{RouteControls, TransportSelector};
use crate::config::{self, RoutingConfig};
use crate::geolocation;
use crate::leaflet::{self, LeafletMap, LeafletRouting};
use crate::locale;

const MAP_CONTAINER_ID: &str = "record-map";

/// Matches the sidebar's CSS slide transition.
const SIDEBAR_TRANSITION_MS: u32 = 300;

/// Dismissable message shown over the map.
#[derive(Debug, Clone, PartialEq)]
struct Notice {
    title: &'static str,
    message: String,
}

impl Notice {
    fn map(message: impl Into<String>) -> Self {
        Notice {
            title: "Map Error",
            message: message.into(),
        }
    }

    fn route(err: &OverlayError) -> Self {
        Notice {
            title: "Route Error",
            message: err.to_string(),
        }
    }
}

type SharedMap = Rc<RefCell<Option<LeafletMap>>>;
type SharedOverlay = Rc<RefCell<Option<OverlayManager<LeafletRouting>>>>;

/// Start a geolocation lookup if the transition asked for one.
fn run_route_effect(effect: RouteEffect, mut route: Signal<RouteState>) {
    if effect != RouteEffect::RequestLocation {
        return;
    }
    spawn(async move {
        match geolocation::current_position(GEOLOCATION_OPTIONS).await {
            Ok(location) => {
                info!(lat = location.latitude, lng = location.longitude, "user located");
                route.write().location_found(location);
            }
            Err(e) => {
                warn!(error = ?e, "geolocation failed");
                route.write().location_failed(e);
            }
        }
    });
}

/// Load Leaflet, build the map, then load the routing plugin.
async fn init_map(
    map_slot: SharedMap,
    overlay_slot: SharedOverlay,
    viewport: Viewport,
    routing_config: RoutingConfig,
    mut map_ready: Signal<bool>,
    mut notice: Signal<Option<Notice>>,
) {
    if let Err(e) = leaflet::load_script(config::LEAFLET_JS, config::LEAFLET_CSS).await {
        error!(error = ?e, "failed to load Leaflet");
        notice.set(Some(Notice::map("Failed to load the map. Please reload the page.")));
        return;
    }
    let mut map = match LeafletMap::create(MAP_CONTAINER_ID, viewport) {
        Ok(map) => map,
        Err(e) => {
            error!(error = ?e, "failed to create map");
            notice.set(Some(Notice::map("Failed to create the map. Please reload the page.")));
            return;
        }
    };
    map.set_base_marker(&base_marker(BASE_LOCATION));
    *overlay_slot.borrow_mut() = Some(OverlayManager::new(map.routing(&routing_config)));
    *map_slot.borrow_mut() = Some(map);
    map_ready.set(true);

    if let Err(e) = leaflet::load_script(routing_config.plugin_js, routing_config.plugin_css).await {
        let err = OverlayError::PluginLoad(format!("{e:?}"));
        error!(error = err.detail(), "failed to load routing plugin");
        notice.set(Some(Notice::route(&err)));
        return;
    }
    let result = overlay_slot.borrow_mut().as_mut().map(|m| m.mark_ready());
    if let Some(Err(e)) = result {
        warn!(error = e.detail(), "deferred route could not be built");
        notice.set(Some(Notice::route(&e)));
    }
}

/// Map with record markers, the user's position and the optional route.
#[component]
pub fn MapView(
    records: Memo<Vec<Record>>,
    selected: Memo<Option<usize>>,
    is_mobile: Signal<bool>,
    sidebar_open: Memo<bool>,
    view_config: ViewConfig,
    on_select: EventHandler<usize>,
) -> Element {
    let mut route = use_signal(RouteState::new);
    let mut notice = use_signal(|| None::<Notice>);
    let user_location = use_memo(move || route.read().user_location());
    let map_ready = use_signal(|| false);
    let marker_click = use_signal(|| None::<usize>);
    let map_slot: SharedMap = use_hook(|| Rc::new(RefCell::new(None)));
    let overlay_slot: SharedOverlay = use_hook(|| Rc::new(RefCell::new(None)));

    // Record markers are rebuilt only when the records change.
    {
        let map_slot = map_slot.clone();
        use_effect(move || {
            let ready = *map_ready.read();
            let records = records.read();
            if !ready {
                return;
            }
            let specs = record_markers(&records, *selected.peek(), locale::offset_at);
            if let Some(map) = map_slot.borrow_mut().as_mut() {
                map.set_record_markers(&specs, move |index| {
                    let mut click = marker_click;
                    click.set(Some(index));
                });
            }
        });
    }

    // A selection change restyles two markers and leaves popups open.
    {
        let map_slot = map_slot.clone();
        use_effect(move || {
            let ready = *map_ready.read();
            let selected = *selected.read();
            if !ready {
                return;
            }
            if let Some(map) = map_slot.borrow_mut().as_mut() {
                map.select_record(selected);
            }
        });
    }

    {
        let map_slot = map_slot.clone();
        use_effect(move || {
            let ready = *map_ready.read();
            let user = *user_location.read();
            if !ready {
                return;
            }
            if let Some(map) = map_slot.borrow_mut().as_mut() {
                map.set_user_marker(user.map(user_marker).as_ref());
            }
        });
    }

    // Marker clicks arrive from Leaflet; forward them from inside the runtime.
    use_effect(move || {
        if let Some(index) = *marker_click.read() {
            on_select.call(index);
        }
    });

    // Recenter on the selected record.
    {
        let map_slot = map_slot.clone();
        use_effect(move || {
            let ready = *map_ready.read();
            let mobile = *is_mobile.read();
            let selected = *selected.read();
            let records = records.read();
            if !ready {
                return;
            }
            let record = selected.and_then(|i| records.get(i));
            if let (Some(viewport), Some(map)) =
                (view_config.viewport(record, mobile), map_slot.borrow().as_ref())
            {
                map.set_view(viewport);
            }
        });
    }

    // Keep the routing overlay in step with location, destination, visibility and mode.
    {
        let overlay_slot = overlay_slot.clone();
        use_effect(move || {
            let ready = *map_ready.read();
            let selected = *selected.read();
            let records = records.read();
            let destination = selected.and_then(|i| records.get(i)).map(Record::position);
            let key = route.read().overlay_key(destination);
            if !ready {
                return;
            }
            let result = overlay_slot.borrow_mut().as_mut().map(|m| m.sync(key));
            if let Some(Err(e)) = result {
                warn!(error = e.detail(), "routing overlay sync failed");
                notice.set(Some(Notice::route(&e)));
            }
        });
    }

    // Leaflet must re-measure once the sidebar finishes sliding.
    {
        let map_slot = map_slot.clone();
        use_effect(move || {
            let _open = *sidebar_open.read();
            let _mobile = *is_mobile.read();
            let map_slot = map_slot.clone();
            spawn(async move {
                TimeoutFuture::new(SIDEBAR_TRANSITION_MS).await;
                if let Some(map) = map_slot.borrow().as_ref() {
                    map.invalidate_size();
                }
            });
        });
    }

    // Overlay goes before the map it is drawn on.
    {
        let map_slot = map_slot.clone();
        let overlay_slot = overlay_slot.clone();
        use_drop(move || {
            drop(overlay_slot.borrow_mut().take());
            drop(map_slot.borrow_mut().take());
        });
    }

    let state = route.read().clone();
    let current_notice = notice.read().clone();

    rsx! {
        div { class: "map-view",
            div {
                id: MAP_CONTAINER_ID,
                class: "map-canvas",
                onmounted: move |_| {
                    let records = records.peek();
                    let selected_index = *selected.peek();
                    let record = selected_index.and_then(|i| records.get(i));
                    let mobile = *is_mobile.peek();
                    let viewport = view_config.viewport(record, mobile).unwrap_or(Viewport {
                        center: BASE_LOCATION,
                        zoom: view_config.zoom(mobile),
                    });
                    spawn(init_map(
                        map_slot.clone(),
                        overlay_slot.clone(),
                        viewport,
                        RoutingConfig::default(),
                        map_ready,
                        notice,
                    ));
                },
            }

            RouteControls {
                locating: state.is_locating(),
                has_location: state.user_location().is_some(),
                route_visible: state.is_route_visible(),
                on_locate: move |_| {
                    let effect = route.write().request_location();
                    run_route_effect(effect, route);
                },
                on_toggle: move |_| {
                    let effect = route.write().toggle_route();
                    run_route_effect(effect, route);
                },
            }

            if state.mode_selector_visible() {
                TransportSelector {
                    mode: state.transport_mode(),
                    on_change: move |mode| {
                        route.write().set_transport_mode(mode);
                    },
                }
            }

            if let Some(err) = state.location_error() {
                Banner {
                    title: "Location Error",
                    message: err.to_string(),
                    on_dismiss: move |_| route.write().dismiss_error(),
                }
            }

            if let Some(Notice { title, message }) = current_notice {
                Banner {
                    title: title.to_string(),
                    message,
                    on_dismiss: move |_| notice.set(None),
                }
            }
        }
    }
}
