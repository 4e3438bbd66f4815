//! Bindings to Leaflet and the Leaflet Routing Machine plugin.
//!
//! Both libraries are injected at runtime; [`load_script`] guarantees each
//! script is requested at most once per page session.

use std::cell::RefCell;
use std::collections::HashMap;

use dronewatch_shared::error::OverlayError;
use dronewatch_shared::models::LatLng;
use dronewatch_shared::overlay::{OverlayKey, RoutingBackend};
use dronewatch_shared::view::{selection_restyle, MarkerSpec, MarkerVariant, Viewport};
use serde::Serialize;
use serde_json::json;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::config::{self, RoutingConfig};

#[wasm_bindgen]
extern "C" {
    #[derive(Clone)]
    pub type Map;

    #[wasm_bindgen(js_namespace = L, js_name = map, catch)]
    fn new_map(container_id: &str, options: &JsValue) -> Result<Map, JsValue>;

    #[wasm_bindgen(method, js_name = setView)]
    fn set_view(this: &Map, center: &JsValue, zoom: f64) -> Map;

    #[wasm_bindgen(method, js_name = invalidateSize)]
    fn invalidate_size(this: &Map) -> Map;

    #[wasm_bindgen(method, js_name = removeControl, catch)]
    fn remove_control(this: &Map, control: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method)]
    fn remove(this: &Map) -> Map;

    /// Any Leaflet layer or control.
    #[derive(Clone)]
    pub type Layer;

    #[wasm_bindgen(js_namespace = L, js_name = tileLayer)]
    fn tile_layer(url: &str, options: &JsValue) -> Layer;

    #[wasm_bindgen(js_namespace = L, js_name = layerGroup)]
    fn layer_group() -> Layer;

    #[wasm_bindgen(js_namespace = L, js_name = marker)]
    fn marker(latlng: &JsValue, options: &JsValue) -> Layer;

    #[wasm_bindgen(js_namespace = L, js_name = icon)]
    fn icon(options: &JsValue) -> JsValue;

    #[wasm_bindgen(js_namespace = ["L", "control"], js_name = zoom)]
    fn zoom_control(options: &JsValue) -> Layer;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_to(this: &Layer, target: &JsValue) -> Layer;

    #[wasm_bindgen(method, js_name = bindPopup)]
    fn bind_popup(this: &Layer, html: &str) -> Layer;

    #[wasm_bindgen(method)]
    fn on(this: &Layer, event: &str, handler: &js_sys::Function) -> Layer;

    #[wasm_bindgen(method, js_name = removeLayer)]
    fn remove_layer(this: &Layer, layer: &Layer) -> Layer;

    #[wasm_bindgen(method, js_name = setIcon)]
    fn set_icon(this: &Layer, icon: &JsValue) -> Layer;

    #[wasm_bindgen(method, js_name = setZIndexOffset)]
    fn set_z_index_offset(this: &Layer, offset: f64) -> Layer;

    #[wasm_bindgen(js_namespace = ["L", "Routing"], js_name = control, catch)]
    fn routing_control(options: &JsValue) -> Result<Layer, JsValue>;

    #[wasm_bindgen(js_namespace = ["L", "Routing"], js_name = osrmv1, catch)]
    fn osrm_v1(options: &JsValue) -> Result<JsValue, JsValue>;
}

thread_local! {
    static SCRIPTS: RefCell<HashMap<&'static str, js_sys::Promise>> = RefCell::new(HashMap::new());
}

/// Load a script (and its stylesheet) once; later callers await the same load.
pub async fn load_script(src: &'static str, stylesheet: &'static str) -> Result<(), JsValue> {
    let promise = SCRIPTS.with(|scripts| {
        scripts
            .borrow_mut()
            .entry(src)
            .or_insert_with(|| inject_script(src, stylesheet))
            .clone()
    });
    JsFuture::from(promise).await.map(|_| ())
}

fn inject_script(src: &str, stylesheet: &str) -> js_sys::Promise {
    js_sys::Promise::new(&mut |resolve, reject| {
        if let Err(e) = append_tags(src, stylesheet, &resolve, &reject) {
            let _ = reject.call1(&JsValue::NULL, &e);
        }
    })
}

fn append_tags(
    src: &str,
    stylesheet: &str,
    on_load: &js_sys::Function,
    on_error: &js_sys::Function,
) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("no document head"))?;

    let link: web_sys::HtmlLinkElement = document.create_element("link")?.dyn_into()?;
    link.set_rel("stylesheet");
    link.set_href(stylesheet);
    head.append_child(&link)?;

    let script: web_sys::HtmlScriptElement = document.create_element("script")?.dyn_into()?;
    script.set_src(src);
    script.set_async(true);
    script.set_onload(Some(on_load));
    script.set_onerror(Some(on_error));
    head.append_child(&script)?;
    Ok(())
}

fn to_js<T: Serialize>(value: &T) -> JsValue {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .unwrap_or(JsValue::UNDEFINED)
}

fn latlng(position: LatLng) -> JsValue {
    to_js(&[position.latitude, position.longitude])
}

/// Options for `L.icon` for a marker of the given variant.
pub fn icon_options(variant: MarkerVariant) -> serde_json::Value {
    let (w, h) = variant.size();
    json!({
        "iconUrl": config::marker_icon_url(variant.color()),
        "shadowUrl": config::MARKER_SHADOW_URL,
        "iconSize": [w, h],
        "iconAnchor": [w / 2, h],
        "popupAnchor": [1, -34],
        "shadowSize": [41, 41],
    })
}

/// Options for `L.Routing.control`, minus the router and marker factory.
pub fn routing_options(key: &OverlayKey) -> serde_json::Value {
    json!({
        "waypoints": [
            [key.origin.latitude, key.origin.longitude],
            [key.destination.latitude, key.destination.longitude],
        ],
        "routeWhileDragging": false,
        "showAlternatives": false,
        "fitSelectedRoutes": false,
        "collapsible": true,
        "addWaypoints": false,
        "draggableWaypoints": false,
        "lineOptions": {
            "styles": [
                { "color": "#6366F1", "opacity": 0.8, "weight": 6 },
                { "color": "#4F46E5", "opacity": 0.9, "weight": 4 },
            ]
        },
    })
}

/// A live Leaflet map with its marker layer.
///
/// Markers are kept per group so a change to one group leaves the others,
/// and any popup open on them, in place.
pub struct LeafletMap {
    map: Map,
    markers: Layer,
    base: Option<Layer>,
    records: Vec<Layer>,
    selected: Option<usize>,
    user: Option<Layer>,
    // Click handlers must outlive the markers they are bound to.
    handlers: Vec<Closure<dyn FnMut()>>,
}

impl LeafletMap {
    pub fn create(container_id: &str, viewport: Viewport) -> Result<Self, JsValue> {
        let options = to_js(&json!({ "zoomControl": false, "attributionControl": false }));
        let map = new_map(container_id, &options)?;
        map.set_view(&latlng(viewport.center), viewport.zoom as f64);

        tile_layer(config::TILE_URL, &to_js(&json!({ "attribution": config::TILE_ATTRIBUTION })))
            .add_to(&map);
        zoom_control(&to_js(&json!({ "position": "bottomright" }))).add_to(&map);
        let markers = layer_group().add_to(&map);

        Ok(LeafletMap {
            map,
            markers,
            base: None,
            records: Vec::new(),
            selected: None,
            user: None,
            handlers: Vec::new(),
        })
    }

    pub fn set_view(&self, viewport: Viewport) {
        self.map.set_view(&latlng(viewport.center), viewport.zoom as f64);
    }

    pub fn invalidate_size(&self) {
        self.map.invalidate_size();
    }

    fn add_marker(&self, spec: &MarkerSpec) -> Layer {
        let options = to_js(&json!({ "zIndexOffset": spec.variant.z_offset() }));
        let _ = js_sys::Reflect::set(&options, &JsValue::from_str("icon"), &icon_for(spec.variant));
        let marker = marker(&latlng(spec.position), &options);
        marker.bind_popup(&spec.popup.to_html());
        marker.add_to(&self.markers)
    }

    pub fn set_base_marker(&mut self, spec: &MarkerSpec) {
        if let Some(old) = self.base.take() {
            self.markers.remove_layer(&old);
        }
        self.base = Some(self.add_marker(spec));
    }

    /// Replace the record markers. `on_click` receives the record index.
    pub fn set_record_markers(&mut self, specs: &[MarkerSpec], on_click: impl Fn(usize) + Clone + 'static) {
        for old in self.records.drain(..) {
            self.markers.remove_layer(&old);
        }
        self.handlers.clear();

        for spec in specs {
            let marker = self.add_marker(spec);
            if let Some(index) = spec.record_index {
                let on_click = on_click.clone();
                let handler = Closure::<dyn FnMut()>::new(move || on_click(index));
                marker.on("click", handler.as_ref().unchecked_ref());
                self.handlers.push(handler);
            }
            self.records.push(marker);
        }
        self.selected = specs
            .iter()
            .position(|spec| spec.variant == MarkerVariant::SelectedRecord);
    }

    /// Restyle only the previously and newly selected record markers, so
    /// an open popup survives the selection change.
    pub fn select_record(&mut self, selected: Option<usize>) {
        for (index, variant) in selection_restyle(self.selected, selected) {
            if let Some(marker) = self.records.get(index) {
                restyle(marker, variant);
            }
        }
        self.selected = selected;
    }

    pub fn set_user_marker(&mut self, spec: Option<&MarkerSpec>) {
        if let Some(old) = self.user.take() {
            self.markers.remove_layer(&old);
        }
        self.user = spec.map(|spec| self.add_marker(spec));
    }

    pub fn routing(&self, config: &RoutingConfig) -> LeafletRouting {
        LeafletRouting {
            map: self.map.clone(),
            service_url: config.service_url.clone(),
        }
    }
}

fn icon_for(variant: MarkerVariant) -> JsValue {
    icon(&to_js(&icon_options(variant)))
}

fn restyle(marker: &Layer, variant: MarkerVariant) {
    marker.set_icon(&icon_for(variant));
    marker.set_z_index_offset(variant.z_offset() as f64);
}

impl Drop for LeafletMap {
    fn drop(&mut self) {
        self.map.remove();
    }
}

/// Builds routing controls on a map through the OSRM router.
pub struct LeafletRouting {
    map: Map,
    service_url: String,
}

fn describe(err: JsValue) -> String {
    err.as_string()
        .or_else(|| {
            js_sys::Reflect::get(&err, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| format!("{err:?}"))
}

impl RoutingBackend for LeafletRouting {
    type Handle = Layer;

    fn create(&mut self, key: &OverlayKey) -> Result<Layer, OverlayError> {
        let router = osrm_v1(&to_js(&json!({
            "serviceUrl": self.service_url,
            "profile": key.mode.profile(),
        })))
        .map_err(|e| OverlayError::Create(describe(e)))?;

        let options = to_js(&routing_options(key));
        let set = |name: &str, value: &JsValue| {
            js_sys::Reflect::set(&options, &JsValue::from_str(name), value)
                .map_err(|e| OverlayError::Create(describe(e)))
        };
        set("router", &router)?;
        // The map already shows our own markers at both ends.
        set("createMarker", &js_sys::Function::new_no_args("return null;"))?;

        let control = routing_control(&options).map_err(|e| OverlayError::Create(describe(e)))?;
        Ok(control.add_to(&self.map))
    }

    fn destroy(&mut self, handle: Layer) -> Result<(), OverlayError> {
        self.map
            .remove_control(&handle)
            .map(|_| ())
            .map_err(|e| OverlayError::Destroy(describe(e)))
    }
}
