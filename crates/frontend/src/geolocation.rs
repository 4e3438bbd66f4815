use dronewatch_shared::error::GeolocationError;
use dronewatch_shared::models::LatLng;
use dronewatch_shared::route::GeolocationOptions;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

/// Ask the browser for the current position.
pub async fn current_position(options: GeolocationOptions) -> Result<LatLng, GeolocationError> {
    let navigator = web_sys::window()
        .ok_or(GeolocationError::Unsupported)?
        .navigator();
    if !js_sys::Reflect::has(&navigator, &JsValue::from_str("geolocation")).unwrap_or(false) {
        return Err(GeolocationError::Unsupported);
    }
    let geolocation = navigator
        .geolocation()
        .map_err(|_| GeolocationError::Unsupported)?;

    let position_options = web_sys::PositionOptions::new();
    position_options.set_enable_high_accuracy(options.high_accuracy);
    position_options.set_timeout(options.timeout_ms);
    position_options.set_maximum_age(options.max_cached_age_ms);

    // The promise's own resolve/reject double as the success/error callbacks.
    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        if let Err(e) = geolocation.get_current_position_with_error_callback_and_options(
            &resolve,
            Some(&reject),
            &position_options,
        ) {
            let _ = reject.call1(&JsValue::NULL, &e);
        }
    });

    match JsFuture::from(promise).await {
        Ok(value) => {
            let position: web_sys::GeolocationPosition =
                value.dyn_into().map_err(|_| GeolocationError::Unknown)?;
            let coords = position.coords();
            Ok(LatLng::new(coords.latitude(), coords.longitude()))
        }
        Err(err) => Err(err
            .dyn_into::<web_sys::GeolocationPositionError>()
            .map(|e| GeolocationError::from_code(e.code()))
            .unwrap_or(GeolocationError::Unknown)),
    }
}
