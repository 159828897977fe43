use std::time::Duration;

use js_sys::Promise;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use warehouse_locator::error::Result;
use warehouse_locator::{LocatorError, Timer, Transport};

fn js_error(value: JsValue) -> LocatorError {
    LocatorError::Transport(format!("{value:?}"))
}

/// `window.fetch`, reading the body as text.
pub struct FetchTransport;

impl Transport for FetchTransport {
    async fn get_text(&self, url: &str) -> Result<String> {
        let window =
            web_sys::window().ok_or_else(|| LocatorError::Transport("no window".to_string()))?;

        let opts = RequestInit::new();
        opts.set_method("GET");
        opts.set_mode(RequestMode::Cors);

        let request = Request::new_with_str_and_init(url, &opts).map_err(js_error)?;
        let response_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_error)?;
        let response = response_value.dyn_into::<Response>().map_err(js_error)?;
        log::debug!("{url} answered {}", response.status());

        let text = JsFuture::from(response.text().map_err(js_error)?)
            .await
            .map_err(js_error)?;
        text.as_string()
            .ok_or_else(|| LocatorError::Transport(format!("{url} returned a non-text body")))
    }
}

/// `setTimeout` wrapped in a promise.
pub struct BrowserTimer;

impl Timer for BrowserTimer {
    async fn sleep(&self, duration: Duration) {
        let millis = i32::try_from(duration.as_millis()).unwrap_or(i32::MAX);
        let promise = Promise::new(&mut |resolve, _reject| {
            let scheduled = web_sys::window().map(|window| {
                window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis)
            });
            if !matches!(scheduled, Some(Ok(_))) {
                log::warn!("Could not schedule timer, resolving immediately");
                let _ = resolve.call0(&JsValue::NULL);
            }
        });
        if let Err(e) = JsFuture::from(promise).await {
            log::error!("Timer promise rejected: {e:?}");
        }
    }
}
