use std::rc::Rc;

use wasm_bindgen::prelude::*;

use scrollring_core::signal::SubId;
use scrollring_core::{
    IndicatorConfig, Location, NavScroll, NavigationScrollReset, ScrollProgressIndicator,
    SystemClock,
};

use crate::dom::DomRenderer;
use crate::frames::WebFrames;
use crate::viewport::WebViewport;

fn init_logging() {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    // Already initialised by an earlier mount; keep that logger.
    let _ = console_log::init_with_level(log::Level::Info);
}

fn window() -> Result<web_sys::Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global `window`"))
}

/// A mounted indicator. Call `unmount()` (or let JS free it) to detach the
/// scroll listener and remove the control.
#[wasm_bindgen]
pub struct IndicatorMount {
    indicator: Option<Rc<ScrollProgressIndicator>>,
    renderer: Rc<DomRenderer>,
    sub: Option<SubId>,
}

#[wasm_bindgen]
impl IndicatorMount {
    #[wasm_bindgen(getter)]
    pub fn progress(&self) -> f32 {
        self.indicator
            .as_ref()
            .map(|i| i.state().progress_ratio)
            .unwrap_or(0.0)
    }

    #[wasm_bindgen(getter)]
    pub fn visible(&self) -> bool {
        self.indicator
            .as_ref()
            .is_some_and(|i| i.state().visible)
    }

    pub fn activate(&self) {
        if let Some(i) = &self.indicator {
            i.activate();
        }
    }

    pub fn unmount(&mut self) {
        if let Some(indicator) = self.indicator.take() {
            if let Some(sub) = self.sub.take() {
                indicator.unsubscribe(sub);
            }
            match Rc::try_unwrap(indicator) {
                Ok(indicator) => indicator.unmount(),
                // Still borrowed by an in-flight DOM callback; its drop releases.
                Err(_) => log::debug!("indicator unmount deferred to last reference"),
            }
        }
        self.renderer.clear();
    }
}

impl Drop for IndicatorMount {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Mounts the back-to-top indicator on the current page.
///
/// `config_json` is an optional JSON object with any `IndicatorConfig` fields.
#[wasm_bindgen]
pub fn mount_indicator(config_json: Option<String>) -> Result<IndicatorMount, JsValue> {
    init_logging();

    let config = match config_json.as_deref() {
        Some(json) => IndicatorConfig::from_json(json),
        None => Ok(IndicatorConfig::default()),
    }
    .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let window = window()?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))?;

    let viewport = Rc::new(WebViewport::new(window.clone()));
    let frames = Rc::new(WebFrames::new(window));
    let renderer = Rc::new(DomRenderer::new(document, config.clone()));

    let indicator = Rc::new(ScrollProgressIndicator::mount(
        viewport,
        frames,
        Rc::new(SystemClock),
        config,
    ));

    let sub = {
        let renderer = renderer.clone();
        let weak = Rc::downgrade(&indicator);
        indicator.subscribe(move |state| {
            if let Err(e) = renderer.sync(state, &weak) {
                log::warn!("indicator render failed: {e:?}");
            }
        })
    };

    Ok(IndicatorMount {
        indicator: Some(indicator),
        renderer,
        sub: Some(sub),
    })
}

/// Scroll reset for client-side navigation. Call `on_location_change` from the
/// router after each page change.
#[wasm_bindgen]
pub struct RouteScroll {
    inner: NavigationScrollReset,
}

#[wasm_bindgen]
impl RouteScroll {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<RouteScroll, JsValue> {
        init_logging();
        let window = window()?;
        Ok(Self {
            inner: NavigationScrollReset::new(
                Rc::new(WebViewport::new(window.clone())),
                Rc::new(WebFrames::new(window)),
            ),
        })
    }

    /// `href` is path plus optional `#fragment`. Returns false if the
    /// location did not change.
    pub fn on_location_change(&self, href: &str) -> bool {
        self.inner.on_location_change(Location::parse(href)) != NavScroll::Unchanged
    }

    pub fn scroll_to_section(&self, section: &str) -> bool {
        self.inner.scroll_to_section(section)
    }
}
