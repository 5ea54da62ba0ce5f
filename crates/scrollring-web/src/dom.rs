use std::cell::RefCell;
use std::rc::Weak;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, KeyboardEvent};

use scrollring_core::view::LABEL;
use scrollring_core::{IndicatorConfig, Key, ScrollProgressIndicator, ScrollState, render};

use crate::svg::{SVG_NS, SvgElement, container_style, scene_to_svg};

/// Mirrors the indicator into the DOM. While hidden the control is removed
/// from the document entirely.
pub struct DomRenderer {
    document: Document,
    config: IndicatorConfig,
    mounted: RefCell<Option<Mounted>>,
}

struct Mounted {
    host: Element,
    shapes: Vec<Element>,
    _click: Closure<dyn Fn()>,
    _keydown: Closure<dyn Fn(KeyboardEvent)>,
}

impl DomRenderer {
    pub fn new(document: Document, config: IndicatorConfig) -> Self {
        Self {
            document,
            config,
            mounted: RefCell::new(None),
        }
    }

    pub fn sync(
        &self,
        state: &ScrollState,
        indicator: &Weak<ScrollProgressIndicator>,
    ) -> Result<(), JsValue> {
        // Color easing is left to the CSS transition on the arc.
        let color = state.color().resolve(&self.config.palette);
        // Placement comes from `container_style`; the scene bounds go unused here.
        let Some(view) = render(state, color, &self.config, (0.0, 0.0)) else {
            self.clear();
            return Ok(());
        };
        let elements = scene_to_svg(&view, self.config.color_transition_ms);

        let mut mounted = self.mounted.borrow_mut();
        if mounted.is_none() {
            *mounted = Some(self.build(&elements, indicator)?);
            log::debug!("indicator attached to document");
        }
        if let Some(m) = mounted.as_ref() {
            for (el, desc) in m.shapes.iter().zip(&elements) {
                for (name, value) in &desc.attrs {
                    el.set_attribute(name, value)?;
                }
            }
            if let Some(value) = &view.semantics.value {
                m.host.set_attribute("aria-valuetext", value)?;
            }
        }
        Ok(())
    }

    pub fn clear(&self) {
        if let Some(m) = self.mounted.borrow_mut().take() {
            m.host.remove();
            log::debug!("indicator detached from document");
        }
    }

    fn build(
        &self,
        elements: &[SvgElement],
        indicator: &Weak<ScrollProgressIndicator>,
    ) -> Result<Mounted, JsValue> {
        let host = self.document.create_element("div")?;
        host.set_attribute("role", "button")?;
        host.set_attribute("tabindex", "0")?;
        host.set_attribute("aria-label", LABEL)?;
        host.set_attribute("style", &container_style(&self.config))?;

        let svg = self.document.create_element_ns(Some(SVG_NS), "svg")?;
        let vb = self.config.view_box;
        svg.set_attribute("viewBox", &format!("0 0 {vb} {vb}"))?;
        svg.set_attribute("width", "100%")?;
        svg.set_attribute("height", "100%")?;
        host.append_child(&svg)?;

        let mut shapes = Vec::with_capacity(elements.len());
        for desc in elements {
            let el = self.document.create_element_ns(Some(SVG_NS), desc.tag)?;
            svg.append_child(&el)?;
            shapes.push(el);
        }

        let click = {
            let indicator = indicator.clone();
            Closure::<dyn Fn()>::new(move || {
                if let Some(ind) = indicator.upgrade() {
                    ind.activate();
                }
            })
        };
        host.add_event_listener_with_callback("click", click.as_ref().unchecked_ref())?;

        let keydown = {
            let indicator = indicator.clone();
            Closure::<dyn Fn(KeyboardEvent)>::new(move |ev: KeyboardEvent| {
                let key = Key::from_dom(&ev.key());
                if let Some(ind) = indicator.upgrade()
                    && ind.handle_key(&key)
                {
                    // Space would otherwise also scroll the page.
                    ev.prevent_default();
                }
            })
        };
        host.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())?;

        let body = self
            .document
            .body()
            .ok_or_else(|| JsValue::from_str("document has no body"))?;
        body.append_child(&host)?;

        Ok(Mounted {
            host,
            shapes,
            _click: click,
            _keydown: keydown,
        })
    }
}

impl Drop for DomRenderer {
    fn drop(&mut self) {
        self.clear();
    }
}
