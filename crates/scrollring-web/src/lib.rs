//! Browser host for scrollring (wasm32).
//!
//! - `WebViewport`: `window` scroll offset, heights, `scrollTo`, and passive
//!   scroll listeners.
//! - `WebFrames`: `requestAnimationFrame` / `cancelAnimationFrame`.
//! - `DomRenderer`: an SVG control appended to `<body>` while visible and
//!   removed while hidden.
//!
//! From JavaScript:
//!
//! ```js
//! import init, { mount_indicator, RouteScroll } from "./scrollring_web.js";
//! await init();
//! const indicator = mount_indicator(JSON.stringify({ visibility_threshold: 100 }));
//! const routes = new RouteScroll();
//! routes.on_location_change(location.pathname + location.hash);
//! ```
//!
//! Only [`svg`] builds on other targets.

pub mod svg;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod frames;
#[cfg(target_arch = "wasm32")]
mod viewport;

#[cfg(target_arch = "wasm32")]
pub use app::{IndicatorMount, RouteScroll, mount_indicator};
#[cfg(target_arch = "wasm32")]
pub use dom::DomRenderer;
#[cfg(target_arch = "wasm32")]
pub use frames::WebFrames;
#[cfg(target_arch = "wasm32")]
pub use viewport::WebViewport;
