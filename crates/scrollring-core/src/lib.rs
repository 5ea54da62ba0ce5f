//! # scrollring
//!
//! A "back to top" control with a scroll progress ring, built as a small
//! single-threaded reactive component.
//!
//! The pieces, leaf first:
//!
//! - [`Viewport`]: the host's scrollable area: offsets, heights, scrolling,
//!   and scroll notifications.
//! - [`FrameScheduler`]: the host's display frames
//!   (`requestAnimationFrame`-shaped), and [`FrameCoalescer`] on top of it.
//! - [`ScrollProgressIndicator`]: samples the viewport at most once per
//!   frame, publishes a [`ScrollState`] through a [`Signal`], and renders an
//!   [`IndicatorView`] while visible.
//!
//! ## State
//!
//! [`on_scroll_sample`] is the whole model: a pure function from
//! `(scroll_top, scrollable_height)` to `{ progress_ratio, visible }`.
//!
//! ```rust
//! use scrollring_core::*;
//!
//! let s = on_scroll_sample(500.0, 1000.0);
//! assert!(s.visible);
//! assert_eq!(s.progress_ratio, 50.0);
//! assert_eq!(color_for_progress(s.progress_ratio), ProgressColor::Yellow);
//!
//! // Before layout the document may not be scrollable at all.
//! assert_eq!(on_scroll_sample(300.0, 0.0).progress_ratio, 0.0);
//! ```
//!
//! ## Hosts
//!
//! Native code and tests use [`SimulatedViewport`], [`ManualFrames`] and
//! [`ManualClock`]; the `scrollring-web` crate provides the browser versions.

pub mod animation;
pub mod color;
pub mod config;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod indicator;
pub mod input;
pub mod lifecycle;
pub mod progress;
pub mod route;
pub mod semantics;
pub mod signal;
pub mod sim;
pub mod view;
pub mod viewport;

pub use animation::{Clock, ManualClock, SystemClock};
pub use color::Color;
pub use config::{IndicatorConfig, Palette};
pub use error::{ColorError, ConfigError};
pub use frame::{FrameCoalescer, FrameHandle, FrameScheduler, ManualFrames};
pub use geometry::{Rect, Vec2};
pub use indicator::ScrollProgressIndicator;
pub use input::Key;
pub use lifecycle::Scope;
pub use progress::{
    ProgressColor, RingGeometry, ScrollSample, ScrollState, color_for_progress, on_scroll_sample,
};
pub use route::{Location, NavScroll, NavigationScrollReset};
pub use semantics::{Role, Semantics};
pub use signal::{Signal, signal};
pub use sim::SimulatedViewport;
pub use view::{IndicatorView, SceneNode, render};
pub use viewport::{ListenerId, ScrollBehavior, Viewport};
