//! # Viewport
//!
//! The indicator never reads window globals. Everything it needs from the host
//! (current offset, heights, a way to scroll, and scroll notifications) goes
//! through the [`Viewport`] trait. The browser host implements it over
//! `window`/`document`; [`SimulatedViewport`](crate::sim::SimulatedViewport)
//! implements it in memory.

use std::rc::Rc;

use slotmap::new_key_type;

use crate::progress::ScrollSample;

new_key_type! {
    pub struct ListenerId;
}

pub type ScrollListener = Rc<dyn Fn()>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollBehavior {
    Instant,
    Smooth,
}

pub trait Viewport {
    /// Current vertical offset in px.
    fn scroll_top(&self) -> f32;
    fn viewport_height(&self) -> f32;
    /// Full height of the scrolled document in px.
    fn document_height(&self) -> f32;

    fn scroll_to(&self, top: f32, behavior: ScrollBehavior);

    /// Registers `listener` for scroll notifications. Notifications may arrive
    /// far more often than frames are drawn.
    fn add_scroll_listener(&self, listener: ScrollListener) -> ListenerId;
    /// Removing an unknown id does nothing.
    fn remove_scroll_listener(&self, id: ListenerId);

    /// Document offset of the element named `id`, if the host knows it.
    fn anchor_offset(&self, _id: &str) -> Option<f32> {
        None
    }
}

/// Reads one [`ScrollSample`] from `viewport`.
pub fn sample(viewport: &dyn Viewport) -> ScrollSample {
    ScrollSample {
        scroll_top: viewport.scroll_top(),
        scrollable_height: viewport.document_height() - viewport.viewport_height(),
    }
}
