//! # Scroll progress indicator
//!
//! A round "back to top" control that appears once the page has scrolled past
//! a threshold and fills a colored ring as the reader approaches the bottom.
//!
//! Lifecycle:
//!
//! - [`ScrollProgressIndicator::mount`] subscribes to the viewport's scroll
//!   notifications and schedules a first sample.
//! - Every notification goes through a [`FrameCoalescer`]: the pending frame
//!   request is cancelled and replaced, so the state is recomputed at most once
//!   per display frame no matter how fast the host fires scroll events.
//! - [`ScrollProgressIndicator::unmount`], or simply dropping the indicator,
//!   removes the listener and cancels any pending frame, even when the
//!   indicator holds the last reference to the viewport.
//!
//! ```rust
//! use std::rc::Rc;
//! use scrollring_core::*;
//!
//! let clock = Rc::new(ManualClock::new());
//! let viewport = Rc::new(SimulatedViewport::new(800.0, 1800.0, clock.clone()));
//! let frames = Rc::new(ManualFrames::new());
//! let indicator = ScrollProgressIndicator::mount(
//!     viewport.clone(),
//!     frames.clone(),
//!     clock,
//!     IndicatorConfig::default(),
//! );
//!
//! viewport.scroll_by(500.0);
//! frames.run_frame(16.0);
//! assert!(indicator.state().visible);
//! assert_eq!(indicator.state().progress_ratio, 50.0);
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use web_time::Duration;

use crate::animation::{AnimatedValue, AnimationSpec, Clock, Easing};
use crate::config::IndicatorConfig;
use crate::frame::{FrameCoalescer, FrameScheduler};
use crate::input::Key;
use crate::lifecycle::Scope;
use crate::progress::{ProgressColor, ScrollState};
use crate::signal::{Signal, SubId, signal};
use crate::view::{IndicatorView, render};
use crate::viewport::{ScrollBehavior, Viewport, sample};
use crate::{Color, Vec2};

pub struct ScrollProgressIndicator {
    viewport: Rc<dyn Viewport>,
    config: IndicatorConfig,
    state: Signal<ScrollState>,
    ring_color: Rc<RefCell<AnimatedValue<Color>>>,
    coalescer: FrameCoalescer,
    clock: Rc<dyn Clock>,
    scope: Scope,
}

impl ScrollProgressIndicator {
    pub fn mount(
        viewport: Rc<dyn Viewport>,
        frames: Rc<dyn FrameScheduler>,
        clock: Rc<dyn Clock>,
        config: IndicatorConfig,
    ) -> Self {
        let state = signal(ScrollState::default());
        let coalescer = FrameCoalescer::new(frames);
        let scope = Scope::new();

        let ring_color = Rc::new(RefCell::new(AnimatedValue::new(
            ProgressColor::Green.resolve(&config.palette),
            AnimationSpec::tween(
                Duration::from_millis(config.color_transition_ms),
                Easing::EaseOut,
            ),
        )));
        {
            let ring_color = ring_color.clone();
            let clock = clock.clone();
            let palette = config.palette;
            state.subscribe(move |s: &ScrollState| {
                ring_color
                    .borrow_mut()
                    .set_target(s.color().resolve(&palette), clock.now());
            });
        }

        let recompute = recompute_fn(
            Rc::downgrade(&viewport),
            state.clone(),
            config.visibility_threshold,
        );

        let listener_id = {
            let coalescer = coalescer.clone();
            let recompute = recompute.clone();
            viewport.add_scroll_listener(Rc::new(move || {
                let recompute = recompute.clone();
                coalescer.schedule(move |_ts| recompute());
            }))
        };

        {
            let viewport = Rc::downgrade(&viewport);
            let coalescer = coalescer.clone();
            scope.add_disposer(move || {
                coalescer.cancel();
                if let Some(vp) = viewport.upgrade() {
                    vp.remove_scroll_listener(listener_id);
                }
                log::debug!("scroll indicator unmounted");
            });
        }

        // Initial sample, so a page restored mid-scroll shows up without a scroll event.
        coalescer.schedule(move |_ts| recompute());
        log::debug!(
            "scroll indicator mounted (threshold {}px)",
            config.visibility_threshold
        );

        Self {
            viewport,
            config,
            state,
            ring_color,
            coalescer,
            clock,
            scope,
        }
    }

    pub fn state(&self) -> ScrollState {
        self.state.get()
    }

    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    /// Notifies `f` after every recomputation.
    pub fn subscribe(&self, f: impl Fn(&ScrollState) + 'static) -> SubId {
        self.state.subscribe(f)
    }

    pub fn unsubscribe(&self, id: SubId) -> bool {
        self.state.unsubscribe(id)
    }

    /// Asks the viewport to glide back to the top. State follows through the
    /// scroll notifications that produces.
    pub fn activate(&self) {
        log::debug!("scroll to top from {:.0}px", self.viewport.scroll_top());
        self.viewport.scroll_to(0.0, ScrollBehavior::Smooth);
    }

    /// `Enter`/`Space` on the focused control. Returns true if handled.
    pub fn handle_key(&self, key: &Key) -> bool {
        if !self.state.get().visible || !key.is_activation_key() {
            return false;
        }
        self.activate();
        true
    }

    /// Pointer press at `point` (screen px). Returns true if it hit the control.
    pub fn handle_click(&self, point: Vec2, screen: (f32, f32)) -> bool {
        let hit = self
            .view(screen)
            .is_some_and(|view| view.bounds.contains(point));
        if hit {
            self.activate();
        }
        hit
    }

    /// Ring color for this frame; eases toward the current tier's color.
    pub fn ring_color(&self) -> Color {
        let mut anim = self.ring_color.borrow_mut();
        anim.update(self.clock.now());
        *anim.get()
    }

    /// The control as it should be drawn now, `None` while hidden.
    pub fn view(&self, screen: (f32, f32)) -> Option<IndicatorView> {
        let state = self.state.get();
        if !state.visible {
            return None;
        }
        render(&state, self.ring_color(), &self.config, screen)
    }

    /// Recomputations that actually ran since mount.
    pub fn recomputations(&self) -> u64 {
        self.coalescer.runs()
    }

    pub fn has_pending_frame(&self) -> bool {
        self.coalescer.is_pending()
    }

    pub fn unmount(self) {
        self.scope.dispose();
    }
}

// Fields drop in declaration order, so the viewport may already be gone by
// the time `scope` would dispose itself.
impl Drop for ScrollProgressIndicator {
    fn drop(&mut self) {
        self.scope.dispose();
    }
}

fn recompute_fn(
    viewport: Weak<dyn Viewport>,
    state: Signal<ScrollState>,
    threshold: f32,
) -> Rc<dyn Fn()> {
    Rc::new(move || {
        let Some(vp) = viewport.upgrade() else {
            return;
        };
        let sample = sample(vp.as_ref());
        let next = sample.evaluate(threshold);
        log::trace!(
            "scroll sample top={} scrollable={} -> {:.1}% visible={}",
            sample.scroll_top,
            sample.scrollable_height,
            next.progress_ratio,
            next.visible
        );
        state.set(next);
    })
}
