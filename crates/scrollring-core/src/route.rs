//! Scroll position reset on navigation.
//!
//! When the page location changes the viewport should not keep the previous
//! page's offset: a `#fragment` that names an element scrolls to it, anything
//! else glides back to the top on the next frame (after the new page laid
//! out).

use std::cell::RefCell;
use std::rc::Rc;

use crate::frame::{FrameCoalescer, FrameScheduler};
use crate::viewport::{ScrollBehavior, Viewport};

/// Path plus fragment of the current page. `hash` has no leading `#`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub hash: String,
}

impl Location {
    /// Splits `"/about#team"` into path and fragment. A query string stays on
    /// the path.
    pub fn parse(href: &str) -> Self {
        match href.split_once('#') {
            Some((path, hash)) => Self {
                path: path.to_string(),
                hash: hash.to_string(),
            },
            None => Self {
                path: href.to_string(),
                hash: String::new(),
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NavScroll {
    /// Same path and hash as last time; nothing to do.
    Unchanged,
    /// Scrolling to the element named by the fragment, at this offset.
    Anchor(f32),
    /// Scroll to top queued for the next frame.
    TopScheduled,
}

pub struct NavigationScrollReset {
    viewport: Rc<dyn Viewport>,
    coalescer: FrameCoalescer,
    last: RefCell<Option<Location>>,
}

impl NavigationScrollReset {
    pub fn new(viewport: Rc<dyn Viewport>, frames: Rc<dyn FrameScheduler>) -> Self {
        Self {
            viewport,
            coalescer: FrameCoalescer::new(frames),
            last: RefCell::new(None),
        }
    }

    pub fn on_location_change(&self, location: Location) -> NavScroll {
        if self.last.borrow().as_ref() == Some(&location) {
            return NavScroll::Unchanged;
        }

        let anchor = (!location.hash.is_empty())
            .then(|| self.viewport.anchor_offset(&location.hash))
            .flatten();
        log::debug!(
            "location {}#{} (anchor {:?})",
            location.path,
            location.hash,
            anchor
        );
        *self.last.borrow_mut() = Some(location);

        if let Some(offset) = anchor {
            self.coalescer.cancel();
            self.viewport.scroll_to(offset, ScrollBehavior::Smooth);
            return NavScroll::Anchor(offset);
        }

        let viewport = Rc::downgrade(&self.viewport);
        self.coalescer.schedule(move |_ts| {
            if let Some(vp) = viewport.upgrade() {
                vp.scroll_to(0.0, ScrollBehavior::Smooth);
            }
        });
        NavScroll::TopScheduled
    }

    /// In-page section links: `"home"` goes to the top, anything else to the
    /// anchor of that name. Returns false if the anchor does not exist.
    pub fn scroll_to_section(&self, section: &str) -> bool {
        if section == "home" {
            self.viewport.scroll_to(0.0, ScrollBehavior::Smooth);
            return true;
        }
        match self.viewport.anchor_offset(section) {
            Some(offset) => {
                self.viewport.scroll_to(offset, ScrollBehavior::Smooth);
                true
            }
            None => {
                log::warn!("no section `{section}` on this page");
                false
            }
        }
    }
}

impl Drop for NavigationScrollReset {
    fn drop(&mut self) {
        self.coalescer.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::ManualClock;
    use crate::frame::ManualFrames;
    use crate::sim::SimulatedViewport;

    fn setup() -> (Rc<SimulatedViewport>, Rc<ManualFrames>, NavigationScrollReset) {
        let clock = Rc::new(ManualClock::new());
        let vp = Rc::new(SimulatedViewport::new(800.0, 3000.0, clock));
        let frames = Rc::new(ManualFrames::new());
        let reset = NavigationScrollReset::new(vp.clone(), frames.clone());
        (vp, frames, reset)
    }

    #[test]
    fn parse_location() {
        assert_eq!(
            Location::parse("/about#team"),
            Location {
                path: "/about".into(),
                hash: "team".into()
            }
        );
        assert_eq!(Location::parse("/find-store?x=1").hash, "");
    }

    #[test]
    fn new_path_schedules_top_for_next_frame() {
        let (vp, frames, reset) = setup();
        vp.scroll_by(900.0);
        assert_eq!(
            reset.on_location_change(Location::parse("/products")),
            NavScroll::TopScheduled
        );
        assert!(!vp.is_smooth_scrolling());
        frames.run_frame(16.0);
        assert!(vp.is_smooth_scrolling());
    }

    #[test]
    fn repeated_location_is_ignored() {
        let (_vp, frames, reset) = setup();
        reset.on_location_change(Location::parse("/"));
        frames.run_frame(16.0);
        assert_eq!(
            reset.on_location_change(Location::parse("/")),
            NavScroll::Unchanged
        );
        assert_eq!(frames.pending(), 0);
    }

    #[test]
    fn known_fragment_scrolls_to_anchor() {
        let (vp, frames, reset) = setup();
        vp.set_anchor("news", 1200.0);
        assert_eq!(
            reset.on_location_change(Location::parse("/#news")),
            NavScroll::Anchor(1200.0)
        );
        assert!(vp.is_smooth_scrolling());
        assert_eq!(frames.pending(), 0);
    }

    #[test]
    fn unknown_fragment_falls_back_to_top() {
        let (_vp, _frames, reset) = setup();
        assert_eq!(
            reset.on_location_change(Location::parse("/#missing")),
            NavScroll::TopScheduled
        );
    }

    #[test]
    fn drop_cancels_pending_reset() {
        let (vp, frames, reset) = setup();
        vp.scroll_by(500.0);
        reset.on_location_change(Location::parse("/contact"));
        drop(reset);
        assert_eq!(frames.run_frame(16.0), 0);
        assert!(!vp.is_smooth_scrolling());
    }

    #[test]
    fn sections() {
        let (vp, _frames, reset) = setup();
        vp.set_anchor("about", 700.0);
        assert!(reset.scroll_to_section("about"));
        assert!(reset.scroll_to_section("home"));
        assert!(!reset.scroll_to_section("contact"));
    }
}
