//! Tweens for smooth scrolling and ring color transitions.
//!
//! Time is always read through a [`Clock`] handed in by the caller, so hosts
//! use [`SystemClock`] and tests drive a [`ManualClock`] frame by frame.

use std::cell::Cell;
use std::rc::Rc;

use web_time::{Duration, Instant};

use crate::Color;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
    Linear,
    EaseOut,
    EaseInOut,
}

impl Easing {
    pub fn interpolate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationSpec {
    pub duration: Duration,
    pub easing: Easing,
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(300),
            easing: Easing::EaseInOut,
        }
    }
}

impl AnimationSpec {
    pub fn tween(duration: Duration, easing: Easing) -> Self {
        Self { duration, easing }
    }
}

pub trait Interpolate {
    fn interpolate(&self, other: &Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Interpolate for Color {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Color(
            lerp(self.0, other.0),
            lerp(self.1, other.1),
            lerp(self.2, other.2),
            lerp(self.3, other.3),
        )
    }
}

pub trait Clock {
    fn now(&self) -> Instant;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Clone)]
pub struct ManualClock {
    t: Rc<Cell<Instant>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            t: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.t.set(self.t.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.t.get()
    }
}

/// Value that eases from where it is toward a target.
pub struct AnimatedValue<T: Interpolate + Clone> {
    current: T,
    target: T,
    start: T,
    spec: AnimationSpec,
    start_time: Option<Instant>,
}

impl<T: Interpolate + Clone + PartialEq> AnimatedValue<T> {
    pub fn new(initial: T, spec: AnimationSpec) -> Self {
        Self {
            current: initial.clone(),
            target: initial.clone(),
            start: initial,
            spec,
            start_time: None,
        }
    }

    /// Retargets from the current value. Setting the same target again is a no-op.
    pub fn set_target(&mut self, target: T, now: Instant) {
        if target == self.target {
            return;
        }
        self.start = self.current.clone();
        self.target = target;
        self.start_time = Some(now);
    }

    /// Advances to `now`; returns true while still animating.
    pub fn update(&mut self, now: Instant) -> bool {
        let Some(start) = self.start_time else {
            return false;
        };
        let elapsed = now.saturating_duration_since(start);
        if elapsed >= self.spec.duration {
            self.current = self.target.clone();
            self.start_time = None;
            return false;
        }
        let t = elapsed.as_secs_f32() / self.spec.duration.as_secs_f32();
        let eased = self.spec.easing.interpolate(t);
        self.current = self.start.interpolate(&self.target, eased);
        true
    }

    pub fn get(&self) -> &T {
        &self.current
    }

    pub fn is_animating(&self) -> bool {
        self.start_time.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tween_is_deterministic_under_manual_clock() {
        let clock = ManualClock::new();
        let mut a = AnimatedValue::new(
            0.0f32,
            AnimationSpec::tween(Duration::from_millis(1000), Easing::Linear),
        );
        a.set_target(10.0, clock.now());

        clock.advance(Duration::from_millis(250));
        assert!(a.update(clock.now()));
        assert!((*a.get() - 2.5).abs() < 0.01);

        clock.advance(Duration::from_millis(750));
        assert!(!a.update(clock.now()));
        assert_eq!(*a.get(), 10.0);
        assert!(!a.is_animating());
    }

    #[test]
    fn retarget_starts_from_current_value() {
        let clock = ManualClock::new();
        let spec = AnimationSpec::tween(Duration::from_millis(100), Easing::Linear);
        let mut a = AnimatedValue::new(Color::GREEN, spec);
        a.set_target(Color::RED, clock.now());
        clock.advance(Duration::from_millis(50));
        a.update(clock.now());
        let midway = *a.get();
        assert_ne!(midway, Color::GREEN);

        a.set_target(Color::YELLOW, clock.now());
        a.update(clock.now());
        assert_eq!(*a.get(), midway);

        clock.advance(Duration::from_millis(100));
        a.update(clock.now());
        assert_eq!(*a.get(), Color::YELLOW);
    }

    #[test]
    fn easing_endpoints() {
        for e in [Easing::Linear, Easing::EaseOut, Easing::EaseInOut] {
            assert_eq!(e.interpolate(0.0), 0.0);
            assert!((e.interpolate(1.0) - 1.0).abs() < 1e-6);
        }
    }
}
