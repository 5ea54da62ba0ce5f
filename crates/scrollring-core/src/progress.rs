use std::f32::consts::PI;

use crate::Color;
use crate::config::Palette;

/// Offset past which the indicator appears, in px.
pub const DEFAULT_VISIBILITY_THRESHOLD: f32 = 100.0;

/// One observation of the viewport. `scrollable_height` is document height
/// minus viewport height and may be zero or negative before layout settles.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollSample {
    pub scroll_top: f32,
    pub scrollable_height: f32,
}

impl ScrollSample {
    pub fn new(scroll_top: f32, scrollable_height: f32) -> Self {
        Self {
            scroll_top,
            scrollable_height,
        }
    }

    pub fn evaluate(&self, visibility_threshold: f32) -> ScrollState {
        ScrollState {
            progress_ratio: progress_ratio(self.scroll_top, self.scrollable_height),
            visible: self.scroll_top > visibility_threshold,
        }
    }
}

/// What the indicator shows. Only the sampling handler writes it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollState {
    /// Percentage of the scrollable distance covered, always in `[0, 100]`.
    pub progress_ratio: f32,
    pub visible: bool,
}

impl ScrollState {
    pub fn color(&self) -> ProgressColor {
        color_for_progress(self.progress_ratio)
    }
}

/// Maps a sample to indicator state using the default threshold.
pub fn on_scroll_sample(scroll_top: f32, scrollable_height: f32) -> ScrollState {
    ScrollSample::new(scroll_top, scrollable_height).evaluate(DEFAULT_VISIBILITY_THRESHOLD)
}

fn progress_ratio(scroll_top: f32, scrollable_height: f32) -> f32 {
    if scrollable_height.is_nan() || scrollable_height <= 0.0 {
        return 0.0;
    }
    // Multiplying first keeps whole-pixel inputs exact.
    let ratio = scroll_top * 100.0 / scrollable_height;
    if ratio.is_nan() {
        0.0
    } else {
        ratio.clamp(0.0, 100.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProgressColor {
    Green,
    Yellow,
    Red,
}

impl ProgressColor {
    pub fn resolve(self, palette: &Palette) -> Color {
        match self {
            ProgressColor::Green => palette.low,
            ProgressColor::Yellow => palette.mid,
            ProgressColor::Red => palette.high,
        }
    }
}

/// `<= 33` green, `<= 66` yellow, red above. NaN falls into green.
pub fn color_for_progress(progress_ratio: f32) -> ProgressColor {
    if progress_ratio > 66.0 {
        ProgressColor::Red
    } else if progress_ratio > 33.0 {
        ProgressColor::Yellow
    } else {
        ProgressColor::Green
    }
}

/// Stroke geometry of the progress ring.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingGeometry {
    pub radius: f32,
    pub stroke_width: f32,
}

impl RingGeometry {
    pub fn circumference(&self) -> f32 {
        2.0 * PI * self.radius
    }

    /// Dash offset that leaves `progress_ratio` percent of the ring stroked.
    pub fn dash_offset(&self, progress_ratio: f32) -> f32 {
        let c = self.circumference();
        c - (progress_ratio.clamp(0.0, 100.0) / 100.0) * c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_stays_in_range() {
        for top in [0.0, 1.0, 499.5, 1000.0, 1500.0, 1e9] {
            for height in [1.0, 10.0, 1000.0, 1e6] {
                let s = on_scroll_sample(top, height);
                assert!((0.0..=100.0).contains(&s.progress_ratio), "{top}/{height}");
            }
        }
    }

    #[test]
    fn no_scrollable_height_means_no_progress() {
        for height in [0.0, -1.0, -500.0, f32::NAN] {
            assert_eq!(on_scroll_sample(400.0, height).progress_ratio, 0.0);
        }
    }

    #[test]
    fn visibility_threshold_is_exclusive() {
        assert!(!on_scroll_sample(0.0, 1000.0).visible);
        assert!(!on_scroll_sample(100.0, 1000.0).visible);
        assert!(on_scroll_sample(100.5, 1000.0).visible);
        assert!(on_scroll_sample(101.0, 0.0).visible);
        assert!(!ScrollSample::new(200.0, 1000.0).evaluate(250.0).visible);
    }

    #[test]
    fn color_tiers() {
        use ProgressColor::*;
        let expect = [
            (0.0, Green),
            (33.0, Green),
            (34.0, Yellow),
            (66.0, Yellow),
            (67.0, Red),
            (100.0, Red),
        ];
        for (ratio, color) in expect {
            assert_eq!(color_for_progress(ratio), color, "{ratio}");
        }
        assert_eq!(color_for_progress(33.5), Yellow);
        assert_eq!(color_for_progress(f32::NAN), Green);
    }

    #[test]
    fn tiers_resolve_through_palette() {
        let palette = Palette::default();
        assert_eq!(ProgressColor::Green.resolve(&palette), Color::GREEN);
        assert_eq!(ProgressColor::Yellow.resolve(&palette), Color::YELLOW);
        assert_eq!(ProgressColor::Red.resolve(&palette), Color::RED);
    }

    #[test]
    fn ring_dash_offset() {
        let ring = RingGeometry {
            radius: 40.0,
            stroke_width: 8.0,
        };
        let c = ring.circumference();
        assert!((c - 251.327_41).abs() < 1e-3);
        assert_eq!(ring.dash_offset(0.0), c);
        assert!(ring.dash_offset(100.0).abs() < 1e-4);
        assert!((ring.dash_offset(50.0) - c / 2.0).abs() < 1e-4);
        assert_eq!(ring.dash_offset(150.0), ring.dash_offset(100.0));
    }
}
