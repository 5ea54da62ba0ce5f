use smallvec::{SmallVec, smallvec};

use crate::config::IndicatorConfig;
use crate::progress::{RingGeometry, ScrollState};
use crate::semantics::{Role, Semantics};
use crate::{Color, Rect, Vec2};

/// Gap between the control and the bottom-right screen corner, in px.
pub const SCREEN_INSET: f32 = 24.0;

pub const LABEL: &str = "Scroll to top";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Glyph {
    ArrowUp,
}

/// Drawing commands in view-box units (origin top-left, `view_box` wide).
#[derive(Clone, Debug, PartialEq)]
pub enum SceneNode {
    /// Full stroked circle.
    Ring {
        center: Vec2,
        radius: f32,
        stroke: Color,
        stroke_width: f32,
    },
    /// Dashed circle; `rotate_deg` turns the dash start away from 3 o'clock.
    Arc {
        center: Vec2,
        radius: f32,
        stroke: Color,
        stroke_width: f32,
        dash_array: f32,
        dash_offset: f32,
        rotate_deg: f32,
    },
    Disc {
        center: Vec2,
        radius: f32,
        fill: Color,
    },
    Icon {
        glyph: Glyph,
        rect: Rect,
        color: Color,
    },
}

/// The mounted control for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct IndicatorView {
    /// Where the control sits on screen, in px. Also the hit area.
    pub bounds: Rect,
    pub view_box: f32,
    pub nodes: SmallVec<[SceneNode; 4]>,
    pub semantics: Semantics,
}

impl IndicatorView {
    pub fn arc(&self) -> Option<&SceneNode> {
        self.nodes
            .iter()
            .find(|n| matches!(n, SceneNode::Arc { .. }))
    }

    /// Maps a view-box point to screen px.
    pub fn to_screen(&self, p: Vec2) -> Vec2 {
        let scale = self.bounds.w / self.view_box;
        Vec2 {
            x: self.bounds.x + p.x * scale,
            y: self.bounds.y + p.y * scale,
        }
    }
}

/// Builds the control, or nothing at all while it is hidden.
///
/// `ring_color` is passed in rather than derived from `state` so callers can
/// animate between tier colors.
pub fn render(
    state: &ScrollState,
    ring_color: Color,
    config: &IndicatorConfig,
    screen: (f32, f32),
) -> Option<IndicatorView> {
    if !state.visible {
        return None;
    }

    let vb = config.view_box;
    let center = Vec2 {
        x: vb / 2.0,
        y: vb / 2.0,
    };
    let ring = RingGeometry {
        radius: config.radius,
        stroke_width: config.stroke_width,
    };
    let icon_side = vb / 2.0;
    let icon_rect = Rect {
        x: center.x - icon_side / 2.0,
        y: center.y - icon_side / 2.0,
        w: icon_side,
        h: icon_side,
    };

    let nodes = smallvec![
        SceneNode::Ring {
            center,
            radius: ring.radius,
            stroke: config.track_color,
            stroke_width: ring.stroke_width,
        },
        SceneNode::Arc {
            center,
            radius: ring.radius,
            stroke: ring_color,
            stroke_width: ring.stroke_width,
            dash_array: ring.circumference(),
            dash_offset: ring.dash_offset(state.progress_ratio),
            rotate_deg: -90.0,
        },
        SceneNode::Disc {
            center,
            radius: icon_side / 2.0,
            fill: Color::WHITE,
        },
        SceneNode::Icon {
            glyph: Glyph::ArrowUp,
            rect: icon_rect,
            color: Color::ICON,
        },
    ];

    Some(IndicatorView {
        bounds: Rect::bottom_right(screen.0, screen.1, config.size_px, SCREEN_INSET),
        view_box: vb,
        nodes,
        semantics: Semantics::new(Role::Button)
            .label(LABEL)
            .value(format!("{}%", state.progress_ratio.round() as u32))
            .focusable(true),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: (f32, f32) = (1280.0, 800.0);

    #[test]
    fn hidden_state_renders_nothing() {
        let state = ScrollState {
            progress_ratio: 80.0,
            visible: false,
        };
        assert!(render(&state, Color::RED, &IndicatorConfig::default(), SCREEN).is_none());
    }

    #[test]
    fn arc_offset_tracks_progress() {
        let cfg = IndicatorConfig::default();
        let state = ScrollState {
            progress_ratio: 25.0,
            visible: true,
        };
        let view = render(&state, Color::GREEN, &cfg, SCREEN).unwrap();
        let Some(SceneNode::Arc {
            dash_array,
            dash_offset,
            stroke,
            rotate_deg,
            ..
        }) = view.arc()
        else {
            panic!("no arc in {:?}", view.nodes);
        };
        assert!((dash_offset - dash_array * 0.75).abs() < 1e-3);
        assert_eq!(*stroke, Color::GREEN);
        assert_eq!(*rotate_deg, -90.0);
    }

    #[test]
    fn button_semantics_and_placement() {
        let cfg = IndicatorConfig::default();
        let state = ScrollState {
            progress_ratio: 49.6,
            visible: true,
        };
        let view = render(&state, Color::YELLOW, &cfg, SCREEN).unwrap();
        assert_eq!(view.semantics.role, Role::Button);
        assert_eq!(view.semantics.label.as_deref(), Some(LABEL));
        assert_eq!(view.semantics.value.as_deref(), Some("50%"));
        assert!(view.semantics.focusable);
        assert_eq!(view.bounds.w, 60.0);
        assert_eq!(view.bounds.x + view.bounds.w, SCREEN.0 - SCREEN_INSET);
        assert_eq!(
            view.to_screen(Vec2 { x: 50.0, y: 50.0 }),
            view.bounds.center()
        );
    }
}
