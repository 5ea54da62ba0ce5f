//! `IndicatorView` to SVG element descriptions.
//!
//! Kept free of `web-sys` so the markup can be checked on any target; the DOM
//! renderer only creates the elements and copies the attributes across.

use scrollring_core::view::{Glyph, SCREEN_INSET};
use scrollring_core::{IndicatorConfig, IndicatorView, Rect, SceneNode};

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

#[derive(Clone, Debug, PartialEq)]
pub struct SvgElement {
    pub tag: &'static str,
    pub attrs: Vec<(&'static str, String)>,
}

impl SvgElement {
    fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
        }
    }

    fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Shortest decimal form, e.g. `50`, `251.327`.
pub fn fmt_num(v: f32) -> String {
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

/// One element per scene node, in paint order. The element list has the same
/// shape for every visible frame, so a renderer can patch attributes in place.
pub fn scene_to_svg(view: &IndicatorView, color_transition_ms: u64) -> Vec<SvgElement> {
    view.nodes
        .iter()
        .map(|node| match node {
            SceneNode::Ring {
                center,
                radius,
                stroke,
                stroke_width,
            } => SvgElement::new("circle")
                .attr("cx", fmt_num(center.x))
                .attr("cy", fmt_num(center.y))
                .attr("r", fmt_num(*radius))
                .attr("fill", "none")
                .attr("stroke", stroke.to_css())
                .attr("stroke-width", fmt_num(*stroke_width)),
            SceneNode::Arc {
                center,
                radius,
                stroke,
                stroke_width,
                dash_array,
                dash_offset,
                rotate_deg,
            } => SvgElement::new("circle")
                .attr("cx", fmt_num(center.x))
                .attr("cy", fmt_num(center.y))
                .attr("r", fmt_num(*radius))
                .attr("fill", "none")
                .attr("stroke", stroke.to_css())
                .attr("stroke-width", fmt_num(*stroke_width))
                .attr("stroke-linecap", "round")
                .attr("stroke-dasharray", fmt_num(*dash_array))
                .attr("stroke-dashoffset", fmt_num(*dash_offset))
                .attr(
                    "transform",
                    format!(
                        "rotate({} {} {})",
                        fmt_num(*rotate_deg),
                        fmt_num(center.x),
                        fmt_num(center.y)
                    ),
                )
                .attr(
                    "style",
                    format!(
                        "transition: stroke-dashoffset 0.1s ease-out, stroke {color_transition_ms}ms ease"
                    ),
                ),
            SceneNode::Disc {
                center,
                radius,
                fill,
            } => SvgElement::new("circle")
                .attr("cx", fmt_num(center.x))
                .attr("cy", fmt_num(center.y))
                .attr("r", fmt_num(*radius))
                .attr("fill", fill.to_css()),
            SceneNode::Icon { glyph, rect, color } => SvgElement::new("path")
                .attr("d", glyph_path(*glyph, *rect))
                .attr("fill", "none")
                .attr("stroke", color.to_css())
                .attr("stroke-width", fmt_num(rect.w / 10.0))
                .attr("stroke-linecap", "round")
                .attr("stroke-linejoin", "round"),
        })
        .collect()
}

fn glyph_path(glyph: Glyph, rect: Rect) -> String {
    match glyph {
        Glyph::ArrowUp => {
            let cx = rect.x + rect.w / 2.0;
            let top = rect.y + rect.h * 0.22;
            let bottom = rect.y + rect.h * 0.78;
            let wing = rect.w * 0.24;
            format!(
                "M{cx} {bottom} L{cx} {top} M{l} {wy} L{cx} {top} L{r} {wy}",
                cx = fmt_num(cx),
                bottom = fmt_num(bottom),
                top = fmt_num(top),
                l = fmt_num(cx - wing),
                r = fmt_num(cx + wing),
                wy = fmt_num(top + wing),
            )
        }
    }
}

/// Inline style for the fixed-position host element.
pub fn container_style(config: &IndicatorConfig) -> String {
    format!(
        "position: fixed; right: {inset}px; bottom: {inset}px; width: {size}px; height: {size}px; \
         z-index: 50; cursor: pointer;",
        inset = fmt_num(SCREEN_INSET),
        size = fmt_num(config.size_px),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrollring_core::{Color, ScrollState, render};

    fn view(progress_ratio: f32) -> IndicatorView {
        let state = ScrollState {
            progress_ratio,
            visible: true,
        };
        render(
            &state,
            Color::YELLOW,
            &IndicatorConfig::default(),
            (1280.0, 800.0),
        )
        .unwrap()
    }

    #[test]
    fn numbers_are_trimmed() {
        assert_eq!(fmt_num(50.0), "50");
        assert_eq!(fmt_num(251.32741), "251.327");
        assert_eq!(fmt_num(-90.0), "-90");
        assert_eq!(fmt_num(-0.0001), "0");
    }

    #[test]
    fn element_shape_is_stable() {
        let tags = |v: &IndicatorView| {
            scene_to_svg(v, 300)
                .into_iter()
                .map(|e| e.tag)
                .collect::<Vec<_>>()
        };
        assert_eq!(tags(&view(10.0)), vec!["circle", "circle", "circle", "path"]);
        assert_eq!(tags(&view(10.0)), tags(&view(90.0)));
    }

    #[test]
    fn arc_markup() {
        let els = scene_to_svg(&view(50.0), 300);
        let arc = &els[1];
        assert_eq!(arc.get("stroke"), Some("#eab308"));
        assert_eq!(arc.get("stroke-dasharray"), Some("251.327"));
        assert_eq!(arc.get("stroke-dashoffset"), Some("125.664"));
        assert_eq!(arc.get("transform"), Some("rotate(-90 50 50)"));
        assert!(arc.get("style").unwrap().contains("stroke 300ms"));

        assert_eq!(els[0].get("stroke"), Some("#e5e7eb"));
    }

    #[test]
    fn arrow_points_up_from_center() {
        let els = scene_to_svg(&view(0.0), 300);
        assert_eq!(els[3].get("d"), Some("M50 64 L50 36 M38 48 L50 36 L62 48"));
    }

    #[test]
    fn container_is_fixed_bottom_right() {
        let style = container_style(&IndicatorConfig::default());
        assert!(style.contains("right: 24px; bottom: 24px"));
        assert!(style.contains("width: 60px"));
    }
}
