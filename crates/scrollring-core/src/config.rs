use serde::Deserialize;

use crate::Color;
use crate::error::ConfigError;

/// Colors for the three progress tiers.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub low: Color,
    pub mid: Color,
    pub high: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            low: Color::GREEN,
            mid: Color::YELLOW,
            high: Color::RED,
        }
    }
}

/// Indicator tuning. Every field has a default, so `{}` is a valid config.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    /// Scroll offset (px) the page must pass before the indicator shows.
    pub visibility_threshold: f32,
    /// Ring radius in view-box units.
    pub radius: f32,
    pub stroke_width: f32,
    /// Side of the square view box the ring is drawn in.
    pub view_box: f32,
    /// On-screen size of the control in CSS px.
    pub size_px: f32,
    pub track_color: Color,
    pub palette: Palette,
    pub color_transition_ms: u64,
    pub smooth_scroll_ms: u64,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            visibility_threshold: 100.0,
            radius: 40.0,
            stroke_width: 8.0,
            view_box: 100.0,
            size_px: 60.0,
            track_color: Color::TRACK,
            palette: Palette::default(),
            color_transition_ms: 300,
            smooth_scroll_ms: 400,
        }
    }
}

impl IndicatorConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: IndicatorConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("radius", self.radius),
            ("stroke_width", self.stroke_width),
            ("view_box", self.view_box),
            ("size_px", self.size_px),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        if !(self.visibility_threshold >= 0.0) {
            return Err(ConfigError::Negative {
                field: "visibility_threshold",
                value: self.visibility_threshold,
            });
        }
        if self.radius + self.stroke_width / 2.0 > self.view_box / 2.0 {
            return Err(ConfigError::RingOverflow {
                radius: self.radius,
                stroke: self.stroke_width,
                view_box: self.view_box,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default() {
        let cfg = IndicatorConfig::from_json("{}").unwrap();
        assert_eq!(cfg, IndicatorConfig::default());
    }

    #[test]
    fn partial_override() {
        let cfg = IndicatorConfig::from_json(
            r##"{ "visibility_threshold": 250, "palette": { "low": "#800080" } }"##,
        )
        .unwrap();
        assert_eq!(cfg.visibility_threshold, 250.0);
        assert_eq!(cfg.palette.low, Color::from_rgb(0x80, 0x00, 0x80));
        assert_eq!(cfg.palette.high, Color::RED);
    }

    #[test]
    fn bad_color_is_a_parse_error() {
        let err = IndicatorConfig::from_json(r#"{ "track_color": "gray" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn rejects_degenerate_geometry() {
        let err = IndicatorConfig::from_json(r#"{ "radius": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NotPositive {
                field: "radius",
                ..
            }
        ));

        let err = IndicatorConfig::from_json(r#"{ "radius": 48, "stroke_width": 8 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::RingOverflow { .. }));

        let err = IndicatorConfig::from_json(r#"{ "visibility_threshold": -1 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Negative { .. }));
    }
}
