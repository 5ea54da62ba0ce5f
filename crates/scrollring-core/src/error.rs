use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("color `{0}` must have 6 or 8 hex digits")]
    Length(String),
    #[error("color `{0}` contains a non-hex digit")]
    Digit(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid indicator config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("`{field}` must be greater than zero (got {value})")]
    NotPositive { field: &'static str, value: f32 },
    #[error("`{field}` must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },
    #[error("stroke width {stroke} does not fit a ring of radius {radius} in a {view_box} view box")]
    RingOverflow {
        radius: f32,
        stroke: f32,
        view_box: f32,
    },
}
