use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::ToastConfig;

pub const DEFAULT_DISPLAY_DURATION: Duration = Duration::from_secs(2);
pub const DEFAULT_WIDTH: u32 = 300;
pub const DEFAULT_HEIGHT: u32 = 150;
pub const DEFAULT_TEMPLATE_NAME: &str = "notificationTemplate";

/// Screen corner a notification appears in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlowDirection {
    #[default]
    RightBottom,
    LeftBottom,
    LeftUp,
    RightUp,
}

impl FlowDirection {
    pub const ALL: [FlowDirection; 4] = [
        FlowDirection::RightBottom,
        FlowDirection::LeftBottom,
        FlowDirection::LeftUp,
        FlowDirection::RightUp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FlowDirection::RightBottom => "right-bottom",
            FlowDirection::LeftBottom => "left-bottom",
            FlowDirection::LeftUp => "left-up",
            FlowDirection::RightUp => "right-up",
        }
    }
}

impl FromStr for FlowDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "right-bottom" => Ok(FlowDirection::RightBottom),
            "left-bottom" => Ok(FlowDirection::LeftBottom),
            "left-up" => Ok(FlowDirection::LeftUp),
            "right-up" => Ok(FlowDirection::RightUp),
            _ => Err(format!(
                "Invalid flow direction: {}. Use 'right-bottom', 'left-bottom', 'left-up', or 'right-up'.",
                s
            )),
        }
    }
}

impl fmt::Display for FlowDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Display settings for a single notification. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationConfiguration {
    display_duration: Duration,
    width: u32,
    height: u32,
    template_name: String,
    flow_direction: FlowDirection,
}

impl NotificationConfiguration {
    /// Build a configuration, substituting defaults for anything missing.
    /// A zero duration and an empty template name count as missing.
    pub fn new(
        display_duration: Duration,
        width: Option<u32>,
        height: Option<u32>,
        template_name: Option<&str>,
        flow_direction: Option<FlowDirection>,
    ) -> Self {
        let display_duration = if display_duration.is_zero() {
            DEFAULT_DISPLAY_DURATION
        } else {
            display_duration
        };
        let template_name = match template_name {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => DEFAULT_TEMPLATE_NAME.to_string(),
        };

        Self {
            display_duration,
            width: width.unwrap_or(DEFAULT_WIDTH),
            height: height.unwrap_or(DEFAULT_HEIGHT),
            template_name,
            flow_direction: flow_direction.unwrap_or_default(),
        }
    }

    /// Build from the `[toast]` section of config.toml.
    pub fn from_settings(toast: &ToastConfig) -> Self {
        let flow_direction = toast.flow_direction.as_deref().and_then(|s| {
            s.parse::<FlowDirection>()
                .map_err(|e| log::warn!("{}, using default", e))
                .ok()
        });
        Self::new(
            duration_from_millis(toast.duration_ms),
            toast.width,
            toast.height,
            toast.template.as_deref(),
            flow_direction,
        )
    }

    #[must_use]
    pub fn with_flow_direction(mut self, flow_direction: FlowDirection) -> Self {
        self.flow_direction = flow_direction;
        self
    }

    pub fn display_duration(&self) -> Duration {
        self.display_duration
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    pub fn template_name(&self) -> &str {
        &self.template_name
    }

    pub fn flow_direction(&self) -> FlowDirection {
        self.flow_direction
    }
}

impl Default for NotificationConfiguration {
    fn default() -> Self {
        Self::new(DEFAULT_DISPLAY_DURATION, None, None, None, None)
    }
}

/// Negative millisecond values map to zero, which then falls back to the default duration.
pub fn duration_from_millis(ms: i64) -> Duration {
    Duration::from_millis(u64::try_from(ms).unwrap_or(0))
}

/// Identifier handed out by `NotifyBox`.
///
/// The visible `number` starts at 1 and restarts after every clear. The
/// `epoch` counts clears, so ids from before and after a clear never compare
/// equal even when their numbers match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId {
    epoch: u64,
    number: u64,
}

impl WindowId {
    /// Id `number` before any clear.
    pub const fn new(number: u64) -> Self {
        Self::in_epoch(0, number)
    }

    pub const fn in_epoch(epoch: u64, number: u64) -> Self {
        Self { epoch, number }
    }

    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number)
    }
}

impl Serialize for WindowId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.number)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WindowState {
    Pending,
    Active,
    FadingOut,
}

// --- Geometry (presentation units unless stated otherwise) ---

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Outer margin of a surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Thickness {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Thickness {
    pub fn uniform(value: f64) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }
}
