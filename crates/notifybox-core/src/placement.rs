//! Corner placement on the primary display.

use crate::config::ScreenConfig;
use crate::models::{FlowDirection, Point, Rect, Size, Thickness};

/// Gap kept between a toast and the screen edge.
pub const WINDOW_MARGIN: f64 = 5.0;

/// Primary display: work area in device pixels and the device-to-presentation scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Screen {
    pub work_area: Rect,
    pub scale_factor: f64,
}

impl Screen {
    pub fn new(work_area: Rect, scale_factor: f64) -> Self {
        let scale_factor = if scale_factor > 0.0 { scale_factor } else { 1.0 };
        Self {
            work_area,
            scale_factor,
        }
    }

    /// Work area of a screen whose taskbar sits along the bottom edge.
    pub fn from_settings(screen: &ScreenConfig) -> Self {
        let height = screen.height.saturating_sub(screen.taskbar_height);
        Self::new(
            Rect::new(0.0, 0.0, f64::from(screen.width), f64::from(height)),
            screen.scale_factor,
        )
    }

    /// Work area converted to presentation units.
    pub fn logical_work_area(&self) -> Rect {
        let s = self.scale_factor;
        Rect::new(
            self.work_area.x / s,
            self.work_area.y / s,
            self.work_area.width / s,
            self.work_area.height / s,
        )
    }
}

/// Top-left corner for a surface of `size` with outer `margin`.
pub fn position(direction: FlowDirection, screen: &Screen, size: Size, margin: Thickness) -> Point {
    let area = screen.logical_work_area();
    let right = area.right() - size.width - margin.right - WINDOW_MARGIN;
    let bottom = area.bottom() - size.height - margin.top;

    match direction {
        FlowDirection::RightBottom => Point::new(right, bottom),
        FlowDirection::LeftBottom => Point::new(area.left(), bottom),
        FlowDirection::LeftUp => Point::new(area.left(), area.top()),
        FlowDirection::RightUp => Point::new(right, area.top()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen(scale: f64) -> Screen {
        Screen::new(Rect::new(0.0, 0.0, 1920.0, 1040.0), scale)
    }

    #[test]
    fn right_bottom_accounts_for_margins() {
        let pos = position(
            FlowDirection::RightBottom,
            &screen(1.0),
            Size::new(300.0, 150.0),
            Thickness::uniform(10.0),
        );
        assert_eq!(pos, Point::new(1920.0 - 300.0 - 10.0 - 5.0, 1040.0 - 150.0 - 10.0));
    }

    #[test]
    fn each_corner() {
        let size = Size::new(300.0, 150.0);
        let margin = Thickness::default();
        let s = screen(1.0);
        assert_eq!(
            position(FlowDirection::LeftBottom, &s, size, margin),
            Point::new(0.0, 890.0)
        );
        assert_eq!(
            position(FlowDirection::LeftUp, &s, size, margin),
            Point::new(0.0, 0.0)
        );
        assert_eq!(
            position(FlowDirection::RightUp, &s, size, margin),
            Point::new(1615.0, 0.0)
        );
    }

    #[test]
    fn device_pixels_are_scaled() {
        let pos = position(
            FlowDirection::RightBottom,
            &screen(2.0),
            Size::new(300.0, 150.0),
            Thickness::default(),
        );
        assert_eq!(pos, Point::new(960.0 - 305.0, 520.0 - 150.0));
    }

    #[test]
    fn offset_work_area() {
        let s = Screen::new(Rect::new(100.0, 50.0, 800.0, 600.0), 1.0);
        let size = Size::new(200.0, 100.0);
        assert_eq!(
            position(FlowDirection::LeftUp, &s, size, Thickness::default()),
            Point::new(100.0, 50.0)
        );
        assert_eq!(
            position(FlowDirection::RightBottom, &s, size, Thickness::default()),
            Point::new(695.0, 550.0)
        );
    }

    #[test]
    fn screen_from_settings_subtracts_taskbar() {
        let s = Screen::from_settings(&ScreenConfig::default());
        assert_eq!(s.work_area, Rect::new(0.0, 0.0, 1920.0, 1040.0));
        let bad = Screen::new(Rect::default(), 0.0);
        assert_eq!(bad.scale_factor, 1.0);
    }
}
