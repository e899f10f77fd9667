//! Pan/zoom state and screen <-> canvas conversion.

use crate::config::{ConfigError, DiagramConfig};
use std::ops::{Add, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Scale is clamped; the pan offset is a screen-space translation and is
/// never clamped.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    scale: f64,
    pan_offset: Point,
    min_scale: f64,
    max_scale: f64,
    zoom_step: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::with_bounds(&DiagramConfig::default())
    }
}

impl Viewport {
    pub fn from_config(config: &DiagramConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_bounds(config))
    }

    /// Caller guarantees `0 < min_scale <= max_scale`.
    fn with_bounds(config: &DiagramConfig) -> Self {
        Self {
            scale: 1.0_f64.clamp(config.min_scale, config.max_scale),
            pan_offset: Point::ZERO,
            min_scale: config.min_scale,
            max_scale: config.max_scale,
            zoom_step: config.zoom_step,
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn pan_offset(&self) -> Point {
        self.pan_offset
    }

    pub fn zoom_in(&mut self) {
        self.set_scale(self.scale + self.zoom_step);
    }

    pub fn zoom_out(&mut self) {
        self.set_scale(self.scale - self.zoom_step);
    }

    /// Clamp to the configured bounds. Rounded so repeated decimal steps
    /// land back on the same values (0.1 is not exact in binary).
    pub fn set_scale(&mut self, scale: f64) {
        let rounded = (scale * 1e6).round() / 1e6;
        self.scale = rounded.clamp(self.min_scale, self.max_scale);
    }

    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.pan_offset = self.pan_offset + Point::new(dx, dy);
    }

    pub fn set_pan_offset(&mut self, offset: Point) {
        self.pan_offset = offset;
    }

    pub fn reset(&mut self) {
        self.pan_offset = Point::ZERO;
        self.set_scale(1.0);
    }

    pub fn screen_to_canvas(&self, screen: Point) -> Point {
        let p = screen - self.pan_offset;
        Point::new(p.x / self.scale, p.y / self.scale)
    }

    pub fn canvas_to_screen(&self, canvas: Point) -> Point {
        Point::new(canvas.x * self.scale, canvas.y * self.scale) + self.pan_offset
    }

    /// Root-group transform; children stay in canvas space.
    pub fn transform(&self) -> String {
        format!(
            "translate({} {}) scale({})",
            self.pan_offset.x, self.pan_offset.y, self.scale
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_steps() {
        let mut v = Viewport::default();
        v.zoom_in();
        assert_eq!(v.scale(), 1.1);
        v.zoom_out();
        v.zoom_out();
        assert_eq!(v.scale(), 0.9);
    }

    #[test]
    fn test_zoom_clamped() {
        let mut v = Viewport::default();
        for _ in 0..50 {
            v.zoom_in();
        }
        assert_eq!(v.scale(), 2.0);
        for _ in 0..50 {
            v.zoom_out();
        }
        assert_eq!(v.scale(), 0.2);
    }

    #[test]
    fn test_zoom_out_lands_on_decimal_steps() {
        let mut v = Viewport::default();
        for _ in 0..7 {
            v.zoom_out();
        }
        assert_eq!(v.scale(), 0.3);
    }

    #[test]
    fn test_pan_unclamped() {
        let mut v = Viewport::default();
        v.pan(-1e6, 2.5);
        v.pan(10.0, -0.5);
        assert_eq!(v.pan_offset(), Point::new(-999_990.0, 2.0));
    }

    #[test]
    fn test_screen_to_canvas() {
        let mut v = Viewport::default();
        v.pan(100.0, 50.0);
        v.set_scale(2.0);
        assert_eq!(v.screen_to_canvas(Point::new(300.0, 250.0)), Point::new(100.0, 100.0));
        assert_eq!(v.canvas_to_screen(Point::new(100.0, 100.0)), Point::new(300.0, 250.0));
    }

    #[test]
    fn test_transform_string() {
        let mut v = Viewport::default();
        v.pan(10.0, -20.0);
        v.set_scale(0.5);
        assert_eq!(v.transform(), "translate(10 -20) scale(0.5)");
    }

    #[test]
    fn test_from_config_rejects_inverted_bounds() {
        let config = DiagramConfig {
            min_scale: 3.0,
            max_scale: 2.0,
            ..DiagramConfig::default()
        };
        assert!(matches!(
            Viewport::from_config(&config),
            Err(ConfigError::ZoomBounds { .. })
        ));
    }

    #[test]
    fn test_from_config_clamps_initial_scale() {
        let config = DiagramConfig {
            min_scale: 1.5,
            max_scale: 3.0,
            ..DiagramConfig::default()
        };
        assert_eq!(Viewport::from_config(&config).unwrap().scale(), 1.5);
    }

    #[test]
    fn test_reset() {
        let mut v = Viewport::default();
        v.pan(3.0, 4.0);
        v.zoom_in();
        v.reset();
        assert_eq!(v, Viewport::default());
    }
}
