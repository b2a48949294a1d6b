/// Surface geometry: logical bounds, pixel ratio and physical backing size

use crate::LogicalSize;

/// Bounding box of the surface in client (layout) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn size(&self) -> LogicalSize {
        LogicalSize {
            width: self.width,
            height: self.height,
        }
    }
}

/// A 2D point in logical surface-local units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Sizing computed once per mount.
///
/// `physical_width`/`physical_height` are the logical size multiplied by
/// `ratio` and rounded; every drawing call is issued in logical units and
/// scaled by `ratio` at raster time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceGeometry {
    pub origin: Point,
    pub logical: LogicalSize,
    pub ratio: f32,
    pub physical_width: u32,
    pub physical_height: u32,
}

impl SurfaceGeometry {
    pub fn compute(bounds: Rect, ratio: f32) -> Self {
        let ratio = if ratio.is_finite() && ratio > 1.0 { ratio } else { 1.0 };
        let logical = bounds.size();
        Self {
            origin: Point::new(bounds.x, bounds.y),
            logical,
            ratio,
            physical_width: scale_dimension(logical.width, ratio),
            physical_height: scale_dimension(logical.height, ratio),
        }
    }

    /// Convert client coordinates to surface-local logical coordinates.
    pub fn to_local(&self, client_x: f32, client_y: f32) -> Point {
        Point::new(client_x - self.origin.x, client_y - self.origin.y)
    }

    pub fn is_empty(&self) -> bool {
        self.physical_width == 0 || self.physical_height == 0
    }
}

fn scale_dimension(logical: f32, ratio: f32) -> u32 {
    let scaled = (logical * ratio).round();
    if scaled.is_finite() && scaled > 0.0 {
        scaled as u32
    } else {
        0
    }
}
