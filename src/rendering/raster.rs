/// Raster backing buffer for the signature surface

use tiny_skia::{Color, FillRule, PathBuilder, Pixmap, Transform};

use crate::rendering::layout::{Point, SurfaceGeometry};
use crate::rendering::paint::StrokeStyle;
use crate::rendering::SignatureImage;
use crate::{Error, Result};

/// Owns the physical pixel buffer. Drawing calls take logical coordinates;
/// the device pixel ratio is applied through `transform`.
pub struct RasterSurface {
    pixmap: Pixmap,
    transform: Transform,
}

impl RasterSurface {
    /// Allocate a transparent buffer of the geometry's physical size.
    pub fn new(geometry: &SurfaceGeometry) -> Result<Self> {
        let pixmap = Pixmap::new(geometry.physical_width, geometry.physical_height).ok_or_else(|| {
            Error::SurfaceUnavailable(format!(
                "cannot allocate {}x{} surface",
                geometry.physical_width, geometry.physical_height
            ))
        })?;
        Ok(Self {
            pixmap,
            transform: Transform::from_scale(geometry.ratio, geometry.ratio),
        })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn stroke_segment(&mut self, from: Point, to: Point, style: &StrokeStyle) {
        let mut pb = PathBuilder::new();
        pb.move_to(from.x, from.y);
        pb.line_to(to.x, to.y);
        let Some(path) = pb.finish() else {
            return;
        };
        self.pixmap
            .stroke_path(&path, &style.to_paint(), &style.to_stroke(), self.transform, None);
    }

    /// Fill a round dot one line-weight across, used for single-point strokes.
    pub fn stamp_dot(&mut self, at: Point, style: &StrokeStyle) {
        let Some(path) = PathBuilder::from_circle(at.x, at.y, style.width / 2.0) else {
            return;
        };
        self.pixmap
            .fill_path(&path, &style.to_paint(), FillRule::Winding, self.transform, None);
    }

    /// Erase the whole physical area, independent of the scale transform.
    pub fn clear(&mut self) {
        self.pixmap.fill(Color::TRANSPARENT);
    }

    pub fn is_blank(&self) -> bool {
        self.pixmap.pixels().iter().all(|p| p.alpha() == 0)
    }

    /// Snapshot the current pixels as a PNG.
    pub fn encode_png(&self) -> Result<SignatureImage> {
        let png_data = self
            .pixmap
            .encode_png()
            .map_err(|e| Error::EncodeError(e.to_string()))?;
        Ok(SignatureImage {
            width: self.pixmap.width(),
            height: self.pixmap.height(),
            png_data,
        })
    }

    /// Alpha of the physical pixel under logical point `at`.
    pub fn alpha_at(&self, at: Point) -> Option<u8> {
        let mapped = {
            let mut p = [tiny_skia::Point::from_xy(at.x, at.y)];
            self.transform.map_points(&mut p);
            p[0]
        };
        if mapped.x < 0.0 || mapped.y < 0.0 {
            return None;
        }
        self.pixmap
            .pixel(mapped.x as u32, mapped.y as u32)
            .map(|p| p.alpha())
    }
}
