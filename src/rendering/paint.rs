/// Stroke style applied to every signature segment

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    Butt,
    Round,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineJoin {
    Miter,
    Round,
    Bevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeStyle {
    pub rgba: (u8, u8, u8, u8),
    /// Line weight in logical pixels
    pub width: f32,
    pub cap: LineCap,
    pub join: LineJoin,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            // slate-700
            rgba: (0x33, 0x41, 0x55, 0xff),
            width: 2.0,
            cap: LineCap::Round,
            join: LineJoin::Round,
        }
    }
}

impl StrokeStyle {
    pub(crate) fn to_paint(&self) -> tiny_skia::Paint<'static> {
        let (r, g, b, a) = self.rgba;
        let mut paint = tiny_skia::Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = true;
        paint
    }

    pub(crate) fn to_stroke(&self) -> tiny_skia::Stroke {
        let mut stroke = tiny_skia::Stroke::default();
        stroke.width = self.width;
        stroke.line_cap = match self.cap {
            LineCap::Butt => tiny_skia::LineCap::Butt,
            LineCap::Round => tiny_skia::LineCap::Round,
            LineCap::Square => tiny_skia::LineCap::Square,
        };
        stroke.line_join = match self.join {
            LineJoin::Miter => tiny_skia::LineJoin::Miter,
            LineJoin::Round => tiny_skia::LineJoin::Round,
            LineJoin::Bevel => tiny_skia::LineJoin::Bevel,
        };
        stroke
    }
}
