//! The signature capture surface.
//!
//! `SignaturePad` turns a serialised stream of pointer or touch events into
//! strokes on a raster buffer sized at device resolution. Every finished
//! stroke is encoded to PNG and handed to the `on_save` callback; `clear`
//! blanks the buffer and fires `on_clear`.
//!
//! Until the pad is mounted with a non-empty size there is no drawing
//! context: every handler is then a silent no-op and no callback fires.

use std::sync::Arc;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::platform::DeviceEmulation;
use crate::rendering::layout::{Point, Rect, SurfaceGeometry};
use crate::rendering::raster::RasterSurface;
use crate::rendering::SignatureImage;
use crate::{PadConfig, ResizePolicy, SignatureControl};

type OnSaveHandler = Arc<dyn Fn(&SignatureImage) + Send + Sync>;
type OnClearHandler = Arc<dyn Fn() + Send + Sync>;

/// One active touch contact, in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub client_x: f32,
    pub client_y: f32,
}

/// Source of an input event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum InputKind {
    /// Mouse or pen: a single coordinate pair
    Pointer { client_x: f32, client_y: f32 },
    /// Touch: only the first active contact is used
    Touch { touches: Vec<TouchPoint> },
    /// Anything else; never yields a point
    Other,
}

/// An input event delivered to the pad.
///
/// Handlers always mark the event as default-prevented so the host does not
/// scroll or start a selection while the user is signing.
#[derive(Debug, Clone, PartialEq)]
pub struct InputEvent {
    pub kind: InputKind,
    default_prevented: bool,
}

impl InputEvent {
    pub fn new(kind: InputKind) -> Self {
        Self {
            kind,
            default_prevented: false,
        }
    }

    pub fn pointer(client_x: f32, client_y: f32) -> Self {
        Self::new(InputKind::Pointer { client_x, client_y })
    }

    pub fn touch(client_x: f32, client_y: f32) -> Self {
        Self::new(InputKind::Touch {
            touches: vec![TouchPoint { client_x, client_y }],
        })
    }

    /// A touch event with no active contacts, as delivered on touch end.
    pub fn touch_released() -> Self {
        Self::new(InputKind::Touch { touches: Vec::new() })
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Client coordinates carried by the event, if any.
    pub fn client_position(&self) -> Option<(f32, f32)> {
        match &self.kind {
            InputKind::Pointer { client_x, client_y } => Some((*client_x, *client_y)),
            InputKind::Touch { touches } => touches.first().map(|t| (t.client_x, t.client_y)),
            InputKind::Other => None,
        }
    }
}

/// Drawing mode of the pad.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawState {
    Idle,
    /// A stroke is in progress. `last` is the current path position (absent
    /// if the stroke began on dead input); `moved` records whether any
    /// segment has been drawn.
    Drawing { last: Option<Point>, moved: bool },
}

pub struct SignaturePad {
    config: PadConfig,
    geometry: Option<SurfaceGeometry>,
    raster: Option<RasterSurface>,
    state: DrawState,
    signed: bool,
    on_save: Option<OnSaveHandler>,
    on_clear: Option<OnClearHandler>,
}

impl SignaturePad {
    pub fn new(config: PadConfig) -> Self {
        Self {
            config,
            geometry: None,
            raster: None,
            state: DrawState::Idle,
            signed: false,
            on_save: None,
            on_clear: None,
        }
    }

    /// Size the surface against its displayed bounds and the device's pixel
    /// ratio. Mounting again re-initialises the surface from scratch.
    pub fn mount(&mut self, bounds: Rect, device: &dyn DeviceEmulation) {
        let ratio = device.metrics().pixel_ratio();
        let geometry = SurfaceGeometry::compute(bounds, ratio);
        self.state = DrawState::Idle;
        self.signed = false;
        match RasterSurface::new(&geometry) {
            Ok(raster) => {
                debug!(
                    "mounted signature pad {}x{} logical at ratio {} ({}x{} physical)",
                    geometry.logical.width,
                    geometry.logical.height,
                    geometry.ratio,
                    geometry.physical_width,
                    geometry.physical_height
                );
                self.raster = Some(raster);
            }
            Err(e) => {
                warn!("signature pad left without a drawing context: {}", e);
                self.raster = None;
            }
        }
        self.geometry = Some(geometry);
    }

    /// Handle a size change reported by the host after mount.
    ///
    /// With `ResizePolicy::Ignore` only the bounding-box origin is updated.
    /// With `ResizePolicy::Rescale` the surface is re-sized, which blanks it;
    /// the pad then reports a clear so the owner drops any saved image.
    /// A pad without a drawing context (never mounted, or mounted at zero
    /// size) is mounted afresh under either policy.
    pub fn resize(&mut self, bounds: Rect, device: &dyn DeviceEmulation) {
        if self.raster.is_none() {
            self.mount(bounds, device);
            return;
        }
        match self.config.resize_policy {
            ResizePolicy::Ignore => self.set_origin(bounds.x, bounds.y),
            ResizePolicy::Rescale => {
                self.mount(bounds, device);
                if self.raster.is_some() {
                    self.notify_clear();
                }
            }
        }
    }

    /// Move the surface's bounding-box origin (e.g. after page scroll).
    pub fn set_origin(&mut self, left: f32, top: f32) {
        if let Some(g) = self.geometry.as_mut() {
            g.origin = Point::new(left, top);
        }
    }

    pub fn on_save<F>(&mut self, cb: F)
    where
        F: Fn(&SignatureImage) + Send + Sync + 'static,
    {
        self.on_save = Some(Arc::new(cb));
    }

    pub fn clear_on_save(&mut self) {
        self.on_save = None;
    }

    pub fn on_clear<F>(&mut self, cb: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_clear = Some(Arc::new(cb));
    }

    pub fn clear_on_clear(&mut self) {
        self.on_clear = None;
    }

    pub fn pointer_down(&mut self, event: &mut InputEvent) {
        event.prevent_default();
        if self.raster.is_none() {
            return;
        }
        let at = self.locate(event);
        if at.is_none() {
            warn!("pointer down without coordinates; waiting for a positioned move");
        }
        debug!("stroke started at {:?}", at);
        self.state = DrawState::Drawing { last: at, moved: false };
        self.signed = true;
    }

    pub fn pointer_move(&mut self, event: &mut InputEvent) {
        event.prevent_default();
        let DrawState::Drawing { last, moved } = self.state else {
            return;
        };
        let Some(at) = self.locate(event) else {
            return;
        };
        let Some(raster) = self.raster.as_mut() else {
            return;
        };
        let mut drew = moved;
        if let Some(prev) = last {
            if prev != at {
                raster.stroke_segment(prev, at, &self.config.stroke);
                drew = true;
            }
        }
        self.state = DrawState::Drawing {
            last: Some(at),
            moved: drew,
        };
    }

    pub fn pointer_up(&mut self, event: &mut InputEvent) {
        event.prevent_default();
        self.finish_stroke();
    }

    pub fn pointer_leave(&mut self, event: &mut InputEvent) {
        event.prevent_default();
        self.finish_stroke();
    }

    /// Blank the whole physical surface, reset signed state, abandon any
    /// stroke in progress and fire `on_clear`. Idempotent.
    pub fn clear(&mut self) {
        let Some(raster) = self.raster.as_mut() else {
            return;
        };
        raster.clear();
        self.state = DrawState::Idle;
        self.signed = false;
        debug!("signature pad cleared");
        self.notify_clear();
    }

    /// Encode the current pixels without ending a stroke.
    pub fn snapshot(&self) -> Option<SignatureImage> {
        let raster = self.raster.as_ref()?;
        match raster.encode_png() {
            Ok(img) => Some(img),
            Err(e) => {
                warn!("failed to snapshot signature: {}", e);
                None
            }
        }
    }

    pub fn state(&self) -> DrawState {
        self.state
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, DrawState::Drawing { .. })
    }

    pub fn has_signed(&self) -> bool {
        self.signed
    }

    pub fn is_mounted(&self) -> bool {
        self.raster.is_some()
    }

    pub fn placeholder_visible(&self) -> bool {
        !self.signed
    }

    pub fn placeholder(&self) -> &str {
        &self.config.placeholder
    }

    pub fn geometry(&self) -> Option<&SurfaceGeometry> {
        self.geometry.as_ref()
    }

    pub fn config(&self) -> &PadConfig {
        &self.config
    }

    pub fn raster(&self) -> Option<&RasterSurface> {
        self.raster.as_ref()
    }

    fn locate(&self, event: &InputEvent) -> Option<Point> {
        let geometry = self.geometry.as_ref()?;
        let (x, y) = event.client_position()?;
        Some(geometry.to_local(x, y))
    }

    fn finish_stroke(&mut self) {
        let DrawState::Drawing { last, moved } = self.state else {
            return;
        };
        let Some(raster) = self.raster.as_mut() else {
            return;
        };
        self.state = DrawState::Idle;
        if let (Some(at), false) = (last, moved) {
            raster.stamp_dot(at, &self.config.stroke);
        }
        match raster.encode_png() {
            Ok(image) => {
                debug!("stroke finished; exported {} byte PNG", image.png_data.len());
                if let Some(cb) = &self.on_save {
                    cb(&image);
                }
            }
            Err(e) => warn!("failed to export signature: {}", e),
        }
    }

    fn notify_clear(&self) {
        if let Some(cb) = &self.on_clear {
            cb();
        }
    }
}

impl SignatureControl for SignaturePad {
    fn clear(&mut self) {
        SignaturePad::clear(self);
    }
}
