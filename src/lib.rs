//! Signsheet
//!
//! A freehand signature capture surface for Rust, plus the attendance roster
//! and printable sheet that consume its output.
//!
//! # Features
//!
//! - **Capture surface**: pointer/touch input to a density-normalised raster,
//!   exported as a PNG data URL after every stroke
//! - **Roster** (default): per-attendee records with timestamped signatures
//!   and an HTML attendance sheet
//!
//! # Example
//!
//! ```no_run
//! use signsheet::{InputEvent, PadConfig};
//! use signsheet::platform::StaticDevice;
//! use signsheet::rendering::layout::Rect;
//!
//! let mut pad = signsheet::new_pad(PadConfig::default());
//! pad.on_save(|img| println!("saved {} bytes", img.png_data.len()));
//! pad.mount(Rect::new(0.0, 0.0, 300.0, 120.0), &StaticDevice::with_ratio(2.0));
//!
//! pad.pointer_down(&mut InputEvent::pointer(10.0, 10.0));
//! pad.pointer_move(&mut InputEvent::pointer(50.0, 50.0));
//! pad.pointer_up(&mut InputEvent::pointer(50.0, 50.0));
//! pad.clear();
//! ```

use serde::{Deserialize, Serialize};

pub mod error;
pub use error::{Error, Result};

pub mod pad;
pub use pad::{DrawState, InputEvent, InputKind, SignaturePad, TouchPoint};

pub mod platform;

pub mod rendering;
pub use rendering::SignatureImage;

// Roster and sheet rendering around the pad
#[cfg(feature = "roster")]
pub mod roster;

#[cfg(feature = "roster")]
pub mod sheet;

use rendering::paint::StrokeStyle;

/// Configuration for a signature pad
///
/// # Examples
///
/// ```
/// let cfg = signsheet::PadConfig::default();
/// assert_eq!(cfg.stroke.width, 2.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PadConfig {
    /// Style applied to every stroke
    pub stroke: StrokeStyle,
    /// Hint shown while nothing has been signed
    pub placeholder: String,
    /// What to do when the host reports a new size after mount
    pub resize_policy: ResizePolicy,
}

impl Default for PadConfig {
    fn default() -> Self {
        Self {
            stroke: StrokeStyle::default(),
            placeholder: "Firme en este recuadro".to_string(),
            resize_policy: ResizePolicy::Ignore,
        }
    }
}

impl PadConfig {
    /// Load a configuration from a JSON file; missing keys take defaults.
    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// Behaviour on size changes after mount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizePolicy {
    /// Keep the sizing computed at mount; only the origin follows the host
    #[default]
    Ignore,
    /// Re-run sizing, which blanks the surface
    Rescale,
}

/// Size in logical (layout) pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LogicalSize {
    pub width: f32,
    pub height: f32,
}

/// Capability handed to whoever owns a pad: blank it and reset signed state.
///
/// Implementations must run the same reset as the user-facing clear
/// affordance, and must tolerate being called at any time.
pub trait SignatureControl {
    fn clear(&mut self);
}

/// Create an unmounted signature pad
pub fn new_pad(config: PadConfig) -> SignaturePad {
    SignaturePad::new(config)
}
