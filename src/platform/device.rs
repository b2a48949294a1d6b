/// Device metrics used to size the signature surface

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceMetrics {
    pub width: u32,
    pub height: u32,
    pub dpr: f32,
    pub touch: bool,
}

impl DeviceMetrics {
    /// Effective pixel ratio: `max(dpr, 1)`, with unusable values treated as 1.
    pub fn pixel_ratio(&self) -> f32 {
        if self.dpr.is_finite() && self.dpr > 1.0 {
            self.dpr
        } else {
            1.0
        }
    }
}

impl Default for DeviceMetrics {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            dpr: 1.0,
            touch: false,
        }
    }
}

pub trait DeviceEmulation: Send + Sync {
    fn set_metrics(&self, m: DeviceMetrics);
    fn metrics(&self) -> DeviceMetrics;
}

/// In-memory metrics source for hosts without a real display and for tests
pub struct StaticDevice {
    metrics: std::sync::Mutex<DeviceMetrics>,
}

impl StaticDevice {
    pub fn new() -> Self {
        Self::with_metrics(DeviceMetrics::default())
    }

    pub fn with_ratio(dpr: f32) -> Self {
        Self::with_metrics(DeviceMetrics {
            dpr,
            ..DeviceMetrics::default()
        })
    }

    pub fn with_metrics(metrics: DeviceMetrics) -> Self {
        StaticDevice {
            metrics: std::sync::Mutex::new(metrics),
        }
    }
}

impl Default for StaticDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceEmulation for StaticDevice {
    fn set_metrics(&self, m: DeviceMetrics) {
        let mut g = self.metrics.lock().unwrap_or_else(|p| p.into_inner());
        *g = m;
    }

    fn metrics(&self) -> DeviceMetrics {
        self.metrics
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }
}
