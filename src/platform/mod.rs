//! Platform surface: device metrics the signature pad is sized against
//!
//! Hosts embedding the pad provide a `DeviceEmulation` implementation that
//! reports the current display metrics. `StaticDevice` is a fixed,
//! in-memory provider suitable for headless use and tests.

pub mod device;

pub use device::{DeviceEmulation, DeviceMetrics, StaticDevice};
