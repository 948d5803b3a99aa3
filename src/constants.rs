use crate::Num;

#[cfg(all(feature = "f32", not(feature = "f64")))]
pub use std::f32::consts::PI;
#[cfg(feature = "f64")]
pub use std::f64::consts::PI;

pub const TWO_PI: Num = 2.0 * PI;

/// World units per catalog distance unit (AU)
pub const ORBIT_SCALE_FACTOR: Num = 5.0;

/// World-space radius per km of body diameter
pub const RADIUS_PER_DIAMETER: Num = 1.0 / 7000.0;

/// Orbit time units advanced per tick at normal speed
pub const DEFAULT_TIME_SCALE: Num = 0.01;

/// Gap between a body's surface and its label
pub const LABEL_OFFSET: Num = 0.2;
