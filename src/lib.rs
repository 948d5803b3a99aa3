//! Display-free core of an interactive planetary system viewer.
//!
//! Bodies are read from a [`Catalog`], placed on circular orbits around the
//! world origin or around their parent body, and advanced tick by tick by the
//! [`OrbitStateModel`]. Screen clicks are mapped back to bodies by
//! [`selection::resolve`], and the [`ToggleState`] holds the orbit path and
//! label visibility flags a renderer reads every frame.

pub mod catalog;
pub mod constants;
pub mod error;
pub mod lookup;
pub mod math;
pub mod orbit;
pub mod selection;
pub mod toggles;

pub use catalog::{BodyDescriptor, Catalog};
pub use constants::*;
pub use error::{DegenerateOrbitWarning, InvalidCatalogError, UnknownBodyError};
pub use lookup::CameraTarget;
pub use orbit::{OrbitPath, OrbitRuntimeState, OrbitSettings, OrbitStateModel};
pub use selection::{CameraState, Pick, Ray};
pub use toggles::{Toggle, ToggleState};

#[cfg(all(feature = "f32", not(feature = "f64")))]
pub type Num = f32;
#[cfg(all(feature = "f32", not(feature = "f64")))]
pub use glam::{vec2, vec3, Mat4, Vec2, Vec3};

#[cfg(feature = "f64")]
pub type Num = f64;
#[cfg(feature = "f64")]
pub use glam::{dvec2 as vec2, dvec3 as vec3, DMat4 as Mat4, DVec2 as Vec2, DVec3 as Vec3};
