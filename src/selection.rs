//! Mapping pointer positions back to bodies.

use crate::math::ray_sphere_distance;
use crate::orbit::OrbitStateModel;
use crate::{vec2, vec3, Mat4, Num, Vec2, Vec3, PI};

/// Perspective camera looking from `position` towards `target`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians
    pub fov_y: Num,
    /// Width / height
    pub aspect: Num,
    pub near: Num,
    pub far: Num,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            position: vec3(0.0, 20.0, 40.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y: 45.0 * PI / 180.0,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl CameraState {
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Normalized
    pub direction: Vec3,
}

impl Ray {
    /// Ray from the camera through a point in normalized device coordinates.
    pub fn from_camera(camera: &CameraState, ndc: Vec2) -> Option<Self> {
        let inverse = camera.view_projection().inverse();

        let near = inverse.project_point3(vec3(ndc.x, ndc.y, 0.0));
        let far = inverse.project_point3(vec3(ndc.x, ndc.y, 1.0));

        let direction = (far - near).try_normalize()?;

        Some(Self {
            origin: camera.position,
            direction,
        })
    }

    pub fn intersect_sphere(&self, center: Vec3, radius: Num) -> Option<Num> {
        ray_sphere_distance(self.origin, self.direction, center, radius)
    }

    pub fn at(&self, distance: Num) -> Vec3 {
        self.origin + self.direction * distance
    }
}

/// A body hit by a selection ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pick<'a> {
    pub id: &'a str,
    /// Along the ray, from the camera
    pub distance: Num,
}

/// Converts a pointer position in pixels (origin top left) into normalized
/// device coordinates.
pub fn pointer_to_ndc(x: Num, y: Num, width: Num, height: Num) -> Vec2 {
    vec2(x / width * 2.0 - 1.0, -(y / height) * 2.0 + 1.0)
}

/// The body under `ndc`, as seen from `camera`.
pub fn resolve<'a>(model: &'a OrbitStateModel, camera: &CameraState, ndc: Vec2) -> Option<Pick<'a>> {
    let settings = model.settings();
    let spheres = model
        .bodies()
        .map(|(body, state)| (body.id.as_str(), state.position, body.radius(settings)));

    resolve_among(spheres, camera, ndc)
}

/// Nearest of `spheres` under `ndc`.
///
/// Ties in distance keep the sphere listed first.
pub fn resolve_among<'a>(
    spheres: impl IntoIterator<Item = (&'a str, Vec3, Num)>,
    camera: &CameraState,
    ndc: Vec2,
) -> Option<Pick<'a>> {
    if !ndc.is_finite() {
        return None;
    }

    let ray = Ray::from_camera(camera, ndc)?;

    spheres
        .into_iter()
        .filter_map(|(id, center, radius)| {
            ray.intersect_sphere(center, radius)
                .map(|distance| Pick { id, distance })
        })
        .fold(None, |nearest: Option<Pick<'a>>, pick| match nearest {
            Some(nearest) if nearest.distance <= pick.distance => Some(nearest),
            _ => Some(pick),
        })
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::catalog::tests::solar_catalog;
    use crate::orbit::OrbitSettings;

    fn looking_down_z() -> CameraState {
        CameraState {
            position: vec3(0.0, 0.0, 30.0),
            aspect: 1.0,
            ..Default::default()
        }
    }

    #[test]
    fn center_ray_points_at_target() {
        let camera = CameraState::default();

        let ray = Ray::from_camera(&camera, Vec2::ZERO).unwrap();
        let expected = (camera.target - camera.position).normalize();

        assert!(ray.direction.distance(expected) < 1e-4);
    }

    #[test]
    fn off_center_ray_bends_towards_pointer() {
        let camera = looking_down_z();

        let ray = Ray::from_camera(&camera, vec2(0.5, 0.0)).unwrap();

        assert!(ray.direction.x > 0.0);
        assert!(ray.direction.y.abs() < 1e-4);
        assert!(ray.direction.z < 0.0);
    }

    #[test]
    fn nearest_body_wins() {
        let camera = looking_down_z();
        let spheres = [
            ("far", vec3(0.0, 0.0, 0.0), 2.0),
            ("near", vec3(0.0, 0.0, 10.0), 1.0),
        ];

        let pick = resolve_among(spheres, &camera, Vec2::ZERO).unwrap();

        assert_eq!(pick.id, "near");
        assert!((pick.distance - 19.0).abs() < 1e-3);
    }

    #[test]
    fn empty_space_selects_nothing() {
        let camera = looking_down_z();
        let spheres = [("body", vec3(0.0, 0.0, 0.0), 1.0)];

        assert_eq!(resolve_among(spheres, &camera, vec2(0.9, 0.9)), None);
    }

    #[test]
    fn non_finite_pointer_selects_nothing() {
        let camera = looking_down_z();
        let spheres = [("body", vec3(0.0, 0.0, 0.0), 1.0)];

        assert_eq!(resolve_among(spheres, &camera, vec2(Num::NAN, 0.0)), None);
    }

    #[test]
    fn clicking_the_middle_of_the_screen_selects_the_star() {
        let model = OrbitStateModel::initialize_with_rng(
            solar_catalog(),
            OrbitSettings::default(),
            &mut StdRng::seed_from_u64(1),
        )
        .unwrap();
        let camera = CameraState::default();

        let ndc = pointer_to_ndc(960.0, 540.0, 1920.0, 1080.0);
        let pick = resolve(&model, &camera, ndc).unwrap();

        assert_eq!(pick.id, "sun");
    }

    #[test]
    fn pointer_corners_map_to_ndc_corners() {
        assert_eq!(pointer_to_ndc(0.0, 0.0, 800.0, 600.0), vec2(-1.0, 1.0));
        assert_eq!(pointer_to_ndc(800.0, 600.0, 800.0, 600.0), vec2(1.0, -1.0));
        assert_eq!(pointer_to_ndc(400.0, 300.0, 800.0, 600.0), vec2(0.0, 0.0));
    }
}
