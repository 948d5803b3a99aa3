use crate::{Num, Vec3};

/// Distance along a ray to the first point where it enters a sphere.
///
/// # Arguments
/// origin - Start of the ray.
/// direction - Normalized direction of the ray.
/// center - Center of the sphere.
/// radius - Radius of the sphere.
///
/// # Returns
/// The smallest non-negative distance at which the ray touches the sphere,
/// `0.0` if the origin is inside it, `None` if the ray misses it.
pub fn ray_sphere_distance(origin: Vec3, direction: Vec3, center: Vec3, radius: Num) -> Option<Num> {
    let oc = origin - center;
    let b = oc.dot(direction);
    let c = oc.length_squared() - radius * radius;

    // Origin outside the sphere and pointing away from it
    if c > 0.0 && b > 0.0 {
        return None;
    }

    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    let t = -b - discriminant.sqrt();

    Some(t.max(0.0))
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::vec3;

    #[test_case(Vec3::ZERO, 1.0, Some(9.0) ; "straight hit")]
    #[test_case(vec3(0.0, 0.0, 20.0), 1.0, None ; "behind the origin")]
    #[test_case(vec3(0.0, 2.0, 0.0), 1.0, None ; "passes above")]
    #[test_case(vec3(0.0, 1.0, 0.0), 1.0, Some(10.0) ; "grazing")]
    #[test_case(vec3(0.0, 0.0, 10.0), 3.0, Some(0.0) ; "origin inside")]
    fn sphere_distances(center: Vec3, radius: Num, expected: Option<Num>) {
        let origin = vec3(0.0, 0.0, 10.0);
        let direction = vec3(0.0, 0.0, -1.0);

        let actual = ray_sphere_distance(origin, direction, center, radius);

        match (actual, expected) {
            (Some(actual), Some(expected)) => assert!(
                (actual - expected).abs() < 1e-4,
                "Expected {expected}, got {actual}"
            ),
            (actual, expected) => assert_eq!(actual, expected),
        }
    }
}
