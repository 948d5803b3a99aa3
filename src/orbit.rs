use rand::Rng;

use crate::catalog::{BodyDescriptor, Catalog};
use crate::error::{DegenerateOrbitWarning, InvalidCatalogError, UnknownBodyError};
use crate::{vec3, Num, Vec3, ORBIT_SCALE_FACTOR, RADIUS_PER_DIAMETER, TWO_PI};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitSettings {
    /// World units per catalog distance unit
    pub orbit_scale_factor: Num,
    /// World-space radius per unit of diameter
    pub radius_per_diameter: Num,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            orbit_scale_factor: ORBIT_SCALE_FACTOR,
            radius_per_diameter: RADIUS_PER_DIAMETER,
        }
    }
}

/// Dynamic state of a single body.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitRuntimeState {
    /// Index of the body in the catalog
    pub body: usize,
    /// Catalog index of the body this one orbits
    pub parent: Option<usize>,
    /// Radians, in `[0, 2π)`
    pub angle: Num,
    /// Derived from `angle` and the parent's position, never authoritative
    pub position: Vec3,
    motion: Motion,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Motion {
    /// Central body, never moved by the model
    Fixed,
    /// Orbiting body with a usable period
    Orbiting { radius: Num, period: Num },
    /// Orbiting body whose period can't advance it
    Stationary { radius: Num },
}

/// A circle a renderer draws as an orbit path.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitPath<'a> {
    pub id: &'a str,
    pub center: Vec3,
    pub radius: Num,
}

/// Owns the runtime state of every body in a catalog and advances it.
#[derive(Debug, Clone)]
pub struct OrbitStateModel {
    catalog: Catalog,
    settings: OrbitSettings,
    /// Indexed by catalog index
    states: Vec<OrbitRuntimeState>,
    /// Catalog indices, parents before satellites
    order: Vec<usize>,
    warnings: Vec<DegenerateOrbitWarning>,
}

impl OrbitStateModel {
    pub fn initialize(catalog: Catalog) -> Result<Self, InvalidCatalogError> {
        Self::initialize_with_rng(catalog, OrbitSettings::default(), &mut rand::thread_rng())
    }

    pub fn initialize_with_rng(
        catalog: Catalog,
        settings: OrbitSettings,
        rng: &mut impl Rng,
    ) -> Result<Self, InvalidCatalogError> {
        let hierarchy = catalog.hierarchy()?;
        let mut warnings = Vec::new();

        let states = catalog
            .iter()
            .zip(hierarchy.parents)
            .enumerate()
            .map(|(idx, (body, parent))| {
                let motion = motion_of(body, &settings);

                if let Motion::Stationary { .. } = motion {
                    let warning = DegenerateOrbitWarning {
                        id: body.id.clone(),
                        orbit_period: body.orbit_period,
                    };
                    tracing::warn!("{warning}");
                    warnings.push(warning);
                }

                OrbitRuntimeState {
                    body: idx,
                    parent,
                    angle: rng.gen_range(0.0..TWO_PI),
                    position: Vec3::ZERO,
                    motion,
                }
            })
            .collect();

        let mut model = Self {
            catalog,
            settings,
            states,
            order: hierarchy.order,
            warnings,
        };
        model.recompute_positions();

        tracing::debug!(
            bodies = model.states.len(),
            degenerate = model.warnings.len(),
            "Initialized orbit state"
        );

        Ok(model)
    }

    /// Advances every orbiting body by `delta_time * time_scale` time units.
    pub fn advance(&mut self, delta_time: Num, time_scale: Num) {
        let step = delta_time * time_scale;

        for state in &mut self.states {
            if let Motion::Orbiting { period, .. } = state.motion {
                state.angle = (state.angle + step / period).rem_euclid(TWO_PI);
            }
        }

        self.recompute_positions();
    }

    fn recompute_positions(&mut self) {
        for &idx in &self.order {
            let center = match self.states[idx].parent {
                Some(parent) => self.states[parent].position,
                None => Vec3::ZERO,
            };

            let state = &mut self.states[idx];
            match state.motion {
                Motion::Fixed => {}
                Motion::Orbiting { radius, .. } | Motion::Stationary { radius } => {
                    state.position = center
                        + vec3(radius * state.angle.cos(), 0.0, radius * state.angle.sin());
                }
            }
        }
    }

    pub fn position_of(&self, id: &str) -> Result<Vec3, UnknownBodyError> {
        self.state(id).map(|state| state.position)
    }

    pub fn angle_of(&self, id: &str) -> Result<Num, UnknownBodyError> {
        self.state(id).map(|state| state.angle)
    }

    pub fn state(&self, id: &str) -> Result<&OrbitRuntimeState, UnknownBodyError> {
        self.catalog
            .index_of(id)
            .map(|idx| &self.states[idx])
            .ok_or_else(|| UnknownBodyError(id.to_string()))
    }

    /// Runtime states paired with their descriptors, in catalog order
    pub fn bodies(&self) -> impl Iterator<Item = (&BodyDescriptor, &OrbitRuntimeState)> {
        self.catalog.iter().zip(&self.states)
    }

    /// Ring per top-level orbiting body, centred on the world origin.
    pub fn orbit_paths(&self) -> impl Iterator<Item = OrbitPath<'_>> {
        self.catalog
            .iter()
            .filter(|body| !body.is_central() && !body.is_satellite())
            .map(|body| OrbitPath {
                id: &body.id,
                center: Vec3::ZERO,
                radius: body.orbit_radius(&self.settings),
            })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn settings(&self) -> &OrbitSettings {
        &self.settings
    }

    pub fn warnings(&self) -> &[DegenerateOrbitWarning] {
        &self.warnings
    }
}

fn motion_of(body: &BodyDescriptor, settings: &OrbitSettings) -> Motion {
    if body.is_central() {
        return Motion::Fixed;
    }

    let radius = body.orbit_radius(settings);
    match body.orbit_period {
        Some(period) if period > 0.0 && period.is_finite() => Motion::Orbiting { radius, period },
        _ => Motion::Stationary { radius },
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use test_case::test_case;

    use super::*;
    use crate::catalog::tests::{body, solar_catalog};

    const EPSILON: Num = 1e-3;

    fn model(catalog: Catalog) -> OrbitStateModel {
        OrbitStateModel::initialize_with_rng(
            catalog,
            OrbitSettings::default(),
            &mut StdRng::seed_from_u64(7),
        )
        .unwrap()
    }

    fn angle_diff(a: Num, b: Num) -> Num {
        let diff = (a - b).rem_euclid(TWO_PI);
        diff.min(TWO_PI - diff)
    }

    #[test]
    fn initial_angles_are_in_range() {
        let model = model(solar_catalog());

        for (_, state) in model.bodies() {
            assert!((0.0..TWO_PI).contains(&state.angle));
        }
    }

    #[test]
    fn positions_are_valid_before_first_tick() {
        let model = model(solar_catalog());

        let earth = model.position_of("earth").unwrap();
        assert!((earth.length() - 5.0).abs() < EPSILON);
    }

    #[test]
    fn moon_tracks_planet_in_same_tick() {
        let mut model = model(solar_catalog());

        model.advance(1.0, 10.0);

        let earth = model.position_of("earth").unwrap();
        let moon = model.position_of("moon").unwrap();
        let moon_angle = model.angle_of("moon").unwrap();
        let expected = earth + vec3(2.5 * moon_angle.cos(), 0.0, 2.5 * moon_angle.sin());

        assert!(
            moon.distance(expected) < EPSILON,
            "Expected moon at {expected:?}, got {moon:?}"
        );
        assert!((moon.distance(earth) - 2.5).abs() < EPSILON);
    }

    #[test]
    fn satellite_listed_before_parent_still_follows_it() {
        // Chain supplied leaf first
        let mut model = model(Catalog::new(vec![
            body("c", 0.1, Some(3.0), Some("b")),
            body("b", 0.2, Some(2.0), Some("a")),
            body("a", 1.0, Some(1.0), None),
        ]));

        model.advance(0.5, 1.0);

        let a = model.position_of("a").unwrap();
        let b = model.position_of("b").unwrap();
        let c = model.position_of("c").unwrap();

        assert!((b.distance(a) - 1.0).abs() < EPSILON);
        assert!((c.distance(b) - 0.5).abs() < EPSILON);
    }

    #[test_case(365.0, 0.01, 1.0, 100 ; "default speed")]
    #[test_case(27.0, 1.0, 0.016, 600 ; "fast moon")]
    #[test_case(10.0, 5.0, 2.0, 50 ; "wraps several times")]
    fn angle_advances_linearly(period: Num, time_scale: Num, delta: Num, ticks: usize) {
        let mut model = model(Catalog::new(vec![body("p", 1.0, Some(period), None)]));
        let initial = model.angle_of("p").unwrap();

        for _ in 0..ticks {
            model.advance(delta, time_scale);
        }

        let expected = initial + ticks as Num * delta * time_scale / period;
        let actual = model.angle_of("p").unwrap();

        assert!(
            angle_diff(actual, expected) < EPSILON,
            "Expected angle {expected}, got {actual}"
        );
        assert!((0.0..TWO_PI).contains(&actual));
    }

    #[test]
    fn central_body_never_moves() {
        let mut model = model(solar_catalog());

        for _ in 0..1000 {
            model.advance(100.0, 50.0);
        }

        assert_eq!(model.position_of("sun").unwrap(), Vec3::ZERO);
    }

    #[test_case(Some(0.0) ; "zero period")]
    #[test_case(Some(-4.0) ; "negative period")]
    #[test_case(None ; "missing period")]
    fn degenerate_orbit_is_stationary_and_reported(period: Option<Num>) {
        let mut model = model(Catalog::new(vec![
            body("sun", 0.0, None, None),
            body("rock", 2.0, period, None),
        ]));
        let before = model.position_of("rock").unwrap();

        model.advance(1.0, 1.0);
        model.advance(1.0, 1.0);

        let after = model.position_of("rock").unwrap();
        assert!(after.is_finite());
        assert_eq!(before, after);
        assert_eq!(
            model.warnings(),
            &[DegenerateOrbitWarning {
                id: "rock".to_string(),
                orbit_period: period
            }]
        );
    }

    #[test]
    fn unknown_body_has_no_position() {
        let model = model(solar_catalog());

        assert_eq!(
            model.position_of("pluto"),
            Err(UnknownBodyError("pluto".to_string()))
        );
    }

    #[test]
    fn invalid_catalog_stops_initialization() {
        let result = OrbitStateModel::initialize(Catalog::new(vec![
            body("a", 1.0, Some(1.0), Some("b")),
            body("b", 1.0, Some(1.0), Some("a")),
        ]));

        assert!(matches!(result, Err(InvalidCatalogError::ParentCycle(_))));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn bundled_catalog_initializes_cleanly() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/bodies.json");
        let mut model = model(Catalog::load(path).unwrap());

        model.advance(1.0, 1.0);

        assert!(model.warnings().is_empty());
        assert_eq!(model.position_of("sun").unwrap(), Vec3::ZERO);
        let earth = model.position_of("earth").unwrap();
        let moon = model.position_of("moon").unwrap();
        assert!((moon.distance(earth) - 2.5).abs() < EPSILON);
    }

    #[test]
    fn orbit_paths_skip_star_and_moons() {
        let model = model(solar_catalog());

        let paths: Vec<_> = model.orbit_paths().collect();

        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].id, "earth");
        assert_eq!(paths[0].radius, 5.0);
        assert_eq!(paths[1].id, "mars");
        assert_eq!(paths[1].radius, 7.5);
    }
}
