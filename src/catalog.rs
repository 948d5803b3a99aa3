use std::collections::HashMap;
#[cfg(feature = "serde")]
use std::path::Path;

use crate::error::InvalidCatalogError;
use crate::orbit::OrbitSettings;
use crate::Num;

const MISSING: &str = "—";
const DEFAULT_COLOR: &str = "#ffffff";

/// Static description of a star, planet or moon.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct BodyDescriptor {
    pub id: String,
    pub name: String,
    /// km
    pub diameter: Num,
    /// Time units per revolution. Absent for the central star.
    #[cfg_attr(feature = "serde", serde(default))]
    pub orbit_period: Option<Num>,
    /// Orbital radius in AU, 0 for the central star.
    #[cfg_attr(feature = "serde", serde(default))]
    pub distance: Num,
    /// Id of the body this one orbits, `None` orbits the world origin.
    #[cfg_attr(feature = "serde", serde(default))]
    pub parent: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub color: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub texture: Option<String>,
    /// m/s²
    #[cfg_attr(feature = "serde", serde(default))]
    pub gravity: Option<Num>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub composition: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub moons: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub fun_fact: Option<String>,
}

impl BodyDescriptor {
    pub fn is_central(&self) -> bool {
        self.distance == 0.0
    }

    pub fn is_satellite(&self) -> bool {
        self.parent.is_some()
    }

    /// Radius of the body's sphere in world units
    pub fn radius(&self, settings: &OrbitSettings) -> Num {
        self.diameter * settings.radius_per_diameter
    }

    /// Radius of the orbit in world units
    pub fn orbit_radius(&self, settings: &OrbitSettings) -> Num {
        self.distance * settings.orbit_scale_factor
    }

    pub fn color_or_default(&self) -> &str {
        self.color.as_deref().unwrap_or(DEFAULT_COLOR)
    }

    /// The lines shown in the info panel when the body is selected.
    pub fn info_lines(&self) -> Vec<String> {
        let period = match self.orbit_period {
            Some(period) if period != 0.0 => format!("{period} days"),
            _ => MISSING.to_string(),
        };
        let gravity = self
            .gravity
            .map(|g| format!("{g} m/s²"))
            .unwrap_or_else(|| MISSING.to_string());

        vec![
            self.name.clone(),
            format!("Diameter: {} km", self.diameter),
            format!("Orbital Period: {period}"),
            format!("Distance from Sun: {} AU", self.distance),
            format!("Gravity: {gravity}"),
            format!(
                "Composition: {}",
                self.composition.as_deref().unwrap_or(MISSING)
            ),
            format!("Moons: {}", self.moons),
            self.fun_fact.clone().unwrap_or_default(),
        ]
    }
}

/// The parent relation of a validated catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hierarchy {
    /// Body indices, parents always before their satellites
    pub order: Vec<usize>,
    /// Parent index per body
    pub parents: Vec<Option<usize>>,
    /// Distance to the top of the parent chain, per body
    pub depths: Vec<usize>,
}

/// All bodies of a system, in the order they were supplied.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    bodies: Vec<BodyDescriptor>,
    index: HashMap<String, usize>,
}

impl Catalog {
    pub fn new(bodies: Vec<BodyDescriptor>) -> Self {
        let mut index = HashMap::with_capacity(bodies.len());
        for (idx, body) in bodies.iter().enumerate() {
            index.entry(body.id.clone()).or_insert(idx);
        }

        Self { bodies, index }
    }

    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, InvalidCatalogError> {
        let bodies: Vec<BodyDescriptor> = serde_json::from_str(json)
            .map_err(|err| InvalidCatalogError::Parse(err.to_string()))?;

        Ok(Self::new(bodies))
    }

    #[cfg(feature = "serde")]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, InvalidCatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|err| {
            InvalidCatalogError::Parse(format!("{}: {err}", path.display()))
        })?;

        Self::from_json(&json)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BodyDescriptor> {
        self.bodies.iter()
    }

    pub fn get(&self, id: &str) -> Option<&BodyDescriptor> {
        self.index_of(id).map(|idx| &self.bodies[idx])
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn by_index(&self, idx: usize) -> &BodyDescriptor {
        &self.bodies[idx]
    }

    /// Ids for search suggestions, in catalog order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.bodies.iter().map(|body| body.id.as_str())
    }

    /// Validates the catalog and orders its bodies by hierarchy depth.
    ///
    /// Bodies at the same depth keep their catalog order.
    pub fn hierarchy(&self) -> Result<Hierarchy, InvalidCatalogError> {
        if self.index.len() != self.bodies.len() {
            let duplicate = self
                .bodies
                .iter()
                .enumerate()
                .find(|(idx, body)| self.index[&body.id] != *idx)
                .map(|(_, body)| body.id.clone())
                .unwrap_or_default();

            return Err(InvalidCatalogError::DuplicateId(duplicate));
        }

        let mut parents = Vec::with_capacity(self.bodies.len());
        for body in &self.bodies {
            check_dimension(body, "distance", body.distance)?;
            check_dimension(body, "diameter", body.diameter)?;

            let parent = match &body.parent {
                Some(parent) => Some(self.index_of(parent).ok_or_else(|| {
                    InvalidCatalogError::DanglingParent {
                        id: body.id.clone(),
                        parent: parent.clone(),
                    }
                })?),
                None => None,
            };
            parents.push(parent);
        }

        let mut depths: Vec<Option<usize>> = vec![None; self.bodies.len()];
        let mut path = Vec::new();

        for start in 0..self.bodies.len() {
            path.clear();
            let mut current = start;

            // Climb until we reach a body whose depth is known or the top of the chain
            let base = loop {
                if let Some(depth) = depths[current] {
                    break depth + 1;
                }
                if path.contains(&current) {
                    return Err(InvalidCatalogError::ParentCycle(
                        self.bodies[current].id.clone(),
                    ));
                }
                path.push(current);

                match parents[current] {
                    Some(parent) => current = parent,
                    None => break 0,
                }
            };

            for (offset, &idx) in path.iter().rev().enumerate() {
                depths[idx] = Some(base + offset);
            }
        }

        let depths: Vec<usize> = depths.into_iter().map(Option::unwrap_or_default).collect();
        let mut order: Vec<usize> = (0..self.bodies.len()).collect();
        order.sort_by_key(|&idx| depths[idx]);

        Ok(Hierarchy {
            order,
            parents,
            depths,
        })
    }
}

fn check_dimension(
    body: &BodyDescriptor,
    field: &'static str,
    value: Num,
) -> Result<(), InvalidCatalogError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(InvalidCatalogError::InvalidDimension {
            id: body.id.clone(),
            field,
            value,
        })
    }
}
