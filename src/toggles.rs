/// A flag the user can switch on and off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Toggle {
    OrbitPaths,
    Labels,
}

/// Visibility flags applied to every body alike.
///
/// This is the single source of truth a renderer reads when drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleState {
    pub orbits_visible: bool,
    pub labels_visible: bool,
}

impl Default for ToggleState {
    fn default() -> Self {
        Self {
            orbits_visible: true,
            labels_visible: true,
        }
    }
}

impl ToggleState {
    pub fn set_orbit_paths_visible(&mut self, visible: bool) {
        self.orbits_visible = visible;
    }

    pub fn set_labels_visible(&mut self, visible: bool) {
        self.labels_visible = visible;
    }

    pub fn apply(mut self, toggle: Toggle, visible: bool) -> Self {
        match toggle {
            Toggle::OrbitPaths => self.set_orbit_paths_visible(visible),
            Toggle::Labels => self.set_labels_visible(visible),
        }
        self
    }

    pub fn is_visible(&self, toggle: Toggle) -> bool {
        match toggle {
            Toggle::OrbitPaths => self.orbits_visible,
            Toggle::Labels => self.labels_visible,
        }
    }
}
