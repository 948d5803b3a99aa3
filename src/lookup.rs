//! Finding bodies by a user supplied id, and keeping the camera on them.

use crate::catalog::BodyDescriptor;
use crate::error::UnknownBodyError;
use crate::orbit::OrbitStateModel;
use crate::Vec3;

/// Canonical form of a typed id: trimmed and lowercase.
pub fn normalize_id(token: &str) -> String {
    token.trim().to_lowercase()
}

impl OrbitStateModel {
    /// Looks a body up by a case-insensitive id and returns its current position.
    pub fn find(&self, token: &str) -> Result<(&BodyDescriptor, Vec3), UnknownBodyError> {
        let id = normalize_id(token);
        let body = self
            .catalog()
            .get(&id)
            .ok_or_else(|| UnknownBodyError(token.trim().to_string()))?;
        let position = self.position_of(&body.id)?;

        Ok((body, position))
    }
}

/// Point the orbit camera revolves around.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CameraTarget {
    pub position: Vec3,
    focus: Option<String>,
}

impl CameraTarget {
    /// Re-centres on the body named by `token`; leaves the target untouched
    /// when there is no such body.
    pub fn focus_on(&mut self, model: &OrbitStateModel, token: &str) -> Result<(), UnknownBodyError> {
        let (body, position) = model.find(token)?;

        self.position = position;
        self.focus = Some(body.id.clone());

        Ok(())
    }

    /// Moves the target along with the focused body.
    pub fn follow(&mut self, model: &OrbitStateModel) {
        if let Some(position) = self
            .focus
            .as_deref()
            .and_then(|id| model.position_of(id).ok())
        {
            self.position = position;
        }
    }

    pub fn release(&mut self) {
        self.focus = None;
    }

    pub fn focus(&self) -> Option<&str> {
        self.focus.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use test_case::test_case;

    use super::*;
    use crate::catalog::tests::solar_catalog;
    use crate::orbit::OrbitSettings;
    use crate::vec3;

    fn model() -> OrbitStateModel {
        OrbitStateModel::initialize_with_rng(
            solar_catalog(),
            OrbitSettings::default(),
            &mut StdRng::seed_from_u64(3),
        )
        .unwrap()
    }

    #[test_case("earth")]
    #[test_case("Earth")]
    #[test_case("  EARTH \n")]
    fn lookup_is_case_insensitive(token: &str) {
        let model = model();

        let (body, position) = model.find(token).unwrap();

        assert_eq!(body.id, "earth");
        assert_eq!(position, model.position_of("earth").unwrap());
    }

    #[test]
    fn unknown_lookup_keeps_target() {
        let model = model();
        let mut target = CameraTarget {
            position: vec3(1.0, 2.0, 3.0),
            ..Default::default()
        };
        let before = target.clone();

        let result = target.focus_on(&model, " Pluto ");

        assert_eq!(result, Err(UnknownBodyError("Pluto".to_string())));
        assert_eq!(target, before);
    }

    #[test]
    fn focused_target_follows_body() {
        let mut model = model();
        let mut target = CameraTarget::default();

        target.focus_on(&model, "mars").unwrap();
        model.advance(10.0, 1.0);
        target.follow(&model);

        assert_eq!(target.focus(), Some("mars"));
        assert_eq!(target.position, model.position_of("mars").unwrap());
    }

    #[test]
    fn released_target_stays_put() {
        let mut model = model();
        let mut target = CameraTarget::default();

        target.focus_on(&model, "mars").unwrap();
        let pinned = target.position;
        target.release();
        model.advance(10.0, 1.0);
        target.follow(&model);

        assert_eq!(target.position, pinned);
    }
}
