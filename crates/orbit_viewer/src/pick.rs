use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;
use orrery::selection::{pointer_to_ndc, resolve};
use orrery::CameraState;
use smooth_bevy_cameras::controllers::orbit::OrbitCameraController;

use crate::ui::UiState;
use crate::Orrery;

pub fn click(
    buttons: Res<Input<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&GlobalTransform, &Projection), With<OrbitCameraController>>,
    orrery: Res<Orrery>,
    mut ui_state: ResMut<UiState>,
    mut egui_context: EguiContexts,
) {
    if !buttons.just_pressed(MouseButton::Left) {
        return;
    }

    if egui_context.ctx_mut().is_pointer_over_area() {
        return;
    }

    let Ok(window) = windows.get_single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Ok((transform, Projection::Perspective(projection))) = cameras.get_single() else {
        return;
    };

    let camera = camera_state(transform, projection, window.width() / window.height());
    let ndc = pointer_to_ndc(cursor.x, cursor.y, window.width(), window.height());

    if let Some(pick) = resolve(&orrery, &camera, ndc) {
        debug!("Picked {} at {:.2}", pick.id, pick.distance);
        ui_state.select(pick.id);
    }
}

/// Snapshot of a bevy camera for the selection resolver.
pub fn camera_state(
    transform: &GlobalTransform,
    projection: &PerspectiveProjection,
    aspect: f32,
) -> CameraState {
    let position = transform.translation();

    CameraState {
        position,
        target: position + transform.forward(),
        up: transform.up(),
        fov_y: projection.fov,
        aspect,
        near: projection.near,
        far: projection.far,
    }
}

#[cfg(test)]
mod tests {
    use orrery::Ray;

    use super::*;

    #[test]
    fn camera_state_looks_where_the_camera_looks() {
        let transform = GlobalTransform::from(
            Transform::from_xyz(0.0, 20.0, 40.0).looking_at(Vec3::ZERO, Vec3::Y),
        );
        let projection = PerspectiveProjection {
            fov: 45f32.to_radians(),
            near: 0.1,
            far: 1000.0,
            ..Default::default()
        };

        let camera = camera_state(&transform, &projection, 1.5);
        let ray = Ray::from_camera(&camera, Vec2::ZERO).unwrap();

        let expected = (Vec3::ZERO - camera.position).normalize();
        assert!(ray.direction.distance(expected) < 1e-4);
        assert_eq!(camera.aspect, 1.5);
    }
}
