use bevy::prelude::*;
use bevy_egui::egui::{Align2, Color32, FontId, Id, LayerId, Order, Pos2};
use bevy_egui::EguiContexts;
use orrery::LABEL_OFFSET;
use smooth_bevy_cameras::controllers::orbit::OrbitCameraController;

use crate::{Orrery, Toggles};

const ORBIT_SEGMENTS: usize = 64;
const ORBIT_COLOR: Color = Color::rgb(0.33, 0.33, 0.33);
const LABEL_FONT_SIZE: f32 = 14.0;

pub fn orbits(mut lines: Gizmos, orrery: Res<Orrery>, toggles: Res<Toggles>) {
    if !toggles.orbits_visible {
        return;
    }

    for path in orrery.orbit_paths() {
        lines
            .circle(path.center, Vec3::Y, path.radius, ORBIT_COLOR)
            .segments(ORBIT_SEGMENTS);
    }
}

pub fn labels(
    mut egui_context: EguiContexts,
    orrery: Res<Orrery>,
    toggles: Res<Toggles>,
    cameras: Query<(&Camera, &GlobalTransform), With<OrbitCameraController>>,
) {
    if !toggles.labels_visible {
        return;
    }

    let Ok((camera, camera_transform)) = cameras.get_single() else {
        return;
    };

    let painter = egui_context
        .ctx_mut()
        .layer_painter(LayerId::new(Order::Background, Id::new("labels")));
    let settings = orrery.settings();

    for (body, state) in orrery.bodies() {
        let anchor = state.position + Vec3::Y * (body.radius(settings) + LABEL_OFFSET);

        // Behind the camera or off screen
        let Some(screen) = camera.world_to_viewport(camera_transform, anchor) else {
            continue;
        };

        painter.text(
            Pos2::new(screen.x, screen.y),
            Align2::CENTER_BOTTOM,
            &body.name,
            FontId::proportional(LABEL_FONT_SIZE),
            Color32::WHITE,
        );
    }
}
