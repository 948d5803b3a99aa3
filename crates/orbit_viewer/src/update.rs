use bevy::prelude::*;
use smooth_bevy_cameras::LookTransform;

use super::State;
use crate::planet::Body;
use crate::{Orrery, Target};

pub fn tick(time: Res<Time>, state: Res<State>, mut orrery: ResMut<Orrery>) {
    if state.paused {
        return;
    }

    orrery.advance(time.delta_seconds() * state.frame_rate, state.time_scale);
}

pub fn bodies(
    state: Res<State>,
    orrery: Res<Orrery>,
    mut bodies: Query<(&Body, &mut Transform)>,
) {
    for (body, mut transform) in bodies.iter_mut() {
        let Ok(position) = orrery.position_of(&body.id) else {
            warn!("Body {} is missing from the orbit state", body.id);
            continue;
        };

        transform.translation = position;
        transform.rotate_y(state.spin_per_frame);
    }
}

pub fn camera_focus(
    mut look_transform: Query<&mut LookTransform>,
    mut target: ResMut<Target>,
    orrery: Res<Orrery>,
) {
    if target.focus().is_none() {
        return;
    }

    target.follow(&orrery);

    for mut look in look_transform.iter_mut() {
        look.target = target.position;
    }
}
