use bevy::prelude::*;
use bevy_egui::egui::{ComboBox, Key, Slider};
use bevy_egui::{egui, EguiContexts};

use super::State;
use crate::{Orrery, Target, Toggles};

#[derive(Resource, Debug, Clone, Default)]
pub struct UiState {
    search: String,
    search_error: Option<String>,
    selected: Option<String>,
    info_visible: bool,
}

impl UiState {
    pub fn select(&mut self, id: &str) {
        self.selected = Some(id.to_string());
        self.info_visible = true;
    }
}

pub fn render(
    mut ui_state: ResMut<UiState>,
    mut egui_context: EguiContexts,
    mut state: ResMut<State>,
    mut toggles: ResMut<Toggles>,
    mut target: ResMut<Target>,
    orrery: Res<Orrery>,
) {
    let ctx = egui_context.ctx_mut();
    let UiState {
        search,
        search_error,
        selected,
        info_visible,
    } = &mut *ui_state;

    egui::TopBottomPanel::top("Top").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label("Search:");
            let response = ui.text_edit_singleline(search);
            let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));

            ComboBox::from_id_source("Bodies")
                .selected_text(target.focus().unwrap_or("—"))
                .show_ui(ui, |ui| {
                    for id in orrery.catalog().ids() {
                        if ui.selectable_label(target.focus() == Some(id), id).clicked() {
                            *search = id.to_string();
                        }
                    }
                });

            if submitted || ui.button("Go").clicked() {
                *search_error = match target.focus_on(&orrery, search) {
                    Ok(()) => None,
                    Err(err) => Some(err.to_string()),
                };
            }

            if ui.button("Release").clicked() {
                target.release();
            }

            if let Some(err) = search_error.as_deref() {
                ui.colored_label(egui::Color32::LIGHT_RED, err);
            }
        });

        ui.horizontal(|ui| {
            let mut orbits = toggles.orbits_visible;
            if ui.checkbox(&mut orbits, "Show orbits").changed() {
                toggles.set_orbit_paths_visible(orbits);
            }

            let mut labels = toggles.labels_visible;
            if ui.checkbox(&mut labels, "Show labels").changed() {
                toggles.set_labels_visible(labels);
            }

            ui.separator();
            ui.checkbox(&mut state.paused, "Pause");
            ui.add(
                Slider::new(&mut state.time_scale, 0.0..=10.0)
                    .logarithmic(true)
                    .text("Time scale"),
            );
        });
    });

    let Some(id) = selected.as_deref() else {
        return;
    };
    let Some(body) = orrery.catalog().get(id) else {
        return;
    };

    egui::Window::new("Info").open(info_visible).show(ctx, |ui| {
        let mut lines = body.info_lines().into_iter();

        if let Some(name) = lines.next() {
            ui.heading(name);
        }
        for line in lines.filter(|line| !line.is_empty()) {
            ui.label(line);
        }
    });
}
