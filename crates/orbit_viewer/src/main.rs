use bevy::pbr::NotShadowCaster;
use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use orrery::{CameraTarget, Catalog, OrbitStateModel, ToggleState, DEFAULT_TIME_SCALE};
use smooth_bevy_cameras::controllers::orbit::{
    OrbitCameraBundle, OrbitCameraController, OrbitCameraPlugin,
};
use smooth_bevy_cameras::LookTransformPlugin;

use crate::planet::{body_material, Body, Star};

const DEFAULT_CATALOG: &str = "data/bodies.json";
const CAMERA_EYE: Vec3 = Vec3::new(0.0, 20.0, 40.0);

mod draw;
mod pick;
mod planet;
mod ui;
mod update;

fn main() -> anyhow::Result<()> {
    let catalog_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CATALOG.to_string());

    let mut app = App::new();
    app.add_plugins(DefaultPlugins)
        .add_plugins(LookTransformPlugin)
        .add_plugins(OrbitCameraPlugin::new(false))
        .add_plugins(EguiPlugin);

    // After DefaultPlugins so catalog warnings reach the log
    let model = OrbitStateModel::initialize(Catalog::load(&catalog_path)?)?;
    info!(
        "Loaded {} bodies from {catalog_path}",
        model.catalog().len()
    );

    app.insert_resource(Orrery(model))
        .init_resource::<Toggles>()
        .init_resource::<Target>()
        .init_resource::<ui::UiState>()
        .add_systems(Startup, setup)
        .add_systems(Update, ui::render)
        .add_systems(Update, pick::click.after(ui::render))
        .add_systems(Update, update::tick)
        .add_systems(Update, update::bodies.after(update::tick))
        .add_systems(Update, update::camera_focus.after(update::tick))
        .add_systems(Update, draw::orbits.after(update::tick))
        .add_systems(Update, draw::labels.after(update::bodies))
        .run();

    Ok(())
}

#[derive(Resource)]
struct State {
    time_scale: f32,
    paused: bool,
    /// Ticks per second the orbit periods are expressed against
    frame_rate: f32,
    /// Self-rotation per rendered frame, independent of time scale
    spin_per_frame: f32,
}

impl Default for State {
    fn default() -> Self {
        Self {
            time_scale: DEFAULT_TIME_SCALE,
            paused: false,
            frame_rate: 60.0,
            spin_per_frame: 0.01,
        }
    }
}

#[derive(Resource, Deref, DerefMut)]
pub struct Orrery(pub OrbitStateModel);

#[derive(Resource, Default, Deref, DerefMut)]
pub struct Toggles(pub ToggleState);

#[derive(Resource, Default, Deref, DerefMut)]
pub struct Target(pub CameraTarget);

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
    orrery: Res<Orrery>,
) {
    commands.insert_resource(ClearColor(Color::BLACK));
    commands.insert_resource(State::default());

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 0.05,
    });

    commands.spawn(PointLightBundle {
        point_light: PointLight {
            intensity: 100000.0,
            range: 100000.0,
            shadows_enabled: true,
            ..default()
        },
        ..default()
    });

    let settings = orrery.settings();
    for (body, state) in orrery.bodies() {
        let mesh = meshes.add(Mesh::from(shape::UVSphere {
            radius: body.radius(settings),
            sectors: 32,
            stacks: 32,
        }));
        let texture = body.texture.as_ref().map(|path| asset_server.load(path.clone()));
        let material = materials.add(body_material(body, texture));

        let mut entity = commands.spawn(PbrBundle {
            mesh,
            material,
            transform: Transform::from_translation(state.position),
            ..default()
        });
        entity
            .insert(Body {
                id: body.id.clone(),
            })
            .insert(Name::new(body.name.clone()));

        if body.is_central() {
            entity.insert(Star).insert(NotShadowCaster);
        }
    }

    commands
        .spawn(Camera3dBundle {
            projection: PerspectiveProjection {
                fov: 45f32.to_radians(),
                near: 0.1,
                far: 1000.0,
                ..default()
            }
            .into(),
            ..default()
        })
        .insert(OrbitCameraBundle::new(
            {
                let mut controller = OrbitCameraController::default();

                controller.mouse_rotate_sensitivity = Vec2::ONE * 1.0;
                controller.mouse_translate_sensitivity = Vec2::ONE * 10.0;

                controller
            },
            CAMERA_EYE,
            Vec3::ZERO,
            Vec3::Y,
        ));
}
