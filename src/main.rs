use bevy::prelude::*;
use bevy::window::WindowResolution;
use bevy_rapier2d::prelude::*;
use mage::graphics;
use mage::player::MagePlugin;

/// Configure Rapier physics: top-down view, no gravity.
fn setup_physics_config(mut config: Query<&mut RapierConfiguration>) {
    for mut cfg in config.iter_mut() {
        cfg.gravity = Vec2::ZERO;
    }
}

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Mage".into(),
                resolution: WindowResolution::new(1024, 640),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .insert_resource(ClearColor(Color::srgb(0.06, 0.07, 0.09)))
        // pixels_per_meter(1.0): world units are physics units.
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(1.0))
        .add_plugins(MagePlugin)
        .add_systems(Startup, (graphics::setup_camera, setup_physics_config))
        .run();
}
