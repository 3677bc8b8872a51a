use bevy::prelude::*;

/// Screen pixels per world unit at the default zoom.
pub const PIXELS_PER_UNIT: f32 = 48.0;

/// Setup camera for 2D rendering
pub fn setup_camera(mut commands: Commands) {
    // World units are metres-ish; zoom in so the room fills the window.
    commands.spawn((
        Camera2d,
        Projection::Orthographic(OrthographicProjection {
            scale: 1.0 / PIXELS_PER_UNIT,
            ..OrthographicProjection::default_2d()
        }),
    ));
    info!("[level] camera spawned at {PIXELS_PER_UNIT} px/unit");
}
