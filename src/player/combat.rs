//! Mage contact handling: wall tiles stop walking, enemies deal damage.
//!
//! Reads Rapier `CollisionEvent::Started` messages and forwards each contact
//! involving the mage to [`MageController::on_collision`].  Death is reported
//! by the controller as a `Reload` command in the outbox.

use super::state::{Mage, Tile};
use crate::controller::{Contact, MageController};
use crate::enemy::EnemyTouch;
use crate::host::HostOutbox;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

pub fn mage_collision_system(
    mut collision_events: MessageReader<CollisionEvent>,
    mut q_mage: Query<(Entity, &mut MageController, &Transform), With<Mage>>,
    q_enemies: Query<(&EnemyTouch, &Transform), Without<Mage>>,
    q_tiles: Query<&Tile>,
    time: Res<Time>,
    mut outbox: ResMut<HostOutbox>,
) {
    let Ok((mage_entity, mut controller, transform)) = q_mage.single_mut() else {
        collision_events.clear();
        return;
    };
    let now = time.elapsed_secs();

    for event in collision_events.read() {
        let (e1, e2) = match event {
            CollisionEvent::Started(e1, e2, _) => (*e1, *e2),
            CollisionEvent::Stopped(..) => continue,
        };
        let other = if e1 == mage_entity {
            e2
        } else if e2 == mage_entity {
            e1
        } else {
            continue;
        };

        let contact = if let Ok((touch, enemy_transform)) = q_enemies.get(other) {
            Contact::Enemy {
                touch_damage: touch.touch_damage,
                position: enemy_transform.translation.truncate(),
            }
        } else if let Ok(tile) = q_tiles.get(other) {
            Contact::Tile {
                height: tile.height,
            }
        } else {
            continue;
        };

        controller.on_collision(contact, now, transform.translation, &mut *outbox);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MageConfig;
    use crate::host::HostCommand;
    use bevy_rapier2d::rapier::geometry::CollisionEventFlags;

    fn build_test_app() -> (App, Entity) {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.init_resource::<HostOutbox>();
        app.add_message::<CollisionEvent>();
        app.add_systems(Update, mage_collision_system);
        let mage = app
            .world_mut()
            .spawn((
                Mage,
                MageController::new(MageConfig::default()),
                Transform::default(),
            ))
            .id();
        (app, mage)
    }

    fn collide(app: &mut App, a: Entity, b: Entity) {
        app.world_mut()
            .write_message(CollisionEvent::Started(a, b, CollisionEventFlags::empty()));
    }

    #[test]
    fn enemy_contact_hurts_the_mage() {
        let (mut app, mage) = build_test_app();
        let bug = app
            .world_mut()
            .spawn((
                EnemyTouch { touch_damage: 1.0 },
                Transform::from_xyz(-1.0, 0.0, 0.0),
            ))
            .id();
        collide(&mut app, bug, mage);
        app.update();

        let max = MageConfig::default().max_health;
        let controller = app.world().get::<MageController>(mage).unwrap();
        assert_eq!(controller.health(), max - 1.0);
        assert!(controller.is_invincible());
    }

    #[test]
    fn fatal_contact_requests_reload_once() {
        let (mut app, mage) = build_test_app();
        let spiker = app
            .world_mut()
            .spawn((
                EnemyTouch {
                    touch_damage: 100.0,
                },
                Transform::default(),
            ))
            .id();
        collide(&mut app, mage, spiker);
        collide(&mut app, spiker, mage);
        app.update();

        let reloads = app
            .world()
            .resource::<HostOutbox>()
            .commands()
            .iter()
            .filter(|c| **c == HostCommand::Reload)
            .count();
        assert_eq!(reloads, 1);
    }

    #[test]
    fn unrelated_contacts_are_ignored() {
        let (mut app, mage) = build_test_app();
        let wall = app.world_mut().spawn(Tile { height: 1.0 }).id();
        let bug = app
            .world_mut()
            .spawn((EnemyTouch { touch_damage: 1.0 }, Transform::default()))
            .id();
        collide(&mut app, wall, bug);
        app.update();

        let controller = app.world().get::<MageController>(mage).unwrap();
        assert_eq!(controller.health(), MageConfig::default().max_health);
        assert!(app.world().resource::<HostOutbox>().commands().is_empty());
    }
}
