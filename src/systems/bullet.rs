use bevy_ecs::prelude::*;
use log::debug;

use crate::components::bullet::Bullet;
use crate::components::deleted::Deleted;
use crate::components::mapposition::MapPosition;
use crate::resources::gameconfig::GameConfig;

/// Advance every bullet by its velocity and retire the ones that left the
/// field.
pub fn move_bullet(
    mut commands: Commands,
    mut bullets: Query<(Entity, &mut MapPosition, &Bullet), Without<Deleted>>,
    config: Res<GameConfig>,
) {
    for (entity, mut position, bullet) in bullets.iter_mut() {
        position.pos.y += bullet.velocity;
        if position.y() + bullet.height < 0.0 || position.y() > config.field_height {
            debug!("Bullet {:?} left the field", entity);
            commands.entity(entity).try_insert(Deleted);
        }
    }
}
