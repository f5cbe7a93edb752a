use bevy_ecs::prelude::*;

use crate::components::animation::AnimationControl;

/// Engine-level playback pass, run every frame whatever state is on top.
///
/// Applies each pending command and advances running animations by one tick.
/// Pausing gameplay works by queueing `Pause` commands that this pass picks
/// up, so it must keep running while the pipeline does not.
pub fn animation_playback(mut query: Query<&mut AnimationControl>) {
    for mut control in query.iter_mut() {
        control.apply_command();
        control.tick();
    }
}
