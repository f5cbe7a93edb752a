use bevy_ecs::prelude::Resource;

/// Tick counter. One tick per rendered frame; the simulation has no notion
/// of wall-clock time.
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct WorldTime {
    pub frame_count: u64,
}

impl WorldTime {
    pub fn advance(&mut self) {
        self.frame_count += 1;
    }
}
