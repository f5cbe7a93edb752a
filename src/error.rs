//! Fatal simulation errors.
//!
//! Every variant is a broken invariant inside the core, never a runtime
//! condition to recover from. They are propagated out of
//! [`StateMachine::update`](crate::states::machine::StateMachine::update) and
//! end the frame loop.

use bevy_ecs::entity::Entity;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("unknown menu selection: {0}")]
    InvalidSelection(usize),

    #[error("entity {0:?} does not exist")]
    UnknownEntity(Entity),

    #[error("{0} alien masters alive, expected at most one")]
    MultipleAlienMasters(usize),
}
