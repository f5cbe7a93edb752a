//! Shared menu navigation.
//!
//! Menu states implement [`Menu`] and forward their update to
//! [`update_menu`], which handles:
//! - up/down navigation with wrap-around
//! - showing only the cursor of the selected item
//! - turning a confirm press into the state's transition
use bevy_ecs::prelude::*;

use crate::components::menu::MenuCursor;
use crate::error::CoreError;
use crate::resources::input::InputState;
use crate::states::Transition;

/// Capabilities a menu state exposes to [`update_menu`].
pub trait Menu {
    fn selection(&self) -> usize;
    fn set_selection(&mut self, selection: usize);
    /// Transition for the current selection; an index outside the menu is
    /// [`CoreError::InvalidSelection`].
    fn confirm_selection(&self) -> Result<Transition, CoreError>;
    /// Item ids in display order.
    fn menu_ids(&self) -> &'static [&'static str];
    /// Cursor ids, index-aligned with [`Menu::menu_ids`].
    fn cursor_menu_ids(&self) -> &'static [&'static str];
}

/// One frame of menu interaction against the current [`InputState`].
pub fn update_menu<M: Menu + ?Sized>(
    menu: &mut M,
    world: &mut World,
) -> Result<Transition, CoreError> {
    let input = world
        .get_resource::<InputState>()
        .cloned()
        .unwrap_or_default();

    let count = menu.menu_ids().len();
    if count > 0 {
        let selection = menu.selection() % count;
        if input.menu_down.just_pressed {
            menu.set_selection((selection + 1) % count);
        } else if input.menu_up.just_pressed {
            menu.set_selection((selection + count - 1) % count);
        }
    }

    let selected = menu.cursor_menu_ids().get(menu.selection()).copied();
    let mut cursors = world.query::<&mut MenuCursor>();
    for mut cursor in cursors.iter_mut(world) {
        let visible = Some(cursor.id) == selected;
        if cursor.visible != visible {
            cursor.visible = visible;
        }
    }

    if input.confirm.just_pressed {
        return menu.confirm_selection();
    }
    Ok(Transition::None)
}
