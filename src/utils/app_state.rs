#![forbid(unsafe_code)]

use std::sync::Arc;

use crate::utils::dog_store::{Dog, DogStore};
use crate::utils::selection::{Selection, SelectionState};

// ***************************************************************************
//                               Application State
// ***************************************************************************
/** Everything the handlers read and mutate.  One instance is created at
 * startup and shared by every endpoint struct.
 */
#[derive(Debug)]
pub struct AppState {
    pub store: DogStore,
    pub selection: SelectionState,
}

impl AppState {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::empty())
    }

    /// Create state preloaded with the startup dogs.
    pub fn new_seeded() -> Arc<Self> {
        let state = Self::empty();
        state.store.seed();
        Arc::new(state)
    }

    fn empty() -> Self {
        Self {store: DogStore::new(), selection: SelectionState::new()}
    }

    // ---------------------------------------------------------------------------
    // selected_dog:
    // ---------------------------------------------------------------------------
    /** Resolve the current selection to a record.  A selection naming a dog
     * that no longer exists resolves to None.
     */
    pub fn selected_dog(&self) -> Option<Dog> {
        match self.selection.current() {
            Selection::NoSelection => None,
            Selection::Selected(id) => self.store.get(&id),
        }
    }
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeding_fills_an_empty_store() {
        assert!(AppState::new().store.is_empty());
        let state = AppState::new_seeded();
        assert!(!state.store.is_empty());
        assert_eq!(state.store.len(), 2);
    }

    #[test]
    fn selected_dog_resolves_existing() {
        let state = AppState::new();
        let dog = state.store.add("Comet", "Whippet");
        assert!(state.selected_dog().is_none());
        state.selection.select(&dog.id);
        assert_eq!(state.selected_dog(), Some(dog));
    }

    #[test]
    fn dangling_selection_resolves_to_none() {
        let state = AppState::new();
        state.selection.select("gone");
        assert!(state.selected_dog().is_none());
    }
}
