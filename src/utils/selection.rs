#![forbid(unsafe_code)]

use std::sync::{PoisonError, RwLock};

// ***************************************************************************
//                               Selection Types
// ***************************************************************************
/** The edit-in-place mode.  When a dog is selected the form edits that dog,
 * otherwise the form creates new dogs.
 */
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    NoSelection,
    Selected(String),
}

/** Holder for the single process-wide selection.  The selected id is not
 * checked against the store.
 */
#[derive(Debug, Default)]
pub struct SelectionState {
    current: RwLock<Selection>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&self, id: &str) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) =
            Selection::Selected(id.to_string());
    }

    pub fn clear(&self) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Selection::NoSelection;
    }

    /// Clear the selection only if it names id.  Returns true when cleared.
    pub fn clear_if(&self, id: &str) -> bool {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        match &*current {
            Selection::Selected(selected) if selected == id => {
                *current = Selection::NoSelection;
                true
            },
            _ => false,
        }
    }

    pub fn current(&self) -> Selection {
        self.current.read().unwrap_or_else(PoisonError::into_inner).clone()
    }
}
