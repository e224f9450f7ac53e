//! Surface Events
//!
//! Events sent from the UI surface to the Keeper. The surface reports user
//! intent; the keeper decides what actually happens (whether a request is
//! already in flight, whether a selection index is valid, and so on).

use serde::{Deserialize, Serialize};

use crate::messages::Section;

/// Events from the UI surface to the Keeper.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UiEvent {
    /// Generate a new animal of the day.
    Generate,
    /// Select an existing history entry.
    Select {
        /// Index into the history, 0 = newest.
        index: usize,
    },
    /// Generate derived content for the current selection.
    Request {
        /// Which section to generate.
        section: Section,
    },
}
