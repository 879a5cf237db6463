//! Element surface: the DOM as seen by the interaction core

use crate::data::{Card, Tag};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Visual state classes toggled by the core
pub mod classes {
    /// Tag currently driving the filter
    pub const SELECTED: &str = "select";
    /// Pointer is over the element (pointer mode only)
    pub const HOVER: &str = "hover";
    /// Card has finished entering
    pub const VISIBLE: &str = "visible";
    /// Card is playing its exit animation
    pub const HIDING: &str = "hiding";
}

/// Identity of an element created by a [`Surface`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What an element represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// Filter tag in the tag bar
    Tag,
    /// Link card in the card grid
    Card,
}

/// Element tree operations the core relies on
///
/// Implementations own element creation and styling. Removing an element
/// (through one of the `clear_*` calls) invalidates its id.
pub trait Surface {
    /// Remove every tag element
    fn clear_tags(&mut self);

    /// Append a tag element
    fn insert_tag(&mut self, tag: &Tag) -> ElementId;

    /// Remove every card element
    fn clear_cards(&mut self);

    /// Append a card element with its resolved icon markup
    fn insert_card(&mut self, card: &Card, icon: Option<&str>) -> ElementId;

    /// Add a class to an element. Unknown ids are ignored.
    fn add_class(&mut self, element: ElementId, class: &str);

    /// Remove a class from an element. Unknown ids are ignored.
    fn remove_class(&mut self, element: ElementId, class: &str);

    /// Whether an element currently carries a class
    fn has_class(&self, element: ElementId, class: &str) -> bool;

    /// Navigate to a card's link in a new browsing context
    fn open_link(&mut self, url: &str);
}
