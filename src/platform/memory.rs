//! Headless in-memory surface
//!
//! Keeps tag and card elements with their class sets so tests and the replay
//! tool can inspect exactly what a browser would show.

use crate::data::{Card, Tag};
use crate::platform::surface::{ElementId, ElementKind, Surface};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// A live element and its classes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryElement {
    /// Element identity
    pub id: ElementId,
    /// Tag or card
    pub kind: ElementKind,
    /// Tag id or card id the element was created for
    pub key: String,
    /// Current class set
    pub classes: BTreeSet<String>,
}

/// In-memory [`Surface`]
#[derive(Debug, Default)]
pub struct MemorySurface {
    elements: BTreeMap<ElementId, MemoryElement>,
    tag_order: Vec<ElementId>,
    card_order: Vec<ElementId>,
    opened_links: Vec<String>,
    next_id: u64,
}

impl MemorySurface {
    /// Empty surface
    pub fn new() -> Self {
        Self::default()
    }

    fn create(&mut self, kind: ElementKind, key: &str) -> ElementId {
        self.next_id += 1;
        let id = ElementId(self.next_id);
        self.elements.insert(
            id,
            MemoryElement {
                id,
                kind,
                key: key.to_string(),
                classes: BTreeSet::new(),
            },
        );
        id
    }

    /// Look up a live element
    pub fn element(&self, id: ElementId) -> Option<&MemoryElement> {
        self.elements.get(&id)
    }

    /// Whether `id` still refers to a live element
    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    /// Tag elements in display order
    pub fn tags(&self) -> impl Iterator<Item = &MemoryElement> {
        self.tag_order.iter().filter_map(|id| self.elements.get(id))
    }

    /// Card elements in display order
    pub fn cards(&self) -> impl Iterator<Item = &MemoryElement> {
        self.card_order.iter().filter_map(|id| self.elements.get(id))
    }

    /// Ids of the rendered cards in display order
    pub fn card_keys(&self) -> Vec<String> {
        self.cards().map(|e| e.key.clone()).collect()
    }

    /// Element rendered for tag `tag_id`
    pub fn find_tag(&self, tag_id: &str) -> Option<ElementId> {
        self.tags().find(|e| e.key == tag_id).map(|e| e.id)
    }

    /// Element rendered for card `card_id`
    pub fn find_card(&self, card_id: &str) -> Option<ElementId> {
        self.cards().find(|e| e.key == card_id).map(|e| e.id)
    }

    /// Every live element carrying `class`
    pub fn elements_with_class<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a MemoryElement> {
        self.elements.values().filter(move |e| e.classes.contains(class))
    }

    /// Links opened so far, oldest first
    pub fn opened_links(&self) -> &[String] {
        &self.opened_links
    }
}

impl Surface for MemorySurface {
    fn clear_tags(&mut self) {
        for id in self.tag_order.drain(..) {
            self.elements.remove(&id);
        }
    }

    fn insert_tag(&mut self, tag: &Tag) -> ElementId {
        let id = self.create(ElementKind::Tag, &tag.id);
        self.tag_order.push(id);
        id
    }

    fn clear_cards(&mut self) {
        for id in self.card_order.drain(..) {
            self.elements.remove(&id);
        }
    }

    fn insert_card(&mut self, card: &Card, _icon: Option<&str>) -> ElementId {
        let id = self.create(ElementKind::Card, &card.id);
        self.card_order.push(id);
        id
    }

    fn add_class(&mut self, element: ElementId, class: &str) {
        if let Some(e) = self.elements.get_mut(&element) {
            e.classes.insert(class.to_string());
        }
    }

    fn remove_class(&mut self, element: ElementId, class: &str) {
        if let Some(e) = self.elements.get_mut(&element) {
            e.classes.remove(class);
        }
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.elements
            .get(&element)
            .is_some_and(|e| e.classes.contains(class))
    }

    fn open_link(&mut self, url: &str) {
        debug!("Opening {}", url);
        self.opened_links.push(url.to_string());
    }
}
