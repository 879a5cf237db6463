//! In-memory gallery catalog and its JSON loader
//!
//! Layout of a data directory:
//!
//! ```text
//! tags.json   {"tags": ["Dev", "Music", ...]}
//! cards.json  [{"id", "title", "subtitle", "icon", "link", "tagId"}, ...]
//! icons.json  {"github": "<svg .../>", ...}   (optional)
//! ```

use crate::data::models::{ALL_TAG_ID, Card, Tag};
use crate::error::{JunkyardError, Result, StringError};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Debug, Deserialize)]
struct TagsFile {
    tags: Vec<String>,
}

/// Ordered tags, ordered cards and the icon lookup
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tags: Vec<Tag>,
    cards: Vec<Card>,
    icons: HashMap<String, String>,
}

impl Catalog {
    /// Build a catalog from tag labels, cards and icon markup.
    ///
    /// Labels that collide with the synthetic "all" tag are dropped. Card ids must
    /// be unique and non-empty.
    pub fn new(
        tag_labels: Vec<String>,
        cards: Vec<Card>,
        icons: HashMap<String, String>,
    ) -> Result<Self> {
        let mut tags = Vec::with_capacity(tag_labels.len());
        for label in tag_labels {
            if label.trim().is_empty() {
                return Err(JunkyardError::DataError(StringError::new(
                    "tag label must not be empty",
                )));
            }
            let tag = Tag::from_label(label);
            if tag.is_all() {
                debug!("Skipping data tag '{}' that shadows the 'all' tag", tag.label);
                continue;
            }
            tags.push(tag);
        }

        let mut seen = HashSet::with_capacity(cards.len());
        for card in &cards {
            if card.id.is_empty() {
                return Err(JunkyardError::DataError(StringError::new(format!(
                    "card '{}' has an empty id",
                    card.title
                ))));
            }
            if !seen.insert(card.id.as_str()) {
                return Err(JunkyardError::DataError(StringError::new(format!(
                    "duplicate card id '{}'",
                    card.id
                ))));
            }
            if !tags.iter().any(|t| t.id == card.tag_id) {
                warn!(
                    "Card '{}' references unknown tag '{}', it only shows under '{}'",
                    card.id, card.tag_id, ALL_TAG_ID
                );
            }
        }

        Ok(Self { tags, cards, icons })
    }

    /// Parse the three JSON documents of a data directory
    pub fn from_json(tags_json: &str, cards_json: &str, icons_json: Option<&str>) -> Result<Self> {
        let tags: TagsFile = serde_json::from_str(tags_json)?;
        let cards: Vec<Card> = serde_json::from_str(cards_json)?;
        let icons = match icons_json {
            Some(json) => serde_json::from_str(json)?,
            None => HashMap::new(),
        };
        Self::new(tags.tags, cards, icons)
    }

    /// Load `tags.json`, `cards.json` and optional `icons.json` from `dir`
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let read = |name: &str| {
            std::fs::read_to_string(dir.join(name)).map_err(|e| {
                JunkyardError::DataError(StringError::new(format!(
                    "{}: {e}",
                    dir.join(name).display()
                )))
            })
        };

        let tags_json = read("tags.json")?;
        let cards_json = read("cards.json")?;
        let icons_path = dir.join("icons.json");
        let icons_json = if icons_path.exists() {
            Some(std::fs::read_to_string(icons_path)?)
        } else {
            None
        };

        let catalog = Self::from_json(&tags_json, &cards_json, icons_json.as_deref())?;
        info!(
            "Loaded {} tags and {} cards from {}",
            catalog.tags.len(),
            catalog.cards.len(),
            dir.display()
        );
        Ok(catalog)
    }

    /// Data tags in display order, without the synthetic "all" tag
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// All cards in display order
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Look up a card by id
    pub fn card(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    /// Icon markup for a key
    pub fn icon(&self, key: &str) -> Option<&str> {
        self.icons.get(key).map(String::as_str)
    }

    /// Whether `tag_id` is `all` or one of the data tags
    pub fn has_tag(&self, tag_id: &str) -> bool {
        tag_id == ALL_TAG_ID || self.tags.iter().any(|t| t.id == tag_id)
    }

    /// Cards shown for a selection: every card for `all`, else the matching ones
    pub fn cards_for(&self, tag_id: &str) -> Vec<&Card> {
        if tag_id == ALL_TAG_ID {
            self.cards.iter().collect()
        } else {
            self.cards.iter().filter(|c| c.tag_id == tag_id).collect()
        }
    }

    /// Nothing can be rendered without both tags and cards
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() || self.cards.is_empty()
    }
}
