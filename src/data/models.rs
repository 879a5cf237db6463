//! Tag and card data models

use serde::{Deserialize, Serialize};

/// Id of the synthetic tag that selects every card
pub const ALL_TAG_ID: &str = "all";

/// A filter tag shown above the cards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Slug derived from the label, used as element id and filter key
    pub id: String,
    /// Display name
    pub label: String,
}

impl Tag {
    /// Build a tag from its display name
    pub fn from_label(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            id: slugify(&label),
            label,
        }
    }

    /// Whether this tag would collide with the synthetic "all" tag
    pub fn is_all(&self) -> bool {
        self.label.eq_ignore_ascii_case(ALL_TAG_ID)
    }
}

/// A link card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Unique card id
    pub id: String,
    /// Heading text
    pub title: String,
    /// Secondary text
    #[serde(default)]
    pub subtitle: String,
    /// Key into the icon lookup
    #[serde(rename = "icon", alias = "iconKey", default)]
    pub icon_key: String,
    /// Target URL
    pub link: String,
    /// Slug of the tag this card belongs to
    #[serde(rename = "tagId", alias = "tag")]
    pub tag_id: String,
}

/// Turn a display name into an element-safe id.
///
/// Lowercases the name and replaces every character outside `[a-z0-9-]` with `-`.
pub fn slugify(label: &str) -> String {
    label
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Dev Tools"), "dev-tools");
        assert_eq!(slugify("C++"), "c--");
        assert_eq!(slugify("web-3"), "web-3");
        assert_eq!(slugify("Ünïcode"), "-n-code");
    }

    #[test]
    fn test_tag_from_label() {
        let tag = Tag::from_label("Music & Audio");
        assert_eq!(tag.id, "music---audio");
        assert_eq!(tag.label, "Music & Audio");
    }

    #[test]
    fn test_tag_is_all() {
        assert!(Tag::from_label("ALL").is_all());
        assert!(!Tag::from_label("Allergies").is_all());
    }

    #[test]
    fn test_card_json_field_names() {
        let card: Card = serde_json::from_str(
            r#"{"id": "gh", "title": "GitHub", "icon": "github",
                "link": "https://github.com", "tagId": "dev"}"#,
        )
        .unwrap();
        assert_eq!(card.icon_key, "github");
        assert_eq!(card.tag_id, "dev");
        assert!(card.subtitle.is_empty());
    }
}
