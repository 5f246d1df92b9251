// Fruit Domain Model

use super::error::{DomainError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Fruit ID (storage-assigned or caller-supplied)
pub type FruitId = i64;

/// Fruit Entity
///
/// A fruit is fully defined by `(id, name, emoji, season)`. The timestamps are
/// storage metadata and take no part in equality or ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fruit {
    pub id: FruitId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    pub season: String,

    #[serde(default)]
    pub created_at: i64, // epoch ms
    #[serde(default)]
    pub modified_at: i64, // epoch ms
}

impl Fruit {
    /// Build a fruit without storage timestamps (fixtures and tests)
    pub fn new(
        id: FruitId,
        name: impl Into<String>,
        emoji: Option<&str>,
        season: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            emoji: emoji.map(str::to_string),
            season: season.into(),
            created_at: 0,
            modified_at: 0,
        }
    }
}

impl PartialEq for Fruit {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.emoji == other.emoji
            && self.season == other.season
    }
}

impl Eq for Fruit {}

impl Ord for Fruit {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id
            .cmp(&other.id)
            .then_with(|| self.name.cmp(&other.name))
            .then_with(|| self.season.cmp(&other.season))
            .then_with(|| self.emoji.cmp(&other.emoji))
    }
}

impl PartialOrd for Fruit {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Ordered collection of fruits; `sort()` gives the comparison order
pub type Fruits = Vec<Fruit>;

/// Insert input. An absent or zero id lets storage pick the next sequence value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFruit {
    #[serde(default)]
    pub id: Option<FruitId>,
    pub name: String,
    #[serde(default)]
    pub emoji: Option<String>,
    pub season: String,
}

impl NewFruit {
    pub fn new(name: impl Into<String>, season: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            emoji: None,
            season: season.into(),
        }
    }

    pub fn with_id(mut self, id: FruitId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = Some(emoji.into());
        self
    }

    /// Caller-supplied id, if any (zero counts as absent)
    pub fn explicit_id(&self) -> Option<FruitId> {
        self.id.filter(|id| *id != 0)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(id) = self.id {
            if id < 0 {
                return Err(DomainError::NegativeId(id));
            }
        }
        require("name", &self.name)?;
        require("season", &self.season)
    }
}

/// Full-record replacement of the mutable fields
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FruitUpdate {
    pub name: String,
    #[serde(default)]
    pub emoji: Option<String>,
    pub season: String,
}

impl FruitUpdate {
    pub fn validate(&self) -> Result<()> {
        require("name", &self.name)?;
        require("season", &self.season)
    }
}

fn require(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DomainError::EmptyField(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_ignores_timestamps() {
        let mut stored = Fruit::new(8, "Apple", Some("U+1F34E"), "Fall");
        stored.created_at = 1_700_000_000_000;
        stored.modified_at = 1_700_000_000_500;

        assert_eq!(stored, Fruit::new(8, "Apple", Some("U+1F34E"), "Fall"));
        assert_ne!(stored, Fruit::new(8, "Apple", None, "Fall"));
    }

    #[test]
    fn test_sort_orders_by_id_first() {
        let mut fruits: Fruits = vec![
            Fruit::new(7, "Watermelon", Some("U+1F349"), "Summer"),
            Fruit::new(5, "Blueberry", Some("U+1FAD0"), "Summer"),
            Fruit::new(6, "Banana", Some("U+1F34C"), "Summer"),
        ];
        fruits.sort();

        let ids: Vec<FruitId> = fruits.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![5, 6, 7]);
    }

    #[test]
    fn test_json_shape() {
        let fruit = Fruit::new(1, "Mango", Some("U+1F96D"), "Spring");
        let value = serde_json::to_value(&fruit).unwrap();

        assert_eq!(value["name"], "Mango");
        assert_eq!(value["emoji"], "U+1F96D");
        assert!(value.get("createdAt").is_some());
        assert!(value.get("modifiedAt").is_some());

        let plain = Fruit::new(2, "Kiwi", None, "Winter");
        let value = serde_json::to_value(&plain).unwrap();
        assert!(value.get("emoji").is_none());
    }

    #[test]
    fn test_new_fruit_zero_id_is_absent() {
        let fruit = NewFruit::new("Test Fruit", "Spring").with_id(0);
        assert_eq!(fruit.explicit_id(), None);

        let fruit = NewFruit::new("Test Fruit", "Spring").with_id(11);
        assert_eq!(fruit.explicit_id(), Some(11));
    }

    #[test]
    fn test_new_fruit_validation() {
        assert!(NewFruit::new("Pear", "Fall").validate().is_ok());
        assert_eq!(
            NewFruit::new("  ", "Fall").validate(),
            Err(DomainError::EmptyField("name"))
        );
        assert_eq!(
            NewFruit::new("Pear", "").validate(),
            Err(DomainError::EmptyField("season"))
        );
        assert_eq!(
            NewFruit::new("Pear", "Fall").with_id(-3).validate(),
            Err(DomainError::NegativeId(-3))
        );
    }

    #[test]
    fn test_new_fruit_decodes_without_optional_fields() {
        let fruit: NewFruit =
            serde_json::from_str(r#"{"name": "Test Fruit 2", "season": "Spring"}"#).unwrap();
        assert_eq!(fruit.id, None);
        assert_eq!(fruit.emoji, None);
    }
}
