//! Game records: the flat key/value metadata of one game

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

use super::CatalogError;

/// Field aliases tried in order when a well-known field is requested
const ALIASES: &[(&str, &[&str])] = &[
    ("title", &["title", "name", "game_name"]),
    ("description", &["description", "desc"]),
    ("players", &["players", "num_players"]),
    ("rating", &["rating", "score"]),
];

/// Metadata of one game, keyed by lowercase field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameRecord {
    fields: IndexMap<String, String>,
}

impl GameRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field (builder style)
    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set a field; keys are stored lowercase and trimmed
    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        self.fields.insert(key.trim().to_ascii_lowercase(), value.into());
    }

    /// Raw field lookup, no aliasing
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .get(&key.trim().to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Field lookup that understands the aliases upstream sources use
    ///
    /// Empty values count as missing so an alias further down the list can
    /// still supply the field.
    pub fn field(&self, key: &str) -> Option<&str> {
        let key = key.trim().to_ascii_lowercase();
        let candidates = ALIASES
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, aliases)| *aliases);

        match candidates {
            Some(aliases) => aliases
                .iter()
                .filter_map(|alias| self.get(alias))
                .find(|value| !value.trim().is_empty()),
            None => self.get(&key).filter(|value| !value.trim().is_empty()),
        }
    }

    /// Field content or the empty string
    pub fn text(&self, key: &str) -> &str {
        self.field(key).unwrap_or("")
    }

    /// Display title
    pub fn title(&self) -> &str {
        self.text("title")
    }

    /// Free-form rating string
    pub fn rating(&self) -> &str {
        self.text("rating")
    }

    /// Free-form player count string
    pub fn players(&self) -> &str {
        self.text("players")
    }

    /// Per-game asset path for an image slot, if the record carries one
    pub fn asset_path(&self, slot: &str) -> Option<&str> {
        self.get(slot).filter(|value| !value.trim().is_empty())
    }

    /// Iterate over fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Build a record from a JSON object; scalar values are stringified
    pub fn from_json_value(value: &Value) -> Result<Self, CatalogError> {
        let object = value
            .as_object()
            .ok_or_else(|| CatalogError::InvalidRecord("expected a JSON object".to_string()))?;

        let mut record = Self::new();
        for (key, value) in object {
            let text = match value {
                Value::Null => continue,
                Value::String(s) => s.clone(),
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.to_string(),
                Value::Array(_) | Value::Object(_) => {
                    log::debug!("Skipping nested field '{}' in game record", key);
                    continue;
                }
            };
            record.insert(key, text);
        }
        Ok(record)
    }

    /// Load a record from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let value: Value = serde_json::from_str(&contents)?;
        Self::from_json_value(&value)
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for GameRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (key, value) in iter {
            record.insert(key.as_ref(), value);
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_aliases() {
        let record = GameRecord::new()
            .with("Game_Name", "Super Metroid")
            .with("desc", "Samus returns")
            .with("title", "");

        assert_eq!(record.title(), "Super Metroid");
        assert_eq!(record.text("description"), "Samus returns");
        assert_eq!(record.text("genre"), "");
    }

    #[test]
    fn test_from_json_stringifies_scalars() {
        let record = GameRecord::from_json_value(&json!({
            "name": "Contra",
            "rating": 0.8,
            "players": 2,
            "cover": null,
            "tags": ["run", "gun"]
        }))
        .unwrap();

        assert_eq!(record.title(), "Contra");
        assert_eq!(record.rating(), "0.8");
        assert_eq!(record.players(), "2");
        assert_eq!(record.asset_path("cover"), None);
        assert_eq!(record.len(), 3);
        assert!(GameRecord::from_json_value(&json!("just a string")).is_err());
    }
}
