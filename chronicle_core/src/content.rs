// Read-only store of historical records keyed by location.
// Populated once from the content file; absent keys mean "no data yet".

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::ChronicleError;
use crate::types::{HistoryRecord, LocationKey};

/// Characters of narrative shown on a story card before the ellipsis.
const CARD_EXCERPT_CHARS: usize = 140;

/// Mapping from location key to its historical record.
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    records: BTreeMap<LocationKey, HistoryRecord>,
    loaded: bool,
}

/// Summary card for the stories list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoryCard {
    pub key: LocationKey,
    pub title: String,
    pub identity: String,
    pub excerpt: String,
}

/// Full record as shown in the story modal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoryDetail {
    pub title: String,
    pub identity: String,
    pub narrative: String,
    pub timeline: Vec<String>,
}

impl ContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the content payload. The top level must be a JSON object; entries
    /// that do not match the record shape are skipped.
    pub fn from_json(payload: &str) -> Result<Self, ChronicleError> {
        let value: serde_json::Value = serde_json::from_str(payload)?;
        let serde_json::Value::Object(entries) = value else {
            return Err(ChronicleError::Content(
                "payload is not a JSON object".to_string(),
            ));
        };

        let mut records = BTreeMap::new();
        for (raw_key, raw_record) in entries {
            let Some(key) = LocationKey::parse(&raw_key) else {
                log::warn!("Skipping content entry with blank key");
                continue;
            };
            match serde_json::from_value::<HistoryRecord>(raw_record) {
                Ok(record) => {
                    records.insert(key, record);
                }
                Err(e) => log::warn!("Skipping malformed content entry '{}': {}", key, e),
            }
        }

        Ok(ContentStore {
            records,
            loaded: true,
        })
    }

    /// Like [`ContentStore::from_json`], but a failed load leaves the store empty.
    pub fn from_json_or_empty(payload: &str) -> Self {
        match Self::from_json(payload) {
            Ok(store) => {
                log::info!("Loaded {} history records", store.len());
                store
            }
            Err(e) => {
                log::warn!("History content unavailable: {}", e);
                Self::new()
            }
        }
    }

    pub fn get(&self, key: &LocationKey) -> Option<&HistoryRecord> {
        self.records.get(key)
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// One card per record, in key order.
    pub fn story_cards(&self) -> Vec<StoryCard> {
        self.records
            .iter()
            .map(|(key, record)| StoryCard {
                key: key.clone(),
                title: key.title(),
                identity: record.identity.clone(),
                excerpt: excerpt(&record.narrative),
            })
            .collect()
    }

    pub fn story_detail(&self, key: &LocationKey) -> Option<StoryDetail> {
        self.get(key).map(|record| StoryDetail {
            title: key.title(),
            identity: record.identity.clone(),
            narrative: record.narrative.clone(),
            timeline: record.timeline.clone(),
        })
    }
}

fn excerpt(narrative: &str) -> String {
    let mut text: String = narrative.chars().take(CARD_EXCERPT_CHARS).collect();
    text.push('…');
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{
        "kalighat": {"identity":"I","uniqueness":"U","narrative":"N","timeline":["A","B"]},
        "Park Street": {"identity":"Jazz","uniqueness":"Lights","narrative":"Music"},
        "broken": {"identity": 7}
    }"#;

    fn key(raw: &str) -> LocationKey {
        LocationKey::parse(raw).unwrap()
    }

    #[test]
    fn loads_records_and_skips_malformed() {
        let store = ContentStore::from_json(PAYLOAD).unwrap();
        assert!(store.is_loaded());
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(&key("kalighat")).unwrap().timeline, vec!["A", "B"]);
        assert!(store.get(&key("broken")).is_none());
    }

    #[test]
    fn null_timeline_still_loads_the_record() {
        let store = ContentStore::from_json(
            r#"{"kalighat":{"identity":"I","uniqueness":"U","narrative":"N","timeline":null}}"#,
        )
        .unwrap();
        let record = store.get(&key("kalighat")).unwrap();
        assert!(record.timeline.is_empty());
        assert_eq!(record.narrative, "N");
    }

    #[test]
    fn keys_are_normalized_on_load() {
        let store = ContentStore::from_json(PAYLOAD).unwrap();
        assert_eq!(store.get(&key("park street")).unwrap().identity, "Jazz");
    }

    #[test]
    fn non_object_payload_is_rejected() {
        assert!(matches!(
            ContentStore::from_json("[1, 2]"),
            Err(ChronicleError::Content(_))
        ));
        assert!(matches!(
            ContentStore::from_json("{not json"),
            Err(ChronicleError::Serialization(_))
        ));
    }

    #[test]
    fn failed_load_leaves_store_empty() {
        let store = ContentStore::from_json_or_empty("<html>404</html>");
        assert!(store.is_empty());
        assert!(!store.is_loaded());
        assert!(store.get(&key("kalighat")).is_none());
    }

    #[test]
    fn story_cards_truncate_narrative() {
        let long = "x".repeat(300);
        let payload = format!(
            r#"{{"esplanade": {{"identity":"Hub","uniqueness":"U","narrative":"{}"}}}}"#,
            long
        );
        let store = ContentStore::from_json(&payload).unwrap();
        let cards = store.story_cards();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].title, "Esplanade");
        assert_eq!(cards[0].excerpt.chars().count(), CARD_EXCERPT_CHARS + 1);
        assert!(cards[0].excerpt.ends_with('…'));
    }

    #[test]
    fn story_detail_for_known_and_unknown_keys() {
        let store = ContentStore::from_json(PAYLOAD).unwrap();
        let detail = store.story_detail(&key("kalighat")).unwrap();
        assert_eq!(detail.title, "Kalighat");
        assert_eq!(detail.timeline, vec!["A", "B"]);
        assert!(store.story_detail(&key("sealdah")).is_none());
    }
}
