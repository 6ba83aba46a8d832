// Story text composed from a history record for the typewriter panel.

use std::fmt::Write;

use crate::types::{HistoryRecord, LocationKey};

/// Full story text for a location, or the "coming soon" placeholder when
/// there is no record (content not loaded yet, or no entry for the key).
pub fn compose_story(key: &LocationKey, record: Option<&HistoryRecord>) -> String {
    let title = key.title();
    let Some(record) = record else {
        return format!("📍 {}\n\nHistory coming soon…", title);
    };

    let mut text = format!(
        "📍 {}\n\n🪶 Identity: {}\n\n📜 Golden Moments:\n",
        title, record.identity
    );
    for event in &record.timeline {
        let _ = writeln!(text, "  🟡 {}", event);
    }
    let _ = write!(
        text,
        "\n✨ Uniqueness: {}\n\n🎥 Story: {}",
        record.uniqueness, record.narrative
    );
    text
}
