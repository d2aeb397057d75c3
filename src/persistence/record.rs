use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{PersistenceError, PersistenceResult};
use crate::util::time;

/// Metadata of one stored drawing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawingRecord {
    pub id: Uuid,
    pub name: String,
    pub tags: Vec<String>,
    pub width: u32,
    pub height: u32,
    /// Seconds since the UNIX epoch
    #[serde(default)]
    pub created_at: u64,
}

impl DrawingRecord {
    pub fn new(name: impl Into<String>, tags: Vec<String>, width: u32, height: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            tags,
            width,
            height,
            created_at: time::timestamp_secs(),
        }
    }

    /// A record needs a name; every tag must be a single non-empty word.
    pub fn validate(&self) -> PersistenceResult<()> {
        if self.name.trim().is_empty() {
            return Err(PersistenceError::InvalidRecord("name is empty".to_owned()));
        }
        if let Some(tag) = self.tags.iter().find(|tag| tag.is_empty() || tag.chars().any(char::is_whitespace)) {
            return Err(PersistenceError::InvalidRecord(format!("invalid tag '{tag}'")));
        }
        if self.width == 0 || self.height == 0 {
            return Err(PersistenceError::InvalidRecord(format!(
                "invalid size {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

/// Splits user input like `"cats, sketch  wip"` into tags.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|tag| !tag.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Records carrying every one of `tags` (case-insensitive). No tags matches all.
pub fn filter_by_tags<'a>(records: &'a [DrawingRecord], tags: &[String]) -> Vec<&'a DrawingRecord> {
    records
        .iter()
        .filter(|record| tags.iter().all(|tag| record.has_tag(tag)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, tags: &[&str]) -> DrawingRecord {
        DrawingRecord::new(name, tags.iter().map(|t| t.to_string()).collect(), 10, 10)
    }

    #[test]
    fn test_validation() {
        assert!(record("cat", &["pets"]).validate().is_ok());
        assert!(record("cat", &[]).validate().is_ok());
        assert!(matches!(record("  ", &[]).validate(), Err(PersistenceError::InvalidRecord(_))));
        assert!(matches!(record("cat", &["two words"]).validate(), Err(PersistenceError::InvalidRecord(_))));
        assert!(matches!(record("cat", &[""]).validate(), Err(PersistenceError::InvalidRecord(_))));
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!(parse_tags("cats, sketch  wip,"), vec!["cats", "sketch", "wip"]);
        assert!(parse_tags("  ").is_empty());
    }

    #[test]
    fn test_filter_requires_all_tags() {
        let records = vec![record("a", &["x", "y"]), record("b", &["x"]), record("c", &[])];
        assert_eq!(filter_by_tags(&records, &[]).len(), 3);
        let both: Vec<_> = filter_by_tags(&records, &["X".into(), "y".into()])
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(both, vec!["a"]);
    }
}
