use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::item::RoadmapItem;

/// A named roadmap: the items plus document metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roadmap {
    pub name: String,
    pub items: Vec<RoadmapItem>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Default for Roadmap {
    fn default() -> Self {
        Self {
            name: "Untitled Roadmap".to_string(),
            items: Vec::new(),
            created: Utc::now(),
            modified: Utc::now(),
        }
    }
}

impl Roadmap {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Touch the modified timestamp.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }

    /// Replace provisional ids with permanent ones, as done on first save.
    pub fn promote_provisional_ids(&mut self) {
        for item in &mut self.items {
            item.promote_id();
        }
    }
}
